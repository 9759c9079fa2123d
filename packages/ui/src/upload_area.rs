use dioxus::prelude::*;

/// File drop zone for one photo. The flow component reads the picked file
/// from the input element by id, so the id must be unique per slot.
#[component]
pub fn UploadArea(
    input_id: String,
    title: String,
    description: String,
    preview_url: Option<String>,
    on_selected: EventHandler<()>,
    on_clear: EventHandler<()>,
) -> Element {
    let clear_label = crate::t(crate::use_lang()(), "upload.clear");

    rsx! {
        div { class: "upload_area",
            if let Some(preview) = preview_url {
                div { class: "upload_preview",
                    img { class: "upload_preview_img", src: "{preview}", alt: "{title}" }
                    button {
                        class: "btn",
                        onclick: move |_| on_clear.call(()),
                        "{clear_label}"
                    }
                }
            } else {
                label { class: "upload_label", r#for: "{input_id}",
                    span { class: "upload_title", "{title}" }
                    span { class: "hint", "{description}" }
                }
                input {
                    id: "{input_id}",
                    class: "upload_input",
                    r#type: "file",
                    accept: "image/png,image/jpeg",
                    onchange: move |_| on_selected.call(()),
                }
            }
        }
    }
}
