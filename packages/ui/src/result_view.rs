use dioxus::prelude::*;

/// Final composite image with the two recovery actions.
#[component]
pub fn ResultView(
    result_url: String,
    on_try_another: EventHandler<()>,
    on_start_over: EventHandler<()>,
) -> Element {
    let lang = crate::use_lang()();

    rsx! {
        div { class: "result_view",
            img { class: "result_img", src: "{result_url}", alt: "try-on result" }
            div { class: "cta_row",
                button {
                    class: "btn primary",
                    onclick: move |_| on_try_another.call(()),
                    {crate::t(lang, "result.try_another")}
                }
                button {
                    class: "btn",
                    onclick: move |_| on_start_over.call(()),
                    {crate::t(lang, "result.start_over")}
                }
            }
        }
    }
}
