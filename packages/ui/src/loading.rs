use dioxus::prelude::*;

/// Spinner plus the cosmetic progress bar shown while a fit request is in
/// flight. The percentage is display-only.
#[component]
pub fn LoadingAnimation(message: String, progress: u8) -> Element {
    rsx! {
        div { class: "loading",
            div { class: "loading_spinner" }
            p { class: "loading_message", "{message}" }
            div { class: "progress_track",
                div {
                    class: "progress_fill",
                    style: "width: {progress}%",
                }
            }
            p { class: "hint", "{progress}%" }
        }
    }
}
