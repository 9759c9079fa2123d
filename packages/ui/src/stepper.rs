use dioxus::prelude::*;

/// Four-step progress header across the top of the try-on flow.
#[component]
pub fn Stepper(current: usize, steps: Vec<String>) -> Element {
    rsx! {
        ol { class: "stepper",
            for (idx, label) in steps.iter().enumerate() {
                li {
                    key: "{idx}",
                    class: if idx < current {
                        "stepper_item done"
                    } else if idx == current {
                        "stepper_item active"
                    } else {
                        "stepper_item"
                    },
                    span { class: "stepper_index", "{idx + 1}" }
                    span { class: "stepper_label", "{label}" }
                }
            }
        }
    }
}
