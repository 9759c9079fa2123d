use dioxus::prelude::*;

#[component]
pub fn TryOn() -> Element {
    rsx! {
        ui::TryOnFlow {}
    }
}
