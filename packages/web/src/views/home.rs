use dioxus::prelude::*;
use ui::Hero;

#[component]
pub fn Home() -> Element {
    let lang = ui::use_lang()();
    rsx! {
        Hero {}
        div { class: "panel",
            p { class: "hint", {ui::t(lang, "home.tip")} }
            div { class: "cta_row",
                a { class: "btn primary", href: "/try-on", {ui::t(lang, "home.cta.start")} }
            }
        }
    }
}
