use dioxus::prelude::*;

const HERO_CSS: Asset = asset!("/assets/styling/hero.css");

#[component]
pub fn Hero() -> Element {
    let lang = crate::use_lang()();
    rsx! {
        document::Link { rel: "stylesheet", href: HERO_CSS }

        div {
            id: "hero",
            div { id: "links",
                h1 { {crate::t(lang, "app.name")} }
                p { {crate::t(lang, "home.subtitle")} }

                div { class: "cta_row",
                    a { class: "btn primary", href: "/try-on", {crate::t(lang, "home.cta.start")} }
                }
                p { class: "hint", {crate::t(lang, "home.tip")} }
            }
        }
    }
}
