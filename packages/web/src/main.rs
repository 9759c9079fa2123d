use dioxus::prelude::*;
use std::env;

use views::{Home, TryOn};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(WebNavbar)]
    #[route("/")]
    Home {},
    #[route("/try-on")]
    TryOn {},
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

#[cfg(not(feature = "server"))]
fn main() {
    install_panic_hook();
    log_runtime_config();
    dioxus::launch(App);
}

/// Server entry: the served Dioxus application plus the relay surface
/// (upload ingress, synthesis gateway, static blob mounts) on one router.
#[cfg(feature = "server")]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use dioxus_server::{DioxusRouterExt, ServeConfig};

    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    install_panic_hook();
    log_runtime_config();

    let config = api::config::AppConfig::from_env();
    let state = api::state::AppState::from_config(config.clone()).await?;
    api::state::AppState::set_global(std::sync::Arc::new(state));

    let router = axum::Router::new()
        .serve_dioxus_application(ServeConfig::default(), App)
        .merge(api::relay::router(&config))
        .layer(tower_http::trace::TraceLayer::new_for_http());

    let ip = env::var("IP").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = env::var("PORT").unwrap_or_else(|_| "8080".to_string());
    let addr = format!("{ip}:{port}");
    tracing::info!("listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router.into_make_service()).await?;
    Ok(())
}

fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        eprintln!("panic: {info}");
    }));
}

fn log_runtime_config() {
    let ip = env::var("IP").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = env::var("PORT").unwrap_or_else(|_| "8080".to_string());

    eprintln!("startup: IP={ip} PORT={port}");

    log_missing_envs(
        "synthesis",
        &["SYNTHESIS_URL", "SYNTHESIS_INPUT_DIR"],
    );
}

fn log_missing_envs(group: &str, keys: &[&str]) {
    let missing: Vec<&str> = keys
        .iter()
        .copied()
        .filter(|key| env::var(key).ok().is_none())
        .collect();
    if missing.is_empty() {
        return;
    }

    eprintln!(
        "startup: WARNING missing {group} envs: {} (local defaults apply)",
        missing.join(", ")
    );
}

#[component]
fn App() -> Element {
    rsx! {
        // Global app resources
        document::Link { rel: "stylesheet", href: MAIN_CSS }
        ui::FitRoomTheme {}
        ui::I18nProvider {
            ui::ToastProvider {
                Router::<Route> {}
            }
        }
    }
}

/// A web-specific Router around the shared navigation bar
/// which allows us to use the web-specific `Route` enum.
#[component]
fn WebNavbar() -> Element {
    let lang = ui::use_lang()();

    rsx! {
        div { class: "fitroom_nav",
            div { class: "fitroom_nav_inner",
                a { class: "brand", href: "/",
                    span { class: "brand_mark" }
                    span { class: "brand_name", {ui::t(lang, "app.name")} }
                }
                div { class: "nav_links",
                    Link { class: "nav_link", to: Route::TryOn {},
                        {ui::t(lang, "nav.tryon")}
                    }
                    span { class: "hint", {ui::t(lang, "lang.label")} }
                    button { class: "btn", onclick: move |_| ui::set_lang(ui::Lang::Ko), "KO" }
                    button { class: "btn", onclick: move |_| ui::set_lang(ui::Lang::En), "EN" }
                }
            }
        }
        div { class: "fitroom_container route_view", Outlet::<Route> {} }
    }
}
