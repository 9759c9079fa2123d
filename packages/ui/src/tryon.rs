use crate::flow::{NotReady, WorkflowSession, WorkflowStep};
use crate::toast::Toasts;
use crate::{t, Lang};
use api::types::{UploadPolicy, MAX_UPLOAD_BYTES};
use dioxus::prelude::*;
use std::time::Duration;

const TRYON_CSS: Asset = asset!("/assets/styling/tryon.css");

const USER_INPUT_ID: &str = "fitroom_user_file";
const CLOTHING_INPUT_ID: &str = "fitroom_clothing_file";

/// Cadence of the cosmetic progress bar. Unrelated to real completion.
const PROGRESS_TICK: Duration = Duration::from_millis(200);
const PROGRESS_STEP: u8 = 5;

#[derive(Clone, Copy, PartialEq)]
enum PhotoKind {
    User,
    Clothing,
}

impl PhotoKind {
    fn input_id(self) -> &'static str {
        match self {
            PhotoKind::User => USER_INPUT_ID,
            PhotoKind::Clothing => CLOTHING_INPUT_ID,
        }
    }
}

/// The four-step try-on workflow: select a photo of yourself, select a
/// clothing photo, wait for the synthesis relay, review the composite.
#[component]
pub fn TryOnFlow() -> Element {
    let lang = crate::use_lang()();
    let toasts = crate::use_toasts();

    let session = use_signal(WorkflowSession::new);
    // Bumping this cancels the running progress timer.
    let timer_run = use_signal(|| 0u32);
    let policy = use_resource(|| async move { api::upload_policy().await });

    // Navigating away tears the session down; previews are browser-owned
    // resources and must not outlive it.
    use_drop(move || {
        let mut session = session;
        for handle in session.with_mut(|s| s.start_over()) {
            let _ = document::eval(&revoke_js(&handle));
        }
    });

    let step = session.with(|s| s.step());
    let steps = vec![
        t(lang, "steps.user"),
        t(lang, "steps.clothing"),
        t(lang, "steps.processing"),
        t(lang, "steps.result"),
    ];
    let current = match step {
        WorkflowStep::SelectUser => 0,
        WorkflowStep::SelectClothing => 1,
        WorkflowStep::Processing => 2,
        WorkflowStep::Result => 3,
    };

    let on_next = {
        let toasts = toasts.clone();
        move |_| {
            let mut session = session;
            match session.with(|s| s.step()) {
                WorkflowStep::SelectUser => {
                    session.with_mut(|s| s.advance_to_clothing());
                }
                WorkflowStep::SelectClothing => match session.with_mut(|s| s.begin_processing()) {
                    Ok(()) => start_processing(session, timer_run, toasts.clone(), lang),
                    Err(NotReady::UploadPending) => toasts.info(
                        t(lang, "toast.upload_pending_title"),
                        Some(t(lang, "toast.upload_pending_body")),
                    ),
                    Err(NotReady::NoClothingPhoto) => {
                        toasts.error(t(lang, "toast.missing_file_title"), None)
                    }
                },
                _ => {}
            }
        }
    };

    let on_back = move |_| {
        let mut session = session;
        session.with_mut(|s| s.back_to_user());
    };

    rsx! {
        document::Link { rel: "stylesheet", href: TRYON_CSS }

        div { class: "tryon_page",
            crate::Stepper { current, steps }

            div { class: "tryon_stage",
                match step {
                    WorkflowStep::SelectUser => rsx! {
                        h2 { {t(lang, "steps.user")} }
                        crate::UploadArea {
                            input_id: USER_INPUT_ID.to_string(),
                            title: t(lang, "upload.user.title"),
                            description: t(lang, "upload.user.desc"),
                            preview_url: session.with(|s| s.user().preview().map(str::to_string)),
                            on_selected: {
                                let toasts = toasts.clone();
                                move |_| {
                                    spawn(handle_selection(
                                        PhotoKind::User,
                                        session,
                                        toasts.clone(),
                                        lang,
                                        policy,
                                    ));
                                }
                            },
                            on_clear: move |_| {
                                let mut session = session;
                                if let Some(handle) = session.with_mut(|s| s.clear_user_photo()) {
                                    revoke_preview(&handle);
                                }
                            },
                        }
                    },
                    WorkflowStep::SelectClothing => rsx! {
                        h2 { {t(lang, "steps.clothing")} }
                        crate::UploadArea {
                            input_id: CLOTHING_INPUT_ID.to_string(),
                            title: t(lang, "upload.clothing.title"),
                            description: t(lang, "upload.clothing.desc"),
                            preview_url: session.with(|s| s.clothing().preview().map(str::to_string)),
                            on_selected: {
                                let toasts = toasts.clone();
                                move |_| {
                                    spawn(handle_selection(
                                        PhotoKind::Clothing,
                                        session,
                                        toasts.clone(),
                                        lang,
                                        policy,
                                    ));
                                }
                            },
                            on_clear: move |_| {
                                let mut session = session;
                                if let Some(handle) = session.with_mut(|s| s.clear_clothing_photo()) {
                                    revoke_preview(&handle);
                                }
                            },
                        }
                    },
                    WorkflowStep::Processing => rsx! {
                        div { class: "tryon_center",
                            h2 { {t(lang, "processing.title")} }
                            crate::LoadingAnimation {
                                message: t(lang, "processing.message"),
                                progress: session.with(|s| s.progress()),
                            }
                        }
                    },
                    WorkflowStep::Result => rsx! {
                        h2 { {t(lang, "steps.result")} }
                        if let Some(result) = session.with(|s| s.result().map(str::to_string)) {
                            crate::ResultView {
                                result_url: result,
                                on_try_another: move |_| {
                                    let mut session = session;
                                    if let Some(handle) =
                                        session.with_mut(|s| s.try_another_clothing())
                                    {
                                        revoke_preview(&handle);
                                    }
                                },
                                on_start_over: move |_| {
                                    let mut session = session;
                                    for handle in session.with_mut(|s| s.start_over()) {
                                        revoke_preview(&handle);
                                    }
                                },
                            }
                        }
                    },
                }
            }

            if matches!(step, WorkflowStep::SelectUser | WorkflowStep::SelectClothing) {
                div { class: "tryon_nav",
                    if step == WorkflowStep::SelectClothing {
                        button { class: "btn", onclick: on_back, {t(lang, "common.back")} }
                    } else {
                        div {}
                    }
                    button {
                        class: "btn primary",
                        disabled: !session.with(|s| s.can_advance()),
                        onclick: on_next,
                        {t(lang, "common.next")}
                    }
                }
            }
        }
    }
}

/// Read the picked file, show a local preview, then eagerly upload it.
/// Upload failure is reported but leaves the preview usable.
async fn handle_selection(
    kind: PhotoKind,
    mut session: Signal<WorkflowSession>,
    toasts: Toasts,
    lang: Lang,
    policy: Resource<Result<UploadPolicy, ServerFnError>>,
) {
    let input_id = kind.input_id();
    let max_bytes = policy()
        .and_then(|r| r.ok())
        .map(|p| p.max_bytes)
        .unwrap_or(MAX_UPLOAD_BYTES);

    let meta = document::eval(&format!(
        r#"(function(){{
            const el = document.getElementById("{input_id}");
            if(!el || !el.files || !el.files[0]) return "no_file";
            const f = el.files[0];
            if(f.size > {max_bytes}) return "too_large";
            return f.name + "|" + URL.createObjectURL(f);
        }})()"#,
    ))
    .await
    .ok()
    .and_then(|v| v.as_str().map(|s| s.to_string()))
    .unwrap_or_default();

    match meta.as_str() {
        "" | "no_file" => {
            toasts.error(t(lang, "toast.missing_file_title"), None);
            return;
        }
        "too_large" => {
            toasts.error(t(lang, "toast.too_large_title"), None);
            return;
        }
        _ => {}
    }
    // The object URL never contains '|', file names might.
    let Some((name, preview)) = meta.rsplit_once('|') else {
        return;
    };

    let replaced = session.with_mut(|s| match kind {
        PhotoKind::User => s.select_user_photo(name.to_string(), preview.to_string()),
        PhotoKind::Clothing => s.select_clothing_photo(name.to_string(), preview.to_string()),
    });
    if let Some(old) = replaced {
        revoke_preview(&old);
    }

    let result = document::eval(&format!(
        r#"(async function(){{
            const el = document.getElementById("{input_id}");
            if(!el || !el.files || !el.files[0]) return "no_file";
            const form = new FormData();
            form.append("file", el.files[0]);
            try {{
                const resp = await fetch("/api/upload", {{ method: "POST", body: form }});
                const data = await resp.json().catch(() => null);
                if(!resp.ok) return "upload_failed:" + resp.status;
                if(!data || !data.uploadUrl) return "upload_failed:malformed";
                return "ok|" + data.uploadUrl;
            }} catch(e) {{ return "upload_failed:" + e; }}
        }})()"#,
    ))
    .await
    .ok()
    .and_then(|v| v.as_str().map(|s| s.to_string()))
    .unwrap_or_else(|| "upload_eval_failed".to_string());

    if let Some(url) = result.strip_prefix("ok|") {
        session.with_mut(|s| match kind {
            PhotoKind::User => s.set_user_server_ref(url.to_string()),
            PhotoKind::Clothing => s.set_clothing_server_ref(url.to_string()),
        });
    } else {
        toasts.error(
            t(lang, "toast.upload_failed_title"),
            Some(format!("{} {result}", t(lang, "toast.details"))),
        );
    }
}

/// Kick off the fit request and the progress timer together. The timer is
/// cancelled on every exit path by bumping `timer_run`.
fn start_processing(
    mut session: Signal<WorkflowSession>,
    mut timer_run: Signal<u32>,
    toasts: Toasts,
    lang: Lang,
) {
    let ticket = timer_run() + 1;
    timer_run.set(ticket);

    spawn(async move {
        loop {
            gloo_timers::future::sleep(PROGRESS_TICK).await;
            if timer_run() != ticket {
                break;
            }
            let done = session.with_mut(|s| {
                if s.step() != WorkflowStep::Processing {
                    return true;
                }
                s.tick_progress(PROGRESS_STEP);
                s.progress() >= 100
            });
            if done {
                break;
            }
        }
    });

    let (user_ref, cloth_ref) = session.with(|s| {
        (
            s.user().server_ref().unwrap_or_default().to_string(),
            s.clothing().server_ref().unwrap_or_default().to_string(),
        )
    });

    spawn(async move {
        let result = document::eval(&format!(
            r#"(async function(){{
                try {{
                    const resp = await fetch("/api/fit", {{
                        method: "POST",
                        headers: {{ "Content-Type": "application/json" }},
                        body: JSON.stringify({{ userUrl: "{}", clothUrl: "{}" }})
                    }});
                    const data = await resp.json().catch(() => null);
                    if(!resp.ok) return "fit_failed:" + resp.status;
                    if(!data || !data.resultUrl) return "fit_failed:malformed";
                    return "ok|" + data.resultUrl;
                }} catch(e) {{ return "fit_failed:" + e; }}
            }})()"#,
            js_escape(&user_ref),
            js_escape(&cloth_ref),
        ))
        .await
        .ok()
        .and_then(|v| v.as_str().map(|s| s.to_string()))
        .unwrap_or_else(|| "fit_eval_failed".to_string());

        // Stop the progress timer whatever happened.
        timer_run.set(timer_run() + 1);

        if let Some(url) = result.strip_prefix("ok|") {
            session.with_mut(|s| s.complete(url.to_string()));
        } else {
            toasts.error(
                t(lang, "toast.fit_failed_title"),
                Some(format!("{} {result}", t(lang, "toast.details"))),
            );
            for handle in session.with_mut(|s| s.fail()) {
                revoke_preview(&handle);
            }
        }
    });
}

fn revoke_preview(url: &str) {
    let js = revoke_js(url);
    spawn(async move {
        let _ = document::eval(&js).await;
    });
}

fn revoke_js(url: &str) -> String {
    format!(
        r#"(function(){{ try {{ URL.revokeObjectURL("{}"); }} catch(e) {{}} return ""; }})()"#,
        js_escape(url)
    )
}

fn js_escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}
