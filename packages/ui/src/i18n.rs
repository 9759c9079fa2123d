use dioxus::prelude::*;

/// Supported languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lang {
    Ko,
    En,
}

impl Lang {
    pub fn code(self) -> &'static str {
        match self {
            Lang::Ko => "ko",
            Lang::En => "en",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_ascii_lowercase().as_str() {
            "ko" | "ko-kr" => Some(Lang::Ko),
            "en" | "en-us" | "en-gb" => Some(Lang::En),
            _ => None,
        }
    }
}

/// Provide `Signal<Lang>` to the component tree, defaulting to Korean.
#[component]
pub fn I18nProvider(children: Element) -> Element {
    let mut lang = use_signal(|| Lang::Ko);
    use_context_provider(|| lang);

    // Best-effort: load from localStorage or browser language after mount.
    use_effect(move || {
        spawn(async move {
            let js = r#"
            (function(){
              try {
                const saved = localStorage.getItem("fitroom_lang");
                if(saved && typeof saved === "string" && saved.length > 0) return saved;
              } catch(e) {}
              try { return (navigator.language || "ko"); } catch(e) {}
              return "ko";
            })()
            "#;
            if let Ok(v) = document::eval(js).await {
                if let Some(code) = v.as_str() {
                    if let Some(next) = Lang::from_code(code) {
                        lang.set(next);
                    }
                }
            }
        });
    });

    rsx! { {children} }
}

pub fn use_lang() -> Signal<Lang> {
    if let Some(sig) = try_use_context::<Signal<Lang>>() {
        return sig;
    }

    // Fallback for SSR or mis-ordered providers to avoid panics in production.
    eprintln!("startup: missing I18nProvider context, using local Lang::Ko signal");
    use_signal(|| Lang::Ko)
}

pub fn set_lang(lang: Lang) {
    let mut s = use_lang();
    s.set(lang);
    spawn(async move {
        let _ = document::eval(&format!(
            r#"(function(){{ try {{ localStorage.setItem("fitroom_lang","{}"); }} catch(e) {{}} return ""; }})()"#,
            lang.code()
        ))
        .await;
    });
}

/// Translate a key for a given language. Falls back to Korean if missing.
pub fn t(lang: Lang, key: &str) -> String {
    match (lang, key) {
        // Nav / common
        (Lang::Ko, "app.name") => "FitRoom".to_string(),
        (Lang::En, "app.name") => "FitRoom".to_string(),
        (Lang::Ko, "nav.home") => "홈".to_string(),
        (Lang::En, "nav.home") => "Home".to_string(),
        (Lang::Ko, "nav.tryon") => "가상 피팅".to_string(),
        (Lang::En, "nav.tryon") => "Virtual try-on".to_string(),
        (Lang::Ko, "lang.label") => "언어".to_string(),
        (Lang::En, "lang.label") => "Language".to_string(),
        (Lang::Ko, "common.back") => "이전".to_string(),
        (Lang::En, "common.back") => "Back".to_string(),
        (Lang::Ko, "common.next") => "다음".to_string(),
        (Lang::En, "common.next") => "Next".to_string(),

        // Home / hero
        (Lang::Ko, "home.subtitle") => "사진 두 장으로 옷을 미리 입어보세요.".to_string(),
        (Lang::En, "home.subtitle") => "Try clothes on with just two photos.".to_string(),
        (Lang::Ko, "home.cta.start") => "가상 피팅 시작하기".to_string(),
        (Lang::En, "home.cta.start") => "Start a try-on".to_string(),
        (Lang::Ko, "home.tip") => "전신이 나온 선명한 사진일수록 결과가 좋아요.".to_string(),
        (Lang::En, "home.tip") => "A clear full-body photo gives the best result.".to_string(),

        // Workflow steps
        (Lang::Ko, "steps.user") => "내 사진 업로드".to_string(),
        (Lang::En, "steps.user") => "Upload your photo".to_string(),
        (Lang::Ko, "steps.clothing") => "옷 이미지 업로드".to_string(),
        (Lang::En, "steps.clothing") => "Upload a clothing photo".to_string(),
        (Lang::Ko, "steps.processing") => "가상 피팅".to_string(),
        (Lang::En, "steps.processing") => "Fitting".to_string(),
        (Lang::Ko, "steps.result") => "결과 확인".to_string(),
        (Lang::En, "steps.result") => "Result".to_string(),

        // Upload areas
        (Lang::Ko, "upload.user.title") => "사진 업로드".to_string(),
        (Lang::En, "upload.user.title") => "Upload a photo".to_string(),
        (Lang::Ko, "upload.user.desc") => "전신이 나온 선명한 사진을 올려주세요".to_string(),
        (Lang::En, "upload.user.desc") => "A clear full-body photo works best".to_string(),
        (Lang::Ko, "upload.clothing.title") => "의상 업로드".to_string(),
        (Lang::En, "upload.clothing.title") => "Upload clothing".to_string(),
        (Lang::Ko, "upload.clothing.desc") => "입어볼 옷 이미지를 올려주세요".to_string(),
        (Lang::En, "upload.clothing.desc") => "The garment you want to try on".to_string(),
        (Lang::Ko, "upload.clear") => "다시 선택".to_string(),
        (Lang::En, "upload.clear") => "Choose another".to_string(),

        // Processing
        (Lang::Ko, "processing.title") => "가상 피팅 진행중".to_string(),
        (Lang::En, "processing.title") => "Fitting in progress".to_string(),
        (Lang::Ko, "processing.message") => "AI가 이미지를 합성하고 있습니다…".to_string(),
        (Lang::En, "processing.message") => "The AI is composing your image…".to_string(),

        // Result
        (Lang::Ko, "result.try_another") => "다른 옷 입어보기".to_string(),
        (Lang::En, "result.try_another") => "Try another clothing item".to_string(),
        (Lang::Ko, "result.start_over") => "처음부터 다시".to_string(),
        (Lang::En, "result.start_over") => "Start over".to_string(),

        // Toasts
        (Lang::Ko, "toast.details") => "상세:".to_string(),
        (Lang::En, "toast.details") => "Details:".to_string(),
        (Lang::Ko, "toast.missing_file_title") => "파일을 선택해 주세요".to_string(),
        (Lang::En, "toast.missing_file_title") => "Pick a file first".to_string(),
        (Lang::Ko, "toast.too_large_title") => "파일이 너무 큽니다 (최대 10MB)".to_string(),
        (Lang::En, "toast.too_large_title") => "File is too large (10MB max)".to_string(),
        (Lang::Ko, "toast.upload_failed_title") => "사진 업로드 실패".to_string(),
        (Lang::En, "toast.upload_failed_title") => "Photo upload failed".to_string(),
        (Lang::Ko, "toast.upload_pending_title") => "사진을 서버에 올리는 중입니다".to_string(),
        (Lang::En, "toast.upload_pending_title") => "Still uploading your photo".to_string(),
        (Lang::Ko, "toast.upload_pending_body") => "잠시 후 다시 시도해 주세요.".to_string(),
        (Lang::En, "toast.upload_pending_body") => "Give it a moment and try again.".to_string(),
        (Lang::Ko, "toast.fit_failed_title") => "가상 피팅 과정에서 오류가 발생했습니다".to_string(),
        (Lang::En, "toast.fit_failed_title") => "Something went wrong during fitting".to_string(),

        // Unknown key: make it visible instead of silently blank.
        (_, other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lang_codes_round_trip() {
        assert_eq!(Lang::from_code("ko"), Some(Lang::Ko));
        assert_eq!(Lang::from_code("KO-kr"), Some(Lang::Ko));
        assert_eq!(Lang::from_code("en-US"), Some(Lang::En));
        assert_eq!(Lang::from_code("fr"), None);
        assert_eq!(Lang::from_code(Lang::En.code()), Some(Lang::En));
    }

    #[test]
    fn every_step_key_exists_in_both_languages() {
        for key in ["steps.user", "steps.clothing", "steps.processing", "steps.result"] {
            assert_ne!(t(Lang::Ko, key), key, "missing ko translation for {key}");
            assert_ne!(t(Lang::En, key), key, "missing en translation for {key}");
        }
    }

    #[test]
    fn unknown_keys_echo_back() {
        assert_eq!(t(Lang::Ko, "nope.missing"), "nope.missing");
    }
}
