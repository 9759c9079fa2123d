//! This crate contains all shared UI for the workspace.

pub mod flow;

mod hero;
pub use hero::Hero;

mod stepper;
pub use stepper::Stepper;

mod upload_area;
pub use upload_area::UploadArea;

mod loading;
pub use loading::LoadingAnimation;

mod result_view;
pub use result_view::ResultView;

mod tryon;
pub use tryon::TryOnFlow;

mod theme;
pub use theme::FitRoomTheme;

mod toast;
pub use toast::{use_toasts, ToastProvider};

mod i18n;
pub use i18n::{set_lang, t, use_lang, I18nProvider, Lang};
