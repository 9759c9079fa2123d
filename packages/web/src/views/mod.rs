mod home;
pub use home::Home;

mod tryon;
pub use tryon::TryOn;
