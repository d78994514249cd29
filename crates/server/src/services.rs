mod cache;
mod settings;

pub use cache::ResponseCache;
pub use settings::{SettingsError, SettingsService};
