pub mod load;
pub mod save;
pub mod types;

pub use types::{
    Config, DEFAULT_MAX_FILENAME_LENGTH, Language, LogLevel, MAX_RECENT_PATHS, UserSettings,
};
