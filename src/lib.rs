pub mod app;
pub mod commands;
pub mod config;
pub mod errors;
pub mod generation;
pub mod model;
pub mod navigation;
pub mod session;
pub mod store;
pub mod ui;

// Internal modules
pub mod actions;
pub mod event;

// Re-export commonly used types
pub use app::{AppMode, AppState};
pub use config::AppConfig;
pub use errors::{AppError, AppResult};
pub use model::{EntityPath, Group, RootConfig, TeleportPoint};
