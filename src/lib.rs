pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;
pub mod web;

pub use adapters::{FallbackStore, LocalFileStore, SheetsConfig, SheetsStore};
pub use config::AppConfig;
pub use core::index::GuestIndex;
pub use domain::model::{Confirmation, GuestGroup, ReportSummary, Suggestion};
pub use domain::ports::ConfirmationStore;
pub use utils::error::{Result, RsvpError};
pub use web::{router, AppState};
