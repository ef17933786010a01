// Adapters layer: concrete storage backends behind the ConfirmationStore port.

pub mod fallback;
pub mod local_store;
pub mod sheets_store;

pub use fallback::FallbackStore;
pub use local_store::LocalFileStore;
pub use sheets_store::{SheetsConfig, SheetsStore};
