use crate::domain::model::Confirmation;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Append-only storage for confirmations.
///
/// Implementations are interchangeable: local CSV/TSV files or a remote
/// spreadsheet service. Writes are naive appends; no locking is done because
/// volume is a single event's guest list.
#[async_trait]
pub trait ConfirmationStore: Send + Sync {
    async fn append(&self, confirmation: &Confirmation) -> Result<()>;

    async fn read_all(&self) -> Result<Vec<Confirmation>>;

    /// Short backend identifier used in logs.
    fn backend_name(&self) -> &'static str;
}
