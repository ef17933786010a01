use crate::domain::model::Confirmation;
use crate::domain::ports::ConfirmationStore;
use crate::utils::error::{Result, RsvpError};
use async_trait::async_trait;
use std::sync::Arc;

/// Ordered try-next chain over confirmation stores.
///
/// A write goes to the first store that accepts it and nowhere else; each
/// failure is logged and the next store is tried. Only failure of every
/// store reaches the caller. Reads come from the first store that holds any
/// records.
pub struct FallbackStore {
    stores: Vec<Arc<dyn ConfirmationStore>>,
}

impl FallbackStore {
    pub fn new(stores: Vec<Arc<dyn ConfirmationStore>>) -> Result<Self> {
        if stores.is_empty() {
            return Err(RsvpError::ConfigError {
                message: "Fallback chain needs at least one store".to_string(),
            });
        }
        Ok(Self { stores })
    }
}

#[async_trait]
impl ConfirmationStore for FallbackStore {
    async fn append(&self, confirmation: &Confirmation) -> Result<()> {
        let mut last_error = None;

        for (position, store) in self.stores.iter().enumerate() {
            match store.append(confirmation).await {
                Ok(()) => {
                    if position > 0 {
                        tracing::info!(
                            "Confirmation for '{}' stored via fallback backend '{}'",
                            confirmation.name,
                            store.backend_name()
                        );
                    }
                    return Ok(());
                }
                Err(e) => {
                    tracing::warn!(
                        "Backend '{}' rejected confirmation for '{}': {}",
                        store.backend_name(),
                        confirmation.name,
                        e
                    );
                    last_error = Some(e);
                }
            }
        }

        let last_error = last_error
            .map(|e| e.to_string())
            .unwrap_or_else(|| "no stores configured".to_string());
        tracing::error!("All confirmation backends failed: {}", last_error);
        Err(RsvpError::AllBackendsFailed { last_error })
    }

    async fn read_all(&self) -> Result<Vec<Confirmation>> {
        for store in &self.stores {
            match store.read_all().await {
                Ok(confirmations) if !confirmations.is_empty() => return Ok(confirmations),
                Ok(_) => continue,
                Err(e) => {
                    tracing::warn!(
                        "Backend '{}' failed to read confirmations: {}",
                        store.backend_name(),
                        e
                    );
                }
            }
        }
        Ok(Vec::new())
    }

    fn backend_name(&self) -> &'static str {
        "fallback-chain"
    }
}
