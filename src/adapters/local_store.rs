use crate::domain::model::Confirmation;
use crate::domain::ports::ConfirmationStore;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

/// Stored column headers, matching the spreadsheet layout.
pub const CONFIRMATION_HEADERS: [&str; 3] = ["Nombre", "Asistentes", "Fecha Confirmación"];

/// Confirmation store backed by a local delimited file.
///
/// The header row is written on first append. Files are opened per operation;
/// request volume is a single event's guest list, so no handle is kept open.
#[derive(Debug, Clone)]
pub struct LocalFileStore {
    path: PathBuf,
    delimiter: u8,
    backend_name: &'static str,
}

impl LocalFileStore {
    /// Comma-separated store (`confirmaciones.csv`).
    pub fn csv(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            delimiter: b',',
            backend_name: "local-csv",
        }
    }

    /// Tab-separated store, for setups that prefer a plain tabular file.
    pub fn tsv(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            delimiter: b'\t',
            backend_name: "local-tsv",
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn needs_header(&self) -> bool {
        match std::fs::metadata(&self.path) {
            Ok(metadata) => metadata.len() == 0,
            Err(_) => true,
        }
    }
}

#[async_trait]
impl ConfirmationStore for LocalFileStore {
    async fn append(&self, confirmation: &Confirmation) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let write_header = self.needs_header();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        let mut writer = csv::WriterBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(false)
            .from_writer(file);

        if write_header {
            writer.write_record(CONFIRMATION_HEADERS)?;
        }
        writer.write_record([
            confirmation.name.as_str(),
            &confirmation.attendee_count.to_string(),
            confirmation.confirmed_at.as_str(),
        ])?;
        writer.flush()?;

        tracing::debug!(
            "Appended confirmation for '{}' to {}",
            confirmation.name,
            self.path.display()
        );
        Ok(())
    }

    async fn read_all(&self) -> Result<Vec<Confirmation>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let file = std::fs::File::open(&self.path)?;
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .flexible(true)
            .from_reader(file);

        let mut confirmations = Vec::new();
        for record in reader.records() {
            let record = record?;
            if record.len() < 3 {
                tracing::warn!("Skipping malformed confirmation row: {:?}", record);
                continue;
            }
            confirmations.push(Confirmation {
                name: record[0].to_string(),
                attendee_count: record[1].trim().parse().unwrap_or(0),
                confirmed_at: record[2].to_string(),
            });
        }
        Ok(confirmations)
    }

    fn backend_name(&self) -> &'static str {
        self.backend_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_append_then_read_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let store = LocalFileStore::csv(temp_dir.path().join("confirmaciones.csv"));

        let confirmation =
            Confirmation::with_timestamp("Familia Pérez", 3, "2025-11-01 12:30:00");
        store.append(&confirmation).await.unwrap();

        let all = store.read_all().await.unwrap();
        assert_eq!(all, vec![confirmation]);
    }

    #[tokio::test]
    async fn test_header_written_once() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("confirmaciones.csv");
        let store = LocalFileStore::csv(path.clone());

        store
            .append(&Confirmation::with_timestamp("A", 1, "2025-11-01 10:00:00"))
            .await
            .unwrap();
        store
            .append(&Confirmation::with_timestamp("B", 2, "2025-11-01 11:00:00"))
            .await
            .unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let header_count = content
            .lines()
            .filter(|line| line.starts_with("Nombre"))
            .count();
        assert_eq!(header_count, 1);
        assert_eq!(content.lines().count(), 3);
    }

    #[tokio::test]
    async fn test_read_missing_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let store = LocalFileStore::csv(temp_dir.path().join("nope.csv"));
        assert!(store.read_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_names_with_commas_and_accents_survive() {
        let temp_dir = TempDir::new().unwrap();
        let store = LocalFileStore::csv(temp_dir.path().join("confirmaciones.csv"));

        let confirmation =
            Confirmation::with_timestamp("Pérez, Juan y familia", 2, "2025-11-01 12:00:00");
        store.append(&confirmation).await.unwrap();

        let all = store.read_all().await.unwrap();
        assert_eq!(all[0].name, "Pérez, Juan y familia");
        assert_eq!(all[0].attendee_count, 2);
    }

    #[tokio::test]
    async fn test_tsv_store_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let store = LocalFileStore::tsv(temp_dir.path().join("confirmaciones.tsv"));

        store
            .append(&Confirmation::with_timestamp("Familia Gómez", 2, "2025-11-01 09:00:00"))
            .await
            .unwrap();

        let content =
            std::fs::read_to_string(temp_dir.path().join("confirmaciones.tsv")).unwrap();
        assert!(content.contains("Familia Gómez\t2\t"));

        let all = store.read_all().await.unwrap();
        assert_eq!(all.len(), 1);
    }

    #[tokio::test]
    async fn test_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let store = LocalFileStore::csv(temp_dir.path().join("nested/dir/confirmaciones.csv"));

        store
            .append(&Confirmation::with_timestamp("A", 1, "2025-11-01 10:00:00"))
            .await
            .unwrap();
        assert_eq!(store.read_all().await.unwrap().len(), 1);
    }
}
