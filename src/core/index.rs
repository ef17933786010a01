use crate::core::normalize::normalize;
use crate::domain::model::{GuestGroup, IndexEntry};
use crate::utils::error::{Result, RsvpError};
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

/// Roster column holding the group name. Sparse: a value carries forward to
/// the rows below until the next named row.
pub const GROUP_COLUMN: &str = "Invitación dirigida a";
/// Roster column holding the per-row ticket ceiling.
pub const MAX_TICKETS_COLUMN: &str = "Max Boletos";

/// Immutable in-memory index over the guest roster.
///
/// Built once at startup and shared read-only across requests. Holds the
/// per-group attendee ceilings and the normalized entries the suggestion
/// matcher searches over.
#[derive(Debug, Clone)]
pub struct GuestIndex {
    ceilings: HashMap<String, u32>,
    entries: Vec<IndexEntry>,
    names: Vec<String>,
}

impl GuestIndex {
    pub fn from_groups(groups: Vec<GuestGroup>) -> Self {
        let mut ceilings: HashMap<String, u32> = HashMap::new();
        for group in groups {
            // Duplicate names keep the highest ceiling seen.
            let ceiling = ceilings.entry(group.name).or_insert(0);
            *ceiling = (*ceiling).max(group.max_tickets);
        }

        let mut names: Vec<String> = ceilings.keys().cloned().collect();
        names.sort();

        let entries = names
            .iter()
            .map(|name| IndexEntry {
                raw_name: name.clone(),
                normalized_name: normalize(name),
            })
            .collect();

        Self {
            ceilings,
            entries,
            names,
        }
    }

    /// Loads the roster from a tabular file, picking the delimiter from the
    /// extension (`.tsv` is tab-separated, anything else comma-separated).
    pub fn from_roster_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let delimiter = match path.extension().and_then(|ext| ext.to_str()) {
            Some("tsv") => b'\t',
            _ => b',',
        };
        let file = std::fs::File::open(path)?;
        Self::from_reader(file, delimiter)
    }

    /// Parses roster rows: fills the sparse group column down, coerces the
    /// ticket column to an integer (non-numeric becomes 0, never a startup
    /// failure) and keeps the per-group maximum.
    pub fn from_reader(reader: impl Read, delimiter: u8) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .flexible(true)
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        let group_column = column_position(&headers, GROUP_COLUMN)?;
        let tickets_column = column_position(&headers, MAX_TICKETS_COLUMN)?;

        let mut groups = Vec::new();
        let mut current_group: Option<String> = None;

        for record in csv_reader.records() {
            let record = record?;

            let raw_group = record.get(group_column).unwrap_or("").trim();
            if !raw_group.is_empty() {
                current_group = Some(raw_group.to_string());
            }

            // Rows above the first named group have nothing to attach to.
            let Some(group_name) = current_group.clone() else {
                continue;
            };

            let raw_tickets = record.get(tickets_column).unwrap_or("");
            groups.push(GuestGroup::new(group_name, coerce_tickets(raw_tickets)));
        }

        tracing::info!(
            "Guest index built: {} groups from roster",
            groups
                .iter()
                .map(|g| g.name.as_str())
                .collect::<std::collections::HashSet<_>>()
                .len()
        );

        Ok(Self::from_groups(groups))
    }

    /// Ceiling for a group name; unknown groups get 0.
    pub fn ceiling(&self, name: &str) -> u32 {
        self.ceilings.get(name).copied().unwrap_or(0)
    }

    pub fn entries(&self) -> &[IndexEntry] {
        &self.entries
    }

    /// Group names sorted ascending, for display.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The name → ceiling map as JSON, for embedding in the home page.
    pub fn limits_json(&self) -> Result<String> {
        let ordered: std::collections::BTreeMap<&str, u32> = self
            .ceilings
            .iter()
            .map(|(name, ceiling)| (name.as_str(), *ceiling))
            .collect();
        Ok(serde_json::to_string(&ordered)?)
    }
}

fn column_position(headers: &csv::StringRecord, name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|header| header.trim_start_matches('\u{feff}').trim() == name)
        .ok_or_else(|| RsvpError::RosterError {
            message: format!("Missing roster column: {}", name),
        })
}

// Mirrors a lenient numeric coercion: plain integers, float-formatted
// integers ("4.0") and anything else collapses to 0.
fn coerce_tickets(raw: &str) -> u32 {
    let trimmed = raw.trim();
    if let Ok(value) = trimmed.parse::<u32>() {
        return value;
    }
    if let Ok(value) = trimmed.parse::<f64>() {
        if value.is_finite() && value > 0.0 {
            return value.trunc() as u32;
        }
    }
    0
}
