use chrono::Local;
use serde::{Deserialize, Serialize};

/// Timestamp format used for `confirmed_at`, matching the stored column format.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A named unit of invitation (often a family) sharing one attendee ceiling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestGroup {
    pub name: String,
    pub max_tickets: u32,
}

impl GuestGroup {
    pub fn new(name: impl Into<String>, max_tickets: u32) -> Self {
        Self {
            name: name.into(),
            max_tickets,
        }
    }
}

/// Searchable index entry derived deterministically from a group name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    pub raw_name: String,
    pub normalized_name: String,
}

/// A persisted RSVP record. Append-only, never mutated or deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Confirmation {
    pub name: String,
    pub attendee_count: u32,
    pub confirmed_at: String,
}

impl Confirmation {
    /// Stamps the record with the local wall-clock time.
    pub fn new(name: impl Into<String>, attendee_count: u32) -> Self {
        Self {
            name: name.into(),
            attendee_count,
            confirmed_at: Local::now().format(TIMESTAMP_FORMAT).to_string(),
        }
    }

    pub fn with_timestamp(
        name: impl Into<String>,
        attendee_count: u32,
        confirmed_at: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            attendee_count,
            confirmed_at: confirmed_at.into(),
        }
    }
}

/// A ranked match returned by the suggestion endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub nombre: String,
    pub max_boletos: u32,
}

/// Aggregates shown on the admin report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReportSummary {
    pub total_confirmations: usize,
    pub total_attendees: u64,
}

impl ReportSummary {
    pub fn from_confirmations(confirmations: &[Confirmation]) -> Self {
        Self {
            total_confirmations: confirmations.len(),
            total_attendees: confirmations
                .iter()
                .map(|c| u64::from(c.attendee_count))
                .sum(),
        }
    }
}
