use crate::core::index::GuestIndex;
use crate::utils::error::{Result, RsvpError};

/// Validates a requested attendee count against the group's ceiling.
///
/// Unknown groups have ceiling 0, so any positive request for them is
/// rejected. The rejection carries the actual ceiling for the caller to show.
pub fn check(index: &GuestIndex, group: &str, requested: u32) -> Result<()> {
    let ceiling = index.ceiling(group);
    if requested > ceiling {
        return Err(RsvpError::QuotaExceeded {
            group: group.to_string(),
            ceiling,
            requested,
        });
    }
    Ok(())
}
