use chrono::{Duration, NaiveTime};

use crate::models::TimeWindow;

/// Why no slots could be computed at all. Distinct from an empty result,
/// which just means the day is fully booked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SlotError {
    #[error("Salon is closed on this day")]
    SalonClosed,

    #[error("Staff is not working on this day")]
    StaffNotWorking,
}

/// Computes the open booking slots for one staff member on one day.
///
/// Slots start at `shift.start` and step by `slot_length` while the slot
/// start is strictly before `shift.end`. The salon's operating window only
/// gates whether the salon is open at all; the walk itself follows the
/// staff shift. A slot that starts before closing but would end after it is
/// still offered, matching the long-standing booking behavior.
///
/// The result is ascending and free of duplicates by construction.
pub fn available_slots(
    operating: Option<&TimeWindow>,
    shift: Option<&TimeWindow>,
    booked: &[NaiveTime],
    slot_length: Duration,
) -> Result<Vec<NaiveTime>, SlotError> {
    if operating.is_none() {
        return Err(SlotError::SalonClosed);
    }
    let shift = shift.ok_or(SlotError::StaffNotWorking)?;

    let mut slots = Vec::new();
    let mut current = shift.start;
    while current < shift.end {
        if !booked.contains(&current) {
            slots.push(current);
        }
        let (next, wrapped) = current.overflowing_add_signed(slot_length);
        if wrapped != 0 {
            // stepped past midnight; nothing later can fall inside the shift
            break;
        }
        current = next;
    }
    Ok(slots)
}
