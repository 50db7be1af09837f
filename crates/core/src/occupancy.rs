//! # Classroom occupancy
//!
//! Answers "is this room in use right now, and what comes next?" from the flat
//! list of time slots the backend returns. The backend does no conflict
//! detection, so several slots of one room may overlap; any one of them makes
//! the room occupied.
//!
//! ## Rules
//!
//! - A slot covers its classroom from `start_time` to `end_time`, both ends
//!   inclusive.
//! - The current slot is the first covering slot in iteration order.
//! - The next slot is the one with the earliest `start_time` strictly after the
//!   instant. On equal start times the first one encountered wins.
//! - Bounds written without an offset are wall-clock times in the zone of the
//!   queried instant, so pass `at` in the campus time zone.
//! - Every slot of the queried classroom is parsed. A malformed one fails the
//!   query with [`ErpError::InvalidTimeSlot`](crate::errors::ErpError), even
//!   when another slot already answered it. Slots of other classrooms are
//!   never inspected.
//!
//! The queries hold no state and cache nothing; callers re-run them on every
//! refresh.

use chrono::{DateTime, TimeZone, Utc};

use crate::errors::ErpResult;
use crate::models::time_slot::{TimeSlot, TimeWindow};

/// What a classroom is doing at a given instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Occupancy<'a> {
    pub current: Option<&'a TimeSlot>,
    pub next: Option<&'a TimeSlot>,
}

impl Occupancy<'_> {
    pub fn is_occupied(&self) -> bool {
        self.current.is_some()
    }
}

/// Computes the current and next slot of `classroom_id` in a single pass.
pub fn occupancy<'a, Tz: TimeZone>(
    classroom_id: i64,
    at: DateTime<Tz>,
    slots: &'a [TimeSlot],
) -> ErpResult<Occupancy<'a>> {
    let zone = at.timezone();
    let at = at.with_timezone(&Utc);
    let mut current: Option<&TimeSlot> = None;
    let mut next: Option<(&TimeSlot, TimeWindow)> = None;

    for slot in slots.iter().filter(|slot| slot.classroom_id == classroom_id) {
        let window = slot.window(&zone)?;

        if current.is_none() && window.contains(at) {
            current = Some(slot);
        }

        if window.starts_after(at) && next.map_or(true, |(_, best)| window.start < best.start) {
            next = Some((slot, window));
        }
    }

    Ok(Occupancy {
        current,
        next: next.map(|(slot, _)| slot),
    })
}

pub fn is_occupied<Tz: TimeZone>(
    classroom_id: i64,
    at: DateTime<Tz>,
    slots: &[TimeSlot],
) -> ErpResult<bool> {
    Ok(occupancy(classroom_id, at, slots)?.is_occupied())
}

pub fn current_slot<Tz: TimeZone>(
    classroom_id: i64,
    at: DateTime<Tz>,
    slots: &[TimeSlot],
) -> ErpResult<Option<&TimeSlot>> {
    Ok(occupancy(classroom_id, at, slots)?.current)
}

pub fn next_slot<Tz: TimeZone>(
    classroom_id: i64,
    at: DateTime<Tz>,
    slots: &[TimeSlot],
) -> ErpResult<Option<&TimeSlot>> {
    Ok(occupancy(classroom_id, at, slots)?.next)
}
