use chrono::{DateTime, TimeZone};
use serde::Serialize;

use crate::filters::EquipmentStatusCounts;
use crate::models::{
    classroom::Classroom, course::Course, equipment::Equipment, teacher::Teacher,
    time_slot::TimeSlot,
};
use crate::occupancy::is_occupied;

/// Counters of the dashboard's stat cards, derived from live collections.
///
/// A slot whose bounds cannot be read is counted nowhere and listed in
/// `rejected_slots`. A classroom with such a slot is not reported free.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub teachers: usize,
    pub classrooms: usize,
    pub classrooms_free: usize,
    pub equipment: usize,
    pub equipment_available: usize,
    pub courses: usize,
    pub slots_today: usize,
    pub rejected_slots: Vec<i64>,
}

/// Collections the dashboard is computed from.
#[derive(Debug, Clone, Copy)]
pub struct DashboardInputs<'a> {
    pub teachers: &'a [Teacher],
    pub classrooms: &'a [Classroom],
    pub equipment: &'a [Equipment],
    pub courses: &'a [Course],
    pub slots: &'a [TimeSlot],
}

impl DashboardStats {
    /// `now` is taken in the campus zone: it decides what "today" is and how
    /// naive slot bounds are read.
    pub fn compute<Tz: TimeZone>(now: DateTime<Tz>, inputs: DashboardInputs<'_>) -> Self {
        let zone = now.timezone();

        let classrooms_free = inputs
            .classrooms
            .iter()
            .filter(|classroom| {
                matches!(
                    is_occupied(classroom.id, now.clone(), inputs.slots),
                    Ok(false)
                )
            })
            .count();

        let today = now.date_naive();
        let mut slots_today = 0;
        let mut rejected_slots = Vec::new();
        for slot in inputs.slots {
            match slot.window(&zone) {
                Ok(window) => {
                    if window.start.with_timezone(&zone).date_naive() == today {
                        slots_today += 1;
                    }
                }
                Err(_) => rejected_slots.push(slot.id),
            }
        }

        Self {
            teachers: inputs.teachers.len(),
            classrooms: inputs.classrooms.len(),
            classrooms_free,
            equipment: inputs.equipment.len(),
            equipment_available: EquipmentStatusCounts::tally(inputs.equipment).available,
            courses: inputs.courses.len(),
            slots_today,
            rejected_slots,
        }
    }
}
