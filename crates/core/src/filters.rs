//! Search boxes and status filters of the list pages.
//!
//! All matching is a case-insensitive substring test; an empty query keeps
//! every record.

use crate::models::{
    course::Course,
    equipment::{Equipment, EquipmentStatus},
    teacher::Teacher,
};

fn matches_any(query: &str, fields: &[&str]) -> bool {
    fields
        .iter()
        .any(|field| field.to_lowercase().contains(query))
}

pub fn search_courses<'a>(courses: &'a [Course], query: &str) -> Vec<&'a Course> {
    let query = query.to_lowercase();
    courses
        .iter()
        .filter(|course| {
            matches_any(
                &query,
                &[
                    course.name.as_str(),
                    course.code.as_str(),
                    course.department.as_str(),
                ],
            )
        })
        .collect()
}

pub fn search_teachers<'a>(teachers: &'a [Teacher], query: &str) -> Vec<&'a Teacher> {
    let query = query.to_lowercase();
    teachers
        .iter()
        .filter(|teacher| {
            matches_any(
                &query,
                &[
                    teacher.name.as_str(),
                    teacher.email.as_str(),
                    teacher.department.as_str(),
                    teacher.specialization.as_str(),
                ],
            )
        })
        .collect()
}

/// Equipment matching the search box, restricted to `status` when one is selected.
pub fn filter_equipment<'a>(
    equipment: &'a [Equipment],
    query: &str,
    status: Option<EquipmentStatus>,
) -> Vec<&'a Equipment> {
    let query = query.to_lowercase();
    equipment
        .iter()
        .filter(|item| {
            matches_any(
                &query,
                &[
                    item.name.as_str(),
                    item.kind.as_str(),
                    item.serial_number.as_str(),
                ],
            )
        })
        .filter(|item| status.is_none_or(|status| item.status == status))
        .collect()
}

/// Counters shown on the equipment page's status cards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EquipmentStatusCounts {
    pub available: usize,
    pub in_use: usize,
    pub maintenance: usize,
    pub broken: usize,
}

impl EquipmentStatusCounts {
    pub fn tally(equipment: &[Equipment]) -> Self {
        equipment.iter().fold(Self::default(), |mut counts, item| {
            match item.status {
                EquipmentStatus::Available => counts.available += 1,
                EquipmentStatus::InUse => counts.in_use += 1,
                EquipmentStatus::Maintenance => counts.maintenance += 1,
                EquipmentStatus::Broken => counts.broken += 1,
            }
            counts
        })
    }

    pub fn get(&self, status: EquipmentStatus) -> usize {
        match status {
            EquipmentStatus::Available => self.available,
            EquipmentStatus::InUse => self.in_use,
            EquipmentStatus::Maintenance => self.maintenance,
            EquipmentStatus::Broken => self.broken,
        }
    }

    pub fn total(&self) -> usize {
        self.available + self.in_use + self.maintenance + self.broken
    }
}
