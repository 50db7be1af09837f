//! Per-classroom availability for the classes page.

use chrono::{DateTime, TimeZone};

use crate::errors::ErpResult;
use crate::models::{classroom::Classroom, time_slot::TimeSlot};
use crate::occupancy::occupancy;

/// Grouping offered by the classes page filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ClassroomCategory {
    #[default]
    All,
    A,
    B,
    C,
    D,
    Audio,
    Special,
}

impl ClassroomCategory {
    pub fn matches(&self, name: &str) -> bool {
        match self {
            ClassroomCategory::All => true,
            ClassroomCategory::A => name.starts_with('A'),
            ClassroomCategory::B => name.starts_with('B'),
            ClassroomCategory::C => name.starts_with('C'),
            ClassroomCategory::D => name.starts_with('D'),
            ClassroomCategory::Audio => name.contains("Audio"),
            ClassroomCategory::Special => name.contains("Labo") || name.contains("Amphi"),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ClassroomCategory::All => "Toutes les classes",
            ClassroomCategory::A => "Salles A (A1-A6)",
            ClassroomCategory::B => "Salles B (B1-B6)",
            ClassroomCategory::C => "Salles C (C1-C6)",
            ClassroomCategory::D => "Salles D (D1-D6)",
            ClassroomCategory::Audio => "Salles Audio",
            ClassroomCategory::Special => "Spéciales (Labo, Amphi)",
        }
    }
}

/// One card of the classroom board.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassroomStatus<'a> {
    pub classroom: &'a Classroom,
    pub current: Option<&'a TimeSlot>,
    pub next: Option<&'a TimeSlot>,
}

impl ClassroomStatus<'_> {
    pub fn is_occupied(&self) -> bool {
        self.current.is_some()
    }

    pub fn availability_label(&self) -> &'static str {
        if self.is_occupied() {
            "Occupée"
        } else {
            "Disponible"
        }
    }
}

/// Classrooms whose name contains `query` (case-insensitive) and fall in `category`.
pub fn filter_classrooms<'a>(
    classrooms: &'a [Classroom],
    query: &str,
    category: ClassroomCategory,
) -> Vec<&'a Classroom> {
    let query = query.to_lowercase();
    classrooms
        .iter()
        .filter(|classroom| classroom.name.to_lowercase().contains(&query))
        .filter(|classroom| category.matches(&classroom.name))
        .collect()
}

/// Status of every listed classroom at `at`, in the order given.
pub fn classroom_board<'a, I, Tz>(
    classrooms: I,
    slots: &'a [TimeSlot],
    at: DateTime<Tz>,
) -> ErpResult<Vec<ClassroomStatus<'a>>>
where
    I: IntoIterator<Item = &'a Classroom>,
    Tz: TimeZone,
{
    classrooms
        .into_iter()
        .map(|classroom| {
            let occupancy = occupancy(classroom.id, at.clone(), slots)?;
            Ok(ClassroomStatus {
                classroom,
                current: occupancy.current,
                next: occupancy.next,
            })
        })
        .collect()
}
