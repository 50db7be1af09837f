use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{ErpError, ErpResult};
use crate::models::course::Course;

/// Color the timetable form preselects for a new slot.
pub const DEFAULT_SLOT_COLOR: &str = "#0ea5e9";

// Naive timestamps carry no offset; they are wall-clock times of the caller's zone.
const NAIVE_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
];

/// A scheduled occurrence of a course in a classroom, as returned by `/timeslots`.
///
/// `start_time` and `end_time` are kept exactly as the backend sent them and
/// parsed on use through [`TimeSlot::window`], so a malformed record fails the
/// query that reads it instead of failing the whole collection fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub start_time: String,
    #[serde(default)]
    pub end_time: String,
    pub classroom_id: i64,
    pub teacher_id: i64,
    pub course_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub teacher_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classroom_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// Parsed bounds of a time slot. Both ends are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start <= at && at <= self.end
    }

    pub fn starts_after(&self, at: DateTime<Utc>) -> bool {
        self.start > at
    }
}

impl TimeSlot {
    /// Parses the slot's bounds, enforcing `start_time < end_time`.
    ///
    /// Bounds without an offset (the form writes `YYYY-MM-DDTHH:MM`) are local
    /// times of `zone`.
    pub fn window<Tz: TimeZone>(&self, zone: &Tz) -> ErpResult<TimeWindow> {
        let start = self.parse_bound("start_time", &self.start_time, zone)?;
        let end = self.parse_bound("end_time", &self.end_time, zone)?;

        if start >= end {
            return Err(ErpError::invalid_slot(
                self.id,
                format!(
                    "start_time {} is not before end_time {}",
                    self.start_time, self.end_time
                ),
            ));
        }

        Ok(TimeWindow { start, end })
    }

    fn parse_bound<Tz: TimeZone>(
        &self,
        field: &str,
        raw: &str,
        zone: &Tz,
    ) -> ErpResult<DateTime<Utc>> {
        if raw.trim().is_empty() {
            return Err(ErpError::invalid_slot(self.id, format!("missing {}", field)));
        }

        parse_timestamp(raw, zone).ok_or_else(|| {
            ErpError::invalid_slot(self.id, format!("unparsable {} '{}'", field, raw))
        })
    }

    /// Name shown on the calendar: the course name when the backend joined
    /// it in, the slot title otherwise.
    pub fn display_title(&self) -> &str {
        match &self.course_name {
            Some(name) if !name.is_empty() => name,
            _ => &self.title,
        }
    }
}

/// Parses a timestamp in any of the forms the backend emits. Naive forms are
/// read as wall-clock time in `zone`; in a DST gap there is no such instant.
pub fn parse_timestamp<Tz: TimeZone>(raw: &str, zone: &Tz) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .and_then(|naive| zone.from_local_datetime(&naive).earliest())
        .map(|local| local.with_timezone(&Utc))
}

/// Raw field values of the "add a course to the timetable" form.
#[derive(Debug, Clone, Default)]
pub struct TimeSlotForm {
    /// `YYYY-MM-DD`
    pub date: String,
    /// `HH:MM`
    pub start_time: String,
    /// `HH:MM`
    pub end_time: String,
    pub course_id: i64,
    pub teacher_id: i64,
    pub classroom_id: i64,
    pub color: Option<String>,
}

/// Payload posted to `/timeslots`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTimeSlot {
    pub title: String,
    pub start_time: String,
    pub end_time: String,
    pub course_id: i64,
    pub teacher_id: i64,
    pub classroom_id: i64,
    pub color: String,
}

impl NewTimeSlot {
    /// Builds the create payload from the form, titling the slot after the
    /// selected course.
    pub fn from_form(form: &TimeSlotForm, courses: &[Course]) -> ErpResult<Self> {
        let date = NaiveDate::parse_from_str(form.date.trim(), "%Y-%m-%d")
            .map_err(|_| ErpError::Validation(format!("Invalid date '{}'", form.date)))?;
        let start = parse_clock(&form.start_time)?;
        let end = parse_clock(&form.end_time)?;

        if start >= end {
            return Err(ErpError::Validation(
                "Start time must be before end time".to_string(),
            ));
        }

        let title = courses
            .iter()
            .find(|course| course.id == form.course_id)
            .map(|course| course.name.clone())
            .unwrap_or_default();

        let color = form
            .color
            .as_deref()
            .map(str::trim)
            .filter(|color| !color.is_empty())
            .unwrap_or(DEFAULT_SLOT_COLOR)
            .to_string();

        Ok(Self {
            title,
            start_time: format!("{}T{}", date.format("%Y-%m-%d"), start.format("%H:%M")),
            end_time: format!("{}T{}", date.format("%Y-%m-%d"), end.format("%H:%M")),
            course_id: form.course_id,
            teacher_id: form.teacher_id,
            classroom_id: form.classroom_id,
            color,
        })
    }
}

fn parse_clock(raw: &str) -> ErpResult<NaiveTime> {
    let raw = raw.trim();
    NaiveTime::parse_from_str(raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .map_err(|_| ErpError::Validation(format!("Invalid time '{}'", raw)))
}
