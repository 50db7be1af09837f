//! Projection of time slots onto the weekly/monthly calendar.
//!
//! The calendar widget only renders what it is given: no overlap detection,
//! no layout. This module turns slot records into calendar events, narrows
//! them to the visible range and resolves the names shown when an event is
//! clicked.
//!
//! A slot whose bounds cannot be read is left off the calendar and reported
//! next to the events; it never hides the rest of the timetable.

use chrono::{DateTime, Datelike, Duration, Months, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::Serialize;

use crate::errors::{ErpError, ErpResult};
use crate::models::{classroom::Classroom, teacher::Teacher, time_slot::TimeSlot};

/// First hour shown on the time grid.
pub const SLOT_MIN_HOUR: u32 = 8;
/// Hour the time grid ends at.
pub const SLOT_MAX_HOUR: u32 = 18;

const MISSING: &str = "N/A";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub background_color: Option<String>,
    pub border_color: Option<String>,
}

impl CalendarEvent {
    pub fn from_slot<Tz: TimeZone>(slot: &TimeSlot, zone: &Tz) -> ErpResult<Self> {
        let window = slot.window(zone)?;
        Ok(Self {
            id: slot.id.to_string(),
            title: slot.display_title().to_string(),
            start: window.start,
            end: window.end,
            background_color: slot.color.clone(),
            border_color: slot.color.clone(),
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CalendarView {
    #[default]
    Week,
    Month,
}

impl CalendarView {
    /// Half-open range `[from, to)` displayed around `anchor`, from local
    /// midnight to local midnight in `zone`. Weeks start on Monday.
    pub fn range<Tz: TimeZone>(
        &self,
        anchor: NaiveDate,
        zone: &Tz,
    ) -> (DateTime<Utc>, DateTime<Utc>) {
        let (first, last) = match self {
            CalendarView::Week => {
                let monday =
                    anchor - Duration::days(anchor.weekday().num_days_from_monday() as i64);
                (monday, monday + Duration::days(7))
            }
            CalendarView::Month => {
                let first = anchor - Duration::days(anchor.day0() as i64);
                let next = first
                    .checked_add_months(Months::new(1))
                    .unwrap_or(NaiveDate::MAX);
                (first, next)
            }
        };

        (midnight(first, zone), midnight(last, zone))
    }
}

fn midnight<Tz: TimeZone>(date: NaiveDate, zone: &Tz) -> DateTime<Utc> {
    let naive = date.and_time(NaiveTime::MIN);
    zone.from_local_datetime(&naive)
        .earliest()
        .map(|local| local.with_timezone(&Utc))
        .unwrap_or_else(|| naive.and_utc())
}

/// What the calendar shows for one view.
#[derive(Debug, Default)]
pub struct CalendarProjection {
    /// Events overlapping the view, ordered by start time.
    pub events: Vec<CalendarEvent>,
    /// One `InvalidTimeSlot` per slot that could not be placed.
    pub rejected: Vec<ErpError>,
}

/// Projects `slots` onto the view around `anchor`. Naive slot bounds and the
/// view's midnights are read in `zone`.
pub fn events_in_view<Tz: TimeZone>(
    slots: &[TimeSlot],
    view: CalendarView,
    anchor: NaiveDate,
    zone: &Tz,
) -> CalendarProjection {
    let (from, to) = view.range(anchor, zone);

    let mut projection = CalendarProjection::default();
    for slot in slots {
        match CalendarEvent::from_slot(slot, zone) {
            Ok(event) if event.start < to && event.end > from => projection.events.push(event),
            Ok(_) => {}
            Err(e) => projection.rejected.push(e),
        }
    }

    projection
        .events
        .sort_by(|a, b| a.start.cmp(&b.start).then_with(|| a.end.cmp(&b.end)));
    projection
}

/// What the event popup shows.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotDetails<'a> {
    pub title: &'a str,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub classroom: &'a str,
    pub teacher: &'a str,
}

pub fn slot_details<'a, Tz: TimeZone>(
    slot: &'a TimeSlot,
    classrooms: &'a [Classroom],
    teachers: &'a [Teacher],
    zone: &Tz,
) -> ErpResult<SlotDetails<'a>> {
    let window = slot.window(zone)?;

    let classroom = classrooms
        .iter()
        .find(|classroom| classroom.id == slot.classroom_id)
        .map(|classroom| classroom.name.as_str())
        .or(slot.classroom_name.as_deref())
        .unwrap_or(MISSING);

    let teacher = teachers
        .iter()
        .find(|teacher| teacher.id == slot.teacher_id)
        .map(|teacher| teacher.name.as_str())
        .or(slot.teacher_name.as_deref())
        .unwrap_or(MISSING);

    Ok(SlotDetails {
        title: slot.display_title(),
        start: window.start,
        end: window.end,
        classroom,
        teacher,
    })
}
