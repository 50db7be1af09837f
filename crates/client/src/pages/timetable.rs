use chrono::{FixedOffset, NaiveDate};
use tracing::{info, warn};

use iut_erp_core::{
    errors::{ErpError, ErpResult},
    models::{
        classroom::Classroom,
        course::Course,
        teacher::Teacher,
        time_slot::{NewTimeSlot, TimeSlot, TimeSlotForm},
    },
    timetable::{events_in_view, slot_details, CalendarEvent, CalendarView, SlotDetails},
};

use crate::client::ErpClient;

/// The weekly/monthly calendar plus the lists its form picks from.
#[derive(Debug, Clone)]
pub struct TimetablePage {
    pub time_slots: Vec<TimeSlot>,
    pub courses: Vec<Course>,
    pub teachers: Vec<Teacher>,
    pub classrooms: Vec<Classroom>,
    pub timezone: FixedOffset,
}

impl TimetablePage {
    pub async fn load(client: &ErpClient) -> ErpResult<Self> {
        let (time_slots, courses, teachers, classrooms) = tokio::try_join!(
            client.time_slots().list(),
            client.courses().list(),
            client.teachers().list(),
            client.classrooms().list()
        )?;
        info!("Loaded timetable with {} time slots", time_slots.len());

        Ok(Self {
            time_slots,
            courses,
            teachers,
            classrooms,
            timezone: client.timezone(),
        })
    }

    pub async fn refresh(&mut self, client: &ErpClient) -> ErpResult<()> {
        self.time_slots = client.time_slots().list().await?;
        Ok(())
    }

    /// Events of the view around `anchor`. Slots that cannot be placed are
    /// logged and left off the calendar.
    pub fn events(&self, view: CalendarView, anchor: NaiveDate) -> Vec<CalendarEvent> {
        let projection = events_in_view(&self.time_slots, view, anchor, &self.timezone);
        for rejected in &projection.rejected {
            warn!("Time slot left off the calendar: {}", rejected);
        }
        projection.events
    }

    /// Popup content for a clicked event.
    pub fn details(&self, slot_id: i64) -> ErpResult<SlotDetails<'_>> {
        let slot = self
            .time_slots
            .iter()
            .find(|slot| slot.id == slot_id)
            .ok_or_else(|| ErpError::NotFound(format!("Time slot {} not found", slot_id)))?;

        slot_details(slot, &self.classrooms, &self.teachers, &self.timezone)
    }

    /// Submits the "add a course to the timetable" form. No overlap check is
    /// made; the new slot is shown after the full re-fetch.
    pub async fn create_slot(
        &mut self,
        client: &ErpClient,
        form: &TimeSlotForm,
    ) -> ErpResult<TimeSlot> {
        let new_slot = NewTimeSlot::from_form(form, &self.courses)?;
        let created = client.time_slots().create(&new_slot).await?;
        info!(
            "Time slot {} created in classroom {}",
            created.id, created.classroom_id
        );
        self.refresh(client).await?;
        Ok(created)
    }

    pub async fn delete_slot(&mut self, client: &ErpClient, id: i64) -> ErpResult<()> {
        client.time_slots().delete(id).await?;
        self.refresh(client).await
    }
}
