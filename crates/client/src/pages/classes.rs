use chrono::{DateTime, FixedOffset, Utc};
use tracing::info;

use iut_erp_core::{
    board::{classroom_board, filter_classrooms, ClassroomCategory, ClassroomStatus},
    errors::ErpResult,
    models::{classroom::Classroom, time_slot::TimeSlot},
};

use crate::client::ErpClient;

/// Live state of every classroom: which are in use and what comes next.
#[derive(Debug, Clone)]
pub struct ClassesPage {
    pub classrooms: Vec<Classroom>,
    pub time_slots: Vec<TimeSlot>,
    pub timezone: FixedOffset,
}

impl ClassesPage {
    pub async fn load(client: &ErpClient) -> ErpResult<Self> {
        let (classrooms, time_slots) =
            tokio::try_join!(client.classrooms().list(), client.time_slots().list())?;
        info!(
            "Loaded {} classrooms and {} time slots",
            classrooms.len(),
            time_slots.len()
        );

        Ok(Self {
            classrooms,
            time_slots,
            timezone: client.timezone(),
        })
    }

    pub async fn refresh(&mut self, client: &ErpClient) -> ErpResult<()> {
        *self = Self::load(client).await?;
        Ok(())
    }

    /// Cards for the classrooms matching the search box and category, as of
    /// `now` on the campus clock.
    pub fn board(
        &self,
        now: DateTime<Utc>,
        query: &str,
        category: ClassroomCategory,
    ) -> ErpResult<Vec<ClassroomStatus<'_>>> {
        let visible = filter_classrooms(&self.classrooms, query, category);
        classroom_board(
            visible,
            &self.time_slots,
            now.with_timezone(&self.timezone),
        )
    }
}
