use chrono::{DateTime, Utc};
use tracing::{info, warn};

use iut_erp_core::{
    catalog::{available_modules, Module},
    dashboard::{DashboardInputs, DashboardStats},
    errors::ErpResult,
};

use crate::client::ErpClient;

#[derive(Debug, Clone)]
pub struct DashboardPage {
    pub stats: DashboardStats,
    pub modules: Vec<&'static Module>,
}

impl DashboardPage {
    pub async fn load(client: &ErpClient, now: DateTime<Utc>) -> ErpResult<Self> {
        let (teachers, classrooms, equipment, courses, slots) = tokio::try_join!(
            client.teachers().list(),
            client.classrooms().list(),
            client.equipment().list(),
            client.courses().list(),
            client.time_slots().list()
        )?;

        let stats = DashboardStats::compute(
            now.with_timezone(&client.timezone()),
            DashboardInputs {
                teachers: &teachers,
                classrooms: &classrooms,
                equipment: &equipment,
                courses: &courses,
                slots: &slots,
            },
        );
        if !stats.rejected_slots.is_empty() {
            warn!(
                "Dashboard ignored unreadable time slots {:?}",
                stats.rejected_slots
            );
        }
        info!(
            "Dashboard: {}/{} classrooms free, {} slots today",
            stats.classrooms_free, stats.classrooms, stats.slots_today
        );

        Ok(Self {
            stats,
            modules: available_modules().collect(),
        })
    }
}
