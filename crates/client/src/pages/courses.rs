use tracing::{info, warn};

use iut_erp_core::{
    errors::{ErpError, ErpResult},
    filters::search_courses,
    models::course::{Course, NewCourse},
};

use crate::client::ErpClient;

#[derive(Debug, Clone, Default)]
pub struct CoursesPage {
    pub courses: Vec<Course>,
}

impl CoursesPage {
    pub async fn load(client: &ErpClient) -> ErpResult<Self> {
        let courses = client.courses().list().await?;
        info!("Loaded {} courses", courses.len());
        Ok(Self { courses })
    }

    pub async fn refresh(&mut self, client: &ErpClient) -> ErpResult<()> {
        self.courses = client.courses().list().await?;
        Ok(())
    }

    pub fn search(&self, query: &str) -> Vec<&Course> {
        search_courses(&self.courses, query)
    }

    pub async fn create(&mut self, client: &ErpClient, course: &NewCourse) -> ErpResult<Course> {
        let created = client.courses().create(course).await?;
        info!("Course {} created, refreshing list", created.code);
        self.refresh(client).await?;
        Ok(created)
    }

    /// Deletes a course. The backend refuses while time slots still reference
    /// it, which surfaces as [`ErpError::CourseHasTimeSlots`].
    pub async fn delete(&mut self, client: &ErpClient, id: i64) -> ErpResult<()> {
        match client.courses().delete(id).await {
            Ok(()) => self.refresh(client).await,
            Err(ErpError::CourseHasTimeSlots(message)) => {
                warn!(
                    "Course {} still has time slots, remove them from the timetable first",
                    id
                );
                Err(ErpError::CourseHasTimeSlots(message))
            }
            Err(e) => Err(e),
        }
    }
}
