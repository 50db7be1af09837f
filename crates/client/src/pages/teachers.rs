use tracing::info;

use iut_erp_core::{
    errors::ErpResult,
    filters::search_teachers,
    models::{
        teacher::{NewTeacher, Teacher},
        user::Role,
    },
};

use crate::client::ErpClient;
use crate::session::{Session, SessionStore};

#[derive(Debug, Clone, Default)]
pub struct TeachersPage {
    pub teachers: Vec<Teacher>,
}

impl TeachersPage {
    pub async fn load(client: &ErpClient) -> ErpResult<Self> {
        let teachers = client.teachers().list().await?;
        info!("Loaded {} teachers", teachers.len());
        Ok(Self { teachers })
    }

    pub async fn refresh(&mut self, client: &ErpClient) -> ErpResult<()> {
        self.teachers = client.teachers().list().await?;
        Ok(())
    }

    pub fn search(&self, query: &str) -> Vec<&Teacher> {
        search_teachers(&self.teachers, query)
    }

    /// Adds a teacher. Only administrators may do so.
    pub async fn add<S: SessionStore>(
        &mut self,
        client: &ErpClient,
        session: &Session<S>,
        teacher: &NewTeacher,
    ) -> ErpResult<Teacher> {
        session.require_role(Role::Admin)?;

        let created = client.teachers().create(teacher).await?;
        info!("Teacher {} added", created.name);
        self.refresh(client).await?;
        Ok(created)
    }
}
