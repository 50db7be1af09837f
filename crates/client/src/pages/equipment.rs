use chrono::{DateTime, Utc};
use tracing::info;

use iut_erp_core::{
    errors::{ErpError, ErpResult},
    filters::{filter_equipment, EquipmentStatusCounts},
    models::equipment::{qr_code_url, Equipment, EquipmentStatus, NewEquipment},
};

use crate::client::ErpClient;

const QR_SIZE: u32 = 200;

/// Inventory screen with its status cards acting as a toggleable filter.
#[derive(Debug, Clone, Default)]
pub struct EquipmentPage {
    pub equipment: Vec<Equipment>,
    pub status_filter: Option<EquipmentStatus>,
}

/// Printable QR label for one item.
#[derive(Debug, Clone, PartialEq)]
pub struct EquipmentLabel {
    pub image_url: String,
    pub file_name: String,
}

impl EquipmentPage {
    pub async fn load(client: &ErpClient) -> ErpResult<Self> {
        let equipment = client.equipment().list().await?;
        info!("Loaded {} equipment items", equipment.len());
        Ok(Self {
            equipment,
            status_filter: None,
        })
    }

    /// Loads only the items the backend reports in `status`.
    pub async fn load_status(client: &ErpClient, status: EquipmentStatus) -> ErpResult<Self> {
        let equipment = client.equipment_by_status(status).await?;
        Ok(Self {
            equipment,
            status_filter: Some(status),
        })
    }

    pub async fn refresh(&mut self, client: &ErpClient) -> ErpResult<()> {
        self.equipment = client.equipment().list().await?;
        Ok(())
    }

    /// Clicking a status card selects it; clicking it again clears the filter.
    pub fn toggle_status(&mut self, status: EquipmentStatus) {
        self.status_filter = match self.status_filter {
            Some(current) if current == status => None,
            _ => Some(status),
        };
    }

    pub fn visible(&self, query: &str) -> Vec<&Equipment> {
        filter_equipment(&self.equipment, query, self.status_filter)
    }

    pub fn counts(&self) -> EquipmentStatusCounts {
        EquipmentStatusCounts::tally(&self.equipment)
    }

    pub async fn create(
        &mut self,
        client: &ErpClient,
        equipment: &NewEquipment,
    ) -> ErpResult<Equipment> {
        let created = client.equipment().create(equipment).await?;
        info!("Equipment {} created", created.serial_number);
        self.refresh(client).await?;
        Ok(created)
    }

    pub async fn delete(&mut self, client: &ErpClient, id: i64) -> ErpResult<()> {
        client.equipment().delete(id).await?;
        self.refresh(client).await
    }

    pub fn label(&self, id: i64, at: DateTime<Utc>) -> ErpResult<EquipmentLabel> {
        let item = self
            .equipment
            .iter()
            .find(|item| item.id == id)
            .ok_or_else(|| ErpError::NotFound(format!("Equipment {} not found", id)))?;

        Ok(EquipmentLabel {
            image_url: qr_code_url(&item.qr_payload(at)?, QR_SIZE),
            file_name: item.qr_file_name(),
        })
    }
}
