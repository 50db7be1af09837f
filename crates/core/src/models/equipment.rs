use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{ErpError, ErpResult};

const QR_SERVICE_URL: &str = "https://api.qrserver.com/v1/create-qr-code/";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EquipmentStatus {
    Available,
    InUse,
    Maintenance,
    Broken,
}

impl EquipmentStatus {
    pub const ALL: [EquipmentStatus; 4] = [
        EquipmentStatus::Available,
        EquipmentStatus::InUse,
        EquipmentStatus::Maintenance,
        EquipmentStatus::Broken,
    ];

    /// Identifier used on the wire and in `/equipment/status/{status}`.
    pub fn as_str(&self) -> &'static str {
        match self {
            EquipmentStatus::Available => "available",
            EquipmentStatus::InUse => "in-use",
            EquipmentStatus::Maintenance => "maintenance",
            EquipmentStatus::Broken => "broken",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EquipmentStatus::Available => "Disponible",
            EquipmentStatus::InUse => "En utilisation",
            EquipmentStatus::Maintenance => "En maintenance",
            EquipmentStatus::Broken => "Hors service",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Equipment {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub serial_number: String,
    #[serde(default)]
    pub purchase_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_maintenance: Option<String>,
    pub status: EquipmentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<i64>,
    #[serde(default)]
    pub location: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEquipment {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub serial_number: String,
    pub purchase_date: String,
    pub last_maintenance: Option<String>,
    pub status: EquipmentStatus,
    pub assigned_to: Option<i64>,
    pub location: String,
}

impl NewEquipment {
    /// A blank inventory entry in the `available` state.
    pub fn new(
        name: impl Into<String>,
        kind: impl Into<String>,
        serial_number: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            serial_number: serial_number.into(),
            purchase_date: String::new(),
            last_maintenance: None,
            status: EquipmentStatus::Available,
            assigned_to: None,
            location: location.into(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct QrPayload<'a> {
    id: i64,
    name: &'a str,
    serial_number: &'a str,
    #[serde(rename = "type")]
    kind: &'a str,
    timestamp: String,
}

impl Equipment {
    /// JSON encoded into the inventory label's QR code.
    pub fn qr_payload(&self, at: DateTime<Utc>) -> ErpResult<String> {
        let payload = QrPayload {
            id: self.id,
            name: &self.name,
            serial_number: &self.serial_number,
            kind: &self.kind,
            timestamp: at.to_rfc3339(),
        };

        serde_json::to_string(&payload).map_err(|e| ErpError::Internal(Box::new(e)))
    }

    pub fn qr_file_name(&self) -> String {
        format!("equipment-{}.png", self.serial_number)
    }
}

/// Image URL rendering `payload` as a `size`×`size` QR code.
pub fn qr_code_url(payload: &str, size: u32) -> String {
    format!(
        "{}?size={}x{}&data={}",
        QR_SERVICE_URL,
        size,
        size,
        urlencoding::encode(payload)
    )
}
