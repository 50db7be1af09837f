use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Classroom {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub capacity: u32,
    #[serde(default)]
    pub building: String,
    #[serde(default)]
    pub floor: i32,
    #[serde(default)]
    pub has_projector: bool,
    #[serde(default)]
    pub has_computers: bool,
    #[serde(default)]
    pub is_lab: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewClassroom {
    pub name: String,
    pub capacity: u32,
    pub building: String,
    pub floor: i32,
    pub has_projector: bool,
    pub has_computers: bool,
    pub is_lab: bool,
}
