use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: i64,
    pub name: String,
    pub code: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub credits: u32,
    #[serde(default)]
    pub hours_per_week: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCourse {
    pub name: String,
    pub code: String,
    pub department: String,
    pub credits: u32,
    pub hours_per_week: u32,
}
