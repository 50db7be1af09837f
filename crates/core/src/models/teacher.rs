use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Teacher {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub specialization: String,
    #[serde(default)]
    pub available_days: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTeacher {
    pub name: String,
    pub email: String,
    pub department: String,
    pub specialization: String,
    pub available_days: Vec<String>,
}

/// Splits the comma-separated "available days" field of the teacher form.
pub fn parse_available_days(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|day| !day.is_empty())
        .map(str::to_string)
        .collect()
}
