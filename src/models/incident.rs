use serde::{Deserialize, Serialize};

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct Incident {
    pub id: String,
    /// Fecha del incidente en formato ISO (YYYY-MM-DD)
    pub date: String,
    pub driver_id: String,
    #[serde(default)]
    pub store_id: Option<String>,
    pub description: String,
    /// Severidad ("low" | "medium" | "high")
    pub severity: String,
    #[serde(default)]
    pub resolved: bool,
}
