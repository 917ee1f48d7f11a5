use serde::{Deserialize, Serialize};

// ============================================================================
// SCHEDULE - Asignación diaria conductor <-> tienda
// ============================================================================

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct Schedule {
    pub id: String,
    /// Fecha de la asignación en formato ISO (YYYY-MM-DD)
    pub date: String,
    pub driver_id: String,
    pub store_id: String,
    /// Turno asignado ("AM" | "PM" | "FULL")
    pub shift: String,
    #[serde(default)]
    pub role: Option<String>,
    /// Asistencia confirmada por el dispatcher
    #[serde(default)]
    pub attended: Option<bool>,
}
