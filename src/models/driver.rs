use serde::{Deserialize, Serialize};

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct Driver {
    pub id: String,
    pub name: String,
    /// Número de badge impreso en la credencial del conductor
    pub badge_number: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub vehicle_plate: Option<String>,
    // Tienda habitual (puede ser reasignado día a día)
    #[serde(default)]
    pub home_store_id: Option<String>,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}
