use serde::{Deserialize, Serialize};

/// Punto de venta donde se asignan conductores
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct Store {
    pub id: String,
    pub name: String,
    /// Código interno de la tienda (ej. "PAR-012")
    pub code: String,
    pub address: String,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}
