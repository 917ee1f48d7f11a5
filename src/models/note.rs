use serde::{Deserialize, Serialize};

/// Nota operativa compartida entre dispatchers
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct Note {
    pub id: String,
    pub author_id: String,
    pub text: String,
    /// Timestamp de creación (epoch segundos)
    pub created_at: i64,
    #[serde(default)]
    pub pinned: bool,
}
