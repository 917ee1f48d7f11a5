use serde::{Deserialize, Serialize};

/// Estado de sincronización visible para el usuario. No expone detalle
/// por acción: solo el indicador ambiental offline/pendientes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum SyncStatus {
    /// Sin backlog, última sincronización confirmada
    Synced,
    /// Hay acciones en el queue esperando replay
    Pending { count: usize },
    /// Drain en curso
    Syncing,
    /// Sin conexión; las mutaciones se siguen aplicando en local
    Offline { pending: usize },
}

impl Default for SyncStatus {
    fn default() -> Self {
        SyncStatus::Synced
    }
}
