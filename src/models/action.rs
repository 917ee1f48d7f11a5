use serde::{Deserialize, Serialize};

use crate::models::{Driver, Incident, Note, Schedule, Store, User};

// ============================================================================
// ACCIONES PENDIENTES - Mutaciones aún no confirmadas por el backend
// ============================================================================

/// Mutación de negocio destinada al backend. Una variante por combinación
/// colección x operación: insert lleva la entidad completa, update la
/// entidad completa (reemplazo por id), delete solo el id.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Action {
    InsertUser { user: User },
    UpdateUser { user: User },
    DeleteUser { id: String },

    InsertStore { store: Store },
    UpdateStore { store: Store },
    DeleteStore { id: String },

    InsertDriver { driver: Driver },
    UpdateDriver { driver: Driver },
    DeleteDriver { id: String },

    InsertSchedule { schedule: Schedule },
    UpdateSchedule { schedule: Schedule },
    DeleteSchedule { id: String },
    /// Acción administrativa: vaciar TODA la colección de asignaciones
    /// en el backend. Destructiva, sin undo.
    ClearSchedules,

    InsertIncident { incident: Incident },
    UpdateIncident { incident: Incident },
    DeleteIncident { id: String },

    InsertNote { note: Note },
    UpdateNote { note: Note },
    DeleteNote { id: String },
}

impl Action {
    /// Etiqueta corta para logs (no se envía al backend)
    pub fn label(&self) -> &'static str {
        match self {
            Action::InsertUser { .. } => "insert_user",
            Action::UpdateUser { .. } => "update_user",
            Action::DeleteUser { .. } => "delete_user",
            Action::InsertStore { .. } => "insert_store",
            Action::UpdateStore { .. } => "update_store",
            Action::DeleteStore { .. } => "delete_store",
            Action::InsertDriver { .. } => "insert_driver",
            Action::UpdateDriver { .. } => "update_driver",
            Action::DeleteDriver { .. } => "delete_driver",
            Action::InsertSchedule { .. } => "insert_schedule",
            Action::UpdateSchedule { .. } => "update_schedule",
            Action::DeleteSchedule { .. } => "delete_schedule",
            Action::ClearSchedules => "clear_schedules",
            Action::InsertIncident { .. } => "insert_incident",
            Action::UpdateIncident { .. } => "update_incident",
            Action::DeleteIncident { .. } => "delete_incident",
            Action::InsertNote { .. } => "insert_note",
            Action::UpdateNote { .. } => "update_note",
            Action::DeleteNote { .. } => "delete_note",
        }
    }
}

/// Acción encolada a la espera de replay contra el backend
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PendingAction {
    /// Id local (contador monotónico del queue). Solo bookkeeping interno,
    /// nunca se envía al backend.
    pub id: u64,
    pub action: Action,
    /// Timestamp de encolado (epoch segundos). Solo diagnóstico: el orden
    /// de replay es posicional, no temporal.
    pub enqueued_at: i64,
}

/// Queue FIFO persistente de acciones pendientes
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ActionQueue {
    pub items: Vec<PendingAction>,
    /// Próximo id a asignar. Persiste junto al queue para que los ids
    /// no se repitan tras un reinicio.
    pub next_id: u64,
}

impl ActionQueue {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            next_id: 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Agrega una acción al final del queue con id fresco
    pub fn push(&mut self, action: Action, enqueued_at: i64) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.items.push(PendingAction {
            id,
            action,
            enqueued_at,
        });
        id
    }
}

impl Default for ActionQueue {
    fn default() -> Self {
        Self::new()
    }
}
