// ============================================================================
// SYNC STATE - Indicador ambiental de sincronización
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use crate::models::SyncStatus;

/// Handle compartido del estado de sincronización que lee la capa de
/// presentación. El core lo mantiene al día; la UI nunca ve errores por
/// acción, solo este indicador.
#[derive(Clone)]
pub struct SyncStateHandle {
    status: Rc<RefCell<SyncStatus>>,
    last_sync: Rc<RefCell<Option<i64>>>,
}

impl SyncStateHandle {
    pub fn new() -> Self {
        Self {
            status: Rc::new(RefCell::new(SyncStatus::Synced)),
            last_sync: Rc::new(RefCell::new(None)),
        }
    }

    pub fn get(&self) -> SyncStatus {
        self.status.borrow().clone()
    }

    pub fn set(&self, status: SyncStatus) {
        *self.status.borrow_mut() = status;
    }

    pub fn last_sync(&self) -> Option<i64> {
        *self.last_sync.borrow()
    }

    pub fn mark_synced_now(&self) {
        *self.last_sync.borrow_mut() = Some(chrono::Utc::now().timestamp());
    }
}

impl Default for SyncStateHandle {
    fn default() -> Self {
        Self::new()
    }
}
