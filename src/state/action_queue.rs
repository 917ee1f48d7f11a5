// ============================================================================
// ACTION QUEUE - Handle compartido del queue FIFO persistente
// ============================================================================
// Invariante: replay estrictamente en orden de encolado. Acciones
// posteriores pueden depender de cambios anteriores sobre la misma entidad
// (insert-luego-update, update-luego-update), así que reordenar arriesga
// pisar un estado más nuevo con uno viejo.
// ============================================================================

use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::rc::Rc;

use crate::models::{Action, ActionQueue, PendingAction};
use crate::utils::constants::STORAGE_KEY_QUEUE;
use crate::utils::storage::{load_json, save_json, StorageBackend};

#[derive(Clone)]
pub struct QueueHandle {
    inner: Rc<RefCell<ActionQueue>>,
    /// Guard de reentrada: un drain en curso hace no-op cualquier otro
    draining: Rc<Cell<bool>>,
    storage: Rc<dyn StorageBackend>,
}

impl QueueHandle {
    /// Restaura el queue persistido, o crea uno vacío en el primer arranque
    pub fn load(storage: Rc<dyn StorageBackend>) -> Self {
        let queue = match load_json::<ActionQueue>(&storage, STORAGE_KEY_QUEUE) {
            Some(q) => {
                if !q.is_empty() {
                    log::info!("📋 Queue restaurado: {} acciones pendientes", q.len());
                }
                q
            }
            None => ActionQueue::new(),
        };
        Self {
            inner: Rc::new(RefCell::new(queue)),
            draining: Rc::new(Cell::new(false)),
            storage,
        }
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }

    /// Encola una acción al final. Nunca rechaza, sin límite de tamaño.
    pub fn enqueue(&self, action: Action) -> u64 {
        let id = self
            .inner
            .borrow_mut()
            .push(action, chrono::Utc::now().timestamp());
        self.persist();
        log::info!("📝 Acción encolada (id {}): {} pendientes", id, self.len());
        id
    }

    /// Snapshot inmutable del contenido actual, en orden FIFO
    pub fn snapshot(&self) -> Vec<PendingAction> {
        self.inner.borrow().items.clone()
    }

    /// Marca el inicio de un drain. Devuelve false si ya hay uno en curso.
    pub fn begin_drain(&self) -> bool {
        if self.draining.get() {
            return false;
        }
        self.draining.set(true);
        true
    }

    pub fn end_drain(&self) {
        self.draining.set(false);
    }

    pub fn is_draining(&self) -> bool {
        self.draining.get()
    }

    /// Cierra un pase de drain: el nuevo contenido es exactamente el
    /// subconjunto fallido (en su orden relativo original), seguido de lo
    /// que se haya encolado DURANTE el pase (ids fuera del snapshot) para
    /// no perder ninguna mutación.
    pub fn retain_failed(&self, snapshot_ids: &[u64], failed: Vec<PendingAction>) {
        {
            let drained: HashSet<u64> = snapshot_ids.iter().copied().collect();
            let mut inner = self.inner.borrow_mut();
            let newer: Vec<PendingAction> = inner
                .items
                .iter()
                .filter(|a| !drained.contains(&a.id))
                .cloned()
                .collect();
            inner.items = failed;
            inner.items.extend(newer);
        }
        self.persist();
    }

    fn persist(&self) {
        if let Err(e) = save_json(&self.storage, STORAGE_KEY_QUEUE, &*self.inner.borrow()) {
            log::error!("❌ Error persistiendo queue: {}", e);
        }
    }
}
