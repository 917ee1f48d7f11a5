// ============================================================================
// APP STATE - Estado global explícito de la aplicación
// ============================================================================
// Un solo objeto inyectable, sin singletons ambientales: los tests crean
// instancias aisladas sobre un storage en memoria. La capa de presentación
// lee los snapshots de aquí; NUNCA lee el backend directamente.
// ============================================================================

use std::cell::Cell;
use std::rc::Rc;

use crate::models::{Driver, Incident, Note, Schedule, Store, SyncStatus, User};
use crate::state::action_queue::QueueHandle;
use crate::state::collection::EntityCollection;
use crate::state::sync_state::SyncStateHandle;
use crate::utils::constants::*;
use crate::utils::storage::StorageBackend;

#[derive(Clone)]
pub struct AppState {
    pub users: EntityCollection<User>,
    pub stores: EntityCollection<Store>,
    pub drivers: EntityCollection<Driver>,
    pub schedules: EntityCollection<Schedule>,
    pub incidents: EntityCollection<Incident>,
    pub notes: EntityCollection<Note>,
    pub queue: QueueHandle,
    /// Flag de conectividad. Solo lo muta el monitor de red: un fallo de
    /// request con el flag en online NO lo cambia, solo alimenta el queue.
    pub is_online: Rc<Cell<bool>>,
    pub sync: SyncStateHandle,
}

impl AppState {
    /// Restaura todo el estado desde el storage durable, sembrando el
    /// dataset inicial en las colecciones que aún no existen
    pub fn load(storage: Rc<dyn StorageBackend>) -> Self {
        Self {
            users: EntityCollection::load(storage.clone(), STORAGE_KEY_USERS, seed_users()),
            stores: EntityCollection::load(storage.clone(), STORAGE_KEY_STORES, seed_stores()),
            drivers: EntityCollection::load(storage.clone(), STORAGE_KEY_DRIVERS, seed_drivers()),
            schedules: EntityCollection::load(storage.clone(), STORAGE_KEY_SCHEDULES, Vec::new()),
            incidents: EntityCollection::load(storage.clone(), STORAGE_KEY_INCIDENTS, Vec::new()),
            notes: EntityCollection::load(storage.clone(), STORAGE_KEY_NOTES, Vec::new()),
            queue: QueueHandle::load(storage),
            is_online: Rc::new(Cell::new(true)),
            sync: SyncStateHandle::new(),
        }
    }

    /// Recalcula el indicador ambiental a partir del queue y la conectividad
    pub fn refresh_sync_status(&self) {
        let pending = self.queue.len();
        let status = if self.queue.is_draining() {
            SyncStatus::Syncing
        } else if !self.is_online.get() {
            SyncStatus::Offline { pending }
        } else if pending > 0 {
            SyncStatus::Pending { count: pending }
        } else {
            SyncStatus::Synced
        };
        self.sync.set(status);
    }
}

// ============================================================================
// DATASET INICIAL - Primer arranque sin backend
// ============================================================================

fn seed_users() -> Vec<User> {
    vec![User {
        id: "u-admin".to_string(),
        username: "admin".to_string(),
        display_name: "Administrador".to_string(),
        role: "admin".to_string(),
        email: None,
        active: true,
    }]
}

fn seed_stores() -> Vec<Store> {
    vec![
        Store {
            id: "s-001".to_string(),
            name: "Centro Norte".to_string(),
            code: "CN-001".to_string(),
            address: "Av. Libertad 1200".to_string(),
            city: Some("Madrid".to_string()),
            phone: None,
        },
        Store {
            id: "s-002".to_string(),
            name: "Centro Sur".to_string(),
            code: "CS-002".to_string(),
            address: "Calle Mayor 45".to_string(),
            city: Some("Madrid".to_string()),
            phone: None,
        },
    ]
}

fn seed_drivers() -> Vec<Driver> {
    vec![
        Driver {
            id: "d-001".to_string(),
            name: "Ana Ruiz".to_string(),
            badge_number: "B-0001".to_string(),
            phone: None,
            vehicle_plate: None,
            home_store_id: Some("s-001".to_string()),
            active: true,
        },
        Driver {
            id: "d-002".to_string(),
            name: "Luc Moreau".to_string(),
            badge_number: "B-0002".to_string(),
            phone: None,
            vehicle_plate: None,
            home_store_id: Some("s-002".to_string()),
            active: true,
        },
    ]
}
