// ============================================================================
// ENTITY COLLECTION - Snapshot local compartido de una colección de negocio
// ============================================================================
// Copia local autoritativa para el render inmediato. Toda mutación se
// persiste write-through: el write durable ocurre antes de dar por
// completada la mutación en memoria.
// ============================================================================

use serde::{de::DeserializeOwned, Serialize};
use std::cell::RefCell;
use std::rc::Rc;

use crate::models::{Driver, Incident, Note, Schedule, Store, User};
use crate::utils::storage::{load_json, save_json, StorageBackend};

/// Registro de negocio identificado por un id string único
pub trait Entity: Clone + PartialEq + Serialize + DeserializeOwned + 'static {
    fn entity_id(&self) -> &str;
}

impl Entity for User {
    fn entity_id(&self) -> &str {
        &self.id
    }
}

impl Entity for Store {
    fn entity_id(&self) -> &str {
        &self.id
    }
}

impl Entity for Driver {
    fn entity_id(&self) -> &str {
        &self.id
    }
}

impl Entity for Schedule {
    fn entity_id(&self) -> &str {
        &self.id
    }
}

impl Entity for Incident {
    fn entity_id(&self) -> &str {
        &self.id
    }
}

impl Entity for Note {
    fn entity_id(&self) -> &str {
        &self.id
    }
}

/// Colección compartida con persistencia write-through
#[derive(Clone)]
pub struct EntityCollection<T: Entity> {
    key: &'static str,
    items: Rc<RefCell<Vec<T>>>,
    storage: Rc<dyn StorageBackend>,
}

impl<T: Entity> EntityCollection<T> {
    /// Restaura la colección desde storage, o usa el dataset semilla si la
    /// clave no existe todavía (primer arranque)
    pub fn load(storage: Rc<dyn StorageBackend>, key: &'static str, seed: Vec<T>) -> Self {
        let items = match load_json::<Vec<T>>(&storage, key) {
            Some(items) => items,
            None => {
                log::info!("📦 Sin datos para '{}', usando dataset inicial", key);
                seed
            }
        };
        Self {
            key,
            items: Rc::new(RefCell::new(items)),
            storage,
        }
    }

    pub fn snapshot(&self) -> Vec<T> {
        self.items.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }

    pub fn get(&self, id: &str) -> Option<T> {
        self.items
            .borrow()
            .iter()
            .find(|e| e.entity_id() == id)
            .cloned()
    }

    /// Insert optimista: append al final
    pub fn insert(&self, entity: T) {
        self.items.borrow_mut().push(entity);
        self.persist();
    }

    /// Update optimista: reemplazo por id. Si el id no existe, la entidad
    /// se agrega al final (el backend la tratará igual como upsert).
    pub fn replace(&self, entity: T) {
        {
            let mut items = self.items.borrow_mut();
            match items.iter_mut().find(|e| e.entity_id() == entity.entity_id()) {
                Some(slot) => *slot = entity,
                None => items.push(entity),
            }
        }
        self.persist();
    }

    /// Delete optimista: elimina por id (no-op si no existe)
    pub fn remove(&self, id: &str) {
        self.items.borrow_mut().retain(|e| e.entity_id() != id);
        self.persist();
    }

    /// Reemplaza el snapshot completo (refetch silencioso)
    pub fn replace_all(&self, items: Vec<T>) {
        *self.items.borrow_mut() = items;
        self.persist();
    }

    /// Vacía la colección (acción administrativa clear)
    pub fn clear(&self) {
        self.items.borrow_mut().clear();
        self.persist();
    }

    // Un fallo de write durable no bloquea la mutación en memoria: se
    // loguea y la UI sigue reflejando el cambio.
    fn persist(&self) {
        if let Err(e) = save_json(&self.storage, self.key, &*self.items.borrow()) {
            log::error!("❌ Error persistiendo '{}': {}", self.key, e);
        }
    }
}
