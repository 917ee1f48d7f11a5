// ============================================================================
// MUTATION SERVICE - Mutaciones optimistas
// ============================================================================
// Toda mutación de negocio entra por aquí. Efecto 1 (incondicional,
// síncrono): actualizar el snapshot local y persistirlo. Efecto 2: online
// y con el queue vacío, intento directo contra el backend con fallback al
// queue; offline o con backlog, directo al queue.
//
// Regla de orden: con el queue no vacío SIEMPRE se encola, aunque haya
// conexión. Una mutación nueva no puede adelantar a una encolada antes
// sobre la misma entidad.
// ============================================================================

use std::rc::Rc;

use crate::models::{Action, Driver, Incident, Note, Schedule, Store, User};
use crate::services::remote::RemoteStore;
use crate::services::sync_service::dispatch_action;
use crate::state::AppState;

#[derive(Clone)]
pub struct MutationService {
    state: AppState,
    remote: Rc<dyn RemoteStore>,
}

impl MutationService {
    pub fn new(state: AppState, remote: Rc<dyn RemoteStore>) -> Self {
        Self { state, remote }
    }

    // ------------------------------------------------------------------
    // Users
    // ------------------------------------------------------------------

    pub async fn insert_user(&self, user: User) {
        self.state.users.insert(user.clone());
        self.submit(Action::InsertUser { user }).await;
    }

    pub async fn update_user(&self, user: User) {
        self.state.users.replace(user.clone());
        self.submit(Action::UpdateUser { user }).await;
    }

    pub async fn delete_user(&self, id: &str) {
        self.state.users.remove(id);
        self.submit(Action::DeleteUser { id: id.to_string() }).await;
    }

    // ------------------------------------------------------------------
    // Stores
    // ------------------------------------------------------------------

    pub async fn insert_store(&self, store: Store) {
        self.state.stores.insert(store.clone());
        self.submit(Action::InsertStore { store }).await;
    }

    pub async fn update_store(&self, store: Store) {
        self.state.stores.replace(store.clone());
        self.submit(Action::UpdateStore { store }).await;
    }

    pub async fn delete_store(&self, id: &str) {
        self.state.stores.remove(id);
        self.submit(Action::DeleteStore { id: id.to_string() }).await;
    }

    // ------------------------------------------------------------------
    // Drivers
    // ------------------------------------------------------------------

    pub async fn insert_driver(&self, driver: Driver) {
        self.state.drivers.insert(driver.clone());
        self.submit(Action::InsertDriver { driver }).await;
    }

    pub async fn update_driver(&self, driver: Driver) {
        self.state.drivers.replace(driver.clone());
        self.submit(Action::UpdateDriver { driver }).await;
    }

    pub async fn delete_driver(&self, id: &str) {
        self.state.drivers.remove(id);
        self.submit(Action::DeleteDriver { id: id.to_string() }).await;
    }

    // ------------------------------------------------------------------
    // Schedules
    // ------------------------------------------------------------------

    pub async fn insert_schedule(&self, schedule: Schedule) {
        self.state.schedules.insert(schedule.clone());
        self.submit(Action::InsertSchedule { schedule }).await;
    }

    pub async fn update_schedule(&self, schedule: Schedule) {
        self.state.schedules.replace(schedule.clone());
        self.submit(Action::UpdateSchedule { schedule }).await;
    }

    pub async fn delete_schedule(&self, id: &str) {
        self.state.schedules.remove(id);
        self.submit(Action::DeleteSchedule { id: id.to_string() }).await;
    }

    /// Acción administrativa destructiva: vacía las asignaciones en local
    /// y manda UN solo delete-all al backend. Sin undo.
    pub async fn clear_schedules(&self) {
        log::warn!("🗑️ Clear administrativo: vaciando asignaciones locales");
        self.state.schedules.clear();
        self.submit(Action::ClearSchedules).await;
    }

    // ------------------------------------------------------------------
    // Incidents
    // ------------------------------------------------------------------

    pub async fn insert_incident(&self, incident: Incident) {
        self.state.incidents.insert(incident.clone());
        self.submit(Action::InsertIncident { incident }).await;
    }

    pub async fn update_incident(&self, incident: Incident) {
        self.state.incidents.replace(incident.clone());
        self.submit(Action::UpdateIncident { incident }).await;
    }

    pub async fn delete_incident(&self, id: &str) {
        self.state.incidents.remove(id);
        self.submit(Action::DeleteIncident { id: id.to_string() }).await;
    }

    // ------------------------------------------------------------------
    // Notes
    // ------------------------------------------------------------------

    pub async fn insert_note(&self, note: Note) {
        self.state.notes.insert(note.clone());
        self.submit(Action::InsertNote { note }).await;
    }

    pub async fn update_note(&self, note: Note) {
        self.state.notes.replace(note.clone());
        self.submit(Action::UpdateNote { note }).await;
    }

    pub async fn delete_note(&self, id: &str) {
        self.state.notes.remove(id);
        self.submit(Action::DeleteNote { id: id.to_string() }).await;
    }

    // ------------------------------------------------------------------

    /// Efecto 2 de toda mutación: intento directo solo si hay conexión y
    /// NO hay backlog; cualquier otro caso encola. Los errores del backend
    /// nunca se propagan al caller: terminan como retención en el queue.
    async fn submit(&self, action: Action) {
        if self.state.is_online.get() && self.state.queue.is_empty() {
            match dispatch_action(self.remote.as_ref(), &action).await {
                Ok(()) => {
                    log::info!("✅ Mutación confirmada en directo ({})", action.label());
                    self.state.refresh_sync_status();
                    return;
                }
                Err(e) => {
                    log::warn!("⚠️ Envío directo falló ({}): {}", action.label(), e);
                }
            }
        }
        self.state.queue.enqueue(action);
        self.state.refresh_sync_status();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SyncStatus;
    use crate::services::remote::mock::MockRemoteStore;
    use crate::utils::storage::{MemoryStorage, StorageBackend};
    use futures::executor::block_on;

    fn driver(id: &str, name: &str) -> Driver {
        Driver {
            id: id.to_string(),
            name: name.to_string(),
            badge_number: format!("B-{}", id),
            phone: None,
            vehicle_plate: None,
            home_store_id: None,
            active: true,
        }
    }

    fn setup() -> (AppState, Rc<MockRemoteStore>, MutationService) {
        let storage: Rc<dyn StorageBackend> = Rc::new(MemoryStorage::new());
        let state = AppState::load(storage);
        let remote = Rc::new(MockRemoteStore::new());
        let service = MutationService::new(state.clone(), remote.clone());
        (state, remote, service)
    }

    #[test]
    fn local_snapshot_updated_before_remote_resolves_offline() {
        let (state, remote, service) = setup();
        state.is_online.set(false);

        block_on(service.insert_driver(driver("d9", "Nuevo")));

        // Visible en local de inmediato aunque no hubo red
        assert!(state.drivers.get("d9").is_some());
        assert!(remote.calls.borrow().is_empty());
        assert_eq!(state.queue.len(), 1);
        assert_eq!(state.sync.get(), SyncStatus::Offline { pending: 1 });
    }

    #[test]
    fn local_snapshot_updated_identically_when_online() {
        let (state, remote, service) = setup();

        block_on(service.insert_driver(driver("d9", "Nuevo")));

        assert!(state.drivers.get("d9").is_some());
        // Online con queue vacío: envío directo, sin encolar
        assert_eq!(remote.calls_matching("insert_driver:d9"), 1);
        assert!(state.queue.is_empty());
        assert_eq!(state.sync.get(), SyncStatus::Synced);
    }

    #[test]
    fn direct_failure_falls_back_to_queue() {
        let (state, remote, service) = setup();
        remote.fail("insert_driver:d9", 1);

        block_on(service.insert_driver(driver("d9", "Nuevo")));

        assert!(state.drivers.get("d9").is_some());
        assert_eq!(state.queue.len(), 1);
        // Online pero con backlog: el indicador pasa a Pending, no a error
        assert_eq!(state.sync.get(), SyncStatus::Pending { count: 1 });
    }

    #[test]
    fn nonempty_queue_forces_enqueue_even_online() {
        let (state, remote, service) = setup();
        state.is_online.set(false);
        block_on(service.update_driver(driver("d-001", "Ana R.")));
        assert_eq!(state.queue.len(), 1);

        // Vuelve la conexión pero el backlog sigue ahí: la mutación nueva
        // NO puede adelantar a la encolada
        state.is_online.set(true);
        block_on(service.update_driver(driver("d-001", "Ana Ruiz B.")));

        assert_eq!(state.queue.len(), 2);
        assert!(remote.calls.borrow().is_empty());
        let kinds: Vec<&str> = state
            .queue
            .snapshot()
            .iter()
            .map(|a| a.action.label())
            .collect();
        assert_eq!(kinds, vec!["update_driver", "update_driver"]);
    }

    #[test]
    fn delete_removes_locally_and_enqueues_bare_id() {
        let (state, _remote, service) = setup();
        state.is_online.set(false);

        block_on(service.delete_driver("d-001"));

        assert!(state.drivers.get("d-001").is_none());
        let queued = state.queue.snapshot();
        assert!(matches!(
            &queued[0].action,
            Action::DeleteDriver { id } if id == "d-001"
        ));
    }

    #[test]
    fn clear_schedules_empties_local_and_queues_single_action() {
        let (state, _remote, service) = setup();
        state.is_online.set(false);
        block_on(service.insert_schedule(crate::models::Schedule {
            id: "t1".to_string(),
            date: "2025-03-01".to_string(),
            driver_id: "d-001".to_string(),
            store_id: "s-001".to_string(),
            shift: "AM".to_string(),
            role: None,
            attended: None,
        }));

        block_on(service.clear_schedules());

        assert!(state.schedules.is_empty());
        let labels: Vec<&str> = state
            .queue
            .snapshot()
            .iter()
            .map(|a| a.action.label())
            .collect();
        assert_eq!(labels, vec!["insert_schedule", "clear_schedules"]);
    }

    #[test]
    fn offline_insert_then_reconnect_converges_with_remote() {
        let (state, remote, service) = setup();
        state.is_online.set(false);

        block_on(service.insert_driver(driver("d1", "X")));
        assert!(state.drivers.get("d1").is_some());
        assert_eq!(state.queue.len(), 1);

        // Vuelve la conexión: drain + refetch (lo que haría el monitor)
        state.is_online.set(true);
        let sync =
            crate::services::sync_service::SyncService::new(state.clone(), remote.clone());
        block_on(sync.drain_once());

        assert!(state.queue.is_empty());
        // El snapshot local quedó igual a list() del backend
        let remote_ids: Vec<String> = remote.drivers.borrow().iter().map(|d| d.id.clone()).collect();
        let local_ids: Vec<String> = state
            .drivers
            .snapshot()
            .iter()
            .map(|d| d.id.clone())
            .collect();
        assert_eq!(local_ids, remote_ids);
        assert_eq!(state.sync.get(), SyncStatus::Synced);
    }
}
