// ============================================================================
// SERVICIO DE SINCRONIZACIÓN - Replay del queue + refetch silencioso
// ============================================================================
// Un pase de drain reintenta TODO el queue en orden FIFO contra el backend.
// Las acciones que fallan se retienen (en su orden original) para el
// próximo pase; si todo el pase tiene éxito se realinea el snapshot local
// con un refetch completo del backend.
// ============================================================================

use std::cell::Cell;
use std::rc::Rc;

use gloo_timers::callback::Interval;
use wasm_bindgen_futures::spawn_local;

use crate::config::CONFIG;
use crate::models::Action;
use crate::services::remote::RemoteStore;
use crate::state::AppState;

/// Despacha una acción contra el verbo correspondiente del backend.
/// Match exhaustivo: agregar una variante nueva es un error de compilación
/// hasta cablearla aquí.
pub async fn dispatch_action(remote: &dyn RemoteStore, action: &Action) -> Result<(), String> {
    match action {
        Action::InsertUser { user } => remote.insert_user(user).await,
        Action::UpdateUser { user } => remote.update_user(user).await,
        Action::DeleteUser { id } => remote.delete_user(id).await,

        Action::InsertStore { store } => remote.insert_store(store).await,
        Action::UpdateStore { store } => remote.update_store(store).await,
        Action::DeleteStore { id } => remote.delete_store(id).await,

        Action::InsertDriver { driver } => remote.insert_driver(driver).await,
        Action::UpdateDriver { driver } => remote.update_driver(driver).await,
        Action::DeleteDriver { id } => remote.delete_driver(id).await,

        Action::InsertSchedule { schedule } => remote.insert_schedule(schedule).await,
        Action::UpdateSchedule { schedule } => remote.update_schedule(schedule).await,
        Action::DeleteSchedule { id } => remote.delete_schedule(id).await,
        Action::ClearSchedules => remote.clear_schedules().await,

        Action::InsertIncident { incident } => remote.insert_incident(incident).await,
        Action::UpdateIncident { incident } => remote.update_incident(incident).await,
        Action::DeleteIncident { id } => remote.delete_incident(id).await,

        Action::InsertNote { note } => remote.insert_note(note).await,
        Action::UpdateNote { note } => remote.update_note(note).await,
        Action::DeleteNote { id } => remote.delete_note(id).await,
    }
}

#[derive(Clone)]
pub struct SyncService {
    state: AppState,
    remote: Rc<dyn RemoteStore>,
    /// Guard del refetch: nunca corre concurrente consigo mismo
    refreshing: Rc<Cell<bool>>,
}

impl SyncService {
    pub fn new(state: AppState, remote: Rc<dyn RemoteStore>) -> Self {
        Self {
            state,
            remote,
            refreshing: Rc::new(Cell::new(false)),
        }
    }

    /// Un pase de replay del queue completo. Idempotente: si ya hay un
    /// drain en curso o el queue está vacío, no hace nada.
    pub async fn drain_once(&self) {
        if self.state.queue.is_empty() {
            return;
        }
        if !self.state.queue.begin_drain() {
            log::info!("🔄 Drain ya en curso, ignorando");
            return;
        }
        self.state.refresh_sync_status();

        let snapshot = self.state.queue.snapshot();
        let snapshot_ids: Vec<u64> = snapshot.iter().map(|a| a.id).collect();
        log::info!("🔄 Drain: reintentando {} acciones pendientes", snapshot.len());

        let mut failed = Vec::new();
        for pending in snapshot {
            // Un fallo no corta el pase: se intentan TODAS las acciones y
            // las fallidas quedan retenidas para el próximo drain.
            match dispatch_action(self.remote.as_ref(), &pending.action).await {
                Ok(()) => {
                    log::info!("✅ Acción {} confirmada ({})", pending.id, pending.action.label());
                }
                Err(e) => {
                    log::warn!(
                        "⚠️ Acción {} falló ({}): {}",
                        pending.id,
                        pending.action.label(),
                        e
                    );
                    failed.push(pending);
                }
            }
        }

        let clean_pass = failed.is_empty();
        self.state.queue.retain_failed(&snapshot_ids, failed);
        self.state.queue.end_drain();
        self.state.refresh_sync_status();

        if clean_pass {
            log::info!("✅ Queue drenado por completo");
            self.state.sync.mark_synced_now();
            // Realinear snapshots con el estado canónico del backend
            self.refetch_all().await;
        } else {
            log::warn!("⚠️ Drain parcial: {} acciones retenidas", self.state.queue.len());
        }
    }

    /// Refetch silencioso de TODAS las colecciones. Solo corre online, con
    /// el queue vacío y sin drain en vuelo: nunca debe pisar estado local
    /// que embebe cambios aún no confirmados. Un fallo se loguea y se
    /// ignora: los snapshots quedan como estaban.
    pub async fn refetch_all(&self) {
        if !self.state.is_online.get() {
            return;
        }
        if !self.state.queue.is_empty() || self.state.queue.is_draining() {
            log::info!("⏭️ Refetch pospuesto: hay backlog pendiente");
            return;
        }
        if self.refreshing.get() {
            return;
        }
        self.refreshing.set(true);

        match self.fetch_snapshots().await {
            Ok(()) => {
                log::info!("📥 Snapshots realineados con el backend");
                self.state.sync.mark_synced_now();
            }
            Err(e) => {
                log::warn!("⚠️ Refetch silencioso falló: {}", e);
            }
        }

        self.refreshing.set(false);
    }

    // Trae las seis colecciones antes de reemplazar nada: un fallo a mitad
    // deja todos los snapshots locales intactos.
    async fn fetch_snapshots(&self) -> Result<(), String> {
        let users = self.remote.list_users().await?;
        let stores = self.remote.list_stores().await?;
        let drivers = self.remote.list_drivers().await?;
        let schedules = self.remote.list_schedules().await?;
        let incidents = self.remote.list_incidents().await?;
        let notes = self.remote.list_notes().await?;

        self.state.users.replace_all(users);
        self.state.stores.replace_all(stores);
        self.state.drivers.replace_all(drivers);
        self.state.schedules.replace_all(schedules);
        self.state.incidents.replace_all(incidents);
        self.state.notes.replace_all(notes);
        Ok(())
    }

    /// Un tick del timer de seguridad: drena si hay backlog, si no
    /// realinea snapshots
    pub async fn tick(&self) {
        if !self.state.is_online.get() {
            return;
        }
        if !self.state.queue.is_empty() {
            self.drain_once().await;
        } else {
            self.refetch_all().await;
        }
    }

    /// Timer periódico de seguridad, independiente de las transiciones de
    /// conectividad
    pub fn start_periodic(&self) {
        let interval_ms = CONFIG.sync_interval_seconds * 1000;
        let service = self.clone();
        let interval = Interval::new(interval_ms, move || {
            let service = service.clone();
            spawn_local(async move {
                service.tick().await;
            });
        });
        interval.forget();
        log::info!(
            "⏰ Sincronización periódica cada {} segundos",
            CONFIG.sync_interval_seconds
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Driver, SyncStatus};
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

    fn setup() -> (AppState, Rc<MockRemoteStore>, SyncService) {
        let storage: Rc<dyn StorageBackend> = Rc::new(MemoryStorage::new());
        let state = AppState::load(storage);
        let remote = Rc::new(MockRemoteStore::new());
        let service = SyncService::new(state.clone(), remote.clone());
        (state, remote, service)
    }

    #[test]
    fn failed_subset_retained_in_original_order() {
        let (state, remote, service) = setup();
        state.queue.enqueue(Action::InsertDriver { driver: driver("a", "A") });
        state.queue.enqueue(Action::InsertDriver { driver: driver("b", "B") });
        state.queue.enqueue(Action::InsertDriver { driver: driver("c", "C") });
        remote.fail("insert_driver:b", 1);

        block_on(service.drain_once());

        // Queue [A, B, C] con B fallando deja exactamente [B]
        let after = state.queue.snapshot();
        assert_eq!(after.len(), 1);
        assert!(matches!(
            &after[0].action,
            Action::InsertDriver { driver } if driver.id == "b"
        ));
        // A y C sí llegaron al backend
        assert_eq!(remote.drivers.borrow().len(), 2);
    }

    #[test]
    fn succeeded_actions_never_resent() {
        let (state, remote, service) = setup();
        state.queue.enqueue(Action::InsertDriver { driver: driver("a", "A") });
        state.queue.enqueue(Action::InsertDriver { driver: driver("b", "B") });
        remote.fail("insert_driver:b", 1);

        block_on(service.drain_once());
        block_on(service.drain_once());

        // "a" se envió exactamente una vez aunque hubo dos pases
        assert_eq!(remote.calls_matching("insert_driver:a"), 1);
        assert_eq!(remote.calls_matching("insert_driver:b"), 2);
        assert!(state.queue.is_empty());
    }

    #[test]
    fn refetch_never_runs_with_pending_backlog() {
        let (state, remote, service) = setup();
        state.queue.enqueue(Action::InsertDriver { driver: driver("a", "A") });
        remote.fail("insert_driver:a", 1);

        block_on(service.drain_once());

        // Pase parcial: ninguna colección se refetcheó
        assert_eq!(remote.calls_matching("list_"), 0);

        // Llamada directa con backlog: también no-op
        block_on(service.refetch_all());
        assert_eq!(remote.calls_matching("list_"), 0);
    }

    #[test]
    fn clean_pass_clears_queue_and_refetches() {
        let (state, remote, service) = setup();
        // El backend ya tiene un conductor que el local no conoce
        remote.drivers.borrow_mut().push(driver("remoto", "Remoto"));
        state.queue.enqueue(Action::InsertDriver { driver: driver("a", "A") });

        block_on(service.drain_once());

        assert!(state.queue.is_empty());
        // El snapshot local ahora refleja exactamente list() del backend
        let local: Vec<String> = state
            .drivers
            .snapshot()
            .iter()
            .map(|d| d.id.clone())
            .collect();
        assert_eq!(local, vec!["remoto".to_string(), "a".to_string()]);
        assert_eq!(state.sync.get(), SyncStatus::Synced);
        assert!(state.sync.last_sync().is_some());
    }

    #[test]
    fn queued_updates_replay_in_fifo_order() {
        let (state, remote, service) = setup();
        remote.drivers.borrow_mut().push(driver("d1", "X"));
        state.queue.enqueue(Action::UpdateDriver { driver: driver("d1", "Y") });
        state.queue.enqueue(Action::UpdateDriver { driver: driver("d1", "Z") });

        block_on(service.drain_once());

        // El backend terminó con el valor del último update
        assert_eq!(remote.drivers.borrow()[0].name, "Z");
        assert!(state.queue.is_empty());
    }

    #[test]
    fn repeated_drains_converge_and_are_idempotent() {
        let (state, remote, service) = setup();
        state.queue.enqueue(Action::InsertDriver { driver: driver("d1", "X") });
        state.queue.enqueue(Action::UpdateDriver { driver: driver("d1", "Y") });
        remote.fail("insert_driver:d1", 2);
        remote.fail("update_driver:d1", 2);

        // Dos pases fallan completos, el tercero converge
        block_on(service.drain_once());
        block_on(service.drain_once());
        assert_eq!(state.queue.len(), 2);
        block_on(service.drain_once());
        assert!(state.queue.is_empty());
        assert_eq!(remote.drivers.borrow().len(), 1);
        assert_eq!(remote.drivers.borrow()[0].name, "Y");

        // Pases adicionales después de converger no tienen efecto
        let calls_before = remote.calls.borrow().len();
        block_on(service.drain_once());
        assert_eq!(remote.calls.borrow().len(), calls_before);
    }

    #[test]
    fn drain_is_noop_while_another_is_running() {
        let (state, remote, service) = setup();
        state.queue.enqueue(Action::ClearSchedules);

        // Simula un drain en vuelo
        assert!(state.queue.begin_drain());
        block_on(service.drain_once());

        assert!(remote.calls.borrow().is_empty());
        assert_eq!(state.queue.len(), 1);
        state.queue.end_drain();
    }

    #[test]
    fn refetch_failure_leaves_local_snapshots_intact() {
        let (state, remote, service) = setup();
        state.drivers.replace_all(vec![driver("local", "Local")]);
        remote.fail("list_users", 1);

        block_on(service.refetch_all());

        // El fetch falló: nada se reemplazó
        assert_eq!(state.drivers.snapshot()[0].id, "local");
        // Y un refetch posterior exitoso sí realinea
        block_on(service.refetch_all());
        assert!(state.drivers.snapshot().is_empty());
    }

    #[test]
    fn refetch_skipped_while_offline() {
        let (state, remote, service) = setup();
        state.is_online.set(false);
        block_on(service.refetch_all());
        assert!(remote.calls.borrow().is_empty());
    }

    #[test]
    fn offline_bulk_clear_drains_to_empty_remote() {
        let (state, remote, service) = setup();
        remote.schedules.borrow_mut().push(crate::models::Schedule {
            id: "t1".to_string(),
            date: "2025-03-01".to_string(),
            driver_id: "d-001".to_string(),
            store_id: "s-001".to_string(),
            shift: "AM".to_string(),
            role: None,
            attended: None,
        });
        state.queue.enqueue(Action::ClearSchedules);

        block_on(service.drain_once());

        assert!(remote.schedules.borrow().is_empty());
        assert!(state.queue.is_empty());
    }
}
