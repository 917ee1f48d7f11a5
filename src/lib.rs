// ============================================================================
// FLEET OPS PWA - NÚCLEO DE SINCRONIZACIÓN OFFLINE-FIRST (RUST PURO)
// ============================================================================
// Arquitectura:
// - Models: entidades de negocio + acciones pendientes
// - Services: API client, monitor de red, mutator optimista, sync driver
// - State: estado global explícito con Rc<RefCell> + write-through
// - Utils: storage durable y constantes
//
// Flujo: mutación de la UI -> MutationService (snapshot local al instante)
// -> {envío directo | queue} -> al volver la conexión el monitor dispara
// el drain -> con el queue vacío, refetch silencioso del backend.
// ============================================================================

pub mod config;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::services::{ApiClient, MutationService, NetworkMonitor, SyncService};
use crate::state::AppState;
use crate::utils::storage::{BrowserStorage, StorageBackend};

/// Handles compartidos con la capa de presentación
pub struct AppHandles {
    pub state: AppState,
    pub mutations: MutationService,
    pub sync: SyncService,
}

// Instancia global de la app (un solo hilo en WASM)
thread_local! {
    static APP: RefCell<Option<Rc<AppHandles>>> = RefCell::new(None);
}

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("🚀 Fleet Ops PWA - núcleo de sincronización iniciando");

    let storage: Rc<dyn StorageBackend> = Rc::new(BrowserStorage::new());
    let state = AppState::load(storage);

    let remote: Rc<dyn services::RemoteStore> = Rc::new(ApiClient::new());
    let sync = SyncService::new(state.clone(), remote.clone());
    let mutations = MutationService::new(state.clone(), remote);

    // Conectividad inicial desde navigator.onLine, transiciones desde los
    // eventos del navegador
    let monitor = NetworkMonitor::new();
    state.is_online.set(monitor.is_online());
    state.refresh_sync_status();
    log::info!(
        "🌐 Conectividad inicial: {}",
        if monitor.is_online() { "online" } else { "offline" }
    );

    {
        let state = state.clone();
        let sync = sync.clone();
        monitor.start(move |online| {
            state.is_online.set(online);
            state.refresh_sync_status();
            // Una transición a online dispara UN drain; a offline, nada
            if online && !state.queue.is_empty() {
                let sync = sync.clone();
                spawn_local(async move {
                    sync.drain_once().await;
                });
            }
        });
    }

    // Timer de seguridad independiente de las transiciones de red
    sync.start_periodic();

    // Si quedó backlog de una sesión anterior y hay conexión, drenarlo ya
    if monitor.is_online() && !state.queue.is_empty() {
        let sync = sync.clone();
        spawn_local(async move {
            log::info!("🔄 Backlog de sesión anterior detectado, drenando");
            sync.drain_once().await;
        });
    }

    APP.with(|app| {
        *app.borrow_mut() = Some(Rc::new(AppHandles {
            state,
            mutations,
            sync,
        }));
    });

    log::info!("✅ Fleet Ops listo");
    Ok(())
}

/// Acceso a los handles globales desde la capa de presentación
pub fn with_app<R>(f: impl FnOnce(&AppHandles) -> R) -> Option<R> {
    APP.with(|app| app.borrow().as_ref().map(|handles| f(handles)))
}
