// ============================================================================
// MONITOR DE ESTADO DE RED
// ============================================================================
// Única fuente de transiciones del flag de conectividad: los eventos
// online/offline del navegador. Un request fallido NUNCA cambia el flag.
// ============================================================================

use std::cell::Cell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{window, Event};

/// Monitor de conectividad con listeners de eventos del navegador.
/// Previene registros duplicados: los listeners se instalan una sola vez.
pub struct NetworkMonitor {
    online: Rc<Cell<bool>>,
    started: Rc<Cell<bool>>,
}

impl NetworkMonitor {
    /// Crea el monitor sembrando el estado desde navigator.onLine
    pub fn new() -> Self {
        let online = window()
            .map(|w| w.navigator().on_line())
            .unwrap_or(true);

        Self {
            online: Rc::new(Cell::new(online)),
            started: Rc::new(Cell::new(false)),
        }
    }

    /// Estado actual de conectividad
    pub fn is_online(&self) -> bool {
        self.online.get()
    }

    /// Registra los listeners online/offline e invoca el callback en cada
    /// transición. Llamadas repetidas son no-op.
    pub fn start<F>(&self, on_change: F)
    where
        F: Fn(bool) + 'static,
    {
        if self.started.get() {
            log::warn!("⚠️ NetworkMonitor: start ya fue llamado, ignorando");
            return;
        }
        self.started.set(true);

        let win = match window() {
            Some(w) => w,
            None => return,
        };

        let on_change = Rc::new(on_change);

        let online_closure = Closure::wrap(Box::new({
            let status = self.online.clone();
            let on_change = on_change.clone();
            move |_event: Event| {
                log::info!("🌐 Red: ONLINE");
                status.set(true);
                on_change(true);
            }
        }) as Box<dyn FnMut(Event)>);

        let offline_closure = Closure::wrap(Box::new({
            let status = self.online.clone();
            let on_change = on_change.clone();
            move |_event: Event| {
                log::warn!("📴 Red: OFFLINE");
                status.set(false);
                on_change(false);
            }
        }) as Box<dyn FnMut(Event)>);

        let _ = win
            .add_event_listener_with_callback("online", online_closure.as_ref().unchecked_ref());
        let _ = win
            .add_event_listener_with_callback("offline", offline_closure.as_ref().unchecked_ref());

        // Los listeners globales persisten durante toda la vida de la app:
        // forget() mantiene vivos los closures.
        online_closure.forget();
        offline_closure.forget();

        log::info!("✅ NetworkMonitor: listeners registrados");
    }
}

impl Default for NetworkMonitor {
    fn default() -> Self {
        Self::new()
    }
}
