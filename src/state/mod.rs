// ============================================================================
// STATE MODULE - State Management con Rc<RefCell> + persistencia
// ============================================================================

pub mod action_queue;
pub mod app_state;
pub mod collection;
pub mod sync_state;

pub use action_queue::QueueHandle;
pub use app_state::AppState;
pub use collection::{Entity, EntityCollection};
pub use sync_state::SyncStateHandle;
