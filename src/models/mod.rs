pub mod action;
pub mod driver;
pub mod incident;
pub mod note;
pub mod schedule;
pub mod store;
pub mod sync;
pub mod user;

pub use action::{Action, ActionQueue, PendingAction};
pub use driver::Driver;
pub use incident::Incident;
pub use note::Note;
pub use schedule::Schedule;
pub use store::Store;
pub use sync::SyncStatus;
pub use user::User;
