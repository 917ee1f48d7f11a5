// Claves de almacenamiento durable. Una clave por colección, una para el
// queue de acciones pendientes.
pub const STORAGE_KEY_USERS: &str = "fleet_ops_users";
pub const STORAGE_KEY_STORES: &str = "fleet_ops_stores";
pub const STORAGE_KEY_DRIVERS: &str = "fleet_ops_drivers";
pub const STORAGE_KEY_SCHEDULES: &str = "fleet_ops_schedules";
pub const STORAGE_KEY_INCIDENTS: &str = "fleet_ops_incidents";
pub const STORAGE_KEY_NOTES: &str = "fleet_ops_notes";
pub const STORAGE_KEY_QUEUE: &str = "fleet_ops_pending_actions";
