pub mod api_client;
pub mod mutation_service;
pub mod network_monitor;
pub mod remote;
pub mod sync_service;

pub use api_client::ApiClient;
pub use mutation_service::MutationService;
pub use network_monitor::NetworkMonitor;
pub use remote::RemoteStore;
pub use sync_service::SyncService;
