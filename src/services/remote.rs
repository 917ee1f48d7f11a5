// ============================================================================
// REMOTE STORE - Contrato con el backend (store of record)
// ============================================================================
// El core solo depende de estos verbos por colección y del resultado
// binario éxito/error de cada llamada; el transporte concreto vive en
// ApiClient. Los tests inyectan un doble en memoria.
// ============================================================================

use async_trait::async_trait;

use crate::models::{Driver, Incident, Note, Schedule, Store, User};

#[async_trait(?Send)]
pub trait RemoteStore {
    async fn insert_user(&self, user: &User) -> Result<(), String>;
    async fn update_user(&self, user: &User) -> Result<(), String>;
    async fn delete_user(&self, id: &str) -> Result<(), String>;
    async fn list_users(&self) -> Result<Vec<User>, String>;

    async fn insert_store(&self, store: &Store) -> Result<(), String>;
    async fn update_store(&self, store: &Store) -> Result<(), String>;
    async fn delete_store(&self, id: &str) -> Result<(), String>;
    async fn list_stores(&self) -> Result<Vec<Store>, String>;

    async fn insert_driver(&self, driver: &Driver) -> Result<(), String>;
    async fn update_driver(&self, driver: &Driver) -> Result<(), String>;
    async fn delete_driver(&self, id: &str) -> Result<(), String>;
    async fn list_drivers(&self) -> Result<Vec<Driver>, String>;

    async fn insert_schedule(&self, schedule: &Schedule) -> Result<(), String>;
    async fn update_schedule(&self, schedule: &Schedule) -> Result<(), String>;
    async fn delete_schedule(&self, id: &str) -> Result<(), String>;
    async fn clear_schedules(&self) -> Result<(), String>;
    async fn list_schedules(&self) -> Result<Vec<Schedule>, String>;

    async fn insert_incident(&self, incident: &Incident) -> Result<(), String>;
    async fn update_incident(&self, incident: &Incident) -> Result<(), String>;
    async fn delete_incident(&self, id: &str) -> Result<(), String>;
    async fn list_incidents(&self) -> Result<Vec<Incident>, String>;

    async fn insert_note(&self, note: &Note) -> Result<(), String>;
    async fn update_note(&self, note: &Note) -> Result<(), String>;
    async fn delete_note(&self, id: &str) -> Result<(), String>;
    async fn list_notes(&self) -> Result<Vec<Note>, String>;
}

// ============================================================================
// DOBLE EN MEMORIA PARA TESTS
// ============================================================================
