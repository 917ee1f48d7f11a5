// ============================================================================
// API CLIENT - SOLO COMUNICACIÓN HTTP (Stateless)
// ============================================================================
// NO tiene lógica de negocio, solo hace requests HTTP contra el backend.
// Implementa RemoteStore: cinco verbos por colección, resultado binario.
// ============================================================================

use async_trait::async_trait;
use gloo_net::http::Request;
use serde::{de::DeserializeOwned, Serialize};

use crate::config::CONFIG;
use crate::models::{Driver, Incident, Note, Schedule, Store, User};
use crate::services::remote::RemoteStore;

/// Cliente API - SOLO comunicación HTTP (stateless)
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    pub fn new() -> Self {
        Self {
            base_url: CONFIG.backend_url().to_string(),
        }
    }

    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
        }
    }

    async fn post_json<T: Serialize>(&self, path: &str, body: &T) -> Result<(), String> {
        let url = format!("{}{}", self.base_url, path);
        let response = Request::post(&url)
            .json(body)
            .map_err(|e| format!("Request build error: {}", e))?
            .send()
            .await
            .map_err(|e| format!("Network error: {}", e))?;
        if !response.ok() {
            return Err(format!("HTTP {}: {}", response.status(), response.status_text()));
        }
        Ok(())
    }

    async fn put_json<T: Serialize>(&self, path: &str, body: &T) -> Result<(), String> {
        let url = format!("{}{}", self.base_url, path);
        let response = Request::put(&url)
            .json(body)
            .map_err(|e| format!("Request build error: {}", e))?
            .send()
            .await
            .map_err(|e| format!("Network error: {}", e))?;
        if !response.ok() {
            return Err(format!("HTTP {}: {}", response.status(), response.status_text()));
        }
        Ok(())
    }

    async fn delete_path(&self, path: &str) -> Result<(), String> {
        let url = format!("{}{}", self.base_url, path);
        let response = Request::delete(&url)
            .send()
            .await
            .map_err(|e| format!("Network error: {}", e))?;
        if !response.ok() {
            return Err(format!("HTTP {}: {}", response.status(), response.status_text()));
        }
        Ok(())
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, String> {
        let url = format!("{}{}", self.base_url, path);
        let response = Request::get(&url)
            .send()
            .await
            .map_err(|e| format!("Network error: {}", e))?;
        if !response.ok() {
            return Err(format!("HTTP {}: {}", response.status(), response.status_text()));
        }
        response
            .json::<T>()
            .await
            .map_err(|e| format!("Parse error: {}", e))
    }
}

#[async_trait(?Send)]
impl RemoteStore for ApiClient {
    async fn insert_user(&self, user: &User) -> Result<(), String> {
        self.post_json("/v1/users", user).await
    }
    async fn update_user(&self, user: &User) -> Result<(), String> {
        self.put_json(&format!("/v1/users/{}", user.id), user).await
    }
    async fn delete_user(&self, id: &str) -> Result<(), String> {
        self.delete_path(&format!("/v1/users/{}", id)).await
    }
    async fn list_users(&self) -> Result<Vec<User>, String> {
        self.get_json("/v1/users").await
    }

    async fn insert_store(&self, store: &Store) -> Result<(), String> {
        self.post_json("/v1/stores", store).await
    }
    async fn update_store(&self, store: &Store) -> Result<(), String> {
        self.put_json(&format!("/v1/stores/{}", store.id), store).await
    }
    async fn delete_store(&self, id: &str) -> Result<(), String> {
        self.delete_path(&format!("/v1/stores/{}", id)).await
    }
    async fn list_stores(&self) -> Result<Vec<Store>, String> {
        self.get_json("/v1/stores").await
    }

    async fn insert_driver(&self, driver: &Driver) -> Result<(), String> {
        self.post_json("/v1/drivers", driver).await
    }
    async fn update_driver(&self, driver: &Driver) -> Result<(), String> {
        self.put_json(&format!("/v1/drivers/{}", driver.id), driver).await
    }
    async fn delete_driver(&self, id: &str) -> Result<(), String> {
        self.delete_path(&format!("/v1/drivers/{}", id)).await
    }
    async fn list_drivers(&self) -> Result<Vec<Driver>, String> {
        self.get_json("/v1/drivers").await
    }

    async fn insert_schedule(&self, schedule: &Schedule) -> Result<(), String> {
        self.post_json("/v1/schedules", schedule).await
    }
    async fn update_schedule(&self, schedule: &Schedule) -> Result<(), String> {
        self.put_json(&format!("/v1/schedules/{}", schedule.id), schedule)
            .await
    }
    async fn delete_schedule(&self, id: &str) -> Result<(), String> {
        self.delete_path(&format!("/v1/schedules/{}", id)).await
    }
    async fn clear_schedules(&self) -> Result<(), String> {
        log::warn!("🗑️ Vaciando TODAS las asignaciones en el backend");
        self.delete_path("/v1/schedules").await
    }
    async fn list_schedules(&self) -> Result<Vec<Schedule>, String> {
        self.get_json("/v1/schedules").await
    }

    async fn insert_incident(&self, incident: &Incident) -> Result<(), String> {
        self.post_json("/v1/incidents", incident).await
    }
    async fn update_incident(&self, incident: &Incident) -> Result<(), String> {
        self.put_json(&format!("/v1/incidents/{}", incident.id), incident)
            .await
    }
    async fn delete_incident(&self, id: &str) -> Result<(), String> {
        self.delete_path(&format!("/v1/incidents/{}", id)).await
    }
    async fn list_incidents(&self) -> Result<Vec<Incident>, String> {
        self.get_json("/v1/incidents").await
    }

    async fn insert_note(&self, note: &Note) -> Result<(), String> {
        self.post_json("/v1/notes", note).await
    }
    async fn update_note(&self, note: &Note) -> Result<(), String> {
        self.put_json(&format!("/v1/notes/{}", note.id), note).await
    }
    async fn delete_note(&self, id: &str) -> Result<(), String> {
        self.delete_path(&format!("/v1/notes/{}", id)).await
    }
    async fn list_notes(&self) -> Result<Vec<Note>, String> {
        self.get_json("/v1/notes").await
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}
