//! Request and response bodies, decoupled from the storage entities.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Deserializer, Serialize};

use models::activity::{self, ActivityType, NewActivity};
use models::client::{self, NewClient};
use models::service::{self as service_model, NewService, ServiceHealth, ServicePatch, ServiceStatus};
use service::chat::ChatSettings;
use service::pagination::Page;

/// Distinguishes an explicit `null` (`Some(None)`) from an absent field (`None`).
fn double_option<'de, D, T>(d: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(d).map(Some)
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    pub skip: Option<u64>,
    pub limit: Option<u64>,
}

impl From<ListQuery> for Page {
    fn from(q: ListQuery) -> Self { Page::new(q.skip, q.limit) }
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ActivityQuery {
    pub service_id: Option<i32>,
    pub skip: Option<u64>,
    pub limit: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct ServiceCreate {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: ServiceStatus,
    #[serde(default)]
    pub health: ServiceHealth,
    pub client_id: i32,
}

impl From<ServiceCreate> for NewService {
    fn from(s: ServiceCreate) -> Self {
        NewService {
            name: s.name,
            description: s.description,
            status: s.status,
            health: s.health,
            client_id: s.client_id,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ServiceUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    #[serde(default)]
    pub status: Option<ServiceStatus>,
    #[serde(default)]
    pub health: Option<ServiceHealth>,
    #[serde(default)]
    pub client_id: Option<i32>,
}

impl From<ServiceUpdate> for ServicePatch {
    fn from(u: ServiceUpdate) -> Self {
        ServicePatch {
            name: u.name,
            description: u.description,
            status: u.status,
            health: u.health,
            client_id: u.client_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceOut {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub status: ServiceStatus,
    pub health: ServiceHealth,
    pub client_id: i32,
    pub created_at: DateTime<FixedOffset>,
    pub updated_at: Option<DateTime<FixedOffset>>,
}

impl From<service_model::Model> for ServiceOut {
    fn from(m: service_model::Model) -> Self {
        ServiceOut {
            id: m.id,
            name: m.name,
            description: m.description,
            status: m.status,
            health: m.health,
            client_id: m.client_id,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ClientCreate {
    pub name: String,
    #[serde(default)]
    pub contact_name: Option<String>,
    #[serde(default)]
    pub contact_email: Option<String>,
    #[serde(default)]
    pub contact_phone: Option<String>,
}

impl From<ClientCreate> for NewClient {
    fn from(c: ClientCreate) -> Self {
        NewClient {
            name: c.name,
            contact_name: c.contact_name,
            contact_email: c.contact_email,
            contact_phone: c.contact_phone,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientOut {
    pub id: i32,
    pub name: String,
    pub contact_name: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub created_at: DateTime<FixedOffset>,
    pub updated_at: Option<DateTime<FixedOffset>>,
}

impl From<client::Model> for ClientOut {
    fn from(m: client::Model) -> Self {
        ClientOut {
            id: m.id,
            name: m.name,
            contact_name: m.contact_name,
            contact_email: m.contact_email,
            contact_phone: m.contact_phone,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientWithServices {
    #[serde(flatten)]
    pub client: ClientOut,
    pub services: Vec<ServiceOut>,
}

#[derive(Debug, Deserialize)]
pub struct ActivityCreate {
    pub activity_type: ActivityType,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub service_id: Option<i32>,
}

impl From<ActivityCreate> for NewActivity {
    fn from(a: ActivityCreate) -> Self {
        NewActivity { activity_type: a.activity_type, description: a.description, service_id: a.service_id }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityOut {
    pub id: i32,
    pub activity_type: ActivityType,
    pub description: Option<String>,
    pub service_id: Option<i32>,
    pub user_name: Option<String>,
    pub timestamp: DateTime<FixedOffset>,
}

impl From<activity::Model> for ActivityOut {
    fn from(m: activity::Model) -> Self {
        ActivityOut {
            id: m.id,
            activity_type: m.activity_type,
            description: m.description,
            service_id: m.service_id,
            user_name: m.user_name,
            timestamp: m.timestamp,
        }
    }
}

/// Chat message plus optional per-call provider credentials.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default)]
    pub deployment_name: Option<String>,
    #[serde(default)]
    pub api_version: Option<String>,
}

impl ChatRequest {
    pub fn credentials(&self) -> ChatSettings {
        ChatSettings {
            endpoint: self.endpoint.clone(),
            api_key: self.api_key.clone(),
            deployment_name: self.deployment_name.clone(),
            api_version: self.api_version.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_create_applies_defaults() {
        let s: ServiceCreate = serde_json::from_str(r#"{"name":"Backup","client_id":1}"#).unwrap();
        assert_eq!(s.status, ServiceStatus::Planning);
        assert_eq!(s.health, ServiceHealth::Inactive);
        assert!(s.description.is_none());
    }

    #[test]
    fn service_update_tells_null_from_absent() {
        let absent: ServiceUpdate = serde_json::from_str(r#"{"status":"active"}"#).unwrap();
        assert_eq!(absent.description, None);
        assert_eq!(absent.status, Some(ServiceStatus::Active));

        let cleared: ServiceUpdate = serde_json::from_str(r#"{"description":null}"#).unwrap();
        assert_eq!(cleared.description, Some(None));
    }

    #[test]
    fn unknown_status_is_rejected() {
        assert!(serde_json::from_str::<ServiceCreate>(r#"{"name":"x","client_id":1,"status":"paused"}"#).is_err());
    }
}
