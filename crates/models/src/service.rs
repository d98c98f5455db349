use sea_orm::{entity::prelude::*, sea_query::StringLen};
use serde::{Deserialize, Serialize};

use crate::{activity, client};

/// Lifecycle stage of a managed service.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "snake_case")]
pub enum ServiceStatus {
    #[sea_orm(string_value = "planning")]
    Planning,
    #[sea_orm(string_value = "active")]
    Active,
    #[sea_orm(string_value = "maintenance")]
    Maintenance,
    #[sea_orm(string_value = "deprecated")]
    Deprecated,
    #[sea_orm(string_value = "retired")]
    Retired,
}

impl Default for ServiceStatus {
    fn default() -> Self { ServiceStatus::Planning }
}

/// Operational health indicator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "snake_case")]
pub enum ServiceHealth {
    #[sea_orm(string_value = "healthy")]
    Healthy,
    #[sea_orm(string_value = "warning")]
    Warning,
    #[sea_orm(string_value = "critical")]
    Critical,
    #[sea_orm(string_value = "inactive")]
    Inactive,
}

impl Default for ServiceHealth {
    fn default() -> Self { ServiceHealth::Inactive }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "services")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub status: ServiceStatus,
    pub health: ServiceHealth,
    pub client_id: i32,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Client, Activities }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Client => Entity::belongs_to(client::Entity)
                .from(Column::ClientId)
                .to(client::Column::Id)
                .into(),
            Relation::Activities => Entity::has_many(activity::Entity).into(),
        }
    }
}

impl Related<client::Entity> for Entity {
    fn to() -> RelationDef { Relation::Client.def() }
}

impl Related<activity::Entity> for Entity {
    fn to() -> RelationDef { Relation::Activities.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// Fields accepted when creating a service; status and health default.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NewService {
    pub name: String,
    pub description: Option<String>,
    pub status: ServiceStatus,
    pub health: ServiceHealth,
    pub client_id: i32,
}

/// Partial update. `None` leaves a field untouched; `description: Some(None)` clears it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ServicePatch {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub status: Option<ServiceStatus>,
    pub health: Option<ServiceHealth>,
    pub client_id: Option<i32>,
}


