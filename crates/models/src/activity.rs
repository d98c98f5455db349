use sea_orm::{entity::prelude::*, sea_query::StringLen};
use serde::{Deserialize, Serialize};

use crate::service;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "snake_case")]
pub enum ActivityType {
    #[sea_orm(string_value = "service_created")]
    ServiceCreated,
    #[sea_orm(string_value = "service_updated")]
    ServiceUpdated,
    #[sea_orm(string_value = "service_deleted")]
    ServiceDeleted,
    #[sea_orm(string_value = "maintenance_scheduled")]
    MaintenanceScheduled,
    #[sea_orm(string_value = "incident_reported")]
    IncidentReported,
    #[sea_orm(string_value = "user_added")]
    UserAdded,
    #[sea_orm(string_value = "security_update")]
    SecurityUpdate,
}

impl ActivityType {
    /// Lifecycle entries are written only as a side effect of service mutations.
    pub fn is_lifecycle(self) -> bool {
        matches!(
            self,
            ActivityType::ServiceCreated | ActivityType::ServiceUpdated | ActivityType::ServiceDeleted
        )
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "activities")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub activity_type: ActivityType,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub service_id: Option<i32>,
    pub user_name: Option<String>,
    pub timestamp: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Service }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Service => Entity::belongs_to(service::Entity)
                .from(Column::ServiceId)
                .to(service::Column::Id)
                .into(),
        }
    }
}

impl Related<service::Entity> for Entity {
    fn to() -> RelationDef { Relation::Service.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// Manually recorded activity (maintenance, incidents, ...).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewActivity {
    pub activity_type: ActivityType,
    pub description: Option<String>,
    pub service_id: Option<i32>,
}
