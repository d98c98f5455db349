use sea_orm::{entity::prelude::*, Set};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{errors, service, validation::validate_name};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "clients")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub contact_name: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Services }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Services => Entity::has_many(service::Entity).into(),
        }
    }
}

impl Related<service::Entity> for Entity {
    fn to() -> RelationDef { Relation::Services.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// Fields accepted when registering a client.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NewClient {
    pub name: String,
    pub contact_name: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
}

pub fn validate_contact_email(email: Option<&str>) -> Result<(), errors::ModelError> {
    match email {
        Some(e) if !e.contains('@') => Err(errors::ModelError::Validation("invalid contact_email".into())),
        _ => Ok(()),
    }
}

pub async fn create<C: ConnectionTrait>(db: &C, input: NewClient) -> Result<Model, errors::ModelError> {
    validate_name(&input.name)?;
    validate_contact_email(input.contact_email.as_deref())?;
    let am = ActiveModel {
        name: Set(input.name),
        contact_name: Set(input.contact_name),
        contact_email: Set(input.contact_email),
        contact_phone: Set(input.contact_phone),
        created_at: Set(Utc::now().into()),
        updated_at: Set(None),
        ..Default::default()
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}
