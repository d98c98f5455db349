use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct MessageDoc { pub message: String }

#[derive(ToSchema)]
pub struct ServiceCreateDoc {
    pub name: String,
    pub description: Option<String>,
    /// planning | active | maintenance | deprecated | retired
    pub status: Option<String>,
    /// healthy | warning | critical | inactive
    pub health: Option<String>,
    pub client_id: i32,
}

#[derive(ToSchema)]
pub struct ServiceUpdateDoc {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub health: Option<String>,
    pub client_id: Option<i32>,
}

#[derive(ToSchema)]
pub struct ServiceDoc {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub status: String,
    pub health: String,
    pub client_id: i32,
    pub created_at: String,
    pub updated_at: Option<String>,
}

#[derive(ToSchema)]
pub struct ClientCreateDoc {
    pub name: String,
    pub contact_name: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
}

#[derive(ToSchema)]
pub struct ClientDoc {
    pub id: i32,
    pub name: String,
    pub contact_name: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub created_at: String,
    pub updated_at: Option<String>,
}

#[derive(ToSchema)]
pub struct ClientWithServicesDoc {
    pub id: i32,
    pub name: String,
    pub contact_name: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub created_at: String,
    pub updated_at: Option<String>,
    pub services: Vec<ServiceDoc>,
}

#[derive(ToSchema)]
pub struct ActivityCreateDoc {
    /// maintenance_scheduled | incident_reported | user_added | security_update
    pub activity_type: String,
    pub description: Option<String>,
    pub service_id: Option<i32>,
}

#[derive(ToSchema)]
pub struct ActivityDoc {
    pub id: i32,
    pub activity_type: String,
    pub description: Option<String>,
    pub service_id: Option<i32>,
    pub user_name: Option<String>,
    pub timestamp: String,
}

#[derive(ToSchema)]
pub struct ChatRequestDoc {
    pub message: String,
    pub api_key: Option<String>,
    pub endpoint: Option<String>,
    pub deployment_name: Option<String>,
    pub api_version: Option<String>,
}

#[derive(ToSchema)]
pub struct ChatResponseDoc { pub response: String }

#[derive(ToSchema)]
pub struct ChatHealthDoc {
    /// healthy | error
    pub status: String,
    pub message: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::root,
        crate::routes::health,
        crate::routes::services::list,
        crate::routes::services::create,
        crate::routes::services::get,
        crate::routes::services::update,
        crate::routes::services::delete,
        crate::routes::services::activities,
        crate::routes::clients::list,
        crate::routes::clients::create,
        crate::routes::clients::get,
        crate::routes::clients::services,
        crate::routes::activities::list,
        crate::routes::activities::create,
        crate::routes::chat::chat,
        crate::routes::chat::health,
    ),
    components(
        schemas(
            HealthResponse,
            MessageDoc,
            ServiceCreateDoc,
            ServiceUpdateDoc,
            ServiceDoc,
            ClientCreateDoc,
            ClientDoc,
            ClientWithServicesDoc,
            ActivityCreateDoc,
            ActivityDoc,
            ChatRequestDoc,
            ChatResponseDoc,
            ChatHealthDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "services"),
        (name = "clients"),
        (name = "activities"),
        (name = "chat")
    )
)]
pub struct ApiDoc;
