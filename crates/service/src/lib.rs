//! Service layer providing the catalog's persistence operations on top of models.
//! - Service mutations write their audit activity in the same transaction.
//! - Clients and activities are created and read only.
//! - `chat` forwards single messages to an Azure OpenAI deployment.

pub mod errors;
pub mod pagination;
pub mod actor;
pub mod client_service;
pub mod service_catalog;
pub mod activity_service;
pub mod chat;
#[cfg(test)]
pub mod test_support;
