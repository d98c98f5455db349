pub mod routes;
pub mod startup;
pub mod errors;
pub mod schemas;
pub mod openapi;

pub use startup::run;
