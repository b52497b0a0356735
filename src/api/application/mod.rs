pub mod models;
pub mod dto;
pub mod handlers;
pub mod schema;
pub mod service;

pub use service::ApplicationService;
