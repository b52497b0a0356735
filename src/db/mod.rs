pub mod connection;
pub mod memory_store;
pub mod migrations;
pub mod models;
pub mod pg_store;
pub mod store;

pub use memory_store::MemoryStore;
pub use pg_store::PgStore;
pub use store::{JobBoardStore, StoreError};
