// Database service module
// SQLite connection and schema management

mod connection;
mod migrations;
mod schema;

pub use connection::{Database, IN_MEMORY};
