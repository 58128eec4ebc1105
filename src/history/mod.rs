/*!
 * Translation history persistence.
 *
 * Saved translations live in a SQLite database:
 * - `connection`: connection wrapper with async access
 * - `schema`: versioned table definitions
 * - `models`: the `HistoryRecord` row type
 * - `repository`: CRUD operations and the `HistoryStore` trait
 */

pub mod connection;
pub mod models;
pub mod repository;
pub mod schema;

pub use connection::DatabaseConnection;
pub use models::HistoryRecord;
pub use repository::{HistoryStore, Repository};
