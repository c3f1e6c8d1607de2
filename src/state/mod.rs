// State management module
// Handles the per-project SQLite store and its file system location

pub mod db;
pub mod models;
pub mod queries;
pub mod storage;

pub use db::{open_project_db, DbConnection, DbError, DbResult};
pub use models::{ExportResult, MatteIdRecord, ObjectIdRecord, TableCounts};
pub use queries::{
    committed_matte_ids, committed_object_ids, delete_matte_ids, delete_object_ids,
    find_matte_id_records, get_object_id_record, get_records_by_asset_name,
    list_object_id_records, table_counts,
};
pub use storage::StorageError;
