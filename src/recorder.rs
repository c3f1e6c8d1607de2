// Export recorder
// Writes one reconciled asset to the store in a single transaction

use rusqlite::TransactionBehavior;
use thiserror::Error;

use crate::reconcile::RowStatus;
use crate::state::queries::{insert_matte_id_record, insert_object_id_record, object_id_exists};
use crate::state::{DbConnection, DbError, ExportResult};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Object ID {0} already exists in the database")]
    ObjectIdAlreadyExists(i64),
    #[error("Database error: {0}")]
    Db(#[from] DbError),
}

impl From<rusqlite::Error> for ExportError {
    fn from(error: rusqlite::Error) -> Self {
        ExportError::Db(DbError::Sqlite(error))
    }
}

// Color tag written for rows without a preset tag
const NO_TAG: &str = "-";

/// Record an asset's object ID and its ready matte IDs.
///
/// The object ID is re-checked inside an immediate transaction, so a
/// concurrent session that committed it first makes this call fail without
/// writing anything. The ObjectID row lists every row's matte ID; MatteID
/// rows are written only for `Ready` rows.
pub fn export_assignment(
    db: &DbConnection,
    object_id: i64,
    asset_name: &str,
    asset_path: &str,
    owner: &str,
    rows: &[RowStatus],
) -> Result<ExportResult, ExportError> {
    log::info!("Start export of {} as object ID {}", asset_name, object_id);

    let mut conn = db.lock();
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

    if object_id_exists(&tx, object_id)? {
        log::warn!("Object ID {} exists in database, export refused", object_id);
        return Err(ExportError::ObjectIdAlreadyExists(object_id));
    }

    let matte_ids: Vec<i64> = rows.iter().map(|row| row.matte_id).collect();
    insert_object_id_record(&tx, object_id, asset_name, asset_path, owner, &matte_ids)?;
    log::info!(
        "Add object ID {} {} {} {} {:?}",
        object_id,
        asset_name,
        asset_path,
        owner,
        matte_ids
    );

    let mut written = 0;
    let mut skipped = 0;
    for row in rows {
        if row.status.is_ready() {
            let color_tag = if row.tag.is_empty() { NO_TAG } else { row.tag.as_str() };
            insert_matte_id_record(&tx, row.matte_id, color_tag, &row.multi_matte_name, &row.material)?;
            written += 1;
            log::info!("Write matte ID {} {} {}", row.matte_id, row.multi_matte_name, row.material);
        } else {
            skipped += 1;
            log::info!(
                "Skip matte ID {} {} ({})",
                row.matte_id,
                row.material,
                row.status.display_name()
            );
        }
    }

    tx.commit()?;
    log::info!("Export complete: {} written, {} skipped", written, skipped);

    Ok(ExportResult {
        object_id,
        object_id_written: true,
        matte_ids_written: written,
        matte_ids_skipped: skipped,
    })
}
