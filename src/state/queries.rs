// Database CRUD operations
use rusqlite::types::Type;
use rusqlite::{params, Connection, Row};
use std::collections::BTreeSet;

use super::db::{DbConnection, DbResult};
use super::models::{format_matte_ids, parse_matte_ids, MatteIdRecord, ObjectIdRecord, TableCounts};

// ==================== ROW MAPPING ====================

fn object_id_from_row(row: &Row<'_>) -> rusqlite::Result<ObjectIdRecord> {
    let raw_ids: String = row.get::<_, Option<String>>(5)?.unwrap_or_default();
    let matte_ids = parse_matte_ids(&raw_ids)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(5, Type::Text, Box::new(e)))?;

    Ok(ObjectIdRecord {
        id: row.get(0)?,
        object_id: row.get(1)?,
        asset_name: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
        asset_path: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
        owner: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
        matte_ids,
    })
}

fn matte_id_from_row(row: &Row<'_>) -> rusqlite::Result<MatteIdRecord> {
    Ok(MatteIdRecord {
        id: row.get(0)?,
        matte_id: row.get(1)?,
        color_tag: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
        multi_matte_name: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
        material_name: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
    })
}

// ==================== INSERTS ====================
// These take a bare connection so the recorder can run them inside its transaction.

/// Insert one ObjectID row, returning its rowid
pub fn insert_object_id_record(
    conn: &Connection,
    object_id: i64,
    asset_name: &str,
    asset_path: &str,
    owner: &str,
    matte_ids: &[i64],
) -> rusqlite::Result<i64> {
    conn.execute(
        "INSERT INTO ObjectID (objectID, assetName, assetPath, owner, matteIDs)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![object_id, asset_name, asset_path, owner, format_matte_ids(matte_ids)],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Insert one MatteID row, returning its rowid
pub fn insert_matte_id_record(
    conn: &Connection,
    matte_id: i64,
    color_tag: &str,
    multi_matte_name: &str,
    material_name: &str,
) -> rusqlite::Result<i64> {
    conn.execute(
        "INSERT INTO MatteID (matteID, colorTag, multiMatteName, materialName)
         VALUES (?1, ?2, ?3, ?4)",
        params![matte_id, color_tag, multi_matte_name, material_name],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Whether any ObjectID row uses `object_id`
pub fn object_id_exists(conn: &Connection, object_id: i64) -> rusqlite::Result<bool> {
    conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM ObjectID WHERE objectID = ?1)",
        [object_id],
        |row| row.get(0),
    )
}

// ==================== OBJECT ID QUERIES ====================

/// List all ObjectID rows in insertion order
pub fn list_object_id_records(db: &DbConnection) -> DbResult<Vec<ObjectIdRecord>> {
    let conn = db.lock();
    let mut stmt = conn.prepare(
        "SELECT id, objectID, assetName, assetPath, owner, matteIDs
         FROM ObjectID ORDER BY id",
    )?;

    let records = stmt
        .query_map([], object_id_from_row)?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(records)
}

/// Get the first ObjectID row for an object ID
pub fn get_object_id_record(db: &DbConnection, object_id: i64) -> DbResult<Option<ObjectIdRecord>> {
    let conn = db.lock();
    let mut stmt = conn.prepare(
        "SELECT id, objectID, assetName, assetPath, owner, matteIDs
         FROM ObjectID WHERE objectID = ?1 ORDER BY id LIMIT 1",
    )?;

    let result = stmt.query_row([object_id], object_id_from_row);

    match result {
        Ok(record) => Ok(Some(record)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Get all ObjectID rows recorded for an asset name
pub fn get_records_by_asset_name(db: &DbConnection, asset_name: &str) -> DbResult<Vec<ObjectIdRecord>> {
    let conn = db.lock();
    let mut stmt = conn.prepare(
        "SELECT id, objectID, assetName, assetPath, owner, matteIDs
         FROM ObjectID WHERE assetName = ?1 ORDER BY id",
    )?;

    let records = stmt
        .query_map([asset_name], object_id_from_row)?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(records)
}

/// Every object ID currently committed
pub fn committed_object_ids(db: &DbConnection) -> DbResult<BTreeSet<i64>> {
    let conn = db.lock();
    let mut stmt = conn.prepare("SELECT objectID FROM ObjectID WHERE objectID IS NOT NULL")?;

    let ids = stmt
        .query_map([], |row| row.get::<_, i64>(0))?
        .collect::<Result<BTreeSet<_>, _>>()?;

    Ok(ids)
}

// ==================== MATTE ID QUERIES ====================

/// Every matte ID currently committed
pub fn committed_matte_ids(db: &DbConnection) -> DbResult<BTreeSet<i64>> {
    let conn = db.lock();
    let mut stmt = conn.prepare("SELECT matteID FROM MatteID WHERE matteID IS NOT NULL")?;

    let ids = stmt
        .query_map([], |row| row.get::<_, i64>(0))?
        .collect::<Result<BTreeSet<_>, _>>()?;

    Ok(ids)
}

/// Committed MatteID rows for any of `matte_ids`, ordered by matte ID
pub fn find_matte_id_records(db: &DbConnection, matte_ids: &[i64]) -> DbResult<Vec<MatteIdRecord>> {
    let conn = db.lock();
    let mut stmt = conn.prepare(
        "SELECT id, matteID, colorTag, multiMatteName, materialName
         FROM MatteID WHERE matteID = ?1 ORDER BY id",
    )?;

    let mut wanted: Vec<i64> = matte_ids.to_vec();
    wanted.sort_unstable();
    wanted.dedup();

    let mut records = Vec::new();
    for matte_id in wanted {
        let rows = stmt
            .query_map([matte_id], matte_id_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        records.extend(rows);
    }

    Ok(records)
}

// ==================== MAINTENANCE ====================

/// Row counts of both tables
pub fn table_counts(db: &DbConnection) -> DbResult<TableCounts> {
    let conn = db.lock();
    let object_ids: i64 = conn.query_row("SELECT COUNT(*) FROM ObjectID", [], |row| row.get(0))?;
    let matte_ids: i64 = conn.query_row("SELECT COUNT(*) FROM MatteID", [], |row| row.get(0))?;

    Ok(TableCounts {
        object_ids: object_ids as usize,
        matte_ids: matte_ids as usize,
    })
}

/// Delete ObjectID rows by object ID, returning the number of rows removed
pub fn delete_object_ids(db: &DbConnection, object_ids: &[i64]) -> DbResult<usize> {
    let mut conn = db.lock();
    let tx = conn.transaction()?;
    let mut removed = 0;
    for object_id in object_ids {
        removed += tx.execute("DELETE FROM ObjectID WHERE objectID = ?1", [object_id])?;
    }
    tx.commit()?;
    Ok(removed)
}

/// Delete MatteID rows by matte ID, returning the number of rows removed
pub fn delete_matte_ids(db: &DbConnection, matte_ids: &[i64]) -> DbResult<usize> {
    let mut conn = db.lock();
    let tx = conn.transaction()?;
    let mut removed = 0;
    for matte_id in matte_ids {
        removed += tx.execute("DELETE FROM MatteID WHERE matteID = ?1", [matte_id])?;
    }
    tx.commit()?;
    Ok(removed)
}
