// Data models for the matte ID store
use serde::{Deserialize, Serialize};
use std::num::ParseIntError;

/// One exported asset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectIdRecord {
    pub id: i64,
    pub object_id: i64,
    pub asset_name: String,
    pub asset_path: String,
    pub owner: String,
    /// Every candidate matte ID of the export, including skipped ones
    pub matte_ids: Vec<i64>,
}

/// One exported sub-material slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatteIdRecord {
    pub id: i64,
    pub matte_id: i64,
    pub color_tag: String,
    pub multi_matte_name: String,
    pub material_name: String,
}

/// Outcome of one export call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportResult {
    pub object_id: i64,
    pub object_id_written: bool,
    pub matte_ids_written: usize,
    pub matte_ids_skipped: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableCounts {
    pub object_ids: usize,
    pub matte_ids: usize,
}

/// Render matte IDs the way the `matteIDs` column stores them: `[1041, 1042]`
pub fn format_matte_ids(ids: &[i64]) -> String {
    let parts: Vec<String> = ids.iter().map(|id| id.to_string()).collect();
    format!("[{}]", parts.join(", "))
}

/// Parse a `matteIDs` column value.
///
/// Accepts quoted entries (`['1041', '1042']`) as written by older tools.
pub fn parse_matte_ids(s: &str) -> Result<Vec<i64>, ParseIntError> {
    s.trim()
        .trim_start_matches('[')
        .trim_end_matches(']')
        .split(',')
        .map(|part| part.trim().trim_matches(|c| c == '\'' || c == '"'))
        .filter(|part| !part.is_empty())
        .map(|part| part.parse::<i64>())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_matte_ids() {
        assert_eq!(format_matte_ids(&[1041, 1042, 77]), "[1041, 1042, 77]");
        assert_eq!(format_matte_ids(&[]), "[]");
    }

    #[test]
    fn test_parse_matte_ids() {
        assert_eq!(parse_matte_ids("[1041, 1042]").unwrap(), vec![1041, 1042]);
        assert_eq!(parse_matte_ids("['1041', '1042']").unwrap(), vec![1041, 1042]);
        assert_eq!(parse_matte_ids("[]").unwrap(), Vec::<i64>::new());
        assert!(parse_matte_ids("[10x1]").is_err());
    }
}
