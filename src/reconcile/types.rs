// Reconciliation types
// Live material assignments, per-row statuses and preset coverage

use serde::{Deserialize, Serialize};

/// A material in the scene and the matte ID currently assigned to it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiveAssignment {
    pub material: String,
    pub id: i64,
}

impl LiveAssignment {
    pub fn new(material: &str, id: i64) -> Self {
        LiveAssignment {
            material: material.to_string(),
            id,
        }
    }
}

/// Classification of one live material, highest priority first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatteStatus {
    /// Already committed to the database; cannot be exported again
    InDatabase,

    /// Another material in the scene claims the same ID
    DuplicatedId,

    /// ID is not one of the asset's preset matte IDs
    WrongIdSetting,

    /// Eligible for export
    Ready,
}

impl MatteStatus {
    /// Human-readable label for table display
    pub fn display_name(&self) -> &'static str {
        match self {
            MatteStatus::InDatabase => "In Database",
            MatteStatus::DuplicatedId => "Duplicated ID",
            MatteStatus::WrongIdSetting => "Wrong ID Setting",
            MatteStatus::Ready => "Ready",
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, MatteStatus::Ready)
    }
}

/// Reconciled view of one live material
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowStatus {
    pub material: String,
    pub matte_id: i64,
    pub status: MatteStatus,
    /// Preset tag for `matte_id`, empty when the ID matches no preset
    pub tag: String,
    /// Resolved multi-matte name, empty when the ID matches no preset
    pub multi_matte_name: String,
}

/// Columns of the material table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowField {
    Material,
    MatteId,
    Tag,
    Status,
    MultiMatte,
}

impl RowField {
    /// Display order of the material table
    pub const ALL: [RowField; 5] = [
        RowField::Material,
        RowField::MatteId,
        RowField::Tag,
        RowField::Status,
        RowField::MultiMatte,
    ];

    pub fn header(&self) -> &'static str {
        match self {
            RowField::Material => "Material",
            RowField::MatteId => "ID",
            RowField::Tag => "Tag",
            RowField::Status => "Status",
            RowField::MultiMatte => "MultiMatte",
        }
    }
}

impl RowStatus {
    /// Text of one column
    pub fn field(&self, field: RowField) -> String {
        match field {
            RowField::Material => self.material.clone(),
            RowField::MatteId => self.matte_id.to_string(),
            RowField::Tag => self.tag.clone(),
            RowField::Status => self.status.display_name().to_string(),
            RowField::MultiMatte => self.multi_matte_name.clone(),
        }
    }
}

/// Whether a preset slot is realized by some material in the scene
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotCoverage {
    pub matte_id: i64,
    pub tag: String,
    pub multi_matte_name: String,
    pub assigned: bool,
}

impl SlotCoverage {
    pub fn status_label(&self) -> &'static str {
        if self.assigned {
            "Assigned"
        } else {
            "Open"
        }
    }
}

/// Outcome of the pre-export check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportCheck {
    pub object_id: i64,
    /// False when the object ID is already committed
    pub eligible: bool,
    pub ready: usize,
    pub skipped: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_fields() {
        let row = RowStatus {
            material: "skin_mtl".to_string(),
            matte_id: 1041,
            status: MatteStatus::Ready,
            tag: "skin".to_string(),
            multi_matte_name: "MM_hero_Body".to_string(),
        };

        let cells: Vec<String> = RowField::ALL.iter().map(|f| row.field(*f)).collect();
        assert_eq!(cells, vec!["skin_mtl", "1041", "skin", "Ready", "MM_hero_Body"]);
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(MatteStatus::InDatabase.display_name(), "In Database");
        assert_eq!(MatteStatus::WrongIdSetting.display_name(), "Wrong ID Setting");
        assert!(MatteStatus::Ready.is_ready());
        assert!(!MatteStatus::DuplicatedId.is_ready());
    }
}
