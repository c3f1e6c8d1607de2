// Reconciliation module
// Classifies scene materials against presets and the database

pub mod engine;
pub mod types;

pub use engine::{duplicated_ids, export_check, is_export_eligible, preset_coverage, reconcile};
pub use types::{ExportCheck, LiveAssignment, MatteStatus, RowField, RowStatus, SlotCoverage};
