// Reconciliation engine
// Joins scene assignments, preset slots and committed IDs into row statuses

use std::collections::{BTreeSet, HashMap, HashSet};

use crate::presets::ResolvedPreset;

use super::types::{ExportCheck, LiveAssignment, MatteStatus, RowStatus, SlotCoverage};

/// IDs claimed by more than one live material
pub fn duplicated_ids(live: &[LiveAssignment]) -> HashSet<i64> {
    let mut counts: HashMap<i64, usize> = HashMap::new();
    for assignment in live {
        *counts.entry(assignment.id).or_insert(0) += 1;
    }

    counts
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(id, _)| id)
        .collect()
}

/// Classify every live assignment, preserving input order.
///
/// Priority: committed > duplicated > outside presets > ready. A duplicated
/// ID that is also committed reports `InDatabase`.
pub fn reconcile(
    live: &[LiveAssignment],
    preset_slots: &[ResolvedPreset],
    committed_matte_ids: &BTreeSet<i64>,
) -> Vec<RowStatus> {
    let duplicates = duplicated_ids(live);
    let presets: HashMap<i64, &ResolvedPreset> =
        preset_slots.iter().map(|slot| (slot.matte_id, slot)).collect();

    live.iter()
        .map(|assignment| {
            let id = assignment.id;
            let preset = presets.get(&id);

            let status = if committed_matte_ids.contains(&id) {
                MatteStatus::InDatabase
            } else if duplicates.contains(&id) {
                MatteStatus::DuplicatedId
            } else if preset.is_none() {
                MatteStatus::WrongIdSetting
            } else {
                MatteStatus::Ready
            };

            RowStatus {
                material: assignment.material.clone(),
                matte_id: id,
                status,
                tag: preset.map(|p| p.tag.clone()).unwrap_or_default(),
                multi_matte_name: preset.map(|p| p.multi_matte_name.clone()).unwrap_or_default(),
            }
        })
        .collect()
}

/// Mark each preset slot as assigned or open
pub fn preset_coverage(preset_slots: &[ResolvedPreset], live_ids: &BTreeSet<i64>) -> Vec<SlotCoverage> {
    preset_slots
        .iter()
        .map(|slot| SlotCoverage {
            matte_id: slot.matte_id,
            tag: slot.tag.clone(),
            multi_matte_name: slot.multi_matte_name.clone(),
            assigned: live_ids.contains(&slot.matte_id),
        })
        .collect()
}

/// Pre-export check. Rows that are not ready are skipped, never fatal; only
/// an already committed object ID refuses the export.
pub fn export_check(object_id: i64, committed_object_ids: &BTreeSet<i64>, rows: &[RowStatus]) -> ExportCheck {
    let ready = rows.iter().filter(|r| r.status.is_ready()).count();

    ExportCheck {
        object_id,
        eligible: !committed_object_ids.contains(&object_id),
        ready,
        skipped: rows.len() - ready,
    }
}

pub fn is_export_eligible(object_id: i64, committed_object_ids: &BTreeSet<i64>, rows: &[RowStatus]) -> bool {
    export_check(object_id, committed_object_ids, rows).eligible
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allocation::Category;
    use crate::presets::resolve_preset;

    fn hero_presets() -> Vec<ResolvedPreset> {
        resolve_preset(Some(Category::Character), 1040, "hero").unwrap()
    }

    fn set(ids: &[i64]) -> BTreeSet<i64> {
        ids.iter().copied().collect()
    }

    #[test]
    fn test_ready_row_carries_preset_info() {
        let live = vec![LiveAssignment::new("skin_mtl", 1041)];
        let rows = reconcile(&live, &hero_presets(), &set(&[]));

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].status, MatteStatus::Ready);
        assert_eq!(rows[0].tag, "skin");
        assert_eq!(rows[0].multi_matte_name, "MM_hero_Body");
    }

    #[test]
    fn test_duplicated_ids() {
        let live = vec![
            LiveAssignment::new("matA", 1041),
            LiveAssignment::new("matB", 1041),
        ];
        let rows = reconcile(&live, &hero_presets(), &set(&[]));

        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.status == MatteStatus::DuplicatedId));
    }

    #[test]
    fn test_in_database_beats_duplicate() {
        let live = vec![
            LiveAssignment::new("matA", 1041),
            LiveAssignment::new("matB", 1041),
        ];
        let rows = reconcile(&live, &hero_presets(), &set(&[1041]));
        assert!(rows.iter().all(|r| r.status == MatteStatus::InDatabase));

        let single = vec![LiveAssignment::new("matA", 1041)];
        let rows = reconcile(&single, &hero_presets(), &set(&[1041]));
        assert_eq!(rows[0].status, MatteStatus::InDatabase);
    }

    #[test]
    fn test_wrong_id_setting() {
        let live = vec![
            LiveAssignment::new("stray_mtl", 1059),
            LiveAssignment::new("default_mtl", 0),
        ];
        let rows = reconcile(&live, &hero_presets(), &set(&[]));

        assert!(rows.iter().all(|r| r.status == MatteStatus::WrongIdSetting));
        assert!(rows.iter().all(|r| r.tag.is_empty() && r.multi_matte_name.is_empty()));
    }

    #[test]
    fn test_duplicate_beats_wrong_id() {
        let live = vec![
            LiveAssignment::new("matA", 5),
            LiveAssignment::new("matB", 5),
        ];
        let rows = reconcile(&live, &hero_presets(), &set(&[]));
        assert!(rows.iter().all(|r| r.status == MatteStatus::DuplicatedId));
    }

    #[test]
    fn test_reconcile_preserves_order() {
        let live = vec![
            LiveAssignment::new("eyes_mtl", 1043),
            LiveAssignment::new("skin_mtl", 1041),
            LiveAssignment::new("hair_mtl", 1042),
        ];
        let rows = reconcile(&live, &hero_presets(), &set(&[]));
        let materials: Vec<&str> = rows.iter().map(|r| r.material.as_str()).collect();
        assert_eq!(materials, vec!["eyes_mtl", "skin_mtl", "hair_mtl"]);
    }

    #[test]
    fn test_reconcile_idempotent() {
        let live = vec![
            LiveAssignment::new("skin_mtl", 1041),
            LiveAssignment::new("hair_mtl", 1042),
            LiveAssignment::new("copy_mtl", 1042),
            LiveAssignment::new("stray_mtl", 77),
        ];
        let presets = hero_presets();
        let committed = set(&[1041]);

        let first = reconcile(&live, &presets, &committed);
        let second = reconcile(&live, &presets, &committed);
        assert_eq!(first, second);
    }

    #[test]
    fn test_prop_rows_lookup_absolute_ids() {
        let presets = resolve_preset(Some(Category::Prop), 100010, "crate").unwrap();
        let live = vec![LiveAssignment::new("wood_mtl", 902)];
        let rows = reconcile(&live, &presets, &set(&[]));

        assert_eq!(rows[0].status, MatteStatus::Ready);
        assert_eq!(rows[0].tag, "wood");
        assert_eq!(rows[0].multi_matte_name, "MM_Prop_Hard");
    }

    #[test]
    fn test_preset_coverage() {
        let presets = hero_presets();
        let coverage = preset_coverage(&presets, &set(&[1041, 1043]));

        assert_eq!(coverage.len(), presets.len());
        assert!(coverage[0].assigned);
        assert!(!coverage[1].assigned);
        assert!(coverage[2].assigned);
        assert_eq!(coverage[1].status_label(), "Open");
        assert_eq!(coverage[2].status_label(), "Assigned");
    }

    #[test]
    fn test_export_check() {
        let live = vec![
            LiveAssignment::new("skin_mtl", 1041),
            LiveAssignment::new("stray_mtl", 77),
        ];
        let rows = reconcile(&live, &hero_presets(), &set(&[]));

        let check = export_check(1040, &set(&[1000, 1020]), &rows);
        assert!(check.eligible);
        assert_eq!(check.ready, 1);
        assert_eq!(check.skipped, 1);

        assert!(!is_export_eligible(1040, &set(&[1040]), &rows));
    }

    #[test]
    fn test_export_check_no_ready_rows_still_eligible() {
        let live = vec![LiveAssignment::new("stray_mtl", 77)];
        let rows = reconcile(&live, &hero_presets(), &set(&[]));
        assert!(is_export_eligible(1040, &set(&[]), &rows));
    }
}
