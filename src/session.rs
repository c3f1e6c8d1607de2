// Session state
// Range policy, category selection, display name and the last database read

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::allocation::{
    matte_id_block, next_available_object_id, AllocationError, Category, RangePolicy,
};
use crate::presets::{resolve_preset, ResolvedPreset};
use crate::reconcile::{self, ExportCheck, LiveAssignment, RowStatus, SlotCoverage};
use crate::state::{self, DbConnection, DbResult, ObjectIdRecord};

/// Everything read from the store in one refresh
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DbSnapshot {
    pub records: Vec<ObjectIdRecord>,
    pub object_ids: BTreeSet<i64>,
    pub matte_ids: BTreeSet<i64>,
}

impl DbSnapshot {
    pub fn read(db: &DbConnection) -> DbResult<Self> {
        Ok(DbSnapshot {
            records: state::list_object_id_records(db)?,
            object_ids: state::committed_object_ids(db)?,
            matte_ids: state::committed_matte_ids(db)?,
        })
    }

    /// Object ID already recorded for an asset
    pub fn booked_object_id(&self, asset_name: &str) -> Option<i64> {
        self.records
            .iter()
            .find(|record| record.asset_name == asset_name)
            .map(|record| record.object_id)
    }
}

/// Object ID shown for the current asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "object_id", rename_all = "lowercase")]
pub enum ObjectIdSelection {
    /// The asset was exported before under this ID
    Booked(i64),

    /// Next free ID of the category
    Available(i64),
}

impl ObjectIdSelection {
    pub fn id(&self) -> i64 {
        match self {
            ObjectIdSelection::Booked(id) | ObjectIdSelection::Available(id) => *id,
        }
    }
}

/// Result of reconciling one scene against the session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reconciliation {
    pub object_id: i64,
    pub matte_id_block: Vec<i64>,
    pub rows: Vec<RowStatus>,
    pub coverage: Vec<SlotCoverage>,
    pub check: ExportCheck,
}

pub struct Session {
    pub policy: RangePolicy,
    pub category: Option<Category>,
    pub display_name: String,
    pub snapshot: DbSnapshot,
}

impl Session {
    pub fn new(policy: RangePolicy, category: Option<Category>, display_name: String) -> Self {
        Session {
            policy,
            category,
            display_name,
            snapshot: DbSnapshot::default(),
        }
    }

    /// Replace the snapshot with a fresh read of the store
    pub fn refresh(&mut self, db: &DbConnection) -> DbResult<()> {
        self.snapshot = DbSnapshot::read(db)?;
        log::debug!(
            "Snapshot: {} object IDs, {} matte IDs",
            self.snapshot.object_ids.len(),
            self.snapshot.matte_ids.len()
        );
        Ok(())
    }

    pub fn category(&self) -> Result<Category, AllocationError> {
        Category::require(self.category)
    }

    /// The asset's recorded object ID, or the next free one
    pub fn select_object_id(&self, asset_name: &str) -> Result<ObjectIdSelection, AllocationError> {
        if let Some(id) = self.snapshot.booked_object_id(asset_name) {
            log::info!("{} is booked as object ID {}", asset_name, id);
            return Ok(ObjectIdSelection::Booked(id));
        }

        let category = self.category()?;
        let id = next_available_object_id(category, self.policy.range(category), &self.snapshot.object_ids)?;
        log::info!("Next available {} object ID: {}", category, id);
        Ok(ObjectIdSelection::Available(id))
    }

    pub fn preset_slots(&self, object_id: i64) -> Result<Vec<ResolvedPreset>, AllocationError> {
        resolve_preset(self.category, object_id, &self.display_name)
    }

    pub fn reconcile(&self, object_id: i64, live: &[LiveAssignment]) -> Result<Reconciliation, AllocationError> {
        let category = self.category()?;
        let slots = self.preset_slots(object_id)?;

        let rows = reconcile::reconcile(live, &slots, &self.snapshot.matte_ids);
        let live_ids: BTreeSet<i64> = live.iter().map(|a| a.id).collect();
        let coverage = reconcile::preset_coverage(&slots, &live_ids);
        let check = reconcile::export_check(object_id, &self.snapshot.object_ids, &rows);

        Ok(Reconciliation {
            object_id,
            matte_id_block: matte_id_block(object_id, self.policy.range(category).step),
            rows,
            coverage,
            check,
        })
    }
}
