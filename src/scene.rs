// Scene snapshot
// JSON export of the host scene: asset identity and material ID assignments

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::reconcile::LiveAssignment;

#[derive(Debug, Error)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid scene snapshot: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Material not found in scene: {0}")]
    UnknownMaterial(String),
}

pub type SceneResult<T> = Result<T, SceneError>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneSnapshot {
    pub asset_name: String,
    #[serde(default)]
    pub asset_path: String,
    #[serde(default)]
    pub owner: String,
    /// Object ID stamped on the asset's rig group, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_id: Option<i64>,
    #[serde(default)]
    pub materials: Vec<LiveAssignment>,
}

impl SceneSnapshot {
    pub fn from_path(path: &Path) -> SceneResult<Self> {
        let bytes = fs::read(path)?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    pub fn save(&self, path: &Path) -> SceneResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    pub fn live_assignments(&self) -> &[LiveAssignment] {
        &self.materials
    }

    pub fn live_ids(&self) -> BTreeSet<i64> {
        self.materials.iter().map(|m| m.id).collect()
    }

    /// Set the matte ID of one material
    pub fn assign(&mut self, material: &str, matte_id: i64) -> SceneResult<()> {
        let entry = self
            .materials
            .iter_mut()
            .find(|m| m.material == material)
            .ok_or_else(|| SceneError::UnknownMaterial(material.to_string()))?;

        log::info!("Assign matte ID {} to {} (was {})", matte_id, material, entry.id);
        entry.id = matte_id;
        Ok(())
    }

    pub fn stamp_object_id(&mut self, object_id: i64) {
        log::info!("Assign object ID {} to {}", object_id, self.asset_name);
        self.object_id = Some(object_id);
    }
}

/// Display name used in multi-matte names: the second `_` token of the asset
/// name (`char_hero_rig` -> `hero`), or the whole name when there is none.
pub fn default_display_name(asset_name: &str) -> String {
    asset_name
        .split('_')
        .nth(1)
        .filter(|token| !token.is_empty())
        .unwrap_or(asset_name)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENE_JSON: &str = r#"{
        "asset_name": "char_hero_rig",
        "asset_path": "/assets/char/hero/hero_rig.ma",
        "owner": "ta",
        "materials": [
            {"material": "hero_skin_mtl", "id": 1041},
            {"material": "hero_hair_mtl", "id": 0}
        ]
    }"#;

    #[test]
    fn test_parse_snapshot() {
        let scene: SceneSnapshot = serde_json::from_str(SCENE_JSON).unwrap();

        assert_eq!(scene.asset_name, "char_hero_rig");
        assert_eq!(scene.object_id, None);
        assert_eq!(scene.live_assignments().len(), 2);
        assert_eq!(scene.live_ids().into_iter().collect::<Vec<_>>(), vec![0, 1041]);
    }

    #[test]
    fn test_assign_and_save_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scene.json");
        fs::write(&path, SCENE_JSON).unwrap();

        let mut scene = SceneSnapshot::from_path(&path).unwrap();
        scene.assign("hero_hair_mtl", 1042).unwrap();
        scene.stamp_object_id(1040);
        scene.save(&path).unwrap();

        let reloaded = SceneSnapshot::from_path(&path).unwrap();
        assert_eq!(reloaded.materials[1], LiveAssignment::new("hero_hair_mtl", 1042));
        assert_eq!(reloaded.object_id, Some(1040));
    }

    #[test]
    fn test_assign_unknown_material() {
        let mut scene: SceneSnapshot = serde_json::from_str(SCENE_JSON).unwrap();
        let result = scene.assign("missing_mtl", 1042);
        assert!(matches!(result, Err(SceneError::UnknownMaterial(_))));
    }

    #[test]
    fn test_default_display_name() {
        assert_eq!(default_display_name("char_hero_rig"), "hero");
        assert_eq!(default_display_name("crate"), "crate");
        assert_eq!(default_display_name("char__rig"), "char__rig");
    }
}
