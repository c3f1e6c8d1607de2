// Prop Presets
// Shared material mattes; offsets are absolute matte IDs

use super::types::*;

/// Create the prop preset table
///
/// Prop mattes are shared by every prop, so names carry no placeholder.
pub fn prop_presets() -> Vec<PresetSlot> {
    vec![
        PresetSlot::new(901, "metal", "MM_Prop_Hard"),
        PresetSlot::new(902, "wood", "MM_Prop_Hard"),
        PresetSlot::new(903, "plastic", "MM_Prop_Hard"),
        PresetSlot::new(904, "glass", "MM_Prop_Soft"),
        PresetSlot::new(905, "fabric", "MM_Prop_Soft"),
        PresetSlot::new(906, "rubber", "MM_Prop_Soft"),
        PresetSlot::new(907, "stone", "MM_Prop_Misc"),
        PresetSlot::new(908, "light", "MM_Prop_Misc"),
        PresetSlot::new(909, "emissive", "MM_Prop_Misc"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prop_presets() {
        let presets = prop_presets();

        assert_eq!(presets.len(), 9);
        assert!(presets.iter().all(|p| !p.multi_matte_template.contains(PRESET_KEY)));

        // Absolute IDs stay below the character object range
        assert!(presets.iter().all(|p| p.offset < 1000));
    }
}
