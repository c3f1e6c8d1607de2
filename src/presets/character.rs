// Character Presets
// Offsets are added to the character's object ID

use super::types::*;

/// Create the character preset table
///
/// Four multi-matte elements, three channels each, named after the
/// character's display name:
/// - Body: skin, hair, eyes
/// - Face: teeth, tongue, eyebrows
/// - Cloth: shirt, pants, shoes
/// - Prop: accessory, metal, glass
pub fn character_presets() -> Vec<PresetSlot> {
    vec![
        PresetSlot::new(1, "skin", "MM_{PRESET_KEY}_Body"),
        PresetSlot::new(2, "hair", "MM_{PRESET_KEY}_Body"),
        PresetSlot::new(3, "eyes", "MM_{PRESET_KEY}_Body"),
        PresetSlot::new(4, "teeth", "MM_{PRESET_KEY}_Face"),
        PresetSlot::new(5, "tongue", "MM_{PRESET_KEY}_Face"),
        PresetSlot::new(6, "eyebrows", "MM_{PRESET_KEY}_Face"),
        PresetSlot::new(7, "shirt", "MM_{PRESET_KEY}_Cloth"),
        PresetSlot::new(8, "pants", "MM_{PRESET_KEY}_Cloth"),
        PresetSlot::new(9, "shoes", "MM_{PRESET_KEY}_Cloth"),
        PresetSlot::new(10, "accessory", "MM_{PRESET_KEY}_Prop"),
        PresetSlot::new(11, "metal", "MM_{PRESET_KEY}_Prop"),
        PresetSlot::new(12, "glass", "MM_{PRESET_KEY}_Prop"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_character_presets() {
        let presets = character_presets();

        assert_eq!(presets.len(), 12);
        assert_eq!(presets[0].offset, 1);
        assert_eq!(presets[0].tag, "skin");
        assert!(presets.iter().all(|p| p.multi_matte_template.contains(PRESET_KEY)));

        // Must fit inside the default character step of 20
        assert!(offsets_fit_step(&presets, 20));
    }
}
