// Preset Type Definitions
// A preset slot is a sub-material role with an expected matte ID

use serde::{Deserialize, Serialize};

/// Placeholder replaced by the asset's display name in multi-matte templates
pub const PRESET_KEY: &str = "{PRESET_KEY}";

/// One entry of a category's preset table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresetSlot {
    /// Offset from the object ID (characters) or absolute matte ID (props)
    pub offset: i64,

    /// Sub-material role, e.g. "skin"
    pub tag: String,

    /// Multi-matte render element name, may contain `PRESET_KEY`
    pub multi_matte_template: String,
}

impl PresetSlot {
    pub fn new(offset: i64, tag: &str, multi_matte_template: &str) -> Self {
        PresetSlot {
            offset,
            tag: tag.to_string(),
            multi_matte_template: multi_matte_template.to_string(),
        }
    }
}

/// A preset slot resolved against an object ID
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedPreset {
    pub matte_id: i64,
    pub tag: String,
    pub multi_matte_name: String,
}

/// Substitute the display name into a multi-matte template.
///
/// Single pass: text coming from `display_name` is never rescanned, so a
/// display name containing the token is inserted as-is.
pub fn render_template(template: &str, display_name: &str) -> String {
    template.replace(PRESET_KEY, display_name)
}

/// Whether every offset is unique and inside `[0, step)`
pub fn offsets_fit_step(slots: &[PresetSlot], step: i64) -> bool {
    let mut seen = std::collections::HashSet::new();
    slots
        .iter()
        .all(|slot| slot.offset >= 0 && slot.offset < step && seen.insert(slot.offset))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_template() {
        assert_eq!(render_template("MM_{PRESET_KEY}_Body", "hero"), "MM_hero_Body");
        assert_eq!(render_template("MM_Prop_Hard", "hero"), "MM_Prop_Hard");
    }

    #[test]
    fn test_render_template_single_pass() {
        let rendered = render_template("MM_{PRESET_KEY}", "{PRESET_KEY}");
        assert_eq!(rendered, "MM_{PRESET_KEY}");
    }

    #[test]
    fn test_offsets_fit_step() {
        let slots = vec![PresetSlot::new(1, "a", "x"), PresetSlot::new(19, "b", "x")];
        assert!(offsets_fit_step(&slots, 20));
        assert!(!offsets_fit_step(&slots, 10));

        let dup = vec![PresetSlot::new(1, "a", "x"), PresetSlot::new(1, "b", "x")];
        assert!(!offsets_fit_step(&dup, 20));
    }
}
