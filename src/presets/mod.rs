// Presets Module
// Per-category sub-material tables and their resolution to absolute matte IDs

pub mod types;
mod character;
mod prop;

use crate::allocation::{AllocationError, Category};

pub use types::{offsets_fit_step, render_template, PresetSlot, ResolvedPreset, PRESET_KEY};

/// Get the preset table of a category
pub fn preset_table(category: Category) -> Vec<PresetSlot> {
    match category {
        Category::Character => character::character_presets(),
        Category::Prop => prop::prop_presets(),
    }
}

/// Resolve a category's presets against an object ID.
///
/// Character offsets are added to `object_id` and templates receive
/// `display_name`. Prop offsets are already absolute and used verbatim.
pub fn resolve_preset(
    category: Option<Category>,
    object_id: i64,
    display_name: &str,
) -> Result<Vec<ResolvedPreset>, AllocationError> {
    let category = Category::require(category)?;

    let resolved = preset_table(category)
        .into_iter()
        .map(|slot| match category {
            Category::Character => ResolvedPreset {
                matte_id: object_id + slot.offset,
                tag: slot.tag,
                multi_matte_name: render_template(&slot.multi_matte_template, display_name),
            },
            Category::Prop => ResolvedPreset {
                matte_id: slot.offset,
                tag: slot.tag,
                multi_matte_name: slot.multi_matte_template,
            },
        })
        .collect();

    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_character_presets() {
        let resolved = resolve_preset(Some(Category::Character), 1040, "hero").unwrap();

        assert_eq!(resolved.len(), 12);
        assert_eq!(resolved[0].matte_id, 1041);
        assert_eq!(resolved[0].tag, "skin");
        assert_eq!(resolved[0].multi_matte_name, "MM_hero_Body");
        assert_eq!(resolved[11].matte_id, 1052);
        assert!(resolved.iter().all(|r| !r.multi_matte_name.contains(PRESET_KEY)));
    }

    #[test]
    fn test_resolve_prop_presets_ignore_object_id() {
        let a = resolve_preset(Some(Category::Prop), 100000, "crate").unwrap();
        let b = resolve_preset(Some(Category::Prop), 100010, "barrel").unwrap();

        assert_eq!(a, b);
        assert_eq!(a[0].matte_id, 901);
        assert_eq!(a[0].multi_matte_name, "MM_Prop_Hard");
    }

    #[test]
    fn test_resolve_without_category() {
        let result = resolve_preset(None, 1040, "hero");
        assert!(matches!(result, Err(AllocationError::UnknownCategory(_))));
    }

    #[test]
    fn test_character_presets_within_block() {
        let block = crate::allocation::matte_id_block(1040, 20);
        let resolved = resolve_preset(Some(Category::Character), 1040, "hero").unwrap();
        assert!(resolved.iter().all(|r| block.contains(&r.matte_id)));
    }
}
