// Availability resolver
// Picks the next free object ID and derives its matte ID block

use std::collections::BTreeSet;

use super::{AllocationError, Category, CategoryRange};

/// All unused object IDs of a range, ascending
pub fn available_object_ids(range: &CategoryRange, existing: &BTreeSet<i64>) -> Vec<i64> {
    range
        .candidates()
        .filter(|id| !existing.contains(id))
        .collect()
}

/// Smallest candidate of the range that is not already taken
pub fn next_available_object_id(
    category: Category,
    range: &CategoryRange,
    existing: &BTreeSet<i64>,
) -> Result<i64, AllocationError> {
    range
        .candidates()
        .find(|id| !existing.contains(id))
        .ok_or(AllocationError::RangeExhausted {
            category,
            start: range.start,
            bound: range.bound,
        })
}

/// Matte IDs reserved for an object: `object_id + 1 .. object_id + step`
///
/// The upper bound is exclusive so the block never reaches the next object ID.
pub fn matte_id_block(object_id: i64, step: i64) -> Vec<i64> {
    ((object_id + 1)..(object_id + step)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(ids: &[i64]) -> BTreeSet<i64> {
        ids.iter().copied().collect()
    }

    #[test]
    fn test_next_available_skips_existing() {
        let range = CategoryRange::new(1000, 20, 20000).unwrap();
        let next = next_available_object_id(Category::Character, &range, &set(&[1000, 1020]));
        assert_eq!(next.unwrap(), 1040);
    }

    #[test]
    fn test_next_available_fills_gaps() {
        let range = CategoryRange::new(1000, 20, 20000).unwrap();
        let next = next_available_object_id(Category::Character, &range, &set(&[1000, 1040]));
        assert_eq!(next.unwrap(), 1020);
    }

    #[test]
    fn test_next_available_ignores_foreign_ids() {
        let range = CategoryRange::new(100000, 10, 110000).unwrap();
        // Character IDs and off-grid values must not affect prop allocation
        let next = next_available_object_id(Category::Prop, &range, &set(&[1000, 100005]));
        assert_eq!(next.unwrap(), 100000);
    }

    #[test]
    fn test_range_exhausted() {
        let range = CategoryRange::new(10, 5, 25).unwrap();
        let result = next_available_object_id(Category::Prop, &range, &set(&[10, 15, 20]));
        assert!(matches!(
            result,
            Err(AllocationError::RangeExhausted {
                category: Category::Prop,
                ..
            })
        ));
    }

    #[test]
    fn test_next_available_is_smallest_unused() {
        let range = CategoryRange::new(0, 3, 30).unwrap();
        for taken in 0..10 {
            let existing: BTreeSet<i64> = range.candidates().take(taken).collect();
            let next = next_available_object_id(Category::Prop, &range, &existing).unwrap();
            assert_eq!(next, taken as i64 * 3);
        }
    }

    #[test]
    fn test_available_object_ids_sorted() {
        let range = CategoryRange::new(1000, 20, 1100).unwrap();
        let available = available_object_ids(&range, &set(&[1020, 1060]));
        assert_eq!(available, vec![1000, 1040, 1080]);
    }

    #[test]
    fn test_matte_id_block() {
        let block = matte_id_block(1040, 20);
        assert_eq!(block.first(), Some(&1041));
        assert_eq!(block.last(), Some(&1059));
        assert_eq!(block.len(), 19);
        assert!(!block.contains(&1040));
        assert!(!block.contains(&1060));
        assert!(block.windows(2).all(|w| w[1] == w[0] + 1));
    }
}
