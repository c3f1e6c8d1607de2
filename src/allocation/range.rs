// Category ranges - Asset categories and the object ID domain of each
// Every valid object ID is derived from a category's start/step/bound

use serde::{Deserialize, Serialize};
use std::fmt;

use super::AllocationError;

/// Asset classification selecting a range policy and a preset table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Characters: matte IDs are offsets from the object ID
    Character,

    /// Props: matte IDs are absolute
    Prop,
}

impl Category {
    /// Parse a category name, accepting the short forms used on the command line
    pub fn parse(s: &str) -> Result<Self, AllocationError> {
        match s.trim().to_lowercase().as_str() {
            "character" | "char" => Ok(Category::Character),
            "prop" => Ok(Category::Prop),
            other => Err(AllocationError::UnknownCategory(other.to_string())),
        }
    }

    /// Resolve an optional selection, failing when nothing is selected
    pub fn require(selected: Option<Category>) -> Result<Self, AllocationError> {
        selected.ok_or_else(|| AllocationError::UnknownCategory("none selected".to_string()))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Character => "character",
            Category::Prop => "prop",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Object ID domain of one category: `start, start + step, ... < bound`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRange {
    /// First object ID of the category
    pub start: i64,

    /// Distance between consecutive object IDs; also the size of each matte ID block
    pub step: i64,

    /// Exclusive upper bound
    pub bound: i64,
}

impl CategoryRange {
    /// Create a range, rejecting empty domains and non-positive steps
    pub fn new(start: i64, step: i64, bound: i64) -> Result<Self, AllocationError> {
        let range = CategoryRange { start, step, bound };
        range.validate()?;
        Ok(range)
    }

    pub fn validate(&self) -> Result<(), AllocationError> {
        if self.step <= 0 || self.start >= self.bound {
            return Err(AllocationError::InvalidRange {
                start: self.start,
                step: self.step,
                bound: self.bound,
            });
        }
        Ok(())
    }

    /// Every candidate object ID in ascending order
    pub fn candidates(&self) -> impl Iterator<Item = i64> {
        let step = self.step.max(1) as usize;
        (self.start..self.bound).step_by(step)
    }

    /// Whether `object_id` is one of this range's candidates
    pub fn contains(&self, object_id: i64) -> bool {
        object_id >= self.start
            && object_id < self.bound
            && self.step > 0
            && (object_id - self.start) % self.step == 0
    }
}

/// Range policy for both categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangePolicy {
    pub character: CategoryRange,
    pub prop: CategoryRange,
}

impl RangePolicy {
    pub fn range(&self, category: Category) -> &CategoryRange {
        match category {
            Category::Character => &self.character,
            Category::Prop => &self.prop,
        }
    }

    pub fn validate(&self) -> Result<(), AllocationError> {
        self.character.validate()?;
        self.prop.validate()
    }
}

impl Default for RangePolicy {
    fn default() -> Self {
        RangePolicy {
            character: CategoryRange {
                start: 1000,
                step: 20,
                bound: 20000,
            },
            prop: CategoryRange {
                start: 100000,
                step: 10,
                bound: 110000,
            },
        }
    }
}
