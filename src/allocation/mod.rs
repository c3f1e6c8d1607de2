// Allocation - Category ranges and object ID availability

pub mod range;
pub mod resolver;

use thiserror::Error;

pub use range::{Category, CategoryRange, RangePolicy};
pub use resolver::{available_object_ids, matte_id_block, next_available_object_id};

#[derive(Debug, Error)]
pub enum AllocationError {
    #[error("No free object ID left for {category} in [{start}, {bound})")]
    RangeExhausted {
        category: Category,
        start: i64,
        bound: i64,
    },
    #[error("Unknown category: {0}")]
    UnknownCategory(String),
    #[error("Invalid range: start={start}, step={step}, bound={bound}")]
    InvalidRange { start: i64, step: i64, bound: i64 },
}
