mod error;
mod list;
mod matrix;
mod repr;
mod slice;
mod sort;
mod value;

pub mod exercises;
pub mod tour;

pub use error::{ListError, Result};
pub use list::{List, range};
pub use matrix::Matrix;
pub use repr::{Repr, repr};
pub use slice::{SliceIndices, SliceSpec};
pub use sort::stable_sort_by;
pub use value::Value;
