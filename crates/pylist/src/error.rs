use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ListError {
    #[error("list index {index} out of range for length {len}")]
    IndexOutOfRange { index: isize, len: usize },
    #[error("pop from empty list")]
    PopFromEmpty,
    #[error("value is not in list")]
    ValueNotFound,
    #[error("slice step cannot be zero")]
    ZeroStep,
    #[error("'<' not supported between instances of '{left}' and '{right}'")]
    Incomparable {
        left: &'static str,
        right: &'static str,
    },
    #[error("list modified during sort")]
    ModifiedDuringSort,
    #[error("row {row} has {found} columns, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        found: usize,
    },
}

pub type Result<T, E = ListError> = std::result::Result<T, E>;
