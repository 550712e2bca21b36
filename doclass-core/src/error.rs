use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum DoclassError {
    /// A corpus row is missing its text or its category.
    MissingValue { row: usize, field: String },

    /// Field name or index not present in the table.
    UnknownField(String),

    /// Shape or length mismatch
    ShapeMismatch { expected: String, got: String },

    /// Model used before calling `fit`
    NotFitted,

    /// The training corpus contains zero documents.
    EmptyTrainingData,

    /// Training data that cannot produce a usable model.
    InvalidTrainingData { message: String },
}

impl fmt::Display for DoclassError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for DoclassError {}

pub type Result<T> = std::result::Result<T, DoclassError>;
