use std::{
    error::Error,
    fmt::{self, Display},
};

use crate::task::Task;

/// The result type used in the entire crate.
pub type Result<T> = std::result::Result<T, GenErr>;

/// The batch generation error type.
#[derive(Debug)]
pub enum GenErr {
    /// The task is neither a ranking nor a well formed classification task.
    InvalidTask(Task),
    /// A generator specification could not be parsed.
    InvalidSpec(String),
    /// A stored label is not a valid class index for one-hot encoding.
    LabelOutOfBounds {
        row: usize,
        label: f32,
        num_classes: usize,
    },
    /// A requested row index is not in `[0, len)`.
    RowOutOfBounds { index: usize, len: usize },
    /// A requested batch position is not in `[0, len)`.
    BatchOutOfRange { index: usize, len: usize },
    EmptyDataPack,
    ColumnLength {
        column: &'static str,
        got: usize,
        expected: usize,
    },
    RaggedText {
        column: &'static str,
        row: usize,
        got: usize,
        expected: usize,
    },
    Json(serde_json::Error),
}

impl Display for GenErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            GenErr::InvalidTask(task) => format!(
                "{task} is not a valid target mode, Ranking and Classification expected"
            ),
            GenErr::InvalidSpec(detail) => format!("Invalid generator spec: {detail}"),
            GenErr::LabelOutOfBounds {
                row,
                label,
                num_classes,
            } => format!(
                "The label {label} at row {row} is not a class index in [0, {num_classes})"
            ),
            GenErr::RowOutOfBounds { index, len } => {
                format!("Row index {index} is out of bounds for a data pack of {len} rows")
            }
            GenErr::BatchOutOfRange { index, len } => format!(
                "Asked to retrieve batch {index}, but the generator has length {len}"
            ),
            GenErr::EmptyDataPack => "The data pack has no rows".to_string(),
            GenErr::ColumnLength {
                column,
                got,
                expected,
            } => format!("The column {column} has {got} rows, expected {expected}"),
            GenErr::RaggedText {
                column,
                row,
                got,
                expected,
            } => format!(
                "The sequence at row {row} of {column} has length {got}, expected {expected}"
            ),
            GenErr::Json(e) => format!("Malformed data pack records: {e}"),
        };

        write!(f, "{s}")
    }
}

impl Error for GenErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            GenErr::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for GenErr {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}
