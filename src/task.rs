use std::fmt::{self, Display};

use crate::{GenErr, Result};

/// The kind of learning task a generator feeds, it decides how labels are encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    /// Labels are relevance scores, passed through unchanged.
    Ranking,
    /// Labels are class indices, expanded into one-hot rows.
    Classification { num_classes: usize },
}

impl Task {
    /// Returns a new ranking `Task`.
    pub fn ranking() -> Self {
        Self::Ranking
    }

    /// Returns a new classification `Task`.
    ///
    /// # Arguments
    /// * `num_classes` - The amount of classes, at least two.
    ///
    /// # Returns
    /// An error if there are less than two classes.
    pub fn classification(num_classes: usize) -> Result<Self> {
        let task = Self::Classification { num_classes };
        if num_classes < 2 {
            return Err(GenErr::InvalidTask(task));
        }

        Ok(task)
    }

    /// The amount of classes of a classification task, `None` for ranking.
    pub fn num_classes(&self) -> Option<usize> {
        match self {
            Task::Ranking => None,
            Task::Classification { num_classes } => Some(*num_classes),
        }
    }
}

impl Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Task::Ranking => write!(f, "Ranking"),
            Task::Classification { num_classes } => {
                write!(f, "Classification(num_classes={num_classes})")
            }
        }
    }
}
