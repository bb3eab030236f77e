use ndarray::{Array1, Array2};

/// The inputs of a batch, every field is indexed by position in the batch.
#[derive(Debug, Clone, PartialEq)]
pub struct Features {
    pub x_left: Array2<u32>,
    pub x_right: Array2<u32>,
    pub id_left: Vec<String>,
    pub id_right: Vec<String>,
}

impl Features {
    #[inline]
    pub fn len(&self) -> usize {
        self.id_left.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.id_left.is_empty()
    }
}

/// The expected outputs of a batch, encoded according to the task.
#[derive(Debug, Clone, PartialEq)]
pub enum Targets {
    /// Raw ranking labels, one per row.
    Scores(Array1<f32>),
    /// One-hot class rows of shape `(batch, num_classes)`.
    OneHot(Array2<i32>),
}

impl Targets {
    /// The amount of rows in the batch.
    pub fn len(&self) -> usize {
        match self {
            Targets::Scores(scores) => scores.len(),
            Targets::OneHot(one_hot) => one_hot.nrows(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_scores(&self) -> Option<&Array1<f32>> {
        match self {
            Targets::Scores(scores) => Some(scores),
            Targets::OneHot(_) => None,
        }
    }

    pub fn as_one_hot(&self) -> Option<&Array2<i32>> {
        match self {
            Targets::OneHot(one_hot) => Some(one_hot),
            Targets::Scores(_) => None,
        }
    }
}

/// A batch as handed to the training loop.
pub type Batch = (Features, Targets);
