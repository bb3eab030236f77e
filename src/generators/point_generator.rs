use std::num::NonZeroUsize;

use log::debug;
use ndarray::{Array1, Array2, Axis};
use rand::{Rng, SeedableRng, rngs::StdRng};

use super::{Batch, Features, IndexOrder, Targets};
use crate::{DataPack, GenErr, Result, Task};

/// Generates batches of independent text pairs, for classification as well as ranking.
///
/// The columns of the data pack are copied once into array storage, every batch
/// is then gathered from them into freshly allocated arrays.
pub struct PointGenerator<R: Rng> {
    task: Task,
    batch_size: NonZeroUsize,

    x_left: Array2<u32>,
    x_right: Array2<u32>,
    y: Array1<f32>,
    id_left: Vec<String>,
    id_right: Vec<String>,

    order: IndexOrder<R>,
}

impl<R: Rng> PointGenerator<R> {
    /// Creates a new `PointGenerator`.
    ///
    /// # Arguments
    /// * `inputs` - The text pairs to generate batches from.
    /// * `task` - Decides how the labels are encoded.
    /// * `batch_size` - The amount of instances in a batch.
    /// * `shuffle` - Whether to permute the instances on every epoch.
    /// * `rng` - The random number generator used for shuffling.
    pub fn new(
        inputs: &DataPack,
        task: Task,
        batch_size: NonZeroUsize,
        shuffle: bool,
        rng: R,
    ) -> Self {
        let num_instances = inputs.len();

        let left = inputs.text_left();
        let right = inputs.text_right();
        let x_left =
            Array2::from_shape_fn((num_instances, inputs.left_len()), |(i, j)| left[i][j]);
        let x_right =
            Array2::from_shape_fn((num_instances, inputs.right_len()), |(i, j)| right[i][j]);

        debug!(
            num_instances = num_instances,
            batch_size = batch_size.get(),
            shuffle = shuffle;
            "created point generator for {task}"
        );

        Self {
            task,
            batch_size,
            x_left,
            x_right,
            y: Array1::from(inputs.label().to_vec()),
            id_left: inputs.id_left().to_vec(),
            id_right: inputs.id_right().to_vec(),
            order: IndexOrder::new(num_instances, shuffle, rng),
        }
    }

    /// Gathers the given rows into a batch, in order and keeping repetitions.
    ///
    /// # Arguments
    /// * `index_array` - The rows of the batch, each in `[0, num_instances)`.
    ///
    /// # Returns
    /// The batch, or an error if a row is out of bounds, a label is not a valid
    /// class index or the task is malformed.
    pub fn get_batch(&self, index_array: &[usize]) -> Result<Batch> {
        let len = self.num_instances();
        if let Some(&index) = index_array.iter().find(|&&index| index >= len) {
            return Err(GenErr::RowOutOfBounds { index, len });
        }

        let targets = self.encode_targets(index_array)?;
        let features = Features {
            x_left: self.x_left.select(Axis(0), index_array),
            x_right: self.x_right.select(Axis(0), index_array),
            id_left: index_array.iter().map(|&i| self.id_left[i].clone()).collect(),
            id_right: index_array.iter().map(|&i| self.id_right[i].clone()).collect(),
        };

        Ok((features, targets))
    }

    fn encode_targets(&self, index_array: &[usize]) -> Result<Targets> {
        match self.task {
            Task::Ranking => Ok(Targets::Scores(self.y.select(Axis(0), index_array))),
            Task::Classification { num_classes } if num_classes >= 2 => {
                // the one-hot buffer, counting an empty batch as one row, must fit in isize bytes
                let max_elems = isize::MAX as usize / size_of::<i32>();
                let fits = index_array
                    .len()
                    .max(1)
                    .checked_mul(num_classes)
                    .is_some_and(|elems| elems <= max_elems);

                if !fits {
                    return Err(GenErr::InvalidTask(self.task));
                }

                let mut one_hot = Array2::zeros((index_array.len(), num_classes));

                for (i, &row) in index_array.iter().enumerate() {
                    let label = self.y[row];
                    let class = class_index(label, num_classes).ok_or(
                        GenErr::LabelOutOfBounds {
                            row,
                            label,
                            num_classes,
                        },
                    )?;

                    one_hot[[i, class]] = 1;
                }

                Ok(Targets::OneHot(one_hot))
            }
            task => Err(GenErr::InvalidTask(task)),
        }
    }

    /// Returns the `idx`-th batch of the current epoch.
    pub fn get(&self, idx: usize) -> Result<Batch> {
        let len = self.len();
        if idx >= len {
            return Err(GenErr::BatchOutOfRange { index: idx, len });
        }

        let range = self.order.batch_range(idx, self.batch_size.get());
        self.get_batch(&self.order.indices()[range])
    }

    /// Returns the batch under the cursor and advances it, wrapping around after
    /// the last batch of an epoch.
    pub fn next_batch(&mut self) -> Result<Batch> {
        let range = self.order.advance(self.batch_size.get());
        self.get_batch(&self.order.indices()[range])
    }

    /// Resets the cursor and returns an iterator over one full epoch.
    pub fn epoch(&mut self) -> Epoch<'_, R> {
        self.reset();
        let remaining = self.len();

        Epoch {
            generator: self,
            remaining,
        }
    }

    /// Redraws the instance order for the next epoch.
    pub fn on_epoch_end(&mut self) {
        self.order.redraw();
    }

    /// Moves the cursor back to the start of an epoch.
    pub fn reset(&mut self) {
        self.order.reset();
    }

    /// The amount of batches in an epoch.
    pub fn len(&self) -> usize {
        self.num_instances().div_ceil(self.batch_size.get())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn num_instances(&self) -> usize {
        self.y.len()
    }

    #[inline]
    pub fn batch_size(&self) -> NonZeroUsize {
        self.batch_size
    }

    #[inline]
    pub fn task(&self) -> Task {
        self.task
    }

    #[inline]
    pub fn shuffle(&self) -> bool {
        self.order.shuffle()
    }

    /// The current instance order.
    #[inline]
    pub fn index_array(&self) -> &[usize] {
        self.order.indices()
    }

    #[inline]
    pub fn total_batches_seen(&self) -> usize {
        self.order.total_batches_seen()
    }

    #[inline]
    pub fn epochs_seen(&self) -> usize {
        self.order.epochs_seen()
    }
}

impl PointGenerator<StdRng> {
    /// Creates a new `PointGenerator` shuffling with an rng seeded by the os.
    pub fn from_entropy(
        inputs: &DataPack,
        task: Task,
        batch_size: NonZeroUsize,
        shuffle: bool,
    ) -> Self {
        Self::new(inputs, task, batch_size, shuffle, StdRng::from_os_rng())
    }
}

/// Maps a label to its one-hot column, `None` unless it's an integer in `[0, num_classes)`.
fn class_index(label: f32, num_classes: usize) -> Option<usize> {
    if label.fract() != 0. || label < 0. {
        return None;
    }

    let class = label as usize;
    (class < num_classes).then_some(class)
}

/// One full epoch of batches, see `PointGenerator::epoch`.
pub struct Epoch<'a, R: Rng> {
    generator: &'a mut PointGenerator<R>,
    remaining: usize,
}

impl<R: Rng> Iterator for Epoch<'_, R> {
    type Item = Result<Batch>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        self.remaining -= 1;
        Some(self.generator.next_batch())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<R: Rng> ExactSizeIterator for Epoch<'_, R> {}
