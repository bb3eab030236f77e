mod batch;
mod index;
mod point_generator;

pub use batch::{Batch, Features, Targets};
pub use index::IndexOrder;
pub use point_generator::{Epoch, PointGenerator};
