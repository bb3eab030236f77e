pub mod builder;
pub mod datapack;
pub mod error;
pub mod generators;
pub mod specs;
pub mod task;

pub use builder::GeneratorBuilder;
pub use datapack::{DataPack, Row};
pub use error::{GenErr, Result};
pub use generators::{Batch, Features, PointGenerator, Targets};
pub use specs::{GeneratorSpec, TaskSpec};
pub use task::Task;
