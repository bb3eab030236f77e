use rand::{SeedableRng, rngs::StdRng};

use crate::{
    DataPack, PointGenerator, Result, Task,
    specs::{GeneratorSpec, TaskSpec},
};

/// Builds `PointGenerator`s given a specification.
#[derive(Default)]
pub struct GeneratorBuilder;

impl GeneratorBuilder {
    /// Creates a new `GeneratorBuilder`.
    pub fn new() -> Self {
        Self
    }

    /// Builds a new `PointGenerator` over `inputs` following a spec.
    ///
    /// # Arguments
    /// * `spec` - The specification for the generator.
    /// * `inputs` - The text pairs to generate batches from.
    ///
    /// # Returns
    /// An error if the spec describes an invalid task.
    pub fn build(
        &self,
        spec: &GeneratorSpec,
        inputs: &DataPack,
    ) -> Result<PointGenerator<StdRng>> {
        let task = self.resolve_task(spec.task)?;
        let rng = self.generate_rng(spec.seed);

        let generator = PointGenerator::new(inputs, task, spec.batch_size, spec.shuffle, rng);
        Ok(generator)
    }

    fn resolve_task(&self, spec: TaskSpec) -> Result<Task> {
        match spec {
            TaskSpec::Ranking => Ok(Task::ranking()),
            TaskSpec::Classification { num_classes } => Task::classification(num_classes),
        }
    }

    fn generate_rng(&self, seed: Option<u64>) -> StdRng {
        match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}
