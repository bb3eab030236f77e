use std::{collections::HashSet, num::NonZeroUsize};

use rand::{SeedableRng, rngs::StdRng};

use text_matching::{
    DataPack, GenErr, GeneratorBuilder, GeneratorSpec, PointGenerator, Row, Targets, Task,
};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn pack(labels: &[f32]) -> anyhow::Result<DataPack> {
    let rows = labels.iter().enumerate().map(|(i, &label)| Row {
        text_left: vec![i as u32; 3],
        text_right: vec![100 + i as u32; 5],
        label,
        id_left: format!("L{i}"),
        id_right: format!("R{i}"),
    });

    Ok(DataPack::from_rows(rows)?)
}

fn shuffled(inputs: &DataPack, task: Task, batch_size: usize) -> PointGenerator<StdRng> {
    let batch_size = NonZeroUsize::new(batch_size).expect("non zero batch size");
    PointGenerator::new(inputs, task, batch_size, true, StdRng::seed_from_u64(2024))
}

#[test]
fn features_match_index_array_length() -> anyhow::Result<()> {
    init_logger();

    let inputs = pack(&[0., 1., 2., 0., 1., 2., 0.])?;
    let generator = shuffled(&inputs, Task::classification(3)?, 3);

    for index_array in [vec![0], vec![6, 5, 4, 3], vec![2, 2, 2], vec![1, 0, 6, 3, 4]] {
        let (features, targets) = generator.get_batch(&index_array)?;

        assert_eq!(features.x_left.nrows(), index_array.len());
        assert_eq!(features.x_right.nrows(), index_array.len());
        assert_eq!(features.x_left.ncols(), 3);
        assert_eq!(features.x_right.ncols(), 5);
        assert_eq!(features.id_left.len(), index_array.len());
        assert_eq!(features.id_right.len(), index_array.len());
        assert_eq!(targets.len(), index_array.len());
    }

    Ok(())
}

#[test]
fn one_hot_rows_point_at_the_label() -> anyhow::Result<()> {
    let labels = [3., 0., 1., 2., 3., 1.];
    let inputs = pack(&labels)?;
    let generator = shuffled(&inputs, Task::classification(4)?, 2);

    let index_array = [5, 0, 3, 1, 4, 2, 0];
    let (_, targets) = generator.get_batch(&index_array)?;
    let one_hot = targets.as_one_hot().expect("classification targets");

    assert_eq!(one_hot.dim(), (index_array.len(), 4));
    for (row, &idx) in one_hot.rows().into_iter().zip(&index_array) {
        assert_eq!(row.sum(), 1);
        assert_eq!(row[labels[idx] as usize], 1);
    }

    Ok(())
}

#[test]
fn ranking_targets_are_the_raw_labels() -> anyhow::Result<()> {
    let labels = [0.5, 4., 2., 1.];
    let inputs = pack(&labels)?;
    let generator = shuffled(&inputs, Task::ranking(), 2);

    let (_, targets) = generator.get_batch(&[3, 1, 1, 0])?;
    let Targets::Scores(scores) = targets else {
        panic!("expected ranking scores");
    };

    assert_eq!(scores.to_vec(), vec![1., 4., 4., 0.5]);
    Ok(())
}

#[test]
fn reads_do_not_mutate_the_generator() -> anyhow::Result<()> {
    let inputs = pack(&[0., 1., 0., 1.])?;
    let generator = shuffled(&inputs, Task::classification(2)?, 2);

    let order = generator.index_array().to_vec();
    let first = generator.get_batch(&[0, 3, 1])?;
    let second = generator.get_batch(&[0, 3, 1])?;

    assert_eq!(first, second);
    assert_eq!(generator.get(1)?, generator.get(1)?);
    assert_eq!(generator.index_array(), order.as_slice());
    Ok(())
}

#[test]
fn batches_do_not_alias_the_store() -> anyhow::Result<()> {
    let inputs = pack(&[0., 1.])?;
    let generator = shuffled(&inputs, Task::ranking(), 2);

    let (mut features, _) = generator.get_batch(&[0])?;
    features.x_left.fill(999);
    features.id_left[0].push_str("-changed");

    let (features, _) = generator.get_batch(&[0])?;
    assert_eq!(features.x_left.row(0).to_vec(), vec![0, 0, 0]);
    assert_eq!(features.id_left, ["L0"]);
    Ok(())
}

#[test]
fn every_epoch_visits_each_row_once() -> anyhow::Result<()> {
    init_logger();

    let inputs = pack(&[0.; 23])?;
    for shuffle in [false, true] {
        let batch_size = NonZeroUsize::new(5).expect("non zero batch size");
        let rng = StdRng::seed_from_u64(9);
        let mut generator =
            PointGenerator::new(&inputs, Task::ranking(), batch_size, shuffle, rng);

        let mut orders = HashSet::new();
        for _ in 0..4 {
            let mut visited = Vec::new();
            for batch in generator.epoch() {
                let (features, _) = batch?;
                visited.extend(features.id_left);
            }

            orders.insert(visited.clone());
            visited.sort();

            let mut expected: Vec<_> = (0..23).map(|i| format!("L{i}")).collect();
            expected.sort();
            assert_eq!(visited, expected);
        }

        if shuffle {
            assert!(orders.len() > 1, "shuffled epochs should differ");
        } else {
            assert_eq!(orders.len(), 1);
        }
    }

    Ok(())
}

#[test]
fn batch_count_rounds_up() -> anyhow::Result<()> {
    let inputs = pack(&[0.; 10])?;

    for (batch_size, expected) in [(1, 10), (3, 4), (5, 2), (10, 1), (32, 1)] {
        let generator = shuffled(&inputs, Task::ranking(), batch_size);
        assert_eq!(generator.len(), expected);

        let last = generator.get(expected - 1)?;
        assert_eq!(last.1.len(), 10 - batch_size * (expected - 1));
        assert!(generator.get(expected).is_err());
    }

    Ok(())
}

#[test]
fn corrupt_label_aborts_the_batch() -> anyhow::Result<()> {
    let inputs = pack(&[0., 1., 5., 1.])?;
    let generator = shuffled(&inputs, Task::classification(2)?, 4);

    let err = generator.get_batch(&[0, 1, 2]).unwrap_err();
    assert!(matches!(err, GenErr::LabelOutOfBounds { row: 2, .. }));
    assert!(err.to_string().contains("row 2"));
    Ok(())
}

#[test]
fn generator_from_json_config() -> anyhow::Result<()> {
    let inputs = DataPack::from_json(
        r#"[
            {"text_left": [1, 2], "text_right": [3, 4], "label": 0, "id_left": "id0", "id_right": "id1"},
            {"text_left": [5, 6], "text_right": [7, 8], "label": 1, "id_left": "id2", "id_right": "id3"}
        ]"#,
    )?;
    let spec = GeneratorSpec::from_json(
        r#"{"task": {"classification": {"num_classes": 2}}, "batch_size": 1, "shuffle": false}"#,
    )?;

    let mut generator = GeneratorBuilder::new().build(&spec, &inputs)?;
    let (features, targets) = generator.next_batch()?;

    assert_eq!(features.id_left, ["id0"]);
    assert_eq!(features.x_right.row(0).to_vec(), vec![3, 4]);
    assert_eq!(targets.as_one_hot().map(|t| t.row(0).to_vec()), Some(vec![1, 0]));
    Ok(())
}
