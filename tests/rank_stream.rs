use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use sndutils::execution::run_transform;
use sndutils::ingestion::{SndWriter, open_path};
use sndutils::processing::{RankCell, RankOptions, Ranker, rank_values};

fn rank_fixture(path: &str, zero_truncate: bool) -> String {
    let reader = open_path(path).unwrap();
    let mut writer = SndWriter::new(Vec::new());
    let mut ranker = Ranker::new(RankOptions { zero_truncate });
    run_transform(reader, &mut writer, &mut ranker).unwrap();
    String::from_utf8(writer.into_inner().unwrap()).unwrap()
}

fn value(cell: RankCell) -> f64 {
    match cell {
        RankCell::Value(y) => y,
        other => panic!("expected a ranked value, got {other:?}"),
    }
}

#[test]
fn rank_fixture_without_truncation() {
    assert_eq!(
        rank_fixture("tests/fixtures/sample.snd", false),
        "#\tA\tB\tC\tD\n\
         r1\t0.000000\t0.500000\t0.500000\t1.000000\n\
         r2\t0.333333\t0.666667\t0.000000\t1.000000\n\
         r3\t0.500000\t0.500000\t0.500000\t0.500000\n"
    );
}

#[test]
fn rank_fixture_with_zero_truncation() {
    assert_eq!(
        rank_fixture("tests/fixtures/sample.snd", true),
        "#\tA\tB\tC\tD\n\
         r1\t0.000000\t0.500000\t0.500000\t1.000000\n\
         r2\t0\t0.000000\t0\t1.000000\n\
         r3\t0.500000\t0.500000\t0.500000\t0.500000\n"
    );
}

#[test]
fn rank_fails_fast_on_malformed_value() {
    let reader = open_path("tests/fixtures/malformed.snd").unwrap();
    let mut writer = SndWriter::new(Vec::new());
    let err = run_transform(reader, &mut writer, &mut Ranker::default()).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("failed to parse value"));
    assert!(msg.contains("line 2 column 2"));
}

#[test]
fn ranks_are_monotonic_in_value() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for _ in 0..200 {
        let n = rng.gen_range(2..40);
        // small integer range forces plenty of ties
        let values: Vec<f64> = (0..n).map(|_| rng.gen_range(-5..20) as f64).collect();
        for zero_truncate in [false, true] {
            let ranks = rank_values(&values, zero_truncate);
            for i in 0..n {
                for j in 0..n {
                    let (RankCell::Value(ri), RankCell::Value(rj)) = (ranks[i], ranks[j]) else {
                        continue;
                    };
                    if values[i] < values[j] {
                        assert!(ri < rj, "values={values:?} i={i} j={j}");
                    } else if values[i] == values[j] {
                        assert_eq!(ri, rj);
                    }
                }
            }
        }
    }
}

#[test]
fn zero_truncation_leaves_only_non_positive_values_at_zero() {
    let mut rng = StdRng::seed_from_u64(17);
    for _ in 0..200 {
        let n = rng.gen_range(3..30);
        let values: Vec<f64> = (0..n).map(|_| rng.gen_range(-3..10) as f64).collect();
        let ranks = rank_values(&values, true);
        let population = values.iter().filter(|&&v| v > 0.0).count();
        for (v, r) in values.iter().zip(&ranks) {
            match r {
                RankCell::Truncated => assert!(*v <= 0.0),
                RankCell::Value(_) => assert!(*v > 0.0 && population > 1),
                RankCell::Undefined => assert_eq!(population, 1),
            }
        }
    }
}

#[test]
fn symmetric_population_averages_half() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..200 {
        let half = rng.gen_range(1..20);
        let center: f64 = rng.gen_range(10.0..100.0);
        let mut values = Vec::new();
        for _ in 0..half {
            let d = rng.gen_range(1..8) as f64;
            values.push(center - d);
            values.push(center + d);
        }
        if rng.gen_bool(0.5) {
            values.push(center);
        }
        let ranks = rank_values(&values, false);
        let mean = ranks.iter().map(|&c| value(c)).sum::<f64>() / ranks.len() as f64;
        assert!((mean - 0.5).abs() < 1e-9, "mean={mean} values={values:?}");
    }
}

#[test]
fn output_preserves_field_count() {
    let text = rank_fixture("tests/fixtures/sample.snd", true);
    let input = std::fs::read_to_string("tests/fixtures/sample.snd").unwrap();
    for (a, b) in input.lines().zip(text.lines()) {
        assert_eq!(a.split('\t').count(), b.split('\t').count());
    }
}
