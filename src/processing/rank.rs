//! Percentile-rank transform of the numeric fields of one record.
//!
//! Within a record, values are sorted, tied values share the midpoint rank of their group, and
//! ranks are normalised by the population size minus one. With zero truncation, non-positive
//! values get a bare `0` and are dropped from the population.

use std::fmt;

use tracing::warn;

use crate::error::SndResult;
use crate::types::{Record, format_fixed6};

use super::RecordTransform;

/// Options for the [`Ranker`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RankOptions {
    /// Assign rank `0` to every value `<= 0.0` and exclude it from the population.
    pub zero_truncate: bool,
}

/// Computed rank of one field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RankCell {
    /// Zero-truncated value; rendered as a bare `0`.
    Truncated,
    /// Percentile rank in `[0, 1]`; rendered with six fraction digits.
    Value(f64),
    /// The population has a single member, so the normalisation divides by zero.
    Undefined,
}

impl fmt::Display for RankCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Truncated => f.write_str("0"),
            Self::Value(y) => f.write_str(&format_fixed6(*y)),
            Self::Undefined => f.write_str("NaN"),
        }
    }
}

/// Per-record working triple: source column, parsed value, computed rank.
#[derive(Debug, Clone, Copy)]
pub struct RankedValue {
    pub column: usize,
    pub value: f64,
    pub rank: RankCell,
}

/// Rank `values`, returning one cell per input in the original order.
pub fn rank_values(values: &[f64], zero_truncate: bool) -> Vec<RankCell> {
    let mut a: Vec<RankedValue> = values
        .iter()
        .enumerate()
        .map(|(column, &value)| RankedValue {
            column,
            value,
            rank: RankCell::Undefined,
        })
        .collect();
    // stable: equal values keep column order
    a.sort_by(|x, y| x.value.total_cmp(&y.value));

    let mut i0 = 0;
    if zero_truncate {
        while i0 < a.len() && a[i0].value <= 0.0 {
            a[i0].rank = RankCell::Truncated;
            i0 += 1;
        }
    }

    let len = a.len();
    if i0 < len {
        let denom = (len - i0 - 1) as f64;
        let mut last = a[i0].value;
        let mut n = 1;
        for i in i0 + 1..=len {
            if i == len || a[i].value > last {
                let y = ((i - i0 - n) as f64 + 0.5 * (n - 1) as f64) / denom;
                let cell = if denom == 0.0 {
                    RankCell::Undefined
                } else {
                    RankCell::Value(y)
                };
                for v in &mut a[i - n..i] {
                    v.rank = cell;
                }
                if i < len {
                    n = 1;
                    last = a[i].value;
                }
            } else {
                n += 1;
            }
        }
    }

    a.sort_by_key(|v| v.column);
    a.into_iter().map(|v| v.rank).collect()
}

/// Record-level rank transform. Header rows pass through unchanged.
#[derive(Debug, Clone, Default)]
pub struct Ranker {
    opts: RankOptions,
}

impl Ranker {
    pub fn new(opts: RankOptions) -> Self {
        Self { opts }
    }

    /// Rank one record.
    pub fn transform(&mut self, record: &Record) -> SndResult<Record> {
        if record.is_header() {
            return Ok(record.clone());
        }
        let values = record.numeric_values()?;
        let ranks = rank_values(&values, self.opts.zero_truncate);
        if ranks.contains(&RankCell::Undefined) {
            warn!(
                line = record.line,
                row = record.identifier(),
                "rank undefined: only one value left in the ranked population"
            );
        }

        let mut fields = Vec::with_capacity(record.field_count());
        fields.push(record.identifier().to_owned());
        fields.extend(ranks.iter().map(RankCell::to_string));
        Ok(Record::new(fields).with_line(record.line))
    }
}

impl RecordTransform for Ranker {
    fn apply(&mut self, record: &Record) -> SndResult<Option<Record>> {
        self.transform(record).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(values: &[f64], zero_truncate: bool) -> Vec<String> {
        rank_values(values, zero_truncate)
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    #[test]
    fn ties_share_midpoint_rank() {
        assert_eq!(
            rendered(&[1.0, 2.0, 2.0, 4.0], false),
            vec!["0.000000", "0.500000", "0.500000", "1.000000"]
        );
    }

    #[test]
    fn ranks_follow_original_column_order() {
        assert_eq!(
            rendered(&[30.0, 10.0, 20.0], false),
            vec!["1.000000", "0.000000", "0.500000"]
        );
    }

    #[test]
    fn all_equal_values_rank_half() {
        assert_eq!(rendered(&[3.0; 5], false), vec!["0.500000"; 5]);
    }

    #[test]
    fn zero_truncation_drops_non_positive_values_from_population() {
        // population is {1, 3, 5}: denominator 2
        assert_eq!(
            rendered(&[0.0, 5.0, -2.0, 1.0, 3.0], true),
            vec!["0", "1.000000", "0", "0.000000", "0.500000"]
        );
    }

    #[test]
    fn without_truncation_zeros_are_ranked() {
        assert_eq!(
            rendered(&[0.0, 1.0, 0.0], false),
            vec!["0.250000", "1.000000", "0.250000"]
        );
    }

    #[test]
    fn single_member_population_is_undefined() {
        assert_eq!(rank_values(&[4.2], false), vec![RankCell::Undefined]);
        assert_eq!(
            rank_values(&[0.0, 4.2, 0.0], true),
            vec![RankCell::Truncated, RankCell::Undefined, RankCell::Truncated]
        );
        assert_eq!(RankCell::Undefined.to_string(), "NaN");
    }

    #[test]
    fn fully_truncated_and_empty_inputs() {
        assert_eq!(rendered(&[0.0, -1.0], true), vec!["0", "0"]);
        assert!(rank_values(&[], true).is_empty());
        assert!(rank_values(&[], false).is_empty());
    }

    #[test]
    fn ranker_passes_headers_and_keeps_identifier() {
        let mut ranker = Ranker::new(RankOptions::default());
        let header = Record::from_line("#\tA\tB\tC\tD");
        assert_eq!(ranker.transform(&header).unwrap(), header);

        let out = ranker.transform(&Record::from_line("id\t1\t2\t2\t4")).unwrap();
        assert_eq!(out.to_line(), "id\t0.000000\t0.500000\t0.500000\t1.000000");
    }

    #[test]
    fn ranker_emits_identifier_alone_for_empty_row() {
        let mut ranker = Ranker::new(RankOptions { zero_truncate: true });
        let out = ranker.transform(&Record::from_line("lonely")).unwrap();
        assert_eq!(out.fields, vec!["lonely"]);
    }

    #[test]
    fn ranker_fails_on_unparsable_field() {
        let mut ranker = Ranker::default();
        let err = ranker
            .transform(&Record::from_line("id\t1\tx\t3").with_line(7))
            .unwrap_err();
        assert!(err.to_string().contains("line 7 column 2"));
    }
}
