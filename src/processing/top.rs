//! Top-2 value report per row.

use crate::error::SndResult;
use crate::types::{Record, format_fixed6};

use super::RecordTransform;

/// Placeholder for a missing value or label.
pub const MISSING: &str = "NA";

/// Largest and second-largest values of one row with their column indices.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TopTwo {
    pub first: Option<(usize, f64)>,
    pub second: Option<(usize, f64)>,
}

impl TopTwo {
    /// Single scan with strict comparisons: an equal value never displaces an earlier one.
    ///
    /// Indices are positions in `values` offset by `base`.
    pub fn scan(values: &[f64], base: usize) -> Self {
        let mut top = Self::default();
        for (i, &x) in values.iter().enumerate() {
            let cand = (i + base, x);
            match top.first {
                Some((_, max)) if x <= max => {
                    if top.second.is_none_or(|(_, max2)| x > max2) {
                        top.second = Some(cand);
                    }
                }
                _ => {
                    top.second = top.first;
                    top.first = Some(cand);
                }
            }
        }
        top
    }
}

/// Reports, for every data row, the two largest values and the header labels of their columns.
#[derive(Debug, Clone, Default)]
pub struct TopTwoReporter {
    header: Option<Record>,
}

impl TopTwoReporter {
    pub fn new() -> Self {
        Self::default()
    }

    fn label(&self, column: Option<usize>) -> String {
        column
            .and_then(|i| self.header.as_ref()?.fields.get(i).cloned())
            .unwrap_or_else(|| MISSING.to_owned())
    }

    /// Remember `record` if it is a header; otherwise build its report line.
    ///
    /// Header rows produce no output.
    pub fn observe(&mut self, record: &Record) -> SndResult<Option<Record>> {
        if record.is_header() {
            self.header = Some(record.clone());
            return Ok(None);
        }
        let top = TopTwo::scan(&record.numeric_values()?, 1);
        let value = |slot: Option<(usize, f64)>| {
            slot.map(|(_, v)| format_fixed6(v))
                .unwrap_or_else(|| MISSING.to_owned())
        };
        let fields = vec![
            record.identifier().to_owned(),
            value(top.first),
            value(top.second),
            self.label(top.first.map(|(i, _)| i)),
            self.label(top.second.map(|(i, _)| i)),
        ];
        Ok(Some(Record::new(fields).with_line(record.line)))
    }
}

impl RecordTransform for TopTwoReporter {
    fn apply(&mut self, record: &Record) -> SndResult<Option<Record>> {
        self.observe(record)
    }
}
