//! Column projection by header label.

use std::collections::HashSet;
use std::io::Read;

use tracing::{debug, warn};

use crate::error::SndResult;
use crate::ingestion::SndReader;
use crate::types::Record;

use super::RecordTransform;

/// Keeps the identifier column plus every column whose header label is in a name set.
///
/// The index list is computed from each header row and reused for the data rows that follow.
/// Data rows seen before any header are projected with an empty list, i.e. emitted as empty
/// lines.
#[derive(Debug, Clone, Default)]
pub struct ColumnSelector {
    names: HashSet<String>,
    columns: Vec<usize>,
    warned_before_header: bool,
}

impl ColumnSelector {
    /// Build the membership set from an iterator of names.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// Build the membership set from a name list: the identifier of every row.
    ///
    /// Blank lines are ignored, so columns with an empty label are never selected.
    pub fn from_reader<R: Read>(reader: SndReader<R>) -> SndResult<Self> {
        let mut names = HashSet::new();
        for record in reader {
            let record = record?;
            if !record.identifier().is_empty() {
                names.insert(record.identifier().to_owned());
            }
        }
        debug!(names = names.len(), "loaded column name list");
        Ok(Self {
            names,
            ..Default::default()
        })
    }

    /// Whether `name` is selected.
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// The index list cached from the last header row.
    pub fn columns(&self) -> &[usize] {
        &self.columns
    }

    fn project(&self, record: &Record) -> Record {
        let fields = self
            .columns
            .iter()
            .map(|&i| record.fields.get(i).cloned().unwrap_or_default())
            .collect();
        Record::new(fields).with_line(record.line)
    }

    /// Project one record, refreshing the cached index list on header rows.
    pub fn transform(&mut self, record: &Record) -> SndResult<Record> {
        if record.is_header() {
            self.columns = std::iter::once(0)
                .chain(
                    record
                        .fields
                        .iter()
                        .enumerate()
                        .skip(1)
                        .filter(|(_, label)| self.names.contains(label.as_str()))
                        .map(|(i, _)| i),
                )
                .collect();
            debug!(
                line = record.line,
                kept = self.columns.len() - 1,
                "selected columns from header"
            );
        } else if self.columns.is_empty() && !self.warned_before_header {
            warn!(
                line = record.line,
                "data row before any header row; emitting empty lines until a header is seen"
            );
            self.warned_before_header = true;
        }
        Ok(self.project(record))
    }
}

impl RecordTransform for ColumnSelector {
    fn apply(&mut self, record: &Record) -> SndResult<Option<Record>> {
        self.transform(record).map(Some)
    }
}
