//! In-memory copy of a monthly data file.
//!
//! A command reads the whole file into a [`RecordStore`], changes records in
//! memory and writes the whole file back. The file on disk is only ever
//! replaced as a unit: the new content goes to a sibling temporary file
//! which is then renamed over the data file.

use super::duration::TimeFormat;
use super::error::JtlError;
use super::record::{validate_record, Record, HEADER};
use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

#[derive(Debug, Clone)]
pub struct RecordStore {
    path: PathBuf,
    header: Vec<String>,
    records: Vec<Record>,
}

impl RecordStore {
    /// Creates an empty store bound to `path`. Nothing is written until
    /// [`RecordStore::write`] is called.
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            header: HEADER.iter().map(|column| column.to_string()).collect(),
            records: Vec::new(),
        }
    }

    /// Loads every row of the data file. A missing or empty file gives an
    /// empty store.
    pub fn read(path: &Path) -> Result<Self> {
        let mut store = Self::new(path);
        if !path.exists() {
            return Ok(store);
        }

        let mut reader = csv::ReaderBuilder::new().has_headers(false).flexible(true).from_path(path)?;
        let mut rows = reader.records();

        if let Some(header) = rows.next() {
            let header = header?;
            if header.len() != HEADER.len() {
                return Err(JtlError::MalformedRow { row: 0, columns: header.len() }.into());
            }
        }

        for (row, result) in rows.enumerate() {
            let fields = result?;
            if fields.len() != HEADER.len() {
                return Err(JtlError::MalformedRow { row: row + 1, columns: fields.len() }.into());
            }
            store.records.push(Record {
                index: row,
                id: fields[0].to_string(),
                started_ts: fields[1].to_string(),
                comment: fields[2].to_string(),
                time_spent: fields[3].to_string(),
                ticket: fields[4].to_string(),
                category: fields[5].to_string(),
            });
        }

        tracing::debug!(rows = store.records.len(), path = %path.display(), "Read data file");
        Ok(store)
    }

    /// Replaces the data file with the header and all records, in their
    /// current order.
    ///
    /// Rows go to a temporary file next to the data file which is then
    /// persisted over it. When anything fails the temporary file is removed
    /// and the data file is left as it was.
    pub fn write(&self) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir)?;

        let mut tmp = NamedTempFile::new_in(&dir)?;
        {
            let mut writer = csv::Writer::from_writer(tmp.as_file_mut());
            writer.write_record(&self.header)?;
            for record in &self.records {
                writer.write_record(record.as_row())?;
            }
            writer.flush()?;
        }
        // Dropping the returned temp file deletes it.
        tmp.persist(&self.path).map_err(|e| e.error)?;

        tracing::debug!(rows = self.records.len(), path = %self.path.display(), "Flushed data file");
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns copies of the records matching `predicate`, in store order.
    pub fn filter<P>(&self, predicate: P) -> Vec<Record>
    where
        P: Fn(&Record) -> bool,
    {
        self.records.iter().filter(|record| predicate(record)).cloned().collect()
    }

    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.iter().find(|record| record.index == index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Record> {
        self.records.iter_mut().find(|record| record.index == index)
    }

    /// Appends a record and assigns it the next row index.
    pub fn add(&mut self, mut record: Record) -> usize {
        record.index = self.records.len();
        let index = record.index;
        self.records.push(record);
        index
    }

    /// Replaces the record that has the same row index as `record`.
    pub fn update(&mut self, record: Record) -> Result<(), JtlError> {
        let slot = self.get_mut(record.index).ok_or(JtlError::RecordNotFound(record.index))?;
        *slot = record;
        tracing::debug!(index = slot.index, "Updated record");
        Ok(())
    }

    /// Stable sort by calendar day of `StartedTs`; records of one day keep
    /// their file order.
    pub fn sort_by_day(&mut self, format: &TimeFormat) -> Result<(), JtlError> {
        let days = self
            .records
            .iter()
            .map(|record| format.truncate_to_date(&record.started_ts))
            .collect::<Result<Vec<_>, JtlError>>()?;
        let mut keyed: Vec<_> = days.into_iter().zip(self.records.drain(..)).collect();
        keyed.sort_by_key(|(day, _)| *day);
        self.records = keyed.into_iter().map(|(_, record)| record).collect();
        Ok(())
    }

    /// Logs every record that would not pass validation. Such rows are kept
    /// so that older files stay readable.
    pub fn warn_invalid(&self, key_pattern: &str, format: &TimeFormat) {
        for record in &self.records {
            if let Err(e) = validate_record(record, key_pattern, format) {
                tracing::warn!(index = record.index, error = %e, "Invalid record in data file");
            }
        }
    }
}
