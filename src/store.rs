// src/store.rs
//! Storage collaborator: one directory per period, one file per logical table.
//!
//! Files are written to a `.partial` sibling and renamed into place, so an
//! interrupted run never leaves a half-written table behind.

use std::collections::BTreeMap;
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::csv::{self, Delim};
use crate::error::StorageError;
use crate::specs::LogicalTable;
use crate::table::StructuredRecord;

pub trait Storage {
    fn write_table(
        &mut self,
        period: u16,
        table: LogicalTable,
        rec: &StructuredRecord,
    ) -> Result<PathBuf, StorageError>;
}

impl<S: Storage + ?Sized> Storage for &mut S {
    fn write_table(&mut self, period: u16, table: LogicalTable, rec: &StructuredRecord) -> Result<PathBuf, StorageError> {
        (**self).write_table(period, table, rec)
    }
}

/* ---------------- filesystem ---------------- */

pub struct CsvStore {
    root: PathBuf,
    delim: Delim,
}

impl CsvStore {
    pub fn new(root: impl Into<PathBuf>, delim: Delim) -> Self {
        Self { root: root.into(), delim }
    }

    pub fn root(&self) -> &Path { &self.root }

    /// `<root>/<period>/<Stem>_<period>.<ext>`
    pub fn path_for(&self, period: u16, table: LogicalTable) -> PathBuf {
        self.root
            .join(period.to_string())
            .join(format!("{}_{}.{}", table.file_stem(), period, self.delim.ext()))
    }
}

fn io_err(path: &Path) -> impl FnOnce(io::Error) -> StorageError + '_ {
    move |source| StorageError::Io { path: path.to_path_buf(), source }
}

fn ensure_dir(dir: &Path) -> Result<(), StorageError> {
    if dir.exists() && !dir.is_dir() {
        return Err(StorageError::NotADirectory(dir.to_path_buf()));
    }
    fs::create_dir_all(dir).map_err(io_err(dir))
}

impl Storage for CsvStore {
    fn write_table(&mut self, period: u16, table: LogicalTable, rec: &StructuredRecord) -> Result<PathBuf, StorageError> {
        let path = self.path_for(period, table);
        if let Some(dir) = path.parent() {
            ensure_dir(dir)?;
        }

        let tmp = path.with_extension(format!("{}.partial", self.delim.ext()));
        {
            let file = fs::File::create(&tmp).map_err(io_err(&tmp))?;
            let mut w = BufWriter::new(file);
            csv::write_record(&mut w, rec, self.delim).map_err(io_err(&tmp))?;
            w.flush().map_err(io_err(&tmp))?;
        }
        fs::rename(&tmp, &path).map_err(io_err(&path))?;

        debug!(path = %path.display(), rows = rec.len(), "table written");
        Ok(path)
    }
}

/* ---------------- in memory ---------------- */

/// Keeps every written table; for tests, benches and dry runs.
#[derive(Default)]
pub struct MemoryStore {
    pub tables: BTreeMap<(u16, LogicalTable), StructuredRecord>,
}

impl MemoryStore {
    pub fn get(&self, period: u16, table: LogicalTable) -> Option<&StructuredRecord> {
        self.tables.get(&(period, table))
    }
}

impl Storage for MemoryStore {
    fn write_table(&mut self, period: u16, table: LogicalTable, rec: &StructuredRecord) -> Result<PathBuf, StorageError> {
        self.tables.insert((period, table), rec.clone());
        Ok(PathBuf::from(format!("mem://{period}/{}_{period}", table.file_stem())))
    }
}
