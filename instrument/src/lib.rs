//! Capture of exchange-model events as column tables for plotting.
//!
//! The model emits `tracing::info!` events whose target names a table
//! (`demand`, `excess_demand`, `pareto`). [`SeriesSubscriber`] turns each event
//! into one row; columns appear the first time a field is seen.
//!
//! # Usage
//!
//! ```ignore
//! let mut run = instrument::PlotRun::new("plots", "price_sweep");
//! exchange_core::market_clearing_errors(&config, &grid)?;
//! let frames = run.frames();
//! // run drops → plots/price_sweep/{demand,excess_demand}.parquet
//! ```

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use polars::prelude::*;
use tracing::field::{Field, Visit};
use tracing::span::{Attributes, Record};
use tracing::subscriber::Interest;
use tracing::{Event, Id, Metadata, Subscriber};

// === COLUMNS ===

/// One recorded column. Integer and boolean fields are stored as `U64`/`F64`.
#[derive(Debug, Clone, PartialEq)]
pub enum SeriesColumn {
    F64(Vec<f64>),
    U64(Vec<u64>),
    Str(Vec<String>),
}

impl SeriesColumn {
    fn empty_like(cell: &Cell, rows: usize) -> Self {
        match cell {
            Cell::Num(_) => SeriesColumn::F64(vec![0.0; rows]),
            Cell::Count(_) => SeriesColumn::U64(vec![0; rows]),
            Cell::Text(_) => SeriesColumn::Str(vec![String::new(); rows]),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            SeriesColumn::F64(v) => v.len(),
            SeriesColumn::U64(v) => v.len(),
            SeriesColumn::Str(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_f64(&self) -> Option<&[f64]> {
        match self {
            SeriesColumn::F64(v) => Some(v.as_slice()),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&[String]> {
        match self {
            SeriesColumn::Str(v) => Some(v.as_slice()),
            _ => None,
        }
    }

    fn pad_to(&mut self, rows: usize) {
        match self {
            SeriesColumn::F64(v) => v.resize(rows, 0.0),
            SeriesColumn::U64(v) => v.resize(rows, 0),
            SeriesColumn::Str(v) => v.resize(rows, String::new()),
        }
    }

    /// Appends if the cell type matches; a mismatched cell is left to padding.
    fn push(&mut self, cell: Cell) {
        match (self, cell) {
            (SeriesColumn::F64(v), Cell::Num(x)) => v.push(x),
            (SeriesColumn::F64(v), Cell::Count(x)) => v.push(x as f64),
            (SeriesColumn::U64(v), Cell::Count(x)) => v.push(x),
            (SeriesColumn::Str(v), Cell::Text(s)) => v.push(s),
            _ => {}
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Cell {
    Num(f64),
    Count(u64),
    Text(String),
}

// === TABLES ===

/// Rows recorded under one tracing target. Columns are kept name-ordered.
#[derive(Debug, Clone, Default)]
pub struct SeriesTable {
    pub columns: BTreeMap<String, SeriesColumn>,
    pub rows: usize,
}

impl SeriesTable {
    fn push_row(&mut self, cells: Vec<(String, Cell)>) {
        let rows = self.rows;
        for (name, cell) in cells {
            self.columns
                .entry(name)
                .or_insert_with(|| SeriesColumn::empty_like(&cell, rows))
                .push(cell);
        }
        self.rows += 1;
        for col in self.columns.values_mut() {
            col.pad_to(self.rows);
        }
    }

    pub fn column(&self, name: &str) -> Option<&SeriesColumn> {
        self.columns.get(name)
    }

    pub fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        let columns: Vec<Column> = self
            .columns
            .iter()
            .map(|(name, col)| match col {
                SeriesColumn::F64(v) => Column::new(name.into(), v),
                SeriesColumn::U64(v) => Column::new(name.into(), v),
                SeriesColumn::Str(v) => Column::new(name.into(), v),
            })
            .collect();
        DataFrame::new(columns)
    }
}

/// All tables recorded on this thread, keyed by target.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    pub tables: BTreeMap<String, SeriesTable>,
}

impl Recorder {
    pub fn table(&self, target: &str) -> Option<&SeriesTable> {
        self.tables.get(target)
    }

    /// Tables that fail to convert are dropped.
    pub fn to_dataframes(&self) -> HashMap<String, DataFrame> {
        self.tables
            .iter()
            .filter_map(|(name, table)| table.to_dataframe().ok().map(|df| (name.clone(), df)))
            .collect()
    }
}

thread_local! {
    static RECORDER: RefCell<Recorder> = RefCell::default();
}

// === SUBSCRIBER ===

#[derive(Default)]
struct RowVisitor {
    cells: Vec<(String, Cell)>,
}

impl RowVisitor {
    fn put(&mut self, field: &Field, cell: Cell) {
        self.cells.push((field.name().to_string(), cell));
    }
}

impl Visit for RowVisitor {
    fn record_f64(&mut self, field: &Field, value: f64) {
        self.put(field, Cell::Num(value));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.put(field, Cell::Count(value));
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.put(field, Cell::Num(value as f64));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.put(field, Cell::Num(if value { 1.0 } else { 0.0 }));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.put(field, Cell::Text(value.to_string()));
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.put(field, Cell::Text(format!("{:?}", value)));
    }
}

/// Records info-level events into the thread-local [`Recorder`].
///
/// With no targets configured every event is recorded.
#[derive(Debug, Clone, Default)]
pub struct SeriesSubscriber {
    targets: Vec<String>,
}

impl SeriesSubscriber {
    pub fn for_targets(targets: &[&str]) -> Self {
        Self {
            targets: targets.iter().map(|t| t.to_string()).collect(),
        }
    }
}

impl Subscriber for SeriesSubscriber {
    // Several subscribers with different filters can be live across test threads.
    fn register_callsite(&self, _metadata: &'static Metadata<'static>) -> Interest {
        Interest::sometimes()
    }

    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.is_event()
            && *metadata.level() <= tracing::Level::INFO
            && (self.targets.is_empty() || self.targets.iter().any(|t| t == metadata.target()))
    }

    fn new_span(&self, _span: &Attributes<'_>) -> Id {
        Id::from_u64(1)
    }

    fn record(&self, _span: &Id, _values: &Record<'_>) {}

    fn record_follows_from(&self, _span: &Id, _follows: &Id) {}

    fn event(&self, event: &Event<'_>) {
        let mut visitor = RowVisitor::default();
        event.record(&mut visitor);
        let target = event.metadata().target().to_string();

        RECORDER.with(|r| {
            r.borrow_mut()
                .tables
                .entry(target)
                .or_default()
                .push_row(visitor.cells);
        });
    }

    fn enter(&self, _span: &Id) {}

    fn exit(&self, _span: &Id) {}
}

/// Install a record-everything [`SeriesSubscriber`] as the global default.
/// Later calls are no-ops.
pub fn install_subscriber() {
    let _ = tracing::subscriber::set_global_default(SeriesSubscriber::default());
}

/// Take everything recorded on this thread so far.
pub fn drain() -> Recorder {
    RECORDER.with(|r| std::mem::take(&mut *r.borrow_mut()))
}

pub fn clear() {
    RECORDER.with(|r| *r.borrow_mut() = Recorder::default());
}

pub fn drain_to_dataframes() -> HashMap<String, DataFrame> {
    drain().to_dataframes()
}

// === PARQUET OUTPUT ===

fn io_err(e: std::io::Error) -> PolarsError {
    PolarsError::IO {
        error: e.into(),
        msg: None,
    }
}

/// Write each frame to `{dir}/{name}.parquet`.
pub fn save_parquet(dfs: &mut HashMap<String, DataFrame>, dir: &Path) -> PolarsResult<()> {
    std::fs::create_dir_all(dir).map_err(io_err)?;
    for (name, df) in dfs.iter_mut() {
        let file = std::fs::File::create(dir.join(format!("{}.parquet", name))).map_err(io_err)?;
        ParquetWriter::new(file).finish(df)?;
    }
    Ok(())
}

fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .take(60)
        .collect()
}

/// Clears the recorder on creation and writes parquet into `{parent}/{name}/`
/// on drop, so a plotting script can pick up a whole run at once.
pub struct PlotRun {
    dir: PathBuf,
    frames: Option<HashMap<String, DataFrame>>,
}

impl PlotRun {
    pub fn new(parent: impl Into<PathBuf>, name: &str) -> Self {
        clear();
        install_subscriber();
        Self {
            dir: parent.into().join(sanitize(name)),
            frames: None,
        }
    }

    /// Drains on first call, cached afterwards.
    pub fn frames(&mut self) -> &HashMap<String, DataFrame> {
        self.frames.get_or_insert_with(drain_to_dataframes)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl Drop for PlotRun {
    fn drop(&mut self) {
        let mut dfs = self.frames.take().unwrap_or_else(drain_to_dataframes);
        if dfs.is_empty() {
            return;
        }
        if let Err(e) = save_parquet(&mut dfs, &self.dir) {
            eprintln!("PlotRun({}): failed to write parquet: {}", self.dir.display(), e);
        }
    }
}
