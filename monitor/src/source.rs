//! Sample production: dataset replay behind a generic next-sample
//! contract.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::SourceError;
use crate::types::{metric, Sample};

/// Producer of an ordered sequence of timestamped readings. The
/// shipped implementation replays a finite dataset cyclically; a live
/// sensor satisfies the same contract.
pub trait SampleSource: Send {
    fn next_sample(&mut self) -> Sample;

    /// Number of distinct records before the sequence wraps.
    fn period(&self) -> usize;
}

/// One dataset row: the primary reading plus auxiliary metrics kept
/// for charting.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleRecord {
    pub value: f64,
    pub auxiliary: BTreeMap<String, f64>,
}

impl SampleRecord {
    pub fn from_value(value: f64) -> Self {
        Self {
            value,
            auxiliary: BTreeMap::new(),
        }
    }
}

/// Cyclic replay over a finite set of records. The cursor is owned
/// state here, not a module global, so several sessions can replay
/// independently in one process.
#[derive(Debug)]
pub struct ReplaySource {
    records: Vec<SampleRecord>,
    cursor: usize,
    ticks_produced: u64,
}

impl ReplaySource {
    /// Fails fast on an empty dataset; once at least one record
    /// exists, `next_sample` can never fail mid-run.
    pub fn new(records: Vec<SampleRecord>) -> Result<Self, SourceError> {
        if records.is_empty() {
            return Err(SourceError::EmptyDataset);
        }
        Ok(Self {
            records,
            cursor: 0,
            ticks_produced: 0,
        })
    }

    pub fn from_values(values: Vec<f64>) -> Result<Self, SourceError> {
        Self::new(values.into_iter().map(SampleRecord::from_value).collect())
    }

    /// Load a clinical-trial CSV export and replay it.
    pub fn from_csv(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        Self::new(load_dataset(path)?)
    }
}

impl SampleSource for ReplaySource {
    fn next_sample(&mut self) -> Sample {
        let record = &self.records[self.cursor];
        let sample = Sample {
            timestamp_index: self.ticks_produced,
            value: record.value,
            auxiliary: record.auxiliary.clone(),
        };
        self.cursor = (self.cursor + 1) % self.records.len();
        self.ticks_produced += 1;
        sample
    }

    fn period(&self) -> usize {
        self.records.len()
    }
}

/// Raw CSV row. Column names follow the UCI clinical-trial export;
/// missing or unparsable cells default to zero rather than propagating
/// into arithmetic.
#[derive(Debug, Deserialize)]
struct DatasetRow {
    #[serde(default)]
    trestbps: Option<f64>,
    #[serde(default)]
    chol: Option<f64>,
    #[serde(default)]
    thalch: Option<f64>,
    #[serde(default)]
    fbs: Option<String>,
}

/// Parse the fasting-blood-sugar flag, which the export stores as
/// TRUE/FALSE or as a number depending on vintage.
fn parse_flag(raw: Option<&str>) -> f64 {
    match raw.map(str::trim) {
        Some(s) if s.eq_ignore_ascii_case("true") => 1.0,
        Some(s) if s.eq_ignore_ascii_case("false") => 0.0,
        Some(s) => s
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .map_or(0.0, |v| if v != 0.0 { 1.0 } else { 0.0 }),
        None => 0.0,
    }
}

/// Decode the dataset into replayable records.
pub fn load_dataset(path: impl AsRef<Path>) -> Result<Vec<SampleRecord>, SourceError> {
    let reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path.as_ref())?;
    decode_dataset(reader)
}

/// Decode an already-open CSV export.
pub fn decode_dataset<R: std::io::Read>(
    mut reader: csv::Reader<R>,
) -> Result<Vec<SampleRecord>, SourceError> {
    let mut records = Vec::new();
    for row in reader.deserialize::<DatasetRow>() {
        let row = row?;
        let mut auxiliary = BTreeMap::new();
        auxiliary.insert(
            metric::CHOLESTEROL.to_string(),
            row.chol.filter(|v| v.is_finite()).unwrap_or(0.0),
        );
        auxiliary.insert(
            metric::MAX_HEART_RATE.to_string(),
            row.thalch.filter(|v| v.is_finite()).unwrap_or(0.0),
        );
        auxiliary.insert(
            metric::FASTING_BLOOD_SUGAR.to_string(),
            parse_flag(row.fbs.as_deref()),
        );
        records.push(SampleRecord {
            value: row.trestbps.filter(|v| v.is_finite()).unwrap_or(0.0),
            auxiliary,
        });
    }
    if records.is_empty() {
        return Err(SourceError::EmptyDataset);
    }
    Ok(records)
}
