use chrono::NaiveDate;
use serde::Deserialize;

/// One trading day.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceRow {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: i64,
}

/// A data line of the provider's CSV, under the source column names.
#[derive(Debug, Deserialize)]
pub(crate) struct SourceRow {
    pub timestamp: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: i64,
}

impl From<SourceRow> for PriceRow {
    fn from(row: SourceRow) -> Self {
        Self {
            date: row.timestamp,
            open: row.open,
            high: row.high,
            low: row.low,
            close: row.close,
            volume: row.volume,
        }
    }
}
