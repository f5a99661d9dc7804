pub mod parse;
pub mod price_row;
pub mod series;

pub use parse::parse_csv;
pub use price_row::PriceRow;
pub use series::PriceSeries;

use polars::prelude::PolarsError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SeriesError {
    #[error("missing required column '{0}'")]
    MissingColumn(String),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),
    #[error("column {0} has an empty value")]
    MissingValue(&'static str),
    #[error("year {0} is out of the supported date range")]
    InvalidYear(i32),
}
