use chrono::NaiveDate;
use itertools::Itertools;
use serde::{Serialize, Serializer};
use tickerview_series::{PriceSeries, SeriesError};
use tickerview_shared_models::PriceColumn;

pub const METRIC: &str = "metric";
pub const PRICE: &str = "price";

/// A single (Date, metric, price) tuple of the long-form table.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct FoldedPrice {
    #[serde(rename = "Date", serialize_with = "serialize_date")]
    pub date: NaiveDate,
    pub metric: PriceColumn,
    pub price: f64,
}

fn serialize_date<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&date.format(crate::DATE_FORMAT))
}

/// Turns the wide price table into long form: for every row, one tuple per
/// column, columns in the order given.
pub fn fold(series: &PriceSeries, columns: &[PriceColumn]) -> Result<Vec<FoldedPrice>, SeriesError> {
    let dates = series.dates()?;
    let values = columns
        .iter()
        .map(|&column| series.values(column))
        .collect::<Result<Vec<_>, _>>()?;

    Ok((0..dates.len())
        .cartesian_product(0..columns.len())
        .map(|(row, c)| FoldedPrice {
            date: dates[row],
            metric: columns[c],
            price: values[c][row],
        })
        .collect())
}
