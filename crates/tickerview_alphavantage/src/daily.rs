use bon::Builder;
use serde::{Deserialize, Serialize};
use crate::method::Method;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputSize {
    Compact,
    #[default]
    Full,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    Json,
    #[default]
    Csv,
}

#[derive(Serialize, Deserialize, Debug, Builder)]
#[builder(on(String, into))]
pub struct DailyParams {
    pub symbol: String,
    #[serde(rename = "outputsize")]
    #[builder(default)]
    pub output_size: OutputSize,
    #[serde(rename = "datatype")]
    #[builder(default)]
    pub data_type: DataType,
}

/// Daily OHLCV history of one equity, newest day first.
pub struct TimeSeriesDaily;

impl Method for TimeSeriesDaily {
    const PATH: &'static str = "https://www.alphavantage.co/query";
    const FUNCTION: &'static str = "TIME_SERIES_DAILY";

    type Params = DailyParams;
}
