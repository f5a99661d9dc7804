use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    #[default]
    Line,
    Candlestick,
}

impl fmt::Display for ChartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChartType::Line => write!(f, "line"),
            ChartType::Candlestick => write!(f, "candlestick"),
        }
    }
}

impl FromStr for ChartType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "line" => Ok(ChartType::Line),
            "candlestick" => Ok(ChartType::Candlestick),
            other => Err(format!("unknown chart type '{other}', expected line or candlestick")),
        }
    }
}

/// One of the four daily price points a chart can plot.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum PriceColumn {
    Open,
    High,
    Low,
    Close,
}

impl PriceColumn {
    pub const ALL: [PriceColumn; 4] = [
        PriceColumn::Open,
        PriceColumn::High,
        PriceColumn::Low,
        PriceColumn::Close,
    ];

    /// Canonical (display) column name.
    pub fn name(&self) -> &'static str {
        match self {
            PriceColumn::Open => "Open",
            PriceColumn::High => "High",
            PriceColumn::Low => "Low",
            PriceColumn::Close => "Close",
        }
    }

    /// Column name as it appears in the provider's CSV header.
    pub fn source_name(&self) -> &'static str {
        match self {
            PriceColumn::Open => "open",
            PriceColumn::High => "high",
            PriceColumn::Low => "low",
            PriceColumn::Close => "close",
        }
    }
}

impl fmt::Display for PriceColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PriceColumn {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PriceColumn::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown column '{s}', expected Open, High, Low or Close"))
    }
}

/// Everything one render cycle needs, as picked by the user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChartRequest {
    pub symbol: String,
    pub start_year: i32,
    pub end_year: i32,
    #[serde(default)]
    pub chart_type: ChartType,
    #[serde(default)]
    pub columns: Vec<PriceColumn>,
}

impl ChartRequest {
    /// Columns the chart will actually use: all four for candlesticks,
    /// otherwise the selection in the order it was made, without repeats.
    pub fn effective_columns(&self) -> Vec<PriceColumn> {
        match self.chart_type {
            ChartType::Candlestick => PriceColumn::ALL.to_vec(),
            ChartType::Line => self.columns.iter().copied().unique().collect(),
        }
    }

    pub fn trimmed_symbol(&self) -> &str {
        self.symbol
            .trim_matches(|c: char| c == '"' || c == '\'' || c.is_whitespace())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(chart_type: ChartType, columns: Vec<PriceColumn>) -> ChartRequest {
        ChartRequest {
            symbol: " 'IBM' ".to_string(),
            start_year: 2020,
            end_year: 2021,
            chart_type,
            columns,
        }
    }

    #[test]
    fn candlestick_always_uses_all_columns() {
        let req = request(ChartType::Candlestick, vec![PriceColumn::Close]);
        assert_eq!(req.effective_columns(), PriceColumn::ALL.to_vec());
    }

    #[test]
    fn line_keeps_selection_order_and_drops_repeats() {
        let req = request(
            ChartType::Line,
            vec![PriceColumn::Close, PriceColumn::Open, PriceColumn::Close],
        );
        assert_eq!(
            req.effective_columns(),
            vec![PriceColumn::Close, PriceColumn::Open]
        );
    }

    #[test]
    fn symbol_is_trimmed_of_quotes_and_spaces() {
        let req = request(ChartType::Line, vec![]);
        assert_eq!(req.trimmed_symbol(), "IBM");
    }

    #[test]
    fn parses_names_case_insensitively() {
        assert_eq!("close".parse::<PriceColumn>(), Ok(PriceColumn::Close));
        assert_eq!("Candlestick".parse::<ChartType>(), Ok(ChartType::Candlestick));
        assert!("volume".parse::<PriceColumn>().is_err());
    }

    #[test]
    fn request_deserializes_with_defaults() {
        let req: ChartRequest =
            serde_json::from_str(r#"{"symbol":"AAA","start_year":2020,"end_year":2020}"#).unwrap();
        assert_eq!(req.chart_type, ChartType::Line);
        assert!(req.columns.is_empty());

        let req: ChartRequest = serde_json::from_str(
            r#"{"symbol":"AAA","start_year":2020,"end_year":2021,"chart_type":"candlestick","columns":["Open"]}"#,
        )
        .unwrap();
        assert_eq!(req.chart_type, ChartType::Candlestick);
        assert_eq!(req.columns, vec![PriceColumn::Open]);
    }
}
