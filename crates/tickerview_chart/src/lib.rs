pub mod candle;
pub mod fold;
pub mod html;
pub mod spec;

pub use candle::CandleColor;
pub use fold::{FoldedPrice, fold};
pub use html::render_html;
pub use spec::ChartSpec;

use serde_json::{Map, Value};
use spec::*;
use thiserror::Error;
use tickerview_series::{PriceSeries, SeriesError};
use tickerview_shared_models::{ChartType, PriceColumn};

pub const DATE: &str = "Date";
/// Zero time, no offset: the browser reads it as local midnight. A bare
/// `YYYY-MM-DD` would be read as UTC.
pub const DATE_FORMAT: &str = "%Y-%m-%dT00:00:00";
/// Materialized candle colour carried by every candlestick datum.
pub const COLOR: &str = "Color";
pub const HOVER: &str = "hover";
pub const PRICE_TITLE: &str = "Price ($)";

#[derive(Error, Debug)]
pub enum ChartError {
    #[error(transparent)]
    Series(#[from] SeriesError),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

fn date_axis() -> PositionField {
    PositionField::new(DATE, FieldType::Temporal).title(DATE)
}

fn candle_color() -> ColorField {
    ColorField::Literal {
        field: COLOR.to_string(),
        kind: FieldType::Nominal,
        scale: None,
    }
}

/// Wide table the chart-level data is made of: `Date` in [`DATE_FORMAT`],
/// then one field per column, plus the candle colour when asked for.
fn table(series: &PriceSeries, columns: &[PriceColumn], with_color: bool) -> Result<Vec<Value>, SeriesError> {
    let dates = series.dates()?;
    let values = columns
        .iter()
        .map(|&column| series.values(column))
        .collect::<Result<Vec<_>, _>>()?;
    let colors: Vec<Option<CandleColor>> = if with_color {
        let open = series.values(PriceColumn::Open)?;
        let close = series.values(PriceColumn::Close)?;
        open.into_iter()
            .zip(close)
            .map(|(o, c)| Some(CandleColor::of(o, c)))
            .collect()
    } else {
        vec![None; dates.len()]
    };

    Ok(dates
        .iter()
        .enumerate()
        .map(|(row, date)| {
            let mut datum = Map::new();
            datum.insert(DATE.to_string(), Value::from(date.format(DATE_FORMAT).to_string()));
            for (c, column) in columns.iter().enumerate() {
                datum.insert(column.name().to_string(), Value::from(values[c][row]));
            }
            if let Some(color) = colors[row] {
                datum.insert(COLOR.to_string(), Value::from(color.as_str()));
            }
            Value::Object(datum)
        })
        .collect())
}

fn line_layer(series: &PriceSeries, columns: &[PriceColumn]) -> Result<Layer, ChartError> {
    let values = fold(series, columns)?
        .iter()
        .map(serde_json::to_value)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Layer {
        data: Some(InlineData { values }),
        mark: Mark::Line,
        encoding: Encoding {
            x: Some(date_axis()),
            y: Some(
                PositionField::new(fold::PRICE, FieldType::Quantitative)
                    .title(PRICE_TITLE)
                    .unzeroed(),
            ),
            color: Some(ColorField::Scaled {
                field: fold::METRIC.to_string(),
                kind: FieldType::Nominal,
                legend: Legend { title: None },
            }),
            ..Default::default()
        },
        params: vec![],
    })
}

/// Open-to-close bodies and low-to-high wicks, both coloured per row.
fn candle_layers() -> Vec<Layer> {
    let bars = Layer {
        data: None,
        mark: Mark::Bar,
        encoding: Encoding {
            x: Some(date_axis()),
            y: Some(
                PositionField::new(PriceColumn::Open.name(), FieldType::Quantitative)
                    .title(PRICE_TITLE)
                    .unzeroed(),
            ),
            y2: Some(SecondaryField {
                field: PriceColumn::Close.name().to_string(),
            }),
            color: Some(candle_color()),
            ..Default::default()
        },
        params: vec![],
    };

    let wicks = Layer {
        data: None,
        mark: Mark::Rule,
        encoding: Encoding {
            x: Some(date_axis()),
            y: Some(
                PositionField::new(PriceColumn::Low.name(), FieldType::Quantitative)
                    .title(PRICE_TITLE)
                    .unzeroed(),
            ),
            y2: Some(SecondaryField {
                field: PriceColumn::High.name().to_string(),
            }),
            color: Some(candle_color()),
            ..Default::default()
        },
        params: vec![],
    };

    vec![bars, wicks]
}

/// Invisible vertical rule per date that lights up under the pointer and
/// carries the tooltip.
fn mouseover_rule(columns: &[PriceColumn]) -> Layer {
    let tooltip = std::iter::once(TooltipField {
        field: DATE.to_string(),
        kind: FieldType::Temporal,
    })
    .chain(columns.iter().map(|c| TooltipField {
        field: c.name().to_string(),
        kind: FieldType::Quantitative,
    }))
    .collect();

    Layer {
        data: None,
        mark: Mark::Rule,
        encoding: Encoding {
            x: Some(date_axis()),
            opacity: Some(ConditionalValue {
                condition: ParamCondition {
                    param: HOVER.to_string(),
                    value: 0.25,
                    empty: false,
                },
                value: 0.0,
            }),
            tooltip,
            ..Default::default()
        },
        params: vec![Param {
            name: HOVER.to_string(),
            select: Select::Point {
                fields: vec![DATE.to_string()],
                nearest: true,
                on: "mouseover".to_string(),
                clear: "mouseout".to_string(),
            },
            bind: None,
        }],
    }
}

fn pan_zoom() -> Param {
    Param {
        name: "grid".to_string(),
        select: Select::Interval {
            encodings: vec!["x".to_string(), "y".to_string()],
        },
        bind: Some("scales".to_string()),
    }
}

/// Declarative chart for an already filtered series.
///
/// Line charts draw `columns` in long form. Candlesticks always draw all
/// four price columns and ignore `columns`; the series must still carry them.
pub fn build_chart(
    series: &PriceSeries,
    chart_type: ChartType,
    columns: &[PriceColumn],
) -> Result<ChartSpec, ChartError> {
    let columns: &[PriceColumn] = match chart_type {
        ChartType::Line => columns,
        ChartType::Candlestick => &PriceColumn::ALL,
    };

    let mut layer = match chart_type {
        ChartType::Line => vec![line_layer(series, columns)?],
        ChartType::Candlestick => candle_layers(),
    };
    if let Some(first) = layer.first_mut() {
        first.params.push(pan_zoom());
    }
    layer.push(mouseover_rule(columns));

    let values = table(series, columns, chart_type == ChartType::Candlestick)?;

    tracing::debug!(%chart_type, rows = values.len(), layers = layer.len(), "built chart");

    Ok(ChartSpec {
        schema: SCHEMA.to_string(),
        width: "container".to_string(),
        data: InlineData { values },
        layer,
    })
}
