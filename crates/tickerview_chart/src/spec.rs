//! Typed subset of the Vega-Lite v5 grammar, enough for layered price charts.

use serde::Serialize;
use serde_json::Value;

pub const SCHEMA: &str = "https://vega.github.io/schema/vega-lite/v5.json";

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ChartSpec {
    #[serde(rename = "$schema")]
    pub schema: String,
    pub width: String,
    pub data: InlineData,
    pub layer: Vec<Layer>,
}

#[derive(Serialize, Debug, Clone, PartialEq, Default)]
pub struct InlineData {
    pub values: Vec<Value>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Layer {
    /// Overrides the chart-level data for this layer only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<InlineData>,
    pub mark: Mark,
    pub encoding: Encoding,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<Param>,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Mark {
    Line,
    Bar,
    Rule,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Temporal,
    Quantitative,
    Nominal,
}

#[derive(Serialize, Debug, Clone, PartialEq, Default)]
pub struct Encoding {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<PositionField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<PositionField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y2: Option<SecondaryField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<ColorField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<ConditionalValue>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tooltip: Vec<TooltipField>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PositionField {
    pub field: String,
    #[serde(rename = "type")]
    pub kind: FieldType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<Scale>,
}

impl PositionField {
    pub fn new(field: &str, kind: FieldType) -> Self {
        Self {
            field: field.to_string(),
            kind,
            title: None,
            scale: None,
        }
    }

    pub fn title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    /// Fit the domain to the data instead of stretching it down to zero.
    pub fn unzeroed(mut self) -> Self {
        self.scale = Some(Scale { zero: false });
        self
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct SecondaryField {
    pub field: String,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scale {
    pub zero: bool,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Legend {
    pub title: Option<String>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum ColorField {
    /// One colour per distinct value, explained by a legend.
    Scaled {
        field: String,
        #[serde(rename = "type")]
        kind: FieldType,
        legend: Legend,
    },
    /// Field values are CSS colours drawn as they are (`"scale": null`).
    Literal {
        field: String,
        #[serde(rename = "type")]
        kind: FieldType,
        scale: Option<Scale>,
    },
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ConditionalValue {
    pub condition: ParamCondition,
    pub value: f64,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ParamCondition {
    pub param: String,
    pub value: f64,
    /// Whether an empty selection counts as matching every datum.
    pub empty: bool,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct TooltipField {
    pub field: String,
    #[serde(rename = "type")]
    pub kind: FieldType,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Param {
    pub name: String,
    pub select: Select,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bind: Option<String>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Select {
    Point {
        fields: Vec<String>,
        nearest: bool,
        on: String,
        clear: String,
    },
    Interval {
        encodings: Vec<String>,
    },
}
