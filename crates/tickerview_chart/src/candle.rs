/// Body colour of one candle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandleColor {
    Green,
    Red,
}

impl CandleColor {
    /// Green only for a strict rise; flat days are red.
    pub fn of(open: f64, close: f64) -> Self {
        if open < close {
            CandleColor::Green
        } else {
            CandleColor::Red
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CandleColor::Green => "green",
            CandleColor::Red => "red",
        }
    }
}
