use crate::cache::SeriesCache;
use crate::source::DailySource;
use thiserror::Error;
use tickerview_alphavantage::{FetchError, ProviderError, classify};
use tickerview_chart::{ChartError, ChartSpec, build_chart};
use tickerview_series::{PriceSeries, SeriesError, parse_csv};
use tickerview_shared_models::ChartRequest;

/// How many years back the year selectors reach.
pub const YEARS_SELECTABLE: i32 = 20;

#[derive(Error, Debug, PartialEq)]
pub enum InputError {
    #[error("Input a symbol.")]
    EmptySymbol,
    #[error("\"Start Year\" must be less than or equal to \"End Year\".")]
    YearOrder,
    #[error("Years must be between {first} and {last}.")]
    YearOutOfRange { first: i32, last: i32 },
    #[error("Please select Open, High, Low, and/or Close.")]
    NoColumns,
}

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Provider(#[from] ProviderError),
    #[error("Failed to parse daily series: {0}")]
    Parse(#[from] SeriesError),
    #[error("Failed to select years and columns: {0}")]
    Filter(SeriesError),
    #[error(transparent)]
    Network(#[from] FetchError),
    #[error("Failed to build chart: {0}")]
    Chart(#[from] ChartError),
}

impl DashboardError {
    /// Text to show the user when the cycle halts on purpose. `None` means an
    /// abrupt failure that has no friendly message.
    pub fn halt_message(&self) -> Option<String> {
        match self {
            DashboardError::Input(e) => Some(e.to_string()),
            DashboardError::Provider(e) => Some(e.to_string()),
            _ => None,
        }
    }
}

/// Checks a request before anything touches the network.
pub fn validate(request: &ChartRequest, this_year: i32) -> Result<(), InputError> {
    if request.trimmed_symbol().is_empty() {
        return Err(InputError::EmptySymbol);
    }

    if request.start_year > request.end_year {
        return Err(InputError::YearOrder);
    }

    let first = this_year - YEARS_SELECTABLE;
    let selectable = first..=this_year;
    if !selectable.contains(&request.start_year) || !selectable.contains(&request.end_year) {
        return Err(InputError::YearOutOfRange {
            first,
            last: this_year,
        });
    }

    if request.effective_columns().is_empty() {
        return Err(InputError::NoColumns);
    }

    Ok(())
}

/// Runs render cycles: one [`ChartRequest`] in, one chart or halt out.
pub struct Dashboard<S, C> {
    source: S,
    cache: C,
    this_year: i32,
}

impl<S: DailySource, C: SeriesCache> Dashboard<S, C> {
    pub fn new(source: S, cache: C, this_year: i32) -> Self {
        Self {
            source,
            cache,
            this_year,
        }
    }

    pub fn this_year(&self) -> i32 {
        self.this_year
    }

    /// Full daily history of a symbol, from the cache when this exact
    /// request URL has been answered before. Provider errors are not cached.
    pub async fn series(&self, symbol: &str) -> Result<PriceSeries, DashboardError> {
        let url = self.source.daily_url(symbol)?;

        if let Some(series) = self.cache.get(url.as_str()) {
            tracing::debug!(symbol, rows = series.len(), "series served from cache");
            return Ok(series);
        }

        tracing::info!(symbol, "fetching daily series");
        let text = self.source.fetch(&url).await?;
        let body = classify(&text)?;
        let series = parse_csv(body)?;

        tracing::info!(symbol, rows = series.len(), "fetched daily series");
        self.cache.put(url.to_string(), series.clone());

        Ok(series)
    }

    /// One render cycle.
    pub async fn handle(&self, request: &ChartRequest) -> Result<ChartSpec, DashboardError> {
        validate(request, self.this_year)?;

        let columns = request.effective_columns();
        let series = self.series(request.trimmed_symbol()).await?;
        let filtered = series
            .filter_years(request.start_year, request.end_year, &columns)
            .map_err(DashboardError::Filter)?;

        Ok(build_chart(&filtered, request.chart_type, &columns)?)
    }
}
