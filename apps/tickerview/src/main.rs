use anyhow::Context;
use cache::MemoryCache;
use chrono::{Datelike, Local};
use clap::Parser;
use dashboard::{Dashboard, DashboardError};
use dotenv::dotenv;
use source::{AlphaVantageSource, DailySource};
use std::path::PathBuf;
use surface::Surface;
use tickerview_chart::ChartSpec;
use tickerview_shared_models::{ChartRequest, ChartType, PriceColumn};
use tokio::io::BufReader;
use tokio::runtime::Runtime;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

mod cache;
mod config;
mod dashboard;
mod events;
mod source;
mod surface;

#[derive(Parser, Debug)]
#[command(author, version, about = "Daily stock price charts from Alpha Vantage", long_about = None)]
struct Args {
    /// Ticker symbol (e.g. IBM)
    #[arg(long, default_value = "")]
    symbol: String,

    /// First year to show (default: current year)
    #[arg(long)]
    start_year: Option<i32>,

    /// Last year to show, inclusive (default: current year)
    #[arg(long)]
    end_year: Option<i32>,

    /// Type of chart: line or candlestick
    #[arg(long, default_value = "line")]
    chart: ChartType,

    /// Columns to plot on a line chart, comma separated (Open,High,Low,Close)
    #[arg(long, value_delimiter = ',')]
    columns: Vec<PriceColumn>,

    /// HTML file the chart is written to
    #[arg(long, default_value = "tickerview.html")]
    output: PathBuf,

    /// Print the Vega-Lite spec to stdout instead of writing HTML
    #[arg(long)]
    json: bool,

    /// Read one JSON request per stdin line and re-render for each
    #[arg(long)]
    watch: bool,
}

impl Args {
    fn request(&self, this_year: i32) -> ChartRequest {
        ChartRequest {
            symbol: self.symbol.clone(),
            start_year: self.start_year.unwrap_or(this_year),
            end_year: self.end_year.unwrap_or(this_year),
            chart_type: self.chart,
            columns: self.columns.clone(),
        }
    }

    fn surface(&self) -> Surface {
        if self.json {
            Surface::Json
        } else {
            Surface::Html(self.output.clone())
        }
    }
}

fn chart_title(request: &ChartRequest) -> String {
    format!(
        "{} {} chart, {} to {}",
        request.trimmed_symbol(),
        request.chart_type,
        request.start_year,
        request.end_year
    )
}

/// Puts the outcome of one cycle on the surface. Halts are shown and count
/// as success; anything else comes back as an error.
fn present(
    surface: &Surface,
    request: &ChartRequest,
    outcome: Result<ChartSpec, DashboardError>,
) -> anyhow::Result<()> {
    match outcome {
        Ok(spec) => surface.show(&chart_title(request), &spec),
        Err(e) => match e.halt_message() {
            Some(message) => {
                surface.message(&message);
                Ok(())
            }
            None => Err(e).context("Render cycle failed"),
        },
    }
}

async fn run_once<S, C>(
    dashboard: &Dashboard<S, C>,
    surface: &Surface,
    request: &ChartRequest,
) -> anyhow::Result<()>
where
    S: DailySource,
    C: cache::SeriesCache,
{
    present(surface, request, dashboard.handle(request).await)
}

/// A single cycle from the command line. Bad input halts before `connect`
/// is called, so it is reported even without an API key.
fn one_shot<S, F>(
    rt: &Runtime,
    surface: &Surface,
    request: &ChartRequest,
    this_year: i32,
    connect: F,
) -> anyhow::Result<()>
where
    S: DailySource,
    F: FnOnce() -> anyhow::Result<S>,
{
    if let Err(e) = dashboard::validate(request, this_year) {
        surface.message(&e.to_string());
        return Ok(());
    }

    let dashboard = Dashboard::new(connect()?, MemoryCache::new(), this_year);
    rt.block_on(run_once(&dashboard, surface, request))
}

async fn watch<S, C>(dashboard: &Dashboard<S, C>, surface: &Surface) -> anyhow::Result<()>
where
    S: DailySource,
    C: cache::SeriesCache,
{
    let (tx, rx) = mpsc::channel(16);

    let reader = tokio::spawn(events::read_requests(BufReader::new(tokio::io::stdin()), tx));

    tracing::info!(
        "Waiting for requests on stdin, one JSON object per line (years {} to {})",
        dashboard.this_year() - dashboard::YEARS_SELECTABLE,
        dashboard.this_year()
    );

    events::dispatch(dashboard, rx, |request, outcome| {
        if let Err(e) = present(surface, request, outcome) {
            tracing::error!("Render cycle for '{}' failed: {e:#}", request.symbol);
        }
    })
    .await;

    reader.await.context("stdin reader task failed")??;

    Ok(())
}

fn connect() -> anyhow::Result<AlphaVantageSource> {
    let config = config::Config::from_env().context("Failed to load configuration")?;
    AlphaVantageSource::new(&config).context("Failed to build HTTP client")
}

fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let this_year = Local::now().year();
    let surface = args.surface();

    let rt = Runtime::new().context("Failed to start tokio runtime")?;

    if args.watch {
        let dashboard = Dashboard::new(connect()?, MemoryCache::new(), this_year);
        return rt.block_on(watch(&dashboard, &surface));
    }

    one_shot(&rt, &surface, &args.request(this_year), this_year, connect)
}
