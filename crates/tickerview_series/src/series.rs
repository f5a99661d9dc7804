use crate::price_row::PriceRow;
use crate::SeriesError;
use chrono::{DateTime, NaiveDate, NaiveTime};
use polars::prelude::*;
use tickerview_shared_models::PriceColumn;

pub const DATE: &str = "Date";
pub const VOLUME: &str = "Volume";

/// Daily prices of one symbol, in the order the provider sent them.
///
/// Backed by a `DataFrame` with a millisecond `Date` column followed by the
/// price columns. A series coming out of [`PriceSeries::filter_years`] only
/// carries `Date` and the columns that were asked for.
#[derive(Debug, Clone)]
pub struct PriceSeries {
    frame: DataFrame,
}

fn epoch_millis(date: NaiveDate) -> i64 {
    date.and_time(NaiveTime::MIN).and_utc().timestamp_millis()
}

fn new_year_millis(year: i32) -> Result<i64, SeriesError> {
    NaiveDate::from_ymd_opt(year, 1, 1)
        .map(epoch_millis)
        .ok_or(SeriesError::InvalidYear(year))
}

impl PriceSeries {
    pub fn from_rows(rows: &[PriceRow]) -> PolarsResult<Self> {
        let msx = rows.iter().map(|r| epoch_millis(r.date)).collect::<Vec<_>>();
        let date = Column::new(DATE.into(), msx)
            .cast(&DataType::Datetime(TimeUnit::Milliseconds, None))?;

        let frame = DataFrame::new(vec![
            date,
            Column::new(
                PriceColumn::Open.name().into(),
                rows.iter().map(|r| r.open).collect::<Vec<_>>(),
            ),
            Column::new(
                PriceColumn::High.name().into(),
                rows.iter().map(|r| r.high).collect::<Vec<_>>(),
            ),
            Column::new(
                PriceColumn::Low.name().into(),
                rows.iter().map(|r| r.low).collect::<Vec<_>>(),
            ),
            Column::new(
                PriceColumn::Close.name().into(),
                rows.iter().map(|r| r.close).collect::<Vec<_>>(),
            ),
            Column::new(
                VOLUME.into(),
                rows.iter().map(|r| r.volume).collect::<Vec<_>>(),
            ),
        ])?;

        Ok(Self { frame })
    }

    pub fn len(&self) -> usize {
        self.frame.height()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn column_names(&self) -> Vec<String> {
        self.frame
            .get_column_names()
            .into_iter()
            .map(|name| name.to_string())
            .collect()
    }

    /// Keeps the rows dated from `start_year`-01-01 up to, not including,
    /// (`end_year` + 1)-01-01 and projects them to `Date` plus `columns`,
    /// in that order. Row order is untouched.
    ///
    /// Callers make sure `start_year <= end_year`; an inverted range simply
    /// matches nothing.
    pub fn filter_years(
        &self,
        start_year: i32,
        end_year: i32,
        columns: &[PriceColumn],
    ) -> Result<PriceSeries, SeriesError> {
        let from = new_year_millis(start_year)?;
        let until = new_year_millis(end_year.saturating_add(1))?;

        let ms = || col(DATE).cast(DataType::Int64);
        let in_range = ms().gt_eq(lit(from)).and(ms().lt(lit(until)));

        let projection = std::iter::once(col(DATE))
            .chain(columns.iter().map(|c| col(c.name())))
            .collect::<Vec<_>>();

        let frame = self
            .frame
            .clone()
            .lazy()
            .filter(in_range)
            .select(projection)
            .collect()?;

        tracing::debug!(
            start_year,
            end_year,
            kept = frame.height(),
            of = self.len(),
            "filtered series by year"
        );

        Ok(Self { frame })
    }

    pub fn dates(&self) -> Result<Vec<NaiveDate>, SeriesError> {
        let msx = self.frame.column(DATE)?.cast(&DataType::Int64)?;

        msx.i64()?
            .into_iter()
            .map(|ms| {
                ms.and_then(DateTime::from_timestamp_millis)
                    .map(|dt| dt.date_naive())
                    .ok_or(SeriesError::MissingValue(DATE))
            })
            .collect()
    }

    /// Values of one price column. Fails if the column was projected away.
    pub fn values(&self, column: PriceColumn) -> Result<Vec<f64>, SeriesError> {
        self.frame
            .column(column.name())?
            .f64()?
            .into_iter()
            .map(|v| v.ok_or(SeriesError::MissingValue(column.name())))
            .collect()
    }

    pub fn volumes(&self) -> Result<Vec<i64>, SeriesError> {
        self.frame
            .column(VOLUME)?
            .i64()?
            .into_iter()
            .map(|v| v.ok_or(SeriesError::MissingValue(VOLUME)))
            .collect()
    }

    /// Rows of an unprojected series.
    pub fn rows(&self) -> Result<Vec<PriceRow>, SeriesError> {
        let dates = self.dates()?;
        let open = self.values(PriceColumn::Open)?;
        let high = self.values(PriceColumn::High)?;
        let low = self.values(PriceColumn::Low)?;
        let close = self.values(PriceColumn::Close)?;
        let volume = self.volumes()?;

        Ok((0..dates.len())
            .map(|i| PriceRow {
                date: dates[i],
                open: open[i],
                high: high[i],
                low: low[i],
                close: close[i],
                volume: volume[i],
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(y: i32, m: u32, d: u32, close: f64) -> PriceRow {
        PriceRow {
            date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            open: close - 1.0,
            high: close + 1.0,
            low: close - 2.0,
            close,
            volume: 100,
        }
    }

    fn series() -> PriceSeries {
        // newest first, the way the provider sends it
        PriceSeries::from_rows(&[
            row(2021, 1, 1, 50.0),
            row(2020, 12, 31, 40.0),
            row(2020, 6, 15, 30.0),
            row(2020, 1, 1, 20.0),
            row(2019, 12, 31, 10.0),
        ])
        .unwrap()
    }

    #[test]
    fn single_year_keeps_exactly_that_calendar_year() {
        let filtered = series()
            .filter_years(2020, 2020, &[PriceColumn::Close])
            .unwrap();

        assert_eq!(filtered.values(PriceColumn::Close).unwrap(), vec![40.0, 30.0, 20.0]);
        assert!(filtered
            .dates()
            .unwrap()
            .iter()
            .all(|d| d.format("%Y").to_string() == "2020"));
    }

    #[test]
    fn end_year_is_inclusive() {
        let filtered = series()
            .filter_years(2019, 2021, &[PriceColumn::Open])
            .unwrap();
        assert_eq!(filtered.len(), 5);
    }

    #[test]
    fn projection_follows_requested_order() {
        let filtered = series()
            .filter_years(2020, 2021, &[PriceColumn::Close, PriceColumn::Open, PriceColumn::High])
            .unwrap();

        assert_eq!(filtered.column_names(), vec!["Date", "Close", "Open", "High"]);
        assert!(filtered.values(PriceColumn::Low).is_err());
    }

    #[test]
    fn keeps_input_order() {
        let dates = series()
            .filter_years(2020, 2021, &[PriceColumn::Close])
            .unwrap()
            .dates()
            .unwrap();

        assert_eq!(
            dates,
            vec![
                NaiveDate::from_ymd_opt(2021, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2020, 12, 31).unwrap(),
                NaiveDate::from_ymd_opt(2020, 6, 15).unwrap(),
                NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            ]
        );
    }

    #[test]
    fn no_rows_in_range_is_an_empty_series() {
        let filtered = series()
            .filter_years(2005, 2010, &[PriceColumn::Close])
            .unwrap();

        assert!(filtered.is_empty());
        assert_eq!(filtered.column_names(), vec!["Date", "Close"]);
    }

    #[test]
    fn rows_round_out_the_frame() {
        let rows = series().rows().unwrap();
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[2], row(2020, 6, 15, 30.0));
    }
}
