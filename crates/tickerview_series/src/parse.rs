use crate::price_row::{PriceRow, SourceRow};
use crate::series::PriceSeries;
use crate::SeriesError;

/// Header names the provider's CSV must carry, case-sensitive.
pub const SOURCE_COLUMNS: [&str; 6] = ["timestamp", "open", "high", "low", "close", "volume"];

/// Parses a daily CSV body into a series under the canonical column names.
///
/// Columns beyond [`SOURCE_COLUMNS`] are ignored. A missing column is
/// reported before any row is read; a value that does not parse fails the
/// whole body.
pub fn parse_csv(text: &str) -> Result<PriceSeries, SeriesError> {
    let mut reader = csv::Reader::from_reader(text.as_bytes());

    let headers = reader.headers()?.clone();
    if let Some(missing) = SOURCE_COLUMNS
        .iter()
        .find(|name| !headers.iter().any(|header| header == **name))
    {
        return Err(SeriesError::MissingColumn(missing.to_string()));
    }

    let rows = reader
        .deserialize::<SourceRow>()
        .map(|record| record.map(PriceRow::from))
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!(rows = rows.len(), "parsed daily CSV");

    Ok(PriceSeries::from_rows(&rows)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const BODY: &str = "timestamp,open,high,low,close,volume\n\
        2021-03-02,20.5,21.0,19.75,20.0,2500\n\
        2020-06-15,10,12,9,11,1000\n";

    #[test]
    fn one_row_per_data_line_with_canonical_names() {
        let series = parse_csv(BODY).unwrap();

        assert_eq!(series.len(), 2);
        assert_eq!(
            series.column_names(),
            vec!["Date", "Open", "High", "Low", "Close", "Volume"]
        );

        let rows = series.rows().unwrap();
        assert_eq!(
            rows[1],
            PriceRow {
                date: NaiveDate::from_ymd_opt(2020, 6, 15).unwrap(),
                open: 10.0,
                high: 12.0,
                low: 9.0,
                close: 11.0,
                volume: 1000,
            }
        );
        assert_eq!(rows[0].date, NaiveDate::from_ymd_opt(2021, 3, 2).unwrap());
    }

    #[test]
    fn keeps_source_order() {
        let series = parse_csv(BODY).unwrap();
        let dates = series.dates().unwrap();
        assert!(dates[0] > dates[1]);
    }

    #[test]
    fn header_only_body_is_an_empty_series() {
        let series = parse_csv("timestamp,open,high,low,close,volume\n").unwrap();
        assert!(series.is_empty());
    }

    #[test]
    fn extra_columns_are_ignored() {
        let body = "timestamp,open,high,low,close,adjusted_close,volume\n\
            2020-06-15,10,12,9,11,10.9,1000\n";
        let series = parse_csv(body).unwrap();
        assert_eq!(series.rows().unwrap()[0].volume, 1000);
    }

    #[test]
    fn missing_column_is_named() {
        let body = "timestamp,open,high,low,close\n2020-06-15,10,12,9,11\n";
        match parse_csv(body) {
            Err(SeriesError::MissingColumn(name)) => assert_eq!(name, "volume"),
            other => panic!("expected a missing column error, got {other:?}"),
        }
    }

    #[test]
    fn column_names_are_case_sensitive() {
        let body = "Timestamp,open,high,low,close,volume\n2020-06-15,10,12,9,11,1000\n";
        assert!(matches!(
            parse_csv(body),
            Err(SeriesError::MissingColumn(name)) if name == "timestamp"
        ));
    }

    #[test]
    fn unparseable_values_fail() {
        let bad_price = "timestamp,open,high,low,close,volume\n2020-06-15,ten,12,9,11,1000\n";
        assert!(matches!(parse_csv(bad_price), Err(SeriesError::Csv(_))));

        let bad_date = "timestamp,open,high,low,close,volume\n15/06/2020,10,12,9,11,1000\n";
        assert!(matches!(parse_csv(bad_date), Err(SeriesError::Csv(_))));
    }

    #[test]
    fn json_payloads_do_not_parse() {
        let body = "{\n    \"Information\": \"The demo API key is for demo purposes only.\"\n}";
        assert!(parse_csv(body).is_err());
    }
}
