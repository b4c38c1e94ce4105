//! Tab-separated minute-bar loader
//!
//! Reads the broker terminal's history export into an ordered `Quote`
//! sequence. The file carries a header row and exactly nine columns:
//!
//! ```text
//! <DATE>	<TIME>	<OPEN>	<HIGH>	<LOW>	<CLOSE>	<TICKVOL>	<VOL>	<SPREAD>
//! 2023.01.02	00:00:00	1.06988	1.06995	1.06980	1.06990	35	0	13
//! ```
//!
//! Header names are matched case-insensitively with the angle brackets
//! stripped. The date and time columns are combined into the row timestamp,
//! which must fall on a whole minute.
//!
//! Error policy: fail fast. Schema mismatches raise `LoadError::Format`,
//! unparsable fields raise `LoadError::Parse`, and a timestamp earlier than
//! its predecessor raises `LoadError::OutOfOrder`. No NaN filtering and no
//! gap filling is performed.

use crate::errors::LoadError;
use crate::types::Quote;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use csv::StringRecord;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info};

/// Column names of the quote schema, in file order
pub const QUOTE_COLUMNS: [&str; 9] = [
    "date", "time", "open", "high", "low", "close", "tickvol", "vol", "spread",
];

/// Loader configuration
#[derive(Debug, Clone)]
pub struct LoaderOptions {
    /// Field delimiter (tab for terminal exports)
    pub delimiter: u8,

    /// Accepted `date` column formats, tried in order
    pub date_formats: Vec<String>,

    /// Accepted `time` column formats, tried in order
    pub time_formats: Vec<String>,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self {
            delimiter: b'\t',
            date_formats: vec!["%Y.%m.%d".to_string(), "%Y-%m-%d".to_string()],
            time_formats: vec!["%H:%M:%S".to_string(), "%H:%M".to_string()],
        }
    }
}

/// Quote file loader
#[derive(Debug, Clone, Default)]
pub struct QuoteLoader {
    options: LoaderOptions,
}

impl QuoteLoader {
    /// Create loader with default (tab-separated, MetaTrader date) options
    pub fn new() -> Self {
        Self::default()
    }

    /// Create loader with custom options
    pub fn with_options(options: LoaderOptions) -> Self {
        Self { options }
    }

    /// Load quotes from a file on disk
    pub fn load_path<P: AsRef<Path>>(&self, path: P) -> Result<Vec<Quote>, LoadError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| LoadError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let quotes = self.load_reader(BufReader::new(file))?;

        info!(
            path = %path.display(),
            rows = quotes.len(),
            first = ?quotes.first().map(|q| q.timestamp),
            last = ?quotes.last().map(|q| q.timestamp),
            "loaded quotes"
        );

        Ok(quotes)
    }

    /// Load quotes from any reader (header row included)
    pub fn load_reader<R: Read>(&self, reader: R) -> Result<Vec<Quote>, LoadError> {
        let mut rdr = csv::ReaderBuilder::new()
            .delimiter(self.options.delimiter)
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut records = rdr.records();

        match records.next() {
            Some(header) => validate_header(&header.map_err(csv_error)?)?,
            None => {
                return Err(LoadError::Format {
                    line: 1,
                    reason: "missing header row".to_string(),
                })
            }
        }

        let mut quotes: Vec<Quote> = Vec::new();
        for result in records {
            let record = result.map_err(csv_error)?;
            let line = record_line(&record);
            let quote = self.parse_record(&record, line)?;

            if let Some(prev) = quotes.last() {
                if quote.timestamp < prev.timestamp {
                    return Err(LoadError::OutOfOrder {
                        line,
                        previous: prev.timestamp.to_string(),
                        current: quote.timestamp.to_string(),
                    });
                }
            }

            quotes.push(quote);
        }

        debug!(rows = quotes.len(), "parsed quote records");
        Ok(quotes)
    }

    fn parse_record(&self, record: &StringRecord, line: u64) -> Result<Quote, LoadError> {
        if record.len() != QUOTE_COLUMNS.len() {
            return Err(LoadError::Format {
                line,
                reason: format!(
                    "expected {} columns, found {}",
                    QUOTE_COLUMNS.len(),
                    record.len()
                ),
            });
        }

        Ok(Quote {
            timestamp: self.parse_timestamp(record, line)?,
            open: parse_field(record, 2, line)?,
            high: parse_field(record, 3, line)?,
            low: parse_field(record, 4, line)?,
            close: parse_field(record, 5, line)?,
            tickvol: parse_field(record, 6, line)?,
            volume: parse_field(record, 7, line)?,
            spread: parse_field(record, 8, line)?,
        })
    }

    fn parse_timestamp(&self, record: &StringRecord, line: u64) -> Result<NaiveDateTime, LoadError> {
        let date_str = &record[0];
        let time_str = &record[1];

        let date = self
            .options
            .date_formats
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(date_str, fmt).ok())
            .ok_or_else(|| LoadError::Parse {
                line,
                column: QUOTE_COLUMNS[0],
                value: date_str.to_string(),
                reason: format!("expected one of {:?}", self.options.date_formats),
            })?;

        let time = self
            .options
            .time_formats
            .iter()
            .find_map(|fmt| NaiveTime::parse_from_str(time_str, fmt).ok())
            .ok_or_else(|| LoadError::Parse {
                line,
                column: QUOTE_COLUMNS[1],
                value: time_str.to_string(),
                reason: format!("expected one of {:?}", self.options.time_formats),
            })?;

        if time.second() != 0 || time.nanosecond() != 0 {
            return Err(LoadError::Parse {
                line,
                column: QUOTE_COLUMNS[1],
                value: time_str.to_string(),
                reason: "minute bars must start on a whole minute".to_string(),
            });
        }

        Ok(date.and_time(time))
    }
}

/// Load quotes from `path` with default options
pub fn load_quotes<P: AsRef<Path>>(path: P) -> Result<Vec<Quote>, LoadError> {
    QuoteLoader::new().load_path(path)
}

fn validate_header(header: &StringRecord) -> Result<(), LoadError> {
    let names: Vec<String> = header.iter().map(normalize_column_name).collect();

    if names.len() != QUOTE_COLUMNS.len() {
        return Err(LoadError::Format {
            line: 1,
            reason: format!(
                "expected {} header columns {:?}, found {}: {:?}",
                QUOTE_COLUMNS.len(),
                QUOTE_COLUMNS,
                names.len(),
                names
            ),
        });
    }

    for (found, expected) in names.iter().zip(QUOTE_COLUMNS) {
        let matches = found == expected || (expected == "vol" && found == "volume");
        if !matches {
            return Err(LoadError::Format {
                line: 1,
                reason: format!("expected column '{expected}', found '{found}'"),
            });
        }
    }

    Ok(())
}

fn normalize_column_name(raw: &str) -> String {
    raw.trim()
        .trim_start_matches('<')
        .trim_end_matches('>')
        .to_ascii_lowercase()
}

fn parse_field<T>(record: &StringRecord, index: usize, line: u64) -> Result<T, LoadError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let raw = &record[index];
    raw.parse::<T>().map_err(|e| LoadError::Parse {
        line,
        column: QUOTE_COLUMNS[index],
        value: raw.to_string(),
        reason: e.to_string(),
    })
}

fn record_line(record: &StringRecord) -> u64 {
    record.position().map(|p| p.line()).unwrap_or(0)
}

fn csv_error(source: csv::Error) -> LoadError {
    let line = source.position().map(|p| p.line()).unwrap_or(0);
    LoadError::Csv { line, source }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const HEADER: &str = "<DATE>\t<TIME>\t<OPEN>\t<HIGH>\t<LOW>\t<CLOSE>\t<TICKVOL>\t<VOL>\t<SPREAD>";

    fn load(body: &str) -> Result<Vec<Quote>, LoadError> {
        let content = format!("{HEADER}\n{body}");
        QuoteLoader::new().load_reader(content.as_bytes())
    }

    #[test]
    fn test_load_metatrader_export() {
        let quotes = load(
            "2023.01.02\t00:00:00\t1.06988\t1.06995\t1.06980\t1.06990\t35\t0\t13\n\
             2023.01.02\t00:01:00\t1.06990\t1.07001\t1.06985\t1.06999\t28\t0\t18\n",
        )
        .unwrap();

        assert_eq!(quotes.len(), 2);
        assert_eq!(quotes[0].timestamp.to_string(), "2023-01-02 00:00:00");
        assert_eq!(quotes[1].timestamp.to_string(), "2023-01-02 00:01:00");
        assert_eq!(quotes[0].open, 1.06988);
        assert_eq!(quotes[1].close, 1.06999);
        assert_eq!(quotes[0].tickvol, 35);
        assert_eq!(quotes[1].spread, 18);
    }

    #[test]
    fn test_plain_header_and_iso_dates() {
        let content = "date\ttime\topen\thigh\tlow\tclose\ttickvol\tvolume\tspread\n\
                       2023-01-02\t10:15\t1.1\t1.2\t1.0\t1.15\t1\t0\t3\n";
        let quotes = QuoteLoader::new().load_reader(content.as_bytes()).unwrap();
        assert_eq!(quotes.len(), 1);
        assert_eq!(quotes[0].timestamp.to_string(), "2023-01-02 10:15:00");
    }

    #[test]
    fn test_sub_minute_time_is_parse_error() {
        let result = load(
            "2023.01.02\t00:00:00\t1.0\t1.0\t1.0\t1.0\t1\t0\t13\n\
             2023.01.02\t00:01:30\t1.0\t1.0\t1.0\t1.0\t1\t0\t13\n",
        );
        match result {
            Err(LoadError::Parse { line, column, value, .. }) => {
                assert_eq!(line, 3);
                assert_eq!(column, "time");
                assert_eq!(value, "00:01:30");
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_header_only_yields_empty_sequence() {
        let quotes = load("").unwrap();
        assert!(quotes.is_empty());
    }

    #[test]
    fn test_missing_header_is_format_error() {
        let result = QuoteLoader::new().load_reader("".as_bytes());
        assert!(matches!(result, Err(LoadError::Format { line: 1, .. })));
    }

    #[test]
    fn test_wrong_header_is_format_error() {
        let content = "<DATE>\t<TIME>\t<OPEN>\t<HIGH>\t<LOW>\t<CLOSE>\t<TICKVOL>\t<VOL>\t<BID>\n";
        let result = QuoteLoader::new().load_reader(content.as_bytes());
        match result {
            Err(LoadError::Format { line, reason }) => {
                assert_eq!(line, 1);
                assert!(reason.contains("spread"));
            }
            other => panic!("expected format error, got {other:?}"),
        }
    }

    #[test]
    fn test_short_row_is_format_error() {
        let result = load("2023.01.02\t00:00:00\t1.06988\t1.06995\n");
        assert!(matches!(result, Err(LoadError::Format { line: 2, .. })));
    }

    #[test]
    fn test_bad_price_is_parse_error() {
        let result = load("2023.01.02\t00:00:00\t1.06988\tabc\t1.06980\t1.06990\t35\t0\t13\n");
        match result {
            Err(LoadError::Parse { line, column, value, .. }) => {
                assert_eq!(line, 2);
                assert_eq!(column, "high");
                assert_eq!(value, "abc");
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_negative_spread_is_parse_error() {
        let result = load("2023.01.02\t00:00:00\t1.0\t1.0\t1.0\t1.0\t35\t0\t-2\n");
        assert!(matches!(
            result,
            Err(LoadError::Parse { column: "spread", .. })
        ));
    }

    #[test]
    fn test_invalid_date_is_parse_error() {
        let result = load("2023.02.30\t00:00:00\t1.0\t1.0\t1.0\t1.0\t35\t0\t2\n");
        assert!(matches!(result, Err(LoadError::Parse { column: "date", .. })));
    }

    #[test]
    fn test_invalid_time_is_parse_error() {
        let result = load("2023.01.02\t25:00:00\t1.0\t1.0\t1.0\t1.0\t35\t0\t2\n");
        assert!(matches!(result, Err(LoadError::Parse { column: "time", .. })));
    }

    #[test]
    fn test_duplicate_timestamps_accepted() {
        let quotes = load(
            "2023.01.02\t00:00:00\t1.0\t1.0\t1.0\t1.0\t1\t0\t2\n\
             2023.01.02\t00:00:00\t1.0\t1.0\t1.0\t1.0\t1\t0\t2\n",
        )
        .unwrap();
        assert_eq!(quotes.len(), 2);
    }

    #[test]
    fn test_backwards_timestamp_rejected() {
        let result = load(
            "2023.01.02\t00:05:00\t1.0\t1.0\t1.0\t1.0\t1\t0\t2\n\
             2023.01.02\t00:04:00\t1.0\t1.0\t1.0\t1.0\t1\t0\t2\n",
        );
        assert!(matches!(result, Err(LoadError::OutOfOrder { line: 3, .. })));
    }

    #[test]
    fn test_load_path_missing_file() {
        let result = load_quotes("/nonexistent/EURUSD_M1.csv");
        assert!(matches!(result, Err(LoadError::Io { .. })));
    }

    #[test]
    fn test_load_path_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{HEADER}").unwrap();
        writeln!(file, "2023.01.06\t21:58:00\t1.0\t1.0\t1.0\t1.0\t1\t0\t5").unwrap();
        writeln!(file, "2023.01.08\t22:05:00\t1.0\t1.0\t1.0\t1.0\t1\t0\t40").unwrap();

        let quotes = load_quotes(file.path()).unwrap();
        assert_eq!(quotes.len(), 2);
        assert_eq!(quotes[1].spread, 40);
    }
}
