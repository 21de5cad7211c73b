use std::io::Read;
use std::path::Path;

use super::error::LoadError;
use super::model::{AttractionRecord, Slot, WaitTimeTable};

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Fetch the dataset from `url` with a single blocking GET and parse it.
///
/// No retry: any transport failure or non-success status is returned as-is.
pub fn load(url: &str) -> Result<WaitTimeTable, LoadError> {
    log::info!("Fetching wait times from {url}");
    let fetch_err = |source| LoadError::Fetch {
        url: url.to_string(),
        source,
    };

    let response = reqwest::blocking::get(url).map_err(fetch_err)?;
    let status = response.status();
    if !status.is_success() {
        return Err(LoadError::Status {
            url: url.to_string(),
            status,
        });
    }
    let body = response.bytes().map_err(fetch_err)?;
    parse_csv(body.as_ref())
}

/// Load the dataset from a local CSV file.
pub fn load_file(path: &Path) -> Result<WaitTimeTable, LoadError> {
    let file = std::fs::File::open(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_csv(file)
}

// ---------------------------------------------------------------------------
// CSV parser
// ---------------------------------------------------------------------------

/// Column positions resolved from the header row.
struct Columns {
    park: usize,
    land: usize,
    attraction: usize,
    day: usize,
    wait_time: [usize; 3],
    is_open: [usize; 3],
}

impl Columns {
    fn resolve(headers: &csv::StringRecord) -> Result<Self, LoadError> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or_else(|| LoadError::MissingColumn(name.to_string()))
        };
        let per_slot = |prefix: &str| -> Result<[usize; 3], LoadError> {
            Ok([
                find(&format!("{prefix}_{}", Slot::Morning.code()))?,
                find(&format!("{prefix}_{}", Slot::Afternoon.code()))?,
                find(&format!("{prefix}_{}", Slot::Evening.code()))?,
            ])
        };

        Ok(Columns {
            park: find("park")?,
            land: find("land")?,
            attraction: find("attraction")?,
            day: find("day")?,
            wait_time: per_slot("wait_time")?,
            is_open: per_slot("is_open")?,
        })
    }
}

/// Parse the wait-time CSV from any reader.
///
/// Layout: header row naming at least `park, land, attraction, day,
/// wait_time_{M,A,E}, is_open_{M,A,E}`. Other columns (such as a leading
/// unnamed index) are ignored.
pub fn parse_csv<R: Read>(source: R) -> Result<WaitTimeTable, LoadError> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(source);
    let headers = reader.headers()?.clone();
    let columns = Columns::resolve(&headers)?;

    let mut rows = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        // 1-based data row, matching what a spreadsheet shows under the header.
        let row = idx + 1;
        let record = result?;
        let text = |col: usize| record.get(col).unwrap_or("").trim();

        let identity = |col: usize| -> Result<String, LoadError> {
            let value = text(col);
            if value.is_empty() {
                return Err(LoadError::EmptyField {
                    row,
                    column: headers[col].to_string(),
                });
            }
            Ok(value.to_string())
        };

        let mut wait_time = [0.0; 3];
        let mut is_open = [false; 3];
        for slot in Slot::ALL {
            let i = slot as usize;
            let wait_col = columns.wait_time[i];
            wait_time[i] = parse_wait(text(wait_col), row, &headers[wait_col])?;
            let flag_col = columns.is_open[i];
            is_open[i] = parse_flag(text(flag_col), row, &headers[flag_col])?;
        }

        rows.push(AttractionRecord {
            park: identity(columns.park)?,
            land: identity(columns.land)?,
            attraction: identity(columns.attraction)?,
            day: identity(columns.day)?,
            wait_time,
            is_open,
        });
    }

    let table = WaitTimeTable::from_records(rows);
    log::info!(
        "Parsed {} rows across {} parks and {} days",
        table.len(),
        table.parks().len(),
        table.days().len()
    );
    Ok(table)
}

fn parse_wait(s: &str, row: usize, column: &str) -> Result<f64, LoadError> {
    s.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| LoadError::InvalidNumber {
            row,
            column: column.to_string(),
            value: s.to_string(),
        })
}

fn parse_flag(s: &str, row: usize, column: &str) -> Result<bool, LoadError> {
    match s.parse::<f64>() {
        Ok(v) if v == 1.0 => Ok(true),
        Ok(v) if v == 0.0 => Ok(false),
        _ => Err(LoadError::InvalidFlag {
            row,
            column: column.to_string(),
            value: s.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::io::{BufRead, BufReader, Write};
    use std::net::TcpListener;
    use std::thread;

    use super::*;

    /// Answer a single HTTP request on a local port with `response`.
    fn serve_once(response: String) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());
            let mut line = String::new();
            // Drain request headers up to the blank line.
            while reader.read_line(&mut line).unwrap() > 0 && line != "\r\n" {
                line.clear();
            }
            stream.write_all(response.as_bytes()).unwrap();
        });
        format!("http://{addr}/wait_times.csv")
    }

    fn http_response(status: &str, body: &str) -> String {
        format!(
            "HTTP/1.1 {status}\r\nContent-Type: text/csv\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        )
    }

    const HEADER: &str = ",park,land,attraction,day,wait_time_M,wait_time_A,wait_time_E,is_open_M,is_open_A,is_open_E";

    #[test]
    fn test_parse_csv_reads_schema_and_ignores_index_column() {
        let text = format!(
            "{HEADER}\n0,ParkA,LandX,RideA,Fri,10,25.0,0,1,1,0\n1,ParkA,LandY,RideB,Sat,5,5,5,1.0,0.0,1\n"
        );
        let table = parse_csv(text.as_bytes()).unwrap();

        assert_eq!(table.len(), 2);
        let first = &table.rows()[0];
        assert_eq!(first.park, "ParkA");
        assert_eq!(first.attraction, "RideA");
        assert_eq!(first.wait_time, [10.0, 25.0, 0.0]);
        assert_eq!(first.is_open, [true, true, false]);
        assert_eq!(table.rows()[1].is_open, [true, false, true]);
        assert_eq!(table.days(), ["Fri", "Sat"]);
    }

    #[test]
    fn test_parse_csv_missing_column() {
        let text = "park,land,attraction,day,wait_time_M,wait_time_A,is_open_M,is_open_A,is_open_E\n";
        let err = parse_csv(text.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn(ref c) if c == "wait_time_E"));
    }

    #[test]
    fn test_parse_csv_non_numeric_wait_time() {
        let text = format!("{HEADER}\n0,ParkA,LandX,RideA,Fri,ten,0,0,1,1,1\n");
        let err = parse_csv(text.as_bytes()).unwrap_err();
        match err {
            LoadError::InvalidNumber { row, column, value } => {
                assert_eq!(row, 1);
                assert_eq!(column, "wait_time_M");
                assert_eq!(value, "ten");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_csv_rejects_bad_flag() {
        let text = format!("{HEADER}\n0,ParkA,LandX,RideA,Fri,1,2,3,1,2,1\n");
        let err = parse_csv(text.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::InvalidFlag { ref column, .. } if column == "is_open_A"));
    }

    #[test]
    fn test_parse_csv_rejects_empty_park() {
        let text = format!("{HEADER}\n0,,LandX,RideA,Fri,1,2,3,1,1,1\n");
        let err = parse_csv(text.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::EmptyField { row: 1, ref column } if column == "park"));
    }

    #[test]
    fn test_parse_csv_header_only_is_empty_table() {
        let table = parse_csv(HEADER.as_bytes()).unwrap();
        assert!(table.is_empty());
        assert!(table.parks().is_empty());
    }

    #[test]
    fn test_load_file_reads_local_csv() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{HEADER}").unwrap();
        writeln!(file, "0,ParkA,LandX,RideA,Fri,10,20,30,1,1,1").unwrap();
        file.flush().unwrap();

        let table = load_file(file.path()).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.parks(), ["ParkA"]);
    }

    #[test]
    fn test_load_unreachable_url_is_fetch_error() {
        let err = load("http://127.0.0.1:1/wait_times.csv").unwrap_err();
        assert!(matches!(err, LoadError::Fetch { ref url, .. } if url.ends_with(":1/wait_times.csv")));
    }

    #[test]
    fn test_load_not_found_is_status_error() {
        let url = serve_once(http_response("404 Not Found", ""));
        let err = load(&url).unwrap_err();
        match err {
            LoadError::Status { status, .. } => assert_eq!(status, reqwest::StatusCode::NOT_FOUND),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_load_parses_served_csv() {
        let body = format!("{HEADER}\n0,ParkA,LandX,RideA,Fri,10,20,30,1,1,1\n");
        let url = serve_once(http_response("200 OK", &body));
        let table = load(&url).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows()[0].wait_time, [10.0, 20.0, 30.0]);
    }

    #[test]
    fn test_load_file_missing_path() {
        let err = load_file(Path::new("/definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }
}
