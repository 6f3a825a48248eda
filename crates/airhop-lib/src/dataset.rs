//! Loading of OpenFlights-style `airports.dat` and `routes.dat` files.
//!
//! Both files are headerless CSV. Airports are parsed into [`Airport`]
//! records; routes are filtered down to direct, non-codeshare flights between
//! known airports and weighted by great-circle distance.

use std::env;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord};
use directories::ProjectDirs;
use tracing::{debug, info};

use crate::airport::{Airport, AirportIndex};
use crate::error::{Error, Result};
use crate::geo::Location;
use crate::graph::Route;

/// File name of the airport table inside a dataset directory.
pub const AIRPORTS_FILE: &str = "airports.dat";

/// File name of the route table inside a dataset directory.
pub const ROUTES_FILE: &str = "routes.dat";

/// Environment variable overriding the default dataset directory.
pub const DATA_DIR_ENV: &str = "AIRHOP_DATA_DIR";

/// Literal used by the dataset for an absent value.
const NULL_MARKER: &str = "\\N";

const AIRPORT_COLUMNS: usize = 8;
const MAX_LATITUDE: f64 = 90.0;
const MAX_LONGITUDE: f64 = 180.0;
const ROUTE_COLUMNS: usize = 8;

/// Paths to the two dataset files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetPaths {
    pub airports: PathBuf,
    pub routes: PathBuf,
}

impl DatasetPaths {
    /// Resolve both files inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            airports: dir.join(AIRPORTS_FILE),
            routes: dir.join(ROUTES_FILE),
        }
    }

    /// Fail with [`Error::DatasetNotFound`] for the first missing file.
    pub fn ensure_exists(&self) -> Result<()> {
        for path in [&self.airports, &self.routes] {
            if !path.is_file() {
                return Err(Error::DatasetNotFound { path: path.clone() });
            }
        }
        Ok(())
    }
}

/// Resolve the dataset directory.
///
/// Uses `AIRHOP_DATA_DIR` when set, otherwise the platform data directory.
pub fn default_data_dir() -> Result<PathBuf> {
    if let Some(dir) = env::var_os(DATA_DIR_ENV) {
        return Ok(PathBuf::from(dir));
    }
    let dirs = ProjectDirs::from("org", "airhop", "airhop").ok_or(Error::ProjectDirsUnavailable)?;
    Ok(dirs.data_dir().to_path_buf())
}

/// Load every airport from an `airports.dat` file.
pub fn load_airports(path: &Path) -> Result<Vec<Airport>> {
    let file = File::open(path).map_err(|err| not_found_or_io(path, err))?;
    let airports = airports_from_reader(file, path)?;
    info!(count = airports.len(), path = %path.display(), "loaded airports");
    Ok(airports)
}

/// Parse airports from any reader; `origin` is only used in error messages.
pub fn airports_from_reader<R: Read>(reader: R, origin: &Path) -> Result<Vec<Airport>> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut airports = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        airports.push(parse_airport(&record, origin)?);
    }
    Ok(airports)
}

fn parse_airport(record: &StringRecord, origin: &Path) -> Result<Airport> {
    let invalid = |message: String| Error::InvalidRecord {
        path: origin.to_path_buf(),
        line: line_of(record),
        message,
    };

    if record.len() < AIRPORT_COLUMNS {
        return Err(invalid(format!(
            "expected at least {AIRPORT_COLUMNS} columns, found {}",
            record.len()
        )));
    }

    let coordinate = |column: usize, name: &str, limit: f64| -> Result<f64> {
        let raw = &record[column];
        let value = raw
            .trim()
            .parse::<f64>()
            .map_err(|err| invalid(format!("invalid {name} {raw:?}: {err}")))?;
        if !value.is_finite() || value.abs() > limit {
            return Err(invalid(format!(
                "{name} {raw:?} is outside [-{limit}, {limit}]"
            )));
        }
        Ok(value)
    };
    let latitude = coordinate(6, "latitude", MAX_LATITUDE)?;
    let longitude = coordinate(7, "longitude", MAX_LONGITUDE)?;

    Ok(Airport {
        id: record[0].to_string(),
        name: record[1].to_string(),
        iata: optional(&record[4]),
        icao: optional(&record[5]),
        location: Location::new(latitude, longitude),
    })
}

fn optional(field: &str) -> Option<String> {
    (field != NULL_MARKER).then(|| field.to_string())
}

fn line_of(record: &StringRecord) -> u64 {
    record.position().map(|position| position.line()).unwrap_or(0)
}

/// Load the scheduled routes usable for routing from a `routes.dat` file.
pub fn load_routes(path: &Path, airports: &AirportIndex) -> Result<Vec<Route>> {
    let file = File::open(path).map_err(|err| not_found_or_io(path, err))?;
    let routes = routes_from_reader(file, airports)?;
    info!(count = routes.len(), path = %path.display(), "loaded routes");
    Ok(routes)
}

/// Parse and filter routes from any reader.
///
/// A row is kept only when it is a direct flight (`stops == "0"`), is not a
/// codeshare, and both endpoint identifiers resolve in `airports`.
pub fn routes_from_reader<R: Read>(reader: R, airports: &AirportIndex) -> Result<Vec<Route>> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut routes = Vec::new();
    let mut skipped = 0usize;
    for record in csv_reader.records() {
        let record = record?;
        match parse_route(&record, airports) {
            Some(route) => routes.push(route),
            None => {
                skipped += 1;
                debug!(line = line_of(&record), "skipping route record");
            }
        }
    }

    debug!(kept = routes.len(), skipped, "filtered route records");
    Ok(routes)
}

fn parse_route(record: &StringRecord, airports: &AirportIndex) -> Option<Route> {
    if record.len() < ROUTE_COLUMNS {
        return None;
    }
    if &record[7] != "0" || &record[6] == "Y" {
        return None;
    }

    let source = airports.by_id(&record[3])?;
    let destination = airports.by_id(&record[5])?;

    Some(Route {
        source_id: source.id.clone(),
        destination_id: destination.id.clone(),
        distance_km: source.location.distance_to(&destination.location),
    })
}

fn not_found_or_io(path: &Path, err: std::io::Error) -> Error {
    if err.kind() == std::io::ErrorKind::NotFound {
        Error::DatasetNotFound {
            path: path.to_path_buf(),
        }
    } else {
        Error::Io(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const AIRPORTS: &str = r#"1,"Alpha","City","Country","AAA","AAAA",10.0,20.0,0,0,"E","Tz"
2,"Bravo, Field","City","Country",\N,"BBBB",10.5,20.5
3,"Charlie","City","Country","","CCCC",-5.25,100
"#;

    fn origin() -> &'static Path {
        Path::new("airports.dat")
    }

    fn index() -> AirportIndex {
        AirportIndex::build(airports_from_reader(AIRPORTS.as_bytes(), origin()).unwrap())
    }

    #[test]
    fn parses_airports_with_null_marker() {
        let airports = airports_from_reader(AIRPORTS.as_bytes(), origin()).unwrap();
        assert_eq!(airports.len(), 3);

        assert_eq!(airports[0].iata.as_deref(), Some("AAA"));
        assert_eq!(airports[0].location, Location::new(10.0, 20.0));

        assert_eq!(airports[1].name, "Bravo, Field");
        assert_eq!(airports[1].iata, None);
        assert_eq!(airports[1].icao.as_deref(), Some("BBBB"));

        assert_eq!(airports[2].iata.as_deref(), Some(""));
        assert_eq!(airports[2].display_code(), "CCCC");
    }

    #[test]
    fn short_airport_row_is_invalid() {
        let error = airports_from_reader("1,\"A\",\"c\",\"x\",\"AAA\"\n".as_bytes(), origin())
            .unwrap_err();
        assert!(matches!(error, Error::InvalidRecord { line: 1, .. }), "{error}");
    }

    #[test]
    fn bad_coordinate_names_the_line() {
        let data = "1,A,c,x,AAA,AAAA,1.0,2.0\n2,B,c,x,BBB,BBBB,north,2.0\n";
        let error = airports_from_reader(data.as_bytes(), origin()).unwrap_err();
        match error {
            Error::InvalidRecord { line, message, .. } => {
                assert_eq!(line, 2);
                assert!(message.contains("latitude"), "{message}");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn non_finite_coordinates_are_invalid() {
        for row in [
            "1,A,c,x,AAA,AAAA,NaN,inf\n",
            "1,A,c,x,AAA,AAAA,1.0,-inf\n",
        ] {
            let error = airports_from_reader(row.as_bytes(), origin()).unwrap_err();
            assert!(matches!(error, Error::InvalidRecord { line: 1, .. }), "{error}");
        }
    }

    #[test]
    fn out_of_range_coordinates_are_invalid() {
        let data = "1,A,c,x,AAA,AAAA,90,-180\n2,B,c,x,BBB,BBBB,200,0\n";
        match airports_from_reader(data.as_bytes(), origin()).unwrap_err() {
            Error::InvalidRecord { line, message, .. } => {
                assert_eq!(line, 2);
                assert!(message.contains("latitude"), "{message}");
            }
            other => panic!("unexpected error: {other}"),
        }

        let data = "1,A,c,x,AAA,AAAA,10,180.5\n";
        match airports_from_reader(data.as_bytes(), origin()).unwrap_err() {
            Error::InvalidRecord { message, .. } => {
                assert!(message.contains("longitude"), "{message}");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn filters_routes() {
        let index = index();
        let data = "\
XX,1,AAA,1,BBB,2,,0,320
XX,1,AAA,1,CCC,3,Y,0,320
XX,1,AAA,1,CCC,3,,1,320
XX,1,AAA,1,ZZZ,99,,0,320
XX,1,AAA,1,BBB,\\N,,0,320
XX,1,BBB,2
XX,1,CCC,3,AAA,1,,0,320
";
        let routes = routes_from_reader(data.as_bytes(), &index).unwrap();
        let pairs: Vec<_> = routes
            .iter()
            .map(|route| (route.source_id.as_str(), route.destination_id.as_str()))
            .collect();
        assert_eq!(pairs, vec![("1", "2"), ("3", "1")]);

        let expected = index
            .by_id("1")
            .unwrap()
            .location
            .distance_to(&index.by_id("2").unwrap().location);
        assert_eq!(routes[0].distance_km, expected);
    }

    #[test]
    fn dataset_paths_report_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        let paths = DatasetPaths::in_dir(dir.path());
        assert_eq!(paths.airports, dir.path().join(AIRPORTS_FILE));

        let error = paths.ensure_exists().unwrap_err();
        assert!(matches!(error, Error::DatasetNotFound { ref path } if path == &paths.airports));

        std::fs::write(&paths.airports, AIRPORTS).unwrap();
        let error = paths.ensure_exists().unwrap_err();
        assert!(matches!(error, Error::DatasetNotFound { ref path } if path == &paths.routes));

        std::fs::write(&paths.routes, "").unwrap();
        paths.ensure_exists().unwrap();
    }

    #[test]
    fn missing_airport_file_is_dataset_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let error = load_airports(&dir.path().join(AIRPORTS_FILE)).unwrap_err();
        assert!(matches!(error, Error::DatasetNotFound { .. }));
    }
}
