use ni_osrm::OsrmError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeographyError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Download of {url} failed: {status} - {message}")]
    Api {
        url: String,
        status: u16,
        message: String,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("GeoJSON error: {0}")]
    GeoJson(#[from] geojson::Error),

    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error(transparent)]
    Osrm(#[from] OsrmError),

    #[error("Column `{column}` not found in {file}")]
    MissingColumn { column: String, file: String },

    #[error("Property `{property}` missing or invalid on a feature of {file}")]
    MissingProperty { property: String, file: String },

    #[error("Invalid coordinate `{value}` in {file}")]
    InvalidCoordinate { value: String, file: String },

    #[error("Line {line} has {found} fields, expected {expected}")]
    MalformedRecord {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("Zone {0} appears more than once")]
    DuplicateZone(String),

    #[error("Field `{0}` missing from JSON response")]
    MissingJsonField(String),
}
