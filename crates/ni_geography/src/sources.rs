//! Published inputs and the file names every step reads and writes.

use std::fmt::Display;

use crate::zone_level::ZoneLevel;

pub const CENTROIDS_URL: &str = "https://www.nisra.gov.uk/system/files/statistics/geography-census-2021-population-weighted-centroids-csv.zip";

/// Small Area boundaries, including the Irish Grid `X_COORD`/`Y_COORD` centres.
pub const SMALL_AREA_BOUNDARIES_FILE: &str = "sa2011_epsg4326_simplified15.json";

pub const DATA_ZONE_BOUNDARIES_FILE: &str = "dz2021_epsg4326_simplified15.geojson";

pub const POSTCODE_DIRECTORY_URL: &str =
    "https://explore.nisra.gov.uk/postcode-search/CPD_LIGHT_JULY_2024.csv";

/// Date stamp of the precomputed travel matrices.
pub const MATRIX_DATE: &str = "2025-01-26";

pub const DEFAULT_OSRM_PROFILE: &str = "driving";

/// Last path segment of `url`, used as the local file name of downloads.
pub fn file_name_from_url(url: &str) -> &str {
    let path = url.split(|c: char| c == '?' || c == '#').next().unwrap_or(url);
    path.rsplit('/').next().unwrap_or(path)
}

pub fn points_file_name(level: ZoneLevel) -> String {
    format!("{}-osrm-formatted-centroids.txt", level.file_prefix())
}

pub fn matrix_file_name(level: ZoneLevel, date: impl Display) -> String {
    format!("{}-travel-matrix-{}.json", level.file_prefix(), date)
}

pub fn combined_matrix_file_name(date: impl Display) -> String {
    format!("ni-osrm-dz-sa-travel-matrix-{}.csv", date)
}

pub fn level_matrix_file_name(level: ZoneLevel, date: impl Display) -> String {
    format!("ni-osrm-{}-travel-matrix-{}.csv", level.file_prefix(), date)
}

pub fn nearest_facility_file_name(level: ZoneLevel) -> String {
    format!("{}-nearest-maternity-unit.csv", level.file_prefix())
}

pub fn choropleth_file_name(level: ZoneLevel) -> String {
    format!("{}-nearest-maternity-unit.geojson", level.file_prefix())
}

/// Boundary file used for the choropleth of `level`, if it has one.
pub fn boundaries_file_name(level: ZoneLevel) -> Option<&'static str> {
    match level {
        ZoneLevel::DataZone => Some(DATA_ZONE_BOUNDARIES_FILE),
        ZoneLevel::SmallArea => Some(SMALL_AREA_BOUNDARIES_FILE),
        ZoneLevel::SuperDataZone => None,
    }
}
