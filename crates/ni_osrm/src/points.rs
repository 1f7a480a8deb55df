use std::{
    io::{BufWriter, Write},
    path::Path,
};

use crate::OsrmError;

pub const POINT_SEPARATOR: char = ';';

/// A longitude/latitude pair read back from a points file.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LonLat {
    pub lon: f64,
    pub lat: f64,
}

impl LonLat {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }
}

impl From<&LonLat> for geo_types::Point {
    fn from(value: &LonLat) -> Self {
        geo_types::Point::new(value.lon, value.lat)
    }
}

/// Serializes points as `x,y` records joined by `;`, without a trailing
/// separator. This is the coordinate list understood by the OSRM services.
///
/// Only coordinates are written, in slice order. Non-finite values are
/// written as-is.
pub fn format_points<P>(points: &[P]) -> String
where
    for<'a> &'a P: Into<geo_types::Point>,
{
    let mut buffer = String::new();

    for (i, point) in points.iter().enumerate() {
        let point: geo_types::Point = point.into();
        buffer.push_str(&format!("{},{}", point.x(), point.y()));

        if i < points.len() - 1 {
            buffer.push(POINT_SEPARATOR);
        }
    }

    buffer
}

pub fn write_points_file<P, Q>(points: &[P], path: Q) -> Result<(), OsrmError>
where
    for<'a> &'a P: Into<geo_types::Point>,
    Q: AsRef<Path>,
{
    let file = std::fs::File::create(path)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(format_points(points).as_bytes())?;
    writer.flush()?;

    Ok(())
}

pub fn parse_points(input: &str) -> Result<Vec<LonLat>, OsrmError> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(Vec::new());
    }

    input
        .split(POINT_SEPARATOR)
        .map(|record| {
            let (x, y) = record
                .split_once(',')
                .ok_or_else(|| OsrmError::InvalidPoint(record.to_string()))?;

            let x = x
                .trim()
                .parse::<f64>()
                .map_err(|_| OsrmError::InvalidPoint(record.to_string()))?;
            let y = y
                .trim()
                .parse::<f64>()
                .map_err(|_| OsrmError::InvalidPoint(record.to_string()))?;

            Ok(LonLat::new(x, y))
        })
        .collect()
}

pub fn read_points_file<P: AsRef<Path>>(path: P) -> Result<Vec<LonLat>, OsrmError> {
    let content = std::fs::read_to_string(path)?;
    parse_points(&content)
}
