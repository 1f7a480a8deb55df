use std::path::Path;

use fxhash::FxHashSet;

use crate::{GeographyError, irish_grid::irish_grid_to_wgs84, zone_level::ZoneLevel};

#[derive(Debug, Clone, PartialEq)]
pub struct ZoneCentroid {
    pub code: String,
    /// WGS84, x = longitude, y = latitude
    pub point: geo_types::Point,
}

impl From<&ZoneCentroid> for geo_types::Point {
    fn from(centroid: &ZoneCentroid) -> Self {
        centroid.point
    }
}

/// Centroids of every zone of one level, keyed by zone code.
///
/// The order of the centroids is the order of the points sent to the routing
/// engine, so the position of a zone here is its row and column in the
/// returned durations matrix.
#[derive(Debug, Clone)]
pub struct ZoneCentroids {
    level: ZoneLevel,
    centroids: Vec<ZoneCentroid>,
}

impl ZoneCentroids {
    pub fn new(level: ZoneLevel, centroids: Vec<ZoneCentroid>) -> Result<Self, GeographyError> {
        let mut seen = FxHashSet::default();
        for centroid in &centroids {
            if !seen.insert(centroid.code.as_str()) {
                return Err(GeographyError::DuplicateZone(centroid.code.clone()));
            }
        }

        Ok(Self { level, centroids })
    }

    /// Builds the table from Irish Grid (EPSG:29902) coordinates.
    pub fn from_irish_grid<I>(level: ZoneLevel, zones: I) -> Result<Self, GeographyError>
    where
        I: IntoIterator<Item = (String, f64, f64)>,
    {
        let centroids = zones
            .into_iter()
            .map(|(code, easting, northing)| ZoneCentroid {
                code,
                point: irish_grid_to_wgs84(easting, northing),
            })
            .collect();

        Self::new(level, centroids)
    }

    pub fn sorted_by_code(mut self) -> Self {
        self.centroids.sort_by(|a, b| a.code.cmp(&b.code));
        self
    }

    pub fn level(&self) -> ZoneLevel {
        self.level
    }

    pub fn centroids(&self) -> &[ZoneCentroid] {
        &self.centroids
    }

    /// Zone codes in positional order.
    pub fn codes(&self) -> Vec<&str> {
        self.centroids.iter().map(|c| c.code.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.centroids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.centroids.is_empty()
    }

    pub fn to_osrm_points(&self) -> String {
        ni_osrm::points::format_points(&self.centroids)
    }

    pub fn write_osrm_points<P: AsRef<Path>>(&self, path: P) -> Result<(), GeographyError> {
        ni_osrm::points::write_points_file(&self.centroids, path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn centroid(code: &str, x: f64, y: f64) -> ZoneCentroid {
        ZoneCentroid {
            code: code.to_string(),
            point: geo_types::Point::new(x, y),
        }
    }

    #[test]
    fn test_duplicate_codes_rejected() {
        let result = ZoneCentroids::new(
            ZoneLevel::DataZone,
            vec![centroid("DZ1", 0.0, 0.0), centroid("DZ1", 1.0, 1.0)],
        );

        assert!(matches!(result, Err(GeographyError::DuplicateZone(code)) if code == "DZ1"));
    }

    #[test]
    fn test_osrm_points_in_table_order() {
        let table = ZoneCentroids::new(
            ZoneLevel::SmallArea,
            vec![centroid("N2", -6.5, 54.25), centroid("N1", -5.75, 54.5)],
        )
        .unwrap();

        assert_eq!(table.to_osrm_points(), "-6.5,54.25;-5.75,54.5");
        assert_eq!(table.codes(), vec!["N2", "N1"]);

        let sorted = table.sorted_by_code();
        assert_eq!(sorted.codes(), vec!["N1", "N2"]);
        assert_eq!(sorted.to_osrm_points(), "-5.75,54.5;-6.5,54.25");
    }

    #[test]
    fn test_from_irish_grid() {
        let table = ZoneCentroids::from_irish_grid(
            ZoneLevel::DataZone,
            vec![(String::from("DZ1"), 333_900.0, 374_000.0)],
        )
        .unwrap();

        let point = table.centroids()[0].point;
        assert_eq!(table.len(), 1);
        assert!((point.x() + 5.93).abs() < 0.01);
        assert!((point.y() - 54.6).abs() < 0.01);
    }
}
