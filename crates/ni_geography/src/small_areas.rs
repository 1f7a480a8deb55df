use std::path::Path;

use geojson::FeatureCollection;

use crate::{
    GeographyError,
    geojson_file::{property_f64, property_str, read_feature_collection},
    zone_centroids::ZoneCentroids,
    zone_level::ZoneLevel,
};

const EASTING_PROPERTY: &str = "X_COORD";
const NORTHING_PROPERTY: &str = "Y_COORD";

/// Small Area centres read from the boundary file. These are geometric
/// centres in Irish Grid coordinates, not population-weighted centroids.
pub fn read_small_area_centres<P: AsRef<Path>>(path: P) -> Result<ZoneCentroids, GeographyError> {
    let file = path.as_ref().display().to_string();
    let collection = read_feature_collection(path)?;
    small_area_centres(&collection, &file)
}

/// Centres of every feature, ordered by Small Area code.
pub fn small_area_centres(
    collection: &FeatureCollection,
    file: &str,
) -> Result<ZoneCentroids, GeographyError> {
    let missing = |property: &str| GeographyError::MissingProperty {
        property: property.to_string(),
        file: file.to_string(),
    };

    let code_property = ZoneLevel::SmallArea.code_column();

    let zones = collection
        .features
        .iter()
        .map(|feature| -> Result<(String, f64, f64), GeographyError> {
            Ok((
                property_str(feature, code_property).ok_or_else(|| missing(code_property))?,
                property_f64(feature, EASTING_PROPERTY).ok_or_else(|| missing(EASTING_PROPERTY))?,
                property_f64(feature, NORTHING_PROPERTY)
                    .ok_or_else(|| missing(NORTHING_PROPERTY))?,
            ))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ZoneCentroids::from_irish_grid(ZoneLevel::SmallArea, zones)?.sorted_by_code())
}
