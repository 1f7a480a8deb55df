use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use geojson::FeatureCollection;
use serde_json::Value;

use crate::GeographyError;

pub fn read_feature_collection<P: AsRef<Path>>(
    path: P,
) -> Result<FeatureCollection, GeographyError> {
    let collection: FeatureCollection = std::fs::read_to_string(path)?.parse()?;
    Ok(collection)
}

pub fn write_feature_collection<P: AsRef<Path>>(
    path: P,
    collection: &FeatureCollection,
) -> Result<(), GeographyError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::with_capacity(64 * 1024, file);
    serde_json::to_writer(&mut writer, collection)?;
    writer.flush()?;

    Ok(())
}

/// String value of a property, numbers are formatted.
pub fn property_str(feature: &geojson::Feature, key: &str) -> Option<String> {
    match feature.property(key)? {
        Value::String(value) => Some(value.clone()),
        Value::Number(value) => Some(value.to_string()),
        _ => None,
    }
}

/// Numeric value of a property, numeric strings are parsed.
pub fn property_f64(feature: &geojson::Feature, key: &str) -> Option<f64> {
    match feature.property(key)? {
        Value::Number(value) => value.as_f64(),
        Value::String(value) => value.trim().parse().ok(),
        _ => None,
    }
}
