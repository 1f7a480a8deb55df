use std::{collections::BTreeSet, path::Path};

use fxhash::FxHashMap;
use geojson::FeatureCollection;
use ni_osrm::matrix_row::MatrixRow;
use tracing::info;

use crate::{
    GeographyError,
    geojson_file::{property_str, read_feature_collection, write_feature_collection},
};

/// Categorical fill colours, assigned to facilities in code order.
pub const PALETTE: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];

pub fn facility_colours<'a>(nearest: &[MatrixRow<'a>]) -> FxHashMap<&'a str, &'static str> {
    nearest
        .iter()
        .map(|row| row.to)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .enumerate()
        .map(|(i, facility)| (facility, PALETTE[i % PALETTE.len()]))
        .collect()
}

/// Zone boundaries coloured by their nearest facility.
///
/// Features are matched on the `key` property against the origin of each
/// row; boundaries without a row are left out. Matched features gain the
/// `to`, `duration` and `fill` properties.
pub fn nearest_facility_choropleth(
    boundaries: &FeatureCollection,
    key: &str,
    nearest: &[MatrixRow<'_>],
) -> FeatureCollection {
    let by_origin = nearest
        .iter()
        .map(|row| (row.from, row))
        .collect::<FxHashMap<_, _>>();
    let colours = facility_colours(nearest);

    let features = boundaries
        .features
        .iter()
        .filter_map(|feature| {
            let code = property_str(feature, key)?;
            let row = by_origin.get(code.as_str())?;

            let mut feature = feature.clone();
            feature.set_property("to", row.to);
            feature.set_property("duration", row.duration);
            feature.set_property("fill", colours.get(row.to).copied());
            Some(feature)
        })
        .collect();

    FeatureCollection {
        bbox: boundaries.bbox.clone(),
        features,
        foreign_members: None,
    }
}

/// Reads `boundaries_path`, joins it with `nearest` and writes the result.
/// Returns the number of features written.
pub fn write_nearest_facility_choropleth<P, Q>(
    boundaries_path: P,
    key: &str,
    nearest: &[MatrixRow<'_>],
    output_path: Q,
) -> Result<usize, GeographyError>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let boundaries = read_feature_collection(boundaries_path)?;
    let choropleth = nearest_facility_choropleth(&boundaries, key, nearest);

    write_feature_collection(output_path.as_ref(), &choropleth)?;

    info!(
        features = choropleth.features.len(),
        boundaries = boundaries.features.len(),
        path = %output_path.as_ref().display(),
        "Wrote nearest facility choropleth"
    );

    Ok(choropleth.features.len())
}
