pub mod centroid_archive;
pub mod choropleth;
pub mod download;
mod error;
pub mod geojson_file;
pub mod hospitals;
pub mod irish_grid;
pub mod postcodes;
pub mod small_areas;
pub mod sources;
pub mod zone_centroids;
pub mod zone_level;

pub use error::GeographyError;
