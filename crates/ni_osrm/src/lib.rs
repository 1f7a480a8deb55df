pub mod client;
pub mod durations_table;
mod error;
pub mod matrix_csv;
pub mod matrix_row;
pub mod nearest_facility;
pub mod points;

pub use error::OsrmError;
