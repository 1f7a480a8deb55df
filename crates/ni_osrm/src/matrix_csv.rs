use std::path::Path;

use serde::Deserialize;
use tracing::info;

use crate::{OsrmError, durations_table::Seconds, matrix_row::MatrixRow};

pub const MATRIX_CSV_HEADER: [&str; 3] = ["duration", "to", "from"];

/// A row read back from a matrix CSV, owning its zone identifiers.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct MatrixRecord {
    pub duration: Seconds,
    pub to: String,
    pub from: String,
}

impl MatrixRecord {
    pub fn as_row(&self) -> MatrixRow<'_> {
        MatrixRow {
            duration: self.duration,
            to: &self.to,
            from: &self.from,
        }
    }
}

/// Writes the given matrices one after the other into a single CSV file.
/// Returns the number of data rows written.
pub fn write_matrix_csv<P: AsRef<Path>>(
    path: P,
    matrices: &[&[MatrixRow<'_>]],
) -> Result<usize, OsrmError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path.as_ref())?;

    writer.write_record(MATRIX_CSV_HEADER)?;

    let mut count = 0;
    for rows in matrices {
        for row in rows.iter() {
            writer.serialize(row)?;
            count += 1;
        }
    }

    writer.flush()?;

    info!(
        rows = count,
        path = %path.as_ref().display(),
        "Wrote travel matrix CSV"
    );

    Ok(count)
}

pub fn read_matrix_csv<P: AsRef<Path>>(path: P) -> Result<Vec<MatrixRecord>, OsrmError> {
    let mut reader = csv::Reader::from_path(path)?;
    let records = reader
        .deserialize::<MatrixRecord>()
        .collect::<Result<Vec<_>, _>>()?;

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{durations_table::DurationsTable, matrix_row::reshape_durations};

    #[test]
    fn test_concatenated_matrices() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("matrix.csv");

        let dz = reshape_durations(
            &DurationsTable::from(vec![vec![0.0, 60.0], vec![65.5, 0.0]]),
            &["DZ1", "DZ2"],
        );
        let sa = reshape_durations(
            &DurationsTable::new(vec![vec![Some(0.0), None], vec![Some(12.0), Some(0.0)]]),
            &["SA1", "SA2"],
        );

        let written = write_matrix_csv(&path, &[dz.as_slice(), sa.as_slice()]).unwrap();
        assert_eq!(written, 8);

        let content = std::fs::read_to_string(&path).unwrap();
        let lines = content.lines().collect::<Vec<_>>();
        assert_eq!(lines[0], "duration,to,from");
        assert_eq!(lines[1], "0.0,DZ1,DZ1");
        assert_eq!(lines[3], "65.5,DZ1,DZ2");
        assert_eq!(lines[6], ",SA2,SA1");

        let records = read_matrix_csv(&path).unwrap();
        let rows = records.iter().map(MatrixRecord::as_row).collect::<Vec<_>>();
        assert_eq!(rows.len(), 8);
        assert_eq!(&rows[..4], dz.as_slice());
        assert_eq!(&rows[4..], sa.as_slice());
        assert!(
            rows[..4]
                .iter()
                .all(|row| row.from.starts_with("DZ") && row.to.starts_with("DZ"))
        );
        assert!(
            rows[4..]
                .iter()
                .all(|row| row.from.starts_with("SA") && row.to.starts_with("SA"))
        );
    }

    #[test]
    fn test_empty_matrix_still_has_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.csv");

        assert_eq!(write_matrix_csv(&path, &[]).unwrap(), 0);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "duration,to,from\n");
    }
}
