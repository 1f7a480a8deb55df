use std::{
    fs::File,
    io::{BufReader, Read, Seek},
    path::Path,
};

use tracing::{debug, info};

use crate::{GeographyError, zone_centroids::ZoneCentroids, zone_level::ZoneLevel};

const EASTING_COLUMN: &str = "X";
const NORTHING_COLUMN: &str = "Y";

/// Population-weighted centroids published as one CSV per geography.
#[derive(Debug, Default)]
pub struct PopulationWeightedCentroids {
    pub data_zones: Option<ZoneCentroids>,
    pub super_data_zones: Option<ZoneCentroids>,
}

pub fn read_centroid_archive_file<P: AsRef<Path>>(
    path: P,
) -> Result<PopulationWeightedCentroids, GeographyError> {
    let file = File::open(path)?;
    read_centroid_archive(BufReader::new(file))
}

/// Reads every CSV of the archive. A table listing Data Zone codes is taken
/// as the Data Zone centroids, otherwise one listing Super Data Zone codes as
/// the Super Data Zone centroids. Other entries are skipped.
pub fn read_centroid_archive<R: Read + Seek>(
    reader: R,
) -> Result<PopulationWeightedCentroids, GeographyError> {
    let mut archive = zip::ZipArchive::new(reader)?;
    let mut centroids = PopulationWeightedCentroids::default();

    for i in 0..archive.len() {
        let entry = archive.by_index(i)?;
        let name = entry.name().to_string();

        if entry.is_dir() || !name.to_lowercase().ends_with(".csv") {
            debug!(entry = %name, "Skipping archive entry");
            continue;
        }

        let Some(table) = read_centroid_csv(entry, &name)? else {
            debug!(entry = %name, "No zone code column, skipping");
            continue;
        };

        info!(
            entry = %name,
            level = %table.level(),
            zones = table.len(),
            "Loaded centroids"
        );

        match table.level() {
            ZoneLevel::DataZone => centroids.data_zones = Some(table),
            ZoneLevel::SuperDataZone => centroids.super_data_zones = Some(table),
            ZoneLevel::SmallArea => {}
        }
    }

    Ok(centroids)
}

fn column_index(
    headers: &csv::StringRecord,
    column: &str,
    file: &str,
) -> Result<usize, GeographyError> {
    headers
        .iter()
        .position(|header| header.trim_start_matches('\u{feff}').trim() == column)
        .ok_or_else(|| GeographyError::MissingColumn {
            column: column.to_string(),
            file: file.to_string(),
        })
}

pub(crate) fn parse_coordinate(value: &str, file: &str) -> Result<f64, GeographyError> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|_| GeographyError::InvalidCoordinate {
            value: value.to_string(),
            file: file.to_string(),
        })
}

/// Reads one centroid CSV. Returns `None` when the table has no zone code
/// column this crate knows about.
pub fn read_centroid_csv<R: Read>(
    reader: R,
    file: &str,
) -> Result<Option<ZoneCentroids>, GeographyError> {
    let mut reader = csv::Reader::from_reader(reader);
    let headers = reader.headers()?.clone();

    let level = [ZoneLevel::DataZone, ZoneLevel::SuperDataZone]
        .into_iter()
        .find(|level| column_index(&headers, level.code_column(), file).is_ok());

    let Some(level) = level else {
        return Ok(None);
    };

    let code = column_index(&headers, level.code_column(), file)?;
    let easting = column_index(&headers, EASTING_COLUMN, file)?;
    let northing = column_index(&headers, NORTHING_COLUMN, file)?;

    let mut zones = Vec::new();
    for record in reader.records() {
        let record = record?;
        let field = |index: usize| record.get(index).unwrap_or_default();

        zones.push((
            field(code).to_string(),
            parse_coordinate(field(easting), file)?,
            parse_coordinate(field(northing), file)?,
        ));
    }

    Ok(Some(ZoneCentroids::from_irish_grid(level, zones)?))
}

#[cfg(test)]
mod tests {
    use std::io::{Cursor, Write};

    use zip::write::SimpleFileOptions;

    use super::*;

    const DZ_CSV: &str = "DZ2021_code,DZ2021_name,SDZ2021_code,X,Y\n\
        95GG01S1,Botanic_A1,N21000001,333900,374000\n\
        95GG01S2,Botanic_A2,N21000001,334100,373800\n";

    const SDZ_CSV: &str = "SDZ2021_code,SDZ2021_name,X,Y\nN21000001,Botanic_A,334000,373900\n";

    fn archive(entries: &[(&str, &str)]) -> Cursor<Vec<u8>> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        for (name, content) in entries {
            writer
                .start_file(*name, SimpleFileOptions::default())
                .unwrap();
            writer.write_all(content.as_bytes()).unwrap();
        }
        let mut cursor = writer.finish().unwrap();
        cursor.set_position(0);
        cursor
    }

    #[test]
    fn test_read_centroid_archive() {
        let reader = archive(&[
            ("DZ2021_centroids.csv", DZ_CSV),
            ("readme.txt", "not a table"),
            ("SDZ2021_centroids.csv", SDZ_CSV),
        ]);

        let centroids = read_centroid_archive(reader).unwrap();

        let dz = centroids.data_zones.unwrap();
        assert_eq!(dz.level(), ZoneLevel::DataZone);
        assert_eq!(dz.codes(), vec!["95GG01S1", "95GG01S2"]);
        assert!((dz.centroids()[0].point.x() + 5.93).abs() < 0.01);

        let sdz = centroids.super_data_zones.unwrap();
        assert_eq!(sdz.level(), ZoneLevel::SuperDataZone);
        assert_eq!(sdz.codes(), vec!["N21000001"]);
    }

    #[test]
    fn test_unknown_table_is_skipped() {
        let table = read_centroid_csv("LGD2014_code,X,Y\nN09000003,1,2\n".as_bytes(), "lgd.csv")
            .unwrap();
        assert!(table.is_none());
    }

    #[test]
    fn test_missing_coordinate_column() {
        let result = read_centroid_csv("DZ2021_code,X\n95GG01S1,333900\n".as_bytes(), "dz.csv");

        assert!(matches!(
            result,
            Err(GeographyError::MissingColumn { column, .. }) if column == "Y"
        ));
    }

    #[test]
    fn test_invalid_coordinate() {
        let result =
            read_centroid_csv("DZ2021_code,X,Y\n95GG01S1,east,374000\n".as_bytes(), "dz.csv");

        assert!(matches!(
            result,
            Err(GeographyError::InvalidCoordinate { value, .. }) if value == "east"
        ));
    }
}
