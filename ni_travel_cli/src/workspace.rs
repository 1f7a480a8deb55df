use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use ni_geography::{
    centroid_archive::read_centroid_archive_file,
    download::Downloader,
    hospitals::{HOSPITALS, LocatedHospital, locate_hospitals},
    postcodes::read_postcode_directory,
    small_areas::read_small_area_centres,
    sources,
    zone_centroids::ZoneCentroids,
    zone_level::ZoneLevel,
};
use ni_osrm::{
    durations_table::DurationsTable,
    matrix_row::{MatrixRow, reshape_durations},
};
use tracing::info;

use crate::{parsers, progress::with_spinner};

#[derive(Args, Clone)]
pub struct WorkspaceArgs {
    /// Directory holding the downloads, the matrices and every output
    #[arg(long, default_value = ".")]
    pub data_dir: PathBuf,

    /// Date stamp of the travel matrix files
    #[arg(long, value_parser = parsers::parse_date, default_value = sources::MATRIX_DATE)]
    pub date: jiff::civil::Date,
}

impl WorkspaceArgs {
    pub fn path(&self, name: impl AsRef<Path>) -> PathBuf {
        self.data_dir.join(name)
    }
}

#[derive(Args, Clone)]
pub struct CentroidSourceArgs {
    /// Population-weighted Data Zone and Super Data Zone centroids (zip)
    #[arg(long, default_value = sources::CENTROIDS_URL)]
    pub centroids_url: String,

    /// Small Area boundaries with Irish Grid centres, relative to the data directory
    #[arg(long, default_value = sources::SMALL_AREA_BOUNDARIES_FILE)]
    pub small_areas: PathBuf,
}

/// Centroid tables of every level; their order fixes the matrix positions.
pub struct ZoneTables {
    pub data_zones: ZoneCentroids,
    pub super_data_zones: ZoneCentroids,
    pub small_areas: ZoneCentroids,
}

impl ZoneTables {
    pub fn all(&self) -> [&ZoneCentroids; 3] {
        [&self.data_zones, &self.super_data_zones, &self.small_areas]
    }
}

pub async fn download(downloader: &Downloader, url: &str, path: &Path) -> anyhow::Result<()> {
    with_spinner(
        format!("Downloading {url}"),
        downloader.download_if_missing(url, path),
    )
    .await
    .with_context(|| format!("Downloading {url}"))?;

    Ok(())
}

pub async fn load_zone_tables(
    workspace: &WorkspaceArgs,
    source: &CentroidSourceArgs,
    downloader: &Downloader,
) -> anyhow::Result<ZoneTables> {
    let archive_path = workspace.path(sources::file_name_from_url(&source.centroids_url));
    download(downloader, &source.centroids_url, &archive_path).await?;

    let centroids = read_centroid_archive_file(&archive_path)
        .with_context(|| format!("Reading {}", archive_path.display()))?;

    let data_zones = centroids
        .data_zones
        .context("No data zone centroids in the archive")?;
    let super_data_zones = centroids
        .super_data_zones
        .context("No super data zone centroids in the archive")?;

    let small_areas_path = workspace.path(&source.small_areas);
    let small_areas = read_small_area_centres(&small_areas_path)
        .with_context(|| format!("Reading {}", small_areas_path.display()))?;

    info!(
        data_zones = data_zones.len(),
        super_data_zones = super_data_zones.len(),
        small_areas = small_areas.len(),
        "Loaded zone centroids"
    );

    Ok(ZoneTables {
        data_zones,
        super_data_zones,
        small_areas,
    })
}

/// Reads the stored durations matrix of the table's level and labels it with
/// the table's zone codes.
pub fn load_matrix<'a>(
    workspace: &WorkspaceArgs,
    table: &'a ZoneCentroids,
) -> anyhow::Result<Vec<MatrixRow<'a>>> {
    let path = workspace.path(sources::matrix_file_name(table.level(), workspace.date));
    let durations = DurationsTable::from_file(&path)
        .with_context(|| format!("Reading {}", path.display()))?;

    let rows = reshape_durations(&durations, &table.codes());

    info!(
        level = %table.level(),
        zones = table.len(),
        rows = rows.len(),
        "Loaded travel matrix"
    );

    Ok(rows)
}

/// Labelled matrices of the levels that are mapped.
pub struct ZoneMatrices<'a> {
    pub data_zones: Vec<MatrixRow<'a>>,
    pub small_areas: Vec<MatrixRow<'a>>,
}

impl<'a> ZoneMatrices<'a> {
    pub fn load(workspace: &WorkspaceArgs, tables: &'a ZoneTables) -> anyhow::Result<Self> {
        Ok(Self {
            data_zones: load_matrix(workspace, &tables.data_zones)?,
            small_areas: load_matrix(workspace, &tables.small_areas)?,
        })
    }

    pub fn get(&self, level: ZoneLevel) -> Option<&[MatrixRow<'a>]> {
        match level {
            ZoneLevel::DataZone => Some(self.data_zones.as_slice()),
            ZoneLevel::SmallArea => Some(self.small_areas.as_slice()),
            ZoneLevel::SuperDataZone => None,
        }
    }
}

#[derive(Args, Clone)]
pub struct PostcodeSourceArgs {
    /// NISRA Central Postcode Directory (CPD light)
    #[arg(long, default_value = sources::POSTCODE_DIRECTORY_URL)]
    pub postcodes_url: String,
}

pub async fn load_hospitals(
    workspace: &WorkspaceArgs,
    source: &PostcodeSourceArgs,
    downloader: &Downloader,
) -> anyhow::Result<Vec<LocatedHospital>> {
    let path = workspace.path(sources::file_name_from_url(&source.postcodes_url));
    download(downloader, &source.postcodes_url, &path).await?;

    let postcodes =
        read_postcode_directory(&path).with_context(|| format!("Reading {}", path.display()))?;
    let hospitals = locate_hospitals(&HOSPITALS, &postcodes);

    info!(
        hospitals = hospitals.len(),
        maternity = hospitals.iter().filter(|h| h.maternity).count(),
        "Located hospitals"
    );

    Ok(hospitals)
}
