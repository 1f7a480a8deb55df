use anyhow::Context;
use clap::Args;
use ni_geography::{
    choropleth::write_nearest_facility_choropleth,
    download::Downloader,
    hospitals::{LocatedHospital, maternity_zone_codes},
    sources,
    zone_level::ZoneLevel,
};
use ni_osrm::{matrix_csv::write_matrix_csv, nearest_facility::nearest_facilities};
use tracing::info;

use crate::workspace::{
    CentroidSourceArgs, PostcodeSourceArgs, WorkspaceArgs, ZoneMatrices, load_hospitals,
    load_zone_tables,
};

/// Levels with a boundary file to draw the nearest facilities on.
const MAPPED_LEVELS: [ZoneLevel; 2] = [ZoneLevel::SmallArea, ZoneLevel::DataZone];

#[derive(Args, Clone)]
pub struct NearestArgs {
    #[command(flatten)]
    pub workspace: WorkspaceArgs,

    #[command(flatten)]
    pub centroids: CentroidSourceArgs,

    #[command(flatten)]
    pub postcodes: PostcodeSourceArgs,
}

pub fn write_nearest(
    workspace: &WorkspaceArgs,
    matrices: &ZoneMatrices<'_>,
    hospitals: &[LocatedHospital],
) -> anyhow::Result<()> {
    for level in MAPPED_LEVELS {
        let Some(rows) = matrices.get(level) else {
            continue;
        };
        let eligible = maternity_zone_codes(hospitals, level);
        let nearest = nearest_facilities(rows, &eligible);

        info!(
            level = %level,
            zones = nearest.len(),
            units = eligible.len(),
            "Selected nearest maternity units"
        );

        let csv_path = workspace.path(sources::nearest_facility_file_name(level));
        write_matrix_csv(&csv_path, &[nearest.as_slice()])
            .with_context(|| format!("Writing {}", csv_path.display()))?;

        let (Some(boundaries), Some(key)) =
            (sources::boundaries_file_name(level), level.boundary_key())
        else {
            continue;
        };

        let boundaries_path = workspace.path(boundaries);
        let output = workspace.path(sources::choropleth_file_name(level));
        write_nearest_facility_choropleth(&boundaries_path, key, &nearest, &output)
            .with_context(|| format!("Mapping {} onto {}", level, boundaries_path.display()))?;
    }

    Ok(())
}

pub async fn run(args: NearestArgs) -> anyhow::Result<()> {
    let downloader = Downloader::new();
    let tables = load_zone_tables(&args.workspace, &args.centroids, &downloader).await?;
    let matrices = ZoneMatrices::load(&args.workspace, &tables)?;
    let hospitals = load_hospitals(&args.workspace, &args.postcodes, &downloader).await?;

    write_nearest(&args.workspace, &matrices, &hospitals)
}
