use anyhow::Context;
use clap::Args;
use ni_geography::{download::Downloader, sources, zone_level::ZoneLevel};
use ni_osrm::matrix_csv::write_matrix_csv;
use tracing::info;

use crate::workspace::{
    CentroidSourceArgs, WorkspaceArgs, ZoneMatrices, ZoneTables, load_matrix, load_zone_tables,
};

#[derive(Args, Clone)]
pub struct MatrixArgs {
    #[command(flatten)]
    pub workspace: WorkspaceArgs,

    #[command(flatten)]
    pub source: CentroidSourceArgs,
}

/// Writes the Data Zone and Small Area matrices to one CSV. The Super Data
/// Zone matrix, when present, goes to its own file.
pub fn write_matrices(
    workspace: &WorkspaceArgs,
    tables: &ZoneTables,
    matrices: &ZoneMatrices<'_>,
) -> anyhow::Result<()> {
    let path = workspace.path(sources::combined_matrix_file_name(workspace.date));
    write_matrix_csv(
        &path,
        &[
            matrices.data_zones.as_slice(),
            matrices.small_areas.as_slice(),
        ],
    )
    .with_context(|| format!("Writing {}", path.display()))?;

    let sdz_matrix = workspace.path(sources::matrix_file_name(
        ZoneLevel::SuperDataZone,
        workspace.date,
    ));
    if !sdz_matrix.is_file() {
        info!(path = %sdz_matrix.display(), "No super data zone matrix, skipping");
        return Ok(());
    }

    let super_data_zones = load_matrix(workspace, &tables.super_data_zones)?;
    let path = workspace.path(sources::level_matrix_file_name(
        ZoneLevel::SuperDataZone,
        workspace.date,
    ));
    write_matrix_csv(&path, &[super_data_zones.as_slice()])
        .with_context(|| format!("Writing {}", path.display()))?;

    Ok(())
}

pub async fn run(args: MatrixArgs) -> anyhow::Result<()> {
    let downloader = Downloader::new();
    let tables = load_zone_tables(&args.workspace, &args.source, &downloader).await?;
    let matrices = ZoneMatrices::load(&args.workspace, &tables)?;

    write_matrices(&args.workspace, &tables, &matrices)
}
