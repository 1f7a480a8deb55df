use clap::Args;
use ni_geography::download::Downloader;
use tracing::info;

use crate::{
    matrix::write_matrices,
    nearest::write_nearest,
    points::write_points,
    workspace::{
        CentroidSourceArgs, PostcodeSourceArgs, WorkspaceArgs, ZoneMatrices, load_hospitals,
        load_zone_tables,
    },
};

#[derive(Args, Clone)]
pub struct RunArgs {
    #[command(flatten)]
    pub workspace: WorkspaceArgs,

    #[command(flatten)]
    pub centroids: CentroidSourceArgs,

    #[command(flatten)]
    pub postcodes: PostcodeSourceArgs,
}

/// Every step except the routing itself: the matrices named after the
/// workspace date must already be in the data directory.
pub async fn run(args: RunArgs) -> anyhow::Result<()> {
    let downloader = Downloader::new();

    let tables = load_zone_tables(&args.workspace, &args.centroids, &downloader).await?;
    write_points(&args.workspace, &tables)?;

    let matrices = ZoneMatrices::load(&args.workspace, &tables)?;
    write_matrices(&args.workspace, &tables, &matrices)?;

    let hospitals = load_hospitals(&args.workspace, &args.postcodes, &downloader).await?;
    write_nearest(&args.workspace, &matrices, &hospitals)?;

    info!(data_dir = %args.workspace.data_dir.display(), "Done");

    Ok(())
}
