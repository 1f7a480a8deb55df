use anyhow::Context;
use clap::Args;
use ni_geography::{download::Downloader, sources};
use tracing::info;

use crate::workspace::{CentroidSourceArgs, WorkspaceArgs, ZoneTables, load_zone_tables};

#[derive(Args, Clone)]
pub struct PointsArgs {
    #[command(flatten)]
    pub workspace: WorkspaceArgs,

    #[command(flatten)]
    pub source: CentroidSourceArgs,
}

pub fn write_points(workspace: &WorkspaceArgs, tables: &ZoneTables) -> anyhow::Result<()> {
    for table in tables.all() {
        let path = workspace.path(sources::points_file_name(table.level()));
        table
            .write_osrm_points(&path)
            .with_context(|| format!("Writing {}", path.display()))?;

        info!(
            level = %table.level(),
            points = table.len(),
            path = %path.display(),
            "Wrote OSRM points"
        );
    }

    Ok(())
}

pub async fn run(args: PointsArgs) -> anyhow::Result<()> {
    let downloader = Downloader::new();
    let tables = load_zone_tables(&args.workspace, &args.source, &downloader).await?;

    write_points(&args.workspace, &tables)
}
