use anyhow::Context;
use clap::Args;
use ni_geography::{sources, zone_level::ZoneLevel};
use ni_osrm::{
    client::{OsrmTableClient, OsrmTableClientParams},
    points::read_points_file,
};
use tracing::info;

use crate::{parsers, progress::with_spinner, workspace::WorkspaceArgs};

const OSRM_URL_ENV_VAR: &str = "OSRM_URL";

#[derive(Args, Clone)]
pub struct FetchMatrixArgs {
    #[command(flatten)]
    pub workspace: WorkspaceArgs,

    /// Zone level of the point list: dz, sdz or sa
    #[arg(short, long, value_parser = parsers::parse_zone_level)]
    pub level: ZoneLevel,

    /// Base URL of the OSRM server, defaults to $OSRM_URL
    #[arg(long)]
    pub osrm_url: Option<String>,

    #[arg(long, default_value = sources::DEFAULT_OSRM_PROFILE)]
    pub profile: String,
}

pub async fn run(args: FetchMatrixArgs) -> anyhow::Result<()> {
    let output = args
        .workspace
        .path(sources::matrix_file_name(args.level, args.workspace.date));

    if output.is_file() {
        info!(path = %output.display(), "Matrix already present");
        return Ok(());
    }

    let osrm_url = match args.osrm_url {
        Some(url) => url,
        None => std::env::var(OSRM_URL_ENV_VAR)
            .with_context(|| format!("--osrm-url not given and {OSRM_URL_ENV_VAR} not set"))?,
    };

    let points_path = args.workspace.path(sources::points_file_name(args.level));
    let points = read_points_file(&points_path)
        .with_context(|| format!("Reading {}", points_path.display()))?;

    let client = OsrmTableClient::new(OsrmTableClientParams {
        osrm_url,
        profile: args.profile,
    });

    let durations = with_spinner(
        format!("Requesting {} x {} durations", points.len(), points.len()),
        client.fetch_durations(points.as_slice()),
    )
    .await?;

    durations
        .write_file(&output)
        .with_context(|| format!("Writing {}", output.display()))?;

    info!(
        level = %args.level,
        origins = durations.num_origins(),
        path = %output.display(),
        "Wrote durations matrix"
    );

    Ok(())
}
