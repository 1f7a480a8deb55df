use clap::{Parser, Subcommand};

use mimalloc::MiMalloc;

use crate::{
    fetch_matrix::FetchMatrixArgs, matrix::MatrixArgs, nearest::NearestArgs, points::PointsArgs,
    run::RunArgs,
};

mod fetch_matrix;
mod matrix;
mod nearest;
mod parsers;
mod points;
mod progress;
mod run;
mod workspace;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the zone centroids as OSRM point lists
    Points {
        #[command(flatten)]
        args: PointsArgs,
    },
    /// Request a durations matrix from an OSRM server
    FetchMatrix {
        #[command(flatten)]
        args: FetchMatrixArgs,
    },
    /// Label the durations matrices with zone codes and write the combined CSV
    #[command(visible_alias = "m")]
    Matrix {
        #[command(flatten)]
        args: MatrixArgs,
    },
    /// Map every zone to its nearest maternity unit
    Nearest {
        #[command(flatten)]
        args: NearestArgs,
    },
    /// Points, matrix and nearest, one after the other
    Run {
        #[command(flatten)]
        args: RunArgs,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), anyhow::Error> {
    dotenvy::from_filename("./.env.local").ok();

    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(if cli.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    match cli.command {
        Commands::Points { args } => points::run(args).await?,
        Commands::FetchMatrix { args } => fetch_matrix::run(args).await?,
        Commands::Matrix { args } => matrix::run(args).await?,
        Commands::Nearest { args } => nearest::run(args).await?,
        Commands::Run { args } => run::run(args).await?,
    }

    Ok(())
}
