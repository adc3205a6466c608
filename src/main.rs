use clap::{Parser, Subcommand};
use std::error::Error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use weather_chart::{list_stations, render, Data, DatasetCache};

#[derive(Parser, Debug)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Directory containing weather-data.csv.
    #[clap(long, env = "WEATHER_CHART_DATA_DIR", default_value_t = String::from("data"))]
    data_dir: String,
}

#[derive(Subcommand, Debug)]
enum Command {
    Render(render::Args),
    ListStations(list_stations::Args),
}

impl Command {
    fn execute(&self, cache: &DatasetCache) -> Result<(), Box<dyn Error>> {
        match self {
            Command::Render(args) => render::execute(cache, args),
            Command::ListStations(args) => list_stations::execute(cache, args),
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    let cache = DatasetCache::new(Data::from(&args.data_dir)?);
    args.command.execute(&cache)?;
    Ok(())
}
