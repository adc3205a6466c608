use super::{DatasetCache, Station};
use serde::Serialize;
use std::error::Error;

#[derive(clap::Args, Debug)]
pub struct Args {
    /// Print every station with all of its measurements.
    #[clap(long)]
    full: bool,
}

/// What the station header shows: where the station is and the range of
/// its temperatures.
#[derive(Debug, Serialize, PartialEq)]
pub struct Summary<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub location: String,
    pub elevation_feet: i32,
    pub yearly_low: Option<f64>,
    pub yearly_high: Option<f64>,
    pub days: usize,
}

impl<'a> From<&'a Station> for Summary<'a> {
    fn from(station: &'a Station) -> Self {
        Self {
            id: station.id(),
            name: station.name(),
            location: station.location().to_string(),
            elevation_feet: station.altitude_feet(),
            yearly_low: station.yearly_low(),
            yearly_high: station.yearly_high(),
            days: station.measurements().len(),
        }
    }
}

pub fn execute(cache: &DatasetCache, args: &Args) -> Result<(), Box<dyn Error>> {
    let dataset = cache.get()?;
    let json = if args.full {
        serde_json::to_string_pretty(dataset.stations())?
    } else {
        let summaries: Vec<Summary> = dataset.iter().map(Summary::from).collect();
        serde_json::to_string_pretty(&summaries)?
    };
    println!("{}", json);
    Ok(())
}
