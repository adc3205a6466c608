use super::chart::{self, Rgb, Size};
use super::{DatasetCache, Measure, Station};
use cairo::{Context, Format, ImageSurface, LinearGradient};
use std::error::Error;
use std::f64::consts::PI;
use std::fs::File;
use std::path::PathBuf;
use tracing::info;

const GRIDLINE: Rgb = Rgb { r: 128, g: 128, b: 128 };
const FREEZING: Rgb = Rgb { r: 0, g: 0, b: 0 };
const LABEL: Rgb = Rgb { r: 0, g: 0, b: 0 };
const PRECIPITATION_BAR: Rgb = Rgb { r: 52, g: 199, b: 89 };
const SNOWFALL_BAR: Rgb = Rgb { r: 135, g: 206, b: 250 };

const FONT_SIZE: f64 = 12.0;
const DEGREE_LABEL_INSET: f64 = 10.0;
const MONTH_ROW_HEIGHT: f64 = 20.0;

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChartKind {
    Temperature,
    Precipitation,
    Snowfall,
}

impl std::fmt::Display for ChartKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let name = match self {
            ChartKind::Temperature => "temperature",
            ChartKind::Precipitation => "precipitation",
            ChartKind::Snowfall => "snowfall",
        };
        write!(f, "{}", name)
    }
}

#[derive(clap::Args, Debug)]
pub struct Args {
    /// Station to draw; the first station of the dataset when empty.
    #[clap(long, default_value_t = String::from(""))]
    station_id: String,

    #[clap(long, value_enum, default_value_t = ChartKind::Temperature)]
    chart: ChartKind,

    #[clap(long, default_value_t = 1600)]
    width: u32,

    #[clap(long, default_value_t = 600)]
    height: u32,

    /// Draw only the temperature segments, without degree or month labels.
    #[clap(long)]
    compact: bool,

    /// Defaults to `<station>-<chart>.png`.
    #[clap(long)]
    output: Option<PathBuf>,
}

pub fn execute(cache: &DatasetCache, args: &Args) -> Result<(), Box<dyn Error>> {
    let dataset = cache.get()?;
    let station = if args.station_id.is_empty() {
        dataset.stations().first().ok_or("dataset has no stations")?
    } else {
        dataset
            .get(&args.station_id)
            .ok_or_else(|| format!("unknown station: {}", args.station_id))?
    };

    let surface = ImageSurface::create(
        Format::ARgb32,
        i32::try_from(args.width)?,
        i32::try_from(args.height)?,
    )?;
    let size = Size::new(args.width as f64, args.height as f64);
    {
        let cr = Context::new(&surface)?;
        cr.set_source_rgb(1.0, 1.0, 1.0);
        cr.paint()?;
        cr.set_font_size(FONT_SIZE);

        match args.chart {
            ChartKind::Temperature => {
                draw_temperatures(&cr, station, size)?;
                if !args.compact {
                    draw_degrees(&cr, size)?;
                    draw_month_names(&cr, size)?;
                }
            }
            ChartKind::Precipitation => {
                draw_bars(&cr, station, Measure::Precipitation, PRECIPITATION_BAR, size)?
            }
            ChartKind::Snowfall => draw_bars(&cr, station, Measure::Snowfall, SNOWFALL_BAR, size)?,
        }
    }

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(format!("{}-{}.png", station.id(), args.chart)));
    surface.write_to_png(&mut File::create(&output)?)?;
    info!(
        station = station.id(),
        chart = %args.chart,
        output = %output.display(),
        "rendered chart"
    );
    Ok(())
}

fn set_color(cr: &Context, color: Rgb) {
    let (r, g, b) = color.unit();
    cr.set_source_rgb(r, g, b);
}

fn draw_temperatures(cr: &Context, station: &Station, size: Size) -> Result<(), cairo::Error> {
    let gradient = LinearGradient::new(0.0, size.height, 0.0, 0.0);
    for (offset, color) in chart::gradient_stops() {
        let (r, g, b) = color.unit();
        gradient.add_color_stop_rgb(offset, r, g, b);
    }

    cr.set_source(&gradient)?;
    cr.set_line_width(1.0);
    for segment in chart::temperature_segments(station.measurements(), size) {
        cr.move_to(segment.x, segment.y_low);
        cr.line_to(segment.x, segment.y_high);
        cr.stroke()?;
    }
    Ok(())
}

fn draw_degrees(cr: &Context, size: Size) -> Result<(), cairo::Error> {
    for line in chart::gridlines(size) {
        set_color(cr, if line.is_freezing() { FREEZING } else { GRIDLINE });
        cr.move_to(0.0, line.y);
        cr.line_to(size.width, line.y);
        cr.stroke()?;

        if let Some(degrees) = line.label {
            set_color(cr, LABEL);
            cr.move_to(DEGREE_LABEL_INSET, line.y + FONT_SIZE);
            cr.show_text(&format!("{}°", degrees))?;
        }
    }
    Ok(())
}

fn draw_month_names(cr: &Context, size: Size) -> Result<(), cairo::Error> {
    for marker in chart::month_markers(size) {
        set_color(cr, GRIDLINE);
        cr.move_to(marker.x, size.height);
        cr.line_to(marker.x, 0.0);
        cr.stroke()?;

        set_color(cr, LABEL);
        cr.move_to(marker.label_x, marker.label_y + FONT_SIZE);
        cr.show_text(marker.abbreviation)?;
    }
    Ok(())
}

fn draw_bars(
    cr: &Context,
    station: &Station,
    measure: Measure,
    color: Rgb,
    size: Size,
) -> Result<(), cairo::Error> {
    let bars = chart::monthly_bars(station, measure);
    let slot = size.width / bars.len() as f64;
    let base = size.height - MONTH_ROW_HEIGHT;

    for (ix, bar) in bars.iter().enumerate() {
        let center = slot * (ix as f64 + 0.5);

        set_color(cr, color);
        cr.rectangle(
            center - chart::BAR_WIDTH / 2.0,
            base - bar.height,
            chart::BAR_WIDTH,
            bar.height,
        );
        cr.fill()?;

        // The total reads bottom to top, just above the bar unless shifted
        // onto a tall one.
        set_color(cr, LABEL);
        cr.save()?;
        cr.translate(
            center + FONT_SIZE / 3.0,
            base - bar.height - 4.0 + bar.label_offset,
        );
        cr.rotate(-PI / 2.0);
        cr.move_to(0.0, 0.0);
        cr.show_text(&bar.label)?;
        cr.restore()?;

        let extents = cr.text_extents(bar.abbreviation)?;
        cr.move_to(center - extents.width() / 2.0, size.height - 4.0);
        cr.show_text(bar.abbreviation)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Data;
    use std::fs;
    use std::path::Path;

    const DATASET: &str = "H,NAME,,,,,,,,
001,\"Springfield\",40.0,-89.0,100,1/1/2018,0.5,1.5,32.0,20.0
001,\"Springfield\",40.0,-89.0,100,2/1/2018,3.0,0,40.0,25.0
002,\"Shelbyville\",39.0,-88.0,50,1/1/2018,0,0,50.0,30.0
";

    fn cache(dir: &Path) -> DatasetCache {
        fs::write(dir.join(Data::DATASET_FILE), DATASET).unwrap();
        DatasetCache::new(Data::from(dir).unwrap())
    }

    fn args(station_id: &str, chart: ChartKind, compact: bool, output: &Path) -> Args {
        Args {
            station_id: station_id.to_owned(),
            chart,
            width: 365,
            height: 220,
            compact,
            output: Some(output.to_owned()),
        }
    }

    fn png_size(path: &Path) -> (i32, i32) {
        let surface = ImageSurface::create_from_png(&mut File::open(path).unwrap()).unwrap();
        (surface.width(), surface.height())
    }

    #[test]
    fn renders_every_chart_kind() {
        let dir = tempfile::tempdir().unwrap();
        let cache = cache(dir.path());

        let charts = [
            ("temperature.png", ChartKind::Temperature, false),
            ("widget.png", ChartKind::Temperature, true),
            ("precipitation.png", ChartKind::Precipitation, false),
            ("snowfall.png", ChartKind::Snowfall, false),
        ];
        for (name, chart, compact) in charts {
            let output = dir.path().join(name);
            execute(&cache, &args("001", chart, compact, &output)).unwrap();
            assert!(output.is_file(), "{} not written", name);
            assert_eq!(png_size(&output), (365, 220));
        }
    }

    #[test]
    fn empty_station_id_draws_the_first_station() {
        let dir = tempfile::tempdir().unwrap();
        let cache = cache(dir.path());
        let output = dir.path().join("first.png");

        execute(&cache, &args("", ChartKind::Temperature, false, &output)).unwrap();
        assert_eq!(png_size(&output), (365, 220));
    }

    #[test]
    fn unknown_station_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let cache = cache(dir.path());
        let output = dir.path().join("missing.png");

        let err = execute(&cache, &args("999", ChartKind::Temperature, false, &output))
            .unwrap_err();
        assert!(err.to_string().contains("999"));
        assert!(!output.exists());
    }

    #[test]
    fn oversized_canvas_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let cache = cache(dir.path());
        let output = dir.path().join("huge.png");

        let mut huge = args("001", ChartKind::Temperature, false, &output);
        huge.width = u32::MAX;
        assert!(execute(&cache, &huge).is_err());
        assert!(!output.exists());
    }
}
