//! Maps dates and measurements onto a canvas.
//!
//! Canvas coordinates have their origin at the top-left corner with `y`
//! growing downward, so values are subtracted from the canvas height to
//! draw upward. Every function here is pure.

use std::ops::RangeInclusive;

use chrono::{Datelike, NaiveDate};

use crate::station::{DayRecord, Measure, Station};
use crate::time::Year;

/// Day width divisor. Leap years are not special-cased, so day 366 lands
/// past the right edge.
pub const DAYS_PER_YEAR: u32 = 365;

/// Degrees Fahrenheit spanned by the temperature axis.
pub const TEMPERATURE_RANGE: u32 = 110;

/// Temperature drawn at the bottom edge.
pub const TEMPERATURE_FLOOR: f64 = -10.0;

/// Gridline indices; line `n` sits at `n * 10` degrees. Line `-1` is the
/// bottom border and has no label.
pub const GRIDLINES: RangeInclusive<i32> = -1..=10;

/// Index of the gridline at 0 °F.
pub const FREEZING_LINE: i32 = 0;

/// Pixels per inch of monthly precipitation or snowfall.
pub const BAR_SCALE: f64 = 15.0;

pub const BAR_WIDTH: f64 = 20.0;

/// Totals at or above this value get their label moved down onto the bar.
pub const LABEL_OFFSET_THRESHOLD: f64 = 2.4;

pub const LABEL_OFFSET: f64 = 35.0;

/// Month names start this many days after the month line.
pub const MONTH_LABEL_INSET_DAYS: f64 = 5.0;

/// Month names sit this far above the bottom edge.
pub const MONTH_LABEL_RISE: f64 = 25.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Channels scaled to `0.0..=1.0`.
    pub fn unit(&self) -> (f64, f64, f64) {
        (
            self.r as f64 / 255.0,
            self.g as f64 / 255.0,
            self.b as f64 / 255.0,
        )
    }
}

const fn rgb(r: u8, g: u8, b: u8) -> Rgb {
    Rgb { r, g, b }
}

/// Stroke gradient for temperature segments, listed from the bottom of the
/// canvas (cold) to the top (hot).
pub const TEMPERATURE_GRADIENT: [Rgb; 12] = [
    rgb(175, 82, 222),
    rgb(0, 0, 139),
    rgb(0, 122, 255),
    rgb(30, 144, 255),
    rgb(0, 191, 255),
    rgb(135, 206, 250),
    rgb(52, 199, 89),
    rgb(255, 204, 0),
    rgb(255, 149, 0),
    rgb(255, 140, 0),
    rgb(255, 59, 48),
    rgb(139, 0, 0),
];

/// Gradient stops as `(offset, color)` with offsets evenly spread over
/// `0.0..=1.0`.
pub fn gradient_stops() -> impl Iterator<Item = (f64, Rgb)> {
    let last = (TEMPERATURE_GRADIENT.len() - 1) as f64;
    TEMPERATURE_GRADIENT
        .into_iter()
        .enumerate()
        .map(move |(ix, color)| (ix as f64 / last, color))
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

pub fn day_width(canvas_width: f64) -> f64 {
    canvas_width / DAYS_PER_YEAR as f64
}

pub fn degree_height(canvas_height: f64, range: u32) -> f64 {
    canvas_height / range as f64
}

/// Horizontal offset of `date`, using its 1-based day of the year.
pub fn day_offset_x(date: NaiveDate, day_width: f64) -> f64 {
    date.ordinal() as f64 * day_width
}

/// Height of `temperature` above the bottom edge.
pub fn temperature_offset_y(temperature: f64, degree_height: f64) -> f64 {
    (temperature - TEMPERATURE_FLOOR) * degree_height
}

pub fn gridline_y(line: i32, canvas_height: f64) -> f64 {
    canvas_height
        - temperature_offset_y(
            (line * 10) as f64,
            degree_height(canvas_height, TEMPERATURE_RANGE),
        )
}

/// Offset of the first day of `month` in the reporting year, `None` for a
/// month outside `1..=12`.
pub fn month_start_x(month: u32, canvas_width: f64) -> Option<f64> {
    let month = Year::reporting().month(month)?;
    Some(day_offset_x(month.start(), day_width(canvas_width)))
}

/// Vertical stroke from a day's low to its high.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemperatureSegment {
    pub x: f64,
    pub y_low: f64,
    pub y_high: f64,
}

pub fn temperature_segments(measurements: &[DayRecord], size: Size) -> Vec<TemperatureSegment> {
    let day_width = day_width(size.width);
    let degree_height = degree_height(size.height, TEMPERATURE_RANGE);
    measurements
        .iter()
        .map(|day| TemperatureSegment {
            x: day_offset_x(day.date, day_width),
            y_low: size.height - temperature_offset_y(day.low, degree_height),
            y_high: size.height - temperature_offset_y(day.high, degree_height),
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gridline {
    pub index: i32,
    pub y: f64,
    /// Degrees printed next to the line.
    pub label: Option<i32>,
}

impl Gridline {
    pub fn is_freezing(&self) -> bool {
        self.index == FREEZING_LINE
    }
}

pub fn gridlines(size: Size) -> Vec<Gridline> {
    GRIDLINES
        .map(|index| Gridline {
            index,
            y: gridline_y(index, size.height),
            label: (index >= 0).then_some(index * 10),
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthMarker {
    pub month: u32,
    pub abbreviation: &'static str,
    pub x: f64,
    pub label_x: f64,
    pub label_y: f64,
}

pub fn month_markers(size: Size) -> Vec<MonthMarker> {
    let day_width = day_width(size.width);
    Year::reporting()
        .months()
        .map(|month| {
            let x = day_offset_x(month.start(), day_width);
            MonthMarker {
                month: month.number(),
                abbreviation: month.abbreviation(),
                x,
                label_x: x + MONTH_LABEL_INSET_DAYS * day_width,
                label_y: size.height - MONTH_LABEL_RISE,
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyBar {
    pub month: u32,
    pub abbreviation: &'static str,
    pub total: f64,
    pub height: f64,
    /// Total rounded to one decimal.
    pub label: String,
    /// Downward shift of the rotated label.
    pub label_offset: f64,
}

pub fn bar_height(total: f64) -> f64 {
    total * BAR_SCALE
}

pub fn label_offset(total: f64) -> f64 {
    if total < LABEL_OFFSET_THRESHOLD {
        0.0
    } else {
        LABEL_OFFSET
    }
}

/// One bar per calendar month, January first.
pub fn monthly_bars(station: &Station, measure: Measure) -> Vec<MonthlyBar> {
    Year::reporting()
        .months()
        .map(|month| {
            let total = station.monthly_sum(month.number(), measure);
            MonthlyBar {
                month: month.number(),
                abbreviation: month.abbreviation(),
                total,
                height: bar_height(total),
                label: format!("{:.1}", total),
                label_offset: label_offset(total),
            }
        })
        .collect()
}
