use chrono::NaiveDate;
use serde::Serialize;

use crate::time::Year;

const FEET_PER_METER: f64 = 3.28084;

/// Converts an altitude in metres to whole feet, truncating toward zero.
pub fn feet_from_meters(m: f64) -> i32 {
    (m * FEET_PER_METER) as i32
}

/// One day of observations for a station.
///
/// Values are stored as read. Nothing checks that `low <= high` or that
/// precipitation and snowfall are non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DayRecord {
    pub date: NaiveDate,
    /// Inches.
    pub precipitation: f64,
    /// Inches.
    pub snowfall: f64,
    /// Degrees Fahrenheit.
    pub high: f64,
    /// Degrees Fahrenheit.
    pub low: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Measure {
    Precipitation,
    Snowfall,
}

impl Measure {
    pub fn of(&self, day: &DayRecord) -> f64 {
        match self {
            Measure::Precipitation => day.precipitation,
            Measure::Snowfall => day.snowfall,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Station {
    id: String,
    name: String,
    location: Location,
    altitude_feet: i32,
    measurements: Vec<DayRecord>,
}

impl Station {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        location: Location,
        altitude_feet: i32,
        measurements: Vec<DayRecord>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            location,
            altitude_feet,
            measurements,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn altitude_feet(&self) -> i32 {
        self.altitude_feet
    }

    /// Records in the order they were read, which is not necessarily
    /// chronological.
    pub fn measurements(&self) -> &[DayRecord] {
        &self.measurements
    }

    pub(crate) fn push(&mut self, day: DayRecord) {
        self.measurements.push(day);
    }

    /// Records whose date falls in calendar month `month` (1-based), in
    /// stored order. Yields nothing for a month outside `1..=12`.
    pub fn measurements_in_month(&self, month: u32) -> impl Iterator<Item = &DayRecord> + '_ {
        let month = Year::reporting().month(month);
        self.measurements
            .iter()
            .filter(move |day| month.map_or(false, |m| m.contains(day.date)))
    }

    /// Lowest `low` of the year, `None` when the station has no records.
    pub fn yearly_low(&self) -> Option<f64> {
        self.measurements
            .iter()
            .map(|day| day.low)
            .min_by(|left, right| left.total_cmp(right))
    }

    /// Highest `high` of the year, `None` when the station has no records.
    pub fn yearly_high(&self) -> Option<f64> {
        self.measurements
            .iter()
            .map(|day| day.high)
            .max_by(|left, right| left.total_cmp(right))
    }

    pub fn monthly_sum(&self, month: u32, measure: Measure) -> f64 {
        self.measurements_in_month(month)
            .map(|day| measure.of(day))
            .sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Location {
    lat: f64,
    lng: f64,
}

impl Location {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lng(&self) -> f64 {
        self.lng
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (lat_d, lat_m, lat_s) = to_dms(self.lat);
        let (lng_d, lng_m, lng_s) = to_dms(self.lng);
        write!(
            f,
            "{:02}°{:02}′{:02}″{} {:03}°{:02}′{:02}″{}",
            lat_d,
            lat_m,
            lat_s,
            if self.lat < 0.0 { 'S' } else { 'N' },
            lng_d,
            lng_m,
            lng_s,
            if self.lng < 0.0 { 'W' } else { 'E' }
        )
    }
}

fn to_dms(v: f64) -> (i32, i32, i32) {
    let v = v.abs();
    let mut d = v as i32;
    let v = v - d as f64;
    let mut m = (v * 60.0) as i32;
    let v = v - m as f64 / 60.0;
    let mut s = (v * 3600.0).round() as i32;

    if s == 60 {
        s = 0;
        m += 1;
    }

    if m == 60 {
        m = 0;
        d += 1;
    }

    (d, m, s)
}
