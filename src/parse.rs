//! Turns the comma-separated dataset into stations.
//!
//! Rows have the shape
//! `station_id,station_name,latitude,longitude,altitude_m,M/d/yyyy,precipitation,snowfall,high,low`.
//! Parsing never rejects a row: unreadable numbers become `0` and
//! unreadable dates become January 1 of the reporting year.

use std::str::FromStr;

use csv::StringRecord;
use tracing::{debug, trace};

use crate::error::DataSourceError;
use crate::station::{feet_from_meters, DayRecord, Location, Station};
use crate::time;

/// Station name carried by header rows. Any run of rows with this name is
/// discarded.
pub const HEADER_NAME: &str = "NAME";

/// One line of the dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub station_id: String,
    pub station_name: String,
    pub lat: f64,
    pub lng: f64,
    pub altitude_meters: f64,
    pub day: DayRecord,
}

impl Row {
    fn from_record(rec: &StringRecord) -> Row {
        Row {
            station_id: field(rec, 0).to_owned(),
            station_name: clean_name(field(rec, 1)),
            lat: number(rec, 2),
            lng: number(rec, 3),
            altitude_meters: number(rec, 4),
            day: DayRecord {
                date: date(rec, 5),
                precipitation: number(rec, 6),
                snowfall: number(rec, 7),
                high: number(rec, 8),
                low: number(rec, 9),
            },
        }
    }
}

fn field(rec: &StringRecord, ix: usize) -> &str {
    rec.get(ix).unwrap_or("")
}

fn number(rec: &StringRecord, ix: usize) -> f64 {
    let s = field(rec, ix);
    f64::from_str(s).unwrap_or_else(|_| {
        trace!(field = ix, value = s, "defaulting unreadable number to 0");
        0.0
    })
}

fn date(rec: &StringRecord, ix: usize) -> chrono::NaiveDate {
    let s = field(rec, ix);
    time::parse_date(s).unwrap_or_else(|| {
        trace!(field = ix, value = s, "defaulting unreadable date");
        time::fallback_date()
    })
}

/// Quotes are dropped and semicolons stand in for commas inside names.
fn clean_name(s: &str) -> String {
    s.replace('"', "").replace(';', ",")
}

/// Splits `text` into rows in document order.
///
/// Fields are split on every comma; quote characters have no special
/// meaning. Short rows are padded with defaults.
pub fn rows(text: &str) -> Result<Vec<Row>, DataSourceError> {
    let mut r = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for record in r.records() {
        rows.push(Row::from_record(&record?));
    }
    Ok(rows)
}

/// Partitions rows into stations, starting a new station each time the
/// station id differs from the previous row's.
///
/// Station metadata comes from the first row of each run. A station id
/// that reappears after another id starts a second station rather than
/// merging into the first.
pub fn group(rows: Vec<Row>) -> Vec<Station> {
    let mut stations: Vec<Station> = Vec::new();
    for row in rows {
        match stations.last_mut() {
            Some(station) if station.id() == row.station_id => station.push(row.day),
            _ => stations.push(Station::new(
                row.station_id,
                row.station_name,
                Location::new(row.lat, row.lng),
                feet_from_meters(row.altitude_meters),
                vec![row.day],
            )),
        }
    }

    stations.retain(|station| {
        let keep = station.name() != HEADER_NAME;
        if !keep {
            debug!(
                id = station.id(),
                rows = station.measurements().len(),
                "dropping header rows"
            );
        }
        keep
    });

    for station in &stations {
        debug!(
            id = station.id(),
            name = station.name(),
            days = station.measurements().len(),
            "parsed station"
        );
    }
    stations
}

pub fn parse_stations(text: &str) -> Result<Vec<Station>, DataSourceError> {
    Ok(group(rows(text)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const SCENARIO: &str = "H,NAME,,,,,,,,
001,\"Springfield\",40.0,-89.0,100,1/1/2018,0.5,0,32.0,20.0
001,\"Springfield\",40.0,-89.0,100,2/1/2018,1.0,0,40.0,25.0
002,\"Shelbyville\",39.0,-88.0,50,1/1/2018,0,0,50.0,30.0
";

    #[test]
    fn scenario_yields_two_stations() {
        let stations = parse_stations(SCENARIO).unwrap();
        assert_eq!(stations.len(), 2);

        let springfield = &stations[0];
        assert_eq!(springfield.id(), "001");
        assert_eq!(springfield.name(), "Springfield");
        assert_eq!(springfield.altitude_feet(), 328);
        assert_eq!(springfield.location().lat(), 40.0);
        assert_eq!(springfield.location().lng(), -89.0);
        assert_eq!(springfield.measurements().len(), 2);

        assert_eq!(stations[1].id(), "002");
        assert_eq!(stations[1].altitude_feet(), 164);
    }

    #[test]
    fn unreadable_numbers_default_to_zero() {
        let rows = rows("001,A,x,40,1,1/2/2018,0.1,0.2,hot,12").unwrap();
        assert_eq!(rows[0].lat, 0.0);
        assert_eq!(rows[0].lng, 40.0);
        assert_eq!(rows[0].day.high, 0.0);
        assert_eq!(rows[0].day.low, 12.0);
    }

    #[test]
    fn unreadable_dates_fall_back_to_new_year() {
        let rows = rows("001,A,1,1,1,someday,0,0,1,1").unwrap();
        assert_eq!(rows[0].day.date, NaiveDate::from_ymd_opt(2018, 1, 1).unwrap());
    }

    #[test]
    fn short_rows_are_padded_with_defaults() {
        let rows = rows("001,A,1.5").unwrap();
        assert_eq!(rows[0].lat, 1.5);
        assert_eq!(rows[0].altitude_meters, 0.0);
        assert_eq!(rows[0].day.date, time::fallback_date());
        assert_eq!(rows[0].day.low, 0.0);
    }

    #[test]
    fn names_drop_quotes_and_restore_commas() {
        let rows = rows("001,\"Springfield; IL\",1,1,1,1/1/2018,0,0,1,1").unwrap();
        assert_eq!(rows[0].station_name, "Springfield, IL");
    }

    #[test]
    fn header_runs_are_dropped_anywhere() {
        let text = "\
A,NAME,,,,,,,,
001,One,0,0,0,1/1/2018,0,0,1,1
B,NAME,,,,,,,,
002,Two,0,0,0,1/1/2018,0,0,1,1
C,NAME,,,,,,,,
";
        let ids: Vec<_> = parse_stations(text)
            .unwrap()
            .iter()
            .map(|s| s.id().to_owned())
            .collect();
        assert_eq!(ids, vec!["001", "002"]);
    }

    #[test]
    fn reappearing_id_starts_a_new_station() {
        let text = "\
001,One,0,0,0,1/1/2018,0,0,1,1
002,Two,0,0,0,1/1/2018,0,0,1,1
001,One,0,0,0,1/2/2018,0,0,1,1
";
        let stations = parse_stations(text).unwrap();
        assert_eq!(stations.len(), 3);
        assert_eq!(stations[0].id(), stations[2].id());
        assert_eq!(stations[2].measurements().len(), 1);
    }

    #[test]
    fn grouping_preserves_every_row_in_order() {
        let text = "\
H,NAME,,,,,,,,
001,One,0,0,0,1/1/2018,1,0,1,1
001,One,0,0,0,1/2/2018,2,0,1,1
002,Two,0,0,0,1/1/2018,3,0,1,1
003,Three,0,0,0,1/1/2018,4,0,1,1
003,Three,0,0,0,1/5/2018,5,0,1,1
";
        let all_rows = rows(text).unwrap();
        let expected: Vec<DayRecord> = all_rows[1..].iter().map(|r| r.day).collect();

        let stations = group(all_rows);
        assert_eq!(stations.len(), 3);
        let flattened: Vec<DayRecord> = stations
            .iter()
            .flat_map(|s| s.measurements().iter().copied())
            .collect();
        assert_eq!(flattened, expected);
    }

    #[test]
    fn crlf_and_blank_lines_are_tolerated() {
        let text = "001,One,0,0,0,1/1/2018,0,0,1,1\r\n\r\n001,One,0,0,0,1/2/2018,0,0,1,1\r\n";
        let stations = parse_stations(text).unwrap();
        assert_eq!(stations.len(), 1);
        assert_eq!(stations[0].measurements().len(), 2);
    }
}
