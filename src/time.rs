use chrono::prelude::*;
use chrono::{Months, NaiveDate};

/// The year every chart is laid out against. Rows with an unreadable date
/// fall back to the first day of this year.
pub const REPORTING_YEAR: i32 = 2018;

/// Date format used by the dataset, e.g. `7/4/2018`. Chrono accepts
/// unpadded months and days for `%m` and `%d`.
pub const DATE_FORMAT: &str = "%m/%d/%Y";

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, DATE_FORMAT).ok()
}

pub fn fallback_date() -> NaiveDate {
    Year::reporting().start()
}

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Eq, Ord)]
pub struct Year {
    start: NaiveDate,
}

impl Year {
    pub fn from_ordinal(ord: i32) -> Option<Year> {
        NaiveDate::from_yo_opt(ord, 1).map(|start| Year { start })
    }

    pub fn reporting() -> Year {
        Self::from_ordinal(REPORTING_YEAR).expect("reporting year is within chrono's range")
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Month `number` (1-based) of this year, `None` outside `1..=12`.
    pub fn month(&self, number: u32) -> Option<Month> {
        NaiveDate::from_ymd_opt(self.start.year(), number, 1).map(Month::from_start)
    }

    pub fn months(&self) -> MonthsIter {
        MonthsIter {
            cur: Some(Month::from_start(self.start)),
            year: self.start.year(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Month {
    start: NaiveDate,
}

impl Month {
    fn from_start(start: NaiveDate) -> Month {
        Month { start }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn number(&self) -> u32 {
        self.start.month()
    }

    pub fn abbreviation(&self) -> &'static str {
        MONTH_ABBREVIATIONS[self.start.month0() as usize]
    }

    /// True when `date` falls in this calendar month, whatever its year.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.month() == self.number()
    }

    pub fn next(&self) -> Option<Month> {
        self.start
            .checked_add_months(Months::new(1))
            .map(Month::from_start)
    }
}

pub struct MonthsIter {
    cur: Option<Month>,
    year: i32,
}

impl Iterator for MonthsIter {
    type Item = Month;

    fn next(&mut self) -> Option<Self::Item> {
        let cur = self.cur.filter(|m| m.start.year() == self.year)?;
        self.cur = cur.next();
        Some(cur)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_unpadded_dates() {
        assert_eq!(
            parse_date("7/4/2018"),
            NaiveDate::from_ymd_opt(2018, 7, 4)
        );
        assert_eq!(
            parse_date("12/31/2018"),
            NaiveDate::from_ymd_opt(2018, 12, 31)
        );
    }

    #[test]
    fn rejects_garbage_dates() {
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("2018-01-01"), None);
        assert_eq!(parse_date("13/1/2018"), None);
    }

    #[test]
    fn fallback_is_new_year_of_reporting_year() {
        assert_eq!(fallback_date(), NaiveDate::from_ymd_opt(2018, 1, 1).unwrap());
    }

    #[test]
    fn year_has_twelve_months_in_order() {
        let months: Vec<_> = Year::reporting().months().collect();
        assert_eq!(months.len(), 12);
        assert_eq!(months[0].abbreviation(), "Jan");
        assert_eq!(months[11].abbreviation(), "Dec");
        assert!(months.windows(2).all(|w| w[0].number() + 1 == w[1].number()));
    }

    #[test]
    fn month_lookup_is_bounded() {
        let year = Year::reporting();
        assert_eq!(year.month(0), None);
        assert_eq!(year.month(13), None);
        assert_eq!(
            year.month(3).map(|m| m.start()),
            NaiveDate::from_ymd_opt(2018, 3, 1)
        );
    }

    #[test]
    fn month_contains_ignores_year() {
        let march = Year::reporting().month(3).unwrap();
        assert!(march.contains(NaiveDate::from_ymd_opt(2019, 3, 30).unwrap()));
        assert!(!march.contains(NaiveDate::from_ymd_opt(2018, 4, 1).unwrap()));
    }
}
