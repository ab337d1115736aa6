//! `$CALENDARPERIOD` and `$VALIDDAYS` sections.

use chrono::NaiveDate;

use crate::error::Result;
use crate::reader::RawSection;
use crate::record::{Columns, Fields};

/// Dates are written as `DD.MM.YYYY`.
const DATE_FORMAT: &str = "%d.%m.%Y";

#[derive(Debug, Clone)]
pub struct CalendarPeriod {
    pub period_type: String,
    pub valid_from: Option<NaiveDate>,
    pub valid_until: Option<NaiveDate>,
    pub analysis_start_day: i64,
    pub analysis_end_day: i64,
    pub time_interval_set: i64,
}

#[derive(Debug, Default)]
pub struct CalendarPeriodTable {
    periods: Vec<CalendarPeriod>,
}

impl CalendarPeriodTable {
    pub(crate) fn parse(raw: &RawSection) -> Result<Self> {
        let columns = Columns::new(raw)?;
        columns.require(&["TYPE"])?;
        let mut periods = Vec::with_capacity(raw.rows.len());
        for row in &raw.rows {
            let f = columns.row(row);
            periods.push(CalendarPeriod {
                period_type: f.require_text("TYPE")?,
                valid_from: parse_date(&f, "VALIDFROM")?,
                valid_until: parse_date(&f, "VALIDUNTIL")?,
                analysis_start_day: f.int("ANALYSISPERIODSTARTDAYINDEX")?,
                analysis_end_day: f.int("ANALYSISPERIODENDDAYINDEX")?,
                time_interval_set: f.int("ANALYSISTIMEINTERVALSETNO")?,
            });
        }
        Ok(CalendarPeriodTable { periods })
    }

    pub fn iter(&self) -> impl Iterator<Item = &CalendarPeriod> {
        self.periods.iter()
    }

    pub fn len(&self) -> usize {
        self.periods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }
}

fn parse_date(f: &Fields<'_>, column: &'static str) -> Result<Option<NaiveDate>> {
    let value = f.raw(column);
    if value.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map(Some)
        .map_err(|_| f.error(format!("{}: invalid date '{}'", column, value)))
}

#[derive(Debug, Clone)]
pub struct ValidDay {
    pub no: i64,
    pub code: String,
    pub name: String,
    pub day_vector: i64,
    pub prfac_hour_cost: f64,
    pub prfac_supply: f64,
}

#[derive(Debug, Default)]
pub struct ValidDayTable {
    days: Vec<ValidDay>,
}

impl ValidDayTable {
    pub(crate) fn parse(raw: &RawSection) -> Result<Self> {
        let columns = Columns::new(raw)?;
        columns.require(&["NO"])?;
        let mut days = Vec::with_capacity(raw.rows.len());
        for row in &raw.rows {
            let f = columns.row(row);
            days.push(ValidDay {
                no: f.require_int("NO")?,
                code: f.text("CODE"),
                name: f.text("NAME"),
                day_vector: f.int("DAYVECTOR")?,
                prfac_hour_cost: f.float("PRFACHOURCOST")?,
                prfac_supply: f.float("PRFACSUPPLY")?,
            });
        }
        Ok(ValidDayTable { days })
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidDay> {
        self.days.iter()
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}
