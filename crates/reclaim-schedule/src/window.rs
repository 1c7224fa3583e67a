use crate::error::{Result, ScheduleError};
use chrono::{DateTime, Datelike, NaiveTime, TimeZone, Weekday};
use reclaim_config::ScheduleConfig;
use std::fmt;

/// A weekly cleanup window: a set of weekdays and a daily `[start, end)`
/// span in local time. When `end` is before `start` the span crosses
/// midnight and belongs to the weekday it starts on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeWindow {
    days: Vec<Weekday>,
    start: NaiveTime,
    end: NaiveTime,
}

impl TimeWindow {
    pub fn new<S: AsRef<str>>(days: &[S], start: &str, end: &str) -> Result<Self> {
        let mut weekdays = Vec::new();
        for day in days {
            let weekday = parse_weekday(day.as_ref())?;
            if !weekdays.contains(&weekday) {
                weekdays.push(weekday);
            }
        }
        if weekdays.is_empty() {
            return Err(ScheduleError::EmptyWeekdays);
        }

        let start = parse_time_of_day(start)?;
        let end = parse_time_of_day(end)?;
        if start == end {
            return Err(ScheduleError::EmptyWindow(start.format("%H:%M").to_string()));
        }

        Ok(Self {
            days: weekdays,
            start,
            end,
        })
    }

    pub fn from_config(config: &ScheduleConfig) -> Result<Self> {
        Self::new(&config.days, &config.start, &config.end)
    }

    pub fn contains<Tz: TimeZone>(&self, at: &DateTime<Tz>) -> bool {
        let local = at.naive_local();
        let day = local.weekday();
        let time = local.time();

        if self.start < self.end {
            self.days.contains(&day) && time >= self.start && time < self.end
        } else {
            (self.days.contains(&day) && time >= self.start)
                || (self.days.contains(&day.pred()) && time < self.end)
        }
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let days: Vec<&str> = self.days.iter().map(|day| weekday_code(*day)).collect();
        write!(
            f,
            "{} {}-{}",
            days.join(","),
            self.start.format("%H:%M"),
            self.end.format("%H:%M")
        )
    }
}

pub fn parse_weekday(value: &str) -> Result<Weekday> {
    let value = value.trim();
    let weekday = match value.to_ascii_lowercase().as_str() {
        "mo" => Weekday::Mon,
        "tu" => Weekday::Tue,
        "we" => Weekday::Wed,
        "th" => Weekday::Thu,
        "fr" => Weekday::Fri,
        "sa" => Weekday::Sat,
        "su" => Weekday::Sun,
        other => other
            .parse()
            .map_err(|_| ScheduleError::InvalidWeekday(value.to_string()))?,
    };
    Ok(weekday)
}

fn parse_time_of_day(value: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M").map_err(|source| {
        ScheduleError::InvalidTimeOfDay {
            value: value.to_string(),
            source,
        }
    })
}

fn weekday_code(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "mo",
        Weekday::Tue => "tu",
        Weekday::Wed => "we",
        Weekday::Thu => "th",
        Weekday::Fri => "fr",
        Weekday::Sat => "sa",
        Weekday::Sun => "su",
    }
}
