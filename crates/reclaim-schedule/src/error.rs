use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error("invalid weekday {0:?}, expected one of mo, tu, we, th, fr, sa, su")]
    InvalidWeekday(String),

    #[error("invalid time of day {value:?}, expected HH:MM: {source}")]
    InvalidTimeOfDay {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("cleanup window needs at least one weekday")]
    EmptyWeekdays,

    #[error("cleanup window starts and ends at {0}")]
    EmptyWindow(String),

    #[error("tick period must be greater than zero")]
    ZeroPeriod,
}

pub type Result<T> = std::result::Result<T, ScheduleError>;
