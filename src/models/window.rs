use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::PipelineError;

/// Trailing window offered in the dashboard's range selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowChoice {
    LastWeek,
    #[default]
    LastMonth,
    LastSixMonths,
    LastYear,
}

impl WindowChoice {
    pub const ALL: [WindowChoice; 4] = [
        WindowChoice::LastWeek,
        WindowChoice::LastMonth,
        WindowChoice::LastSixMonths,
        WindowChoice::LastYear,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            WindowChoice::LastWeek => "Last week",
            WindowChoice::LastMonth => "Last month",
            WindowChoice::LastSixMonths => "Last six months",
            WindowChoice::LastYear => "Last year",
        }
    }
}

/// Window length in days for each choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowTable {
    pub last_week: i64,
    pub last_month: i64,
    pub last_six_months: i64,
    pub last_year: i64,
}

impl WindowTable {
    pub fn length_days(&self, choice: WindowChoice) -> i64 {
        match choice {
            WindowChoice::LastWeek => self.last_week,
            WindowChoice::LastMonth => self.last_month,
            WindowChoice::LastSixMonths => self.last_six_months,
            WindowChoice::LastYear => self.last_year,
        }
    }

    /// Builds a table from four day counts in selector order.
    pub fn from_days(days: [i64; 4]) -> Result<Self, PipelineError> {
        if let Some(bad) = days.iter().find(|d| **d <= 0) {
            return Err(PipelineError::InvalidWindow(*bad));
        }
        Ok(Self {
            last_week: days[0],
            last_month: days[1],
            last_six_months: days[2],
            last_year: days[3],
        })
    }
}

impl Default for WindowTable {
    fn default() -> Self {
        Self { last_week: 7, last_month: 30, last_six_months: 180, last_year: 365 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowSpec {
    anchor: DateTime<Utc>,
    length_days: i64,
}

impl WindowSpec {
    pub fn new(anchor: DateTime<Utc>, length_days: i64) -> Result<Self, PipelineError> {
        if length_days <= 0 {
            return Err(PipelineError::InvalidWindow(length_days));
        }
        Ok(Self { anchor, length_days })
    }

    pub fn anchor(&self) -> DateTime<Utc> {
        self.anchor
    }

    pub fn length_days(&self) -> i64 {
        self.length_days
    }
}

#[derive(Debug, Serialize)]
pub struct WindowOption {
    pub choice: WindowChoice,
    pub label: &'static str,
    pub days: i64,
}
