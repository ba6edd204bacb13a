//! Date selection model
//!
//! Holds the raw (month, day) values the user has entered and decides
//! whether they form a pair worth fetching a fact for.

use serde::Serialize;
use std::fmt;

/// A calendar month as offered by the picker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthDef {
    pub number: u32,
    pub name: &'static str,
    pub days: u32,
}

/// No year is ever selected, so February is fixed at 28 days.
pub const MONTHS: [MonthDef; 12] = [
    MonthDef { number: 1, name: "January", days: 31 },
    MonthDef { number: 2, name: "February", days: 28 },
    MonthDef { number: 3, name: "March", days: 31 },
    MonthDef { number: 4, name: "April", days: 30 },
    MonthDef { number: 5, name: "May", days: 31 },
    MonthDef { number: 6, name: "June", days: 30 },
    MonthDef { number: 7, name: "July", days: 31 },
    MonthDef { number: 8, name: "August", days: 31 },
    MonthDef { number: 9, name: "September", days: 30 },
    MonthDef { number: 10, name: "October", days: 31 },
    MonthDef { number: 11, name: "November", days: 30 },
    MonthDef { number: 12, name: "December", days: 31 },
];

fn month_def(month: u32) -> Option<&'static MonthDef> {
    MONTHS.iter().find(|m| m.number == month)
}

/// Number of days in `month`, or `None` outside 1-12
pub fn days_in_month(month: u32) -> Option<u32> {
    month_def(month).map(|m| m.days)
}

/// English name of `month`, or `None` outside 1-12
pub fn month_name(month: u32) -> Option<&'static str> {
    month_def(month).map(|m| m.name)
}

/// Strip everything that is not an ASCII digit (`"3a4"` -> `"34"`)
pub fn digits_only(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// A value handed to one of the setters
///
/// `Number` comes from the dropdown picker, `Text` from a free-text field
/// and is digit-filtered before it is interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldInput {
    Number(u32),
    Text(String),
}

impl FieldInput {
    /// Interpreted numeric value; `None` when the text holds no digits
    pub fn value(&self) -> Option<u32> {
        match self {
            FieldInput::Number(n) => Some(*n),
            FieldInput::Text(raw) => {
                let digits = digits_only(raw);
                if digits.is_empty() {
                    return None;
                }
                // A run of digits too long for u32 is still "a number", just
                // never a valid one.
                Some(digits.parse().unwrap_or(u32::MAX))
            }
        }
    }
}

impl From<u32> for FieldInput {
    fn from(n: u32) -> Self {
        FieldInput::Number(n)
    }
}

impl From<&str> for FieldInput {
    fn from(raw: &str) -> Self {
        FieldInput::Text(raw.to_string())
    }
}

impl From<String> for FieldInput {
    fn from(raw: String) -> Self {
        FieldInput::Text(raw)
    }
}

/// A validated (month, day) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DatePair {
    pub month: u32,
    pub day: u32,
}

impl DatePair {
    /// Build a pair only if both values are within their domains
    pub fn new(month: u32, day: u32) -> Option<Self> {
        let days = days_in_month(month)?;
        (1..=days).contains(&day).then_some(Self { month, day })
    }
}

impl fmt::Display for DatePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.month, self.day)
    }
}

/// The user's current, possibly incomplete, choice
///
/// Values are stored as entered so free-text fields can hold out-of-range
/// numbers; only [`Selection::valid_pair`] decides whether they are usable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Selection {
    pub month: Option<u32>,
    pub day: Option<u32>,
}

impl Selection {
    /// Replace the month; any previously chosen day is dropped
    pub fn set_month(&mut self, month: Option<u32>) {
        self.month = month;
        self.day = None;
    }

    pub fn set_day(&mut self, day: Option<u32>) {
        self.day = day;
    }

    pub fn has_month(&self) -> bool {
        self.month.is_some()
    }

    /// Days the picker should offer for the current month (empty if none)
    pub fn day_choices(&self) -> std::ops::RangeInclusive<u32> {
        let days = self.month.and_then(days_in_month).unwrap_or(0);
        1..=days
    }

    pub fn valid_pair(&self) -> Option<DatePair> {
        DatePair::new(self.month?, self.day?)
    }
}
