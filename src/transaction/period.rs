//! Trailing time windows for the transaction listing endpoint.

use time::{Date, Duration};

/// A trailing window measured back from "now", selected by the `period`
/// query parameter.
///
/// Unrecognized or absent values fall back to [Period::All] rather than
/// being rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    /// The last 30 days.
    OneMonth,
    /// The last 90 days.
    ThreeMonths,
    /// The last 180 days.
    SixMonths,
    /// The last 365 days.
    OneYear,
    /// The last 3 * 365 days.
    ThreeYears,
    /// The last 5 * 365 days.
    FiveYears,
    /// No window; every transaction matches.
    All,
}

impl Period {
    /// Parse a `period` query parameter value.
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("1Mo") => Self::OneMonth,
            Some("3Mo") => Self::ThreeMonths,
            Some("6Mo") => Self::SixMonths,
            Some("1Yr") => Self::OneYear,
            Some("3Yr") => Self::ThreeYears,
            Some("5Yr") => Self::FiveYears,
            _ => Self::All,
        }
    }

    /// The first date inside the window ending at `today`, or `None` for
    /// [Period::All].
    ///
    /// Windows are day-based approximations of calendar months and years
    /// (30 days per month, 365 days per year).
    pub fn start_date(self, today: Date) -> Option<Date> {
        let days = match self {
            Self::OneMonth => 30,
            Self::ThreeMonths => 90,
            Self::SixMonths => 180,
            Self::OneYear => 365,
            Self::ThreeYears => 365 * 3,
            Self::FiveYears => 365 * 5,
            Self::All => return None,
        };

        Some(today - Duration::days(days))
    }
}
