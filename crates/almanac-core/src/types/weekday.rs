//! Day of the week, numbered from Sunday.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Day of the week.
///
/// The discriminant is the wire value: 0 = Sunday through 6 = Saturday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Weekday {
    /// Sunday (0).
    Sunday = 0,
    /// Monday (1).
    Monday = 1,
    /// Tuesday (2).
    Tuesday = 2,
    /// Wednesday (3).
    Wednesday = 3,
    /// Thursday (4).
    Thursday = 4,
    /// Friday (5).
    Friday = 5,
    /// Saturday (6).
    Saturday = 6,
}

impl Weekday {
    /// All weekdays in wire order.
    pub const ALL: [Weekday; 7] = [
        Weekday::Sunday,
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
    ];

    /// Returns the weekday for a wire index, or `None` outside 0..=6.
    #[must_use]
    pub fn from_index(index: i64) -> Option<Self> {
        usize::try_from(index)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
    }

    /// Returns the wire index (0 = Sunday).
    #[must_use]
    pub fn index(self) -> u8 {
        self as u8
    }

    /// Saturday or Sunday.
    #[must_use]
    pub fn is_weekend(self) -> bool {
        matches!(self, Weekday::Saturday | Weekday::Sunday)
    }

    /// Monday through Friday.
    #[must_use]
    pub fn is_weekday(self) -> bool {
        !self.is_weekend()
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(weekday: chrono::Weekday) -> Self {
        Self::ALL[weekday.num_days_from_sunday() as usize]
    }
}

impl From<Weekday> for chrono::Weekday {
    fn from(weekday: Weekday) -> Self {
        match weekday {
            Weekday::Sunday => chrono::Weekday::Sun,
            Weekday::Monday => chrono::Weekday::Mon,
            Weekday::Tuesday => chrono::Weekday::Tue,
            Weekday::Wednesday => chrono::Weekday::Wed,
            Weekday::Thursday => chrono::Weekday::Thu,
            Weekday::Friday => chrono::Weekday::Fri,
            Weekday::Saturday => chrono::Weekday::Sat,
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Weekday::Sunday => "Sunday",
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
        };
        write!(f, "{name}")
    }
}
