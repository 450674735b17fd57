//! Congress numbering.
//!
//! The First Congress convened on March 4, 1789, and each Congress lasts two
//! years. Starting with the 74th Congress (1935) the Twentieth Amendment moved
//! the convening date to January 3.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::CalendarError;

/// Year the First Congress convened.
pub const FIRST_CONGRESS_YEAR: i32 = 1789;

/// First year in which a Congress convened on January 3.
const JANUARY_CONVENING_YEAR: i32 = 1935;

/// Upper bound on accepted Congress numbers; keeps every derived year well
/// inside chrono's supported range.
const MAX_CONGRESS: u32 = 1000;

/// A validated Congress number (1 = First Congress).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Congress(u32);

impl Congress {
    /// Wrap a Congress number.
    ///
    /// # Errors
    /// Returns [`CalendarError::InvalidCongress`] for 0 or absurdly large numbers.
    pub const fn new(number: u32) -> Result<Self, CalendarError> {
        if number == 0 || number > MAX_CONGRESS {
            return Err(CalendarError::InvalidCongress(number));
        }
        Ok(Self(number))
    }

    #[must_use]
    pub const fn number(self) -> u32 {
        self.0
    }

    /// The Congress in session on `date`.
    ///
    /// A date on the convening day belongs to the new Congress.
    ///
    /// # Errors
    /// Returns [`CalendarError::BeforeFirstCongress`] for dates before March 4, 1789.
    pub fn containing(date: NaiveDate) -> Result<Self, CalendarError> {
        let mut year = date.year();
        if year % 2 != 0 && date < convening_date(year) {
            year -= 1;
        }
        if year < FIRST_CONGRESS_YEAR {
            return Err(CalendarError::BeforeFirstCongress(date));
        }
        let number = u32::try_from((year - FIRST_CONGRESS_YEAR) / 2 + 1)
            .map_err(|_| CalendarError::BeforeFirstCongress(date))?;
        Self::new(number).map_err(|_| CalendarError::BeforeFirstCongress(date))
    }

    /// Year this Congress convened.
    #[must_use]
    pub fn start_year(self) -> i32 {
        // MAX_CONGRESS keeps this far below i32::MAX.
        FIRST_CONGRESS_YEAR + 2 * i32::try_from(self.0 - 1).unwrap_or(0)
    }

    /// Date this Congress convened.
    #[must_use]
    pub fn start(self) -> NaiveDate {
        convening_date(self.start_year())
    }

    /// Date this Congress ended, which is the day the next one convened.
    #[must_use]
    pub fn end(self) -> NaiveDate {
        self.next().start()
    }

    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }

    /// The Senate class whose regular six-year terms begin with this Congress.
    #[must_use]
    pub const fn opens_senate_class(self) -> SenateClass {
        match self.0 % 3 {
            2 => SenateClass::One,
            0 => SenateClass::Two,
            _ => SenateClass::Three,
        }
    }
}

impl fmt::Display for Congress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// First and last Congress covered by a term running from `start` up to `end`.
///
/// Terms conventionally end on the day the next Congress convenes, so the
/// last Congress is the one in session the day before `end`.
///
/// # Errors
/// Returns [`CalendarError::BeforeFirstCongress`] if either bound predates 1789.
pub fn congress_span(start: NaiveDate, end: NaiveDate) -> Result<(Congress, Congress), CalendarError> {
    let first = Congress::containing(start)?;
    let last_day = if end > start {
        end.pred_opt().unwrap_or(end)
    } else {
        start
    };
    let last = Congress::containing(last_day)?;
    Ok((first, last))
}

fn convening_date(year: i32) -> NaiveDate {
    let (month, day) = if year >= JANUARY_CONVENING_YEAR {
        (1, 3)
    } else {
        (3, 4)
    };
    // Only ever called with years inside chrono's range.
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN)
}

/// One of the three staggered Senate election cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum SenateClass {
    One,
    Two,
    Three,
}

impl SenateClass {
    pub const ALL: [Self; 3] = [Self::One, Self::Two, Self::Three];

    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::One => 1,
            Self::Two => 2,
            Self::Three => 3,
        }
    }

    /// Whether a regular term of this class begins with `congress`.
    #[must_use]
    pub fn begins_term_in(self, congress: Congress) -> bool {
        congress.opens_senate_class() == self
    }
}

impl TryFrom<u8> for SenateClass {
    type Error = CalendarError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::One),
            2 => Ok(Self::Two),
            3 => Ok(Self::Three),
            other => Err(CalendarError::InvalidSenateClass(other)),
        }
    }
}

impl From<SenateClass> for u8 {
    fn from(class: SenateClass) -> Self {
        class.number()
    }
}

impl fmt::Display for SenateClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn any_date() -> impl Strategy<Value = NaiveDate> {
        (1790i32..2200, 1u32..=12, 1u32..=28)
            .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    proptest! {
        /// Later dates never map to an earlier Congress
        #[test]
        fn containing_is_monotonic(a in any_date(), b in any_date()) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            let c_lo = Congress::containing(lo).unwrap();
            let c_hi = Congress::containing(hi).unwrap();
            prop_assert!(c_lo <= c_hi);
        }

        /// Every date lies inside the start/end window of its Congress
        #[test]
        fn date_within_its_congress(d in any_date()) {
            let c = Congress::containing(d).unwrap();
            prop_assert!(c.start() <= d);
            prop_assert!(d < c.end());
        }

        /// Exactly one class opens with each Congress, cycling every three
        #[test]
        fn class_cycle_period_three(n in 1u32..900) {
            let c = Congress::new(n).unwrap();
            let later = Congress::new(n + 3).unwrap();
            prop_assert_eq!(c.opens_senate_class(), later.opens_senate_class());
        }
    }
}
