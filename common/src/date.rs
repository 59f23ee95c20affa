//! Calendar date utilities.

#[cfg(feature = "postgres")]
use std::error::Error as StdError;
use std::{cmp::Ordering, fmt, marker::PhantomData, ops};

use derive_more::Debug;
#[cfg(feature = "postgres")]
use postgres_types::{
    accepts, private::BytesMut, to_sql_checked, FromSql, IsNull, ToSql, Type,
};
use time::{format_description::well_known::Iso8601, util, Month};

/// Untyped calendar date.
pub type Date = DateOf;

/// Calendar date, without a time-of-day or an offset.
#[derive(Debug)]
pub struct DateOf<Of: ?Sized = ()> {
    /// Inner representation of the date.
    inner: time::Date,

    /// Type parameter describing the kind of date.
    #[debug(skip)]
    _of: PhantomData<Of>,
}

impl<Of: ?Sized> DateOf<Of> {
    /// Creates a new [`Date`] representing the current day in UTC.
    #[must_use]
    pub fn today() -> Self {
        Self {
            inner: time::OffsetDateTime::now_utc().date(),
            _of: PhantomData,
        }
    }

    /// Creates a new [`Date`] from the provided calendar components.
    ///
    /// # Errors
    ///
    /// Returns an error if the components don't form a valid calendar date.
    pub fn from_calendar(
        year: i32,
        month: Month,
        day: u8,
    ) -> Result<Self, time::error::ComponentRange> {
        time::Date::from_calendar_date(year, month, day).map(|inner| Self {
            inner,
            _of: PhantomData,
        })
    }

    /// Creates a new [`Date`] from the provided [ISO 8601] string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a valid [ISO 8601] date.
    ///
    /// [ISO 8601]: https://www.iso.org/iso-8601-date-and-time-format.html
    pub fn from_iso8601(input: &str) -> Result<Self, time::error::Parse> {
        time::Date::parse(input, &Iso8601::DEFAULT).map(|inner| Self {
            inner,
            _of: PhantomData,
        })
    }

    /// Advances this [`Date`] by the provided number of calendar months.
    ///
    /// The day of month is preserved, clamped to the length of the target
    /// month (January 31st advanced by 1 month is February 29th in a leap
    /// year and February 28th otherwise).
    #[expect(clippy::missing_panics_doc, reason = "infallible")]
    #[must_use]
    pub fn plus_months(self, months: u32) -> Self {
        let months0 =
            i64::from(u8::from(self.inner.month())) - 1 + i64::from(months);
        let year = self.inner.year()
            + i32::try_from(months0.div_euclid(12)).expect("infallible");
        let month = Month::try_from(
            u8::try_from(months0.rem_euclid(12) + 1).expect("infallible"),
        )
        .expect("infallible");
        let day = self.inner.day().min(util::days_in_year_month(year, month));
        Self {
            inner: time::Date::from_calendar_date(year, month, day)
                .expect("day is clamped to the month length"),
            _of: PhantomData,
        }
    }

    /// Coerces one kind of [`Date`] into another.
    #[must_use]
    pub fn coerce<NewOf: ?Sized>(self) -> DateOf<NewOf> {
        DateOf {
            inner: self.inner,
            _of: PhantomData,
        }
    }
}

impl<Of: ?Sized> fmt::Display for DateOf<Of> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.inner, f)
    }
}

impl<Of: ?Sized> Copy for DateOf<Of> {}
impl<Of: ?Sized> Clone for DateOf<Of> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<Of: ?Sized> Eq for DateOf<Of> {}
impl<Of: ?Sized> PartialEq for DateOf<Of> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<Of: ?Sized> Ord for DateOf<Of> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.inner.cmp(&other.inner)
    }
}
impl<Of: ?Sized> PartialOrd for DateOf<Of> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<Of: ?Sized> From<time::Date> for DateOf<Of> {
    fn from(date: time::Date) -> Self {
        Self {
            inner: date,
            _of: PhantomData,
        }
    }
}

impl<Of: ?Sized> From<DateOf<Of>> for time::Date {
    fn from(date: DateOf<Of>) -> Self {
        date.inner
    }
}

impl<Of: ?Sized> ops::Sub for DateOf<Of> {
    /// Signed number of whole days between the two [`Date`]s.
    type Output = i64;

    fn sub(self, rhs: Self) -> Self::Output {
        (self.inner - rhs.inner).whole_days()
    }
}

#[cfg(feature = "postgres")]
impl<Of: ?Sized> FromSql<'_> for DateOf<Of> {
    accepts!(DATE);

    fn from_sql(
        ty: &Type,
        raw: &[u8],
    ) -> Result<Self, Box<dyn StdError + Sync + Send>> {
        time::Date::from_sql(ty, raw).map(Into::into)
    }
}

#[cfg(feature = "postgres")]
impl<Of: ?Sized> ToSql for DateOf<Of> {
    accepts!(DATE);
    to_sql_checked!();

    fn to_sql(
        &self,
        ty: &Type,
        w: &mut BytesMut,
    ) -> Result<IsNull, Box<dyn StdError + Sync + Send>> {
        self.inner.to_sql(ty, w)
    }
}

#[cfg(test)]
mod spec {
    use time::Month;

    use super::Date;

    fn date(year: i32, month: Month, day: u8) -> Date {
        Date::from_calendar(year, month, day).unwrap()
    }

    #[test]
    fn advances_by_months_within_year() {
        assert_eq!(
            date(2024, Month::January, 15).plus_months(3),
            date(2024, Month::April, 15),
        );
    }

    #[test]
    fn advances_by_months_across_years() {
        assert_eq!(
            date(2024, Month::November, 10).plus_months(14),
            date(2026, Month::January, 10),
        );
    }

    #[test]
    fn clamps_day_to_target_month_length() {
        assert_eq!(
            date(2024, Month::January, 31).plus_months(1),
            date(2024, Month::February, 29),
        );
        assert_eq!(
            date(2023, Month::January, 31).plus_months(1),
            date(2023, Month::February, 28),
        );
        assert_eq!(
            date(2024, Month::March, 31).plus_months(1),
            date(2024, Month::April, 30),
        );
    }

    #[test]
    fn zero_months_is_identity() {
        assert_eq!(
            date(2024, Month::May, 31).plus_months(0),
            date(2024, Month::May, 31),
        );
    }

    #[test]
    fn subtraction_yields_signed_whole_days() {
        assert_eq!(
            date(2024, Month::March, 5) - date(2024, Month::March, 1),
            4,
        );
        assert_eq!(
            date(2024, Month::March, 1) - date(2024, Month::March, 5),
            -4,
        );
        assert_eq!(
            date(2024, Month::March, 1) - date(2024, Month::February, 28),
            2,
        );
    }

    #[test]
    fn parses_iso8601() {
        assert_eq!(
            Date::from_iso8601("2024-07-01").unwrap(),
            date(2024, Month::July, 1),
        );
        assert!(Date::from_iso8601("not a date").is_err());
    }
}
