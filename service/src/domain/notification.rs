//! [`Notification`] definitions.

#[cfg(doc)]
use common::Date;
use common::{unit, DateOf};
use derive_more::{AsRef, Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::installment;
#[cfg(doc)]
use crate::domain::Installment;

/// Notification about an upcoming or missed [`Installment`] payment.
#[derive(Clone, Debug)]
pub struct Notification {
    /// ID of this [`Notification`].
    pub id: Id,

    /// ID of the [`Installment`] this [`Notification`] is about.
    ///
    /// At most one [`Notification`] exists per [`Installment`].
    pub installment_id: installment::Id,

    /// [`Title`] of this [`Notification`].
    pub title: Title,

    /// [`Description`] of this [`Notification`].
    pub description: Description,

    /// [`Date`] this [`Notification`] was created or last refreshed on.
    pub event_at: EventDate,

    /// Indicator whether this [`Notification`] has been read.
    pub is_read: bool,
}

/// ID of a [`Notification`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    PartialEq,
    Serialize,
)]
#[cfg_attr(feature = "postgres", derive(ToSql, FromSql), postgres(transparent))]
pub struct Id(Uuid);

impl Id {
    /// Creates a new random [`Id`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Title of a [`Notification`].
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Title(String);

impl Title {
    /// [`Title`] of payment due [`Notification`]s.
    #[must_use]
    pub fn payment_due() -> Self {
        Self("Fecha de pago".into())
    }

    /// Creates a new [`Title`] if the given `title` is valid.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Option<Self> {
        let title = title.into();
        Self::check(&title).then_some(Self(title))
    }

    /// Checks whether the given `title` is a valid [`Title`].
    fn check(title: impl AsRef<str>) -> bool {
        let title = title.as_ref();
        title.trim() == title && !title.is_empty() && title.len() <= 60
    }
}

impl FromStr for Title {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Title`")
    }
}

/// Description of a [`Notification`].
#[derive(AsRef, Clone, Debug, Display, Eq, From, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
#[from(&str, String)]
pub struct Description(String);

/// [`Date`] a [`Notification`] was created or last refreshed on.
pub type EventDate = DateOf<(Notification, unit::Creation)>;
