//! [`Lot`] definitions.

use common::define_kind;
use derive_more::{Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(doc)]
use crate::domain::Sale;

/// Land lot offered for sale.
#[derive(Clone, Copy, Debug)]
pub struct Lot {
    /// ID of this [`Lot`].
    pub id: Id,

    /// [`Number`] of this [`Lot`] within its section.
    pub number: Number,

    /// [`Status`] of this [`Lot`].
    pub status: Status,

    /// ID of the section this [`Lot`] belongs to.
    pub section_id: SectionId,
}

/// ID of a [`Lot`].
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

/// Number of a [`Lot`] within its section.
pub type Number = u32;

/// ID of the section a [`Lot`] belongs to.
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
pub struct SectionId(Uuid);

define_kind! {
    #[doc = "Status of a [`Lot`]."]
    enum Status {
        #[doc = "The [`Lot`] is open for a new [`Sale`]."]
        Available = 1,

        #[doc = "The [`Lot`] is bound to a [`Sale`] being paid off."]
        InProgress = 2,

        #[doc = "The [`Lot`] has been paid off completely."]
        Sold = 3,
    }
}
