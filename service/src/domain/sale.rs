//! [`Sale`] definitions.

use std::num::NonZeroU16;

use common::{define_kind, unit, DateOf, Money};
#[cfg(doc)]
use common::Date;
use derive_more::{Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{client, lot, vendor};
#[cfg(doc)]
use crate::domain::{Client, Installment, Lot, Vendor};

/// Sale of a [`Lot`] to a [`Client`].
#[derive(Clone, Debug)]
pub struct Sale {
    /// ID of this [`Sale`].
    pub id: Id,

    /// ID of the [`Lot`] being sold.
    pub lot_id: lot::Id,

    /// ID of the [`Vendor`] who closed this [`Sale`].
    pub vendor_id: vendor::Id,

    /// [`Curp`] of the [`Client`] buying the [`Lot`].
    ///
    /// [`Curp`]: client::Curp
    pub client_curp: client::Curp,

    /// [`PaymentKind`] of this [`Sale`].
    pub payment_kind: PaymentKind,

    /// Total price of the [`Lot`] being sold.
    pub price: Money,

    /// Number of [`Installment`]s this [`Sale`] is paid off in.
    pub installment_count: InstallmentCount,

    /// [`Status`] of this [`Sale`].
    pub status: Status,

    /// [`Date`] when this [`Sale`] was concluded.
    pub sold_at: ConclusionDate,
}

/// ID of a [`Sale`].
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

define_kind! {
    #[doc = "Kind of payment a [`Sale`] is made with."]
    enum PaymentKind {
        #[doc = "The whole price is paid at once."]
        Cash = 1,

        #[doc = "The price is paid off in monthly [`Installment`]s."]
        Installments = 2,
    }
}

define_kind! {
    #[doc = "Status of a [`Sale`]."]
    enum Status {
        #[doc = "The [`Sale`] is being paid off."]
        InProgress = 1,

        #[doc = "The [`Sale`] has been paid off completely."]
        Completed = 2,

        #[doc = "The [`Sale`] has been called off."]
        Cancelled = 3,
    }
}

impl Status {
    /// Returns the [`Lot`] [`Status`] implied by this [`Sale`] [`Status`].
    ///
    /// [`Status`]: lot::Status
    #[must_use]
    pub fn lot_status(self) -> lot::Status {
        match self {
            Self::InProgress => lot::Status::InProgress,
            Self::Completed => lot::Status::Sold,
            Self::Cancelled => lot::Status::Available,
        }
    }
}

/// Number of [`Installment`]s a [`Sale`] is paid off in.
///
/// A [`Sale`] paid in cash counts as a single [`Installment`].
#[derive(Clone, Copy, Debug, Display, Eq, From, Hash, Into, PartialEq)]
pub struct InstallmentCount(NonZeroU16);

impl InstallmentCount {
    /// Creates a new [`InstallmentCount`] if the given `count` is positive.
    #[must_use]
    pub fn new(count: u16) -> Option<Self> {
        NonZeroU16::new(count).map(Self)
    }

    /// Returns this [`InstallmentCount`] as a [`u16`].
    #[must_use]
    pub fn get(self) -> u16 {
        self.0.get()
    }

    /// Returns this [`InstallmentCount`] as a [`NonZeroU16`].
    #[must_use]
    pub fn nonzero(self) -> NonZeroU16 {
        self.0
    }
}

/// [`Date`] when a [`Sale`] was concluded.
pub type ConclusionDate = DateOf<(Sale, unit::Creation)>;

#[cfg(test)]
mod spec {
    use crate::domain::lot;

    use super::Status;

    #[test]
    fn status_maps_onto_lot_status() {
        assert_eq!(Status::InProgress.lot_status(), lot::Status::InProgress);
        assert_eq!(Status::Completed.lot_status(), lot::Status::Sold);
        assert_eq!(Status::Cancelled.lot_status(), lot::Status::Available);
    }
}
