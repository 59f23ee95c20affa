//! [`PaymentEntry`] definitions.

#[cfg(doc)]
use common::Date;
use common::{unit, DateOf, Money};
use derive_more::{Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::installment;
#[cfg(doc)]
use crate::domain::{Installment, Sale};

/// Record of a single payment made towards an [`Installment`].
#[derive(Clone, Debug)]
pub struct PaymentEntry {
    /// ID of this [`PaymentEntry`].
    pub id: Id,

    /// ID of the [`Installment`] this [`PaymentEntry`] was made towards.
    pub installment_id: installment::Id,

    /// Full [`Money`] amount tendered by the client, including any excess
    /// over the [`Installment`] debt.
    pub given: Money,

    /// Total price of the [`Sale`] at the moment this [`PaymentEntry`] was
    /// made.
    pub sale_total: Money,

    /// [`Date`] when this [`PaymentEntry`] was made.
    pub given_at: EntryDate,
}

impl PaymentEntry {
    /// Creates a new [`PaymentEntry`] with a random [`Id`].
    ///
    /// Returns [`None`] if the `given` and `sale_total` amounts are in
    /// different [`Currency`]s.
    ///
    /// [`Currency`]: common::money::Currency
    #[must_use]
    pub fn new(
        installment_id: installment::Id,
        given: Money,
        sale_total: Money,
        given_at: EntryDate,
    ) -> Option<Self> {
        (given.currency == sale_total.currency).then(|| Self {
            id: Id::new(),
            installment_id,
            given,
            sale_total,
            given_at,
        })
    }
}

/// ID of a [`PaymentEntry`].
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

/// [`Date`] when a [`PaymentEntry`] was made.
pub type EntryDate = DateOf<(PaymentEntry, unit::Creation)>;

#[cfg(test)]
mod spec {
    use common::{money::Currency, Money};
    use time::Month;

    use crate::domain::installment;

    use super::{EntryDate, PaymentEntry};

    fn money(s: &str, currency: Currency) -> Money {
        Money {
            amount: s.parse().unwrap(),
            currency,
        }
    }

    fn given_at() -> EntryDate {
        common::Date::from_calendar(2024, Month::March, 15).unwrap().coerce()
    }

    #[test]
    fn records_amounts_in_same_currency() {
        let entry = PaymentEntry::new(
            installment::Id::new(),
            money("800", Currency::Mxn),
            money("12000", Currency::Mxn),
            given_at(),
        )
        .unwrap();

        assert_eq!(entry.given, money("800", Currency::Mxn));
        assert_eq!(entry.sale_total, money("12000", Currency::Mxn));
    }

    #[test]
    fn rejects_currency_mismatch() {
        assert!(PaymentEntry::new(
            installment::Id::new(),
            money("800", Currency::Mxn),
            money("12000", Currency::Usd),
            given_at(),
        )
        .is_none());
    }
}
