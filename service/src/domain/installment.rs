//! [`Installment`] definitions.

#[cfg(doc)]
use common::Date;
use common::{DateOf, Money};
use derive_more::{Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::sale;
#[cfg(doc)]
use crate::domain::{PaymentEntry, Sale};

/// Single monthly payment a [`Sale`] is paid off with.
#[derive(Clone, Debug)]
pub struct Installment {
    /// ID of this [`Installment`].
    pub id: Id,

    /// ID of the [`Sale`] this [`Installment`] belongs to.
    pub sale_id: sale::Id,

    /// 1-based [`Number`] of this [`Installment`] within its [`Sale`].
    pub number: Number,

    /// [`Money`] amount expected to be paid by this [`Installment`].
    pub expected: Money,

    /// [`Date`] this [`Installment`] is due on.
    pub expected_at: DueDate,

    /// [`Money`] amount still to be paid.
    pub remaining: Money,

    /// Indicator whether this [`Installment`] has been paid off completely.
    pub is_fulfilled: bool,
}

impl Installment {
    /// Builds the schedule of [`Installment`]s paying off the provided
    /// [`Sale`].
    ///
    /// Every [`Installment`] expects an equal share of the [`Sale`] price,
    /// rounded to one decimal place, and is due one month after the previous
    /// one, starting from the [`Sale`] conclusion [`Date`].
    ///
    /// Returns an empty [`Vec`] for a [`Sale`] paid in cash.
    #[must_use]
    pub fn plan(sale: &sale::Sale) -> Vec<Self> {
        if sale.payment_kind != sale::PaymentKind::Installments {
            return Vec::new();
        }

        let expected = sale.price.split(sale.installment_count.nonzero());

        (1..=sale.installment_count.get())
            .map(|number| Self {
                id: Id::new(),
                sale_id: sale.id,
                number,
                expected,
                expected_at: sale.sold_at.coerce().plus_months(number.into()),
                remaining: expected,
                is_fulfilled: false,
            })
            .collect()
    }

    /// Applies the `given` [`Money`] to this [`Installment`].
    ///
    /// Only the part covering the [`remaining`] debt is absorbed, and any
    /// excess over it is discarded. Once the debt reaches zero, this
    /// [`Installment`] is marked as fulfilled.
    ///
    /// Returns the absorbed amount, or [`None`] if the `given` currency
    /// differs from the [`remaining`] one.
    ///
    /// [`remaining`]: Installment::remaining
    pub fn apply(&mut self, given: Money) -> Option<Money> {
        if given.currency != self.remaining.currency {
            return None;
        }

        let absorbed = given.amount.min(self.remaining.amount);
        self.remaining.amount -= absorbed;
        if self.remaining.is_zero() {
            self.is_fulfilled = true;
        }

        Some(Money {
            amount: absorbed,
            currency: self.remaining.currency,
        })
    }
}

/// ID of an [`Installment`].
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

/// 1-based number of an [`Installment`] within its [`Sale`].
pub type Number = u16;

/// [`Date`] an [`Installment`] is due on.
pub type DueDate = DateOf<Installment>;

#[cfg(test)]
mod spec {
    use common::{money::Currency, Money};
    use rust_decimal::Decimal;
    use time::Month;

    use crate::domain::{client, lot, sale, vendor};

    use super::{DueDate, Installment};

    fn mxn(s: &str) -> Money {
        Money {
            amount: s.parse().unwrap(),
            currency: Currency::Mxn,
        }
    }

    fn due(year: i32, month: Month, day: u8) -> DueDate {
        common::Date::from_calendar(year, month, day).unwrap().coerce()
    }

    fn sale(
        payment_kind: sale::PaymentKind,
        price: Money,
        installment_count: u16,
        sold_at: common::Date,
    ) -> sale::Sale {
        sale::Sale {
            id: sale::Id::new(),
            lot_id: lot::Id::new(),
            vendor_id: vendor::Id::new(),
            client_curp: client::Curp::new("GOMC950113HDFRRL09").unwrap(),
            payment_kind,
            price,
            installment_count: sale::InstallmentCount::new(installment_count)
                .unwrap(),
            status: sale::Status::InProgress,
            sold_at: sold_at.coerce(),
        }
    }

    fn installment(expected: Money) -> Installment {
        Installment {
            id: super::Id::new(),
            sale_id: sale::Id::new(),
            number: 1,
            expected,
            expected_at: due(2024, Month::February, 15),
            remaining: expected,
            is_fulfilled: false,
        }
    }

    #[test]
    fn plans_equal_monthly_installments() {
        let sale = sale(
            sale::PaymentKind::Installments,
            mxn("12000"),
            12,
            common::Date::from_calendar(2024, Month::March, 15).unwrap(),
        );

        let plan = Installment::plan(&sale);

        assert_eq!(plan.len(), 12);
        for (i, installment) in plan.iter().enumerate() {
            let number = u16::try_from(i + 1).unwrap();

            assert_eq!(installment.sale_id, sale.id);
            assert_eq!(installment.number, number);
            assert_eq!(installment.expected, mxn("1000.0"));
            assert_eq!(installment.remaining, mxn("1000.0"));
            assert!(!installment.is_fulfilled);
        }
        assert_eq!(plan[0].expected_at, due(2024, Month::April, 15));
        assert_eq!(plan[9].expected_at, due(2025, Month::January, 15));
        assert_eq!(plan[11].expected_at, due(2025, Month::March, 15));
    }

    #[test]
    fn plan_clamps_due_days_to_month_length() {
        let sale = sale(
            sale::PaymentKind::Installments,
            mxn("3000"),
            3,
            common::Date::from_calendar(2024, Month::January, 31).unwrap(),
        );

        let plan = Installment::plan(&sale);

        assert_eq!(plan[0].expected_at, due(2024, Month::February, 29));
        assert_eq!(plan[1].expected_at, due(2024, Month::March, 31));
        assert_eq!(plan[2].expected_at, due(2024, Month::April, 30));
    }

    #[test]
    fn plan_rounds_shares_to_one_decimal() {
        let sale = sale(
            sale::PaymentKind::Installments,
            mxn("1000"),
            3,
            common::Date::from_calendar(2024, Month::June, 1).unwrap(),
        );

        for installment in Installment::plan(&sale) {
            assert_eq!(installment.expected, mxn("333.3"));
        }
    }

    #[test]
    fn plan_is_empty_for_cash_sales() {
        let sale = sale(
            sale::PaymentKind::Cash,
            mxn("12000"),
            1,
            common::Date::from_calendar(2024, Month::March, 15).unwrap(),
        );

        assert!(Installment::plan(&sale).is_empty());
    }

    #[test]
    fn applies_partial_payment() {
        let mut installment = installment(mxn("500"));

        assert_eq!(installment.apply(mxn("200")), Some(mxn("200")));
        assert_eq!(installment.remaining, mxn("300"));
        assert!(!installment.is_fulfilled);
    }

    #[test]
    fn applies_exact_payment() {
        let mut installment = installment(mxn("500"));

        assert_eq!(installment.apply(mxn("500")), Some(mxn("500")));
        assert_eq!(installment.remaining, mxn("0"));
        assert!(installment.is_fulfilled);
    }

    #[test]
    fn discards_excess_over_remaining_debt() {
        let mut installment = installment(mxn("500"));

        assert_eq!(installment.apply(mxn("200")), Some(mxn("200")));
        assert_eq!(installment.apply(mxn("700")), Some(mxn("300")));
        assert_eq!(installment.remaining, mxn("0"));
        assert!(installment.is_fulfilled);
    }

    #[test]
    fn absorbs_nothing_once_fulfilled() {
        let mut installment = installment(mxn("500"));

        assert_eq!(installment.apply(mxn("700")), Some(mxn("500")));
        assert_eq!(installment.apply(mxn("100")), Some(mxn("0")));
        assert_eq!(installment.remaining, mxn("0"));
        assert!(installment.is_fulfilled);
    }

    #[test]
    fn rejects_currency_mismatch() {
        let mut installment = installment(mxn("500"));

        let given = Money {
            amount: Decimal::from(200),
            currency: Currency::Usd,
        };
        assert_eq!(installment.apply(given), None);
        assert_eq!(installment.remaining, mxn("500"));
    }
}
