//! [`Money`]-related definitions.

use std::{fmt, num::NonZeroU16, str::FromStr};

use rust_decimal::{prelude::ToPrimitive as _, Decimal};

use crate::define_kind;

/// Amount of money in some [`Currency`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Money {
    /// Amount of this [`Money`].
    pub amount: Decimal,

    /// [`Currency`] of this amount.
    pub currency: Currency,
}

impl Money {
    /// Indicates whether this [`Money`] amount is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// Splits this [`Money`] into the provided number of equal parts, rounded
    /// to one decimal place (banker's rounding).
    ///
    /// The rounding remainder is not redistributed, so the parts summed up may
    /// differ slightly from the original amount.
    #[must_use]
    pub fn split(self, parts: NonZeroU16) -> Self {
        Self {
            amount: (self.amount / Decimal::from(parts.get())).round_dp(1),
            currency: self.currency,
        }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { amount, currency } = self;
        if amount.is_integer() {
            write!(f, "{}{currency}", amount.to_i128().expect("integer"))
        } else {
            write!(f, "{amount}{currency}")
        }
    }
}

impl FromStr for Money {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() < 4 {
            return Err("too short");
        }

        let (amount, currency) = s.split_at(s.len() - 3);
        let amount = Decimal::from_str(amount).map_err(|_| "invalid amount")?;
        let currency =
            Currency::from_str(currency).map_err(|_| "invalid currency")?;

        Ok(Self { amount, currency })
    }
}

define_kind! {
    #[doc = "Currency of a [`Money`] amount."]
    enum Currency {
        #[doc = "Mexican Peso."]
        Mxn = 1,

        #[doc = "US Dollar."]
        Usd = 2,
    }
}

#[cfg(test)]
mod spec {
    use std::{num::NonZeroU16, str::FromStr as _};

    use rust_decimal::Decimal;

    use super::{Currency, Money};

    fn decimal(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn mxn(s: &str) -> Money {
        Money {
            amount: decimal(s),
            currency: Currency::Mxn,
        }
    }

    #[test]
    fn from_str() {
        assert_eq!(
            Money::from_str("123.45MXN").unwrap(),
            Money {
                amount: decimal("123.45"),
                currency: Currency::Mxn,
            },
        );

        assert_eq!(
            Money::from_str("123.45USD").unwrap(),
            Money {
                amount: decimal("123.45"),
                currency: Currency::Usd,
            },
        );

        assert!(Money::from_str("123.45").is_err());
        assert!(Money::from_str("123.45Mx").is_err());
        assert!(Money::from_str("123.45Mxpeso").is_err());

        assert!(Money::from_str("123.00MXN").is_ok());
        assert!(Money::from_str("123.0MXN").is_ok());
        assert!(Money::from_str("123MXN").is_ok());
    }

    #[test]
    fn to_string() {
        assert_eq!(mxn("123.45").to_string(), "123.45MXN");

        assert_eq!(
            Money {
                amount: decimal("123.45"),
                currency: Currency::Usd,
            }
            .to_string(),
            "123.45USD",
        );

        assert_eq!(mxn("123.00").to_string(), "123MXN");
        assert_eq!(mxn("123.0").to_string(), "123MXN");
        assert_eq!(mxn("123").to_string(), "123MXN");
    }

    #[test]
    fn splits_evenly() {
        let parts = NonZeroU16::new(12).unwrap();

        assert_eq!(mxn("12000").split(parts), mxn("1000.0"));
    }

    #[test]
    fn splits_with_rounding_to_one_decimal() {
        assert_eq!(mxn("1000").split(NonZeroU16::new(3).unwrap()), mxn("333.3"));
        assert_eq!(mxn("100").split(NonZeroU16::new(8).unwrap()), mxn("12.5"));
        assert_eq!(mxn("0.25").split(NonZeroU16::new(2).unwrap()), mxn("0.1"));
    }
}
