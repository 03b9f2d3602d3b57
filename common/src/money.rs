//! [`Money`]-related definitions.

use std::{fmt, str::FromStr};

use rust_decimal::{prelude::ToPrimitive as _, Decimal};

/// Amount of money in the marketplace currency.
#[derive(
    Clone, Copy, Debug, Default, Eq, Ord, PartialEq, PartialOrd,
)]
pub struct Money(pub Decimal);

impl Money {
    /// [`Money`] amount of zero.
    pub const ZERO: Self = Self(Decimal::ZERO);
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self(amount) = self;
        if amount.is_integer() {
            write!(f, "{}", amount.to_i128().expect("integer"))
        } else {
            write!(f, "{amount}")
        }
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl FromStr for Money {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s.trim())
            .map(Self)
            .map_err(|_| "invalid `Money` amount")
    }
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use rust_decimal::Decimal;

    use super::Money;

    fn decimal(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn from_str() {
        assert_eq!(
            Money::from_str("123.45").unwrap(),
            Money(decimal("123.45")),
        );
        assert_eq!(Money::from_str("5000").unwrap(), Money(decimal("5000")));
        assert_eq!(Money::from_str(" 5000 ").unwrap(), Money(decimal("5000")));

        assert!(Money::from_str("").is_err());
        assert!(Money::from_str("cheap").is_err());
        assert!(Money::from_str("12,50").is_err());
    }

    #[test]
    fn to_string() {
        assert_eq!(Money(decimal("123.45")).to_string(), "123.45");
        assert_eq!(Money(decimal("123.00")).to_string(), "123");
        assert_eq!(Money(decimal("123.0")).to_string(), "123");
        assert_eq!(Money(decimal("123")).to_string(), "123");
    }

    #[test]
    fn orders_by_amount() {
        assert!(Money(decimal("100")) < Money(decimal("200.50")));
        assert!(Money::ZERO < Money(decimal("0.01")));
    }
}
