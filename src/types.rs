//! Core types: Cents, Category

use std::fmt;
use std::iter::Sum;
use std::ops::Add;

/// Monetary amount in minor currency units (e.g., centavos, cents).
///
/// `Cents(123456)` represents 1234.56 in major units. Holdings and contributions
/// are never negative, so the inner value is unsigned. Integer storage keeps
/// sums exact; only ratios and percentages are computed in `f64`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cents(pub u64);

impl Cents {
    pub const ZERO: Cents = Cents(0);
    pub const MAX: Cents = Cents(u64::MAX);

    /// Amount as `f64` minor units, for ratio arithmetic.
    #[inline]
    pub fn as_f64(self) -> f64 {
        self.0 as f64
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Addition that pins at [`Cents::MAX`] instead of wrapping.
    #[inline]
    pub fn saturating_add(self, rhs: Cents) -> Cents {
        Cents(self.0.saturating_add(rhs.0))
    }
}

impl Add for Cents {
    type Output = Cents;

    #[inline]
    fn add(self, rhs: Cents) -> Cents {
        self.saturating_add(rhs)
    }
}

impl Sum for Cents {
    fn sum<I: Iterator<Item = Cents>>(iter: I) -> Cents {
        iter.fold(Cents::ZERO, Cents::saturating_add)
    }
}

impl<'a> Sum<&'a Cents> for Cents {
    fn sum<I: Iterator<Item = &'a Cents>>(iter: I) -> Cents {
        iter.copied().sum()
    }
}

impl From<u64> for Cents {
    fn from(value: u64) -> Self {
        Cents(value)
    }
}

impl fmt::Display for Cents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Plain major.minor; locale-aware rendering lives in `format`
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

/// Name of an asset class bucket (e.g., "Renda Fixa").
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Category(String);

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Category {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Category {
    fn from(name: String) -> Self {
        Self(name)
    }
}
