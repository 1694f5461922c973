//! Displayed amounts
//!
//! Rounding here is only for display. Computation always keeps the unrounded
//! `f64`.

use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

/// Rounds `value` to `decimals` decimal places
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let p = 10f64.powi(decimals as i32);
    let rounded = (value * p).round() / p;
    // avoid displaying "-0"
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// An amount rounded for display
///
/// The [`Display`] implementation drops the fractional part when it is zero,
/// so `3.0` shows as `3` and `4.8` as `4.8`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DisplayAmount(f64);

impl DisplayAmount {
    /// Rounds `amount` to `decimals` places. Non finite amounts become `0`.
    pub fn new(amount: f64, decimals: u32) -> Self {
        if amount.is_finite() {
            Self(round_to(amount, decimals))
        } else {
            Self(0.0)
        }
    }

    /// The rounded value
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Check if the rounded value has no fractional part
    pub fn is_integer(&self) -> bool {
        self.0.fract() == 0.0
    }
}

impl Display for DisplayAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_integer() {
            write!(f, "{:.0}", self.0)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

/// A displayed amount with its unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quantity {
    pub amount: DisplayAmount,
    pub unit: String,
}

impl Quantity {
    pub fn new(amount: DisplayAmount, unit: impl Into<String>) -> Self {
        Self {
            amount,
            unit: unit.into(),
        }
    }
}

impl Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // units are written right after the number: "2큰술", "200g"
        write!(f, "{}{}", self.amount, self.unit)
    }
}

/// What an ingredient amount field shows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum AmountDisplay {
    /// A computed amount
    Amount(DisplayAmount),
    /// Nothing, the recipe is in zero quantity mode
    Blank,
    /// The user is typing in this field; show their text as is
    Editing(String),
}

impl AmountDisplay {
    /// The computed amount, if any
    pub fn amount(&self) -> Option<DisplayAmount> {
        match self {
            AmountDisplay::Amount(a) => Some(*a),
            _ => None,
        }
    }
}

impl Display for AmountDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AmountDisplay::Amount(a) => a.fmt(f),
            AmountDisplay::Blank => Ok(()),
            AmountDisplay::Editing(raw) => f.write_str(raw),
        }
    }
}
