//! Scaling configuration
//!
//! [`ScalingPolicy::default`] is the behaviour of the recipe detail page. It
//! can be tuned or loaded from a TOML file with the `policy_file` feature:
//!
//! ```toml
//! rules = "KOREAN_DAMPING | TASTE_WEIGHTING"
//! damping_factor = 0.5
//! taste_step = 0.1
//! min_servings = 0.1
//! amount_decimals = 1
//! servings_decimals = 1
//! ```

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::error::PolicyError;

bitflags! {
    /// Adjustment rules applied on top of the linear serving ratio
    ///
    /// [`Rules::default`] enables all of them.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    pub struct Rules: u32 {
        /// Non main ingredients of categories that
        /// [damp seasoning](crate::Category::damps_seasoning) scale up slower
        const KOREAN_DAMPING  = 1 << 0;
        /// Ingredients with a taste type follow their taste slider
        const TASTE_WEIGHTING = 1 << 1;
    }
}

impl Default for Rules {
    /// Enables all rules
    fn default() -> Self {
        Self::all()
    }
}

/// Largest number of decimals accepted for display rounding
pub const MAX_DECIMALS: u32 = 6;

/// Constants of the scaling formulas
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScalingPolicy {
    /// Enabled rules
    pub rules: Rules,
    /// Sensitivity of damped ingredients to scaling up, in `0..=1`
    pub damping_factor: f64,
    /// Change of amount per taste slider step
    pub taste_step: f64,
    /// Lower bound for servings typed in the servings field
    pub min_servings: f64,
    /// Decimals of displayed amounts
    pub amount_decimals: u32,
    /// Decimals of servings inferred from an edited amount
    pub servings_decimals: u32,
}

impl Default for ScalingPolicy {
    fn default() -> Self {
        Self {
            rules: Rules::default(),
            damping_factor: 0.5,
            taste_step: 0.1,
            min_servings: 0.1,
            amount_decimals: 1,
            servings_decimals: 1,
        }
    }
}

impl ScalingPolicy {
    /// Checks that every constant is in range
    pub fn validate(&self) -> Result<(), PolicyError> {
        let invalid = |field, reason| Err(PolicyError::Invalid { field, reason });

        if !(0.0..=1.0).contains(&self.damping_factor) {
            return invalid("damping_factor", "must be between 0 and 1");
        }
        if !self.taste_step.is_finite() || self.taste_step < 0.0 {
            return invalid("taste_step", "must be a non negative number");
        }
        if !self.min_servings.is_finite() || self.min_servings <= 0.0 {
            return invalid("min_servings", "must be a positive number");
        }
        if self.amount_decimals > MAX_DECIMALS {
            return invalid("amount_decimals", "too many decimals");
        }
        if self.servings_decimals > MAX_DECIMALS {
            return invalid("servings_decimals", "too many decimals");
        }
        Ok(())
    }

    /// Parses and validates a policy from TOML
    ///
    /// Missing keys take their default value.
    #[cfg(feature = "policy_file")]
    pub fn from_toml_str(s: &str) -> Result<Self, PolicyError> {
        let policy: Self = toml::from_str(s)?;
        policy.validate()?;
        Ok(policy)
    }
}
