//! Option payoffs and exercise schedules.
//!
//! Both are closed sum types dispatched with `match`, so a pricer handles
//! every kind explicitly.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CoreError, CoreResult};
use crate::types::Date;

/// Call or put.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionType {
    /// Right to buy.
    Call,
    /// Right to sell.
    Put,
}

impl OptionType {
    /// +1 for calls, -1 for puts.
    #[must_use]
    pub fn sign(&self) -> f64 {
        match self {
            Self::Call => 1.0,
            Self::Put => -1.0,
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Call => write!(f, "Call"),
            Self::Put => write!(f, "Put"),
        }
    }
}

/// Striked payoff at expiry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Payoff {
    /// `max(±(S - K), 0)`.
    PlainVanilla {
        /// Call or put.
        option_type: OptionType,
        /// Strike.
        strike: f64,
    },
    /// Pays `cash` if in the money.
    CashOrNothing {
        /// Call or put.
        option_type: OptionType,
        /// Strike.
        strike: f64,
        /// Fixed payout.
        cash: f64,
    },
    /// Pays the underlying if in the money.
    AssetOrNothing {
        /// Call or put.
        option_type: OptionType,
        /// Strike.
        strike: f64,
    },
    /// Pays `±(S - K)` when `S` is beyond the trigger `second_strike`.
    Gap {
        /// Call or put.
        option_type: OptionType,
        /// Strike used in the payout.
        strike: f64,
        /// Strike deciding whether anything is paid.
        second_strike: f64,
    },
}

impl Payoff {
    /// Plain vanilla payoff.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidPayoff` for a negative or non-finite strike.
    pub fn vanilla(option_type: OptionType, strike: f64) -> CoreResult<Self> {
        let payoff = Self::PlainVanilla {
            option_type,
            strike,
        };
        payoff.validate()?;
        Ok(payoff)
    }

    /// Cash-or-nothing digital payoff.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidPayoff` for a negative strike or cash amount.
    pub fn cash_or_nothing(option_type: OptionType, strike: f64, cash: f64) -> CoreResult<Self> {
        let payoff = Self::CashOrNothing {
            option_type,
            strike,
            cash,
        };
        payoff.validate()?;
        Ok(payoff)
    }

    /// Asset-or-nothing digital payoff.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidPayoff` for a negative strike.
    pub fn asset_or_nothing(option_type: OptionType, strike: f64) -> CoreResult<Self> {
        let payoff = Self::AssetOrNothing {
            option_type,
            strike,
        };
        payoff.validate()?;
        Ok(payoff)
    }

    /// Gap payoff.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidPayoff` for a negative strike.
    pub fn gap(option_type: OptionType, strike: f64, second_strike: f64) -> CoreResult<Self> {
        let payoff = Self::Gap {
            option_type,
            strike,
            second_strike,
        };
        payoff.validate()?;
        Ok(payoff)
    }

    /// Checks strikes and amounts.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidPayoff` describing the first problem found.
    pub fn validate(&self) -> CoreResult<()> {
        let check = |name: &str, value: f64| {
            if value.is_finite() && value >= 0.0 {
                Ok(())
            } else {
                Err(CoreError::invalid_payoff(format!(
                    "{name} must be finite and non-negative, got {value}"
                )))
            }
        };

        check("strike", self.strike())?;
        match *self {
            Self::CashOrNothing { cash, .. } => check("cash", cash),
            Self::Gap { second_strike, .. } => check("second strike", second_strike),
            Self::PlainVanilla { .. } | Self::AssetOrNothing { .. } => Ok(()),
        }
    }

    /// Call or put.
    #[must_use]
    pub fn option_type(&self) -> OptionType {
        match *self {
            Self::PlainVanilla { option_type, .. }
            | Self::CashOrNothing { option_type, .. }
            | Self::AssetOrNothing { option_type, .. }
            | Self::Gap { option_type, .. } => option_type,
        }
    }

    /// The payout strike.
    #[must_use]
    pub fn strike(&self) -> f64 {
        match *self {
            Self::PlainVanilla { strike, .. }
            | Self::CashOrNothing { strike, .. }
            | Self::AssetOrNothing { strike, .. }
            | Self::Gap { strike, .. } => strike,
        }
    }

    /// Payout for an underlying price at expiry.
    #[must_use]
    pub fn value(&self, price: f64) -> f64 {
        let sign = self.option_type().sign();
        let in_the_money = |strike: f64| sign * (price - strike) > 0.0;

        match *self {
            Self::PlainVanilla { strike, .. } => (sign * (price - strike)).max(0.0),
            Self::CashOrNothing { strike, cash, .. } => {
                if in_the_money(strike) {
                    cash
                } else {
                    0.0
                }
            }
            Self::AssetOrNothing { strike, .. } => {
                if in_the_money(strike) {
                    price
                } else {
                    0.0
                }
            }
            Self::Gap {
                strike,
                second_strike,
                ..
            } => {
                if in_the_money(second_strike) {
                    sign * (price - strike)
                } else {
                    0.0
                }
            }
        }
    }
}

/// When an option may be exercised.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Exercise {
    /// Only at expiry.
    European {
        /// Expiry date.
        expiry: Date,
    },
    /// Any time in `[earliest, latest]`.
    American {
        /// First exercise date.
        earliest: Date,
        /// Last exercise date.
        latest: Date,
    },
    /// On any of a set of dates.
    Bermudan {
        /// Exercise dates, strictly increasing.
        dates: Vec<Date>,
    },
}

impl Exercise {
    /// European exercise.
    #[must_use]
    pub fn european(expiry: Date) -> Self {
        Self::European { expiry }
    }

    /// American exercise.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidExercise` if `earliest > latest`.
    pub fn american(earliest: Date, latest: Date) -> CoreResult<Self> {
        let exercise = Self::American { earliest, latest };
        exercise.validate()?;
        Ok(exercise)
    }

    /// Bermudan exercise. Dates are sorted and deduplicated.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidExercise` if no dates are given.
    pub fn bermudan(mut dates: Vec<Date>) -> CoreResult<Self> {
        dates.sort_unstable();
        dates.dedup();
        let exercise = Self::Bermudan { dates };
        exercise.validate()?;
        Ok(exercise)
    }

    /// Checks date ordering.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidExercise` describing the problem.
    pub fn validate(&self) -> CoreResult<()> {
        match self {
            Self::European { .. } => Ok(()),
            Self::American { earliest, latest } => {
                if earliest > latest {
                    Err(CoreError::invalid_exercise(format!(
                        "earliest date {earliest} is after latest date {latest}"
                    )))
                } else {
                    Ok(())
                }
            }
            Self::Bermudan { dates } => {
                if dates.is_empty() {
                    return Err(CoreError::invalid_exercise("no exercise dates"));
                }
                if dates.windows(2).any(|w| w[0] >= w[1]) {
                    return Err(CoreError::invalid_exercise(
                        "exercise dates must be strictly increasing",
                    ));
                }
                Ok(())
            }
        }
    }

    /// The last date on which the option can be exercised.
    #[must_use]
    pub fn last_date(&self) -> Date {
        match self {
            Self::European { expiry } => *expiry,
            Self::American { latest, .. } => *latest,
            Self::Bermudan { dates } => dates[dates.len() - 1],
        }
    }

    /// True if the option can be exercised on `date`.
    #[must_use]
    pub fn can_exercise_on(&self, date: Date) -> bool {
        match self {
            Self::European { expiry } => date == *expiry,
            Self::American { earliest, latest } => date >= *earliest && date <= *latest,
            Self::Bermudan { dates } => dates.binary_search(&date).is_ok(),
        }
    }
}
