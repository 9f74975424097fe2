//! Biorhythm curves.
//!
//! Each cycle is a sine wave starting at zero on the day of birth, scaled to
//! -100..=100 and rounded to one decimal.

use std::f64::consts::TAU;

use serde::Serialize;

use crate::consts::{EMOTIONAL_PERIOD, INTELLECTUAL_PERIOD, PHYSICAL_PERIOD};
use crate::prelude::*;
use crate::solar::{SolarDate, days_between};

/// One of the three biorhythm cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display)]
#[serde(rename_all = "snake_case")]
pub enum Cycle {
    #[display(fmt = "physical")]
    Physical,
    #[display(fmt = "emotional")]
    Emotional,
    #[display(fmt = "intellectual")]
    Intellectual,
}

impl Cycle {
    pub const ALL: [Self; 3] = [Self::Physical, Self::Emotional, Self::Intellectual];

    /// Length of the cycle in days.
    pub const fn period(self) -> u32 {
        match self {
            Self::Physical => PHYSICAL_PERIOD,
            Self::Emotional => EMOTIONAL_PERIOD,
            Self::Intellectual => INTELLECTUAL_PERIOD,
        }
    }

    /// Value of the cycle `days` after birth. Negative `days` run the curve backwards.
    pub fn value(self, days: i32) -> f64 {
        let phase = TAU * f64::from(days) / f64::from(self.period());
        (phase.sin() * 1000.0).round() / 10.0
    }
}

/// The three cycle values for one day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Biorhythm {
    pub physical: f64,
    pub emotional: f64,
    pub intellectual: f64,
}

impl Biorhythm {
    pub fn at_day(days: i32) -> Self {
        Self {
            physical: Cycle::Physical.value(days),
            emotional: Cycle::Emotional.value(days),
            intellectual: Cycle::Intellectual.value(days),
        }
    }

    /// Values on `target` for someone born on `birth`.
    pub fn between(birth: SolarDate, target: SolarDate) -> Self {
        Self::at_day(days_between(birth, target))
    }

    pub const fn get(&self, cycle: Cycle) -> f64 {
        match cycle {
            Cycle::Physical => self.physical,
            Cycle::Emotional => self.emotional,
            Cycle::Intellectual => self.intellectual,
        }
    }
}
