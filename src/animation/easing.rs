//! Easing curves addressed by GSAP-style identifiers.
//!
//! | Identifier | Curve |
//! |---|---|
//! | `none`, `linear` | `t` |
//! | `powerN.in` | `t^(N+1)` |
//! | `powerN.out` (or bare `powerN`) | `1 − (1 − t)^(N+1)` |
//! | `powerN.inOut` | `in` for the first half, `out` for the second |
//!
//! `N` is 1–4, so `power3.out` is a quartic ease-out. Identifiers round-trip
//! through [`Display`](std::fmt::Display) and [`FromStr`], which is also how
//! they appear in `masonry.toml`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown easing '{0}' (expected none, linear, or power1-4 with .in/.out/.inOut)")]
pub struct EasingParseError(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Easing {
    Linear,
    In(u8),
    Out(u8),
    InOut(u8),
}

impl Easing {
    pub const POWER2_OUT: Easing = Easing::Out(2);
    pub const POWER3_OUT: Easing = Easing::Out(3);

    /// Map linear progress `t` (clamped to 0–1) onto the curve.
    pub fn sample(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::In(power) => ease_in(t, power),
            Easing::Out(power) => 1.0 - ease_in(1.0 - t, power),
            Easing::InOut(power) => {
                if t < 0.5 {
                    ease_in(2.0 * t, power) / 2.0
                } else {
                    1.0 - ease_in(2.0 * (1.0 - t), power) / 2.0
                }
            }
        }
    }
}

fn ease_in(t: f64, power: u8) -> f64 {
    t.powi(i32::from(power) + 1)
}

impl fmt::Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Easing::Linear => write!(f, "none"),
            Easing::In(p) => write!(f, "power{p}.in"),
            Easing::Out(p) => write!(f, "power{p}.out"),
            Easing::InOut(p) => write!(f, "power{p}.inOut"),
        }
    }
}

impl FromStr for Easing {
    type Err = EasingParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || EasingParseError(s.to_string());
        if s == "none" || s == "linear" {
            return Ok(Easing::Linear);
        }
        let rest = s.strip_prefix("power").ok_or_else(err)?;
        let (power, variant) = rest.split_once('.').unwrap_or((rest, "out"));
        let power: u8 = power.parse().map_err(|_| err())?;
        if !(1..=4).contains(&power) {
            return Err(err());
        }
        match variant {
            "in" => Ok(Easing::In(power)),
            "out" => Ok(Easing::Out(power)),
            "inOut" => Ok(Easing::InOut(power)),
            _ => Err(err()),
        }
    }
}

impl TryFrom<String> for Easing {
    type Error = EasingParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Easing> for String {
    fn from(easing: Easing) -> Self {
        easing.to_string()
    }
}
