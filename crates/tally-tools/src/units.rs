//! Unit conversions: length, mass, temperature.
//!
//! Linear units convert through a canonical base (meters, kilograms);
//! temperature is affine and handled explicitly.

use crate::error::{require_non_negative, InputError};
use serde::{Deserialize, Serialize};

/// Length units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LengthUnit {
    Millimeter,
    Centimeter,
    Meter,
    Kilometer,
    Inch,
    Foot,
    Yard,
    Mile,
}

impl LengthUnit {
    /// Meters per one of this unit.
    #[must_use]
    pub const fn meters(self) -> f64 {
        match self {
            Self::Millimeter => 0.001,
            Self::Centimeter => 0.01,
            Self::Meter => 1.0,
            Self::Kilometer => 1000.0,
            Self::Inch => 0.0254,
            Self::Foot => 0.3048,
            Self::Yard => 0.9144,
            Self::Mile => 1609.344,
        }
    }
}

/// Mass units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MassUnit {
    Gram,
    Kilogram,
    Tonne,
    Ounce,
    Pound,
    Stone,
}

impl MassUnit {
    /// Kilograms per one of this unit.
    #[must_use]
    pub const fn kilograms(self) -> f64 {
        match self {
            Self::Gram => 0.001,
            Self::Kilogram => 1.0,
            Self::Tonne => 1000.0,
            Self::Ounce => 0.028_349_523_125,
            Self::Pound => 0.453_592_37,
            Self::Stone => 6.350_293_18,
        }
    }
}

/// Temperature scales.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TempUnit {
    Celsius,
    Fahrenheit,
    Kelvin,
}

/// Convert a non-negative length between units.
pub fn convert_length(value: f64, from: LengthUnit, to: LengthUnit) -> Result<f64, InputError> {
    let value = require_non_negative("value", value)?;
    Ok(value * from.meters() / to.meters())
}

/// Convert a non-negative mass between units.
pub fn convert_mass(value: f64, from: MassUnit, to: MassUnit) -> Result<f64, InputError> {
    let value = require_non_negative("value", value)?;
    Ok(value * from.kilograms() / to.kilograms())
}

/// Absolute zero per scale, the lower input bound.
const fn absolute_zero(unit: TempUnit) -> f64 {
    match unit {
        TempUnit::Celsius => -273.15,
        TempUnit::Fahrenheit => -459.67,
        TempUnit::Kelvin => 0.0,
    }
}

/// Convert a temperature between scales. Readings below absolute zero are
/// rejected as input errors.
pub fn convert_temperature(value: f64, from: TempUnit, to: TempUnit) -> Result<f64, InputError> {
    if !value.is_finite() || value < absolute_zero(from) {
        return Err(InputError::new("value", "is below absolute zero"));
    }
    let celsius = match from {
        TempUnit::Celsius => value,
        TempUnit::Fahrenheit => (value - 32.0) * 5.0 / 9.0,
        TempUnit::Kelvin => value - 273.15,
    };
    Ok(match to {
        TempUnit::Celsius => celsius,
        TempUnit::Fahrenheit => celsius * 9.0 / 5.0 + 32.0,
        TempUnit::Kelvin => celsius + 273.15,
    })
}
