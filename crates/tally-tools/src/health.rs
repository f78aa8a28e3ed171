//! Health and fitness calculators: BMI, BMR, BAC, macro split, protein
//! intake, and sleep-cycle back-calculation.
//!
//! Every calculator is a pure function from a validated input struct to a
//! result struct. Imperial inputs are converted to metric at the boundary
//! so each formula runs in one unit system.

use crate::error::{require_non_negative, require_positive, require_range, InputError};
use chrono::{NaiveTime, TimeDelta};
use serde::{Deserialize, Serialize};

/// Unit system for weight/height fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    /// Kilograms and centimeters.
    #[default]
    Metric,
    /// Pounds and inches.
    Imperial,
}

/// Biological sex, as used by the BMR and BAC formulas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

const LB_PER_KG: f64 = 2.204_622_621_8;
const CM_PER_IN: f64 = 2.54;

fn weight_kg(weight: f64, unit: UnitSystem) -> f64 {
    match unit {
        UnitSystem::Metric => weight,
        UnitSystem::Imperial => weight / LB_PER_KG,
    }
}

fn height_cm(height: f64, unit: UnitSystem) -> f64 {
    match unit {
        UnitSystem::Metric => height,
        UnitSystem::Imperial => height * CM_PER_IN,
    }
}

// ============================================================================
// BMI
// ============================================================================

/// Inputs for the body-mass-index calculator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BmiInput {
    /// Body weight: kg (metric) or lb (imperial).
    pub weight: f64,
    /// Height: cm (metric) or inches (imperial).
    pub height: f64,
    /// Unit system for the two fields above.
    #[serde(default)]
    pub unit: UnitSystem,
}

/// WHO weight classification bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    /// Band for a BMI value.
    #[must_use]
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < 18.5 {
            Self::Underweight
        } else if bmi < 25.0 {
            Self::Normal
        } else if bmi < 30.0 {
            Self::Overweight
        } else {
            Self::Obese
        }
    }
}

/// BMI result.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BmiResult {
    /// Body mass index, kg/m².
    pub bmi: f64,
    /// WHO classification band.
    pub category: BmiCategory,
}

/// Compute body mass index: weight / height².
pub fn bmi(input: &BmiInput) -> Result<BmiResult, InputError> {
    let weight = require_positive("weight", input.weight)?;
    let height = require_positive("height", input.height)?;
    let meters = height_cm(height, input.unit) / 100.0;
    let value = weight_kg(weight, input.unit) / (meters * meters);
    Ok(BmiResult {
        bmi: value,
        category: BmiCategory::from_bmi(value),
    })
}

// ============================================================================
// BMR (Mifflin–St Jeor)
// ============================================================================

/// Inputs for the basal-metabolic-rate calculator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BmrInput {
    pub sex: Sex,
    /// Age in whole years, 1–120.
    pub age_years: u32,
    /// Body weight: kg (metric) or lb (imperial).
    pub weight: f64,
    /// Height: cm (metric) or inches (imperial).
    pub height: f64,
    #[serde(default)]
    pub unit: UnitSystem,
}

/// BMR result.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BmrResult {
    /// Resting energy expenditure, kcal/day.
    pub bmr_kcal: f64,
}

/// Compute basal metabolic rate with the Mifflin–St Jeor equation:
/// `10·kg + 6.25·cm − 5·age + 5` (male) or `− 161` (female).
pub fn bmr(input: &BmrInput) -> Result<BmrResult, InputError> {
    require_range("age_years", f64::from(input.age_years), 1.0, 120.0)?;
    let weight = require_positive("weight", input.weight)?;
    let height = require_positive("height", input.height)?;

    let kg = weight_kg(weight, input.unit);
    let cm = height_cm(height, input.unit);
    let offset = match input.sex {
        Sex::Male => 5.0,
        Sex::Female => -161.0,
    };
    let kcal = 10.0_f64.mul_add(kg, 6.25 * cm) - 5.0 * f64::from(input.age_years) + offset;
    Ok(BmrResult { bmr_kcal: kcal })
}

// ============================================================================
// BAC (Widmark)
// ============================================================================

/// Inputs for the blood-alcohol estimate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BacInput {
    pub sex: Sex,
    /// Body weight: kg (metric) or lb (imperial).
    pub weight: f64,
    #[serde(default)]
    pub unit: UnitSystem,
    /// Standard drinks consumed (14 g of ethanol each).
    pub standard_drinks: f64,
    /// Hours since the first drink.
    pub hours_since_first: f64,
}

/// Rough impairment band for a BAC percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BacBand {
    Minimal,
    Mild,
    Impaired,
    Severe,
}

impl BacBand {
    /// Band for a BAC value (percent by volume).
    #[must_use]
    pub fn from_bac(bac: f64) -> Self {
        if bac < 0.02 {
            Self::Minimal
        } else if bac < 0.05 {
            Self::Mild
        } else if bac < 0.08 {
            Self::Impaired
        } else {
            Self::Severe
        }
    }
}

/// BAC result.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BacResult {
    /// Estimated blood alcohol content, percent by volume.
    pub bac_percent: f64,
    pub band: BacBand,
}

const GRAMS_PER_STANDARD_DRINK: f64 = 14.0;
/// Alcohol eliminated per hour, in BAC percentage points.
const ELIMINATION_PER_HOUR: f64 = 0.015;

/// Estimate blood alcohol content with the Widmark formula, minus metabolic
/// elimination. Never returns a negative value.
pub fn bac(input: &BacInput) -> Result<BacResult, InputError> {
    let weight = require_positive("weight", input.weight)?;
    let drinks = require_non_negative("standard_drinks", input.standard_drinks)?;
    let hours = require_non_negative("hours_since_first", input.hours_since_first)?;

    let grams = drinks * GRAMS_PER_STANDARD_DRINK;
    let body_grams = weight_kg(weight, input.unit) * 1000.0;
    let ratio = match input.sex {
        Sex::Male => 0.68,
        Sex::Female => 0.55,
    };
    let raw = grams / (body_grams * ratio) * 100.0;
    let bac_percent = (raw - hours * ELIMINATION_PER_HOUR).max(0.0);
    Ok(BacResult {
        bac_percent,
        band: BacBand::from_bac(bac_percent),
    })
}

// ============================================================================
// Macro split
// ============================================================================

/// Dietary goal controlling the macro split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MacroGoal {
    /// 30% protein / 40% carbs / 30% fat.
    #[default]
    Balanced,
    /// 40% protein / 20% carbs / 40% fat.
    LowCarb,
    /// 40% protein / 40% carbs / 20% fat.
    HighProtein,
}

impl MacroGoal {
    /// Calorie fractions as (protein, carbs, fat).
    #[must_use]
    pub const fn split(self) -> (f64, f64, f64) {
        match self {
            Self::Balanced => (0.30, 0.40, 0.30),
            Self::LowCarb => (0.40, 0.20, 0.40),
            Self::HighProtein => (0.40, 0.40, 0.20),
        }
    }
}

/// Inputs for the macro calculator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacroInput {
    /// Daily calorie target.
    pub calories: f64,
    #[serde(default)]
    pub goal: MacroGoal,
}

/// Daily macro targets in grams.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacroResult {
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
}

const KCAL_PER_GRAM_PROTEIN: f64 = 4.0;
const KCAL_PER_GRAM_CARB: f64 = 4.0;
const KCAL_PER_GRAM_FAT: f64 = 9.0;

/// Split a calorie target into macro grams for a goal.
pub fn macros(input: &MacroInput) -> Result<MacroResult, InputError> {
    let calories = require_positive("calories", input.calories)?;
    let (protein, carbs, fat) = input.goal.split();
    Ok(MacroResult {
        protein_g: calories * protein / KCAL_PER_GRAM_PROTEIN,
        carbs_g: calories * carbs / KCAL_PER_GRAM_CARB,
        fat_g: calories * fat / KCAL_PER_GRAM_FAT,
    })
}

// ============================================================================
// Protein intake
// ============================================================================

/// Activity level for the protein calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    #[default]
    Sedentary,
    Moderate,
    Active,
    Athlete,
}

impl ActivityLevel {
    /// Recommended grams of protein per kilogram of body weight, as a
    /// (low, high) band.
    #[must_use]
    pub const fn grams_per_kg(self) -> (f64, f64) {
        match self {
            Self::Sedentary => (0.8, 1.0),
            Self::Moderate => (1.0, 1.4),
            Self::Active => (1.4, 1.8),
            Self::Athlete => (1.8, 2.2),
        }
    }
}

/// Inputs for the protein calculator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProteinInput {
    /// Body weight: kg (metric) or lb (imperial).
    pub weight: f64,
    #[serde(default)]
    pub unit: UnitSystem,
    #[serde(default)]
    pub activity: ActivityLevel,
}

/// Daily protein target band in grams.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProteinResult {
    pub grams_low: f64,
    pub grams_high: f64,
}

/// Daily protein intake band from body weight and activity level.
pub fn protein(input: &ProteinInput) -> Result<ProteinResult, InputError> {
    let weight = require_positive("weight", input.weight)?;
    let kg = weight_kg(weight, input.unit);
    let (low, high) = input.activity.grams_per_kg();
    Ok(ProteinResult {
        grams_low: kg * low,
        grams_high: kg * high,
    })
}

// ============================================================================
// Sleep cycles
// ============================================================================

/// Inputs for the bedtime back-calculator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SleepInput {
    /// Target wake-up time.
    pub wake_time: NaiveTime,
}

/// One suggested bedtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bedtime {
    /// Number of full 90-minute cycles before the wake-up time.
    pub cycles: u32,
    /// Time to be in bed, wrapping across midnight when needed.
    pub bedtime: NaiveTime,
}

/// Suggested bedtimes, most sleep first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SleepResult {
    pub bedtimes: Vec<Bedtime>,
}

const CYCLE_MINUTES: i64 = 90;
/// Average time to fall asleep, added on top of the cycles.
const FALL_ASLEEP_MINUTES: i64 = 14;

/// Back-calculate bedtimes from a wake-up time: 6 down to 3 full 90-minute
/// cycles, each offset by a fixed fall-asleep allowance. Time subtraction
/// wraps across midnight, so a 07:00 wake-up yields a previous-evening
/// bedtime.
pub fn sleep(input: &SleepInput) -> Result<SleepResult, InputError> {
    let bedtimes = (3..=6)
        .rev()
        .map(|cycles| {
            let minutes = cycles * CYCLE_MINUTES + FALL_ASLEEP_MINUTES;
            Bedtime {
                cycles: cycles as u32,
                bedtime: input.wake_time - TimeDelta::minutes(minutes),
            }
        })
        .collect();
    Ok(SleepResult { bedtimes })
}
