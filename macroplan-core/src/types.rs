//! Core type definitions: the user profile, its enumerations, and the
//! derived macro targets.
//!
//! All types are plain immutable value records. Nothing here holds shared
//! state or references another record.

use std::collections::BTreeSet;
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{MacroplanError, Result};

// ---------------------------------------------------------------------------
// Profile enumerations
// ---------------------------------------------------------------------------

/// Biological sex used by the Mifflin-St Jeor equation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Gender {
    /// Male (+5 kcal BMR offset).
    Male,
    /// Female (-161 kcal BMR offset).
    Female,
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Male => write!(f, "Male"),
            Self::Female => write!(f, "Female"),
        }
    }
}

/// Weekly activity tier, ordered from least to most active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActivityLevel {
    /// Little or no exercise.
    Sedentary,
    /// Exercise 1-3 days/week.
    Light,
    /// Exercise 3-5 days/week.
    Moderate,
    /// Exercise 6-7 days/week.
    Active,
    /// Hard exercise and a physical job.
    VeryActive,
}

impl ActivityLevel {
    /// All tiers in ascending order.
    #[must_use]
    pub fn all() -> &'static [ActivityLevel] {
        &[
            Self::Sedentary,
            Self::Light,
            Self::Moderate,
            Self::Active,
            Self::VeryActive,
        ]
    }
}

impl fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Sedentary => "Sedentary (little or no exercise)",
            Self::Light => "Lightly active (exercise 1-3 days/week)",
            Self::Moderate => "Moderately active (exercise 3-5 days/week)",
            Self::Active => "Active (exercise 6-7 days/week)",
            Self::VeryActive => "Very active (hard exercise & physical job)",
        };
        write!(f, "{label}")
    }
}

/// Body-composition goal.
///
/// Parsing never fails: any label that is not recognised becomes
/// [`Goal::Maintain`], so the calorie adjustment always has a branch to take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", from = "String")]
pub enum Goal {
    /// Caloric deficit.
    LoseWeight,
    /// Caloric balance.
    Maintain,
    /// Caloric surplus.
    GainWeight,
    /// Moderate surplus with high protein.
    GainMuscle,
}

impl Goal {
    /// Parse a goal from an id (`lose-weight`), a snake/space variant, or a
    /// display label (`Lose Weight`). Unknown input yields `Maintain`.
    #[must_use]
    pub fn parse_lenient(input: &str) -> Self {
        let key: String = input
            .trim()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match key.as_str() {
            "loseweight" | "lose" => Self::LoseWeight,
            "gainweight" => Self::GainWeight,
            "gainmuscle" => Self::GainMuscle,
            "maintain" | "maintainweight" => Self::Maintain,
            _ => {
                tracing::debug!(goal = input, "unrecognised goal, falling back to maintain");
                Self::Maintain
            }
        }
    }
}

impl From<String> for Goal {
    fn from(value: String) -> Self {
        Self::parse_lenient(&value)
    }
}

impl From<&str> for Goal {
    fn from(value: &str) -> Self {
        Self::parse_lenient(value)
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::LoseWeight => "Lose Weight",
            Self::Maintain => "Maintain Weight",
            Self::GainWeight => "Gain Weight",
            Self::GainMuscle => "Gain Muscle",
        };
        write!(f, "{label}")
    }
}

/// A meat the user is willing to eat.
///
/// The declaration order is the order guidance lines appear in prompts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Meat {
    /// Chicken.
    Chicken,
    /// Fish.
    Fish,
    /// Beef.
    Beef,
    /// Pork.
    Pork,
}

impl Meat {
    /// All meats in prompt order.
    #[must_use]
    pub fn all() -> &'static [Meat] {
        &[Self::Chicken, Self::Fish, Self::Beef, Self::Pork]
    }
}

impl fmt::Display for Meat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Chicken => "Chicken",
            Self::Fish => "Fish",
            Self::Beef => "Beef",
            Self::Pork => "Pork",
        };
        write!(f, "{name}")
    }
}

impl FromStr for Meat {
    type Err = MacroplanError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "chicken" => Ok(Self::Chicken),
            "fish" => Ok(Self::Fish),
            "beef" => Ok(Self::Beef),
            "pork" => Ok(Self::Pork),
            other => Err(MacroplanError::validation(
                "meat_preferences",
                format!("unknown meat '{other}'"),
            )),
        }
    }
}

/// Region context for prompt generation. Has no effect on macro math.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Region {
    /// The local market (Sri Lanka in the built-in catalog).
    #[default]
    Local,
    /// General Western / worldwide availability.
    Worldwide,
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local => write!(f, "local"),
            Self::Worldwide => write!(f, "worldwide"),
        }
    }
}

// ---------------------------------------------------------------------------
// User profile
// ---------------------------------------------------------------------------

/// Accepted age range in years.
pub const AGE_RANGE: RangeInclusive<u32> = 10..=100;
/// Accepted height range in centimetres.
pub const HEIGHT_RANGE_CM: RangeInclusive<f64> = 100.0..=250.0;
/// Accepted weight range in kilograms.
pub const WEIGHT_RANGE_KG: RangeInclusive<f64> = 30.0..=200.0;

/// Body metrics and preferences submitted by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Age in years.
    pub age: u32,
    /// Height in centimetres.
    pub height_cm: f64,
    /// Weight in kilograms.
    pub weight_kg: f64,
    /// Gender for the BMR offset.
    pub gender: Gender,
    /// Activity tier.
    pub activity_level: ActivityLevel,
    /// Body-composition goal.
    pub goal: Goal,
    /// Selected meats. Empty means vegetarian.
    #[serde(default)]
    pub meat_preferences: BTreeSet<Meat>,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            age: 25,
            height_cm: 170.0,
            weight_kg: 65.0,
            gender: Gender::Male,
            activity_level: ActivityLevel::Moderate,
            goal: Goal::Maintain,
            meat_preferences: [Meat::Chicken, Meat::Fish].into_iter().collect(),
        }
    }
}

impl UserProfile {
    /// Check every numeric field against its accepted range.
    ///
    /// # Errors
    /// Returns [`MacroplanError::Validation`] naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        if !AGE_RANGE.contains(&self.age) {
            return Err(MacroplanError::validation(
                "age",
                format!(
                    "{} is outside {}-{} years",
                    self.age,
                    AGE_RANGE.start(),
                    AGE_RANGE.end()
                ),
            ));
        }
        check_metric("height", self.height_cm, &HEIGHT_RANGE_CM, "cm")?;
        check_metric("weight", self.weight_kg, &WEIGHT_RANGE_KG, "kg")?;
        Ok(())
    }

    /// Whether no meats were selected.
    #[must_use]
    pub fn is_vegetarian(&self) -> bool {
        self.meat_preferences.is_empty()
    }
}

fn check_metric(
    field: &'static str,
    value: f64,
    range: &RangeInclusive<f64>,
    unit: &str,
) -> Result<()> {
    if value.is_finite() && range.contains(&value) {
        return Ok(());
    }
    Err(MacroplanError::validation(
        field,
        format!(
            "{value} is outside {}-{} {unit}",
            range.start(),
            range.end()
        ),
    ))
}

// ---------------------------------------------------------------------------
// Macro targets
// ---------------------------------------------------------------------------

/// Daily calorie and macronutrient targets (kcal and grams).
///
/// Nothing is clamped. For small, elderly, sedentary profiles on a deficit
/// the calorie target itself goes negative, which drags `fats` below zero
/// with it; `carbs` goes negative as soon as protein and fat energy exceed
/// the calorie target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacroTargets {
    /// Daily energy target in kcal.
    pub calories: f64,
    /// Protein in grams.
    pub protein: f64,
    /// Fats in grams.
    pub fats: f64,
    /// Carbohydrates in grams.
    pub carbs: f64,
}

/// Energy contributed by each macronutrient, in kcal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnergySplit {
    /// Protein kcal (4 kcal/g).
    pub protein_kcal: f64,
    /// Carbohydrate kcal (4 kcal/g).
    pub carb_kcal: f64,
    /// Fat kcal (9 kcal/g).
    pub fat_kcal: f64,
}

impl EnergySplit {
    /// Sum of all three contributions.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.protein_kcal + self.carb_kcal + self.fat_kcal
    }
}

impl MacroTargets {
    /// Per-macro energy breakdown, as used for chart rendering.
    #[must_use]
    pub fn energy_split(&self) -> EnergySplit {
        EnergySplit {
            protein_kcal: self.protein * 4.0,
            carb_kcal: self.carbs * 4.0,
            fat_kcal: self.fats * 9.0,
        }
    }
}
