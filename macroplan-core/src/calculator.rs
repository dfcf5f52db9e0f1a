//! Macro-target calculator.
//!
//! Maps a [`UserProfile`] to daily calorie, protein, fat and carbohydrate
//! targets:
//!
//! ```text
//! BMR  = 10 × weight_kg + 6.25 × height_cm − 5 × age + (5 | −161)
//! TDEE = BMR × activity multiplier
//! kcal = TDEE + goal adjustment
//! protein_g = weight_kg × protein-per-kg(goal)
//! fat_g     = (kcal × 0.25) / 9
//! carb_g    = (kcal − fat_kcal − protein_g × 4) / 4
//! ```
//!
//! Reference: Mifflin, M.D., et al. (1990). A new predictive equation for
//! resting energy expenditure. *Am J Clin Nutr*, 51(2), 241-247.
//!
//! Every function here is total. Inputs are not range-checked (that is
//! [`UserProfile::validate`]'s job) and derived values are never clamped.

use crate::types::{ActivityLevel, Gender, Goal, MacroTargets, UserProfile};

/// Share of daily calories allotted to fat.
pub const FAT_ENERGY_SHARE: f64 = 0.25;
/// kcal per gram of fat.
pub const KCAL_PER_G_FAT: f64 = 9.0;
/// kcal per gram of protein.
pub const KCAL_PER_G_PROTEIN: f64 = 4.0;
/// kcal per gram of carbohydrate.
pub const KCAL_PER_G_CARB: f64 = 4.0;

impl Gender {
    /// Mifflin-St Jeor constant term.
    #[must_use]
    pub fn bmr_offset(self) -> f64 {
        match self {
            Self::Male => 5.0,
            Self::Female => -161.0,
        }
    }
}

impl ActivityLevel {
    /// TDEE multiplier for this tier.
    #[must_use]
    pub fn multiplier(self) -> f64 {
        match self {
            Self::Sedentary => 1.2,
            Self::Light => 1.375,
            Self::Moderate => 1.55,
            Self::Active => 1.725,
            Self::VeryActive => 1.9,
        }
    }
}

impl Goal {
    /// kcal added to TDEE.
    #[must_use]
    pub fn calorie_adjustment(self) -> f64 {
        match self {
            Self::LoseWeight => -500.0,
            Self::GainWeight => 500.0,
            Self::GainMuscle => 300.0,
            Self::Maintain => 0.0,
        }
    }

    /// Grams of protein per kilogram of body weight.
    #[must_use]
    pub fn protein_per_kg(self) -> f64 {
        match self {
            Self::LoseWeight | Self::GainWeight => 1.6,
            Self::GainMuscle => 2.0,
            Self::Maintain => 1.0,
        }
    }
}

/// Basal metabolic rate in kcal/day (Mifflin-St Jeor).
#[must_use]
pub fn basal_metabolic_rate(profile: &UserProfile) -> f64 {
    let bmr = 10.0 * profile.weight_kg + 6.25 * profile.height_cm - 5.0 * f64::from(profile.age);
    bmr + profile.gender.bmr_offset()
}

/// Total daily energy expenditure in kcal/day.
#[must_use]
pub fn total_daily_energy_expenditure(profile: &UserProfile) -> f64 {
    basal_metabolic_rate(profile) * profile.activity_level.multiplier()
}

/// Compute the daily macro targets for a profile.
#[must_use]
pub fn compute_targets(profile: &UserProfile) -> MacroTargets {
    let tdee = total_daily_energy_expenditure(profile);

    let calories = tdee + profile.goal.calorie_adjustment();
    let protein = profile.weight_kg * profile.goal.protein_per_kg();

    let fat_kcal = calories * FAT_ENERGY_SHARE;
    let fats = fat_kcal / KCAL_PER_G_FAT;

    let protein_kcal = protein * KCAL_PER_G_PROTEIN;
    let carb_kcal = calories - fat_kcal - protein_kcal;
    let carbs = carb_kcal / KCAL_PER_G_CARB;

    MacroTargets {
        calories,
        protein,
        fats,
        carbs,
    }
}
