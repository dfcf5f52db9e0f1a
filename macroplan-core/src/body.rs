//! Body-mass index and its WHO category.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::UserProfile;

/// WHO adult BMI category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BmiCategory {
    /// BMI < 18.5.
    Underweight,
    /// 18.5 ≤ BMI < 25.
    Healthy,
    /// 25 ≤ BMI < 30.
    Overweight,
    /// BMI ≥ 30.
    Obese,
}

impl BmiCategory {
    /// Classify a BMI value.
    #[must_use]
    pub fn classify(bmi: f64) -> Self {
        if bmi < 18.5 {
            Self::Underweight
        } else if bmi < 25.0 {
            Self::Healthy
        } else if bmi < 30.0 {
            Self::Overweight
        } else {
            Self::Obese
        }
    }
}

impl fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Underweight => "Underweight",
            Self::Healthy => "Healthy Weight",
            Self::Overweight => "Overweight",
            Self::Obese => "Obese",
        };
        write!(f, "{label}")
    }
}

/// BMI = weight_kg / height_m².
#[must_use]
pub fn bmi(profile: &UserProfile) -> f64 {
    let height_m = profile.height_cm / 100.0;
    profile.weight_kg / (height_m * height_m)
}

/// BMI together with its category.
#[must_use]
pub fn bmi_report(profile: &UserProfile) -> (f64, BmiCategory) {
    let value = bmi(profile);
    (value, BmiCategory::classify(value))
}
