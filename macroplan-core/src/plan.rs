//! Generated plan entities.
//!
//! These mirror the JSON documents the generative provider is asked to
//! return. Field names on the wire are camelCase. Every field except
//! [`Meal::notes`] is required: a document missing one fails to
//! deserialize instead of producing a partial record.
//!
//! Costs are currency-formatted strings (`"Rs. 200"`, `"$1.50"`) because the
//! currency symbol depends on the region.

use serde::{Deserialize, Serialize};

/// A single food item within a meal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodItem {
    /// Name of the food.
    pub name: String,
    /// Free-text portion description (`"1 cup"`, `"100g"`).
    pub portion: String,
    /// Approximate kcal.
    pub calories: f64,
    /// Approximate protein in grams.
    pub protein: f64,
    /// Estimated cost with currency symbol.
    pub cost: String,
}

/// One meal of the day (breakfast, lunch, dinner, snack).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meal {
    /// Meal name.
    pub name: String,
    /// Items in serving order.
    pub items: Vec<FoodItem>,
    /// Total kcal for the meal.
    pub total_calories: f64,
    /// Total protein for the meal in grams.
    pub total_protein: f64,
    /// Optional cooking tip or preparation note.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Day-level totals and tips.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanSummary {
    /// Total kcal across all meals.
    pub total_calories: f64,
    /// Total protein across all meals in grams.
    pub total_protein: f64,
    /// Estimated daily cost with currency symbol.
    pub estimated_daily_cost: String,
    /// Practical tips for the day.
    pub tips: Vec<String>,
}

/// A complete one-day meal plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyPlan {
    /// Meals in eating order.
    pub meals: Vec<Meal>,
    /// Totals and tips.
    pub summary: PlanSummary,
}

impl DailyPlan {
    /// Sum of per-meal calories. May differ from the provider's own summary.
    #[must_use]
    pub fn meal_calories(&self) -> f64 {
        self.meals.iter().map(|m| m.total_calories).sum()
    }

    /// Sum of per-meal protein.
    #[must_use]
    pub fn meal_protein(&self) -> f64 {
        self.meals.iter().map(|m| m.total_protein).sum()
    }
}

/// An ingredient line of a shake recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeIngredient {
    /// Ingredient name.
    pub name: String,
    /// Free-text amount (`"1 scoop"`, `"250ml"`).
    pub amount: String,
}

/// Estimated macros of a shake.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacroEstimate {
    /// kcal.
    pub calories: f64,
    /// Protein in grams.
    pub protein: f64,
    /// Carbohydrates in grams.
    pub carbs: f64,
    /// Fats in grams.
    pub fats: f64,
}

/// A protein shake recipe built from the user's available ingredients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShakeRecipe {
    /// Recipe name.
    pub name: String,
    /// Ingredients with amounts, in the order they go into the blender.
    pub ingredients: Vec<RecipeIngredient>,
    /// Preparation steps.
    pub instructions: Vec<String>,
    /// Estimated macros.
    pub macros: MacroEstimate,
    /// One serving tip.
    pub tip: String,
}
