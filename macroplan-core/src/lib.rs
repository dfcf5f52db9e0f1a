//! # macroplan-core
//!
//! The deterministic half of macroplan: everything that can be computed
//! without talking to a generative provider.
//!
//! - [`calculator`]: Mifflin-St Jeor BMR, activity-scaled TDEE, goal
//!   adjustment and the protein/fat/carb split.
//! - [`types`]: the [`UserProfile`] and its enumerations, plus [`MacroTargets`].
//! - [`plan`]: the records a successful generation produces
//!   ([`DailyPlan`], [`ShakeRecipe`]).
//! - [`region`]: per-region currency, staples and forbidden foods, kept as
//!   data.
//! - [`ingredients`]: the shake pantry and validated selections.
//! - [`body`]: BMI and its category.
//! - [`config`]: `macroplan.toml`.
//!
//! Nothing in this crate performs I/O except the explicit TOML file loaders.

#![deny(clippy::unwrap_used)]
#![deny(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod body;
pub mod calculator;
pub mod config;
pub mod error;
pub mod ingredients;
pub mod plan;
pub mod region;
pub mod types;

pub use calculator::compute_targets;
pub use config::MacroplanConfig;
pub use error::MacroplanError;
pub use ingredients::{IngredientCatalog, ShakeSelection};
pub use plan::{DailyPlan, FoodItem, MacroEstimate, Meal, PlanSummary, RecipeIngredient, ShakeRecipe};
pub use region::{RegionCatalog, RegionProfile};
pub use types::*;
