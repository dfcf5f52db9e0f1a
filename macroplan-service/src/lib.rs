//! # macroplan-service
//!
//! The surface a presentation layer talks to. A [`Planner`] owns:
//!
//! - the selected [`Region`](macroplan_core::types::Region)
//! - the targets of the last meal-plan call
//! - a meal-plan slot and a shake slot, each a
//!   [`RequestState`](macroplan_llm::RequestState)
//!
//! Input validation happens here, before anything reaches the provider.
//!
//! ```no_run
//! # async fn run() -> Result<(), macroplan_service::PlannerError> {
//! use macroplan_core::{MacroplanConfig, UserProfile};
//! use macroplan_service::{Planner, telemetry};
//!
//! let config = MacroplanConfig::default();
//! telemetry::init(&config.general);
//!
//! let planner = Planner::from_config(&config)?;
//! let outcome = planner.plan_meals(&UserProfile::default()).await?;
//! println!("{} meals for {:.0} kcal", outcome.plan.meals.len(), outcome.targets.calories);
//! # Ok(())
//! # }
//! ```

#![deny(clippy::unwrap_used)]
#![deny(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod planner;
pub mod telemetry;

pub use error::PlannerError;
pub use planner::{MealPlanOutcome, Planner};
