//! The planner façade.
//!
//! Holds the selected region, the last computed targets and two independent
//! request slots (meal plan, shake). A meal-plan call and a shake call may
//! run at the same time; they share no slot. Slot locks are never held
//! across the provider round trip.

use macroplan_core::types::Region;
use macroplan_core::{
    DailyPlan, IngredientCatalog, MacroTargets, MacroplanConfig, RegionCatalog, ShakeRecipe,
    ShakeSelection, UserProfile, compute_targets,
};
use macroplan_llm::{
    GenerationFailure, LlmClient, PlanRequestClient, PromptComposer, RecipeRequestClient,
    RequestState,
};
use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::error::PlannerError;

/// Result of a successful meal-plan call.
#[derive(Debug, Clone, PartialEq)]
pub struct MealPlanOutcome {
    /// Targets the plan was requested for.
    pub targets: MacroTargets,
    /// The generated plan.
    pub plan: DailyPlan,
}

/// Entry point for the presentation layer.
#[derive(Debug)]
pub struct Planner {
    composer: PromptComposer,
    ingredients: IngredientCatalog,
    plans: PlanRequestClient,
    recipes: RecipeRequestClient,
    region: Mutex<Region>,
    targets: Mutex<Option<MacroTargets>>,
    plan: Mutex<RequestState<DailyPlan>>,
    shake: Mutex<RequestState<ShakeRecipe>>,
}

impl Planner {
    /// Build a planner over a provider client and region catalog.
    #[must_use]
    pub fn new(client: LlmClient, catalog: RegionCatalog) -> Self {
        Self {
            composer: PromptComposer::new(catalog),
            ingredients: IngredientCatalog::builtin(),
            plans: PlanRequestClient::new(client.clone()),
            recipes: RecipeRequestClient::new(client),
            region: Mutex::new(Region::default()),
            targets: Mutex::new(None),
            plan: Mutex::new(RequestState::Idle),
            shake: Mutex::new(RequestState::Idle),
        }
    }

    /// Build a planner from configuration.
    ///
    /// # Errors
    /// [`PlannerError::Config`] if the region catalog cannot be loaded or the
    /// provider API key is missing.
    pub fn from_config(config: &MacroplanConfig) -> Result<Self, PlannerError> {
        let catalog = config.regions.load()?;
        let client = LlmClient::from_config(&config.provider)?;
        info!(
            provider = ?config.provider.kind,
            model = %config.provider.model,
            "planner ready"
        );
        Ok(Self::new(client, catalog))
    }

    /// Shake ingredients offered to the user.
    #[must_use]
    pub fn ingredients(&self) -> &IngredientCatalog {
        &self.ingredients
    }

    /// Currently selected region.
    #[must_use]
    pub fn region(&self) -> Region {
        *self.region.lock()
    }

    /// Switch region.
    ///
    /// Any meal plan made for the old region is dropped, and an outstanding
    /// meal-plan request will not land in the slot. Returns `true` if a
    /// generated plan was discarded. Targets are region-independent and kept.
    pub fn set_region(&self, region: Region) -> bool {
        {
            let mut current = self.region.lock();
            if *current == region {
                return false;
            }
            *current = region;
        }
        let mut plan = self.plan.lock();
        let invalidated = plan.value().is_some();
        plan.clear();
        info!(%region, invalidated, "region changed");
        invalidated
    }

    /// Validate, compute targets, compose and fetch a one-day meal plan.
    ///
    /// # Errors
    /// [`PlannerError::Validation`] before any network call if the profile is
    /// out of range; [`PlannerError::Generation`] if the provider call fails.
    pub async fn plan_meals(&self, profile: &UserProfile) -> Result<MealPlanOutcome, PlannerError> {
        profile.validate()?;

        let targets = compute_targets(profile);
        *self.targets.lock() = Some(targets);
        if targets.calories <= 0.0 {
            warn!(
                calories = targets.calories,
                fats = targets.fats,
                carbs = targets.carbs,
                "calorie target is not positive for this profile"
            );
        } else if targets.carbs < 0.0 {
            warn!(carbs = targets.carbs, "carbohydrate target is negative for this profile");
        }

        let region = self.region();
        let request = self.composer.compose_meal_plan_request(profile, &targets, region);
        let ticket = self.plan.lock().start();
        debug!(%ticket, %region, calories = targets.calories, "meal plan requested");

        let outcome = self.plans.fetch_plan(&request).await;
        self.plan.lock().resolve(ticket, outcome.clone());

        Ok(MealPlanOutcome {
            targets,
            plan: outcome?,
        })
    }

    /// Validate an ingredient selection and fetch a shake recipe for it.
    ///
    /// # Errors
    /// [`PlannerError::Validation`] before any network call if fewer than two
    /// distinct ingredients are given; [`PlannerError::Generation`] if the
    /// provider call fails.
    pub async fn mix_shake<I, S>(&self, ingredients: I) -> Result<ShakeRecipe, PlannerError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let selection = ShakeSelection::new(ingredients)?;
        for name in selection.items() {
            if !self.ingredients.contains(name) {
                debug!(ingredient = %name, "ingredient not in catalog");
            }
        }

        let request = self.composer.compose_shake_request(&selection, self.region());
        let ticket = self.shake.lock().start();
        let outcome = self.recipes.fetch_recipe(&request).await;
        self.shake.lock().resolve(ticket, outcome.clone());
        Ok(outcome?)
    }

    /// Clear the meal plan and targets. The shake slot is untouched.
    pub fn reset(&self) {
        *self.targets.lock() = None;
        self.plan.lock().clear();
        debug!("planner reset");
    }

    /// Targets from the last meal-plan call, unless reset.
    #[must_use]
    pub fn targets(&self) -> Option<MacroTargets> {
        *self.targets.lock()
    }

    /// Snapshot of the meal-plan slot.
    #[must_use]
    pub fn plan_state(&self) -> RequestState<DailyPlan> {
        self.plan.lock().clone()
    }

    /// Snapshot of the shake slot.
    #[must_use]
    pub fn shake_state(&self) -> RequestState<ShakeRecipe> {
        self.shake.lock().clone()
    }

    /// The last meal-plan failure, if the slot holds one.
    #[must_use]
    pub fn plan_failure(&self) -> Option<GenerationFailure> {
        self.plan.lock().failure().cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use macroplan_core::types::{ActivityLevel, Gender, Goal, Meat};
    use std::collections::BTreeSet;

    fn offline() -> Planner {
        Planner::new(LlmClient::none(), RegionCatalog::builtin())
    }

    #[test]
    fn region_defaults_to_local() {
        assert_eq!(offline().region(), Region::Local);
    }

    #[test]
    fn same_region_is_a_no_op() {
        let planner = offline();
        assert!(!planner.set_region(Region::Local));
        assert!(!planner.set_region(Region::Worldwide));
        assert_eq!(planner.region(), Region::Worldwide);
    }

    #[tokio::test]
    async fn invalid_profile_leaves_state_untouched() {
        let planner = offline();
        let profile = UserProfile {
            age: 7,
            ..UserProfile::default()
        };
        let err = planner.plan_meals(&profile).await.expect_err("too young");
        assert!(err.is_validation());
        assert!(planner.targets().is_none());
        assert!(matches!(planner.plan_state(), RequestState::Idle));
    }

    #[tokio::test]
    async fn failed_generation_keeps_targets_and_records_failure() {
        let planner = offline();
        let profile = UserProfile {
            meat_preferences: [Meat::Beef].into_iter().collect(),
            ..UserProfile::default()
        };
        let err = planner.plan_meals(&profile).await.expect_err("no backend");
        assert!(matches!(err, PlannerError::Generation(_)));
        assert!(planner.targets().is_some());
        assert!(planner.plan_failure().is_some());

        planner.reset();
        assert!(planner.targets().is_none());
        assert!(matches!(planner.plan_state(), RequestState::Idle));
    }

    #[tokio::test]
    async fn non_positive_targets_are_kept_unclamped() {
        let planner = offline();
        let profile = UserProfile {
            age: 100,
            height_cm: 100.0,
            weight_kg: 30.0,
            gender: Gender::Female,
            activity_level: ActivityLevel::Sedentary,
            goal: Goal::LoseWeight,
            meat_preferences: BTreeSet::new(),
        };
        assert!(profile.validate().is_ok());

        let err = planner.plan_meals(&profile).await.expect_err("no backend");
        assert!(matches!(err, PlannerError::Generation(_)));
        let targets = planner.targets().expect("targets stored before the call");
        assert!(targets.calories < 0.0);
        assert!(targets.fats < 0.0);
        assert!(targets.carbs < 0.0);
    }

    #[tokio::test]
    async fn single_ingredient_shake_is_rejected() {
        let planner = offline();
        let err = planner.mix_shake(["Banana", " Banana "]).await.expect_err("one distinct");
        assert!(err.is_validation());
        assert!(matches!(planner.shake_state(), RequestState::Idle));
    }
}
