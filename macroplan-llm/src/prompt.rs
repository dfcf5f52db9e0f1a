//! Prompt templates and the composer that fills them.
//!
//! Every prompt is a testable artifact: the templates are constants, the
//! regional content comes from a [`RegionCatalog`], and composition is a
//! pure function of its inputs.

use std::fmt::Write as _;

use macroplan_core::{MacroTargets, RegionCatalog, ShakeSelection, UserProfile};
use macroplan_core::types::Region;

use crate::schema::{daily_plan_schema, shake_schema};
use crate::types::{ProviderRequest, RequestKind};

/// System role for the meal-plan flow.
pub const NUTRITIONIST_SYSTEM: &str =
    "You are a pragmatic nutritionist. You balance budget with local availability and preferences.";

/// Meal-plan instruction prompt.
pub const MEAL_PLAN_USER: &str = r"Create a highly specific, budget-friendly 1-day meal plan.

User Profile:
- Region: {region_name}
- Goal: {goal}
- Daily Targets: {calories} kcal, {protein}g Protein, {carbs}g Carbs, {fats}g Fats
- Allowed Meats: {allowed_meats}

CONTEXT: {context_label}.
1. **Carbs**: {carb_staples}.
2. **Proteins** (Prioritize User Selection):
{meat_guidance}   - Staples: {protein_staples}.
3. **Vegetables**: {vegetables}.

FORBIDDEN:
{forbidden}

REQUIREMENTS:
- {cost_instruction}
- Calculate exact macros to match target within +/- 5%.
- Provide 3 main meals + 1-2 snacks.

Output strictly valid JSON matching the schema.";

/// Shake instruction prompt.
pub const SHAKE_USER: &str = r"Create a delicious and effective protein shake recipe using ONLY a subset of the ingredients provided below.
Goal: Maximize protein and taste.
{shake_context}

Available Ingredients: {ingredients}

Instructions:
1. Pick the best combination from the provided list.
2. Add 'Water' or 'Ice' freely if needed.
3. Create a recipe with portions.
4. Estimate macros.

Output JSON.";

/// Label used when no meat is selected.
pub const VEGETARIAN_LABEL: &str = "Vegetarian/Basic Only";

/// Template interpolation for prompts.
///
/// Replaces `{key}` with the corresponding value in a single pass, so values
/// that themselves contain braces are never re-expanded. Unknown keys are
/// left as-is.
#[must_use]
pub fn render_template(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let value = after.find('}').and_then(|close| {
            let key = &after[..close];
            vars.iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| (*v, close))
        });
        match value {
            Some((v, close)) => {
                out.push_str(v);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Integer rendering of a target for presentation.
#[allow(clippy::cast_possible_truncation)]
fn rounded(value: f64) -> String {
    (value.round() as i64).to_string()
}

/// Builds provider requests from a profile, targets and region.
#[derive(Debug, Clone, Default)]
pub struct PromptComposer {
    catalog: RegionCatalog,
}

impl PromptComposer {
    /// Composer over a region catalog.
    #[must_use]
    pub fn new(catalog: RegionCatalog) -> Self {
        Self { catalog }
    }

    /// The catalog regional content is drawn from.
    #[must_use]
    pub fn catalog(&self) -> &RegionCatalog {
        &self.catalog
    }

    /// Compose the meal-plan request: 3 main meals plus 1-2 snacks.
    #[must_use]
    pub fn compose_meal_plan_request(
        &self,
        profile: &UserProfile,
        targets: &MacroTargets,
        region: Region,
    ) -> ProviderRequest {
        let ctx = self.catalog.get(region);

        let allowed_meats = if profile.is_vegetarian() {
            VEGETARIAN_LABEL.to_string()
        } else {
            profile
                .meat_preferences
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        };

        // BTreeSet iteration follows Meat's declaration order.
        let mut meat_guidance = String::new();
        for meat in &profile.meat_preferences {
            if let Some(line) = ctx.guidance_for(*meat) {
                let _ = writeln!(meat_guidance, "   - **{meat}**: {line}");
            }
        }

        let goal = profile.goal.to_string();
        let calories = rounded(targets.calories);
        let protein = rounded(targets.protein);
        let carbs = rounded(targets.carbs);
        let fats = rounded(targets.fats);
        let carb_staples = ctx.carb_staples.join(", ");
        let protein_staples = ctx.protein_staples.join(", ");
        let vegetables = ctx.vegetables.join(", ");
        let forbidden = ctx.forbidden_sentence();

        let prompt = render_template(
            MEAL_PLAN_USER,
            &[
                ("region_name", ctx.display_name.as_str()),
                ("goal", goal.as_str()),
                ("calories", calories.as_str()),
                ("protein", protein.as_str()),
                ("carbs", carbs.as_str()),
                ("fats", fats.as_str()),
                ("allowed_meats", allowed_meats.as_str()),
                ("context_label", ctx.context_label.as_str()),
                ("carb_staples", carb_staples.as_str()),
                ("meat_guidance", meat_guidance.as_str()),
                ("protein_staples", protein_staples.as_str()),
                ("vegetables", vegetables.as_str()),
                ("forbidden", forbidden.as_str()),
                ("cost_instruction", ctx.cost_instruction.as_str()),
            ],
        );

        ProviderRequest {
            kind: RequestKind::MealPlan,
            system: Some(NUTRITIONIST_SYSTEM.to_string()),
            prompt,
            schema: daily_plan_schema(),
        }
    }

    /// Compose the shake request over a subset of the selected ingredients.
    #[must_use]
    pub fn compose_shake_request(&self, selection: &ShakeSelection, region: Region) -> ProviderRequest {
        let ctx = self.catalog.get(region);
        let ingredients = selection.items().join(", ");
        let prompt = render_template(
            SHAKE_USER,
            &[
                ("shake_context", ctx.shake_context.as_str()),
                ("ingredients", ingredients.as_str()),
            ],
        );

        ProviderRequest {
            kind: RequestKind::Shake,
            system: None,
            prompt,
            schema: shake_schema(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use macroplan_core::compute_targets;
    use macroplan_core::types::Meat;
    use std::collections::BTreeSet;

    fn profile_with(meats: &[Meat]) -> UserProfile {
        UserProfile {
            meat_preferences: meats.iter().copied().collect::<BTreeSet<_>>(),
            ..UserProfile::default()
        }
    }

    fn meal_prompt(meats: &[Meat], region: Region) -> String {
        let profile = profile_with(meats);
        let targets = compute_targets(&profile);
        PromptComposer::default()
            .compose_meal_plan_request(&profile, &targets, region)
            .prompt
    }

    #[test]
    fn template_rendering_works() {
        let rendered = render_template(
            "Hello {name}, you are a {role}.",
            &[("name", "Nimal"), ("role", "nutritionist")],
        );
        assert_eq!(rendered, "Hello Nimal, you are a nutritionist.");
    }

    #[test]
    fn template_handles_missing_vars() {
        let rendered = render_template("Hello {name}, {unknown}.", &[("name", "Nimal")]);
        assert_eq!(rendered, "Hello Nimal, {unknown}.");
    }

    #[test]
    fn template_values_are_not_re_expanded() {
        let rendered = render_template("{a} and {b}", &[("a", "{b}"), ("b", "x")]);
        assert_eq!(rendered, "{b} and x");
    }

    #[test]
    fn template_tolerates_unclosed_brace() {
        assert_eq!(render_template("oops {name", &[("name", "x")]), "oops {name");
    }

    #[test]
    fn zero_meats_yields_only_vegetarian_staples() {
        let prompt = meal_prompt(&[], Region::Local);
        assert!(prompt.contains("Allowed Meats: Vegetarian/Basic Only"));
        assert!(prompt.contains("Staples: Soya Meat (TVP), Dhal (Parippu)"));
        for meat in Meat::all() {
            assert!(!prompt.contains(&format!("**{meat}**")), "unexpected {meat} line");
        }
    }

    #[test]
    fn all_meats_appear_in_stable_order() {
        let prompt = meal_prompt(&[Meat::Pork, Meat::Beef, Meat::Fish, Meat::Chicken], Region::Worldwide);
        let positions: Vec<usize> = ["**Chicken**", "**Fish**", "**Beef**", "**Pork**"]
            .iter()
            .map(|needle| prompt.find(needle).expect("meat line present"))
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{positions:?}");
        assert!(prompt.contains("Allowed Meats: Chicken, Fish, Beef, Pork"));
    }

    #[test]
    fn unselected_meats_are_omitted() {
        let prompt = meal_prompt(&[Meat::Fish], Region::Local);
        assert!(prompt.contains("**Fish**: **Local Tuna (Kelawalla/Balaya)**"));
        assert!(!prompt.contains("**Chicken**"));
        assert!(!prompt.contains("Black Pork Curry"));
    }

    #[test]
    fn targets_are_rounded_integers() {
        let prompt = meal_prompt(&[], Region::Local);
        // 2468.375 kcal, 65 g protein, 397.82 g carbs, 68.57 g fats
        assert!(prompt.contains("Daily Targets: 2468 kcal, 65g Protein, 398g Carbs, 69g Fats"));
        assert!(prompt.contains("Goal: Maintain Weight"));
    }

    #[test]
    fn region_switch_changes_currency_and_forbidden_list() {
        let local = meal_prompt(&[Meat::Chicken], Region::Local);
        let world = meal_prompt(&[Meat::Chicken], Region::Worldwide);
        assert!(local.contains("Sri Lankan Rupees (LKR)"));
        assert!(local.contains("No Salmon"));
        assert!(world.contains("USD ($)"));
        assert!(world.contains("No Wagyu beef"));
        assert!(!world.contains("LKR"));
    }

    #[test]
    fn meal_request_carries_system_role_and_schema() {
        let profile = UserProfile::default();
        let request = PromptComposer::default().compose_meal_plan_request(
            &profile,
            &compute_targets(&profile),
            Region::Local,
        );
        assert_eq!(request.kind, RequestKind::MealPlan);
        assert_eq!(request.system.as_deref(), Some(NUTRITIONIST_SYSTEM));
        assert_eq!(request.schema, daily_plan_schema());
        assert!(request.prompt.contains("Provide 3 main meals + 1-2 snacks."));
        assert!(!request.prompt.contains('{'), "unrendered placeholder");
    }

    #[test]
    fn shake_request_lists_ingredients_without_system_role() {
        let selection = ShakeSelection::new(["Banana", "Whey Protein", "Fresh Milk"]).expect("selection");
        let request = PromptComposer::default().compose_shake_request(&selection, Region::Local);
        assert_eq!(request.kind, RequestKind::Shake);
        assert!(request.system.is_none());
        assert!(request.prompt.contains("Available Ingredients: Banana, Whey Protein, Fresh Milk"));
        assert!(request.prompt.contains("Add 'Water' or 'Ice' freely"));
        assert!(request.prompt.contains("Samaposha"));
        assert_eq!(request.schema, shake_schema());
    }

    #[test]
    fn composition_is_deterministic() {
        let a = meal_prompt(&[Meat::Beef, Meat::Chicken], Region::Worldwide);
        let b = meal_prompt(&[Meat::Chicken, Meat::Beef], Region::Worldwide);
        assert_eq!(a, b);
    }
}
