//! Prompt Golden Test Set.
//!
//! A curated set of profile→prompt expectations checking that composed
//! requests carry the targets, regional context and meat guidance the
//! provider needs, and nothing they must not carry.
//!
//! Run with `cargo test -p macroplan-llm --test prompt_golden`. No network.

use std::collections::BTreeSet;

use macroplan_core::types::{ActivityLevel, Gender, Goal, Meat, Region};
use macroplan_core::{ShakeSelection, UserProfile, compute_targets};
use macroplan_llm::prompt::{self, PromptComposer};

/// A golden case for meal-plan composition.
struct GoldenCase {
    /// Human-readable name for the test case.
    name: &'static str,
    profile: UserProfile,
    region: Region,
    /// Strings that MUST appear in the composed prompt.
    prompt_must_contain: Vec<&'static str>,
    /// Strings that MUST NOT appear in the composed prompt.
    prompt_must_not_contain: Vec<&'static str>,
}

fn profile(
    age: u32,
    height_cm: f64,
    weight_kg: f64,
    gender: Gender,
    activity_level: ActivityLevel,
    goal: Goal,
    meats: &[Meat],
) -> UserProfile {
    UserProfile {
        age,
        height_cm,
        weight_kg,
        gender,
        activity_level,
        goal,
        meat_preferences: meats.iter().copied().collect::<BTreeSet<_>>(),
    }
}

fn golden_cases() -> Vec<GoldenCase> {
    vec![
        // ---------------------------------------------------------------
        // 1. Default profile, local market
        // ---------------------------------------------------------------
        GoldenCase {
            name: "default_profile_local",
            profile: UserProfile::default(),
            region: Region::Local,
            prompt_must_contain: vec![
                "Region: Sri Lanka",
                "Goal: Maintain Weight",
                "Daily Targets: 2468 kcal, 65g Protein, 398g Carbs, 69g Fats",
                "Allowed Meats: Chicken, Fish",
                "**Chicken**: Curry or Devilled",
                "**Fish**: **Local Tuna (Kelawalla/Balaya)**",
                "Estimate costs in Sri Lankan Rupees (LKR).",
            ],
            prompt_must_not_contain: vec!["**Beef**", "**Pork**", "USD", "{"],
        },
        // ---------------------------------------------------------------
        // 2. Vegetarian, worldwide
        // ---------------------------------------------------------------
        GoldenCase {
            name: "vegetarian_worldwide",
            profile: profile(40, 160.0, 55.0, Gender::Female, ActivityLevel::Sedentary, Goal::Maintain, &[]),
            region: Region::Worldwide,
            prompt_must_contain: vec![
                "Allowed Meats: Vegetarian/Basic Only",
                "Staples: Canned Beans, Lentils, Eggs, Greek Yogurt, Cottage Cheese, Whey Protein.",
                "No Wagyu beef, Truffles, or extremely expensive organic specialty brands.",
                "Estimate costs in USD ($).",
            ],
            prompt_must_not_contain: vec!["**Chicken**", "**Fish**", "**Beef**", "**Pork**", "LKR"],
        },
        // ---------------------------------------------------------------
        // 3. Muscle gain, every meat, worldwide
        // ---------------------------------------------------------------
        GoldenCase {
            name: "muscle_gain_all_meats_worldwide",
            profile: profile(
                30,
                180.0,
                80.0,
                Gender::Male,
                ActivityLevel::Active,
                Goal::GainMuscle,
                &[Meat::Chicken, Meat::Fish, Meat::Beef, Meat::Pork],
            ),
            region: Region::Worldwide,
            prompt_must_contain: vec![
                "Goal: Gain Muscle",
                "Daily Targets: 3371 kcal, 160g Protein, 472g Carbs, 94g Fats",
                "**Beef**: Lean Ground Beef, Flank Steak.",
                "**Pork**: Loin Chops, Tenderloin.",
                "Carbs**: Rice, Potatoes, Oats, Whole Wheat Bread, Pasta.",
            ],
            prompt_must_not_contain: vec!["Vegetarian/Basic Only", "Kelawalla"],
        },
        // ---------------------------------------------------------------
        // 4. Weight loss, pork only, local market
        // ---------------------------------------------------------------
        GoldenCase {
            name: "weight_loss_pork_local",
            profile: profile(30, 165.0, 60.0, Gender::Female, ActivityLevel::Light, Goal::LoseWeight, &[Meat::Pork]),
            region: Region::Local,
            prompt_must_contain: vec![
                "Goal: Lose Weight",
                "1315 kcal, 96g Protein",
                "**Pork**: Black Pork Curry.",
                "Murunga, Beans, Pumpkin, Gotukola, Kankun, Brinjal",
                "No Salmon, Imported Premium Fish Steaks",
            ],
            prompt_must_not_contain: vec!["**Chicken**", "Tenderloin"],
        },
    ]
}

#[test]
fn golden_prompts_compose_expected_content() {
    let composer = PromptComposer::default();
    for case in golden_cases() {
        let targets = compute_targets(&case.profile);
        let request = composer.compose_meal_plan_request(&case.profile, &targets, case.region);
        let rendered = &request.prompt;

        for needle in &case.prompt_must_contain {
            assert!(
                rendered.contains(needle),
                "Golden case '{}': composed prompt must contain '{}' but doesn't.\nRendered:\n{}",
                case.name,
                needle,
                rendered
            );
        }
        for needle in &case.prompt_must_not_contain {
            assert!(
                !rendered.contains(needle),
                "Golden case '{}': composed prompt must NOT contain '{}' but does.\nRendered:\n{}",
                case.name,
                needle,
                rendered
            );
        }
    }
}

#[test]
fn golden_set_has_minimum_coverage() {
    let cases = golden_cases();
    assert!(cases.len() >= 4, "Golden set must have at least 4 cases, got {}", cases.len());
    for region in [Region::Local, Region::Worldwide] {
        assert!(cases.iter().any(|c| c.region == region), "no case for {region}");
    }
}

#[test]
fn macro_math_is_region_independent() {
    let composer = PromptComposer::default();
    let profile = UserProfile::default();
    let targets = compute_targets(&profile);
    let line = |region| {
        composer
            .compose_meal_plan_request(&profile, &targets, region)
            .prompt
            .lines()
            .find(|l| l.contains("Daily Targets"))
            .map(str::to_owned)
    };
    assert_eq!(line(Region::Local), line(Region::Worldwide));
}

#[test]
fn user_prompts_have_json_output_instruction() {
    for (name, template) in [("meal_plan", prompt::MEAL_PLAN_USER), ("shake", prompt::SHAKE_USER)] {
        assert!(template.contains("JSON"), "User prompt '{name}' must instruct the provider to return JSON");
    }
}

#[test]
fn system_prompt_establishes_role() {
    assert!(prompt::NUTRITIONIST_SYSTEM.starts_with("You are"));
    assert!(prompt::NUTRITIONIST_SYSTEM.contains("budget"));
}

#[test]
fn shake_prompt_golden() {
    let composer = PromptComposer::default();
    let selection = ShakeSelection::new(["Oats", "Peanut Butter", "Water"]).expect("selection");

    let world = composer.compose_shake_request(&selection, Region::Worldwide).prompt;
    assert!(world.contains("using ONLY a subset of the ingredients"));
    assert!(world.contains("Available Ingredients: Oats, Peanut Butter, Water"));
    assert!(world.contains("Context: Worldwide/General"));

    let local = composer.compose_shake_request(&selection, Region::Local).prompt;
    assert!(local.contains("Highland, Munchee"));
    assert!(!local.contains('{'));
}
