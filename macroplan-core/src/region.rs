//! Region catalog: currency, availability and forbidden-food tables.
//!
//! The tables are data, not branches: the prompt composer looks a region up
//! here and never matches on [`Region`] itself. The built-in catalog covers
//! Sri Lanka (local) and a worldwide/Western profile; a TOML file with the
//! same shape replaces it wholesale.
//!
//! ```toml
//! [local]
//! display_name = "Sri Lanka"
//! context_label = "Sri Lanka (Budget Friendly)"
//! cost_instruction = "Estimate costs in Sri Lankan Rupees (LKR)."
//! forbidden = ["Salmon", "Quinoa"]
//! carb_staples = ["Red Rice"]
//! protein_staples = ["Dhal (Parippu)"]
//! vegetables = ["Murunga"]
//! shake_context = "Context: Sri Lanka."
//!
//! [local.meat_guidance]
//! chicken = "Curry or Devilled (include bone-in cuts)."
//!
//! [worldwide]
//! # ...
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{MacroplanError, Result};
use crate::types::{Meat, Region};

/// Prompt-facing context for one region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionProfile {
    /// Name shown to the provider (`"Sri Lanka"`).
    pub display_name: String,
    /// Context heading for the guidelines block.
    pub context_label: String,
    /// Sentence telling the provider which currency to estimate costs in.
    pub cost_instruction: String,
    /// Ingredients that must not appear in a plan.
    pub forbidden: Vec<String>,
    /// Affordable carbohydrate staples.
    pub carb_staples: Vec<String>,
    /// Vegetarian protein staples, always included.
    pub protein_staples: Vec<String>,
    /// Locally available vegetables.
    pub vegetables: Vec<String>,
    /// Preparation guideline per meat.
    #[serde(default)]
    pub meat_guidance: BTreeMap<Meat, String>,
    /// One-line context for the shake flow.
    pub shake_context: String,
}

impl RegionProfile {
    /// Forbidden list as a sentence: `"No A, B, or C."`.
    #[must_use]
    pub fn forbidden_sentence(&self) -> String {
        match self.forbidden.as_slice() {
            [] => "None.".to_string(),
            [only] => format!("No {only}."),
            [init @ .., last] => format!("No {}, or {last}.", init.join(", ")),
        }
    }

    /// Guidance for a meat, if the table has one.
    #[must_use]
    pub fn guidance_for(&self, meat: Meat) -> Option<&str> {
        self.meat_guidance.get(&meat).map(String::as_str)
    }
}

/// Region → profile lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionCatalog {
    local: RegionProfile,
    worldwide: RegionProfile,
}

impl RegionCatalog {
    /// The compiled-in tables.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            local: sri_lanka(),
            worldwide: worldwide(),
        }
    }

    /// Load a catalog from a TOML string. Both regions must be present.
    ///
    /// # Errors
    /// Returns [`MacroplanError::Config`] if the TOML is invalid or incomplete.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        toml::from_str(toml_str).map_err(|e| MacroplanError::Config(e.to_string()))
    }

    /// Load a catalog from a TOML file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let catalog = Self::from_toml(&content)?;
        tracing::info!(path = %path.display(), "loaded region catalog");
        Ok(catalog)
    }

    /// Profile for a region.
    #[must_use]
    pub fn get(&self, region: Region) -> &RegionProfile {
        match region {
            Region::Local => &self.local,
            Region::Worldwide => &self.worldwide,
        }
    }
}

impl Default for RegionCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

// ---------------------------------------------------------------------------
// Built-in tables
// ---------------------------------------------------------------------------

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

fn guidance(lines: [(Meat, &str); 4]) -> BTreeMap<Meat, String> {
    lines
        .into_iter()
        .map(|(meat, line)| (meat, line.to_string()))
        .collect()
}

fn sri_lanka() -> RegionProfile {
    RegionProfile {
        display_name: "Sri Lanka".into(),
        context_label: "Sri Lanka (Budget Friendly)".into(),
        cost_instruction: "Estimate costs in Sri Lankan Rupees (LKR).".into(),
        forbidden: strings(&[
            "Salmon",
            "Imported Premium Fish Steaks",
            "Broccoli",
            "Olive Oil",
            "Quinoa",
            "Asparagus",
            "Cheese blocks (Cheddar/Mozzarella)",
            "foreign berries",
        ]),
        carb_staples: strings(&[
            "White Rice (Samba/Nadu)",
            "Red Rice",
            "String Hoppers",
            "Roast Paan",
            "Manioc",
            "Sweet Potato",
        ]),
        protein_staples: strings(&[
            "Soya Meat (TVP)",
            "Dhal (Parippu)",
            "Eggs",
            "Yogurt (Highland/Curd)",
        ]),
        vegetables: strings(&["Murunga", "Beans", "Pumpkin", "Gotukola", "Kankun", "Brinjal"]),
        meat_guidance: guidance([
            (Meat::Chicken, "Curry or Devilled (include bone-in cuts)."),
            (
                Meat::Fish,
                "**Local Tuna (Kelawalla/Balaya)** is recommended. Also Sprats, Salaya.",
            ),
            (Meat::Beef, "Curry or stir-fry (affordable cuts)."),
            (Meat::Pork, "Black Pork Curry."),
        ]),
        shake_context: "Context: Sri Lanka (use local brand names like Highland, Munchee, \
                        Samaposha, Milo if applicable)."
            .into(),
    }
}

fn worldwide() -> RegionProfile {
    RegionProfile {
        display_name: "Worldwide".into(),
        context_label: "Worldwide / General Western Diet (Budget Friendly)".into(),
        cost_instruction: "Estimate costs in USD ($).".into(),
        forbidden: strings(&[
            "Wagyu beef",
            "Truffles",
            "extremely expensive organic specialty brands",
        ]),
        carb_staples: strings(&["Rice", "Potatoes", "Oats", "Whole Wheat Bread", "Pasta"]),
        protein_staples: strings(&[
            "Canned Beans",
            "Lentils",
            "Eggs",
            "Greek Yogurt",
            "Cottage Cheese",
            "Whey Protein",
        ]),
        vegetables: strings(&["Frozen Veggie Mixes", "Spinach", "Broccoli (frozen)", "Carrots"]),
        meat_guidance: guidance([
            (Meat::Chicken, "Breast, Thighs, or Rotisserie."),
            (Meat::Fish, "Canned Tuna, Tilapia, Cod, Frozen Fillets."),
            (Meat::Beef, "Lean Ground Beef, Flank Steak."),
            (Meat::Pork, "Loin Chops, Tenderloin."),
        ]),
        shake_context: "Context: Worldwide/General (use standard ingredients like Oats, \
                        Peanut Butter, Frozen Fruit)."
            .into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_covers_every_meat_in_both_regions() {
        let catalog = RegionCatalog::builtin();
        for region in [Region::Local, Region::Worldwide] {
            let profile = catalog.get(region);
            for meat in Meat::all() {
                assert!(profile.guidance_for(*meat).is_some(), "{region}: {meat}");
            }
        }
    }

    #[test]
    fn regions_differ_in_currency_and_forbidden_list() {
        let catalog = RegionCatalog::builtin();
        let local = catalog.get(Region::Local);
        let world = catalog.get(Region::Worldwide);
        assert!(local.cost_instruction.contains("LKR"));
        assert!(world.cost_instruction.contains("USD"));
        assert_ne!(local.forbidden, world.forbidden);
    }

    #[test]
    fn forbidden_sentence_joins_with_or() {
        let world = RegionCatalog::builtin().get(Region::Worldwide).clone();
        assert_eq!(
            world.forbidden_sentence(),
            "No Wagyu beef, Truffles, or extremely expensive organic specialty brands."
        );

        let single = RegionProfile {
            forbidden: vec!["Caviar".into()],
            ..world.clone()
        };
        assert_eq!(single.forbidden_sentence(), "No Caviar.");

        let none = RegionProfile {
            forbidden: vec![],
            ..world
        };
        assert_eq!(none.forbidden_sentence(), "None.");
    }

    #[test]
    fn catalog_round_trips_through_toml() {
        let catalog = RegionCatalog::builtin();
        let text = toml::to_string(&catalog).expect("serialize catalog");
        let parsed = RegionCatalog::from_toml(&text).expect("parse catalog");
        assert_eq!(parsed, catalog);
    }

    #[test]
    fn catalog_missing_a_region_is_rejected() {
        let text = toml::to_string(&RegionCatalog::builtin()).expect("serialize catalog");
        let local_only = text
            .split("[worldwide]")
            .next()
            .expect("local section");
        let err = RegionCatalog::from_toml(local_only).expect_err("worldwide missing");
        assert!(matches!(err, MacroplanError::Config(_)));
    }

    #[test]
    fn catalog_loads_from_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("regions.toml");
        let mut catalog = RegionCatalog::builtin();
        catalog.worldwide.display_name = "Canada".into();
        std::fs::write(&path, toml::to_string(&catalog).expect("serialize")).expect("write");

        let loaded = RegionCatalog::from_file(&path).expect("load");
        assert_eq!(loaded.get(Region::Worldwide).display_name, "Canada");
    }
}
