//! Shake ingredients: the pantry catalog offered to the user and the
//! validated selection handed to the shake flow.

use serde::{Deserialize, Serialize};

use crate::error::{MacroplanError, Result};

/// Minimum number of distinct ingredients the shake flow accepts.
pub const MIN_SHAKE_INGREDIENTS: usize = 2;

/// A named group of pantry items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientCategory {
    /// Category heading.
    pub name: String,
    /// Items in display order.
    pub items: Vec<String>,
}

/// The pantry offered by the shake generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientCatalog {
    /// Categories in display order.
    pub categories: Vec<IngredientCategory>,
}

impl IngredientCatalog {
    /// The built-in pantry.
    #[must_use]
    pub fn builtin() -> Self {
        let category = |name: &str, items: &[&str]| IngredientCategory {
            name: name.to_string(),
            items: items.iter().map(|s| (*s).to_string()).collect(),
        };
        Self {
            categories: vec![
                category(
                    "Liquid Base",
                    &[
                        "Water",
                        "Fresh Milk",
                        "King Coconut Water",
                        "Coconut Milk",
                        "Soy Milk",
                        "Iced Coffee",
                        "Almond Milk",
                    ],
                ),
                category(
                    "Protein Power",
                    &[
                        "Whey Protein",
                        "Yogurt / Curd",
                        "Peanuts",
                        "Cashews (Caju)",
                        "Egg Whites (Pasteurized)",
                        "Chickpeas",
                    ],
                ),
                category(
                    "Fruits & Veg",
                    &[
                        "Banana",
                        "Avocado",
                        "Papaya",
                        "Mango",
                        "Woodapple",
                        "Pineapple",
                        "Passion Fruit",
                        "Rambutan",
                        "Dates",
                    ],
                ),
                category(
                    "Flavor & Boosters",
                    &[
                        "Oats",
                        "Milo",
                        "Samaposha",
                        "Peanut Butter",
                        "Kithul Treacle",
                        "Honey",
                        "Chia Seeds",
                        "Cinnamon",
                        "Ginger",
                        "Cardamom",
                    ],
                ),
            ],
        }
    }

    /// Whether an item with this exact name is in the catalog.
    #[must_use]
    pub fn contains(&self, item: &str) -> bool {
        self.items().any(|i| i == item)
    }

    /// All items across categories, in display order.
    pub fn items(&self) -> impl Iterator<Item = &str> {
        self.categories
            .iter()
            .flat_map(|c| c.items.iter().map(String::as_str))
    }
}

impl Default for IngredientCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

/// A validated set of ingredient names for the shake flow.
///
/// Names are trimmed, blanks dropped, duplicates removed; first-selection
/// order is kept. Free-text names outside the catalog are allowed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShakeSelection {
    items: Vec<String>,
}

impl ShakeSelection {
    /// Build a selection.
    ///
    /// # Errors
    /// Returns [`MacroplanError::Validation`] if fewer than
    /// [`MIN_SHAKE_INGREDIENTS`] distinct names remain.
    pub fn new<I, S>(items: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut unique: Vec<String> = Vec::new();
        for item in items {
            let name = item.as_ref().trim();
            if !name.is_empty() && !unique.iter().any(|u| u == name) {
                unique.push(name.to_string());
            }
        }
        if unique.len() < MIN_SHAKE_INGREDIENTS {
            return Err(MacroplanError::validation(
                "ingredients",
                format!("please select at least {MIN_SHAKE_INGREDIENTS} ingredients"),
            ));
        }
        Ok(Self { items: unique })
    }

    /// The selected names.
    #[must_use]
    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// Number of selected names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Always false for a constructed selection.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
