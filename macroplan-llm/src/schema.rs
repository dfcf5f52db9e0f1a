//! Output schema descriptors: the compatibility contract with the provider.
//!
//! A [`Schema`] is sent with every request so the provider constrains its
//! output, and the same descriptor validates the returned document before
//! it is turned into a [`DailyPlan`](macroplan_core::DailyPlan) or
//! [`ShakeRecipe`](macroplan_core::ShakeRecipe).
//!
//! Two wire dialects are rendered from one descriptor: Gemini's OpenAPI
//! subset (upper-case type names, `propertyOrdering`) and plain JSON Schema
//! for OpenAI-compatible endpoints.

use serde_json::{Map, Value, json};

/// Primitive kinds used by the plan and shake documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaType {
    /// JSON object.
    Object,
    /// JSON array.
    Array,
    /// JSON string.
    String,
    /// JSON number (integer or float).
    Number,
}

impl SchemaType {
    fn name(self, dialect: SchemaDialect) -> &'static str {
        match (dialect, self) {
            (SchemaDialect::OpenApi, Self::Object) => "OBJECT",
            (SchemaDialect::OpenApi, Self::Array) => "ARRAY",
            (SchemaDialect::OpenApi, Self::String) => "STRING",
            (SchemaDialect::OpenApi, Self::Number) => "NUMBER",
            (SchemaDialect::JsonSchema, Self::Object) => "object",
            (SchemaDialect::JsonSchema, Self::Array) => "array",
            (SchemaDialect::JsonSchema, Self::String) => "string",
            (SchemaDialect::JsonSchema, Self::Number) => "number",
        }
    }
}

/// Wire rendering of a schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaDialect {
    /// Gemini `responseSchema` (OpenAPI 3.0 subset).
    OpenApi,
    /// JSON Schema, for `response_format.json_schema`.
    JsonSchema,
}

/// A node of the output schema.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    /// Node kind.
    pub kind: SchemaType,
    /// Hint for the provider.
    pub description: Option<&'static str>,
    /// Object properties in declaration order.
    pub properties: Vec<(&'static str, Schema)>,
    /// Object properties that must be present and non-null.
    pub required: Vec<&'static str>,
    /// Array element schema.
    pub items: Option<Box<Schema>>,
}

impl Schema {
    fn leaf(kind: SchemaType) -> Self {
        Self {
            kind,
            description: None,
            properties: Vec::new(),
            required: Vec::new(),
            items: None,
        }
    }

    /// A string node.
    #[must_use]
    pub fn string() -> Self {
        Self::leaf(SchemaType::String)
    }

    /// A number node.
    #[must_use]
    pub fn number() -> Self {
        Self::leaf(SchemaType::Number)
    }

    /// An array node.
    #[must_use]
    pub fn array(items: Schema) -> Self {
        Self {
            items: Some(Box::new(items)),
            ..Self::leaf(SchemaType::Array)
        }
    }

    /// An object node.
    #[must_use]
    pub fn object(properties: Vec<(&'static str, Schema)>, required: &[&'static str]) -> Self {
        Self {
            properties,
            required: required.to_vec(),
            ..Self::leaf(SchemaType::Object)
        }
    }

    /// Attach a description.
    #[must_use]
    pub fn describe(mut self, description: &'static str) -> Self {
        self.description = Some(description);
        self
    }

    /// Look up a direct property.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&Schema> {
        self.properties
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, schema)| schema)
    }

    /// Render for the wire.
    #[must_use]
    pub fn to_value(&self, dialect: SchemaDialect) -> Value {
        let mut node = Map::new();
        node.insert("type".into(), json!(self.kind.name(dialect)));
        if let Some(description) = self.description {
            node.insert("description".into(), json!(description));
        }
        if let Some(items) = &self.items {
            node.insert("items".into(), items.to_value(dialect));
        }
        if self.kind == SchemaType::Object {
            let properties: Map<String, Value> = self
                .properties
                .iter()
                .map(|(key, schema)| ((*key).to_string(), schema.to_value(dialect)))
                .collect();
            node.insert("properties".into(), Value::Object(properties));
            node.insert("required".into(), json!(self.required));
            if dialect == SchemaDialect::OpenApi {
                let ordering: Vec<&str> = self.properties.iter().map(|(key, _)| *key).collect();
                node.insert("propertyOrdering".into(), json!(ordering));
            }
        }
        Value::Object(node)
    }

    /// Check a document against this schema.
    ///
    /// Extra properties are tolerated; missing or null required properties
    /// and type mismatches are not.
    ///
    /// # Errors
    /// Returns a message naming the JSON path of the first violation.
    pub fn validate(&self, value: &Value) -> Result<(), String> {
        self.validate_at(value, "$")
    }

    fn validate_at(&self, value: &Value, path: &str) -> Result<(), String> {
        match self.kind {
            SchemaType::String if value.is_string() => Ok(()),
            SchemaType::Number if value.is_number() => Ok(()),
            SchemaType::Array => {
                let elements = value
                    .as_array()
                    .ok_or_else(|| mismatch(path, "array", value))?;
                if let Some(items) = &self.items {
                    for (i, element) in elements.iter().enumerate() {
                        items.validate_at(element, &format!("{path}[{i}]"))?;
                    }
                }
                Ok(())
            }
            SchemaType::Object => {
                let fields = value
                    .as_object()
                    .ok_or_else(|| mismatch(path, "object", value))?;
                for key in &self.required {
                    if fields.get(*key).is_none_or(Value::is_null) {
                        return Err(format!("{path}.{key}: required field missing"));
                    }
                }
                for (key, schema) in &self.properties {
                    match fields.get(*key) {
                        None | Some(Value::Null) => {}
                        Some(field) => schema.validate_at(field, &format!("{path}.{key}"))?,
                    }
                }
                Ok(())
            }
            SchemaType::String => Err(mismatch(path, "string", value)),
            SchemaType::Number => Err(mismatch(path, "number", value)),
        }
    }
}

fn mismatch(path: &str, expected: &str, found: &Value) -> String {
    let found = match found {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    };
    format!("{path}: expected {expected}, found {found}")
}

// ---------------------------------------------------------------------------
// Built-in schemas
// ---------------------------------------------------------------------------

/// Schema of a single food item.
#[must_use]
pub fn food_item_schema() -> Schema {
    Schema::object(
        vec![
            ("name", Schema::string().describe("Name of the food item")),
            ("portion", Schema::string().describe("Portion size (e.g., 1 cup, 100g)")),
            ("calories", Schema::number().describe("Approximate calories")),
            ("protein", Schema::number().describe("Approximate protein in grams")),
            (
                "cost",
                Schema::string().describe(
                    "Estimated cost with currency symbol (e.g. 'Rs. 200' or '$1.50')",
                ),
            ),
        ],
        &["name", "portion", "calories", "protein", "cost"],
    )
}

/// Schema of a meal.
#[must_use]
pub fn meal_schema() -> Schema {
    Schema::object(
        vec![
            ("name", Schema::string().describe("Meal name (Breakfast, Lunch, Dinner, Snack)")),
            ("items", Schema::array(food_item_schema())),
            ("totalCalories", Schema::number()),
            ("totalProtein", Schema::number()),
            (
                "notes",
                Schema::string().describe("Cooking tip or preparation method (optional)"),
            ),
        ],
        &["name", "items", "totalCalories", "totalProtein"],
    )
}

/// Schema of the plan summary.
#[must_use]
pub fn summary_schema() -> Schema {
    Schema::object(
        vec![
            ("totalCalories", Schema::number()),
            ("totalProtein", Schema::number()),
            (
                "estimatedDailyCost",
                Schema::string().describe("Total daily cost with currency"),
            ),
            ("tips", Schema::array(Schema::string())),
        ],
        &["totalCalories", "totalProtein", "estimatedDailyCost", "tips"],
    )
}

/// Schema of a full daily plan.
#[must_use]
pub fn daily_plan_schema() -> Schema {
    Schema::object(
        vec![
            ("meals", Schema::array(meal_schema())),
            ("summary", summary_schema()),
        ],
        &["meals", "summary"],
    )
}

/// Schema of a shake recipe.
#[must_use]
pub fn shake_schema() -> Schema {
    Schema::object(
        vec![
            ("name", Schema::string()),
            (
                "ingredients",
                Schema::array(Schema::object(
                    vec![("name", Schema::string()), ("amount", Schema::string())],
                    &["name", "amount"],
                )),
            ),
            ("instructions", Schema::array(Schema::string())),
            (
                "macros",
                Schema::object(
                    vec![
                        ("calories", Schema::number()),
                        ("protein", Schema::number()),
                        ("carbs", Schema::number()),
                        ("fats", Schema::number()),
                    ],
                    &["calories", "protein", "carbs", "fats"],
                ),
            ),
            ("tip", Schema::string()),
        ],
        &["name", "ingredients", "instructions", "macros", "tip"],
    )
}
