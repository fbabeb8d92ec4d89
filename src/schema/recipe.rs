//! Generation output shapes: suggestion lists and full recipes.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{as_object, join_path, require_array, require_str, ValidationError};

/// One titled suggestion from the first generation stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeIdea {
    pub title: String,
    pub description: String,
}

impl RecipeIdea {
    fn from_value(value: &Value, path: &str) -> Result<Self, ValidationError> {
        let obj = as_object(value, path)?;
        Ok(Self {
            title: require_str(obj, "title", path)?,
            description: require_str(obj, "description", path)?,
        })
    }
}

/// The suggestions payload: exactly three titled ideas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestionList {
    pub suggestions: Vec<RecipeIdea>,
}

impl SuggestionList {
    /// Number of suggestions the first stage must produce.
    pub const EXPECTED: usize = 3;

    /// Parse and validate provider output as a suggestion list.
    ///
    /// The cardinality invariant is strict: fewer or more than three
    /// entries is a validation failure, not a truncation.
    pub fn from_value(value: &Value) -> Result<Self, ValidationError> {
        let obj = as_object(value, "")?;
        let items = require_array(obj, "suggestions", "")?;
        if items.len() != Self::EXPECTED {
            return Err(ValidationError::with_path(
                format!(
                    "must contain exactly {} entries, got {}",
                    Self::EXPECTED,
                    items.len()
                ),
                "suggestions",
            ));
        }
        let mut suggestions = Vec::with_capacity(items.len());
        for (i, item) in items.iter().enumerate() {
            suggestions.push(RecipeIdea::from_value(
                item,
                &format!("suggestions[{}]", i),
            )?);
        }
        Ok(Self { suggestions })
    }
}

/// A single line of a recipe's ingredient list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeIngredient {
    pub name: String,
    pub amount: String,
    pub unit: String,
}

impl RecipeIngredient {
    fn from_value(value: &Value, path: &str) -> Result<Self, ValidationError> {
        let obj = as_object(value, path)?;
        Ok(Self {
            name: require_str(obj, "name", path)?,
            amount: require_str(obj, "amount", path)?,
            unit: require_str(obj, "unit", path)?,
        })
    }
}

/// The complete recipe produced by the second generation stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FullRecipe {
    pub title: String,
    pub description: String,
    pub servings: f64,
    pub prep_time: String,
    pub cook_time: String,
    pub ingredients: Vec<RecipeIngredient>,
    pub instructions: Vec<String>,
    pub notes: String,
}

impl FullRecipe {
    /// Parse and validate provider output as a full recipe. All fields are
    /// required.
    pub fn from_value(value: &Value) -> Result<Self, ValidationError> {
        let obj = as_object(value, "")?;

        let servings = match obj.get("servings") {
            Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
            Some(_) => {
                return Err(ValidationError::with_path(
                    "must be a number",
                    join_path("", "servings"),
                ))
            }
            None => {
                return Err(ValidationError::with_path(
                    "is required",
                    join_path("", "servings"),
                ))
            }
        };

        let raw_ingredients = require_array(obj, "ingredients", "")?;
        let mut ingredients = Vec::with_capacity(raw_ingredients.len());
        for (i, item) in raw_ingredients.iter().enumerate() {
            ingredients.push(RecipeIngredient::from_value(
                item,
                &format!("ingredients[{}]", i),
            )?);
        }

        let raw_instructions = require_array(obj, "instructions", "")?;
        let mut instructions = Vec::with_capacity(raw_instructions.len());
        for (i, item) in raw_instructions.iter().enumerate() {
            match item {
                Value::String(s) => instructions.push(s.clone()),
                _ => {
                    return Err(ValidationError::with_path(
                        "must be a string",
                        format!("instructions[{}]", i),
                    ))
                }
            }
        }

        Ok(Self {
            title: require_str(obj, "title", "")?,
            description: require_str(obj, "description", "")?,
            servings,
            prep_time: require_str(obj, "prepTime", "")?,
            cook_time: require_str(obj, "cookTime", "")?,
            ingredients,
            instructions,
            notes: require_str(obj, "notes", "")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn three_suggestions() -> Value {
        json!({
            "suggestions": [
                {"title": "Lemon Tart", "description": "Bright and tangy."},
                {"title": "Crepes", "description": "Thin and delicate."},
                {"title": "Pound Cake", "description": "Dense and buttery."}
            ]
        })
    }

    fn full_recipe() -> Value {
        json!({
            "title": "Crepes",
            "description": "Thin French pancakes.",
            "servings": 4,
            "prepTime": "10 minutes",
            "cookTime": "20 minutes",
            "ingredients": [
                {"name": "flour", "amount": "1", "unit": "cup"},
                {"name": "egg", "amount": "2", "unit": "large"}
            ],
            "instructions": ["Whisk the batter.", "Cook on a hot pan."],
            "notes": "Rest the batter for 30 minutes."
        })
    }

    #[test]
    fn test_accepts_exactly_three_suggestions() {
        let list = SuggestionList::from_value(&three_suggestions()).unwrap();
        assert_eq!(list.suggestions.len(), 3);
        assert_eq!(list.suggestions[0].title, "Lemon Tart");
    }

    #[test]
    fn test_rejects_two_suggestions() {
        let mut value = three_suggestions();
        value["suggestions"].as_array_mut().unwrap().pop();
        let err = SuggestionList::from_value(&value).unwrap_err();
        assert!(err.message.contains("exactly 3"));
    }

    #[test]
    fn test_rejects_four_suggestions() {
        let mut value = three_suggestions();
        value["suggestions"]
            .as_array_mut()
            .unwrap()
            .push(json!({"title": "Extra", "description": "One too many."}));
        assert!(SuggestionList::from_value(&value).is_err());
    }

    #[test]
    fn test_rejects_suggestion_missing_description() {
        let mut value = three_suggestions();
        value["suggestions"][1]
            .as_object_mut()
            .unwrap()
            .remove("description");
        let err = SuggestionList::from_value(&value).unwrap_err();
        assert_eq!(err.path.as_deref(), Some("suggestions[1].description"));
    }

    #[test]
    fn test_parses_full_recipe() {
        let recipe = FullRecipe::from_value(&full_recipe()).unwrap();
        assert_eq!(recipe.servings, 4.0);
        assert_eq!(recipe.ingredients.len(), 2);
        assert_eq!(recipe.ingredients[1].unit, "large");
        assert_eq!(recipe.instructions.len(), 2);
    }

    #[test]
    fn test_rejects_recipe_missing_notes() {
        let mut value = full_recipe();
        value.as_object_mut().unwrap().remove("notes");
        let err = FullRecipe::from_value(&value).unwrap_err();
        assert_eq!(err.path.as_deref(), Some("notes"));
    }

    #[test]
    fn test_rejects_recipe_string_servings() {
        let mut value = full_recipe();
        value["servings"] = json!("four");
        let err = FullRecipe::from_value(&value).unwrap_err();
        assert!(err.message.contains("number"));
    }

    #[test]
    fn test_rejects_ingredient_missing_unit() {
        let mut value = full_recipe();
        value["ingredients"][0].as_object_mut().unwrap().remove("unit");
        let err = FullRecipe::from_value(&value).unwrap_err();
        assert_eq!(err.path.as_deref(), Some("ingredients[0].unit"));
    }

    #[test]
    fn test_full_recipe_camel_case_round_trip() {
        let recipe = FullRecipe::from_value(&full_recipe()).unwrap();
        let serialized = serde_json::to_value(&recipe).unwrap();
        assert!(serialized.get("prepTime").is_some());
        assert!(serialized.get("cookTime").is_some());
        assert_eq!(FullRecipe::from_value(&serialized).unwrap(), recipe);
    }
}
