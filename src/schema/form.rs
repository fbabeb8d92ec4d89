//! Form input: the user's ingredients and preferences.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{as_object, join_path, require_array, require_non_empty_str, ValidationError};

/// Validated user preferences driving both generation stages.
///
/// Wire format uses camelCase field names (`dishType`, `cookingTime`,
/// `dietaryRestrictions`); `dietaryRestrictions` is omitted entirely when
/// absent so that an input without restrictions and an input with an empty
/// restrictions object serialize differently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormInput {
    pub ingredients: Vec<String>,
    pub dish_type: String,
    pub taste: String,
    pub cooking_time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dietary_restrictions: Option<String>,
}

impl FormInput {
    /// Parse and validate an untyped payload as form input.
    ///
    /// Required fields must be present, of the right type and non-empty;
    /// `ingredients` must contain at least one entry.
    pub fn from_value(value: &Value) -> Result<Self, ValidationError> {
        let obj = as_object(value, "")?;

        let raw_ingredients = require_array(obj, "ingredients", "")?;
        if raw_ingredients.is_empty() {
            return Err(ValidationError::with_path(
                "at least one ingredient is required",
                "ingredients",
            ));
        }
        let mut ingredients = Vec::with_capacity(raw_ingredients.len());
        for (i, item) in raw_ingredients.iter().enumerate() {
            match item {
                Value::String(s) => ingredients.push(s.clone()),
                _ => {
                    return Err(ValidationError::with_path(
                        "must be a string",
                        format!("ingredients[{}]", i),
                    ))
                }
            }
        }

        let dish_type = require_non_empty_str(obj, "dishType", "")?;
        let taste = require_non_empty_str(obj, "taste", "")?;
        let cooking_time = require_non_empty_str(obj, "cookingTime", "")?;

        let dietary_restrictions = match obj.get("dietaryRestrictions") {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(_) => {
                return Err(ValidationError::with_path(
                    "must be a string",
                    join_path("", "dietaryRestrictions"),
                ))
            }
        };

        Ok(Self {
            ingredients,
            dish_type,
            taste,
            cooking_time,
            dietary_restrictions,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_input() -> Value {
        json!({
            "ingredients": ["egg", "flour"],
            "dishType": "dessert",
            "taste": "sweet",
            "cookingTime": "30-minutes"
        })
    }

    #[test]
    fn test_parses_valid_input() {
        let input = FormInput::from_value(&valid_input()).unwrap();
        assert_eq!(input.ingredients, vec!["egg", "flour"]);
        assert_eq!(input.dish_type, "dessert");
        assert!(input.dietary_restrictions.is_none());
    }

    #[test]
    fn test_missing_dish_type_rejected() {
        let mut value = valid_input();
        value.as_object_mut().unwrap().remove("dishType");
        let err = FormInput::from_value(&value).unwrap_err();
        assert_eq!(err.path.as_deref(), Some("dishType"));
        assert!(err.message.contains("required"));
    }

    #[test]
    fn test_empty_ingredients_rejected() {
        let mut value = valid_input();
        value["ingredients"] = json!([]);
        let err = FormInput::from_value(&value).unwrap_err();
        assert_eq!(err.path.as_deref(), Some("ingredients"));
    }

    #[test]
    fn test_non_string_ingredient_rejected() {
        let mut value = valid_input();
        value["ingredients"] = json!(["egg", 42]);
        let err = FormInput::from_value(&value).unwrap_err();
        assert_eq!(err.path.as_deref(), Some("ingredients[1]"));
    }

    #[test]
    fn test_empty_taste_rejected() {
        let mut value = valid_input();
        value["taste"] = json!("");
        let err = FormInput::from_value(&value).unwrap_err();
        assert!(err.to_string().contains("taste"));
    }

    #[test]
    fn test_null_dietary_restrictions_treated_as_absent() {
        let mut value = valid_input();
        value["dietaryRestrictions"] = Value::Null;
        let input = FormInput::from_value(&value).unwrap();
        assert!(input.dietary_restrictions.is_none());
    }

    #[test]
    fn test_non_object_rejected() {
        let err = FormInput::from_value(&json!("not an object")).unwrap_err();
        assert!(err.path.is_none());
    }

    #[test]
    fn test_dietary_restrictions_omitted_when_absent() {
        let input = FormInput::from_value(&valid_input()).unwrap();
        let serialized = serde_json::to_value(&input).unwrap();
        assert!(serialized.get("dietaryRestrictions").is_none());
    }
}
