//! Google Gemini generateContent driver.
//!
//! Both stages use JSON mode: `generationConfig.responseMimeType` is set to
//! `application/json` and a `responseSchema` constrains the output shape,
//! so the model returns a single JSON document in
//! `candidates[0].content.parts[0].text`. The API key travels as a `?key=`
//! query parameter, not in headers.

use async_trait::async_trait;
use serde_json::{json, Value};

use super::GenerationProvider;
use crate::config::GeminiConfig;
use crate::error::Error;
use crate::schema::FormInput;
use crate::Result;

/// Gemini generateContent client for both generation stages.
pub struct GeminiProvider {
    http_client: reqwest::Client,
    config: GeminiConfig,
}

impl GeminiProvider {
    pub fn new(config: GeminiConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::generation(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self {
            http_client,
            config,
        })
    }

    /// Create a provider from environment configuration.
    pub fn from_env() -> Result<Self> {
        Self::new(GeminiConfig::from_env()?)
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    fn preference_block(input: &FormInput) -> String {
        format!(
            "Ingredients available: {}\nDish type: {}\nTaste preference: {}\nCooking time: {}\nDietary restrictions: {}",
            input.ingredients.join(", "),
            input.dish_type,
            input.taste,
            input.cooking_time,
            input.dietary_restrictions.as_deref().unwrap_or("None"),
        )
    }

    fn suggestion_prompt(input: &FormInput) -> String {
        format!(
            "You are an expert chef. Based on the following preferences, generate 3 unique recipe suggestions.\n\n{}\n\nGenerate 3 recipe suggestions with titles and brief descriptions (2-3 sentences each). Return a JSON object with a \"suggestions\" array containing exactly 3 objects with \"title\" and \"description\" fields.",
            Self::preference_block(input)
        )
    }

    fn recipe_prompt(input: &FormInput, selected_title: &str) -> String {
        format!(
            "You are an expert chef. Create a detailed recipe for \"{}\".\n\nOriginal preferences:\n{}\n\nGenerate a complete recipe with:\n- Recipe title\n- Description\n- Number of servings\n- Prep time\n- Cook time\n- List of ingredients (with amounts and units)\n- Step-by-step instructions\n- Cooking notes and tips\n\nReturn a JSON object with fields: title, description, servings, prepTime, cookTime, ingredients (array with name, amount, unit), instructions (array of strings), notes.",
            selected_title,
            Self::preference_block(input)
        )
    }

    fn suggestion_schema() -> Value {
        json!({
            "type": "object",
            "properties": {
                "suggestions": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "title": { "type": "string" },
                            "description": { "type": "string" }
                        },
                        "required": ["title", "description"]
                    },
                    "minItems": 3,
                    "maxItems": 3
                }
            },
            "required": ["suggestions"]
        })
    }

    fn recipe_schema() -> Value {
        json!({
            "type": "object",
            "properties": {
                "title": { "type": "string" },
                "description": { "type": "string" },
                "servings": { "type": "number" },
                "prepTime": { "type": "string" },
                "cookTime": { "type": "string" },
                "ingredients": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "name": { "type": "string" },
                            "amount": { "type": "string" },
                            "unit": { "type": "string" }
                        },
                        "required": ["name", "amount", "unit"]
                    }
                },
                "instructions": {
                    "type": "array",
                    "items": { "type": "string" }
                },
                "notes": { "type": "string" }
            },
            "required": [
                "title", "description", "servings", "prepTime", "cookTime",
                "ingredients", "instructions", "notes"
            ]
        })
    }

    fn build_body(prompt: &str, response_schema: Value) -> Value {
        json!({
            "contents": [{ "role": "user", "parts": [{ "text": prompt }] }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": response_schema
            }
        })
    }

    /// Extract the generated JSON document from a generateContent response.
    fn extract_json(body: &Value) -> Result<Value> {
        let text = body
            .pointer("/candidates/0/content/parts/0/text")
            .and_then(|v| v.as_str())
            .ok_or_else(|| Error::generation("response contained no generated text"))?;
        serde_json::from_str(text)
            .map_err(|e| Error::generation(format!("generated text is not valid JSON: {}", e)))
    }

    async fn generate(&self, prompt: &str, response_schema: Value) -> Result<Value> {
        let body = Self::build_body(prompt, response_schema);
        tracing::debug!(model = %self.config.model, "invoking generation provider");

        let response = self
            .http_client
            .post(self.endpoint())
            .query(&[("key", self.config.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::generation(format!("request failed: {}", e)))?;

        let status = response.status();
        let response_body: Value = response
            .json()
            .await
            .map_err(|e| Error::generation(format!("failed to read response: {}", e)))?;

        if !status.is_success() {
            let message = response_body
                .pointer("/error/message")
                .and_then(|m| m.as_str())
                .unwrap_or("unknown provider error");
            return Err(Error::generation(format!(
                "provider returned HTTP {}: {}",
                status, message
            )));
        }

        Self::extract_json(&response_body)
    }
}

#[async_trait]
impl GenerationProvider for GeminiProvider {
    async fn suggest(&self, input: &FormInput) -> Result<Value> {
        self.generate(&Self::suggestion_prompt(input), Self::suggestion_schema())
            .await
    }

    async fn full_recipe(&self, input: &FormInput, selected_title: &str) -> Result<Value> {
        self.generate(
            &Self::recipe_prompt(input, selected_title),
            Self::recipe_schema(),
        )
        .await
    }

    fn name(&self) -> &'static str {
        "gemini"
    }
}
