//! Restaurant naming prompt chains.
//!
//! These are single-shot generations that carry no conversation state.

use std::sync::Arc;

use parley_core::{GenerationError, GenerationOptions, LLMProvider};
use tracing::info;

use crate::answerer::resolve_model;

/// Sampling temperature for creative naming.
pub const CREATIVE_TEMPERATURE: f32 = 0.7;

/// A generated restaurant name and its menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestaurantMenu {
    pub name: String,
    pub menu_items: String,
}

impl RestaurantMenu {
    /// Split the menu text into individual items.
    ///
    /// Accepts comma separated or line separated lists and strips list
    /// markers such as `-`, `*` or `3.`.
    #[must_use]
    pub fn items(&self) -> Vec<String> {
        let separator = if self.menu_items.contains('\n') { '\n' } else { ',' };
        self.menu_items
            .split(separator)
            .map(strip_list_marker)
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect()
    }
}

fn strip_list_marker(line: &str) -> &str {
    let line = line.trim();
    let line = line.trim_start_matches(['-', '*', '•']).trim_start();
    let digits = line.bytes().take_while(u8::is_ascii_digit).count();
    if digits > 0 {
        let rest = &line[digits..];
        if let Some(stripped) = rest.strip_prefix('.').or_else(|| rest.strip_prefix(')')) {
            return stripped.trim();
        }
    }
    line
}

pub struct RestaurantSuggester {
    generator: Arc<dyn LLMProvider>,
    options: GenerationOptions,
}

impl RestaurantSuggester {
    /// A blank `model` uses the provider's default.
    pub fn new(generator: Arc<dyn LLMProvider>, model: impl Into<String>) -> Self {
        let model = resolve_model(generator.as_ref(), model.into());
        Self {
            generator,
            options: GenerationOptions::new(model, CREATIVE_TEMPERATURE),
        }
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.options.model
    }

    #[must_use]
    pub const fn with_temperature(mut self, temperature: f32) -> Self {
        self.options.temperature = temperature;
        self
    }

    /// Ask for five names fitting a cuisine and an atmosphere.
    pub async fn suggest_names(
        &self,
        cuisine: &str,
        atmosphere: &str,
    ) -> Result<String, GenerationError> {
        info!("Suggesting names for {cuisine} restaurant ({atmosphere})");
        self.complete(&naming_prompt(cuisine, atmosphere)).await
    }

    /// Generate one name, then a menu for that name.
    pub async fn name_with_menu(&self, cuisine: &str) -> Result<RestaurantMenu, GenerationError> {
        let name = self
            .complete(&format!(
                "Suggest one creative name for a restaurant that serves {cuisine} cuisine. Return only the name."
            ))
            .await?
            .trim()
            .trim_matches('"')
            .to_string();
        info!("Generated restaurant name: {name}");

        let menu_items = self
            .complete(&format!(
                "Suggest 10 menu items for a restaurant named: {name}."
            ))
            .await?;

        Ok(RestaurantMenu { name, menu_items })
    }

    async fn complete(&self, prompt: &str) -> Result<String, GenerationError> {
        let response = self.generator.generate(prompt, &self.options).await?;
        if response.content.trim().is_empty() {
            return Err(GenerationError::EmptyResponse);
        }
        Ok(response.content)
    }
}

fn naming_prompt(cuisine: &str, atmosphere: &str) -> String {
    format!(
        "You are a creative restaurant naming expert.
Generate 5 unique and catchy restaurant names for a {cuisine} restaurant.
The restaurant should have a {atmosphere} atmosphere.

Provide names that are:
- Memorable and easy to pronounce
- Relevant to the cuisine type
- Suitable for the atmosphere

Cuisine: {cuisine}
Atmosphere: {atmosphere}

Restaurant Names:"
    )
}
