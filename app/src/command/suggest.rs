use std::sync::Arc;

use parley_conversation::RestaurantSuggester;

use super::init_common_components;
use crate::console;

#[derive(Debug, Clone)]
pub struct SuggestInput {
    /// `(cuisine, atmosphere)` for a single run; interactive when absent
    pub preset: Option<(String, String)>,
}

/// Strategy for restaurant name suggestions.
#[derive(Debug, Clone, Copy)]
pub struct SuggestStrategy;

impl super::CommandStrategy for SuggestStrategy {
    type Input = SuggestInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let common = init_common_components()?;
        let defaults = &common.config.agents.defaults;
        let suggester = RestaurantSuggester::new(Arc::clone(&common.generator), &defaults.model)
            .with_temperature(defaults.creative_temperature);

        if let Some((cuisine, atmosphere)) = input.preset {
            println!("{}", suggester.suggest_names(&cuisine, &atmosphere).await?);
            return Ok(());
        }

        println!("Restaurant Name Suggester");
        println!("{}", console::rule(40));

        loop {
            let Some(cuisine) = console::read_line("\nEnter cuisine type (or 'quit' to exit): ")?
            else {
                break;
            };
            if console::is_exit(&cuisine) {
                break;
            }
            let Some(atmosphere) = console::read_line("Enter atmosphere: ")? else {
                break;
            };

            if cuisine.is_empty() || atmosphere.is_empty() {
                println!("Please enter both cuisine type and atmosphere.");
                continue;
            }

            println!("\nGenerating names for {cuisine} restaurant with {atmosphere} atmosphere...");
            match suggester.suggest_names(&cuisine, &atmosphere).await {
                Ok(names) => println!("\n{names}"),
                Err(e) => println!("\nError: {e}"),
            }
        }

        Ok(())
    }
}
