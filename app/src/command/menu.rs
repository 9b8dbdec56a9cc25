use std::sync::Arc;

use parley_conversation::RestaurantSuggester;

use super::init_common_components;

/// Strategy for the name-then-menu chain.
#[derive(Debug, Clone, Copy)]
pub struct MenuStrategy;

impl super::CommandStrategy for MenuStrategy {
    type Input = String;

    async fn execute(&self, cuisine: Self::Input) -> anyhow::Result<()> {
        let common = init_common_components()?;
        let defaults = &common.config.agents.defaults;
        let suggester = RestaurantSuggester::new(Arc::clone(&common.generator), &defaults.model)
            .with_temperature(defaults.creative_temperature);

        let menu = suggester.name_with_menu(&cuisine).await?;

        println!("Restaurant Name: {}", menu.name);
        println!("\nMenu Items:");
        for item in menu.items() {
            println!("- {item}");
        }
        Ok(())
    }
}
