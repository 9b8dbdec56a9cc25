use parley_config::Config;
use parley_core::util::mask_secret;

/// Strategy for displaying the resolved configuration.
///
/// Keys are masked; everything else is shown as loaded after the file,
/// `.env` and environment overlays.
#[derive(Debug, Clone, Copy)]
pub struct InfoStrategy;

impl super::CommandStrategy for InfoStrategy {
    type Input = ();

    async fn execute(&self, _input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load()?;

        println!("=== parley Configuration ===\n");

        println!("Config File:");
        println!("  Path: {}", Config::config_path()?.display());
        println!();

        println!("API Keys:");
        println!("  OpenAI: {}", mask_secret(&config.providers.openai.api_key));
        println!("  SerpAPI: {}", mask_secret(&config.providers.serpapi.api_key));
        if let Some(ref base_url) = config.providers.openai.base_url {
            println!("  OpenAI Base URL: {base_url}");
        }
        println!(
            "  Request Timeout: {}s",
            config.providers.request_timeout_secs
        );
        println!();

        let defaults = &config.agents.defaults;
        println!("Agent Defaults:");
        println!("  Model: {}", defaults.model);
        println!("  Temperature: {}", defaults.temperature);
        println!("  Creative Temperature: {}", defaults.creative_temperature);
        if let Some(max_tokens) = defaults.max_tokens {
            println!("  Max Tokens: {max_tokens}");
        }
        println!("  Memory Window: {} turns", defaults.memory_window);
        println!("  Context: {}", defaults.context);
        println!();

        let wiki = &config.providers.wikipedia;
        println!("Wikipedia:");
        println!("  Language: {}", wiki.language);
        println!("  Top K: {}", wiki.top_k);
        println!("  Preview Chars: {}", wiki.preview_chars);

        if !config.search_enabled() {
            println!("\nWeb search is disabled until a SerpAPI key is set.");
        }

        Ok(())
    }
}
