use parley_config::{Config, OPENAI_API_KEY, SERPAPI_API_KEY};

/// Strategy for initializing the configuration.
///
/// Creates `~/parley/config.json` from the template. An existing file is
/// left untouched and reported as an error.
#[derive(Debug, Clone, Copy)]
pub struct InitStrategy;

impl super::CommandStrategy for InitStrategy {
    type Input = ();

    async fn execute(&self, _input: Self::Input) -> anyhow::Result<()> {
        let path = Config::create_config()?;
        println!("Config file created at: {}", path.display());
        println!("Next steps:");
        println!("  1. Add your OpenAI API key (or set {OPENAI_API_KEY})");
        println!("  2. Optionally add a SerpAPI key for web search (or set {SERPAPI_API_KEY})");
        println!("  3. Run 'parley info' to check the result");
        Ok(())
    }
}
