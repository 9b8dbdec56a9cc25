//! Static strategy pattern for CLI commands.
//!
//! Each command is a separate strategy type with its own input type, so the
//! dispatch in `main` is resolved at compile time.

use std::sync::Arc;
use std::time::Duration;

use parley_config::Config;
use parley_conversation::{AnswererConfig, AugmentedAnswerer, SharedMemory};
use parley_core::{ConfigurationError, ContextProvider, ContextSource, LLMProvider};
use parley_providers::{OpenAiProvider, SerpApiSearch, WikipediaLookup, http_client};
use reqwest::Client;
use tracing::info;

use crate::console;

mod ask;
mod calc;
mod chat;
mod demo;
mod info;
mod init;
mod menu;
mod suggest;
mod version;

pub use ask::{AskInput, AskStrategy};
pub use calc::CalcStrategy;
pub use chat::{ChatInput, ChatStrategy};
pub use demo::DemoStrategy;
pub use info::InfoStrategy;
pub use init::InitStrategy;
pub use menu::MenuStrategy;
pub use suggest::{SuggestInput, SuggestStrategy};
pub use version::VersionStrategy;

/// Core trait defining the contract for all command strategies.
pub trait CommandStrategy: Send + Sync + 'static {
    /// The input type this strategy accepts.
    type Input;

    /// Execute the command with the given input.
    async fn execute(&self, input: Self::Input) -> anyhow::Result<()>;
}

/// Components shared by every command that talks to the providers.
pub struct CommonComponents {
    pub config: Config,
    pub client: Client,
    pub generator: Arc<dyn LLMProvider>,
}

/// Load configuration and build the HTTP client and generation provider.
///
/// Fails when the generation key is missing, since no answering path works
/// without it.
pub fn init_common_components() -> anyhow::Result<CommonComponents> {
    let config = Config::load()?;
    let api_key = config.openai_api_key()?.to_string();

    let client = http_client(Duration::from_secs(config.providers.request_timeout_secs))?;

    let mut provider = OpenAiProvider::new(api_key).with_client(client.clone());
    if let Some(base_url) = &config.providers.openai.base_url {
        info!("Using OpenAI-compatible endpoint: {base_url}");
        provider = provider.with_base_url(base_url.clone());
    }

    Ok(CommonComponents {
        config,
        client,
        generator: Arc::new(provider),
    })
}

impl CommonComponents {
    /// Build the context provider for `source`.
    ///
    /// Only the search path needs an extra credential; its absence is a
    /// configuration error for that path alone.
    pub fn context_provider(
        &self,
        source: ContextSource,
    ) -> Result<Option<Arc<dyn ContextProvider>>, ConfigurationError> {
        match source {
            ContextSource::None => Ok(None),
            ContextSource::Search => {
                let key = self.config.serpapi_api_key()?.to_string();
                let search = SerpApiSearch::new(key).with_client(self.client.clone());
                Ok(Some(Arc::new(search)))
            }
            ContextSource::Encyclopedia => {
                let wiki = &self.config.providers.wikipedia;
                let lookup = WikipediaLookup::new(&wiki.language)
                    .with_client(self.client.clone())
                    .with_top_k(wiki.top_k)
                    .with_preview_chars(wiki.preview_chars);
                Ok(Some(Arc::new(lookup)))
            }
        }
    }

    pub fn answerer_config(&self, model: Option<String>) -> AnswererConfig {
        let defaults = &self.config.agents.defaults;
        let mut config = AnswererConfig::default()
            .with_model(model.unwrap_or_else(|| defaults.model.clone()))
            .with_temperature(defaults.temperature);
        config.options.max_tokens = defaults.max_tokens;
        config
    }

    /// Build an answerer for `source` writing into `memory`.
    pub fn answerer(
        &self,
        source: ContextSource,
        memory: SharedMemory,
        model: Option<String>,
    ) -> Result<AugmentedAnswerer, ConfigurationError> {
        let answerer =
            AugmentedAnswerer::new(self.generator.clone(), memory, self.answerer_config(model));
        Ok(match self.context_provider(source)? {
            Some(provider) => answerer.with_context_provider(provider),
            None => answerer,
        })
    }
}

/// Print the remembered turns between rules.
pub async fn print_history(memory: &SharedMemory) {
    let rendered = memory.lock().await.render();
    println!("\n{}", console::rule(50));
    println!("CONVERSATION HISTORY:");
    if rendered.is_empty() {
        println!("No conversation history yet.");
    } else {
        println!("{rendered}");
    }
    println!("{}", console::rule(50));
}
