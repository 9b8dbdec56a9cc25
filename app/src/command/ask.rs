//! Question answering with optional search or Wikipedia context.

use parley_conversation::{AugmentedAnswerer, ConversationMemory};
use parley_core::ContextSource;
use tracing::info;

use super::init_common_components;
use crate::console;

#[derive(Debug, Clone)]
pub struct AskInput {
    /// Context provider override; the configured default when absent
    pub context: Option<ContextSource>,
    /// Single question (non-interactive mode)
    pub message: Option<String>,
    pub model: Option<String>,
}

/// Strategy for the `ask` command.
///
/// Every invocation starts with an empty memory, so follow-up questions in
/// interactive mode see earlier turns but separate runs do not.
#[derive(Debug, Clone, Copy)]
pub struct AskStrategy;

impl super::CommandStrategy for AskStrategy {
    type Input = AskInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let common = init_common_components()?;
        let source = input
            .context
            .unwrap_or(common.config.agents.defaults.context);
        let memory = ConversationMemory::shared(common.config.agents.defaults.memory_window);
        let answerer = common.answerer(source, memory, input.model)?;

        info!("Answering with context source: {source}");

        if let Some(question) = input.message {
            println!("{}", answerer.answer(&question).await?);
            return Ok(());
        }

        interactive(&answerer, &source_title(source)).await
    }
}

pub(super) fn source_title(source: ContextSource) -> String {
    match source {
        ContextSource::None => "Memory".to_string(),
        ContextSource::Search => "Web search".to_string(),
        ContextSource::Encyclopedia => "Wikipedia".to_string(),
    }
}

/// Read questions until an exit word or end of input.
///
/// Per-question failures are printed and the loop continues.
pub(super) async fn interactive(answerer: &AugmentedAnswerer, title: &str) -> anyhow::Result<()> {
    println!("\nInteractive {title} mode");
    println!("Type 'quit' to return");
    println!("{}", "-".repeat(40));

    loop {
        let Some(question) = console::read_line("\nYour question: ")? else {
            break;
        };
        if console::is_exit(&question) {
            break;
        }
        if question.is_empty() {
            continue;
        }

        match answerer.answer(&question).await {
            Ok(answer) => println!("\nAnswer: {answer}"),
            Err(e) => println!("\nError: {e}"),
        }
    }

    Ok(())
}
