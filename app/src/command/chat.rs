//! Memory-only conversation.

use parley_conversation::ConversationMemory;
use parley_core::ContextSource;
use tracing::info;
use uuid::Uuid;

use super::{init_common_components, print_history};

/// Input parameters for the Chat command strategy.
#[derive(Debug, Clone)]
pub struct ChatInput {
    /// Optional single message to send (non-interactive mode)
    pub message: Option<String>,
    /// Turns to remember; the configured window when absent
    pub window: Option<usize>,
    pub model: Option<String>,
}

/// Strategy for the `chat` command.
///
/// No context provider is consulted. The transcript of earlier turns is the
/// only thing carried into each prompt, and the remembered history is printed
/// when the conversation ends.
#[derive(Debug, Clone, Copy)]
pub struct ChatStrategy;

impl super::CommandStrategy for ChatStrategy {
    type Input = ChatInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let common = init_common_components()?;
        let window = input
            .window
            .unwrap_or(common.config.agents.defaults.memory_window);
        let memory = ConversationMemory::shared(window);
        let answerer = common.answerer(ContextSource::None, memory.clone(), input.model)?;

        let session_id = Uuid::now_v7();
        info!("Starting conversation {session_id} (window: {window})");

        if let Some(message) = input.message {
            println!("{}", answerer.answer(&message).await?);
        } else {
            println!("Conversation {session_id}");
            super::ask::interactive(&answerer, "Memory").await?;
        }

        print_history(&memory).await;
        Ok(())
    }
}
