//! Interactive menu over every agent.
//!
//! The memory, search and Wikipedia agents write into one shared memory, so a
//! fact given to one is visible to the others on the next question.

use parley_config::SERPAPI_API_KEY;
use parley_conversation::{AugmentedAnswerer, ConversationMemory, SharedMemory};
use parley_core::ContextSource;
use tracing::warn;

use super::ask::{interactive, source_title};
use super::{CommonComponents, init_common_components, print_history};
use crate::console;

const PREVIEW_CHARS: usize = 200;

const ENCYCLOPEDIA_SAMPLES: [&str; 3] = [
    "Tell me about artificial intelligence",
    "What is the Eiffel Tower?",
    "Explain quantum computing",
];

const SEARCH_SAMPLES: [&str; 3] = [
    "Current weather in New York",
    "Latest news about AI",
    "Stock price of Tesla today",
];

const MEMORY_SAMPLES: [&str; 4] = [
    "My name is Alice and I work as a software engineer",
    "What's my name?",
    "What do I do for work?",
    "Can you remember our conversation?",
];

#[derive(Debug, Clone, Copy)]
pub struct DemoStrategy;

impl super::CommandStrategy for DemoStrategy {
    type Input = ();

    async fn execute(&self, _input: Self::Input) -> anyhow::Result<()> {
        let common = init_common_components()?;
        if !common.config.search_enabled() {
            warn!("{SERPAPI_API_KEY} not set, web search is disabled");
            println!("{SERPAPI_API_KEY} not found - the search agent will not work");
            println!("You can still use the Wikipedia and memory agents");
        }

        let memory = ConversationMemory::shared(common.config.agents.defaults.memory_window);

        loop {
            display_menu();
            let Some(input) = console::read_line("\nSelect an option (1-7): ")? else {
                break;
            };

            match MenuChoice::parse(&input) {
                Some(MenuChoice::Agent(source)) => run_agent(&common, source, &memory).await?,
                Some(MenuChoice::ShowMemory) => print_history(&memory).await,
                Some(MenuChoice::RunSamples) => {
                    println!("\nTesting all agents...");
                    run_samples(&common, &memory).await;
                    println!("\nAll tests completed!");
                }
                Some(MenuChoice::Exit) => break,
                Some(MenuChoice::ClearMemory) => {
                    memory.lock().await.clear();
                    println!("\nMemory cleared.");
                }
                None => println!("\nInvalid choice. Please select 1-7."),
            }
        }

        println!("\nGoodbye!");
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuChoice {
    Agent(ContextSource),
    ShowMemory,
    RunSamples,
    Exit,
    ClearMemory,
}

impl MenuChoice {
    fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Self::Agent(ContextSource::Encyclopedia)),
            "2" => Some(Self::Agent(ContextSource::Search)),
            "3" => Some(Self::Agent(ContextSource::None)),
            "4" => Some(Self::ShowMemory),
            "5" => Some(Self::RunSamples),
            "6" => Some(Self::Exit),
            "7" => Some(Self::ClearMemory),
            _ => None,
        }
    }
}

/// First `PREVIEW_CHARS` characters of a sample answer, always marked as cut.
fn sample_preview(answer: &str) -> String {
    let head: String = answer.chars().take(PREVIEW_CHARS).collect();
    format!("{head}...")
}

fn display_menu() {
    println!("\n{}", console::rule(60));
    println!("parley - Interactive Demo");
    println!("{}", console::rule(60));
    println!("1. Wikipedia Agent - Ask factual questions");
    println!("2. Search Agent - Search current web information");
    println!("3. Memory Agent - Have a conversation with memory");
    println!("4. Show Memory Buffer");
    println!("5. Test All Agents");
    println!("6. Exit");
    println!("7. Clear Memory Buffer");
    println!("{}", "-".repeat(60));
}

fn build(
    common: &CommonComponents,
    source: ContextSource,
    memory: &SharedMemory,
) -> Option<AugmentedAnswerer> {
    match common.answerer(source, memory.clone(), None) {
        Ok(answerer) => Some(answerer),
        Err(e) => {
            println!("\nError: {e}");
            None
        }
    }
}

async fn run_agent(
    common: &CommonComponents,
    source: ContextSource,
    memory: &SharedMemory,
) -> anyhow::Result<()> {
    if let Some(answerer) = build(common, source, memory) {
        interactive(&answerer, &source_title(source)).await?;
    }
    Ok(())
}

async fn run_samples(common: &CommonComponents, memory: &SharedMemory) {
    let batches: [(ContextSource, &[&str], bool); 3] = [
        (ContextSource::Encyclopedia, &ENCYCLOPEDIA_SAMPLES, true),
        (ContextSource::Search, &SEARCH_SAMPLES, true),
        (ContextSource::None, &MEMORY_SAMPLES, false),
    ];

    for (source, questions, preview) in batches {
        println!("\nTesting {} agent...", source_title(source));
        let Some(answerer) = build(common, source, memory) else {
            continue;
        };

        for (i, question) in questions.iter().enumerate() {
            println!("\n{}. Q: {question}", i + 1);
            match answerer.answer(question).await {
                Ok(answer) if preview => {
                    println!("   A: {}", sample_preview(&answer));
                }
                Ok(answer) => println!("   A: {answer}"),
                Err(e) => println!("   Error: {e}"),
            }
        }
    }
}
