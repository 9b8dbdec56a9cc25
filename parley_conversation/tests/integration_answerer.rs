//! Answerer behavior against in-process fake providers.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use parley_conversation::{
    AnswererConfig, AugmentedAnswerer, ConversationMemory, RestaurantSuggester,
};
use parley_core::{
    ChatMessage, ContextProvider, ContextSource, GenerationError, GenerationOptions,
    LLMProvider, LLMResponse, ProviderError,
};

/// Generation provider that records prompts and replies from a script.
#[derive(Default)]
struct ScriptedLlm {
    replies: Mutex<Vec<String>>,
    prompts: Mutex<Vec<String>>,
    temperatures: Mutex<Vec<f32>>,
    fail: bool,
}

impl ScriptedLlm {
    fn replying(replies: &[&str]) -> Self {
        Self {
            replies: Mutex::new(replies.iter().rev().map(|r| (*r).to_string()).collect()),
            ..Self::default()
        }
    }

    fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    fn prompts(&self) -> Vec<String> {
        self.prompts.lock().map(|p| p.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl LLMProvider for ScriptedLlm {
    async fn chat(
        &self,
        messages: &[ChatMessage],
        options: &GenerationOptions,
    ) -> Result<LLMResponse, ProviderError> {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.extend(messages.iter().map(|m| m.content.clone()));
        }
        if let Ok(mut temps) = self.temperatures.lock() {
            temps.push(options.temperature);
        }
        if self.fail {
            return Err(ProviderError::Status {
                status: 500,
                body: "upstream down".to_string(),
            });
        }
        let content = self
            .replies
            .lock()
            .ok()
            .and_then(|mut r| r.pop())
            .unwrap_or_else(|| "default reply".to_string());
        Ok(LLMResponse {
            content,
            usage: None,
        })
    }

    fn get_default_model(&self) -> &'static str {
        "scripted"
    }
}

struct StaticContext {
    source: ContextSource,
    result: Result<&'static str, &'static str>,
}

#[async_trait]
impl ContextProvider for StaticContext {
    fn source(&self) -> ContextSource {
        self.source
    }

    async fn fetch(&self, _query: &str) -> Result<String, ProviderError> {
        self.result
            .map(str::to_string)
            .map_err(|e| ProviderError::Request(e.to_string()))
    }
}

#[tokio::test]
async fn answers_and_records_turn() -> anyhow::Result<()> {
    let llm = Arc::new(ScriptedLlm::replying(&["Paris"]));
    let memory = ConversationMemory::shared(3);
    let answerer = AugmentedAnswerer::new(llm.clone(), memory.clone(), AnswererConfig::default());

    let answer = answerer.answer("Capital of France?").await?;

    assert_eq!(answer, "Paris");
    assert_eq!(llm.prompts(), vec!["Human: Capital of France?\nAI:".to_string()]);
    assert_eq!(memory.lock().await.render(), "Human: Capital of France?\nAI: Paris");
    Ok(())
}

#[tokio::test]
async fn later_prompts_carry_the_transcript() -> anyhow::Result<()> {
    let llm = Arc::new(ScriptedLlm::replying(&["Nice to meet you, John", "John"]));
    let memory = ConversationMemory::shared(5);
    let answerer = AugmentedAnswerer::new(llm.clone(), memory, AnswererConfig::default());

    answerer.answer("My name is John").await?;
    let answer = answerer.answer("What's my name?").await?;

    assert_eq!(answer, "John");
    let prompts = llm.prompts();
    assert_eq!(
        prompts[1],
        "Previous conversation:\nHuman: My name is John\nAI: Nice to meet you, John\n\nHuman: What's my name?\nAI:"
    );
    Ok(())
}

#[tokio::test]
async fn context_is_placed_between_transcript_and_question() -> anyhow::Result<()> {
    let llm = Arc::new(ScriptedLlm::replying(&["first", "330 metres"]));
    let memory = ConversationMemory::shared(2);
    let answerer = AugmentedAnswerer::new(llm.clone(), memory, AnswererConfig::default())
        .with_context_provider(Arc::new(StaticContext {
            source: ContextSource::Encyclopedia,
            result: Ok("Page: Eiffel Tower\nSummary: A lattice tower."),
        }));

    answerer.answer("hello").await?;
    answerer.answer("How tall is the Eiffel Tower?").await?;

    assert_eq!(answerer.source(), ContextSource::Encyclopedia);
    assert_eq!(
        llm.prompts()[1],
        "Previous conversation:\nHuman: hello\nAI: first\n\n\
         Based on this Wikipedia information: Page: Eiffel Tower\nSummary: A lattice tower.\n\n\
         Answer this question: How tall is the Eiffel Tower?"
    );
    Ok(())
}

#[tokio::test]
async fn context_failure_still_produces_an_answer() -> anyhow::Result<()> {
    let llm = Arc::new(ScriptedLlm::replying(&["generated text"]));
    let memory = ConversationMemory::shared(3);
    let answerer = AugmentedAnswerer::new(llm.clone(), memory.clone(), AnswererConfig::default())
        .with_context_provider(Arc::new(StaticContext {
            source: ContextSource::Search,
            result: Err("connection refused"),
        }));

    let answer = answerer.answer("x").await?;

    assert_eq!(answer, "generated text");
    assert_eq!(
        llm.prompts(),
        vec![
            "Based on this web search result: Error searching web: request failed: connection refused\n\n\
             Answer this question: x"
                .to_string()
        ]
    );

    let memory = memory.lock().await;
    assert_eq!(memory.len(), 1);
    let turn = memory.turns().next().map(|t| (t.question().to_string(), t.answer().to_string()));
    assert_eq!(turn, Some(("x".to_string(), "generated text".to_string())));
    Ok(())
}

#[tokio::test]
async fn generation_failure_propagates_without_recording() {
    let llm = Arc::new(ScriptedLlm::failing());
    let memory = ConversationMemory::shared(3);
    memory.lock().await.append("earlier", "turn");
    let answerer = AugmentedAnswerer::new(llm, memory.clone(), AnswererConfig::default())
        .with_context_provider(Arc::new(StaticContext {
            source: ContextSource::Search,
            result: Ok("sunny"),
        }));

    let result = answerer.answer("Weather?").await;

    assert!(matches!(
        result,
        Err(GenerationError::Provider(ProviderError::Status { status: 500, .. }))
    ));
    assert_eq!(memory.lock().await.render(), "Human: earlier\nAI: turn");
}

#[tokio::test]
async fn answerers_share_one_memory() -> anyhow::Result<()> {
    let memory = ConversationMemory::shared(2);
    let wiki = AugmentedAnswerer::new(
        Arc::new(ScriptedLlm::replying(&["a1"])),
        memory.clone(),
        AnswererConfig::default(),
    );
    let plain = AugmentedAnswerer::new(
        Arc::new(ScriptedLlm::replying(&["a2", "a3"])),
        memory.clone(),
        AnswererConfig::default(),
    );

    wiki.answer("q1").await?;
    plain.answer("q2").await?;
    plain.answer("q3").await?;

    assert_eq!(memory.lock().await.render(), "Human: q2\nAI: a2\nHuman: q3\nAI: a3");
    Ok(())
}

#[tokio::test]
async fn name_with_menu_chains_two_generations() -> anyhow::Result<()> {
    let llm = Arc::new(ScriptedLlm::replying(&[
        "  \"Shorshe House\"\n",
        "Shorshe Ilish, Kosha Mangsho, Mishti Doi",
    ]));
    let suggester = RestaurantSuggester::new(llm.clone(), "gpt-4o-mini");

    let menu = suggester.name_with_menu("bengali").await?;

    assert_eq!(menu.name, "Shorshe House");
    assert_eq!(menu.items().len(), 3);
    let prompts = llm.prompts();
    assert!(prompts[0].contains("serves bengali cuisine"));
    assert_eq!(prompts[1], "Suggest 10 menu items for a restaurant named: Shorshe House.");

    let temps = llm.temperatures.lock().map(|t| t.clone()).unwrap_or_default();
    assert!(temps.iter().all(|t| (t - 0.7).abs() < f32::EPSILON));
    Ok(())
}

#[test]
fn suggester_blank_model_uses_provider_default() {
    let llm: Arc<dyn LLMProvider> = Arc::new(ScriptedLlm::default());

    assert_eq!(RestaurantSuggester::new(llm.clone(), "").model(), "scripted");
    assert_eq!(RestaurantSuggester::new(llm, "gpt-4o").model(), "gpt-4o");
}
