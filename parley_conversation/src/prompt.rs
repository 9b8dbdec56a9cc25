//! Prompt assembly for augmented answers.

use parley_core::ContextSource;

/// Context fetched for a single question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedContext {
    pub source: ContextSource,
    pub text: String,
}

/// Combine transcript, fetched context and question into one prompt.
///
/// Sections appear in that order and are separated by a blank line; empty
/// sections are left out.
#[must_use]
pub fn build_prompt(transcript: &str, context: Option<&FetchedContext>, question: &str) -> String {
    let mut sections = Vec::with_capacity(3);

    if !transcript.is_empty() {
        sections.push(format!("Previous conversation:\n{transcript}"));
    }

    match context {
        Some(ctx) => {
            sections.push(format!("Based on this {}: {}", ctx.source.label(), ctx.text));
            sections.push(format!("Answer this question: {question}"));
        }
        None => sections.push(format!("Human: {question}\nAI:")),
    }

    sections.join("\n\n")
}
