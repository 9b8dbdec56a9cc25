#![warn(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

//! Conversational answering on top of the provider traits.
//!
//! # Key Features
//! - Bounded FIFO memory of recent question/answer turns
//! - Answers augmented with web search or encyclopedia context
//! - Context failures degrade into prompt text instead of errors
//! - Restaurant naming prompt chains

mod answerer;
mod memory;
mod prompt;
mod restaurant;

pub use answerer::{AnswererConfig, AugmentedAnswerer};
pub use memory::{
    AI_LABEL, ConversationMemory, DEFAULT_CAPACITY, HUMAN_LABEL, SharedMemory, Turn,
};
pub use prompt::{FetchedContext, build_prompt};
pub use restaurant::{CREATIVE_TEMPERATURE, RestaurantMenu, RestaurantSuggester};
