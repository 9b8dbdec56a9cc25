#![deny(
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

//! HTTP clients for the generation, search and encyclopedia services.

mod http;
mod openai;
mod serpapi;
mod wikipedia;

pub use http::{DEFAULT_TIMEOUT_SECS, http_client};
pub use openai::{OPENAI_BASE_URL, OpenAiProvider};
pub use serpapi::{NO_RESULT, SERPAPI_BASE_URL, SearchOutcome, SerpApiSearch, WeatherReport};
pub use wikipedia::{DEFAULT_PREVIEW_CHARS, DEFAULT_TOP_K, WikipediaLookup};
