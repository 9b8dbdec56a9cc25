//! Web search through SerpAPI.
//!
//! Responses are deserialized into explicit types. A weather answer box is
//! validated against [`WeatherReport`]; anything that does not match falls
//! back to the plain text fields of the response.

use std::fmt;

use async_trait::async_trait;
use parley_core::{ContextProvider, ContextSource, ProviderError};
use reqwest::Client;
use serde::de::{self, Deserializer};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::http::{endpoint, read_json, request_error};

pub const SERPAPI_BASE_URL: &str = "https://serpapi.com";

/// Text returned when a response has nothing usable.
pub const NO_RESULT: &str = "No good search result found";

const WEATHER_RESULT: &str = "weather_result";
const MISSING: &str = "N/A";

/// A `weather_result` answer box.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WeatherReport {
    #[serde(rename = "type")]
    pub kind: String,
    pub location: String,
    #[serde(deserialize_with = "string_or_number")]
    pub temperature: String,
    #[serde(default, deserialize_with = "optional_string_or_number")]
    pub unit: Option<String>,
    #[serde(default)]
    pub weather: Option<String>,
    #[serde(default, deserialize_with = "optional_string_or_number")]
    pub humidity: Option<String>,
    #[serde(default)]
    pub wind: Option<String>,
    #[serde(default, deserialize_with = "optional_string_or_number")]
    pub precipitation: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
}

impl WeatherReport {
    /// Validate an answer box; `None` when it is not a well-formed weather result.
    #[must_use]
    pub fn from_answer_box(answer_box: &Value) -> Option<Self> {
        if answer_box.get("type").and_then(Value::as_str) != Some(WEATHER_RESULT) {
            return None;
        }
        match serde_json::from_value::<Self>(answer_box.clone()) {
            Ok(report) => Some(report),
            Err(e) => {
                debug!("Weather answer box did not match schema: {e}");
                None
            }
        }
    }

    fn unit_symbol(&self) -> char {
        self.unit
            .as_deref()
            .and_then(|u| u.chars().next())
            .unwrap_or('F')
    }
}

impl fmt::Display for WeatherReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let or_missing = |v: &Option<String>| v.clone().unwrap_or_else(|| MISSING.to_string());
        write!(
            f,
            "Weather in {}: {} at {}°{}. Humidity: {}, Wind: {}, Precipitation: {} ({})",
            self.location,
            or_missing(&self.weather),
            self.temperature,
            self.unit_symbol(),
            or_missing(&self.humidity),
            or_missing(&self.wind),
            or_missing(&self.precipitation),
            or_missing(&self.date),
        )
    }
}

fn value_to_string<E: de::Error>(value: Value) -> Result<Option<String>, E> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        other => Err(E::custom(format!("expected string or number, got {other}"))),
    }
}

fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    value_to_string(Value::deserialize(deserializer)?)?
        .ok_or_else(|| de::Error::custom("expected string or number, got null"))
}

fn optional_string_or_number<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    value_to_string(Value::deserialize(deserializer)?)
}

#[derive(Debug, Default, Deserialize)]
struct AnswerBox {
    answer: Option<String>,
    snippet: Option<String>,
    #[serde(default)]
    snippet_highlighted_words: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct KnowledgeGraph {
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OrganicResult {
    snippet: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    error: Option<String>,
    answer_box: Option<Value>,
    knowledge_graph: Option<KnowledgeGraph>,
    #[serde(default)]
    organic_results: Vec<OrganicResult>,
}

/// What a search produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    Weather(WeatherReport),
    Text(String),
}

impl fmt::Display for SearchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Weather(report) => write!(f, "{report}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

impl SearchResponse {
    fn into_outcome(self) -> Result<SearchOutcome, ProviderError> {
        if let Some(error) = self.error {
            return Err(ProviderError::Api(error));
        }

        let answer_box = match self.answer_box {
            Some(Value::Array(mut boxes)) if !boxes.is_empty() => Some(boxes.swap_remove(0)),
            other => other,
        };

        if let Some(answer_box) = answer_box {
            if let Some(report) = WeatherReport::from_answer_box(&answer_box) {
                return Ok(SearchOutcome::Weather(report));
            }
            let parsed: AnswerBox = serde_json::from_value(answer_box).unwrap_or_default();
            let text = parsed
                .answer
                .or(parsed.snippet)
                .or_else(|| parsed.snippet_highlighted_words.into_iter().next());
            if let Some(text) = text {
                return Ok(SearchOutcome::Text(text));
            }
        }

        if let Some(description) = self.knowledge_graph.and_then(|kg| kg.description) {
            return Ok(SearchOutcome::Text(description));
        }

        let snippets: Vec<String> = self
            .organic_results
            .into_iter()
            .filter_map(|r| r.snippet)
            .take(3)
            .collect();
        if snippets.is_empty() {
            Ok(SearchOutcome::Text(NO_RESULT.to_string()))
        } else {
            Ok(SearchOutcome::Text(snippets.join("\n")))
        }
    }
}

pub struct SerpApiSearch {
    client: Client,
    api_key: String,
    base_url: String,
    engine: String,
}

impl SerpApiSearch {
    pub fn new(api_key: String) -> Self {
        info!("Creating SerpApiSearch");
        Self {
            client: Client::new(),
            api_key,
            base_url: SERPAPI_BASE_URL.to_string(),
            engine: "google".to_string(),
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    #[must_use]
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    pub async fn search(&self, query: &str) -> Result<SearchOutcome, ProviderError> {
        let url = endpoint(
            &self.base_url,
            "/search.json",
            &[
                ("engine", self.engine.as_str()),
                ("q", query),
                ("api_key", self.api_key.as_str()),
            ],
        )?;

        info!("Searching the web: {query}");
        let response = self.client.get(url).send().await.map_err(request_error)?;
        let body = read_json(response).await?;

        let parsed: SearchResponse = serde_json::from_value(body)
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;
        parsed.into_outcome()
    }
}

#[async_trait]
impl ContextProvider for SerpApiSearch {
    fn source(&self) -> ContextSource {
        ContextSource::Search
    }

    async fn fetch(&self, query: &str) -> Result<String, ProviderError> {
        Ok(self.search(query).await?.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn outcome(body: Value) -> Result<SearchOutcome, ProviderError> {
        serde_json::from_value::<SearchResponse>(body)
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?
            .into_outcome()
    }

    #[test]
    fn weather_box_is_rendered() {
        let result = outcome(json!({
            "answer_box": {
                "type": "weather_result",
                "temperature": "48",
                "unit": "Fahrenheit",
                "precipitation": "0%",
                "humidity": "74%",
                "wind": "6 mph",
                "location": "Paris, France",
                "date": "Sunday 6:00 PM",
                "weather": "Cloudy"
            }
        }));

        assert_eq!(
            result.map(|o| o.to_string()).ok().as_deref(),
            Some(
                "Weather in Paris, France: Cloudy at 48°F. Humidity: 74%, Wind: 6 mph, \
                 Precipitation: 0% (Sunday 6:00 PM)"
            )
        );
    }

    #[test]
    fn weather_fields_default_to_placeholder() {
        let report = WeatherReport::from_answer_box(&json!({
            "type": "weather_result",
            "location": "Oslo",
            "temperature": 3,
            "unit": "Celsius"
        }));

        assert_eq!(
            report.map(|r| r.to_string()).as_deref(),
            Some("Weather in Oslo: N/A at 3°C. Humidity: N/A, Wind: N/A, Precipitation: N/A (N/A)")
        );
    }

    #[test]
    fn malformed_weather_box_falls_back_to_text() {
        let result = outcome(json!({
            "answer_box": {
                "type": "weather_result",
                "temperature": ["not", "a", "value"],
                "snippet": "Mild and dry"
            }
        }));

        assert!(matches!(result, Ok(SearchOutcome::Text(ref t)) if t == "Mild and dry"));
    }

    #[test]
    fn answer_then_knowledge_graph_then_snippets() {
        let answer = outcome(json!({
            "answer_box": [{ "answer": "Paris" }],
            "knowledge_graph": { "description": "Capital of France" }
        }));
        assert!(matches!(answer, Ok(SearchOutcome::Text(ref t)) if t == "Paris"));

        let graph = outcome(json!({
            "knowledge_graph": { "description": "Capital of France" },
            "organic_results": [{ "snippet": "ignored" }]
        }));
        assert!(matches!(graph, Ok(SearchOutcome::Text(ref t)) if t == "Capital of France"));

        let organic = outcome(json!({
            "organic_results": [
                { "snippet": "one" }, { "title": "no snippet" }, { "snippet": "two" },
                { "snippet": "three" }, { "snippet": "four" }
            ]
        }));
        assert!(matches!(organic, Ok(SearchOutcome::Text(ref t)) if t == "one\ntwo\nthree"));
    }

    #[test]
    fn empty_response_has_placeholder_text() {
        assert!(matches!(outcome(json!({})), Ok(SearchOutcome::Text(ref t)) if t == NO_RESULT));
    }

    #[test]
    fn api_error_is_reported() {
        assert!(matches!(
            outcome(json!({ "error": "Invalid API key." })),
            Err(ProviderError::Api(ref e)) if e == "Invalid API key."
        ));
    }
}
