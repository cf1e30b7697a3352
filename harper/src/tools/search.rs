//! Web search through the Tavily Search API.
//!
//! Without `TAVILY_API_KEY` the tool still answers, explaining that search is unavailable.
//! HTTP and decoding failures come back as `Search failed: ...` text.

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::{debug, warn};

use super::{Tool, ToolError, ToolSpec};

pub const TOOL_SEARCH_WEB: &str = "search_web";
pub const DEFAULT_TAVILY_BASE_URL: &str = "https://api.tavily.com";
const DEFAULT_MAX_RESULTS: u32 = 3;
const CONTENT_MAX_CHARS: usize = 500;

/// Search backend settings, read once at startup.
#[derive(Clone)]
pub struct SearchSettings {
    pub api_key: Option<String>,
    pub base_url: String,
    pub max_results: u32,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_TAVILY_BASE_URL.to_string(),
            max_results: DEFAULT_MAX_RESULTS,
        }
    }
}

impl std::fmt::Debug for SearchSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchSettings")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("max_results", &self.max_results)
            .finish()
    }
}

impl SearchSettings {
    /// `TAVILY_API_KEY` (blank means unset) and optional `TAVILY_BASE_URL`.
    pub fn from_env() -> Self {
        let api_key = std::env::var("TAVILY_API_KEY")
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());
        let base_url = std::env::var("TAVILY_BASE_URL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_TAVILY_BASE_URL.to_string());
        Self {
            api_key,
            base_url,
            ..Self::default()
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

pub struct SearchWebTool {
    http: reqwest::Client,
    settings: SearchSettings,
}

impl SearchWebTool {
    pub fn new(settings: SearchSettings) -> Self {
        Self {
            http: reqwest::Client::new(),
            settings,
        }
    }

    async fn search(&self, api_key: &str, query: &str) -> Result<Value, String> {
        let url = format!("{}/search", self.settings.base_url.trim_end_matches('/'));
        let body = json!({
            "query": query,
            "max_results": self.settings.max_results,
        });
        debug!(url = %url, max_results = self.settings.max_results, "Tavily search");
        let res = self
            .http
            .post(&url)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| e.to_string())?;
        let status = res.status();
        if !status.is_success() {
            let err_body = res.text().await.unwrap_or_default();
            return Err(format!("HTTP {}: {}", status.as_u16(), err_body.trim()));
        }
        res.json::<Value>().await.map_err(|e| e.to_string())
    }
}

fn format_results(query: &str, value: &Value) -> String {
    let results: &[Value] = value
        .get("results")
        .and_then(Value::as_array)
        .map(|v| v.as_slice())
        .unwrap_or(&[]);
    let answer = value
        .get("answer")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|a| !a.is_empty());
    if results.is_empty() && answer.is_none() {
        return format!("No results found for: {}", query);
    }

    let mut out = String::new();
    if let Some(answer) = answer {
        out.push_str(&format!("Answer: {}\n", answer));
    }
    for (i, r) in results.iter().enumerate() {
        let title = r.get("title").and_then(Value::as_str).unwrap_or("(no title)");
        let url = r.get("url").and_then(Value::as_str).unwrap_or("");
        out.push_str(&format!("[{}] {}\n  URL: {}\n", i + 1, title, url));
        if let Some(content) = r.get("content").and_then(Value::as_str) {
            let content = content.trim().replace('\n', " ");
            if !content.is_empty() {
                let excerpt: String = content.chars().take(CONTENT_MAX_CHARS).collect();
                let ellipsis = if content.chars().count() > CONTENT_MAX_CHARS { "..." } else { "" };
                out.push_str(&format!("  {}{}\n", excerpt, ellipsis));
            }
        }
    }
    out.trim_end().to_string()
}

#[async_trait]
impl Tool for SearchWebTool {
    fn name(&self) -> &str {
        TOOL_SEARCH_WEB
    }

    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: TOOL_SEARCH_WEB.to_string(),
            description: "Search the web for current information".to_string(),
            input: "search query".to_string(),
        }
    }

    async fn call(&self, args: &str) -> Result<String, ToolError> {
        let query = args.trim();
        let Some(api_key) = self.settings.api_key.as_deref() else {
            return Ok(format!(
                "Web search not available. Please set TAVILY_API_KEY. Query was: {}",
                query
            ));
        };
        if query.is_empty() {
            return Ok("Search failed: empty query".to_string());
        }
        match self.search(api_key, query).await {
            Ok(value) => Ok(format_results(query, &value)),
            Err(e) => {
                warn!(error = %e, "Tavily search failed");
                Ok(format!("Search failed: {}", e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// **Scenario**: Results are numbered with title, URL and a content excerpt.
    #[test]
    fn format_results_lists_hits() {
        let value = json!({
            "results": [
                {"title": "Rust", "url": "https://www.rust-lang.org", "content": "A language\nempowering everyone"},
                {"title": "Crates", "url": "https://crates.io", "content": ""}
            ]
        });
        let out = format_results("rust", &value);
        assert!(out.starts_with("[1] Rust\n  URL: https://www.rust-lang.org\n  A language empowering everyone"), "{}", out);
        assert!(out.contains("[2] Crates"), "{}", out);
    }

    /// **Scenario**: No hits yields an explanatory message.
    #[test]
    fn format_results_empty() {
        assert_eq!(format_results("zzz", &json!({"results": []})), "No results found for: zzz");
    }

    /// **Scenario**: Without a key the tool explains it is unavailable and echoes the query.
    #[tokio::test]
    async fn no_key_is_unavailable_message() {
        let tool = SearchWebTool::new(SearchSettings::default());
        let out = tool.call(" rust news ").await.unwrap();
        assert_eq!(
            out,
            "Web search not available. Please set TAVILY_API_KEY. Query was: rust news"
        );
    }
}
