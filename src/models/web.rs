use serde::{Deserialize, Serialize};

/// A single source returned by the web-search proxy. Never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WebResult {
    pub title: String,
    pub uri: String,
    pub snippet: Option<String>,
}

/// The deep-search view payload: a text digest plus its sources, in the
/// order the service returned them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WebInsights {
    pub text: String,
    #[serde(default)]
    pub sources: Vec<WebResult>,
}
