use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Success wrapper the backend puts around most payloads.
/// `data` may be missing or null even on success.
#[derive(Debug, Clone, Deserialize)]
pub struct BackendEnvelope<T> {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    pub data: Option<T>,
}

/// Body of a non-2xx backend response. Every field is optional since the body
/// may come from a proxy or load balancer rather than the backend itself.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackendErrorEnvelope {
    #[serde(default)]
    pub error_code: Option<String>,
    #[serde(default)]
    pub error_message: Option<String>,
    /// field name -> message, in the order the backend sent them
    #[serde(default)]
    pub validation: Option<Map<String, Value>>,
}

/// Offset-paginated list as returned by the backend. `number` is zero-based.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub content: Vec<T>,
    #[serde(default)]
    pub pageable: Value,
    #[serde(default)]
    pub total_elements: u64,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub number: u32,
    #[serde(default)]
    pub size: u32,
    #[serde(default)]
    pub number_of_elements: u32,
    #[serde(default)]
    pub first: bool,
    #[serde(default)]
    pub last: bool,
    #[serde(default)]
    pub empty: bool,
    #[serde(default)]
    pub sort: Value,
}

/// `page`, `size` and `sort` query parameters for paginated list routes
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
    pub size: Option<String>,
    pub sort: Option<String>,
}

impl PageQuery {
    pub const DEFAULT_PAGE: &'static str = "0";
    pub const DEFAULT_SIZE: &'static str = "20";

    /// Resolve defaults; blank values count as missing
    pub fn resolve(&self, default_sort: &str) -> Vec<(String, String)> {
        fn pick(value: &Option<String>, default: &str) -> String {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .unwrap_or(default)
                .to_string()
        }

        vec![
            ("page".to_string(), pick(&self.page, Self::DEFAULT_PAGE)),
            ("size".to_string(), pick(&self.size, Self::DEFAULT_SIZE)),
            ("sort".to_string(), pick(&self.sort, default_sort)),
        ]
    }
}
