//! Runtime inspection: capability gate, mobile detection and page URL params.

use reqwest::Url;

use crate::sdk::VideoSdk;

/// Facts about the runtime the flow is hosted in
#[derive(Debug, Clone, Default)]
pub struct Browser {
    user_agent: Option<String>,
}

impl Browser {
    pub fn new(user_agent: Option<String>) -> Self {
        Self { user_agent }
    }

    /// Whether the runtime is a mobile browser. An unknown user agent is
    /// treated as desktop.
    pub fn is_mobile(&self) -> bool {
        self.user_agent
            .as_deref()
            .is_some_and(|ua| ua.contains("Mobile"))
    }

    /// Capability gate, evaluated once at startup
    pub fn is_supported(&self, sdk: &dyn VideoSdk) -> bool {
        let supported = sdk.is_supported();
        tracing::debug!(
            supported,
            sdk_version = %sdk.version(),
            mobile = self.is_mobile(),
            "Checked runtime capability"
        );
        supported
    }
}

/// Query parameters of the page URL, in their original order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlParams {
    pairs: Vec<(String, String)>,
}

impl UrlParams {
    /// Parse a query string, with or without the leading `?`
    pub fn parse(query: &str) -> Self {
        let query = query.trim_start_matches('?');
        if query.is_empty() {
            return Self::default();
        }

        // The base only anchors the query for decoding.
        let pairs = Url::parse(&format!("http://localhost/?{}", query))
            .map(|url| {
                url.query_pairs()
                    .map(|(name, value)| (name.into_owned(), value.into_owned()))
                    .collect()
            })
            .unwrap_or_default();

        Self { pairs }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Set `name`, replacing an existing value in place
    pub fn insert(&mut self, name: &str, value: &str) {
        match self.pairs.iter_mut().find(|(n, _)| n == name) {
            Some(pair) => pair.1 = value.to_string(),
            None => self.pairs.push((name.to_string(), value.to_string())),
        }
    }

    /// Percent-encoded query string without the leading `?`
    pub fn to_query_string(&self) -> String {
        if self.pairs.is_empty() {
            return String::new();
        }
        let Ok(mut url) = Url::parse("http://localhost/") else {
            return String::new();
        };
        url.query_pairs_mut().extend_pairs(self.pairs.iter());
        url.query().unwrap_or_default().to_string()
    }
}
