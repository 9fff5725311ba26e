use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Schema version written when a config is bootstrapped.
pub const CONFIG_VERSION: i64 = 3;

/// Keys a record does not model, written back untouched.
pub type Extra = BTreeMap<String, serde_yaml::Value>;

/// Root of the agent configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Schema version. Only set when the config is first created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<Scalar>,
    /// Agent section. Its presence marks the config as initialized.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent: Option<Agent>,
    /// Endpoint sections in insertion order. Absent until the first one is added.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoints: Option<Vec<Endpoint>>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// The `agent` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    /// Credential for the agent's control connection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authtoken: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// A named rule forwarding a public URL to a local upstream.
///
/// Every field loads leniently so hand-written files with partial or
/// integer-valued entries still round-trip; endpoints built by
/// [`Endpoint::new`] always carry a name and a port.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Endpoint {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Upstream::is_empty")]
    pub upstream: Upstream,
    /// Public URL, either typed fresh or reused from another endpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<Scalar>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Local service an endpoint forwards to.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Upstream {
    /// The local port as entered by the user. The key is `url` on disk.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<Scalar>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl Upstream {
    fn is_empty(&self) -> bool {
        self.url.is_none() && self.protocol.is_none() && self.extra.is_empty()
    }
}

/// Integer-or-string scalar, kept in the form it was read.
///
/// Hand-written files use both `version: "2"` and `version: 3`, and may
/// give an upstream port as a bare integer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Int(i64),
    Text(String),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(value) => write!(f, "{}", value),
            Self::Text(value) => f.write_str(value),
        }
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl Endpoint {
    /// Endpoint with the required fields only.
    pub fn new(name: impl Into<String>, port: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            upstream: Upstream {
                url: Some(Scalar::Text(port.into())),
                protocol: None,
                extra: Extra::new(),
            },
            url: None,
            description: None,
            extra: Extra::new(),
        }
    }

    /// Set the upstream protocol. Empty input leaves it unset.
    pub fn with_protocol(mut self, protocol: Option<String>) -> Self {
        self.upstream.protocol = non_empty(protocol);
        self
    }

    /// Set the public URL. Empty input leaves it unset.
    pub fn with_url(mut self, url: Option<String>) -> Self {
        self.url = non_empty(url).map(Scalar::Text);
        self
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = non_empty(description);
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The upstream port, stored under `upstream.url`.
    pub fn port(&self) -> Option<&Scalar> {
        self.upstream.url.as_ref()
    }

    pub fn protocol(&self) -> Option<&str> {
        self.upstream.protocol.as_deref()
    }

    /// The public URL in display form.
    pub fn url(&self) -> Option<String> {
        self.url.as_ref().map(Scalar::to_string)
    }
}

impl AgentConfig {
    /// Whether an `agent` section is already present.
    pub fn has_agent(&self) -> bool {
        self.agent.is_some()
    }

    /// Initialize a fresh config: schema version plus the auth token.
    pub fn bootstrap_agent(&mut self, authtoken: String) {
        self.version = Some(Scalar::Int(CONFIG_VERSION));
        self.agent = Some(Agent {
            authtoken: Some(authtoken),
            extra: Extra::new(),
        });
    }

    /// Distinct non-empty endpoint URLs in first-seen order.
    pub fn existing_urls(&self) -> Vec<String> {
        let mut urls: Vec<String> = Vec::new();
        for endpoint in self.endpoints.iter().flatten() {
            let Some(url) = endpoint.url() else {
                continue;
            };
            if !url.is_empty() && !urls.contains(&url) {
                urls.push(url);
            }
        }
        urls
    }

    /// Append an endpoint, creating the list on first use.
    pub fn push_endpoint(&mut self, endpoint: Endpoint) {
        self.endpoints.get_or_insert_with(Vec::new).push(endpoint);
    }
}
