use serde::{Deserialize, Serialize};
use std::fmt;

/// Request timeout applied to every client built by the factory.
pub const REQUEST_TIMEOUT_MS: u64 = 30_000;

/// User-Agent sent on every outbound request, proxied or not.
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/136.0.0.0 Safari/537.36";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProxyProtocol {
    Http,
    Https,
    Socks,
    Socks5,
}

impl ProxyProtocol {
    pub fn from_scheme(scheme: &str) -> Option<Self> {
        match scheme.to_ascii_lowercase().as_str() {
            "http" => Some(Self::Http),
            "https" => Some(Self::Https),
            "socks" => Some(Self::Socks),
            "socks5" => Some(Self::Socks5),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Http => "http",
            Self::Https => "https",
            Self::Socks => "socks",
            Self::Socks5 => "socks5",
        }
    }

    /// Port used when the proxy string does not carry one.
    pub fn default_port(&self) -> u16 {
        match self {
            Self::Https => 443,
            _ => 80,
        }
    }
}

impl fmt::Display for ProxyProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Proxy transport flavour used for a protocol. Decides the scheme the HTTP
/// client is handed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProxyAgent {
    Http,
    Tls,
    Socks,
}

impl ProxyAgent {
    pub fn for_protocol(protocol: ProxyProtocol) -> Self {
        match protocol {
            ProxyProtocol::Https => Self::Tls,
            ProxyProtocol::Socks | ProxyProtocol::Socks5 => Self::Socks,
            ProxyProtocol::Http => Self::Http,
        }
    }

    /// Plain `socks` has no client-side scheme of its own and goes out as
    /// `socks5`, the only SOCKS dialect the client speaks with credentials.
    pub fn scheme(&self) -> &'static str {
        match self {
            Self::Http => "http",
            Self::Tls => "https",
            Self::Socks => "socks5",
        }
    }
}

/// Structured form of a proxy connection string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxyDescriptor {
    pub protocol: ProxyProtocol,
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl ProxyDescriptor {
    /// Canonical proxy URL handed to the HTTP client.
    ///
    /// The scheme comes from the protocol's [`ProxyAgent`]. Credentials are
    /// embedded only when both username and password are set.
    pub fn proxy_url(&self) -> String {
        let scheme = self.agent().scheme();

        match (&self.username, &self.password) {
            (Some(username), Some(password)) => format!(
                "{}://{}:{}@{}:{}",
                scheme, username, password, self.host, self.port
            ),
            _ => format!("{}://{}:{}", scheme, self.host, self.port),
        }
    }

    pub fn agent(&self) -> ProxyAgent {
        ProxyAgent::for_protocol(self.protocol)
    }

    pub fn has_credentials(&self) -> bool {
        self.username.is_some() && self.password.is_some()
    }
}

impl fmt::Display for ProxyDescriptor {
    // Never prints credentials.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}:{}", self.protocol, self.host, self.port)
    }
}
