use crate::error::EndpointError;
use std::{fmt, str::FromStr};
use url::Url;

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 9012;

/// Host and port of a node's HTTP RPC listener.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Endpoint {
    host: String,
    port: u16,
}

impl Endpoint {
    pub fn new(host: impl Into<String>, port: u16) -> Result<Self, EndpointError> {
        let host = host.into();
        let trimmed = host.trim();
        let host = trimmed
            .strip_prefix('[')
            .and_then(|h| h.strip_suffix(']'))
            .unwrap_or(trimmed);
        if host.is_empty() {
            return Err(EndpointError::EmptyHost);
        }
        if host.contains(['/', '[', ']', '@', '?', '#']) || host.chars().any(char::is_whitespace) {
            return Err(EndpointError::InvalidHost(trimmed.to_string()));
        }
        Ok(Self {
            host: host.to_string(),
            port,
        })
    }

    /// Accepts the port as text, the way node configs and shell scripts pass it around.
    pub fn from_parts(host: impl Into<String>, port: &str) -> Result<Self, EndpointError> {
        let port = port
            .trim()
            .parse::<u16>()
            .map_err(|_| EndpointError::InvalidPort(port.to_string()))?;
        Self::new(host, port)
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn url(&self) -> Result<Url, EndpointError> {
        let raw = format!("http://{}/", self);
        Url::parse(&raw).map_err(|source| EndpointError::InvalidUrl { raw, source })
    }
}

impl Default for Endpoint {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.host.contains(':') {
            write!(f, "[{}]:{}", self.host, self.port)
        } else {
            write!(f, "{}:{}", self.host, self.port)
        }
    }
}

impl FromStr for Endpoint {
    type Err = EndpointError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s
            .strip_prefix("http://")
            .unwrap_or(s)
            .trim_end_matches('/');

        let (host, port) = s
            .rsplit_once(':')
            .ok_or_else(|| EndpointError::MissingPort(s.to_string()))?;
        Self::from_parts(host, port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_host_and_port() {
        let endpoint: Endpoint = "127.0.0.1:9000".parse().unwrap();
        assert_eq!(endpoint.host(), "127.0.0.1");
        assert_eq!(endpoint.port(), 9000);
        assert_eq!(endpoint.to_string(), "127.0.0.1:9000");
    }

    #[test]
    fn accepts_scheme_and_trailing_slash() {
        let endpoint: Endpoint = "http://localhost:8545/".parse().unwrap();
        assert_eq!(endpoint, Endpoint::new("localhost", 8545).unwrap());
    }

    #[test]
    fn port_may_be_given_as_text() {
        let endpoint = Endpoint::from_parts("127.0.0.1", "11000").unwrap();
        assert_eq!(endpoint.port(), 11000);
    }

    #[test]
    fn rejects_bad_input() {
        assert!(matches!(
            Endpoint::new("  ", 9000),
            Err(EndpointError::EmptyHost)
        ));
        assert!(matches!(
            "localhost".parse::<Endpoint>(),
            Err(EndpointError::MissingPort(_))
        ));
        assert!(matches!(
            "localhost:http".parse::<Endpoint>(),
            Err(EndpointError::InvalidPort(_))
        ));
        assert!(matches!(
            ":9000".parse::<Endpoint>(),
            Err(EndpointError::EmptyHost)
        ));
    }

    #[test]
    fn hosts_with_url_syntax_fail_at_parse_time() {
        assert!(matches!(
            "https://localhost:8545".parse::<Endpoint>(),
            Err(EndpointError::InvalidHost(_))
        ));
        assert!(matches!(
            Endpoint::new("localhost/rpc", 8545),
            Err(EndpointError::InvalidHost(_))
        ));
        assert!(matches!(
            Endpoint::new("[[::1]]", 8545),
            Err(EndpointError::InvalidHost(_))
        ));
    }

    #[test]
    fn bracketed_host_is_not_bracketed_twice() {
        let endpoint = Endpoint::new("[::1]", 8545).unwrap();
        assert_eq!(endpoint.host(), "::1");
        assert_eq!(endpoint.to_string(), "[::1]:8545");
        assert_eq!(endpoint.url().unwrap().as_str(), "http://[::1]:8545/");
    }

    #[test]
    fn ipv6_hosts_are_bracketed() {
        let endpoint: Endpoint = "[::1]:8545".parse().unwrap();
        assert_eq!(endpoint.host(), "::1");
        assert_eq!(endpoint.url().unwrap().as_str(), "http://[::1]:8545/");
    }

    #[test]
    fn default_points_at_local_node() {
        let endpoint = Endpoint::default();
        assert_eq!(endpoint.url().unwrap().as_str(), "http://localhost:9012/");
    }
}
