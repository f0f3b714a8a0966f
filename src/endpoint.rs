use std::fmt;
use std::str::FromStr;
use url::Url;

/// Public Ethereum mainnet endpoints, in order of preference.
pub const DEFAULT_ENDPOINTS: [&str; 3] = [
    "https://eth.llamarpc.com",
    "https://rpc.ankr.com/eth",
    "https://cloudflare-eth.com",
];

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum EndpointListError {
    #[error("the endpoint list is empty")]
    Empty,

    #[error("invalid endpoint URL `{url}`: {source}")]
    InvalidUrl {
        url: String,
        source: url::ParseError,
    },
}

/// A single JSON-RPC endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Endpoint(Url);

impl Endpoint {
    pub fn parse(url: &str) -> Result<Endpoint, EndpointListError> {
        Url::parse(url)
            .map(Endpoint)
            .map_err(|source| EndpointListError::InvalidUrl {
                url: url.to_string(),
                source,
            })
    }

    pub fn url(&self) -> &Url {
        &self.0
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl FromStr for Endpoint {
    type Err = EndpointListError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Endpoint::parse(s)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Ordered, non-empty list of endpoints. The order is the try order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointList {
    endpoints: Vec<Endpoint>,
}

impl EndpointList {
    pub fn new<I, S>(urls: I) -> Result<EndpointList, EndpointListError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let endpoints = urls
            .into_iter()
            .map(|url| Endpoint::parse(url.as_ref().trim()))
            .collect::<Result<Vec<_>, _>>()?;

        if endpoints.is_empty() {
            return Err(EndpointListError::Empty);
        }

        Ok(EndpointList { endpoints })
    }

    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    // Never true, construction rejects empty lists.
    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Endpoint> {
        self.endpoints.iter()
    }
}

impl<'a> IntoIterator for &'a EndpointList {
    type Item = &'a Endpoint;
    type IntoIter = std::slice::Iter<'a, Endpoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.endpoints.iter()
    }
}

impl Default for EndpointList {
    fn default() -> Self {
        let endpoints = DEFAULT_ENDPOINTS
            .iter()
            .filter_map(|url| Endpoint::parse(url).ok())
            .collect();
        EndpointList { endpoints }
    }
}
