use reqwest::{Client, header::USER_AGENT};

const USER_AGENT_VALUE: &str = "genshin-data-scraper-rust/1.0";

/// The one HTTP capability the scrapers need.
#[async_trait::async_trait]
pub trait Fetcher: Send + Sync {
    /// GET `url` and return its body as text.
    async fn fetch_text(&self, url: &str) -> Result<String, FetchError>;
}

/// `Fetcher` backed by a single reused `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// The client ignores proxy environment variables.
    pub fn new() -> reqwest::Result<Self> {
        let client = Client::builder().no_proxy().build()?;
        Ok(Self { client })
    }
}

#[async_trait::async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        let res = self
            .client
            .get(url)
            .header(USER_AGENT, USER_AGENT_VALUE)
            .send()
            .await
            .map_err(|source| FetchError::Transport { url: url.to_string(), source })?;

        let status = res.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        res.text()
            .await
            .map_err(|source| FetchError::Transport { url: url.to_string(), source })
    }
}

#[derive(thiserror::Error, Debug)]
pub enum FetchError {
    #[error("GET {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },
}
