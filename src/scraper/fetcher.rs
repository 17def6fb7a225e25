use crate::model::ScraperError;
use crate::scraper::traits::Scraper;

use rand::Rng;
use reqwest::Client;
use std::time::Duration;
use tokio::time::sleep;
use tracing::debug;

const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 Chrome/114.0.0.0 Safari/537.36";

#[derive(Clone)]
pub struct ScraperImpl {
    pub client: Client,
    /// Upper bound of the random pause taken before each request.
    pub max_delay: Duration,
}

impl ScraperImpl {
    pub fn new(max_delay: Duration) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(60))
            .build()?;

        Ok(Self { client, max_delay })
    }

    fn jitter(&self) -> Duration {
        let max_ms = self.max_delay.as_millis() as u64;
        if max_ms == 0 {
            return Duration::ZERO;
        }
        Duration::from_millis(rand::rng().random_range(max_ms / 2..=max_ms))
    }
}

#[async_trait::async_trait]
impl Scraper for ScraperImpl {
    async fn fetch(&self, url: &str) -> Result<String, ScraperError> {
        let pause = self.jitter();
        debug!("Fetching {} after {:?}", url, pause);
        sleep(pause).await;

        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(ScraperError::InvalidResponse(response.status().as_u16()));
        }

        Ok(response.text().await?)
    }
}
