//! Hunter.io client for the two lookup endpoints.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use crate::recruiter::{ContactLookup, LookupError};

const HUNTER_API_URL: &str = "https://api.hunter.io/v2";

#[derive(Clone)]
pub struct HunterClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

/// Both endpoints wrap their payload in `data`; absent fields mean "not found".
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: Option<T>,
}

#[derive(Debug, Deserialize)]
struct DomainData {
    #[serde(default)]
    domain: Option<String>,
}

#[derive(Debug, Deserialize)]
struct EmailData {
    #[serde(default)]
    email: Option<String>,
}

impl HunterClient {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: HUNTER_API_URL.to_string(),
            api_key,
        }
    }

    async fn get<T>(&self, path: &str, params: &[(&str, &str)]) -> Result<Option<T>, LookupError>
    where
        T: DeserializeOwned,
    {
        let api_key = self.api_key.as_deref().ok_or(LookupError::NotConfigured)?;

        let mut query = params.to_vec();
        query.push(("api_key", api_key));

        let response = self
            .client
            .get(format!("{}/{path}", self.base_url))
            .query(&query)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(LookupError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let envelope: Envelope<T> = response.json().await?;
        debug!("Lookup {path} returned data={}", envelope.data.is_some());
        Ok(envelope.data)
    }
}

#[async_trait]
impl ContactLookup for HunterClient {
    async fn domain_search(&self, company: &str) -> Result<Option<String>, LookupError> {
        let data: Option<DomainData> = self.get("domain-search", &[("company", company)]).await?;
        Ok(non_empty(data.and_then(|d| d.domain)))
    }

    async fn email_finder(
        &self,
        full_name: &str,
        domain: &str,
    ) -> Result<Option<String>, LookupError> {
        let data: Option<EmailData> = self
            .get("email-finder", &[("full_name", full_name), ("domain", domain)])
            .await?;
        Ok(non_empty(data.and_then(|d| d.email)))
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}
