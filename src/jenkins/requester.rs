use log::debug;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::auth::Credentials;
use crate::error::{StageViewError, Result};

const USER_AGENT: &str = concat!("stageview/", env!("CARGO_PKG_VERSION"));

/// Query parameters appended to a GET request.
pub type Query<'a> = &'a [(&'a str, &'a str)];

/// Issues authenticated JSON GET requests against a Jenkins server.
#[derive(Debug, Clone)]
pub struct Requester {
    client: Client,
    credentials: Option<Credentials>,
}

impl Requester {
    pub fn new(credentials: Option<Credentials>, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| StageViewError::Config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            credentials,
        })
    }

    /// Helper to attach basic auth when credentials are configured
    pub fn auth_request(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        if let Some(credentials) = &self.credentials {
            request.basic_auth(&credentials.username, Some(credentials.token.as_str()))
        } else {
            request
        }
    }

    /// GET `url` and decode the JSON body into `T`.
    ///
    /// Query parameters are only appended when `query` is `Some`. Transport and decode
    /// failures are returned as-is; non-2xx responses become [`StageViewError::Api`].
    pub async fn get_json<T>(&self, url: &str, query: Option<Query<'_>>) -> Result<T>
    where
        T: DeserializeOwned,
    {
        debug!("GET {url} (query: {query:?})");

        let mut request = self.client.get(url);
        if let Some(query) = query {
            request = request.query(query);
        }

        let response = self.auth_request(request).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error response".to_string());
            return Err(StageViewError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}
