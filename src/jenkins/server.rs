use std::sync::Arc;
use std::time::Duration;

use url::Url;

use super::job::Job;
use super::requester::Requester;
use crate::auth::Credentials;
use crate::error::{StageViewError, Result};

/// A Jenkins server: its root URL and the requester used for every call against it.
#[derive(Debug)]
pub struct Jenkins {
    base_url: Url,
    requester: Requester,
}

impl Jenkins {
    /// Creates a handle for the Jenkins instance rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` is not an absolute http(s) URL or the HTTP client
    /// cannot be built.
    pub fn new(
        base_url: &str,
        credentials: Option<Credentials>,
        timeout: Option<Duration>,
    ) -> Result<Arc<Self>> {
        let requester = Requester::new(credentials, timeout)?;
        Self::with_requester(base_url, requester)
    }

    pub fn with_requester(base_url: &str, requester: Requester) -> Result<Arc<Self>> {
        let base_url = Url::parse(base_url)
            .map_err(|e| StageViewError::Config(format!("Invalid Jenkins URL: {e}")))?;

        if base_url.cannot_be_a_base() || !matches!(base_url.scheme(), "http" | "https") {
            return Err(StageViewError::Config(format!(
                "Jenkins URL must be an http(s) URL: {base_url}"
            )));
        }

        Ok(Arc::new(Self {
            base_url,
            requester,
        }))
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn requester(&self) -> &Requester {
        &self.requester
    }

    /// Handle for the job at `path`; folders are separated by `/` (e.g. "team/app").
    pub fn job(self: &Arc<Self>, path: &str) -> Result<Job> {
        Job::new(Arc::clone(self), path)
    }
}
