use std::fmt;
use std::sync::Arc;

use super::requester::Requester;
use super::server::Jenkins;
use crate::error::{StageViewError, Result};

/// A pipeline job on a Jenkins server.
///
/// Cheap to clone; every run fetched through a job keeps a clone as its owner.
#[derive(Clone)]
pub struct Job {
    /// Full job path, folders joined by `/`
    pub name: String,
    /// Job URL without trailing slash (e.g. `https://ci.example.com/job/team/job/app`)
    pub base: String,
    jenkins: Arc<Jenkins>,
}

impl Job {
    pub fn new(jenkins: Arc<Jenkins>, path: &str) -> Result<Self> {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        if segments.is_empty() {
            return Err(StageViewError::Config("Job path must not be empty".into()));
        }

        let mut url = jenkins.base_url().clone();
        url.path_segments_mut()
            .map_err(|()| {
                StageViewError::Config(format!("Jenkins URL cannot be a base: {}", jenkins.base_url()))
            })?
            .pop_if_empty()
            .extend(segments.iter().flat_map(|segment| ["job", *segment]));

        Ok(Self {
            name: segments.join("/"),
            base: url.as_str().trim_end_matches('/').to_string(),
            jenkins,
        })
    }

    pub(crate) fn requester(&self) -> &Requester {
        self.jenkins.requester()
    }
}

impl fmt::Debug for Job {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Job")
            .field("name", &self.name)
            .field("base", &self.base)
            .finish_non_exhaustive()
    }
}
