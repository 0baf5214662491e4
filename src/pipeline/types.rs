use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::jenkins::Job;

/// Hyperlinks the server attaches under `_links`: relation name → {attribute → URL}.
///
/// e.g. `{"self": {"href": "https://ci/job/app/7/wfapi/describe"}}`
pub type Links = IndexMap<String, IndexMap<String, String>>;

/// One execution of a pipeline job.
///
/// Produced by the run fetchers on [`Job`]; by the time a caller sees it, `base`,
/// `job` and the owning-run reference of every stage and flow node have been filled in.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PipelineRun {
    /// Job this run was fetched through
    #[serde(skip)]
    pub job: Option<Job>,
    /// Resource root derived from the `self` link (empty when it could not be derived)
    #[serde(skip_deserializing)]
    pub base: String,
    #[serde(rename = "_links")]
    pub links: Links,
    pub id: String,
    pub name: String,
    /// Server-defined status token (e.g. "IN_PROGRESS", "SUCCESS", "PAUSED_PENDING_INPUT")
    pub status: String,
    #[serde(rename = "startTimeMillis")]
    pub start_time: i64,
    #[serde(rename = "endTimeMillis")]
    pub end_time: i64,
    #[serde(rename = "durationMillis")]
    pub duration: i64,
    pub queue_duration_millis: i64,
    pub pause_duration_millis: i64,
    pub stages: Vec<PipelineNode>,
}

impl PipelineRun {
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        from_epoch_millis(self.start_time)
    }

    pub fn ended_at(&self) -> Option<DateTime<Utc>> {
        from_epoch_millis(self.end_time)
    }
}

/// A stage of a run, or a flow node inside a stage.
///
/// Stages carry their flow nodes in `stage_flow_nodes` when the run was fetched with full
/// stage detail. Flow nodes are linked to the run directly, not to their stage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PipelineNode {
    /// Identifier of the owning run, set by [`PipelineRun::link`]
    #[serde(skip)]
    pub(crate) run_id: Option<String>,
    #[serde(skip_deserializing)]
    pub base: String,
    #[serde(rename = "_links")]
    pub links: Links,
    pub id: String,
    pub name: String,
    /// Step arguments summary; only present on flow nodes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameter_description: Option<String>,
    /// Agent the node executed on
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exec_node: Option<String>,
    pub status: String,
    #[serde(rename = "startTimeMillis")]
    pub start_time: i64,
    #[serde(rename = "durationMillis")]
    pub duration: i64,
    pub pause_duration_millis: i64,
    pub stage_flow_nodes: Vec<PipelineNode>,
    #[serde(deserialize_with = "deserialize_parent_nodes")]
    pub parent_nodes: Vec<i64>,
}

impl PipelineNode {
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        from_epoch_millis(self.start_time)
    }
}

/// A manual-approval gate waiting on the run.
///
/// Approving or aborting is a POST to `proceed_url` / `abort_url`, left to the caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PendingInputAction {
    pub id: String,
    pub message: String,
    /// Label of the proceed button
    pub proceed_text: String,
    pub proceed_url: String,
    pub abort_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Artifact {
    pub id: String,
    pub name: String,
    pub path: String,
    pub url: String,
    /// Size in bytes
    pub size: u64,
}

/// Console output of a single node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NodeLog {
    pub node_id: String,
    pub node_status: String,
    pub length: i64,
    /// More output exists than `text` holds; see `console_url`
    pub has_more: bool,
    pub text: String,
    pub console_url: String,
}

fn from_epoch_millis(millis: i64) -> Option<DateTime<Utc>> {
    if millis <= 0 {
        return None;
    }
    DateTime::from_timestamp_millis(millis)
}

// Jenkins sends parent ids as strings ("5"); accept plain numbers as well.
fn deserialize_parent_nodes<'de, D>(deserializer: D) -> Result<Vec<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum ParentId {
        Number(i64),
        Text(String),
    }

    Option::<Vec<ParentId>>::deserialize(deserializer)?
        .unwrap_or_default()
        .into_iter()
        .map(|id| match id {
            ParentId::Number(n) => Ok(n),
            ParentId::Text(text) => text
                .parse()
                .map_err(|_| D::Error::custom(format!("invalid parent node id: {text:?}"))),
        })
        .collect()
}
