use crate::error::{StageViewError, Result};
use crate::jenkins::{Job, Query};

use super::types::{Artifact, NodeLog, PendingInputAction, PipelineNode, PipelineRun};

const FULL_STAGES_QUERY: Query<'static> = &[("fullStages", "true")];

/// How much of each stage the server should include in a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageDetail {
    /// Stage summaries only; `stage_flow_nodes` stays empty
    Shallow,
    /// Stages with their flow nodes populated
    Full,
}

impl StageDetail {
    pub(crate) fn query(self) -> Option<Query<'static>> {
        match self {
            StageDetail::Shallow => None,
            StageDetail::Full => Some(FULL_STAGES_QUERY),
        }
    }
}

impl Job {
    /// Fetches the job's recent runs with stage summaries.
    ///
    /// # Errors
    ///
    /// Transport and decode failures are returned unchanged.
    pub async fn get_pipeline_runs(&self) -> Result<Vec<PipelineRun>> {
        self.fetch_runs(StageDetail::Shallow).await
    }

    /// Fetches the job's recent runs with the flow nodes of every stage.
    pub async fn get_pipeline_runs_with_full_stages(&self) -> Result<Vec<PipelineRun>> {
        self.fetch_runs(StageDetail::Full).await
    }

    /// Fetches a single run by its id (the build number).
    pub async fn get_pipeline_run(&self, id: &str) -> Result<PipelineRun> {
        self.fetch_run(id, StageDetail::Shallow).await
    }

    pub async fn get_pipeline_run_with_full_stages(&self, id: &str) -> Result<PipelineRun> {
        self.fetch_run(id, StageDetail::Full).await
    }

    pub async fn fetch_runs(&self, detail: StageDetail) -> Result<Vec<PipelineRun>> {
        let href = format!("{}/wfapi/runs", self.base);
        let mut runs: Vec<PipelineRun> = self.requester().get_json(&href, detail.query()).await?;

        for run in &mut runs {
            self.adopt(run);
        }

        Ok(runs)
    }

    pub async fn fetch_run(&self, id: &str, detail: StageDetail) -> Result<PipelineRun> {
        let href = format!("{}/{}/wfapi/describe", self.base, id);
        let mut run: PipelineRun = self.requester().get_json(&href, detail.query()).await?;

        self.adopt(&mut run);

        Ok(run)
    }

    fn adopt(&self, run: &mut PipelineRun) {
        run.link();
        run.job = Some(self.clone());
    }
}

impl PipelineRun {
    fn owner(&self) -> Result<&Job> {
        self.job
            .as_ref()
            .ok_or_else(|| StageViewError::DetachedRun(self.id.clone()))
    }

    /// Fetches the input steps currently waiting for approval. Empty when nothing is pending.
    pub async fn get_pending_input_actions(&self) -> Result<Vec<PendingInputAction>> {
        let href = format!("{}/wfapi/pendingInputActions", self.base);
        self.owner()?.requester().get_json(&href, None).await
    }

    pub async fn get_artifacts(&self) -> Result<Vec<Artifact>> {
        let href = format!("{}/wfapi/artifacts", self.base);
        self.owner()?.requester().get_json(&href, None).await
    }

    /// Fetches a single node of this run.
    ///
    /// The returned node is not linked: its `base` is empty and it has no owning run, so
    /// [`PipelineRun::get_node_log`] rejects it. Look the node up in a run fetched with
    /// full stages when its log is needed.
    pub async fn get_node(&self, id: &str) -> Result<PipelineNode> {
        let href = format!("{}/execution/node/{}/wfapi/describe", self.base, id);
        self.owner()?.requester().get_json(&href, None).await
    }

    /// Fetches the console log of `node`.
    ///
    /// # Errors
    ///
    /// Returns [`StageViewError::MissingBaseUrl`] without issuing a request when the node
    /// has no base URL.
    pub async fn get_node_log(&self, node: &PipelineNode) -> Result<NodeLog> {
        if node.base.is_empty() {
            return Err(StageViewError::MissingBaseUrl(node.id.clone()));
        }

        let href = format!("{}/wfapi/log", node.base);
        self.owner()?.requester().get_json(&href, None).await
    }
}
