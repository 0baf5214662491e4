//! Pipeline stage view (`wfapi`) resources: runs, stages, flow nodes and their
//! sub-resources.

mod fetch;
mod graph;
mod links;
mod types;


pub use fetch::StageDetail;
pub use links::extract_base_url;
pub use types::{Artifact, Links, NodeLog, PendingInputAction, PipelineNode, PipelineRun};
