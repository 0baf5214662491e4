//! Client for the Jenkins pipeline stage view REST API (`wfapi`).
//!
//! Fetches pipeline runs, their stages and flow nodes, pending input actions, artifacts
//! and node logs, and links every node of a run back to it:
//!
//! ```no_run
//! # async fn demo() -> stageview::error::Result<()> {
//! use stageview::jenkins::Jenkins;
//!
//! let job = Jenkins::new("https://ci.example.com", None, None)?.job("team/app")?;
//! let run = job.get_pipeline_run_with_full_stages("42").await?;
//! for node in run.nodes() {
//!     println!("{} {} {}", node.id, node.name, node.status);
//! }
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod error;
pub mod jenkins;
pub mod pipeline;
