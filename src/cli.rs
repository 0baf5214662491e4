use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use serde::Serialize;
use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;

use stageview::auth::{Credentials, Token};
use stageview::jenkins::{Jenkins, Job};
use stageview::pipeline::{Artifact, PendingInputAction, PipelineRun, StageDetail};

use crate::config::{Config, OutputFormat};
use crate::output::{self, FetchProgress};

#[derive(Parser)]
#[command(name = "stageview")]
#[command(author, version, about = "Jenkins pipeline stage view client", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (defaults to ./stageview.toml or the user config dir)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Jenkins root URL
    #[arg(short, long, global = true, env = "JENKINS_URL")]
    url: Option<String>,

    /// User the API token belongs to
    #[arg(short = 'U', long, global = true, env = "JENKINS_USER")]
    user: Option<String>,

    #[arg(short, long, global = true, env = "JENKINS_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Job path, folders separated by '/'
    #[arg(short, long, global = true)]
    job: Option<String>,

    #[arg(short, long, global = true, value_enum)]
    format: Option<OutputFormat>,

    /// Write output to this file instead of stdout
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    #[arg(short, long, global = true, default_value_t = false)]
    pretty: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List recent runs of the job
    Runs {
        /// Include the flow nodes of every stage
        #[arg(long)]
        full: bool,
    },
    /// Describe one run with its pending inputs and artifacts
    Run {
        id: String,

        #[arg(long)]
        full: bool,
    },
    /// List input steps waiting for approval
    Pending { id: String },
    /// List archived artifacts of a run
    Artifacts { id: String },
    /// Describe a single node of a run
    Node { id: String, node: String },
    /// Print the console log of a node
    Log { id: String, node: String },
}

/// Everything the `run` command shows, serialized as one document in JSON mode.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RunReport {
    run: PipelineRun,
    pending_input_actions: Vec<PendingInputAction>,
    artifacts: Vec<Artifact>,
}

fn stage_detail(full: bool) -> StageDetail {
    if full {
        StageDetail::Full
    } else {
        StageDetail::Shallow
    }
}

async fn with_progress<T, F>(message: &str, done: &str, fetch: F) -> Result<T>
where
    F: Future<Output = stageview::error::Result<T>>,
{
    let progress = FetchProgress::start(message);
    match fetch.await {
        Ok(value) => {
            progress.finish(done);
            Ok(value)
        }
        Err(e) => {
            progress.abandon();
            Err(e).context(message.to_string())
        }
    }
}

impl Cli {
    fn connect(&self, config: &Config) -> Result<Job> {
        let settings = &config.jenkins;
        let url = self.url.as_deref().unwrap_or(&settings.base_url);
        let user = self.user.as_ref().or(settings.username.as_ref());
        let token = self.token.as_ref().or(settings.token.as_ref());

        let credentials = match (user, token) {
            (Some(user), Some(token)) => Some(Credentials::new(user, Token::from(token.as_str()))),
            (None, Some(_)) => bail!("An API token was given without a user (--user / JENKINS_USER)"),
            _ => None,
        };

        let Some(job) = self.job.as_ref().or(settings.job.as_ref()) else {
            bail!("No job given; pass --job or set jenkins.job in the config file");
        };

        let timeout = Duration::from_secs(settings.timeout_secs);
        let jenkins = Jenkins::new(url, credentials, Some(timeout))?;
        Ok(jenkins.job(job)?)
    }

    fn emit<T: Serialize>(
        &self,
        config: &Config,
        value: &T,
        render: impl FnOnce() -> String,
    ) -> Result<()> {
        let format = self.format.unwrap_or(config.output.format);
        let rendered = match format {
            OutputFormat::Json if self.pretty || config.output.pretty => {
                serde_json::to_string_pretty(value)?
            }
            OutputFormat::Json => serde_json::to_string(value)?,
            OutputFormat::Table => render(),
        };

        if let Some(output_path) = &self.output {
            std::fs::write(output_path, rendered)
                .with_context(|| format!("Failed to write {}", output_path.display()))?;
            info!("Output written to: {}", output_path.display());
        } else {
            println!("{rendered}");
        }

        Ok(())
    }

    pub async fn execute(&self) -> Result<()> {
        let config = Config::load(self.config.as_deref())?;
        let job = self.connect(&config)?;
        info!("Using job {} at {}", job.name, job.base);

        match &self.command {
            Commands::Runs { full } => {
                let runs = with_progress(
                    &format!("Fetching runs of {}", job.name),
                    "Fetched runs",
                    job.fetch_runs(stage_detail(*full)),
                )
                .await?;

                self.emit(&config, &runs, || output::runs_table(&runs).to_string())
            }
            Commands::Run { id, full } => {
                let run = with_progress(
                    &format!("Fetching run #{id}"),
                    "Fetched run",
                    job.fetch_run(id, stage_detail(*full)),
                )
                .await?;

                let (pending_input_actions, artifacts) = with_progress(
                    "Fetching pending inputs and artifacts",
                    "Fetched pending inputs and artifacts",
                    async { futures::try_join!(run.get_pending_input_actions(), run.get_artifacts()) },
                )
                .await?;

                let report = RunReport {
                    run,
                    pending_input_actions,
                    artifacts,
                };
                self.emit(&config, &report, || render_run_report(&report))
            }
            Commands::Pending { id } => {
                let run = job.get_pipeline_run(id).await?;
                let actions = with_progress(
                    "Fetching pending inputs",
                    "Fetched pending inputs",
                    run.get_pending_input_actions(),
                )
                .await?;

                self.emit(&config, &actions, || output::pending_table(&actions).to_string())
            }
            Commands::Artifacts { id } => {
                let run = job.get_pipeline_run(id).await?;
                let artifacts =
                    with_progress("Fetching artifacts", "Fetched artifacts", run.get_artifacts())
                        .await?;

                self.emit(&config, &artifacts, || {
                    output::artifacts_table(&artifacts).to_string()
                })
            }
            Commands::Node { id, node } => {
                let run = job.get_pipeline_run(id).await?;
                let node = with_progress(
                    &format!("Fetching node {node} of run #{id}"),
                    "Fetched node",
                    run.get_node(node),
                )
                .await?;

                self.emit(&config, &node, || output::node_table(&node).to_string())
            }
            Commands::Log { id, node } => {
                // Nodes fetched one by one carry no base URL; resolve through the linked graph.
                let run = job.get_pipeline_run_with_full_stages(id).await?;
                let Some(target) = run.node(node) else {
                    bail!("Node {node} is not a stage or step of run #{id}");
                };
                let log = with_progress(
                    &format!("Fetching log of node {node}"),
                    "Fetched log",
                    run.get_node_log(target),
                )
                .await?;

                self.emit(&config, &log, || {
                    if log.has_more {
                        format!(
                            "{}\n{}",
                            log.text,
                            output::dim(format!("(truncated, full log at {})", log.console_url))
                        )
                    } else {
                        log.text.clone()
                    }
                })
            }
        }
    }
}

fn render_run_report(report: &RunReport) -> String {
    let run = &report.run;
    let mut sections = vec![
        format!(
            "Run #{} {} ({}, started {})",
            run.id,
            run.name,
            output::format_duration(run.duration),
            output::format_time(run.started_at())
        ),
        output::stages_table(run).to_string(),
    ];

    if !report.pending_input_actions.is_empty() {
        sections.push(output::pending_table(&report.pending_input_actions).to_string());
    }
    if !report.artifacts.is_empty() {
        sections.push(output::artifacts_table(&report.artifacts).to_string());
    }

    sections.join("\n\n")
}
