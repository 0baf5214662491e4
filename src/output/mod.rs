mod progress;
mod styling;
mod tables;

pub use progress::FetchProgress;
pub use styling::{dim, magenta_bold};
pub use tables::{
    artifacts_table, format_duration, format_time, node_table, pending_table, runs_table,
    stages_table,
};

/// Prints the stageview banner to stderr.
pub fn print_banner() {
    eprintln!(
        r"
{} {}
  {}
",
        magenta_bold("stageview"),
        dim(env!("CARGO_PKG_VERSION")),
        dim("Jenkins pipeline stage view client")
    );
}

