use chrono::{DateTime, Utc};
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, ContentArrangement, Table};

use stageview::pipeline::{Artifact, PendingInputAction, PipelineNode, PipelineRun};

use super::styling::status_cell;

/// Table and cell creation helpers
pub fn create_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

pub fn runs_table(runs: &[PipelineRun]) -> Table {
    let mut table = create_table();
    table.set_header(vec!["Run", "Name", "Status", "Started", "Duration", "Queued", "Stages"]);
    for run in runs {
        table.add_row(vec![
            Cell::new(&run.id),
            Cell::new(&run.name),
            status_cell(&run.status),
            Cell::new(format_time(run.started_at())),
            Cell::new(format_duration(run.duration)),
            Cell::new(format_duration(run.queue_duration_millis)),
            Cell::new(run.stages.len()),
        ]);
    }
    table
}

/// Stages of a run, each followed by its flow nodes when they were fetched.
pub fn stages_table(run: &PipelineRun) -> Table {
    let mut table = create_table();
    table.set_header(vec!["Id", "Stage / Step", "Status", "Agent", "Started", "Duration"]);
    for stage in &run.stages {
        table.add_row(node_row(stage, stage.name.clone()));
        for flow_node in &stage.stage_flow_nodes {
            let label = match &flow_node.parameter_description {
                Some(description) if !description.is_empty() => {
                    format!("  └ {} ({description})", flow_node.name)
                }
                _ => format!("  └ {}", flow_node.name),
            };
            table.add_row(node_row(flow_node, label));
        }
    }
    table
}

pub fn node_table(node: &PipelineNode) -> Table {
    let mut table = create_table();
    table.set_header(vec!["Id", "Name", "Status", "Agent", "Started", "Duration"]);
    table.add_row(node_row(node, node.name.clone()));
    if !node.parent_nodes.is_empty() {
        let parents: Vec<String> = node.parent_nodes.iter().map(ToString::to_string).collect();
        table.add_row(vec![Cell::new("parents"), Cell::new(parents.join(", "))]);
    }
    table
}

pub fn pending_table(actions: &[PendingInputAction]) -> Table {
    let mut table = create_table();
    table.set_header(vec!["Input", "Message", "Proceed URL", "Abort URL"]);
    for action in actions {
        table.add_row(vec![
            Cell::new(&action.id),
            Cell::new(&action.message),
            Cell::new(&action.proceed_url),
            Cell::new(&action.abort_url),
        ]);
    }
    table
}

pub fn artifacts_table(artifacts: &[Artifact]) -> Table {
    let mut table = create_table();
    table.set_header(vec!["Name", "Path", "Size", "URL"]);
    for artifact in artifacts {
        table.add_row(vec![
            Cell::new(&artifact.name),
            Cell::new(&artifact.path),
            Cell::new(format_size(artifact.size)),
            Cell::new(&artifact.url),
        ]);
    }
    table
}

fn node_row(node: &PipelineNode, label: String) -> Vec<Cell> {
    vec![
        Cell::new(&node.id),
        Cell::new(label),
        status_cell(&node.status),
        Cell::new(node.exec_node.as_deref().filter(|n| !n.is_empty()).unwrap_or("-")),
        Cell::new(format_time(node.started_at())),
        Cell::new(format_duration(node.duration)),
    ]
}

pub fn format_time(time: Option<DateTime<Utc>>) -> String {
    time.map_or_else(|| "-".to_string(), |t| t.format("%Y-%m-%d %H:%M:%S").to_string())
}

pub fn format_duration(millis: i64) -> String {
    let seconds = millis.max(0) / 1000;
    match (seconds / 3600, seconds % 3600 / 60, seconds % 60) {
        (0, 0, s) => format!("{s}s"),
        (0, m, s) => format!("{m}m {s:02}s"),
        (h, m, s) => format!("{h}h {m:02}m {s:02}s"),
    }
}

#[allow(clippy::cast_precision_loss)]
fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KiB", "MiB", "GiB"];
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{bytes} B")
    } else {
        format!("{size:.1} {}", UNITS[unit])
    }
}
