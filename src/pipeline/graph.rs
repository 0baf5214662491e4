use super::links::extract_base_url;
use super::types::{PipelineNode, PipelineRun};

impl PipelineRun {
    /// Fills in derived base URLs and owning-run references across the run's graph.
    ///
    /// Stages and the flow nodes nested inside them both point at this run; flow nodes
    /// are not linked to their enclosing stage. Runs fetched without full stage detail
    /// have no flow nodes, which is fine. Linking again yields the same result.
    pub fn link(&mut self) {
        self.base = extract_base_url(&self.links);

        for stage in &mut self.stages {
            stage.run_id = Some(self.id.clone());
            stage.base = extract_base_url(&stage.links);

            for flow_node in &mut stage.stage_flow_nodes {
                flow_node.run_id = Some(self.id.clone());
                flow_node.base = extract_base_url(&flow_node.links);
            }
        }
    }

    /// Every node in the graph: each stage followed by its flow nodes.
    pub fn nodes(&self) -> impl Iterator<Item = &PipelineNode> + '_ {
        self.stages
            .iter()
            .flat_map(|stage| std::iter::once(stage).chain(stage.stage_flow_nodes.iter()))
    }

    /// Looks up a stage or flow node by id.
    pub fn node(&self, id: &str) -> Option<&PipelineNode> {
        self.nodes().find(|node| node.id == id)
    }

    /// Whether `node` was linked to this run.
    pub fn owns(&self, node: &PipelineNode) -> bool {
        node.run_id.as_deref() == Some(self.id.as_str())
    }
}

impl PipelineNode {
    /// Identifier of the run this node was linked to, if any.
    ///
    /// Nodes returned by [`PipelineRun::get_node`] are never linked and always yield `None`.
    pub fn run_id(&self) -> Option<&str> {
        self.run_id.as_deref()
    }

    /// Resolves the owning run among `runs`.
    pub fn owning_run<'a>(&self, runs: &'a [PipelineRun]) -> Option<&'a PipelineRun> {
        runs.iter().find(|run| run.owns(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_with_stages(stage_flow_nodes: &[usize]) -> PipelineRun {
        let stages: Vec<PipelineNode> = stage_flow_nodes
            .iter()
            .enumerate()
            .map(|(i, &count)| {
                let stage_id = format!("s{i}");
                serde_json::from_value(serde_json::json!({
                    "_links": {"self": {"href": format!("http://host/job/x/1/execution/node/{stage_id}/wfapi/describe")}},
                    "id": &stage_id,
                    "stageFlowNodes": (0..count).map(|j| serde_json::json!({
                        "_links": {"self": {"href": format!("http://host/job/x/1/execution/node/{i}-{j}/wfapi/describe")}},
                        "id": format!("{i}-{j}"),
                    })).collect::<Vec<_>>(),
                }))
                .unwrap()
            })
            .collect();

        let mut run: PipelineRun = serde_json::from_value(serde_json::json!({
            "_links": {"self": {"href": "http://host/job/x/1/wfapi/describe"}},
            "id": "1",
        }))
        .unwrap();
        run.stages = stages;
        run
    }

    #[test]
    fn links_run_stages_and_flow_nodes() {
        let mut run = run_with_stages(&[2, 0, 3]);
        run.link();

        assert_eq!(run.base, "http://host/job/x/1");
        assert_eq!(run.nodes().count(), 3 + 2 + 3);
        assert!(run.nodes().all(|node| run.owns(node)));
        assert_eq!(run.stages[0].base, "http://host/job/x/1/execution/node/s0");
        assert_eq!(
            run.stages[2].stage_flow_nodes[1].base,
            "http://host/job/x/1/execution/node/2-1"
        );
    }

    #[test]
    fn flow_nodes_point_at_run_not_stage() {
        let mut run = run_with_stages(&[1]);
        run.link();

        let flow_node = &run.stages[0].stage_flow_nodes[0];
        assert_eq!(flow_node.run_id(), Some("1"));
        assert_ne!(flow_node.run_id(), Some(run.stages[0].id.as_str()));
    }

    #[test]
    fn linking_is_idempotent() {
        let mut once = run_with_stages(&[2, 1]);
        once.link();
        let mut twice = once.clone();
        twice.link();

        assert_eq!(once.base, twice.base);
        assert_eq!(once.stages, twice.stages);
    }

    #[test]
    fn links_run_without_stages() {
        let mut run = run_with_stages(&[]);
        run.link();

        assert_eq!(run.base, "http://host/job/x/1");
        assert_eq!(run.nodes().count(), 0);
    }

    #[test]
    fn unresolvable_links_leave_base_empty() {
        let mut run = run_with_stages(&[1]);
        run.links.clear();
        run.stages[0].links.clear();
        run.link();

        assert!(run.base.is_empty());
        assert!(run.stages[0].base.is_empty());
        assert!(run.owns(&run.stages[0]));
    }

    #[test]
    fn resolves_owning_run_and_nodes_by_id() {
        let mut first = run_with_stages(&[1]);
        first.link();
        let mut second = run_with_stages(&[1]);
        second.id = "2".to_string();
        second.link();
        let runs = vec![first, second];

        let node = runs[1].node("0-0").unwrap();
        let owner = node.owning_run(&runs).unwrap();
        assert_eq!(owner.id, "2");
        assert!(runs[1].node("missing").is_none());
    }

    #[test]
    fn unlinked_node_has_no_owner() {
        let run = run_with_stages(&[1]);
        let runs = std::slice::from_ref(&run);

        assert!(run.stages[0].run_id().is_none());
        assert!(run.stages[0].owning_run(runs).is_none());
    }
}
