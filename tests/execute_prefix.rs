//! Partial execution: reduced-graph submission, polling, timeouts.

#[allow(dead_code)]
mod helpers;

use std::collections::{BTreeMap, VecDeque};
use std::time::Duration;

use helpers::*;
use serde_json::json;

use validator::error::Level;
use validator::exec::{
    ClientError, ExecError, ExecOptions, JobClient, JobUpdate, NodeOutcome, execute_prefix,
    reduced_workflow,
};
use validator::parse::types::Workflow;

// =============================================================================
// Scripted client
// =============================================================================

#[derive(Default)]
struct FakeClient {
    submitted: Option<Workflow>,
    updates: VecDeque<Option<JobUpdate>>,
    fail_submit: bool,
    fail_poll: bool,
}

impl FakeClient {
    fn with_updates(updates: Vec<Option<JobUpdate>>) -> Self {
        FakeClient {
            updates: updates.into(),
            ..Default::default()
        }
    }
}

impl JobClient for FakeClient {
    fn submit(&mut self, workflow: &Workflow) -> Result<String, ClientError> {
        if self.fail_submit {
            return Err(ClientError::new("connection refused"));
        }
        self.submitted = Some(workflow.clone());
        Ok("job-1".into())
    }

    fn poll(&mut self, _job_id: &str) -> Result<Option<JobUpdate>, ClientError> {
        if self.fail_poll {
            return Err(ClientError::new("connection reset"));
        }
        // Once the script runs out, report an idle unfinished job.
        Ok(self
            .updates
            .pop_front()
            .unwrap_or(Some(JobUpdate::default())))
    }
}

fn outcomes(entries: Vec<(i64, NodeOutcome)>) -> BTreeMap<i64, NodeOutcome> {
    entries.into_iter().collect()
}

fn fast_options() -> ExecOptions {
    ExecOptions {
        timeout: Duration::from_secs(5),
        poll_interval: Duration::from_millis(1),
    }
}

fn chain_workflow() -> Workflow {
    workflow(json!({
        "nodes": [
            {"id": 1, "type": "LoadImage", "widgets_values": ["example.png"]},
            {"id": 2, "type": "ImageBlur", "widgets_values": [5]},
            {"id": 3, "type": "SaveImage", "widgets_values": ["out.png"]}
        ],
        "links": [
            [1, 1, 0, 2, 0, "IMAGE"],
            [2, 2, 0, 3, 0, "IMAGE"]
        ]
    }))
}

// =============================================================================
// Reduced workflow
// =============================================================================

#[test]
fn reduced_workflow_keeps_only_surviving_nodes_and_links() {
    let reduced = reduced_workflow(&chain_workflow(), &[1, 2]);

    let ids: Vec<i64> = reduced.nodes.iter().map(|n| n.id).collect();
    assert_eq!(ids, vec![1, 2]);
    assert_eq!(reduced.links.len(), 1, "only the 1 -> 2 link survives");
}

#[test]
fn submitted_workflow_is_the_reduction() {
    let mut client = FakeClient::with_updates(vec![Some(JobUpdate {
        done: true,
        outcomes: outcomes(vec![]),
    })]);

    execute_prefix(&chain_workflow(), &[1, 2], &mut client, &fast_options())
        .expect("should execute");

    let submitted = client.submitted.expect("client should have been called");
    assert_eq!(submitted.nodes.len(), 2);
    assert_eq!(submitted.links.len(), 1);
}

#[test]
fn empty_prefix_skips_submission() {
    let mut client = FakeClient::default();
    let report = execute_prefix(&chain_workflow(), &[], &mut client, &fast_options())
        .expect("should short-circuit");

    assert!(report.executed_nodes.is_empty());
    assert!(report.execution_errors.is_empty());
    assert!(!report.timed_out);
    assert!(client.submitted.is_none());
}

// =============================================================================
// Polling outcomes
// =============================================================================

#[test]
fn completed_job_reports_per_node_outcomes() {
    let mut client = FakeClient::with_updates(vec![
        None, // not started yet
        Some(JobUpdate {
            done: false,
            outcomes: outcomes(vec![(1, NodeOutcome::Completed)]),
        }),
        Some(JobUpdate {
            done: true,
            outcomes: outcomes(vec![
                (2, NodeOutcome::Failed("missing input file".into())),
                (3, NodeOutcome::Completed),
            ]),
        }),
    ]);

    let report = execute_prefix(&chain_workflow(), &[1, 2, 3], &mut client, &fast_options())
        .expect("should execute");

    assert!(!report.timed_out);
    assert_eq!(report.executed_nodes, vec![1, 3]);
    assert_eq!(
        report.execution_errors.get(&2).map(String::as_str),
        Some("missing input file")
    );
}

#[test]
fn timeout_is_a_result_with_partial_data() {
    let mut client = FakeClient::with_updates(vec![Some(JobUpdate {
        done: false,
        outcomes: outcomes(vec![(1, NodeOutcome::Completed)]),
    })]);

    let options = ExecOptions {
        timeout: Duration::ZERO,
        poll_interval: Duration::from_millis(1),
    };
    let report = execute_prefix(&chain_workflow(), &[1, 2, 3], &mut client, &options)
        .expect("timeout is not an error");

    assert!(report.timed_out);
    // Only explicitly completed nodes are vouched for.
    assert_eq!(report.executed_nodes, vec![1]);
    assert!(report.execution_errors.is_empty());
}

#[test]
fn submit_failure_means_execution_could_not_start() {
    let mut client = FakeClient {
        fail_submit: true,
        ..Default::default()
    };

    let err = execute_prefix(&chain_workflow(), &[1, 2], &mut client, &fast_options())
        .expect_err("should fail");
    assert!(matches!(err, ExecError::Submit(_)));
    assert!(err.to_string().contains("could not start"));
}

#[test]
fn poll_failure_surfaces_as_poll_error() {
    let mut client = FakeClient {
        fail_poll: true,
        ..Default::default()
    };

    let err = execute_prefix(&chain_workflow(), &[1, 2], &mut client, &fast_options())
        .expect_err("should fail");
    assert!(matches!(err, ExecError::Poll { .. }));
}

#[test]
fn failures_fold_into_execution_level_errors() {
    let wf = chain_workflow();
    let mut client = FakeClient::with_updates(vec![Some(JobUpdate {
        done: true,
        outcomes: outcomes(vec![(2, NodeOutcome::Failed("boom".into()))]),
    })]);

    let report =
        execute_prefix(&wf, &[1, 2, 3], &mut client, &fast_options()).expect("should execute");
    let errors = report.as_validation_errors(&wf);

    assert_eq!(errors.len(), 1, "got: {:?}", errors);
    assert_eq!(errors[0].level, Level::Execution);
    assert_eq!(errors[0].node_id, 2);
    assert_eq!(errors[0].node_type, "ImageBlur");
    assert_eq!(errors[0].message, "boom");
}
