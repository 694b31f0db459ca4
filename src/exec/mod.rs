//! Partial execution of the validated prefix against a running application.
//!
//! The HTTP client is an external collaborator; this module only defines the
//! seam (`JobClient`) and the submit-and-poll loop around it. Polling is
//! blocking on a fixed interval. A timeout is a result, not an error: the
//! report carries whatever completed plus the `timed_out` flag, and the job
//! keeps running server-side (interrupting it is the caller's business).

use std::collections::{BTreeMap, HashSet};
use std::time::{Duration, Instant};

use crate::error::ValidationError;
use crate::parse::types::{Link, Workflow};

/// Submit/poll interface to the running application.
pub trait JobClient {
    /// Queue a workflow for execution, returning the job id.
    fn submit(&mut self, workflow: &Workflow) -> Result<String, ClientError>;

    /// Fetch the current state of a queued job. `None` means the job has not
    /// started yet.
    fn poll(&mut self, job_id: &str) -> Result<Option<JobUpdate>, ClientError>;
}

/// Transport or protocol fault raised by a `JobClient` implementation.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{message}")]
pub struct ClientError {
    pub message: String,
}

impl ClientError {
    pub fn new(message: impl Into<String>) -> Self {
        ClientError {
            message: message.into(),
        }
    }
}

/// Why a partial execution attempt could not produce a report. Per-node
/// failures reported by the application are not errors here; they land in
/// `ExecutionReport::execution_errors`.
#[derive(Debug, thiserror::Error)]
pub enum ExecError {
    #[error("execution phase could not start: {0}")]
    Submit(#[source] ClientError),
    #[error("lost contact with server while polling job {job_id}: {source}")]
    Poll {
        job_id: String,
        #[source]
        source: ClientError,
    },
}

/// One poll's view of a running job.
#[derive(Debug, Clone, Default)]
pub struct JobUpdate {
    pub done: bool,
    pub outcomes: BTreeMap<i64, NodeOutcome>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeOutcome {
    Completed,
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct ExecOptions {
    pub timeout: Duration,
    pub poll_interval: Duration,
}

impl Default for ExecOptions {
    fn default() -> Self {
        ExecOptions {
            timeout: Duration::from_secs(30),
            poll_interval: Duration::from_millis(500),
        }
    }
}

/// Per-node outcomes of a partial execution attempt.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExecutionReport {
    /// Nodes that ran without the application reporting a failure.
    pub executed_nodes: Vec<i64>,
    /// Application-reported failures, per node.
    pub execution_errors: BTreeMap<i64, String>,
    /// The deadline elapsed before the job finished; `executed_nodes` covers
    /// only what completed in time.
    pub timed_out: bool,
}

impl ExecutionReport {
    /// Fold per-node failures into execution-level validation errors, with
    /// node types looked up from the workflow.
    pub fn as_validation_errors(&self, workflow: &Workflow) -> Vec<ValidationError> {
        self.execution_errors
            .iter()
            .map(|(&node_id, message)| {
                let node_type = workflow
                    .nodes
                    .iter()
                    .find(|n| n.id == node_id)
                    .map_or("unknown", |n| n.node_type.as_str());
                ValidationError::execution(node_id, node_type, message.clone())
            })
            .collect()
    }
}

/// Submit exactly the executable node subset and poll until the job finishes
/// or `options.timeout` elapses.
pub fn execute_prefix(
    workflow: &Workflow,
    executable: &[i64],
    client: &mut dyn JobClient,
    options: &ExecOptions,
) -> Result<ExecutionReport, ExecError> {
    let reduced = reduced_workflow(workflow, executable);
    if reduced.nodes.is_empty() {
        return Ok(ExecutionReport::default());
    }

    let job_id = client.submit(&reduced).map_err(ExecError::Submit)?;
    log::debug!(
        "queued partial execution of {} node(s) as job {}",
        reduced.nodes.len(),
        job_id
    );

    let deadline = Instant::now() + options.timeout;
    let mut outcomes: BTreeMap<i64, NodeOutcome> = BTreeMap::new();

    loop {
        let update = client.poll(&job_id).map_err(|source| ExecError::Poll {
            job_id: job_id.clone(),
            source,
        })?;

        if let Some(update) = update {
            outcomes.extend(update.outcomes);
            if update.done {
                return Ok(report(executable, outcomes, false));
            }
        }

        if Instant::now() >= deadline {
            log::warn!("job {} did not finish within {:?}", job_id, options.timeout);
            return Ok(report(executable, outcomes, true));
        }
        std::thread::sleep(options.poll_interval);
    }
}

/// The workflow restricted to `executable` nodes and the links between them.
pub fn reduced_workflow(workflow: &Workflow, executable: &[i64]) -> Workflow {
    let keep: HashSet<i64> = executable.iter().copied().collect();

    let nodes = workflow
        .nodes
        .iter()
        .filter(|n| keep.contains(&n.id))
        .cloned()
        .collect();

    let links = workflow
        .links
        .iter()
        .filter(|raw| {
            Link::from_value(raw)
                .is_some_and(|l| keep.contains(&l.from_node) && keep.contains(&l.to_node))
        })
        .cloned()
        .collect();

    Workflow { nodes, links }
}

fn report(
    executable: &[i64],
    outcomes: BTreeMap<i64, NodeOutcome>,
    timed_out: bool,
) -> ExecutionReport {
    let mut execution_errors = BTreeMap::new();
    let mut completed = HashSet::new();

    for (node_id, outcome) in outcomes {
        match outcome {
            NodeOutcome::Completed => {
                completed.insert(node_id);
            }
            NodeOutcome::Failed(message) => {
                execution_errors.insert(node_id, message);
            }
        }
    }

    // A finished job vouches for every node it did not fail; a timed-out one
    // vouches only for nodes it explicitly reported complete.
    let executed_nodes = executable
        .iter()
        .copied()
        .filter(|id| {
            if timed_out {
                completed.contains(id)
            } else {
                !execution_errors.contains_key(id)
            }
        })
        .collect();

    ExecutionReport {
        executed_nodes,
        execution_errors,
        timed_out,
    }
}
