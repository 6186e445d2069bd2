use std::time::{Duration, Instant};

use tracing::{debug, trace};

use crate::error::Result;
use crate::hook::Hooked;

// ---------------------------------------------------------------------------
// HookRecord
// ---------------------------------------------------------------------------

/// A hook that ran to completion.
#[derive(Clone, Debug)]
pub struct HookRecord {
    pub description: String,
    pub elapsed: Duration,
}

// ---------------------------------------------------------------------------
// PipelineReport
// ---------------------------------------------------------------------------

/// Outcome of a successful pipeline run.
#[derive(Clone, Debug, Default)]
pub struct PipelineReport {
    /// Executed hooks in order.
    pub executed: Vec<HookRecord>,
    /// Total wall-clock time of the run.
    pub elapsed: Duration,
}

impl PipelineReport {
    pub fn len(&self) -> usize {
        self.executed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.executed.is_empty()
    }

    /// Descriptions of the executed hooks, in order.
    pub fn descriptions(&self) -> Vec<&str> {
        self.executed.iter().map(|r| r.description.as_str()).collect()
    }
}

// ---------------------------------------------------------------------------
// run_hooks
// ---------------------------------------------------------------------------

/// Run every hook of `target` in order.
///
/// The run is **fail-fast**: the first failing hook stops it and its error is
/// returned unchanged. Hooks that already ran keep their effects, so the
/// caller must treat `target` as unusable on error.
pub fn run_hooks<T: Hooked>(target: &mut T) -> Result<PipelineReport> {
    let pipeline_start = Instant::now();
    let hooks = target.hooks();
    let mut executed = Vec::with_capacity(hooks.len());

    for (index, hook) in hooks.iter().enumerate() {
        let hook_start = Instant::now();
        if let Err(err) = hook.call(target) {
            debug!(
                hook = hook.description(),
                index,
                error = %err,
                "hook failed; aborting pipeline"
            );
            return Err(err);
        }
        let elapsed = hook_start.elapsed();
        trace!(hook = hook.description(), index, ?elapsed, "hook ran");
        executed.push(HookRecord {
            description: hook.description().to_string(),
            elapsed,
        });
    }

    Ok(PipelineReport {
        executed,
        elapsed: pipeline_start.elapsed(),
    })
}
