//! Reference executor for a [`Plan`](super::Plan).
//!
//! Submodules by operation type:
//! - `files` - SSL directory and PEM files (Op::Dir, Op::File)
//! - `report` - per-op outcomes and the apply summary
//! - `helpers` - shared test utilities
//!
//! Only file materialization is performed here, under a staging root.
//! Package and broker ops belong to external collaborators and are
//! reported as delegated.

mod files;
mod report;

#[cfg(test)]
mod helpers;

pub use report::{ApplyReport, OpOutcome, OpStatus};

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use super::{Component, Op, Plan};

/// Where file ops land. Absolute op paths are re-rooted under `root`.
#[derive(Debug, Clone)]
pub struct ApplyContext {
    pub root: PathBuf,
}

impl ApplyContext {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Map an absolute node path into the staging root.
    pub fn staged(&self, path: &Path) -> PathBuf {
        self.root.join(path.strip_prefix("/").unwrap_or(path))
    }
}

/// Apply every component of the plan in order.
pub fn execute_plan(ctx: &ApplyContext, plan: &Plan) -> Result<ApplyReport> {
    let mut outcomes = Vec::new();
    for component in &plan.components {
        outcomes.extend(execute(ctx, component)?);
    }
    Ok(ApplyReport { outcomes })
}

/// Apply all ops of one component.
pub fn execute(ctx: &ApplyContext, component: &Component) -> Result<Vec<OpOutcome>> {
    println!("Applying {}...", component.name);

    let mut outcomes = Vec::with_capacity(component.ops.len());
    for op in &component.ops {
        let status = execute_op(ctx, op)
            .with_context(|| format!("in component '{}': {}", component.name, op))?;
        outcomes.push(OpOutcome {
            op: op.to_string(),
            status,
        });
    }
    Ok(outcomes)
}

/// Execute a single operation by routing to the appropriate handler.
fn execute_op(ctx: &ApplyContext, op: &Op) -> Result<OpStatus> {
    let status = match op {
        Op::Dir { path, recursive } => files::handle_dir(ctx, path, *recursive)?,
        Op::File {
            path,
            mode,
            content,
            ..
        } => files::handle_file(ctx, path, content.expose(), *mode)?,

        // Package manager and broker administration are external.
        Op::Package { .. } | Op::Vhost(_) | Op::BrokerUser { .. } => OpStatus::Delegated,
    };
    Ok(status)
}
