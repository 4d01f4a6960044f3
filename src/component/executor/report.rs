//! Apply outcome types and report.

/// What happened to a single op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpStatus {
    /// The executor changed the staging root.
    Applied,
    /// Already in the desired state.
    Unchanged,
    /// Handed to an external collaborator (package manager, broker).
    Delegated,
}

#[derive(Debug, Clone)]
pub struct OpOutcome {
    /// Display form of the op; secrets are never included.
    pub op: String,
    pub status: OpStatus,
}

/// Results of applying a plan.
#[derive(Debug, Clone, Default)]
pub struct ApplyReport {
    pub outcomes: Vec<OpOutcome>,
}

impl ApplyReport {
    pub fn count(&self, status: OpStatus) -> usize {
        self.outcomes.iter().filter(|o| o.status == status).count()
    }

    /// True when nothing had to change locally.
    pub fn converged(&self) -> bool {
        self.count(OpStatus::Applied) == 0
    }

    /// Print the report to stdout.
    pub fn print(&self) {
        println!("=== Apply Results ===\n");

        for outcome in &self.outcomes {
            let status_str = match outcome.status {
                OpStatus::Applied => "APPLIED",
                OpStatus::Unchanged => "OK",
                OpStatus::Delegated => "DELEGATED",
            };
            println!("  [{}] {}", status_str, outcome.op);
        }

        println!();
        println!(
            "Summary: {} applied, {} unchanged, {} delegated",
            self.count(OpStatus::Applied),
            self.count(OpStatus::Unchanged),
            self.count(OpStatus::Delegated)
        );
    }
}
