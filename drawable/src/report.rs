use crate::density::DensityTarget;
use anyhow::Result;
use std::path::{Path, PathBuf};

/// Result of generating the icon for a single density.
#[derive(Debug)]
pub struct TargetOutcome {
    pub target: DensityTarget,
    pub path: PathBuf,
    pub result: Result<()>,
}

impl TargetOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }

    pub fn error(&self) -> Option<&anyhow::Error> {
        self.result.as_ref().err()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Outcomes of every attempted density, in processing order.
#[derive(Debug, Default)]
pub struct Summary {
    outcomes: Vec<TargetOutcome>,
}

impl Summary {
    pub fn push(&mut self, outcome: TargetOutcome) {
        self.outcomes.push(outcome);
    }

    pub fn outcomes(&self) -> &[TargetOutcome] {
        &self.outcomes
    }

    pub fn written(&self) -> impl Iterator<Item = &TargetOutcome> + '_ {
        self.outcomes.iter().filter(|outcome| outcome.is_ok())
    }

    pub fn failures(&self) -> impl Iterator<Item = &TargetOutcome> + '_ {
        self.outcomes.iter().filter(|outcome| !outcome.is_ok())
    }

    pub fn num_written(&self) -> usize {
        self.written().count()
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn is_success(&self) -> bool {
        self.outcomes.iter().all(TargetOutcome::is_ok)
    }
}

impl std::fmt::Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}/{} icons written", self.num_written(), self.len())?;
        for failure in self.failures() {
            if let Some(err) = failure.error() {
                write!(f, "\n{}: {:#}", failure.path.display(), err)?;
            }
        }
        Ok(())
    }
}
