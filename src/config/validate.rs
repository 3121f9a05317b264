// src/config/validate.rs

use crate::config::model::{ConfigFile, JobConfig, ObserverConfig};
use crate::errors::{Result, ServmuxError};

/// Run basic semantic validation against a loaded configuration.
///
/// This checks:
/// - `program` is a non-empty command line
/// - every job has a positive, finite `delay`
/// - every job has at least one group, and no group is empty
/// - every observer has a non-empty `path`
///
/// It does **not** check that observer paths exist; a missing path is
/// surfaced as a non-fatal error when the observer is started.
pub fn validate_config(cfg: &ConfigFile) -> Result<()> {
    validate_program(cfg)?;
    for job in cfg.jobs.iter() {
        validate_job(job)?;
    }
    for observer in cfg.observers.iter() {
        validate_observer(observer)?;
    }
    Ok(())
}

fn validate_program(cfg: &ConfigFile) -> Result<()> {
    if cfg.program.split_whitespace().next().is_none() {
        return Err(ServmuxError::Config(
            "`program` must be a non-empty command line".to_string(),
        ));
    }
    Ok(())
}

fn validate_job(job: &JobConfig) -> Result<()> {
    let JobConfig::CommandSequence(seq) = job;

    if !(seq.delay.is_finite() && seq.delay > 0.0) {
        return Err(ServmuxError::Config(format!(
            "job '{}': `delay` must be a positive number of seconds (got {})",
            seq.title, seq.delay
        )));
    }

    if seq.groups.is_empty() {
        return Err(ServmuxError::Config(format!(
            "job '{}': `groups` must contain at least one group",
            seq.title
        )));
    }

    for (i, group) in seq.groups.iter().enumerate() {
        if group.is_empty() {
            return Err(ServmuxError::Config(format!(
                "job '{}': group {} must contain at least one command",
                seq.title, i
            )));
        }
    }

    Ok(())
}

fn validate_observer(observer: &ObserverConfig) -> Result<()> {
    let ObserverConfig::Directory(dir) = observer;

    if dir.path.trim().is_empty() {
        return Err(ServmuxError::Config(
            "observer: `path` must be non-empty".to_string(),
        ));
    }

    Ok(())
}
