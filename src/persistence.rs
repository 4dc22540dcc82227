//! Saving and loading redaction plans and rule files as JSON.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::{RedactionPlan, Region, Rule};
use crate::error::{RedactorError, RedactorResult};

/// On-disk shape of a plan. `totalRedactions` is written for readers and
/// ignored on load; the count is always derived from `regions`.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlanRecord {
    source_path: PathBuf,
    regions: Vec<Region>,
    #[serde(default)]
    total_redactions: usize,
}

impl From<&RedactionPlan> for PlanRecord {
    fn from(plan: &RedactionPlan) -> Self {
        Self {
            source_path: plan.source_path.clone(),
            regions: plan.regions.clone(),
            total_redactions: plan.total_redactions(),
        }
    }
}

/// Serializes a plan to pretty-printed JSON.
pub fn plan_to_json(plan: &RedactionPlan) -> RedactorResult<String> {
    serde_json::to_string_pretty(&PlanRecord::from(plan)).map_err(|e| RedactorError::InvalidPlan {
        path: plan.source_path.clone(),
        reason: e.to_string(),
    })
}

/// Parses a plan; `origin` names where the JSON came from in errors.
pub fn plan_from_json(json: &str, origin: &Path) -> RedactorResult<RedactionPlan> {
    let record: PlanRecord = serde_json::from_str(json).map_err(|e| RedactorError::InvalidPlan {
        path: origin.to_path_buf(),
        reason: e.to_string(),
    })?;
    Ok(RedactionPlan::new(record.source_path, record.regions))
}

pub fn save_plan(plan: &RedactionPlan, path: &Path) -> RedactorResult<()> {
    let json = plan_to_json(plan)?;
    fs::write(path, json).map_err(|e| RedactorError::Io {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Loads a plan, distinguishing a missing file from an unparseable one.
pub fn load_plan(path: &Path) -> RedactorResult<RedactionPlan> {
    let json = read_existing(path)?;
    plan_from_json(&json, path)
}

/// Loads a JSON array of rules.
pub fn load_rules(path: &Path) -> RedactorResult<Vec<Rule>> {
    let json = read_existing(path)?;
    serde_json::from_str(&json).map_err(|e| RedactorError::InvalidInput {
        parameter: path.display().to_string(),
        reason: format!("invalid rules file: {}", e),
    })
}

fn read_existing(path: &Path) -> RedactorResult<String> {
    fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => RedactorError::DocumentNotFound {
            path: path.to_path_buf(),
        },
        _ => RedactorError::Io {
            path: path.to_path_buf(),
            source: e,
        },
    })
}
