use anyhow::{Context, Result};
use serde_json::{json, Value};
use std::fs;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Metadata recorded next to a run's outputs.
pub struct Payload {
    pub config: Value,
    pub outputs: Vec<PathBuf>,
    pub report: Value,
}

impl Payload {
    pub fn new(config: Value) -> Self {
        Self {
            config,
            outputs: Vec::new(),
            report: Value::Null,
        }
    }

    pub fn with_outputs<P: AsRef<Path>>(mut self, outputs: impl IntoIterator<Item = P>) -> Self {
        self.outputs
            .extend(outputs.into_iter().map(|p| p.as_ref().to_path_buf()));
        self
    }

    pub fn with_report(mut self, report: Value) -> Self {
        self.report = report;
        self
    }
}

/// Write `<dir>/<name>.provenance.json` containing the git commit, callsite,
/// config, run report, and outputs.
#[track_caller]
pub fn write_sidecar(dir: &Path, name: &str, payload: Payload) -> Result<PathBuf> {
    let provenance_path = provenance_path(dir, name);
    if !dir.as_os_str().is_empty() {
        fs::create_dir_all(dir)
            .with_context(|| format!("creating provenance dir {}", dir.display()))?;
    }

    let callsite = Location::caller();
    let outputs: Vec<String> = payload
        .outputs
        .iter()
        .map(|p| p.to_string_lossy().into_owned())
        .collect();
    let doc = json!({
        "code_rev": current_git_rev(),
        "version": cubeball::VERSION,
        "callsite": {
            "file": callsite.file(),
            "line": callsite.line()
        },
        "config": payload.config,
        "report": payload.report,
        "outputs": outputs
    });
    fs::write(&provenance_path, serde_json::to_vec_pretty(&doc)?)
        .with_context(|| format!("writing {}", provenance_path.display()))?;
    Ok(provenance_path)
}

fn provenance_path(dir: &Path, name: &str) -> PathBuf {
    let name = if name.is_empty() { "run" } else { name };
    dir.join(format!("{name}.provenance.json"))
}

pub fn current_git_rev() -> String {
    if let Some(from_env) = option_env!("GIT_COMMIT") {
        if !from_env.is_empty() {
            return from_env.to_string();
        }
    }
    if let Ok(env_override) = std::env::var("GIT_COMMIT") {
        if !env_override.is_empty() {
            return env_override;
        }
    }
    Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .and_then(|output| {
            if output.status.success() {
                String::from_utf8(output.stdout)
                    .ok()
                    .map(|s| s.trim().to_string())
            } else {
                None
            }
        })
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn provenance_path_uses_run_name() {
        let derived = provenance_path(Path::new("/tmp/output"), "demo");
        assert_eq!(derived, Path::new("/tmp/output/demo.provenance.json"));
        let unnamed = provenance_path(Path::new("out"), "");
        assert_eq!(unnamed, Path::new("out/run.provenance.json"));
    }

    #[test]
    fn write_sidecar_lists_outputs_and_config() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("runs");
        let artifact = out.join("cube-demo.out");
        let payload = Payload::new(json!({"name": "demo", "seed": 4}))
            .with_outputs([&artifact])
            .with_report(json!({"rows": 3}));
        let prov_path = write_sidecar(&out, "demo", payload).unwrap();
        assert!(prov_path.ends_with("demo.provenance.json"));
        let parsed: Value = serde_json::from_slice(&fs::read(prov_path).unwrap()).unwrap();
        assert_eq!(parsed["outputs"][0], artifact.to_string_lossy().as_ref());
        assert_eq!(parsed["config"]["seed"], 4);
        assert_eq!(parsed["report"]["rows"], 3);
        assert!(parsed["callsite"]["file"].as_str().unwrap().ends_with("provenance.rs"));
    }
}
