use anyhow::{Context, Result};
use serde_json::{json, Value};
use std::fs;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Metadata used to generate a provenance sidecar.
pub struct Payload {
    pub params: Value,
    pub vk: Option<String>,
}

impl Payload {
    pub fn new(params: Value) -> Self {
        Self { params, vk: None }
    }

    pub fn with_vk(mut self, vk: Option<String>) -> Self {
        self.vk = vk;
        self
    }
}

/// Write `<artifact>.provenance.json` containing the git commit, crate version,
/// callsite, params, and outputs.
#[track_caller]
pub fn write_sidecar<P: AsRef<Path>>(artifact: P, payload: Payload) -> Result<PathBuf> {
    let artifact = artifact.as_ref();
    let provenance_path = provenance_path(artifact);
    ensure_parent(&provenance_path)?;

    let callsite = Location::caller();
    let doc = json!({
        "code_rev": current_git_rev(),
        "hapd_version": hapd::VERSION,
        "callsite": {
            "file": callsite.file(),
            "line": callsite.line()
        },
        "vk": payload.vk,
        "params": payload.params,
        "outputs": [artifact.to_string_lossy()]
    });
    fs::write(&provenance_path, serde_json::to_vec_pretty(&doc)?)
        .with_context(|| format!("writing {}", provenance_path.display()))?;
    Ok(provenance_path)
}

/// Create the parent directory of `path` if it has one.
pub fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating dir {}", parent.display()))?;
        }
    }
    Ok(())
}

fn provenance_path(artifact: &Path) -> PathBuf {
    artifact.with_extension("provenance.json")
}

/// Commit from `GIT_COMMIT`, else `git rev-parse HEAD`, else the crate version.
pub fn current_git_rev() -> String {
    if let Some(rev) = std::env::var("GIT_COMMIT").ok().filter(|s| !s.is_empty()) {
        return rev;
    }
    Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .filter(|output| output.status.success())
        .and_then(|output| String::from_utf8(output.stdout).ok())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| format!("unknown (hapd {})", hapd::VERSION))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn provenance_path_rewrites_extension() {
        let base = Path::new("/tmp/output/plastic.json");
        let derived = provenance_path(base);
        assert_eq!(derived, Path::new("/tmp/output/plastic.provenance.json"));
    }

    #[test]
    fn git_rev_prefers_environment() {
        std::env::set_var("GIT_COMMIT", "0123abcd");
        assert_eq!(current_git_rev(), "0123abcd");
        std::env::set_var("GIT_COMMIT", "");
        assert!(!current_git_rev().is_empty());
        std::env::remove_var("GIT_COMMIT");
    }

    #[test]
    fn write_sidecar_creates_file() {
        let dir = tempdir().unwrap();
        let artifact = dir.path().join("nested").join("a.csv");
        let payload = Payload::new(json!({"alpha": 1.5})).with_vk(Some("t-1".into()));
        let prov_path = write_sidecar(&artifact, payload).unwrap();
        assert!(prov_path.exists());
        let parsed: Value = serde_json::from_slice(&fs::read(prov_path).unwrap()).unwrap();
        assert_eq!(parsed["outputs"][0], artifact.to_string_lossy().as_ref());
        assert_eq!(parsed["vk"], "t-1");
        assert_eq!(parsed["params"]["alpha"], 1.5);
        assert_eq!(parsed["hapd_version"], hapd::VERSION);
    }
}
