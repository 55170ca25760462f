use std::fmt::Write;
use std::path::Path;

use crate::runner::SceneResult;

/// Results from every scene, as written with `--output`.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Baseline {
    pub label: String,
    pub seed: Option<u64>,
    pub results: Vec<SceneResult>,
}

/// Load a baseline from a JSON file. Returns None if it is missing or unreadable.
pub fn load_baseline(path: &Path) -> Option<Baseline> {
    let contents = std::fs::read_to_string(path).ok()?;
    serde_json::from_str(&contents).ok()
}

pub fn save_baseline(path: &Path, baseline: &Baseline) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(baseline).map_err(std::io::Error::other)?;
    std::fs::write(path, json)
}

/// Scenes whose mean step time grew by more than `threshold_pct` over the
/// baseline, with the percent change.
pub fn compare(current: &[SceneResult], baseline: &Baseline, threshold_pct: f64) -> Vec<(String, f64)> {
    let mut regressions = Vec::new();
    for result in current {
        let Some(base) = baseline
            .results
            .iter()
            .find(|b| b.scene_name == result.scene_name)
        else {
            continue;
        };
        if base.timings.mean_ms <= 0.0 {
            continue;
        }
        let pct_change = (result.timings.mean_ms - base.timings.mean_ms) / base.timings.mean_ms * 100.0;
        if pct_change > threshold_pct {
            regressions.push((result.scene_name.clone(), pct_change));
        }
    }
    regressions
}

/// Format results as a markdown summary table.
pub fn format_markdown(results: &[SceneResult]) -> String {
    let mut out = String::new();
    out.push_str("| Scene | Sources | Steps | Spawned | Peak particles | Smoke voxels | Retired | Violations | Mean (ms) | P95 (ms) | Max (ms) |\n");
    out.push_str("|-------|---------|-------|---------|----------------|--------------|---------|------------|-----------|----------|----------|\n");
    for r in results {
        let _ = writeln!(
            out,
            "| {} | {} | {} | {} | {} | {} | {} | {} | {:.3} | {:.3} | {:.3} |",
            r.scene_name,
            r.sources,
            r.steps,
            r.spawned,
            r.peak_particles,
            r.smoke_voxels,
            r.retired,
            r.ledger_violations,
            r.timings.mean_ms,
            r.timings.p95_ms,
            r.timings.max_ms,
        );
    }
    out
}

pub fn format_comparison(regressions: &[(String, f64)], threshold_pct: f64) -> String {
    if regressions.is_empty() {
        return format!("All scenes within {threshold_pct:.0}% threshold. No regressions detected.\n");
    }
    let mut out = format!("REGRESSIONS DETECTED (>{threshold_pct:.0}% threshold):\n");
    for (scene, pct) in regressions {
        let _ = writeln!(out, "  - {scene}: +{pct:.1}%");
    }
    out
}
