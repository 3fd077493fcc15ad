use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::fmt::SubscriberBuilder;

use hapd::api::{
    classify_with, draw_samples, run_hapd, ClassifyCfg, CubicIrrationalResult, Family, SampleCfg,
};

mod provenance;
mod table;

use provenance::{write_sidecar, Payload};

#[derive(Parser)]
#[command(name = "hapd-cli")]
#[command(about = "Cubic-irrational classifier runner (HAPD + companion-matrix verification)")]
struct Cmd {
    /// Optional VK ticket UUID; propagated to outputs and logs
    #[arg(long)]
    vk: Option<String>,

    #[command(subcommand)]
    action: Action,
}

/// Classifier knobs shared by the commands.
#[derive(clap::Args, Clone, Copy, Debug)]
struct Tuning {
    /// Tolerance used throughout (typical: 1e-6, 1e-10, 1e-14)
    #[arg(long, default_value_t = 1e-10)]
    precision: f64,
    /// Cap on HAPD iterations
    #[arg(long, default_value_t = 1000)]
    max_iterations: usize,
    /// Coefficient range [-B, B] of the cubic relation search
    #[arg(long, default_value_t = 100)]
    coefficient_bound: i64,
}

impl Tuning {
    fn cfg(&self) -> ClassifyCfg {
        ClassifyCfg {
            coefficient_bound: self.coefficient_bound,
            ..ClassifyCfg::default()
        }
        .with_precision(self.precision)
        .with_max_iterations(self.max_iterations)
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FamilyArg {
    Rational,
    Quadratic,
    Cubic,
    Mixed,
}

impl From<FamilyArg> for Family {
    fn from(f: FamilyArg) -> Self {
        match f {
            FamilyArg::Rational => Family::Rational,
            FamilyArg::Quadratic => Family::Quadratic,
            FamilyArg::Cubic => Family::Cubic,
            FamilyArg::Mixed => Family::Mixed,
        }
    }
}

#[derive(Subcommand)]
enum Action {
    /// Classify one number; optionally write the full result as JSON
    Classify {
        #[arg(long, allow_hyphen_values = true)]
        alpha: f64,
        #[command(flatten)]
        tuning: Tuning,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Write the HAPD step sequence of one number as CSV/Parquet
    Sequence {
        #[arg(long, allow_hyphen_values = true)]
        alpha: f64,
        #[command(flatten)]
        tuning: Tuning,
        #[arg(long)]
        out: PathBuf,
    },
    /// Classify seeded samples with known ground truth and write one row each
    Sweep {
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long, default_value_t = 100)]
        count: u64,
        #[arg(long, value_enum, default_value_t = FamilyArg::Mixed)]
        family: FamilyArg,
        #[command(flatten)]
        tuning: Tuning,
        #[arg(long)]
        out: PathBuf,
    },
    /// Print a small provenance JSON block
    Report,
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Classify { alpha, tuning, out } => classify(alpha, tuning, out, cmd.vk),
        Action::Sequence { alpha, tuning, out } => sequence(alpha, tuning, out, cmd.vk),
        Action::Sweep {
            seed,
            count,
            family,
            tuning,
            out,
        } => sweep(seed, count, family.into(), tuning, out, cmd.vk),
        Action::Report => report(cmd.vk),
    }
}

fn classify(alpha: f64, tuning: Tuning, out: Option<PathBuf>, vk: Option<String>) -> Result<()> {
    tracing::info!(alpha, precision = tuning.precision, vk = ?vk, "classify");
    let cfg = tuning.cfg();
    let result = classify_with(alpha, &cfg)?;
    println!("{}", summary_line(&result));

    if let Some(out) = out {
        provenance::ensure_parent(&out)?;
        std::fs::write(&out, serde_json::to_vec_pretty(&result)?)
            .with_context(|| format!("writing {}", out.display()))?;
        let params = serde_json::json!({ "alpha": alpha, "cfg": cfg });
        write_sidecar(&out, Payload::new(params).with_vk(vk))?;
        tracing::info!(out = %out.display(), "result_written");
    }
    Ok(())
}

fn sequence(alpha: f64, tuning: Tuning, out: PathBuf, vk: Option<String>) -> Result<()> {
    tracing::info!(alpha, out = %out.display(), vk = ?vk, "sequence");
    if !alpha.is_finite() {
        anyhow::bail!("alpha must be finite, got {alpha}");
    }
    let cfg = tuning.cfg();
    let hapd_result = run_hapd(alpha, &cfg);
    let mut df = table::sequence_frame(&hapd_result)?;
    table::write_table(&mut df, &out)?;
    tracing::info!(
        rows = df.height(),
        status = ?hapd_result.status,
        period_length = hapd_result.period_length,
        "sequence_written"
    );
    let params = serde_json::json!({ "alpha": alpha, "cfg": cfg });
    write_sidecar(&out, Payload::new(params).with_vk(vk))?;
    Ok(())
}

fn sweep(
    seed: u64,
    count: u64,
    family: Family,
    tuning: Tuning,
    out: PathBuf,
    vk: Option<String>,
) -> Result<()> {
    tracing::info!(seed, count, ?family, out = %out.display(), vk = ?vk, "sweep");
    let cfg = tuning.cfg();
    let sample_cfg = SampleCfg {
        family,
        ..SampleCfg::default()
    };
    let rows = draw_samples(sample_cfg, seed, count)
        .into_iter()
        .map(|s| {
            let r = classify_with(s.alpha, &cfg)?;
            Ok((s, r))
        })
        .collect::<Result<Vec<_>>>()?;
    let mut df = table::sweep_frame(&rows)?;
    table::write_table(&mut df, &out)?;
    let summary = table::accuracy_summary(&df)?;
    println!("{summary}");

    let params = serde_json::json!({
        "seed": seed,
        "count": count,
        "family": family,
        "cfg": cfg,
    });
    write_sidecar(&out, Payload::new(params).with_vk(vk))?;
    tracing::info!(rows = df.height(), out = %out.display(), "sweep_written");
    Ok(())
}

/// Provenance block printed by `report`.
#[derive(Serialize)]
struct Report {
    code_rev: String,
    hapd_version: &'static str,
    vk: Option<String>,
    defaults: ClassifyCfg,
}

fn report(vk: Option<String>) -> Result<()> {
    let obj = Report {
        code_rev: provenance::current_git_rev(),
        hapd_version: hapd::VERSION,
        vk,
        defaults: ClassifyCfg::default(),
    };
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}

fn summary_line(r: &CubicIrrationalResult) -> String {
    let mut line = format!(
        "alpha={} class={} hapd_steps={} period={}",
        r.alpha,
        r.classification(),
        r.hapd_result.sequence.len(),
        r.hapd_result.period_length
    );
    if let Some(q) = &r.rational {
        line.push_str(&format!(" value={}/{}", q.numerator, q.denominator));
    }
    if let Some(q) = &r.quadratic {
        let (a, b, c) = q.coefficients;
        line.push_str(&format!(" quadratic=({a}, {b}, {c})"));
    }
    if let Some(m) = &r.matrix_result {
        line.push_str(&format!(
            " cubic=\"{}\" verified={}",
            m.minimal_polynomial, m.is_cubic_irrational
        ));
    }
    if let Some(rel) = &r.higher_degree_relation {
        line.push_str(&format!(" relation=\"{rel}\""));
    }
    line
}
