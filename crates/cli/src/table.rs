//! Tabular artifacts (CSV or Parquet, chosen by extension) for charting code.

use anyhow::{Context, Result};
use polars::prelude::*;
use std::fs::File;
use std::path::Path;

use hapd::api::{Classification, CubicIrrationalResult, HapdResult, Sample};

/// One row per HAPD step: the integer parts and the triple they came from.
pub fn sequence_frame(r: &HapdResult) -> Result<DataFrame> {
    let n = r.sequence.len();
    let step: Vec<u32> = (0..n as u32).collect();
    let a1: Vec<i64> = r.sequence.iter().map(|s| s.a1).collect();
    let a2: Vec<i64> = r.sequence.iter().map(|s| s.a2).collect();
    let v1: Vec<f64> = r.triples[..n].iter().map(|t| t.v1).collect();
    let v2: Vec<f64> = r.triples[..n].iter().map(|t| t.v2).collect();
    let v3: Vec<f64> = r.triples[..n].iter().map(|t| t.v3).collect();
    let in_period: Vec<bool> = (0..n)
        .map(|i| r.is_periodic() && i >= r.preperiod_length)
        .collect();
    let df = df!(
        "step" => step,
        "a1" => a1,
        "a2" => a2,
        "v1" => v1,
        "v2" => v2,
        "v3" => v3,
        "in_period" => in_period,
    )?;
    Ok(df)
}

/// One row per classified sample.
pub fn sweep_frame(rows: &[(Sample, CubicIrrationalResult)]) -> Result<DataFrame> {
    let index: Vec<u64> = rows.iter().map(|(s, _)| s.token.index).collect();
    let alpha: Vec<f64> = rows.iter().map(|(s, _)| s.alpha).collect();
    let label: Vec<String> = rows.iter().map(|(s, _)| s.label.clone()).collect();
    let expected: Vec<&str> = rows.iter().map(|(s, _)| s.expected.as_str()).collect();
    let got: Vec<Classification> = rows.iter().map(|(_, r)| r.classification()).collect();
    let correct: Vec<bool> = rows
        .iter()
        .zip(&got)
        .map(|((s, _), g)| s.expected == *g)
        .collect();
    let classification: Vec<&str> = got.iter().map(|g| g.as_str()).collect();
    let hapd_steps: Vec<u32> = rows
        .iter()
        .map(|(_, r)| r.hapd_result.sequence.len() as u32)
        .collect();
    let period_length: Vec<u32> = rows
        .iter()
        .map(|(_, r)| r.hapd_result.period_length as u32)
        .collect();
    let df = df!(
        "index" => index,
        "alpha" => alpha,
        "label" => label,
        "expected" => expected,
        "classification" => classification,
        "correct" => correct,
        "hapd_steps" => hapd_steps,
        "period_length" => period_length,
    )?;
    Ok(df)
}

/// Per-class sample counts and matches, in first-seen order.
pub fn accuracy_summary(df: &DataFrame) -> Result<DataFrame> {
    let summary = df
        .clone()
        .lazy()
        .group_by_stable([col("expected")])
        .agg([
            len().alias("samples"),
            col("correct").cast(DataType::UInt32).sum().alias("matched"),
        ])
        .collect()?;
    Ok(summary)
}

/// Write `df` to `out`; `.parquet` selects Parquet, anything else CSV.
pub fn write_table(df: &mut DataFrame, out: &Path) -> Result<()> {
    crate::provenance::ensure_parent(out)?;
    let file = File::create(out).with_context(|| format!("creating {}", out.display()))?;
    match out.extension().and_then(|e| e.to_str()) {
        Some("parquet") => {
            ParquetWriter::new(file)
                .finish(df)
                .with_context(|| format!("writing parquet {}", out.display()))?;
        }
        _ => {
            CsvWriter::new(file)
                .include_header(true)
                .finish(df)
                .with_context(|| format!("writing csv {}", out.display()))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hapd::api::{classify_with, draw_samples, run_hapd, ClassifyCfg, SampleCfg};
    use tempfile::tempdir;

    #[test]
    fn sequence_frame_has_one_row_per_step() {
        let r = run_hapd(1.324_717_957_244_746, &ClassifyCfg::default());
        let df = sequence_frame(&r).unwrap();
        assert_eq!(df.height(), r.sequence.len());
        assert_eq!(df.width(), 7);
    }

    #[test]
    fn sweep_csv_roundtrip_header() {
        let cfg = ClassifyCfg::default();
        let rows: Vec<_> = draw_samples(SampleCfg::default(), 1, 6)
            .into_iter()
            .map(|s| {
                let r = classify_with(s.alpha, &cfg).unwrap();
                (s, r)
            })
            .collect();
        let mut df = sweep_frame(&rows).unwrap();
        assert_eq!(df.height(), 6);
        let dir = tempdir().unwrap();
        let out = dir.path().join("sweep.csv");
        write_table(&mut df, &out).unwrap();
        let text = std::fs::read_to_string(&out).unwrap();
        assert!(text.starts_with("index,alpha,label,expected,classification,correct"));
        let summary = accuracy_summary(&df).unwrap();
        assert!(summary.height() >= 1);
        assert!(df.column("correct").unwrap().bool().unwrap().all(), "{df}");
    }
}
