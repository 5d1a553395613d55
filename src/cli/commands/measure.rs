use crate::algorithms::AlgorithmKind;
use crate::core::{BenchError, BenchmarkConfig, DiagnosticReporter};
use crate::engine::BenchmarkEngine;
use crate::services::{write_json, write_text, RunSummary};
use anyhow::Result;
use std::io::Write;

/// 1つの構成だけを実行する
///
/// スレッド数を省略した場合は設定の既定値（論理CPU数）を使う。
pub fn execute_measure<C, R, W>(
    engine: &BenchmarkEngine<C, R>,
    algorithm: AlgorithmKind,
    size: usize,
    threads: Option<usize>,
    json: bool,
    out: &mut W,
) -> Result<RunSummary>
where
    C: BenchmarkConfig,
    R: DiagnosticReporter,
    W: Write,
{
    let threads = threads.unwrap_or_else(|| engine.config().default_thread_count());
    let measurements = engine.run_repeated(algorithm, threads, size)?;

    let summary = RunSummary::new(algorithm.name(), &measurements).ok_or_else(|| {
        BenchError::internal(anyhow::anyhow!("{algorithm}: 計測結果がありません"))
    })?;

    if json {
        write_json(out, std::slice::from_ref(&summary))?;
    } else {
        for measurement in &measurements {
            writeln!(out, "{measurement}")?;
        }
        write_text(out, std::slice::from_ref(&summary))?;
    }
    Ok(summary)
}
