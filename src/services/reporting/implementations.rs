// 結果報告の具象実装

use crate::core::{BenchResult, Measurement};
use serde::{Deserialize, Serialize};
use std::io::Write;

/// スイープの1測定点（アルゴリズム・スレッド数・データサイズ）の集計結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub algorithm: String,
    pub threads: usize,
    pub data_size: usize,
    /// 平均に含めた測定回数
    pub test_count: usize,
    pub result: Measurement,
}

impl RunSummary {
    pub fn new(algorithm: impl Into<String>, measurements: &[Measurement]) -> Option<Self> {
        let result = average_measurements(measurements)?;
        Some(Self {
            algorithm: algorithm.into(),
            threads: result.thread_count(),
            data_size: result.data_size(),
            test_count: measurements.len(),
            result,
        })
    }
}

/// 繰り返し測定を1つにまとめる
///
/// 経過時間は平均、正しさは全回のAND、開始は最初の回、終了は最後の回。
pub fn average_measurements(measurements: &[Measurement]) -> Option<Measurement> {
    let first = measurements.first()?;
    let last = measurements.last()?;

    let total: f64 = measurements.iter().map(Measurement::duration).sum();
    let correct = measurements.iter().all(Measurement::is_correct);

    Some(
        Measurement::new(
            first.thread_count(),
            first.data_size(),
            total / measurements.len() as f64,
            first.start(),
            last.end(),
            correct,
        )
        .with_iterative(first.iterative()),
    )
}

/// 全測定点を1つの整形済みJSON配列として書き出す
pub fn write_json<W: Write>(out: &mut W, summaries: &[RunSummary]) -> BenchResult<()> {
    serde_json::to_writer_pretty(&mut *out, summaries)?;
    writeln!(out)?;
    Ok(())
}

/// 測定点ごとの要約行を書き出す
pub fn write_text<W: Write>(out: &mut W, summaries: &[RunSummary]) -> BenchResult<()> {
    for summary in summaries {
        writeln!(
            out,
            "Algorithm: {}, Threads: {}, Data size: {}",
            summary.algorithm, summary.threads, summary.data_size
        )?;
    }
    Ok(())
}
