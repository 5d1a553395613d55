use crate::algorithms::AlgorithmKind;
use crate::core::{BenchError, BenchmarkConfig, DiagnosticReporter};
use crate::engine::BenchmarkEngine;
use crate::services::{write_json, write_text, RunSummary};
use anyhow::Result;
use std::io::Write;
use std::ops::RangeInclusive;

/// `test` で使うデータサイズ指数
pub const TEST_SIZE_EXPONENTS: RangeInclusive<u32> = 5..=10;

/// `analyze` で使うスレッド数指数
pub const ANALYZE_THREAD_EXPONENTS: RangeInclusive<u32> = 0..=4;

/// 2の冪のスイープ範囲
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SweepPlan {
    pub thread_exponents: RangeInclusive<u32>,
    pub size_exponents: RangeInclusive<u32>,
}

impl SweepPlan {
    pub const MAX_THREAD_EXPONENT: u32 = 31;
    pub const MAX_SIZE_EXPONENT: u32 = 63;

    /// 範囲を上限に丸め、逆順なら入れ替える
    pub fn new(fire_start: u32, fire_end: u32, size_start: u32, size_end: u32) -> Self {
        let max_size = Self::MAX_SIZE_EXPONENT.min(usize::BITS - 1);
        let max_threads = Self::MAX_THREAD_EXPONENT.min(usize::BITS - 1);
        Self {
            thread_exponents: ordered(fire_start.min(max_threads), fire_end.min(max_threads)),
            size_exponents: ordered(size_start.min(max_size), size_end.min(max_size)),
        }
    }

    /// (スレッド数, データサイズ) をデータサイズ外側のループ順で返す
    pub fn points(&self) -> Vec<(usize, usize)> {
        self.size_exponents
            .clone()
            .flat_map(|size| {
                self.thread_exponents
                    .clone()
                    .map(move |threads| (1usize << threads, 1usize << size))
            })
            .collect()
    }
}

fn ordered(a: u32, b: u32) -> RangeInclusive<u32> {
    if a <= b {
        a..=b
    } else {
        b..=a
    }
}

/// スイープを実行して結果を書き出す
///
/// テキストモードでは各実行の計測行を随時書き、最後に測定点ごとの要約行を書く。
/// JSONモードでは全測定点を1つの配列としてまとめて書く。
pub fn execute_sweep<C, R, W>(
    engine: &BenchmarkEngine<C, R>,
    algorithm: AlgorithmKind,
    plan: &SweepPlan,
    json: bool,
    out: &mut W,
) -> Result<Vec<RunSummary>>
where
    C: BenchmarkConfig,
    R: DiagnosticReporter,
    W: Write,
{
    let mut summaries = Vec::new();
    for (threads, size) in plan.points() {
        let measurements = engine.run_repeated(algorithm, threads, size)?;
        if !json {
            for measurement in &measurements {
                writeln!(out, "{measurement}")?;
            }
        }
        let summary = RunSummary::new(algorithm.name(), &measurements).ok_or_else(|| {
            BenchError::internal(anyhow::anyhow!("{algorithm}: 計測結果がありません"))
        })?;
        summaries.push(summary);
    }

    if json {
        write_json(out, &summaries)?;
    } else {
        write_text(out, &summaries)?;
    }
    Ok(summaries)
}

/// `run` コマンド
pub fn execute_run<C, R, W>(
    engine: &BenchmarkEngine<C, R>,
    algorithm: AlgorithmKind,
    plan: &SweepPlan,
    json: bool,
    out: &mut W,
) -> Result<Vec<RunSummary>>
where
    C: BenchmarkConfig,
    R: DiagnosticReporter,
    W: Write,
{
    if !json {
        writeln!(out, "Running {algorithm} with varying threads and data sizes...")?;
    }
    execute_sweep(engine, algorithm, plan, json, out)
}

/// `test` コマンド
pub fn execute_test<C, R, W>(
    engine: &BenchmarkEngine<C, R>,
    algorithm: AlgorithmKind,
    fire_start: u32,
    fire_end: u32,
    json: bool,
    out: &mut W,
) -> Result<Vec<RunSummary>>
where
    C: BenchmarkConfig,
    R: DiagnosticReporter,
    W: Write,
{
    if !json {
        writeln!(out, "Testing {algorithm} with varying threads and data sizes...")?;
    }
    let plan = SweepPlan::new(
        fire_start,
        fire_end,
        *TEST_SIZE_EXPONENTS.start(),
        *TEST_SIZE_EXPONENTS.end(),
    );
    execute_run(engine, algorithm, &plan, json, out)
}

/// `analyze` コマンド
pub fn execute_analyze<C, R, W>(
    engine: &BenchmarkEngine<C, R>,
    algorithm: AlgorithmKind,
    json: bool,
    out: &mut W,
) -> Result<Vec<RunSummary>>
where
    C: BenchmarkConfig,
    R: DiagnosticReporter,
    W: Write,
{
    if !json {
        writeln!(out, "Analyzing performance for {algorithm} with various configurations...")?;
    }
    execute_test(
        engine,
        algorithm,
        *ANALYZE_THREAD_EXPONENTS.start(),
        *ANALYZE_THREAD_EXPONENTS.end(),
        json,
        out,
    )
}
