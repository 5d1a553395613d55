// BenchmarkEngine - 1回の実行のオーケストレーション
// 検証 → 生成 → 分割 → 並列実行 → 合流 → マージ → 検証 → 解放 を1本の流れで管理する

use super::executor::ParallelExecutor;
use super::partitioner::WorkPartitioner;
use crate::{
    algorithms::{AlgorithmFamily, AlgorithmKind, MatrixTask, SearchingTask, SortingTask},
    core::{
        BenchResult, BenchmarkConfig, CancellationToken, DiagnosticReporter, Measurement,
        PartitionableTask, RunPhase,
    },
};
use chrono::Utc;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Instant;

/// 依存性注入によるベンチマークエンジン
///
/// 設定と診断出力をコンストラクタで受け取り、任意の `PartitionableTask` を
/// 同じ手順で実行・計測する。
pub struct BenchmarkEngine<C, R> {
    config: C,
    reporter: R,
}

/// スコープを抜けるときに `CleanedUp` を報告する
///
/// 入力バッファより先に宣言するので、バッファや部分結果が解放された後に報告される。
struct CleanupNotice<'r, R: DiagnosticReporter + ?Sized> {
    reporter: &'r R,
}

impl<R: DiagnosticReporter + ?Sized> Drop for CleanupNotice<'_, R> {
    fn drop(&mut self) {
        self.reporter.report_phase(RunPhase::CleanedUp);
    }
}

impl<C, R> BenchmarkEngine<C, R>
where
    C: BenchmarkConfig,
    R: DiagnosticReporter,
{
    pub fn new(config: C, reporter: R) -> Self {
        Self { config, reporter }
    }

    /// タスクを1回実行して計測する
    ///
    /// スレッド数・データサイズの検証はメモリ確保より前に行う。
    /// 成功・失敗に関わらず、戻る前に入力と中間結果は全て解放される。
    pub fn execute_and_measure<T>(
        &self,
        task: &mut T,
        thread_count: usize,
        data_size: usize,
    ) -> BenchResult<Measurement>
    where
        T: PartitionableTask,
    {
        let segments = WorkPartitioner::segments_for(thread_count, data_size)?;

        self.reporter.report_phase(RunPhase::Idle);
        self.reporter
            .report_started(task.name(), thread_count, data_size);

        let _cleanup = CleanupNotice {
            reporter: &self.reporter,
        };
        let mut rng = self.rng();
        let mut buffer = task.generate_data(data_size, &mut rng)?;
        self.reporter.report_phase(RunPhase::DataGenerated);

        // ここから先はタスクを共有参照としてワーカーに渡す
        let task: &T = task;
        for (worker, segment) in segments.iter().enumerate() {
            self.reporter.report_segment(worker, *segment);
        }

        let cancel = CancellationToken::new();
        let started_at = Utc::now();
        let timer = Instant::now();

        let views = task.views(&mut buffer, &segments);
        self.reporter.report_phase(RunPhase::Dispatched);
        let partials = ParallelExecutor::new(&self.reporter).run(task, &segments, views, &cancel)?;
        self.reporter.report_phase(RunPhase::AllJoined);

        let output = task.merge(partials, &buffer, &segments)?;
        let elapsed = timer.elapsed();
        let finished_at = Utc::now();
        self.reporter.report_phase(RunPhase::Merged);

        let correct = task.verify(&buffer, &output, data_size);
        self.reporter.report_phase(RunPhase::Verified);
        self.reporter.report_verification(correct, task.outcome_note());

        let measurement = Measurement::new(
            thread_count,
            data_size,
            elapsed.as_secs_f64(),
            started_at,
            finished_at,
            correct,
        )
        .with_iterative(self.config.iterative_tag());
        self.reporter.report_completed(&measurement);

        Ok(measurement)
    }

    /// アルゴリズム名から具体的なタスクを作って1回実行する
    pub fn run_algorithm(
        &self,
        kind: AlgorithmKind,
        thread_count: usize,
        data_size: usize,
    ) -> BenchResult<Measurement> {
        match kind.family() {
            AlgorithmFamily::Sorting(strategy) => {
                self.execute_and_measure(&mut SortingTask::new(strategy), thread_count, data_size)
            }
            AlgorithmFamily::Searching(strategy) => {
                self.execute_and_measure(&mut SearchingTask::new(strategy), thread_count, data_size)
            }
            AlgorithmFamily::Matrix(op) => {
                self.execute_and_measure(&mut MatrixTask::new(op), thread_count, data_size)
            }
        }
    }

    /// 設定の繰り返し回数だけ実行する
    pub fn run_repeated(
        &self,
        kind: AlgorithmKind,
        thread_count: usize,
        data_size: usize,
    ) -> BenchResult<Vec<Measurement>> {
        (0..self.config.repeat_count().max(1))
            .map(|_| self.run_algorithm(kind, thread_count, data_size))
            .collect()
    }

    fn rng(&self) -> StdRng {
        match self.config.seed() {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    /// 設定への参照を取得（読み取り専用アクセス）
    pub fn config(&self) -> &C {
        &self.config
    }

    /// レポーターへの参照を取得
    pub fn reporter(&self) -> &R {
        &self.reporter
    }
}
