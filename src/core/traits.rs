// 並列ベンチマークシステムのトレイト定義
// 全ての抽象化インターフェースを定義

use super::error::BenchResult;
use super::types::{CancellationToken, Measurement, RunPhase, Segment};
use mockall::automock;
use rand::rngs::StdRng;

/// 分割して並列実行できる処理の共通契約
///
/// 1回の実行は `generate_data` → `views` → `execute_on_segment`（ワーカーごと）
/// → `merge` → `verify` の順に呼ばれる。入力バッファの所有者はエンジンで、
/// タスクは借用を通してのみ触れる。
pub trait PartitionableTask: Send + Sync {
    /// 1回の実行で使う入力バッファ
    type Buffer: Send + Sync;

    /// ワーカーに渡すバッファへのアクセス
    type View<'a>: Send
    where
        Self: 'a;

    /// ワーカー1つ分の部分結果。失敗したワーカーの枠は `Default` で埋まる。
    type Partial: Default + Send;

    /// マージ後の結果
    type Output<'a>
    where
        Self: 'a;

    /// 表示用のアルゴリズム名
    fn name(&self) -> &'static str;

    /// 新しい入力を生成する
    fn generate_data(&mut self, size: usize, rng: &mut StdRng) -> BenchResult<Self::Buffer>;

    /// セグメントごとのアクセスを切り出す（セグメントと同じ順序・同じ数）
    fn views<'a>(&self, buffer: &'a mut Self::Buffer, segments: &[Segment]) -> Vec<Self::View<'a>>
    where
        Self: 'a;

    /// 1セグメント分の処理
    fn execute_on_segment(
        &self,
        segment: Segment,
        view: Self::View<'_>,
        cancel: &CancellationToken,
    ) -> BenchResult<Self::Partial>;

    /// 部分結果を1つの結果にまとめる
    fn merge<'a>(
        &self,
        partials: Vec<Self::Partial>,
        buffer: &'a Self::Buffer,
        segments: &[Segment],
    ) -> BenchResult<Self::Output<'a>>
    where
        Self: 'a;

    /// 結果が操作の定義を満たすか独立に検証する
    fn verify(&self, input: &Self::Buffer, result: &Self::Output<'_>, size: usize) -> bool;

    /// キャンセルを見て途中で抜けた部分結果かどうか
    fn is_early_exit(&self, _partial: &Self::Partial) -> bool {
        false
    }

    /// 診断チャンネル向けの補足（違反位置、発見位置など）
    fn outcome_note(&self) -> Option<String> {
        None
    }
}

/// 診断出力の抽象化トレイト
///
/// 表示専用で、機能的な契約には含まれない。
#[automock]
pub trait DiagnosticReporter: Send + Sync {
    /// 実行開始時の報告
    fn report_started(&self, algorithm: &str, thread_count: usize, data_size: usize);

    /// セグメント割り当ての報告
    fn report_segment(&self, worker: usize, segment: Segment);

    /// 状態遷移の報告
    fn report_phase(&self, phase: RunPhase);

    /// 早期終了したワーカーの報告
    fn report_early_exit(&self, worker: usize);

    /// ワーカー失敗の報告
    fn report_worker_failure(&self, worker: usize, error: &str);

    /// 検証結果の報告
    fn report_verification(&self, correct: bool, detail: Option<String>);

    /// 実行完了時の報告
    fn report_completed(&self, measurement: &Measurement);
}

// DiagnosticReporter for Box<dyn DiagnosticReporter>
impl DiagnosticReporter for Box<dyn DiagnosticReporter> {
    fn report_started(&self, algorithm: &str, thread_count: usize, data_size: usize) {
        self.as_ref().report_started(algorithm, thread_count, data_size)
    }

    fn report_segment(&self, worker: usize, segment: Segment) {
        self.as_ref().report_segment(worker, segment)
    }

    fn report_phase(&self, phase: RunPhase) {
        self.as_ref().report_phase(phase)
    }

    fn report_early_exit(&self, worker: usize) {
        self.as_ref().report_early_exit(worker)
    }

    fn report_worker_failure(&self, worker: usize, error: &str) {
        self.as_ref().report_worker_failure(worker, error)
    }

    fn report_verification(&self, correct: bool, detail: Option<String>) {
        self.as_ref().report_verification(correct, detail)
    }

    fn report_completed(&self, measurement: &Measurement) {
        self.as_ref().report_completed(measurement)
    }
}

/// ベンチマーク設定を抽象化するトレイト
#[automock]
pub trait BenchmarkConfig: Send + Sync {
    /// 入力生成用の乱数シード（`None` ならエントロピーから）
    fn seed(&self) -> Option<u64>;

    /// 1つの測定点あたりの繰り返し回数
    fn repeat_count(&self) -> usize;

    /// 測定結果に付与する iterative タグ
    fn iterative_tag(&self) -> Option<bool>;

    /// スレッド数が指定されなかった場合の既定値
    fn default_thread_count(&self) -> usize;

    /// 診断出力を有効にするかどうか
    fn verbose(&self) -> bool;
}

// BenchmarkConfig for Box<dyn BenchmarkConfig>
impl BenchmarkConfig for Box<dyn BenchmarkConfig> {
    fn seed(&self) -> Option<u64> {
        self.as_ref().seed()
    }

    fn repeat_count(&self) -> usize {
        self.as_ref().repeat_count()
    }

    fn iterative_tag(&self) -> Option<bool> {
        self.as_ref().iterative_tag()
    }

    fn default_thread_count(&self) -> usize {
        self.as_ref().default_thread_count()
    }

    fn verbose(&self) -> bool {
        self.as_ref().verbose()
    }
}
