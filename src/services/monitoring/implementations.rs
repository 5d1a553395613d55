// 診断出力の具象実装
// 標準出力は計測結果のために空けておき、診断は全て標準エラーへ書く

use crate::core::{DiagnosticReporter, Measurement, RunPhase, Segment};

/// 標準エラー出力による診断実装
#[derive(Debug, Default, Clone)]
pub struct ConsoleDiagnostics {
    quiet: bool,
}

impl ConsoleDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// ワーカー失敗だけを出力する
    pub fn quiet() -> Self {
        Self { quiet: true }
    }
}

impl DiagnosticReporter for ConsoleDiagnostics {
    fn report_started(&self, algorithm: &str, thread_count: usize, data_size: usize) {
        if !self.quiet {
            eprintln!("🚀 {algorithm}: threads={thread_count}, data size={data_size}");
        }
    }

    fn report_segment(&self, worker: usize, segment: Segment) {
        if !self.quiet {
            eprintln!("🧩 Thread {worker}: {segment}");
        }
    }

    fn report_phase(&self, phase: RunPhase) {
        if !self.quiet {
            eprintln!("🔄 Phase: {}", phase.as_str());
        }
    }

    fn report_early_exit(&self, worker: usize) {
        if !self.quiet {
            eprintln!("⏹️  Thread {worker} stopped early");
        }
    }

    fn report_worker_failure(&self, worker: usize, error: &str) {
        eprintln!("❌ Thread {worker} failed: {error}");
    }

    fn report_verification(&self, correct: bool, detail: Option<String>) {
        if self.quiet {
            return;
        }
        let mark = if correct { "✅" } else { "⚠️ " };
        match detail {
            Some(detail) => eprintln!("{mark} Verification: {correct} ({detail})"),
            None => eprintln!("{mark} Verification: {correct}"),
        }
    }

    fn report_completed(&self, measurement: &Measurement) {
        if !self.quiet {
            eprintln!("📊 {measurement}");
        }
    }
}

/// 何もしない診断実装（非verbose実行・テスト・ベンチマーク用）
#[derive(Debug, Default, Clone)]
pub struct NoOpDiagnostics;

impl NoOpDiagnostics {
    pub fn new() -> Self {
        Self
    }
}

impl DiagnosticReporter for NoOpDiagnostics {
    fn report_started(&self, _algorithm: &str, _thread_count: usize, _data_size: usize) {
        // 何もしない
    }

    fn report_segment(&self, _worker: usize, _segment: Segment) {
        // 何もしない
    }

    fn report_phase(&self, _phase: RunPhase) {
        // 何もしない
    }

    fn report_early_exit(&self, _worker: usize) {
        // 何もしない
    }

    fn report_worker_failure(&self, _worker: usize, _error: &str) {
        // 何もしない
    }

    fn report_verification(&self, _correct: bool, _detail: Option<String>) {
        // 何もしない
    }

    fn report_completed(&self, _measurement: &Measurement) {
        // 何もしない
    }
}
