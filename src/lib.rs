pub mod algorithms;
pub mod cli;
pub mod core;
pub mod engine;
pub mod services;

pub use algorithms::AlgorithmKind;
pub use crate::core::{BenchError, BenchResult, Measurement};
pub use engine::BenchmarkEngine;

use crate::core::{BenchmarkConfig, DiagnosticReporter};
use services::{ConsoleDiagnostics, DefaultBenchmarkConfig, NoOpDiagnostics};

/// 設定に応じた診断出力を選んでエンジンを作成
///
/// verbose なら標準エラーへのコンソール出力、そうでなければワーカー失敗だけを出力する。
pub fn create_engine(
    config: DefaultBenchmarkConfig,
) -> BenchmarkEngine<DefaultBenchmarkConfig, Box<dyn DiagnosticReporter>> {
    let reporter: Box<dyn DiagnosticReporter> = if config.verbose() {
        Box::new(ConsoleDiagnostics::new())
    } else {
        Box::new(ConsoleDiagnostics::quiet())
    };
    BenchmarkEngine::new(config, reporter)
}

/// 診断出力を一切行わないエンジンを作成（ベンチマーク・テスト用）
pub fn create_quiet_engine(
    config: DefaultBenchmarkConfig,
) -> BenchmarkEngine<DefaultBenchmarkConfig, NoOpDiagnostics> {
    BenchmarkEngine::new(config, NoOpDiagnostics::new())
}
