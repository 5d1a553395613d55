// サービス層 - 機能別の周辺処理
// 設定、診断出力、結果報告をそれぞれ独立に提供する

pub mod config;
pub mod monitoring;
pub mod reporting;

// 公開API - 各サービスの主要機能を明示的にエクスポート
pub use config::DefaultBenchmarkConfig;
pub use monitoring::{ConsoleDiagnostics, NoOpDiagnostics};
pub use reporting::{average_measurements, write_json, write_text, RunSummary};
