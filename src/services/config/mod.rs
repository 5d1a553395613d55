// 設定管理機能
// ベンチマーク実行時の乱数シード、繰り返し回数、スレッド数の既定値

pub mod implementations;

// 公開API
pub use implementations::DefaultBenchmarkConfig;
