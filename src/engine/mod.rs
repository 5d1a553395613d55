// エンジン層 - 分割・並列実行・計測のオーケストレーション
// アルゴリズム層のタスクを共通の手順で実行する

pub mod executor;
pub mod partitioner;
pub mod processing_engine;

// 公開API - 主要エンジンクラス
pub use executor::ParallelExecutor;
pub use partitioner::WorkPartitioner;
pub use processing_engine::BenchmarkEngine;
