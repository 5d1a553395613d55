// 結果報告機能
// 繰り返し測定の平均化とJSON・テキスト形式の出力

pub mod implementations;

// 公開API
pub use implementations::{average_measurements, write_json, write_text, RunSummary};
