// 診断出力機能
// セグメント割り当て、状態遷移、ワーカー失敗、検証結果の通知

pub mod implementations;

// 公開API
pub use implementations::{ConsoleDiagnostics, NoOpDiagnostics};
