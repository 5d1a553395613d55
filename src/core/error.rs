// Custom error types for parallel benchmarking
// ベンチマーク実行専用のカスタムエラー型定義

use thiserror::Error;

/// ベンチマーク実行固有のエラー型
#[derive(Error, Debug)]
pub enum BenchError {
    #[error("設定エラー: {message}")]
    InvalidConfiguration { message: String },

    #[error("ワーカーエラー: worker {worker} - {message}")]
    WorkerFailure { worker: usize, message: String },

    #[error("メモリ確保エラー: {resource} - {details}")]
    AllocationFailure { resource: String, details: String },

    #[error("スレッド起動エラー: worker {worker} - {source}")]
    ThreadSpawn {
        worker: usize,
        #[source]
        source: std::io::Error,
    },

    #[error("未知のアルゴリズム: {name}")]
    UnknownAlgorithm { name: String },

    #[error("内部エラー: {source}")]
    InternalError {
        #[source]
        source: anyhow::Error,
    },
}

impl BenchError {
    /// 設定エラーの作成
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            message: message.into(),
        }
    }

    /// ワーカーエラーの作成
    pub fn worker(worker: usize, message: impl Into<String>) -> Self {
        Self::WorkerFailure {
            worker,
            message: message.into(),
        }
    }

    /// メモリ確保エラーの作成
    pub fn allocation(resource: impl Into<String>, details: impl Into<String>) -> Self {
        Self::AllocationFailure {
            resource: resource.into(),
            details: details.into(),
        }
    }

    /// スレッド起動エラーの作成
    pub fn thread_spawn(worker: usize, source: std::io::Error) -> Self {
        Self::ThreadSpawn { worker, source }
    }

    /// 未知アルゴリズムエラーの作成
    pub fn unknown_algorithm(name: impl Into<String>) -> Self {
        Self::UnknownAlgorithm { name: name.into() }
    }

    /// 内部エラーの作成
    pub fn internal(source: anyhow::Error) -> Self {
        Self::InternalError { source }
    }

    /// エラーの重要度を取得
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InvalidConfiguration { .. } | Self::UnknownAlgorithm { .. } => ErrorSeverity::High,
            Self::WorkerFailure { .. } => ErrorSeverity::Medium,
            Self::AllocationFailure { .. } | Self::ThreadSpawn { .. } => ErrorSeverity::High,
            Self::InternalError { .. } => ErrorSeverity::Critical,
        }
    }

    /// エラーが回復可能かどうかを判定
    ///
    /// ワーカー単位の失敗は兄弟ワーカーを止めないため回復可能として扱う
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::InvalidConfiguration { .. } | Self::UnknownAlgorithm { .. } => false,
            Self::WorkerFailure { .. } => true,
            Self::AllocationFailure { .. } => true,
            Self::ThreadSpawn { .. } => true,
            Self::InternalError { .. } => false,
        }
    }

    /// エラーコンテキストを取得
    pub fn context(&self) -> ErrorContext {
        match self {
            Self::InvalidConfiguration { message } => ErrorContext::new("configuration")
                .with_suggestion(format!("スレッド数とデータサイズを確認してください: {message}")),
            Self::WorkerFailure { worker, .. } => ErrorContext::new("segment_execution")
                .with_resource(format!("worker {worker}")),
            Self::AllocationFailure { resource, .. } => ErrorContext::new("allocation")
                .with_resource(resource.clone())
                .with_suggestion("データサイズを小さくしてください"),
            Self::ThreadSpawn { worker, .. } => ErrorContext::new("dispatch")
                .with_resource(format!("worker {worker}"))
                .with_suggestion("スレッド数を減らしてください"),
            Self::UnknownAlgorithm { name } => ErrorContext::new("algorithm_selection")
                .with_resource(name.clone())
                .with_suggestion("`list` コマンドで利用可能なアルゴリズムを確認してください"),
            Self::InternalError { .. } => ErrorContext::new("unknown"),
        }
    }
}

/// エラーの重要度レベル
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    /// 中重要度 - 警告レベル
    Medium,
    /// 高重要度 - 要対応
    High,
    /// 致命的 - システム停止レベル
    Critical,
}

impl ErrorSeverity {
    /// 重要度の文字列表現を取得
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
        }
    }
}

/// エラーコンテキスト情報
#[derive(Debug, Clone)]
pub struct ErrorContext {
    /// 実行していた操作
    pub operation: String,
    /// 関連するリソース（ワーカー番号、バッファ名等）
    pub resource: Option<String>,
    /// エラー解決のための提案
    pub suggestion: Option<String>,
}

impl ErrorContext {
    /// 新しいエラーコンテキストを作成
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            resource: None,
            suggestion: None,
        }
    }

    /// リソース情報を追加
    pub fn with_resource(mut self, resource: impl Into<String>) -> Self {
        self.resource = Some(resource.into());
        self
    }

    /// 提案を追加
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

/// ベンチマーク処理の結果型
pub type BenchResult<T> = std::result::Result<T, BenchError>;

impl From<anyhow::Error> for BenchError {
    fn from(error: anyhow::Error) -> Self {
        BenchError::InternalError { source: error }
    }
}

impl From<serde_json::Error> for BenchError {
    fn from(error: serde_json::Error) -> Self {
        BenchError::InternalError {
            source: error.into(),
        }
    }
}

impl From<std::io::Error> for BenchError {
    fn from(error: std::io::Error) -> Self {
        BenchError::InternalError {
            source: error.into(),
        }
    }
}

impl From<std::collections::TryReserveError> for BenchError {
    fn from(error: std::collections::TryReserveError) -> Self {
        BenchError::allocation("buffer", error.to_string())
    }
}
