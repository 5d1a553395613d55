// ベンチマーク実行に関連するデータ型定義

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;
use std::sync::atomic::{AtomicBool, Ordering};

/// 全アルゴリズム共通の要素型
pub type Element = i64;

/// ワーカー1つが担当する半開区間 `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Segment {
    pub start: usize,
    pub end: usize,
}

impl Segment {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end);
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

/// 1回の実行の状態遷移
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    Idle,
    DataGenerated,
    Dispatched,
    AllJoined,
    Merged,
    Verified,
    CleanedUp,
}

impl RunPhase {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::DataGenerated => "data_generated",
            Self::Dispatched => "dispatched",
            Self::AllJoined => "all_joined",
            Self::Merged => "merged",
            Self::Verified => "verified",
            Self::CleanedUp => "cleaned_up",
        }
    }
}

/// 協調的キャンセルのためのフラグ
///
/// 一度立てたら戻らない。ワーカーは比較ごとに確認する。
#[derive(Debug, Default)]
pub struct CancellationToken {
    cancelled: AtomicBool,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

/// 1回の実行の計測結果
///
/// 生成後は不変。等価比較は `iterative` タグを含まない。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Measurement {
    thread_count: usize,
    data_size: usize,
    /// 経過時間（秒）
    duration: f64,
    #[serde(with = "chrono::serde::ts_nanoseconds")]
    start: DateTime<Utc>,
    #[serde(with = "chrono::serde::ts_nanoseconds")]
    end: DateTime<Utc>,
    correct: bool,
    #[serde(default)]
    iterative: Option<bool>,
}

impl Measurement {
    pub fn new(
        thread_count: usize,
        data_size: usize,
        duration: f64,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        correct: bool,
    ) -> Self {
        Self {
            thread_count,
            data_size,
            duration,
            start,
            end,
            correct,
            iterative: None,
        }
    }

    /// 呼び出し側が付与する報告用タグ。コアは解釈しない。
    pub fn with_iterative(mut self, iterative: Option<bool>) -> Self {
        self.iterative = iterative;
        self
    }

    pub fn thread_count(&self) -> usize {
        self.thread_count
    }

    pub fn data_size(&self) -> usize {
        self.data_size
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn is_correct(&self) -> bool {
        self.correct
    }

    pub fn iterative(&self) -> Option<bool> {
        self.iterative
    }
}

impl PartialEq for Measurement {
    fn eq(&self, other: &Self) -> bool {
        self.thread_count == other.thread_count
            && self.duration == other.duration
            && self.data_size == other.data_size
            && self.start == other.start
            && self.end == other.end
            && self.correct == other.correct
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Thread Count: {}, Duration: {:.6}, Data Size: {}, Is algorithm correct?: {}",
            self.thread_count, self.duration, self.data_size, self.correct
        )?;
        if let Some(iterative) = self.iterative {
            write!(f, ", Is iterative?: {iterative}")?;
        }
        Ok(())
    }
}
