// 探索 - 早期終了付きの並列線形探索・二分探索

use crate::core::{BenchError, BenchResult, CancellationToken, Element, PartitionableTask, Segment};
use rand::rngs::StdRng;
use rand::Rng;
use std::sync::atomic::{AtomicUsize, Ordering};

const NOT_FOUND: usize = usize::MAX;

/// セグメント内の探索手法
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStrategy {
    Linear,
    Binary,
}

impl SearchStrategy {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Linear => "linear_search",
            Self::Binary => "binary_search",
        }
    }
}

/// ワーカー1つ分の探索結果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanOutcome {
    /// 開始前にキャンセル済み、もしくはワーカーが失敗した
    #[default]
    Skipped,
    /// セグメントを最後まで見て見つからなかった
    Exhausted,
    Found(usize),
    /// 他のワーカーの発見を見て途中で止まった
    Stopped,
}

/// 探索のベンチマークタスク
///
/// 発見位置は compare-and-swap で最初に書いたワーカーのものだけが残る。
#[derive(Debug)]
pub struct SearchingTask {
    strategy: SearchStrategy,
    planted_index: Option<usize>,
    target: Element,
    target_index: usize,
    found_index: AtomicUsize,
}

impl SearchingTask {
    pub fn new(strategy: SearchStrategy) -> Self {
        Self {
            strategy,
            planted_index: None,
            target: 0,
            target_index: NOT_FOUND,
            found_index: AtomicUsize::new(NOT_FOUND),
        }
    }

    /// 目標値を置く位置を固定する
    pub fn with_planted_index(mut self, index: usize) -> Self {
        self.planted_index = Some(index);
        self
    }

    pub fn strategy(&self) -> SearchStrategy {
        self.strategy
    }

    pub fn target(&self) -> Element {
        self.target
    }

    /// 生成時に目標値を置いた位置
    pub fn target_index(&self) -> Option<usize> {
        (self.target_index != NOT_FOUND).then_some(self.target_index)
    }

    /// ワーカーが報告した発見位置
    pub fn found_index(&self) -> Option<usize> {
        match self.found_index.load(Ordering::Acquire) {
            NOT_FOUND => None,
            index => Some(index),
        }
    }

    fn record_hit(&self, index: usize, cancel: &CancellationToken) {
        let _ = self.found_index.compare_exchange(
            NOT_FOUND,
            index,
            Ordering::AcqRel,
            Ordering::Acquire,
        );
        cancel.cancel();
    }

    fn linear_scan(&self, segment: Segment, data: &[Element], cancel: &CancellationToken) -> ScanOutcome {
        for index in segment.range() {
            if cancel.is_cancelled() {
                return ScanOutcome::Stopped;
            }
            if data[index] == self.target {
                self.record_hit(index, cancel);
                return ScanOutcome::Found(index);
            }
        }
        ScanOutcome::Exhausted
    }

    fn binary_scan(&self, segment: Segment, data: &[Element], cancel: &CancellationToken) -> ScanOutcome {
        let (mut low, mut high) = (segment.start, segment.end);
        while low < high {
            if cancel.is_cancelled() {
                return ScanOutcome::Stopped;
            }
            let mid = low + (high - low) / 2;
            if data[mid] == self.target {
                self.record_hit(mid, cancel);
                return ScanOutcome::Found(mid);
            } else if data[mid] < self.target {
                low = mid + 1;
            } else {
                high = mid;
            }
        }
        ScanOutcome::Exhausted
    }
}

impl PartitionableTask for SearchingTask {
    type Buffer = Vec<Element>;
    type View<'a> = &'a [Element] where Self: 'a;
    type Partial = ScanOutcome;
    type Output<'a> = &'a [Element] where Self: 'a;

    fn name(&self) -> &'static str {
        self.strategy.name()
    }

    fn generate_data(&mut self, size: usize, rng: &mut StdRng) -> BenchResult<Vec<Element>> {
        if size == 0 {
            return Err(BenchError::configuration("探索対象のデータが空です"));
        }
        let target_index = match self.planted_index {
            Some(index) if index >= size => {
                return Err(BenchError::configuration(format!(
                    "目標位置 {index} がデータサイズ {size} の範囲外です"
                )));
            }
            Some(index) => index,
            None => rng.gen_range(0..size),
        };

        let mut data = Vec::new();
        data.try_reserve_exact(size)?;
        data.extend((1..=size).map(|value| value as Element));

        self.target = data[target_index];
        if self.strategy == SearchStrategy::Binary {
            // 二分探索は全セグメントの実行前に昇順である必要がある
            data.sort_unstable();
        }
        self.target_index = target_index;
        self.found_index.store(NOT_FOUND, Ordering::Release);

        Ok(data)
    }

    fn views<'a>(&self, buffer: &'a mut Vec<Element>, segments: &[Segment]) -> Vec<&'a [Element]>
    where
        Self: 'a,
    {
        let shared: &'a [Element] = buffer;
        vec![shared; segments.len()]
    }

    fn execute_on_segment(
        &self,
        segment: Segment,
        view: &[Element],
        cancel: &CancellationToken,
    ) -> BenchResult<ScanOutcome> {
        if cancel.is_cancelled() {
            return Ok(ScanOutcome::Skipped);
        }
        let outcome = match self.strategy {
            SearchStrategy::Linear => self.linear_scan(segment, view, cancel),
            SearchStrategy::Binary => self.binary_scan(segment, view, cancel),
        };
        Ok(outcome)
    }

    fn merge<'a>(
        &self,
        _partials: Vec<ScanOutcome>,
        buffer: &'a Vec<Element>,
        _segments: &[Segment],
    ) -> BenchResult<&'a [Element]>
    where
        Self: 'a,
    {
        Ok(buffer.as_slice())
    }

    fn verify(&self, input: &Vec<Element>, _result: &&[Element], size: usize) -> bool {
        match self.found_index() {
            Some(index) => index < size && input.get(index) == Some(&self.target),
            None => false,
        }
    }

    fn is_early_exit(&self, partial: &ScanOutcome) -> bool {
        matches!(partial, ScanOutcome::Stopped | ScanOutcome::Skipped)
    }

    fn outcome_note(&self) -> Option<String> {
        Some(match self.found_index() {
            Some(index) => format!("target {} found at index {index}", self.target),
            None => format!("target {} was not found", self.target),
        })
    }
}
