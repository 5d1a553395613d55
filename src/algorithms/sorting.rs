// 比較ソート - セグメント単位のインプレースソートとk-wayマージ

use crate::core::{BenchResult, CancellationToken, Element, PartitionableTask, Segment};
use rand::rngs::StdRng;
use rand::Rng;
use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::sync::atomic::{AtomicUsize, Ordering};

/// 生成する値の範囲
pub const SORT_VALUE_RANGE: std::ops::RangeInclusive<Element> = 0..=1000;

const NO_VIOLATION: usize = usize::MAX;

/// セグメント内のソート手法
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortStrategy {
    Bubble,
    Quick,
    Merge,
    Insertion,
    Selection,
    Heap,
}

impl SortStrategy {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Bubble => "bubble_sort",
            Self::Quick => "quick_sort",
            Self::Merge => "merge_sort",
            Self::Insertion => "insertion_sort",
            Self::Selection => "selection_sort",
            Self::Heap => "heap_sort",
        }
    }

    /// スライスをその場で昇順に並べる
    pub fn sort(&self, data: &mut [Element]) {
        match self {
            Self::Bubble => bubble_sort(data),
            Self::Quick => data.sort_unstable(),
            Self::Merge => merge_sort(data),
            Self::Insertion => insertion_sort(data),
            Self::Selection => selection_sort(data),
            Self::Heap => heap_sort(data),
        }
    }
}

fn bubble_sort(data: &mut [Element]) {
    let len = data.len();
    for pass in 0..len.saturating_sub(1) {
        let mut swapped = false;
        for j in 0..len - 1 - pass {
            if data[j] > data[j + 1] {
                data.swap(j, j + 1);
                swapped = true;
            }
        }
        if !swapped {
            break;
        }
    }
}

fn merge_sort(data: &mut [Element]) {
    if data.len() <= 1 {
        return;
    }
    let mut scratch = data.to_vec();
    merge_sort_into(&mut scratch, data);
}

// `source` と `target` は同じ内容で始まり、結果は `target` に入る
fn merge_sort_into(source: &mut [Element], target: &mut [Element]) {
    let len = target.len();
    if len <= 1 {
        return;
    }
    let mid = len / 2;
    {
        let (source_left, source_right) = source.split_at_mut(mid);
        let (target_left, target_right) = target.split_at_mut(mid);
        merge_sort_into(target_left, source_left);
        merge_sort_into(target_right, source_right);
    }

    let (left, right) = source.split_at(mid);
    let (mut i, mut j) = (0, 0);
    for slot in target.iter_mut() {
        if j >= right.len() || (i < left.len() && left[i] <= right[j]) {
            *slot = left[i];
            i += 1;
        } else {
            *slot = right[j];
            j += 1;
        }
    }
}

fn insertion_sort(data: &mut [Element]) {
    for i in 1..data.len() {
        let key = data[i];
        let mut j = i;
        while j > 0 && data[j - 1] > key {
            data[j] = data[j - 1];
            j -= 1;
        }
        data[j] = key;
    }
}

fn selection_sort(data: &mut [Element]) {
    let len = data.len();
    for i in 0..len.saturating_sub(1) {
        let mut min_index = i;
        for j in i + 1..len {
            if data[j] < data[min_index] {
                min_index = j;
            }
        }
        data.swap(i, min_index);
    }
}

fn heap_sort(data: &mut [Element]) {
    let len = data.len();
    for root in (0..len / 2).rev() {
        sift_down(data, root, len);
    }
    for end in (1..len).rev() {
        data.swap(0, end);
        sift_down(data, 0, end);
    }
}

fn sift_down(data: &mut [Element], mut root: usize, end: usize) {
    loop {
        let left = 2 * root + 1;
        if left >= end {
            return;
        }
        let right = left + 1;
        let mut largest = root;
        if data[left] > data[largest] {
            largest = left;
        }
        if right < end && data[right] > data[largest] {
            largest = right;
        }
        if largest == root {
            return;
        }
        data.swap(root, largest);
        root = largest;
    }
}

/// ソートが崩れている最初の位置 `i`（`data[i-1] > data[i]`）
pub fn first_violation(data: &[Element]) -> Option<usize> {
    data.windows(2).position(|w| w[0] > w[1]).map(|i| i + 1)
}

/// 比較ソートのベンチマークタスク
///
/// 各ワーカーは自分のセグメントだけを `&mut` で受け取りその場でソートする。
/// マージは各セグメントが個別にソート済みであることだけを前提にする。
#[derive(Debug)]
pub struct SortingTask {
    strategy: SortStrategy,
    violation: AtomicUsize,
}

impl SortingTask {
    pub fn new(strategy: SortStrategy) -> Self {
        Self {
            strategy,
            violation: AtomicUsize::new(NO_VIOLATION),
        }
    }

    pub fn strategy(&self) -> SortStrategy {
        self.strategy
    }

    /// 直近の検証で見つかった違反位置
    pub fn last_violation(&self) -> Option<usize> {
        match self.violation.load(Ordering::Acquire) {
            NO_VIOLATION => None,
            index => Some(index),
        }
    }
}

impl PartitionableTask for SortingTask {
    type Buffer = Vec<Element>;
    type View<'a> = &'a mut [Element] where Self: 'a;
    type Partial = ();
    type Output<'a> = Vec<Element> where Self: 'a;

    fn name(&self) -> &'static str {
        self.strategy.name()
    }

    fn generate_data(&mut self, size: usize, rng: &mut StdRng) -> BenchResult<Vec<Element>> {
        let mut data = Vec::new();
        data.try_reserve_exact(size)?;
        data.extend((0..size).map(|_| rng.gen_range(SORT_VALUE_RANGE)));
        self.violation.store(NO_VIOLATION, Ordering::Release);
        Ok(data)
    }

    fn views<'a>(&self, buffer: &'a mut Vec<Element>, segments: &[Segment]) -> Vec<&'a mut [Element]>
    where
        Self: 'a,
    {
        // セグメントは0から連続しているので先頭から順に切り出せる
        let mut rest: &'a mut [Element] = buffer.as_mut_slice();
        segments
            .iter()
            .map(|segment| {
                let (head, tail) = std::mem::take(&mut rest).split_at_mut(segment.len());
                rest = tail;
                head
            })
            .collect()
    }

    fn execute_on_segment(
        &self,
        _segment: Segment,
        view: &mut [Element],
        _cancel: &CancellationToken,
    ) -> BenchResult<()> {
        self.strategy.sort(view);
        Ok(())
    }

    fn merge<'a>(
        &self,
        _partials: Vec<()>,
        buffer: &'a Vec<Element>,
        segments: &[Segment],
    ) -> BenchResult<Vec<Element>>
    where
        Self: 'a,
    {
        let mut merged = Vec::new();
        merged.try_reserve_exact(buffer.len())?;

        // (値, セグメント番号) の最小ヒープ。同値なら番号の小さいセグメントが先
        let mut cursors: Vec<usize> = segments.iter().map(|segment| segment.start).collect();
        let mut heap = BinaryHeap::with_capacity(segments.len());
        for (index, segment) in segments.iter().enumerate() {
            if !segment.is_empty() {
                heap.push(Reverse((buffer[segment.start], index)));
            }
        }

        while let Some(Reverse((value, index))) = heap.pop() {
            merged.push(value);
            cursors[index] += 1;
            if cursors[index] < segments[index].end {
                heap.push(Reverse((buffer[cursors[index]], index)));
            }
        }

        Ok(merged)
    }

    fn verify(&self, _input: &Vec<Element>, result: &Vec<Element>, size: usize) -> bool {
        let violation = if result.len() != size {
            Some(result.len().min(size))
        } else {
            first_violation(result)
        };
        self.violation
            .store(violation.unwrap_or(NO_VIOLATION), Ordering::Release);
        violation.is_none()
    }

    fn outcome_note(&self) -> Option<String> {
        self.last_violation()
            .map(|index| format!("sort order violated at index {index}"))
    }
}
