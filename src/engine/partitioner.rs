// WorkPartitioner - データ範囲のセグメント分割

use crate::core::{BenchError, BenchResult, Segment};

/// `[0, data_size)` を `thread_count` 個の連続セグメントに分割する
///
/// 入力だけで決まる純粋関数。最後のセグメントが割り算の余りを吸収する。
#[derive(Debug, Default, Clone, Copy)]
pub struct WorkPartitioner;

impl WorkPartitioner {
    pub fn segments_for(thread_count: usize, data_size: usize) -> BenchResult<Vec<Segment>> {
        if thread_count == 0 {
            return Err(BenchError::configuration("スレッド数は1以上である必要があります"));
        }
        if data_size == 0 {
            return Err(BenchError::configuration("データサイズは1以上である必要があります"));
        }

        let segment_size = data_size / thread_count;
        let mut segments = Vec::new();
        segments
            .try_reserve_exact(thread_count)
            .map_err(|error| BenchError::allocation("segments", error.to_string()))?;
        segments.extend((0..thread_count).map(|index| {
            let start = index * segment_size;
            let end = if index == thread_count - 1 {
                data_size
            } else {
                (index + 1) * segment_size
            };
            Segment::new(start, end)
        }));

        Ok(segments)
    }
}
