// エラーハンドリングの統合テスト
#[path = "../fixtures/mod.rs"]
mod fixtures;

use algo_bench::{
    algorithms::{AlgorithmKind, MatrixOp, MatrixTask, SearchStrategy, SearchingTask},
    core::{
        BenchError, BenchResult, CancellationToken, Element, ErrorSeverity, PartitionableTask,
        RunPhase, Segment,
    },
    engine::BenchmarkEngine,
    services::NoOpDiagnostics,
};
use fixtures::{seeded_config, RecordingReporter};
use rand::rngs::StdRng;

/// 各要素を2倍にするタスク。指定したワーカーだけ失敗する。
struct DoublingTask {
    failing_worker_start: Option<usize>,
    panicking_worker_start: Option<usize>,
}

impl PartitionableTask for DoublingTask {
    type Buffer = Vec<Element>;
    type View<'a> = &'a [Element] where Self: 'a;
    type Partial = Vec<Element>;
    type Output<'a> = Vec<Element> where Self: 'a;

    fn name(&self) -> &'static str {
        "doubling"
    }

    fn generate_data(&mut self, size: usize, _rng: &mut StdRng) -> BenchResult<Vec<Element>> {
        Ok((0..size as Element).collect())
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
        _cancel: &CancellationToken,
    ) -> BenchResult<Vec<Element>> {
        if self.failing_worker_start == Some(segment.start) {
            return Err(BenchError::worker(segment.start, "injected failure"));
        }
        if self.panicking_worker_start == Some(segment.start) {
            panic!("injected panic in segment {segment}");
        }
        Ok(view[segment.range()].iter().map(|value| value * 2).collect())
    }

    fn merge<'a>(
        &self,
        partials: Vec<Vec<Element>>,
        _buffer: &'a Vec<Element>,
        _segments: &[Segment],
    ) -> BenchResult<Vec<Element>>
    where
        Self: 'a,
    {
        Ok(partials.into_iter().flatten().collect())
    }

    fn verify(&self, input: &Vec<Element>, result: &Vec<Element>, size: usize) -> bool {
        result.len() == size && input.iter().zip(result).all(|(a, b)| a * 2 == *b)
    }
}

#[test]
fn test_zero_threads_or_size_is_invalid() {
    let recorder = RecordingReporter::new();
    let engine = BenchmarkEngine::new(seeded_config(1), &recorder);

    for kind in AlgorithmKind::ALL {
        let error = engine.run_algorithm(kind, 0, 8).unwrap_err();
        assert!(matches!(error, BenchError::InvalidConfiguration { .. }), "{kind}");

        let error = engine.run_algorithm(kind, 2, 0).unwrap_err();
        assert!(matches!(error, BenchError::InvalidConfiguration { .. }), "{kind}");
    }

    // 検証はデータ生成より前に失敗する
    assert!(recorder.phases().is_empty());
}

#[test]
fn test_worker_error_degrades_result() {
    let recorder = RecordingReporter::new();
    let engine = BenchmarkEngine::new(seeded_config(2), &recorder);
    let mut task = DoublingTask {
        failing_worker_start: Some(4),
        panicking_worker_start: None,
    };

    let measurement = engine.execute_and_measure(&mut task, 3, 12).unwrap();

    assert!(!measurement.is_correct());
    let failures = recorder.failures();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].0, 1);
    assert!(failures[0].1.contains("injected failure"));
    assert_eq!(recorder.phases().last(), Some(&RunPhase::CleanedUp));
}

#[test]
fn test_worker_panic_does_not_abort_siblings() {
    let recorder = RecordingReporter::new();
    let engine = BenchmarkEngine::new(seeded_config(3), &recorder);
    let mut task = DoublingTask {
        failing_worker_start: None,
        panicking_worker_start: Some(0),
    };

    let measurement = engine.execute_and_measure(&mut task, 4, 16).unwrap();

    assert!(!measurement.is_correct());
    let failures = recorder.failures();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].0, 0);
    assert!(failures[0].1.contains("injected panic"));
    assert!(recorder.phases().contains(&RunPhase::Verified));
}

#[test]
fn test_healthy_doubling_task_is_correct() {
    let engine = BenchmarkEngine::new(seeded_config(4), NoOpDiagnostics::new());
    let mut task = DoublingTask {
        failing_worker_start: None,
        panicking_worker_start: None,
    };

    assert!(engine.execute_and_measure(&mut task, 5, 23).unwrap().is_correct());
}

#[test]
fn test_oversized_buffers_report_allocation_failure() {
    let recorder = RecordingReporter::new();
    let engine = BenchmarkEngine::new(seeded_config(5), &recorder);

    let error = engine
        .run_algorithm(AlgorithmKind::QuickSort, 1, 1usize << 62)
        .unwrap_err();
    assert!(matches!(error, BenchError::AllocationFailure { .. }));

    let error = engine
        .execute_and_measure(&mut SearchingTask::new(SearchStrategy::Linear), 2, 1usize << 62)
        .unwrap_err();
    assert!(matches!(error, BenchError::AllocationFailure { .. }));

    let error = engine
        .execute_and_measure(&mut MatrixTask::new(MatrixOp::Multiply), 2, 1usize << 40)
        .unwrap_err();
    assert!(matches!(error, BenchError::AllocationFailure { .. }));
    assert_eq!(error.context().operation, "allocation");
    assert_eq!(error.severity(), ErrorSeverity::High);

    // 失敗した実行も毎回解放まで到達する
    let cleaned = recorder
        .phases()
        .iter()
        .filter(|phase| **phase == RunPhase::CleanedUp)
        .count();
    assert_eq!(cleaned, 3);
    assert!(!recorder.phases().contains(&RunPhase::DataGenerated));
}

#[test]
fn test_unknown_algorithm_name() {
    let error = "shell_sort".parse::<AlgorithmKind>().unwrap_err();

    assert!(matches!(error, BenchError::UnknownAlgorithm { .. }));
    assert!(!error.is_recoverable());
    assert!(error.context().suggestion.unwrap().contains("list"));
}
