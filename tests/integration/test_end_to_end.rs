// エンドツーエンド統合テスト
#[path = "../fixtures/mod.rs"]
mod fixtures;

use algo_bench::{
    algorithms::{
        sorting::first_violation, AlgorithmKind, MatrixOp, MatrixTask, SearchStrategy,
        SearchingTask, SortStrategy, SortingTask,
    },
    core::{CancellationToken, Element, PartitionableTask, RunPhase, Segment},
    engine::{BenchmarkEngine, ParallelExecutor, WorkPartitioner},
    services::NoOpDiagnostics,
};
use fixtures::{seeded_config, RecordingReporter};
use rand::rngs::StdRng;
use rand::SeedableRng;

const ALL_SORTS: [SortStrategy; 6] = [
    SortStrategy::Bubble,
    SortStrategy::Quick,
    SortStrategy::Merge,
    SortStrategy::Insertion,
    SortStrategy::Selection,
    SortStrategy::Heap,
];

/// 生成からマージまでを手動で実行し、マージ後のソート結果を返す
fn sorted_output(strategy: SortStrategy, seed: u64, threads: usize, size: usize) -> Vec<Element> {
    let mut task = SortingTask::new(strategy);
    let mut rng = StdRng::seed_from_u64(seed);
    let mut buffer = task.generate_data(size, &mut rng).unwrap();
    let segments = WorkPartitioner::segments_for(threads, size).unwrap();
    let cancel = CancellationToken::new();

    let views = task.views(&mut buffer, &segments);
    let partials = ParallelExecutor::new(&NoOpDiagnostics::new())
        .run(&task, &segments, views, &cancel)
        .unwrap();
    let output = task.merge(partials, &buffer, &segments).unwrap();
    assert!(task.verify(&buffer, &output, size));
    output
}

#[test]
fn test_bubble_sort_two_threads_eight_elements() {
    let recorder = RecordingReporter::new();
    let engine = BenchmarkEngine::new(seeded_config(1), &recorder);

    let measurement = engine
        .execute_and_measure(&mut SortingTask::new(SortStrategy::Bubble), 2, 8)
        .unwrap();

    assert!(measurement.is_correct());
    assert_eq!(measurement.thread_count(), 2);
    assert_eq!(measurement.data_size(), 8);
    assert_eq!(
        recorder.segments(),
        vec![(0, Segment::new(0, 4)), (1, Segment::new(4, 8))]
    );

    let output = sorted_output(SortStrategy::Bubble, 1, 2, 8);
    assert_eq!(output.len(), 8);
    assert_eq!(first_violation(&output), None);
}

#[test]
fn test_linear_search_planted_at_eleven() {
    let recorder = RecordingReporter::new();
    let engine = BenchmarkEngine::new(seeded_config(2), &recorder);
    let mut task = SearchingTask::new(SearchStrategy::Linear).with_planted_index(11);

    let measurement = engine.execute_and_measure(&mut task, 4, 16).unwrap();

    assert!(measurement.is_correct());
    assert_eq!(task.found_index(), Some(11));
    assert_eq!(task.target(), 12);
    assert!(recorder.failures().is_empty());
    // 発見したワーカー（セグメント [8, 12)）は早期終了扱いにならない
    assert!(!recorder.early_exits().contains(&2));

    let (correct, detail) = recorder.verifications()[0].clone();
    assert!(correct);
    assert!(detail.unwrap().contains("index 11"));
}

#[test]
fn test_single_element_every_algorithm() {
    let engine = BenchmarkEngine::new(seeded_config(3), NoOpDiagnostics::new());

    for kind in AlgorithmKind::ALL {
        let measurement = engine.run_algorithm(kind, 1, 1).unwrap();
        assert!(measurement.is_correct(), "{kind}");
    }
}

#[test]
fn test_more_threads_than_elements() {
    let engine = BenchmarkEngine::new(seeded_config(4), NoOpDiagnostics::new());

    for kind in AlgorithmKind::ALL {
        let measurement = engine.run_algorithm(kind, 8, 2).unwrap();
        assert!(measurement.is_correct(), "{kind}");
        assert_eq!(measurement.thread_count(), 8);
    }

    let recorder = RecordingReporter::new();
    let engine = BenchmarkEngine::new(seeded_config(4), &recorder);
    engine.run_algorithm(AlgorithmKind::HeapSort, 8, 2).unwrap();

    let segments = recorder.segments();
    assert_eq!(segments.len(), 8);
    assert_eq!(segments.iter().filter(|(_, s)| s.is_empty()).count(), 7);
    assert_eq!(segments[7], (7, Segment::new(0, 2)));
}

#[test]
fn test_sort_output_independent_of_thread_count() {
    for strategy in ALL_SORTS {
        let single = sorted_output(strategy, 42, 1, 300);
        for threads in [2, 3, 7, 16, 300] {
            assert_eq!(
                sorted_output(strategy, 42, threads, 300),
                single,
                "{} with {threads} threads",
                strategy.name()
            );
        }
    }
}

#[test]
fn test_search_index_independent_of_thread_count() {
    for strategy in [SearchStrategy::Linear, SearchStrategy::Binary] {
        for threads in [1, 2, 3, 4, 8, 64] {
            let engine = BenchmarkEngine::new(seeded_config(5), NoOpDiagnostics::new());
            let mut task = SearchingTask::new(strategy).with_planted_index(37);

            let measurement = engine.execute_and_measure(&mut task, threads, 64).unwrap();

            assert!(measurement.is_correct());
            assert_eq!(task.found_index(), Some(37), "{} / {threads}", strategy.name());
        }
    }
}

#[test]
fn test_transpose_twice_restores_matrix() {
    let mut task = MatrixTask::new(MatrixOp::Transpose);
    let mut rng = StdRng::seed_from_u64(6);
    let mut input = task.generate_data(12, &mut rng).unwrap();
    let original = input.lhs.clone();
    let executor_reporter = NoOpDiagnostics::new();
    let executor = ParallelExecutor::new(&executor_reporter);
    let cancel = CancellationToken::new();

    let segments = WorkPartitioner::segments_for(5, 12).unwrap();
    let views = task.views(&mut input, &segments);
    let partials = executor.run(&task, &segments, views, &cancel).unwrap();
    let once = task.merge(partials, &input, &segments).unwrap();
    assert!(task.verify(&input, &once, 12));

    let mut transposed = algo_bench::algorithms::MatrixInput { lhs: once, rhs: None };
    let views = task.views(&mut transposed, &segments);
    let partials = executor.run(&task, &segments, views, &cancel).unwrap();
    let twice = task.merge(partials, &transposed, &segments).unwrap();

    assert_eq!(twice, original);
}

#[test]
fn test_verification_is_idempotent() {
    let mut task = SortingTask::new(SortStrategy::Merge);
    let mut rng = StdRng::seed_from_u64(7);
    let mut buffer = task.generate_data(64, &mut rng).unwrap();
    let segments = WorkPartitioner::segments_for(4, 64).unwrap();

    let views = task.views(&mut buffer, &segments);
    let partials = ParallelExecutor::new(&NoOpDiagnostics::new())
        .run(&task, &segments, views, &CancellationToken::new())
        .unwrap();
    let output = task.merge(partials, &buffer, &segments).unwrap();

    let first = task.verify(&buffer, &output, 64);
    let second = task.verify(&buffer, &output, 64);
    assert_eq!(first, second);
    assert!(first);
}

#[test]
fn test_full_phase_sequence_for_each_family() {
    for kind in [
        AlgorithmKind::QuickSort,
        AlgorithmKind::BinarySearch,
        AlgorithmKind::MatrixMultiplication,
    ] {
        let recorder = RecordingReporter::new();
        let engine = BenchmarkEngine::new(seeded_config(8), &recorder);

        engine.run_algorithm(kind, 3, 10).unwrap();

        assert_eq!(recorder.phases().first(), Some(&RunPhase::Idle));
        assert_eq!(recorder.phases().last(), Some(&RunPhase::CleanedUp));
        assert_eq!(recorder.phases().len(), 7, "{kind}");
    }
}
