// テストユーティリティ
// 診断チャンネルの記録用レポーターと決定的な設定のヘルパー
#![allow(dead_code)]

use algo_bench::{
    core::{DiagnosticReporter, Measurement, RunPhase, Segment},
    services::DefaultBenchmarkConfig,
};
use std::sync::Mutex;

/// 診断チャンネルに流れたイベントを全て記録するレポーター
#[derive(Debug, Default)]
pub struct RecordingReporter {
    pub phases: Mutex<Vec<RunPhase>>,
    pub segments: Mutex<Vec<(usize, Segment)>>,
    pub early_exits: Mutex<Vec<usize>>,
    pub failures: Mutex<Vec<(usize, String)>>,
    pub verifications: Mutex<Vec<(bool, Option<String>)>>,
    pub completed: Mutex<Vec<Measurement>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phases(&self) -> Vec<RunPhase> {
        self.phases.lock().unwrap().clone()
    }

    pub fn segments(&self) -> Vec<(usize, Segment)> {
        self.segments.lock().unwrap().clone()
    }

    pub fn early_exits(&self) -> Vec<usize> {
        self.early_exits.lock().unwrap().clone()
    }

    pub fn failures(&self) -> Vec<(usize, String)> {
        self.failures.lock().unwrap().clone()
    }

    pub fn verifications(&self) -> Vec<(bool, Option<String>)> {
        self.verifications.lock().unwrap().clone()
    }
}

impl DiagnosticReporter for &RecordingReporter {
    fn report_started(&self, _algorithm: &str, _thread_count: usize, _data_size: usize) {}

    fn report_segment(&self, worker: usize, segment: Segment) {
        self.segments.lock().unwrap().push((worker, segment));
    }

    fn report_phase(&self, phase: RunPhase) {
        self.phases.lock().unwrap().push(phase);
    }

    fn report_early_exit(&self, worker: usize) {
        self.early_exits.lock().unwrap().push(worker);
    }

    fn report_worker_failure(&self, worker: usize, error: &str) {
        self.failures.lock().unwrap().push((worker, error.to_string()));
    }

    fn report_verification(&self, correct: bool, detail: Option<String>) {
        self.verifications.lock().unwrap().push((correct, detail));
    }

    fn report_completed(&self, measurement: &Measurement) {
        self.completed.lock().unwrap().push(measurement.clone());
    }
}

/// 固定シードの設定
pub fn seeded_config(seed: u64) -> DefaultBenchmarkConfig {
    DefaultBenchmarkConfig::new(4).with_seed(Some(seed))
}
