// 設定管理の具象実装

use crate::core::BenchmarkConfig;

/// デフォルト設定実装
#[derive(Debug, Clone)]
pub struct DefaultBenchmarkConfig {
    seed: Option<u64>,
    repeat_count: usize,
    iterative_tag: Option<bool>,
    default_threads: usize,
    verbose: bool,
}

impl DefaultBenchmarkConfig {
    pub fn new(cpu_count: usize) -> Self {
        Self {
            seed: None,
            repeat_count: 1,
            iterative_tag: None,
            default_threads: cpu_count.max(1),
            verbose: false,
        }
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// 0回は1回として扱う
    pub fn with_repeat_count(mut self, repeat_count: usize) -> Self {
        self.repeat_count = repeat_count.max(1);
        self
    }

    pub fn with_iterative_tag(mut self, iterative: Option<bool>) -> Self {
        self.iterative_tag = iterative;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

impl Default for DefaultBenchmarkConfig {
    fn default() -> Self {
        Self::new(num_cpus::get())
    }
}

impl BenchmarkConfig for DefaultBenchmarkConfig {
    fn seed(&self) -> Option<u64> {
        self.seed
    }

    fn repeat_count(&self) -> usize {
        self.repeat_count
    }

    fn iterative_tag(&self) -> Option<bool> {
        self.iterative_tag
    }

    fn default_thread_count(&self) -> usize {
        self.default_threads
    }

    fn verbose(&self) -> bool {
        self.verbose
    }
}
