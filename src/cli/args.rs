use crate::algorithms::AlgorithmKind;
use clap::{Args, Parser, Subcommand};
use std::str::FromStr;

#[derive(Parser, Debug)]
#[command(name = "algo_bench")]
#[command(about = "Benchmark classic algorithms across thread counts and input sizes")]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub options: GlobalOptions,

    /// Omit to read commands line by line from stdin
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Flags shared by every subcommand
#[derive(Args, Debug, Clone)]
pub struct GlobalOptions {
    /// Print segment assignments, phases and verification details to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print results as a JSON array instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Number of runs averaged into each measurement point
    #[arg(long, global = true, default_value_t = 1)]
    pub repeat: usize,

    /// Tag every measurement as iterative
    #[arg(long, global = true)]
    pub use_iterative: bool,

    /// Seed for input generation (random when omitted)
    #[arg(long, global = true)]
    pub seed: Option<u64>,
}

impl GlobalOptions {
    /// 対話モードの1行分のフラグをセッションの設定に重ねる
    ///
    /// 行のフラグは有効化と値の指定だけを行う。`repeat` は既定値 1 のときセッション側を使う。
    pub fn overlay(&self, line: &GlobalOptions) -> GlobalOptions {
        GlobalOptions {
            verbose: self.verbose || line.verbose,
            json: self.json || line.json,
            repeat: if line.repeat > 1 { line.repeat } else { self.repeat },
            use_iterative: self.use_iterative || line.use_iterative,
            seed: line.seed.or(self.seed),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sweep threads = 2^fire and data size = 2^size over the given exponent ranges
    Run {
        /// Algorithm name (see `list`)
        #[arg(value_parser = AlgorithmKind::from_str)]
        algorithm: AlgorithmKind,

        /// First thread-count exponent
        fire_start: u32,

        /// Last thread-count exponent
        fire_end: u32,

        /// First data-size exponent
        size_start: u32,

        /// Last data-size exponent
        size_end: u32,
    },

    /// Same as `run` with data-size exponents 5 through 10
    Test {
        /// Algorithm name (see `list`)
        #[arg(value_parser = AlgorithmKind::from_str)]
        algorithm: AlgorithmKind,

        /// First thread-count exponent
        fire_start: u32,

        /// Last thread-count exponent
        fire_end: u32,
    },

    /// Same as `test` with thread-count exponents 0 through 4
    Analyze {
        /// Algorithm name (see `list`)
        #[arg(value_parser = AlgorithmKind::from_str)]
        algorithm: AlgorithmKind,
    },

    /// Run a single configuration
    Measure {
        /// Algorithm name (see `list`)
        #[arg(value_parser = AlgorithmKind::from_str)]
        algorithm: AlgorithmKind,

        /// Data size (matrix dimension for matrix operations)
        size: usize,

        /// Number of worker threads (defaults to the number of logical CPUs)
        #[arg(short, long)]
        threads: Option<usize>,
    },

    /// List available algorithms
    List,
}
