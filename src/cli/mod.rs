// CLI層 - コマンドライン引数の定義と処理
// ユーザーインターフェースとベンチマークエンジンの橋渡し

pub mod args;
pub mod commands;
pub mod interactive;

// 公開API
pub use args::*;
pub use commands::*;
pub use interactive::InteractiveSession;

use crate::core::BenchError;
use crate::services::DefaultBenchmarkConfig;
use anyhow::Result;
use std::io::Write;

/// グローバルフラグから設定を組み立てる
pub fn build_config(options: &GlobalOptions) -> DefaultBenchmarkConfig {
    DefaultBenchmarkConfig::default()
        .with_seed(options.seed)
        .with_repeat_count(options.repeat)
        .with_iterative_tag(Some(options.use_iterative))
        .with_verbose(options.verbose)
}

/// 解析済みのコマンドを実行し、結果を `out` に書き出す
pub fn execute<W: Write>(options: &GlobalOptions, command: Commands, out: &mut W) -> Result<()> {
    let engine = crate::create_engine(build_config(options));
    let json = options.json;

    match command {
        Commands::Run {
            algorithm,
            fire_start,
            fire_end,
            size_start,
            size_end,
        } => {
            let plan = SweepPlan::new(fire_start, fire_end, size_start, size_end);
            execute_run(&engine, algorithm, &plan, json, out)?;
        }
        Commands::Test {
            algorithm,
            fire_start,
            fire_end,
        } => {
            execute_test(&engine, algorithm, fire_start, fire_end, json, out)?;
        }
        Commands::Analyze { algorithm } => {
            execute_analyze(&engine, algorithm, json, out)?;
        }
        Commands::Measure {
            algorithm,
            size,
            threads,
        } => {
            execute_measure(&engine, algorithm, size, threads, json, out)?;
        }
        Commands::List => execute_list(out)?,
    }

    out.flush()?;
    Ok(())
}

/// エラーとその文脈を標準エラーに出力する
pub fn report_error(error: &anyhow::Error) {
    eprintln!("❌ エラー: {error}");

    if let Some(bench_error) = error.downcast_ref::<BenchError>() {
        let context = bench_error.context();
        let retry = if bench_error.is_recoverable() {
            "条件を変えて再実行できます"
        } else {
            "入力を修正してください"
        };
        eprintln!(
            "   操作: {} (重要度: {}, {retry})",
            context.operation,
            bench_error.severity().as_str()
        );
        if let Some(resource) = context.resource {
            eprintln!("   対象: {resource}");
        }
        if let Some(suggestion) = context.suggestion {
            eprintln!("💡 {suggestion}");
        }
    }
}
