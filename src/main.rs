use algo_bench::cli::{self, Cli, InteractiveSession};
use anyhow::Result;
use clap::Parser;
use std::io::Write;

fn main() -> Result<()> {
    let args = Cli::parse();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    let outcome = match args.command {
        Some(command) => cli::execute(&args.options, command, &mut out),
        None => InteractiveSession::new(args.options).run(std::io::stdin().lock(), &mut out),
    };

    if let Err(error) = outcome {
        // 途中まで書いた結果は捨てずに出してからエラーを報告する
        out.flush()?;
        cli::report_error(&error);
        std::process::exit(1);
    }

    Ok(())
}
