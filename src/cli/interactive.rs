// 対話モード - 標準入力から1行ずつコマンドを読んで実行する
// 出力形式などの切り替えは行をまたいで保持される

use super::{execute, report_error, Cli, GlobalOptions};
use anyhow::Result;
use clap::error::ErrorKind;
use clap::Parser;
use std::io::{BufRead, Write};

const PROMPT: &str = "Enter a command (type 'help' for instructions):";

const HELP: &str = "\
Available commands:
run <algorithm> <fire_start> <fire_end> <data_size_start> <data_size_end>
test <algorithm> <fire_start> <fire_end>
analyze <algorithm>
measure <algorithm> <size> [--threads <n>]
list
verbose <true/false>
iterative <true/false>
json_output <true/false>
help";

/// 行をまたいで保持される切り替え
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Toggle {
    Verbose,
    Iterative,
    JsonOutput,
}

impl Toggle {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "verbose" => Some(Self::Verbose),
            "iterative" => Some(Self::Iterative),
            "json_output" => Some(Self::JsonOutput),
            _ => None,
        }
    }

    const fn label(&self) -> &'static str {
        match self {
            Self::Verbose => "Verbose mode",
            Self::Iterative => "Iterative mode",
            Self::JsonOutput => "JSON output",
        }
    }
}

/// 対話セッション
///
/// 1行の失敗はエラーを報告するだけでセッションは続く。
/// `out` への書き込み失敗だけが `run` から返る。
pub struct InteractiveSession {
    options: GlobalOptions,
}

impl InteractiveSession {
    pub fn new(options: GlobalOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &GlobalOptions {
        &self.options
    }

    /// 入力が尽きるまで読み続ける
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> Result<()> {
        self.prompt(out)?;
        for line in input.lines() {
            self.process_line(&line?, out)?;
            self.prompt(out)?;
        }
        Ok(())
    }

    /// 1行分のコマンドを処理する
    pub fn process_line<W: Write>(&mut self, line: &str, out: &mut W) -> Result<()> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let Some((&name, rest)) = tokens.split_first() else {
            return Ok(());
        };

        if name == "help" {
            writeln!(out, "{HELP}")?;
        } else if let Some(toggle) = Toggle::from_name(name) {
            self.apply_toggle(toggle, rest, out)?;
        } else {
            self.dispatch(&tokens, out)?;
        }
        out.flush()?;
        Ok(())
    }

    fn prompt<W: Write>(&self, out: &mut W) -> Result<()> {
        if !self.options.json {
            writeln!(out, "{PROMPT}")?;
            out.flush()?;
        }
        Ok(())
    }

    fn apply_toggle<W: Write>(&mut self, toggle: Toggle, rest: &[&str], out: &mut W) -> Result<()> {
        let enabled = match rest {
            [state] => state.parse::<bool>().ok(),
            _ => None,
        };
        let Some(enabled) = enabled else {
            eprintln!(
                "❌ エラー: `{}` には true か false を1つ指定してください",
                toggle.label()
            );
            return Ok(());
        };

        match toggle {
            Toggle::Verbose => self.options.verbose = enabled,
            Toggle::Iterative => self.options.use_iterative = enabled,
            Toggle::JsonOutput => self.options.json = enabled,
        }
        let state = if enabled { "enabled" } else { "disabled" };
        writeln!(out, "{} {state}.", toggle.label())?;
        Ok(())
    }

    fn dispatch<W: Write>(&self, tokens: &[&str], out: &mut W) -> Result<()> {
        let args = std::iter::once("algo_bench").chain(tokens.iter().copied());
        let cli = match Cli::try_parse_from(args) {
            Ok(cli) => cli,
            Err(error) => {
                match error.kind() {
                    ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                        write!(out, "{}", error.render())?
                    }
                    _ => eprint!("{}", error.render()),
                }
                return Ok(());
            }
        };

        let Some(command) = cli.command else {
            eprintln!("❌ エラー: コマンドがありません (`help` で一覧を表示)");
            return Ok(());
        };

        let options = self.options.overlay(&cli.options);
        if let Err(error) = execute(&options, command, out) {
            out.flush()?;
            report_error(&error);
        }
        Ok(())
    }
}
