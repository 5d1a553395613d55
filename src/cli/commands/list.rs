use crate::algorithms::AlgorithmKind;
use anyhow::Result;
use std::io::Write;

/// 利用可能なアルゴリズム名を1行ずつ書き出す
pub fn execute_list<W: Write>(out: &mut W) -> Result<()> {
    for kind in AlgorithmKind::ALL {
        writeln!(out, "{kind}")?;
    }
    Ok(())
}
