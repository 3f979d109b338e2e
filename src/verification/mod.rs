//! Static checks over generated programs. These inspect the emitted
//! text only; nothing here executes or simulates the instructions.

use crate::generator::counts_against_budget;

/// Number of lines that were charged against the instruction budget.
pub fn counted_instructions(lines: &[String]) -> usize {
    lines.iter().filter(|l| counts_against_budget(l)).count()
}

/// The register a line explicitly writes, if any.
///
/// `sw` stores a register to memory and writes none; branches, jumps,
/// returns, and `nop` write no explicit operand. The implicit `$ra`
/// update of `jal` is not reported — the generator treats it as an
/// unmanaged clobber.
pub fn write_target(line: &str) -> Option<&str> {
    let trimmed = line.trim();
    let (op, rest) = trimmed.split_once(' ')?;
    match op {
        "add" | "sub" | "ori" | "lui" | "lw" => Some(rest.split(',').next()?.trim()),
        _ => None,
    }
}

/// Labels declared by the program, in order of declaration.
pub fn declared_labels(lines: &[String]) -> Vec<&str> {
    lines
        .iter()
        .filter_map(|line| {
            let trimmed = line.trim();
            if trimmed.starts_with('#') {
                return None;
            }
            let (label, _) = trimmed.split_once(':')?;
            Some(label)
        })
        .collect()
}

/// Targets of every call in the program, in emission order.
pub fn call_targets(lines: &[String]) -> Vec<&str> {
    lines
        .iter()
        .filter_map(|line| line.trim().strip_prefix("jal "))
        .collect()
}
