//! Parser for the decoder command's line-oriented stdout.
//!
//! Each non-empty line is `<SYMBOLOGY> <TEXT>`. The split happens on the first run of
//! whitespace, so a symbology name containing spaces is mis-split; that is kept for
//! compatibility with existing decoder output.

use codescan_core::Barcode;

/// Parse the full stdout of one decoder invocation.
pub fn parse_output(stdout: &str) -> Vec<Barcode> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(parse_line)
        .collect()
}

/// Parse a single trimmed, non-empty line.
pub fn parse_line(line: &str) -> Barcode {
    match line.split_once(char::is_whitespace) {
        Some((kind, data)) => Barcode::new(kind, data.trim_start()),
        None => Barcode::unknown(line),
    }
}
