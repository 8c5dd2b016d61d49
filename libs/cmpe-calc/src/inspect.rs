//! Multi-line report of an integer's decimal, hex and binary forms

use crate::bits::{group_string, int_to_binary_string, ones_positions, zeros_positions};
use std::fmt::Write;

fn format_positions(positions: &[u32]) -> String {
    let items: Vec<String> = positions.iter().map(|p| p.to_string()).collect();
    format!("[{}]", items.join(", "))
}

/// Build the inspection report for `value`.
///
/// The bit-label row marks every fourth bit starting from the most
/// significant one, so each label sits above the first digit of a nibble
/// in the grouped line. With `reversed`, bit numbering runs from the MSB.
///
/// Example for `inspect(0xa5, false, 0)`:
///
/// ```text
/// Decimal                 :       165
/// Hexadecimal             :       0xa5
/// Binary                  :       10100101
///                         :        7    3
/// Binary (grouped)        :        1010 0101
/// One bits                :       [0, 2, 5, 7]
/// Zero bits               :       [1, 3, 4, 6]
/// ```
pub fn inspect(value: u128, reversed: bool, num_bits: u32) -> String {
    let binary = int_to_binary_string(value, num_bits);
    let bits = binary.len() as u32;

    let mut labels = String::new();
    for x in (0..bits).rev().step_by(4) {
        let bit_num = if reversed { bits - x - 1 } else { x };
        // Writing to String buffer is infallible
        let _ = write!(labels, "{:2}   ", bit_num);
    }

    let mut report = String::new();
    let _ = writeln!(report, "Decimal\t\t\t:\t{}", value);
    let _ = writeln!(report, "Hexadecimal\t\t:\t0x{:x}", value);
    let _ = writeln!(report, "Binary\t\t\t:\t{}", binary);
    let _ = writeln!(report, "\t\t\t:\t{}", labels.trim_end());
    let _ = writeln!(report, "Binary (grouped)\t:\t {}", group_string(&binary, 4));
    let _ = writeln!(
        report,
        "One bits\t\t:\t{}",
        format_positions(&ones_positions(value, bits, reversed))
    );
    let _ = writeln!(
        report,
        "Zero bits\t\t:\t{}",
        format_positions(&zeros_positions(value, bits, reversed))
    );
    report
}
