//! Known-answer checks for each helper group

#![allow(clippy::disallowed_methods)] // Test code - unwrap is acceptable

use cmpe_calc::{
    convert_si_unit, db_gain_from_ratio, inspect, parallel_resistance, parse_and_inspect_size,
    parse_size, ratio_from_db_gain, resistor_divider_voltage, solve_ratio, swab16, swab32,
    swab64, swah32, swahb32, CalcError, Term, X,
};

#[test]
fn byte_swaps() {
    assert_eq!(swab16(0x1234), 0x3412);
    assert_eq!(swab32(0x1234_5678), 0x7856_3412);
    assert_eq!(swab64(0x1234_5678_9abc_def0), 0xf0de_bc9a_7856_3412);
    assert_eq!(swah32(0x1234_5678), 0x5678_1234);
    assert_eq!(swahb32(0x1234_5678), 0x3412_7856);
}

#[test]
fn resistor_networks() {
    assert_eq!(parallel_resistance(1000.0, 1000.0).unwrap(), 500.0);
    assert_eq!(resistor_divider_voltage(5.0, 1000.0, 1000.0).unwrap(), 2.5);
}

#[test]
fn decibel_round_trip() {
    assert!((db_gain_from_ratio(9.0).unwrap() - 19.08).abs() < 0.1);
    assert!((ratio_from_db_gain(19.08) - 9.0).abs() < 0.01);
}

#[test]
fn si_conversion() {
    assert_eq!(convert_si_unit(1.0, "k", "").unwrap(), 1000.0);
    assert_eq!(convert_si_unit(1000.0, "", "k").unwrap(), 1.0);
}

#[test]
fn kilobyte_is_binary() {
    assert_eq!(parse_size("1KB").unwrap().to_bytes(), 1024.0);
    let report = parse_and_inspect_size("1KB", None, false).unwrap();
    assert!(report.contains("Bytes (B)\t\t:\t1024\n"));
    assert!(report.contains("Kilobytes (KB)\t\t:\t1.000\n"));
}

#[test]
fn ratio_solver() {
    assert_eq!(
        solve_ratio(X, Term::Known(2.0), Term::Known(4.0), Term::Known(8.0)).unwrap(),
        1.0
    );
    assert!(matches!(
        solve_ratio(
            Term::Known(1.0),
            Term::Known(2.0),
            Term::Known(4.0),
            Term::Known(8.0)
        ),
        Err(CalcError::Ambiguous(_))
    ));
}

#[test]
fn inspect_report_has_every_section() {
    let report = inspect(0x1234, false, 0);
    let labels: Vec<&str> = report
        .lines()
        .map(|line| line.split(':').next().unwrap_or("").trim())
        .collect();
    assert_eq!(
        labels,
        vec![
            "Decimal",
            "Hexadecimal",
            "Binary",
            "",
            "Binary (grouped)",
            "One bits",
            "Zero bits"
        ]
    );
    assert!(report.contains("0x1234"));
    assert!(report.contains(" 0001 0010 0011 0100\n"));
}
