//! CalcEngine - shared evaluation namespace for interactive use
//!
//! Every helper in the crate is registered with an evalexpr context under
//! its short interactive name (`int2bin`, `rpar`, `swab32`, ...) and its
//! descriptive name (`int_to_binary_string`, `parallel_resistance`, ...).
//! The binary-multiple constants (`K`, `Mi`, ...) and the ratio unknown `x`
//! are preset variables.
//!
//! evalexpr passes a single argument as-is and several arguments as a
//! tuple, so each builtin receives a flattened argument list.
//!
//! Integers travel as 64-bit patterns in `Value::Int`: `swab64(128)` reads
//! back as `-9223372036854775808`, and feeding that to `int2bin` gives a one
//! followed by 63 zeros. Wider results are errors, never floats.

use crate::bits;
use crate::config::CalcConfig;
use crate::constants::BINARY_MULTIPLES;
use crate::electronics;
use crate::error::{CalcError, Result};
use crate::inspect;
use crate::ratio::{self, Term};
use crate::si;
use crate::size::{self, SizeInput};
use crate::swap;
use evalexpr::{
    ContextWithMutableFunctions, ContextWithMutableVariables, EvalexprError, EvalexprResult,
    Function, HashMapContext, Value,
};
use std::fmt::Write;
use tracing::debug;

/// Name of the variable holding the ratio solver's unknown marker
pub const UNKNOWN_VARIABLE: &str = "x";

type BuiltinFn = fn(&[Value], &CalcConfig) -> EvalexprResult<Value>;

/// A function exposed in the namespace
struct Builtin {
    /// First name is the short interactive one
    names: &'static [&'static str],
    signature: &'static str,
    summary: &'static str,
    min_args: usize,
    max_args: usize,
    call: BuiltinFn,
}

// === Argument conversion ===

fn arguments(argument: &Value) -> Vec<Value> {
    match argument {
        Value::Tuple(values) => values.clone(),
        Value::Empty => Vec::new(),
        other => vec![other.clone()],
    }
}

fn calc_err(e: CalcError) -> EvalexprError {
    EvalexprError::CustomMessage(e.to_string())
}

fn to_f64(value: &Value) -> EvalexprResult<f64> {
    match value {
        Value::Float(f) => Ok(*f),
        Value::Int(i) => Ok(*i as f64),
        _ => Err(EvalexprError::expected_number(value.clone())),
    }
}

/// Largest float accepted where an integer is expected
const MAX_EXACT_FLOAT: f64 = 9_007_199_254_740_992.0; // 2^53

/// Read an integer argument as a 64-bit pattern.
///
/// Negative `Int`s are taken as their two's complement bits, so every
/// 64-bit register value round-trips through the namespace.
fn to_u64(value: &Value) -> EvalexprResult<u64> {
    match value {
        Value::Int(i) => Ok(*i as u64),
        Value::Float(f) if *f >= 0.0 && f.fract() == 0.0 && *f <= MAX_EXACT_FLOAT => {
            Ok(*f as u64)
        },
        Value::Float(_) => Err(EvalexprError::CustomMessage(format!(
            "expected an exact non-negative integer, got {}",
            value
        ))),
        _ => Err(EvalexprError::expected_number(value.clone())),
    }
}

fn to_u128(value: &Value) -> EvalexprResult<u128> {
    to_u64(value).map(u128::from)
}

fn to_width(value: &Value) -> EvalexprResult<u32> {
    let wide = to_u64(value)?;
    let bits = u32::try_from(wide)
        .map_err(|_| EvalexprError::CustomMessage(format!("bit width {} is too large", wide)))?;
    bits::check_width(bits).map_err(calc_err)
}

fn to_bool(value: &Value) -> EvalexprResult<bool> {
    match value {
        Value::Boolean(b) => Ok(*b),
        Value::Int(i) => Ok(*i != 0),
        _ => Err(EvalexprError::expected_boolean(value.clone())),
    }
}

fn to_str(value: &Value) -> EvalexprResult<&str> {
    match value {
        Value::String(s) => Ok(s.as_str()),
        _ => Err(EvalexprError::expected_string(value.clone())),
    }
}

fn to_term(value: &Value) -> EvalexprResult<Term> {
    match value {
        Value::Empty => Ok(Term::Unknown),
        other => to_f64(other).map(Term::Known),
    }
}

/// Hand a result back as a 64-bit pattern in `Value::Int`
fn from_u128(value: u128) -> EvalexprResult<Value> {
    u64::try_from(value)
        .map(|bits| Value::Int(bits as i64))
        .map_err(|_| EvalexprError::CustomMessage(format!("{} does not fit in 64 bits", value)))
}

fn positions(list: Vec<u32>) -> Value {
    Value::Tuple(list.into_iter().map(|p| Value::Int(i64::from(p))).collect())
}

fn opt<'a>(args: &'a [Value], index: usize) -> Option<&'a Value> {
    args.get(index)
}

// === Builtins ===

fn int2bin(args: &[Value], _: &CalcConfig) -> EvalexprResult<Value> {
    let value = to_u128(&args[0])?;
    let num_bits = opt(args, 1).map(to_width).transpose()?.unwrap_or(0);
    Ok(Value::String(bits::int_to_binary_string(value, num_bits)))
}

fn bitrev(args: &[Value], _: &CalcConfig) -> EvalexprResult<Value> {
    let reversed = bits::bit_reverse(to_u128(&args[0])?, to_width(&args[1])?).map_err(calc_err)?;
    from_u128(reversed)
}

fn hex2bin(args: &[Value], _: &CalcConfig) -> EvalexprResult<Value> {
    let binary = bits::hex_to_binary_string(to_str(&args[0])?).map_err(calc_err)?;
    Ok(Value::String(binary))
}

fn bin2int(args: &[Value], _: &CalcConfig) -> EvalexprResult<Value> {
    let value = bits::binary_string_to_int(to_str(&args[0])?).map_err(calc_err)?;
    from_u128(value)
}

fn group(args: &[Value], _: &CalcConfig) -> EvalexprResult<Value> {
    let len = usize::try_from(to_u64(&args[1])?)
        .map_err(|_| EvalexprError::CustomMessage("group length is too large".to_string()))?;
    Ok(Value::String(bits::group_string(to_str(&args[0])?, len)))
}

fn position_args(args: &[Value], config: &CalcConfig) -> EvalexprResult<(u128, u32, bool)> {
    let value = to_u128(&args[0])?;
    let width = match opt(args, 1) {
        Some(width) => to_width(width)?,
        None => bits::check_width(config.default_bits).map_err(calc_err)?,
    };
    let reversed = opt(args, 2).map(to_bool).transpose()?.unwrap_or(false);
    Ok((value, width, reversed))
}

fn ones(args: &[Value], config: &CalcConfig) -> EvalexprResult<Value> {
    let (value, width, reversed) = position_args(args, config)?;
    Ok(positions(bits::ones_positions(value, width, reversed)))
}

fn zeros(args: &[Value], config: &CalcConfig) -> EvalexprResult<Value> {
    let (value, width, reversed) = position_args(args, config)?;
    Ok(positions(bits::zeros_positions(value, width, reversed)))
}

fn inspect_value(args: &[Value], _: &CalcConfig) -> EvalexprResult<Value> {
    let value = to_u128(&args[0])?;
    let reversed = opt(args, 1).map(to_bool).transpose()?.unwrap_or(false);
    let num_bits = opt(args, 2).map(to_width).transpose()?.unwrap_or(0);
    Ok(Value::String(inspect::inspect(value, reversed, num_bits)))
}

fn inspect_bytes(args: &[Value], config: &CalcConfig) -> EvalexprResult<Value> {
    let num_bytes = to_f64(&args[0])?;
    // metric is accepted and ignored
    opt(args, 1).map(to_bool).transpose()?;
    Ok(Value::String(size::inspect_byte_count_with(
        num_bytes,
        config.decimals,
    )))
}

fn size_report(args: &[Value], config: &CalcConfig) -> EvalexprResult<Value> {
    let input = match &args[0] {
        Value::String(text) => SizeInput::Text(text),
        other => SizeInput::Number(to_f64(other)?),
    };
    let unit = opt(args, 1).map(to_str).transpose()?;
    opt(args, 2).map(to_bool).transpose()?;

    let quantity = size::resolve_size(input, unit).map_err(calc_err)?;
    Ok(Value::String(format!(
        "{}\n{}",
        quantity.describe(),
        size::inspect_byte_count_with(quantity.to_bytes(), config.decimals)
    )))
}

fn unit(args: &[Value], _: &CalcConfig) -> EvalexprResult<Value> {
    let value = to_f64(&args[0])?;
    let from = to_str(&args[1])?;
    let to = opt(args, 2).map(to_str).transpose()?.unwrap_or("");
    si::convert_si_unit(value, from, to)
        .map(Value::Float)
        .map_err(calc_err)
}

fn rdiv(args: &[Value], _: &CalcConfig) -> EvalexprResult<Value> {
    electronics::resistor_divider_voltage(to_f64(&args[0])?, to_f64(&args[1])?, to_f64(&args[2])?)
        .map(Value::Float)
        .map_err(calc_err)
}

fn rpar(args: &[Value], _: &CalcConfig) -> EvalexprResult<Value> {
    electronics::parallel_resistance(to_f64(&args[0])?, to_f64(&args[1])?)
        .map(Value::Float)
        .map_err(calc_err)
}

fn rms(args: &[Value], _: &CalcConfig) -> EvalexprResult<Value> {
    Ok(Value::Float(electronics::rms_from_peak(to_f64(&args[0])?)))
}

fn pk(args: &[Value], _: &CalcConfig) -> EvalexprResult<Value> {
    Ok(Value::Float(electronics::peak_from_rms(to_f64(&args[0])?)))
}

fn pp(args: &[Value], _: &CalcConfig) -> EvalexprResult<Value> {
    Ok(Value::Float(electronics::peak_to_peak_from_rms(to_f64(
        &args[0],
    )?)))
}

fn dbgain(args: &[Value], _: &CalcConfig) -> EvalexprResult<Value> {
    electronics::db_gain_from_ratio(to_f64(&args[0])?)
        .map(Value::Float)
        .map_err(calc_err)
}

fn ampgain(args: &[Value], _: &CalcConfig) -> EvalexprResult<Value> {
    Ok(Value::Float(electronics::ratio_from_db_gain(to_f64(
        &args[0],
    )?)))
}

// Bits above the swap width are ignored
fn swab16(args: &[Value], _: &CalcConfig) -> EvalexprResult<Value> {
    let x = to_u64(&args[0])? as u16;
    Ok(Value::Int(i64::from(swap::swab16(x))))
}

fn swab32(args: &[Value], _: &CalcConfig) -> EvalexprResult<Value> {
    let x = to_u64(&args[0])? as u32;
    Ok(Value::Int(i64::from(swap::swab32(x))))
}

fn swab64(args: &[Value], _: &CalcConfig) -> EvalexprResult<Value> {
    from_u128(u128::from(swap::swab64(to_u64(&args[0])?)))
}

fn swah32(args: &[Value], _: &CalcConfig) -> EvalexprResult<Value> {
    let x = to_u64(&args[0])? as u32;
    Ok(Value::Int(i64::from(swap::swah32(x))))
}

fn swahb32(args: &[Value], _: &CalcConfig) -> EvalexprResult<Value> {
    let x = to_u64(&args[0])? as u32;
    Ok(Value::Int(i64::from(swap::swahb32(x))))
}

fn ratio_solve(args: &[Value], _: &CalcConfig) -> EvalexprResult<Value> {
    ratio::solve_ratio(
        to_term(&args[0])?,
        to_term(&args[1])?,
        to_term(&args[2])?,
        to_term(&args[3])?,
    )
    .map(Value::Float)
    .map_err(calc_err)
}

const BUILTINS: &[Builtin] = &[
    Builtin {
        names: &["int2bin", "int_to_binary_string"],
        signature: "int2bin(value, num_bits=0)",
        summary: "Binary digit string, nibble-rounded width when num_bits is 0",
        min_args: 1,
        max_args: 2,
        call: int2bin,
    },
    Builtin {
        names: &["bitrev", "bit_reverse"],
        signature: "bitrev(value, bits)",
        summary: "Reverse the low `bits` bits of value",
        min_args: 2,
        max_args: 2,
        call: bitrev,
    },
    Builtin {
        names: &["hex2bin", "hex_to_binary_string"],
        signature: "hex2bin(\"0x..\")",
        summary: "Binary digit string of a hex string",
        min_args: 1,
        max_args: 1,
        call: hex2bin,
    },
    Builtin {
        names: &["bin2int", "bin", "binary_string_to_int"],
        signature: "bin2int(\"0101\")",
        summary: "Integer value of a binary digit string",
        min_args: 1,
        max_args: 1,
        call: bin2int,
    },
    Builtin {
        names: &["group", "group_string"],
        signature: "group(string, length)",
        summary: "Split a string into space separated groups, right aligned",
        min_args: 2,
        max_args: 2,
        call: group,
    },
    Builtin {
        names: &["ones", "ones_positions"],
        signature: "ones(value, bits=32, reversed=false)",
        summary: "Positions of the set bits",
        min_args: 1,
        max_args: 3,
        call: ones,
    },
    Builtin {
        names: &["zeros", "zeros_positions"],
        signature: "zeros(value, bits=32, reversed=false)",
        summary: "Positions of the clear bits",
        min_args: 1,
        max_args: 3,
        call: zeros,
    },
    Builtin {
        names: &["inspect"],
        signature: "inspect(value, reversed=false, num_bits=0)",
        summary: "Decimal, hex and binary report of an integer",
        min_args: 1,
        max_args: 3,
        call: inspect_value,
    },
    Builtin {
        names: &["inspect_bytes", "inspect_byte_count"],
        signature: "inspect_bytes(num_bytes, metric=false)",
        summary: "Byte count at B/KB/MB/GB/TB and bit scales",
        min_args: 1,
        max_args: 2,
        call: inspect_bytes,
    },
    Builtin {
        names: &["size", "parse_and_inspect_size"],
        signature: "size(\"1KB\") | size(value, \"Kib\", metric=false)",
        summary: "Parse a bit/byte size and report it at several scales",
        min_args: 1,
        max_args: 3,
        call: size_report,
    },
    Builtin {
        names: &["unit", "convert_si_unit"],
        signature: "unit(value, \"from\", \"to\"=\"\")",
        summary: "Convert between SI prefixes, e.g. unit(1, \"k\") = 1000",
        min_args: 2,
        max_args: 3,
        call: unit,
    },
    Builtin {
        names: &["rdiv", "resistor_divider_voltage"],
        signature: "rdiv(vcc, r1, r2)",
        summary: "Resistor divider midpoint voltage, r1 nearest vcc",
        min_args: 3,
        max_args: 3,
        call: rdiv,
    },
    Builtin {
        names: &["rpar", "parallel_resistance"],
        signature: "rpar(r1, r2)",
        summary: "Equivalent resistance of r1 and r2 in parallel",
        min_args: 2,
        max_args: 2,
        call: rpar,
    },
    Builtin {
        names: &["rms", "rms_from_peak"],
        signature: "rms(peak)",
        summary: "RMS value for a peak value",
        min_args: 1,
        max_args: 1,
        call: rms,
    },
    Builtin {
        names: &["pk", "peak_from_rms"],
        signature: "pk(rms)",
        summary: "Peak value for an RMS value",
        min_args: 1,
        max_args: 1,
        call: pk,
    },
    Builtin {
        names: &["pp", "peak_to_peak_from_rms"],
        signature: "pp(rms)",
        summary: "Peak-to-peak value for an RMS value",
        min_args: 1,
        max_args: 1,
        call: pp,
    },
    Builtin {
        names: &["dbgain", "db_gain_from_ratio"],
        signature: "dbgain(ratio)",
        summary: "Gain in dB for an output:input ratio",
        min_args: 1,
        max_args: 1,
        call: dbgain,
    },
    Builtin {
        names: &["ampgain", "ratio_from_db_gain"],
        signature: "ampgain(db)",
        summary: "Output:input ratio for a gain in dB",
        min_args: 1,
        max_args: 1,
        call: ampgain,
    },
    Builtin {
        names: &["swab16"],
        signature: "swab16(value)",
        summary: "Swap bytes in a 16-bit value",
        min_args: 1,
        max_args: 1,
        call: swab16,
    },
    Builtin {
        names: &["swab32"],
        signature: "swab32(value)",
        summary: "Swap bytes in a 32-bit value",
        min_args: 1,
        max_args: 1,
        call: swab32,
    },
    Builtin {
        names: &["swab64"],
        signature: "swab64(value)",
        summary: "Swap bytes in a 64-bit value",
        min_args: 1,
        max_args: 1,
        call: swab64,
    },
    Builtin {
        names: &["swah32"],
        signature: "swah32(value)",
        summary: "Swap the 16-bit halves of a 32-bit value",
        min_args: 1,
        max_args: 1,
        call: swah32,
    },
    Builtin {
        names: &["swahb32"],
        signature: "swahb32(value)",
        summary: "Swap the bytes within each 16-bit half",
        min_args: 1,
        max_args: 1,
        call: swahb32,
    },
    Builtin {
        names: &["ratio", "solve_ratio"],
        signature: "ratio(n1, d1, n2, d2)",
        summary: "Solve n1/d1 = n2/d2 for the term given as x",
        min_args: 4,
        max_args: 4,
        call: ratio_solve,
    },
];

/// CalcEngine - evaluation namespace with every helper preloaded
///
/// # Example
/// ```
/// use cmpe_calc::CalcEngine;
///
/// let mut engine = CalcEngine::new().unwrap();
/// assert_eq!(engine.evaluate_number("rpar(1000, 1000)").unwrap(), 500.0);
/// assert_eq!(engine.evaluate_number("ratio(x, 2, 4, 8)").unwrap(), 1.0);
/// assert_eq!(engine.evaluate_number("swab16(4660)").unwrap(), 13330.0);
///
/// // Variables persist between evaluations
/// engine.evaluate("r = rpar(300, 600)").unwrap();
/// assert_eq!(engine.evaluate_number("r").unwrap(), 200.0);
/// ```
pub struct CalcEngine {
    context: HashMapContext,
    config: CalcConfig,
}

impl CalcEngine {
    /// Create an engine with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(CalcConfig::default())
    }

    /// Create an engine with the given configuration
    pub fn with_config(config: CalcConfig) -> Result<Self> {
        let mut context = HashMapContext::new();
        Self::register_functions(&mut context, &config)?;
        Self::install_constants(&mut context)?;
        debug!(functions = BUILTINS.len(), "calc engine ready");
        Ok(Self { context, config })
    }

    pub fn config(&self) -> &CalcConfig {
        &self.config
    }

    /// Evaluate an expression, keeping any variables it assigns.
    ///
    /// Constants are restored afterwards, so they cannot be overwritten.
    pub fn evaluate(&mut self, expression: &str) -> Result<Value> {
        let result = evalexpr::eval_with_context_mut(expression, &mut self.context);
        Self::install_constants(&mut self.context)?;
        result.map_err(|e| {
            CalcError::expression(format!("Failed to evaluate '{}': {}", expression, e))
        })
    }

    /// Evaluate an expression that must produce a number
    pub fn evaluate_number(&mut self, expression: &str) -> Result<f64> {
        let value = self.evaluate(expression)?;
        Self::value_to_f64(value, expression)
    }

    /// Evaluate an expression that must produce text, such as a report
    pub fn evaluate_text(&mut self, expression: &str) -> Result<String> {
        match self.evaluate(expression)? {
            Value::String(s) => Ok(s),
            _ => Err(CalcError::expression(format!(
                "Expression did not evaluate to text: {}",
                expression
            ))),
        }
    }

    /// Set a numeric variable in the namespace
    pub fn set_variable(&mut self, name: &str, value: f64) -> Result<()> {
        if is_constant(name) {
            return Err(CalcError::expression(format!(
                "'{}' is a read-only constant",
                name
            )));
        }
        self.context
            .set_value(name.to_string(), Value::from(value))
            .map_err(|e| CalcError::expression(format!("Failed to set variable {}: {}", name, e)))
    }

    /// All names callable in the namespace
    pub fn function_names() -> impl Iterator<Item = &'static str> {
        BUILTINS.iter().flat_map(|b| b.names.iter().copied())
    }

    /// Listing of every function with its signature and a one-line summary
    pub fn help() -> String {
        let mut text = String::from("Functions:\n");
        for builtin in BUILTINS {
            let _ = writeln!(text, "  {:<48} {}", builtin.signature, builtin.summary);
            if builtin.names.len() > 1 {
                let _ = writeln!(text, "  {:<48} (also: {})", "", builtin.names[1..].join(", "));
            }
        }
        text.push_str("\nConstants:\n  ");
        let names: Vec<&str> = BINARY_MULTIPLES.iter().map(|(name, _)| *name).collect();
        text.push_str(&names.join(" "));
        let _ = writeln!(
            text,
            "\n  {} marks the unknown term for ratio()",
            UNKNOWN_VARIABLE
        );
        text
    }

    fn register_functions(context: &mut HashMapContext, config: &CalcConfig) -> Result<()> {
        for builtin in BUILTINS {
            for name in builtin.names {
                let config = config.clone();
                let function = Function::new(move |argument| {
                    let args = arguments(argument);
                    if args.len() < builtin.min_args || args.len() > builtin.max_args {
                        return Err(EvalexprError::CustomMessage(format!(
                            "{} takes {} to {} arguments, got {}",
                            builtin.names[0],
                            builtin.min_args,
                            builtin.max_args,
                            args.len()
                        )));
                    }
                    (builtin.call)(&args, &config)
                });
                context
                    .set_function(name.to_string(), function)
                    .map_err(|e| {
                        CalcError::expression(format!("Failed to register {}: {}", name, e))
                    })?;
            }
        }
        Ok(())
    }

    fn install_constants(context: &mut HashMapContext) -> Result<()> {
        for (name, value) in BINARY_MULTIPLES {
            context
                .set_value(name.to_string(), constant_value(*value))
                .map_err(|e| CalcError::expression(format!("Failed to set {}: {}", name, e)))?;
        }
        context
            .set_value(UNKNOWN_VARIABLE.to_string(), Value::Empty)
            .map_err(|e| {
                CalcError::expression(format!("Failed to set {}: {}", UNKNOWN_VARIABLE, e))
            })
    }

    /// Convert evalexpr Value to f64
    fn value_to_f64(value: Value, expression: &str) -> Result<f64> {
        match value {
            Value::Float(f) => Ok(f),
            Value::Int(i) => Ok(i as f64),
            Value::Boolean(b) => Ok(if b { 1.0 } else { 0.0 }),
            _ => Err(CalcError::expression(format!(
                "Expression did not evaluate to a number: {}",
                expression
            ))),
        }
    }
}

/// `Z` and `Y` exceed 64 bits and are kept as exact powers of two in floats
fn constant_value(value: u128) -> Value {
    i64::try_from(value).map_or(Value::Float(value as f64), Value::Int)
}

fn is_constant(name: &str) -> bool {
    name == UNKNOWN_VARIABLE || BINARY_MULTIPLES.iter().any(|(n, _)| *n == name)
}
