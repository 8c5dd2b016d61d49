//! Error types for cmpe-calc

use thiserror::Error;

/// Calculation errors
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CalcError {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Unknown prefix: {0}")]
    UnknownPrefix(String),

    #[error("Ambiguous input: {0}")]
    Ambiguous(String),

    #[error("Math domain error: {0}")]
    Domain(String),

    #[error("Expression error: {0}")]
    Expression(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl CalcError {
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    pub fn unknown_prefix(prefix: impl Into<String>) -> Self {
        Self::UnknownPrefix(prefix.into())
    }

    pub fn ambiguous(msg: impl Into<String>) -> Self {
        Self::Ambiguous(msg.into())
    }

    pub fn domain(msg: impl Into<String>) -> Self {
        Self::Domain(msg.into())
    }

    pub fn expression(msg: impl Into<String>) -> Self {
        Self::Expression(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, CalcError>;
