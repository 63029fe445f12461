use std::fmt;

/// Error raised by vector construction, arithmetic and geometry.
#[derive(Debug, Clone, PartialEq)]
pub enum VectorError {
    /// Operand cannot be coerced to a number or a 2-element sequence, or the
    /// operation is not defined for that operand shape.
    TypeConversion(String),
    /// Mathematically undefined operation on well-shaped input.
    Domain(String),
    /// Component index out of range, or a slice assignment that would change
    /// the vector's arity.
    Index(String),
}

impl VectorError {
    pub(crate) fn type_conversion(msg: impl Into<String>) -> Self {
        Self::TypeConversion(msg.into())
    }

    pub(crate) fn domain(msg: impl Into<String>) -> Self {
        Self::Domain(msg.into())
    }

    pub(crate) fn index(msg: impl Into<String>) -> Self {
        Self::Index(msg.into())
    }
}

impl fmt::Display for VectorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TypeConversion(msg) => write!(f, "type error: {msg}"),
            Self::Domain(msg) => write!(f, "domain error: {msg}"),
            Self::Index(msg) => write!(f, "index error: {msg}"),
        }
    }
}

impl std::error::Error for VectorError {}

pub type VectorResult<T> = Result<T, VectorError>;
