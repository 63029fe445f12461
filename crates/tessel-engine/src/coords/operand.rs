use super::{Elementwise, Vector2};

/// Absolute per-component tolerance used by vector equality.
pub const EQ_TOLERANCE: f64 = 1e-6;

/// Right-hand side of a dynamically dispatched vector operation.
///
/// The tag decides between linear-algebra and componentwise semantics:
/// `Vector2 * Pair` is a dot product, `Vector2 * Elementwise` is a vector of
/// products.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Operand {
    /// A bare number.
    Scalar(f64),
    /// A plain 2-element sequence (vector, array, tuple).
    Pair([f64; 2]),
    /// A vector explicitly tagged for componentwise operators.
    Elementwise([f64; 2]),
}

impl Operand {
    /// Components of a sequence operand; `None` for scalars.
    #[inline]
    pub fn components(self) -> Option<[f64; 2]> {
        match self {
            Operand::Scalar(_) => None,
            Operand::Pair(c) | Operand::Elementwise(c) => Some(c),
        }
    }

    /// Components, with scalars broadcast to both lanes.
    #[inline]
    pub fn broadcast(self) -> [f64; 2] {
        match self {
            Operand::Scalar(s) => [s, s],
            Operand::Pair(c) | Operand::Elementwise(c) => c,
        }
    }

    #[inline]
    pub fn is_elementwise(self) -> bool {
        matches!(self, Operand::Elementwise(_))
    }
}

impl From<Vector2> for Operand {
    #[inline]
    fn from(v: Vector2) -> Self {
        Operand::Pair([v.x, v.y])
    }
}

impl From<&Vector2> for Operand {
    #[inline]
    fn from(v: &Vector2) -> Self {
        Operand::Pair([v.x, v.y])
    }
}

impl From<Elementwise<'_>> for Operand {
    #[inline]
    fn from(view: Elementwise<'_>) -> Self {
        Operand::Elementwise(view.components())
    }
}

macro_rules! impl_numeric_operand {
    ($($t:ty),* $(,)?) => {$(
        impl From<$t> for Operand {
            #[inline]
            fn from(v: $t) -> Self {
                Operand::Scalar(f64::from(v))
            }
        }

        impl From<[$t; 2]> for Operand {
            #[inline]
            fn from([x, y]: [$t; 2]) -> Self {
                Operand::Pair([f64::from(x), f64::from(y)])
            }
        }

        impl From<($t, $t)> for Operand {
            #[inline]
            fn from((x, y): ($t, $t)) -> Self {
                Operand::Pair([f64::from(x), f64::from(y)])
            }
        }
    )*};
}

impl_numeric_operand!(f64, f32, i32, u32, i16, u16, i8, u8);

/// Result of `Vector2 * operand`: a dot product or a scaled vector.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Product {
    Scalar(f64),
    Vector(Vector2),
}

impl Product {
    pub fn scalar(self) -> Option<f64> {
        match self {
            Product::Scalar(s) => Some(s),
            Product::Vector(_) => None,
        }
    }

    pub fn vector(self) -> Option<Vector2> {
        match self {
            Product::Scalar(_) => None,
            Product::Vector(v) => Some(v),
        }
    }
}

/// Comparison operator for the dynamic comparison API.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum CmpOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl CmpOp {
    #[inline]
    pub fn is_ordering(self) -> bool {
        !matches!(self, CmpOp::Eq | CmpOp::Ne)
    }

    /// Applies the operator to both lane pairs.
    ///
    /// Equality is AND-reduced within [`EQ_TOLERANCE`], inequality is its
    /// negation, orderings hold only when they hold for both lanes.
    pub fn holds(self, lhs: [f64; 2], rhs: [f64; 2]) -> bool {
        match self {
            CmpOp::Eq => approx_eq(lhs, rhs),
            CmpOp::Ne => !approx_eq(lhs, rhs),
            CmpOp::Lt => lhs[0] < rhs[0] && lhs[1] < rhs[1],
            CmpOp::Le => lhs[0] <= rhs[0] && lhs[1] <= rhs[1],
            CmpOp::Gt => lhs[0] > rhs[0] && lhs[1] > rhs[1],
            CmpOp::Ge => lhs[0] >= rhs[0] && lhs[1] >= rhs[1],
        }
    }
}

#[inline]
pub(crate) fn approx_eq(a: [f64; 2], b: [f64; 2]) -> bool {
    (a[0] - b[0]).abs() < EQ_TOLERANCE && (a[1] - b[1]).abs() < EQ_TOLERANCE
}

/// Ordering shared by the `PartialOrd` impls. `None` when the lanes disagree.
pub(crate) fn lane_ordering(a: [f64; 2], b: [f64; 2]) -> Option<core::cmp::Ordering> {
    use core::cmp::Ordering;

    if approx_eq(a, b) {
        Some(Ordering::Equal)
    } else if CmpOp::Lt.holds(a, b) {
        Some(Ordering::Less)
    } else if CmpOp::Gt.holds(a, b) {
        Some(Ordering::Greater)
    } else {
        None
    }
}

/// Floored modulo: the result takes the sign of the divisor.
#[inline]
pub(crate) fn floor_mod(a: f64, b: f64) -> f64 {
    let r = a % b;
    if r != 0.0 && (r < 0.0) != (b < 0.0) {
        r + b
    } else {
        r
    }
}

#[inline]
pub(crate) fn floor_div(a: f64, b: f64) -> f64 {
    (a / b).floor()
}
