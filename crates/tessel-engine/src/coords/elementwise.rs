use core::cmp::Ordering;
use core::ops::{Add, Div, Index, Mul, Neg, Rem, Sub};

use crate::error::{VectorError, VectorResult};

use super::operand::{floor_div, floor_mod, lane_ordering, CmpOp, Operand};
use super::Vector2;

/// Componentwise operator view of a [`Vector2`].
///
/// Borrows the vector; creating a view neither copies nor mutates it. Every
/// arithmetic operator acts lane by lane against a scalar (broadcast to both
/// lanes) or a 2-element operand and yields a new `Vector2`.
///
/// When used as the right-hand side of a vector operator the view also tags
/// the operand: `v * w` is a dot product, `v * w.elementwise()` is a vector.
#[derive(Debug, Copy, Clone)]
pub struct Elementwise<'a> {
    vector: &'a Vector2,
}

impl<'a> Elementwise<'a> {
    #[inline]
    pub(super) fn new(vector: &'a Vector2) -> Self {
        Self { vector }
    }

    /// The wrapped vector.
    #[inline]
    pub fn vector(self) -> &'a Vector2 {
        self.vector
    }

    #[inline]
    pub fn components(self) -> [f64; 2] {
        [self.vector.x, self.vector.y]
    }

    #[inline]
    pub fn get(self, index: isize) -> VectorResult<f64> {
        self.vector.get(index)
    }

    #[inline]
    pub fn iter(self) -> core::array::IntoIter<f64, 2> {
        self.vector.iter()
    }

    #[inline]
    #[allow(clippy::len_without_is_empty)]
    pub const fn len(self) -> usize {
        2
    }

    #[inline]
    pub fn is_nonzero(self) -> bool {
        self.vector.is_nonzero()
    }

    /// Unary plus: a fresh copy of the wrapped vector.
    #[inline]
    pub fn pos(self) -> Vector2 {
        *self.vector
    }

    /// Absolute values as a plain pair, not a vector.
    #[inline]
    pub fn abs(self) -> (f64, f64) {
        (self.vector.x.abs(), self.vector.y.abs())
    }

    #[inline]
    fn zip(self, rhs: impl Into<Operand>, f: impl Fn(f64, f64) -> f64) -> Vector2 {
        let [a, b] = self.components();
        let [c, d] = rhs.into().broadcast();
        Vector2::new(f(a, c), f(b, d))
    }

    // ── reflected & named operators ───────────────────────────────────────

    pub fn floor_div(self, rhs: impl Into<Operand>) -> Vector2 {
        self.zip(rhs, floor_div)
    }

    /// `lhs - self`.
    pub fn rsub(self, lhs: impl Into<Operand>) -> Vector2 {
        self.zip(lhs, |a, b| b - a)
    }

    /// `lhs / self`.
    pub fn rdiv(self, lhs: impl Into<Operand>) -> Vector2 {
        self.zip(lhs, |a, b| b / a)
    }

    /// `lhs // self`.
    pub fn rfloor_div(self, lhs: impl Into<Operand>) -> Vector2 {
        self.zip(lhs, |a, b| floor_div(b, a))
    }

    /// `lhs % self`, floored.
    pub fn rrem(self, lhs: impl Into<Operand>) -> Vector2 {
        self.zip(lhs, |a, b| floor_mod(b, a))
    }

    /// Raises each lane to `exponent`.
    ///
    /// Fails if a negative lane would be raised to a fractional power. With a
    /// scalar exponent any negative lane fails; with a pair each lane is
    /// checked against its own exponent.
    pub fn pow(self, exponent: impl Into<Operand>) -> VectorResult<Vector2> {
        let exponent = exponent.into();
        let [x, y] = self.components();
        let [ex, ey] = exponent.broadcast();
        let invalid = match exponent {
            Operand::Scalar(e) => is_fractional(e) && (x < 0.0 || y < 0.0),
            _ => (is_fractional(ex) && x < 0.0) || (is_fractional(ey) && y < 0.0),
        };
        if invalid {
            return Err(negative_fractional_power());
        }
        Ok(Vector2::new(x.powf(ex), y.powf(ey)))
    }

    /// Raises `base` to each lane.
    pub fn rpow(self, base: impl Into<Operand>) -> VectorResult<Vector2> {
        let base = base.into();
        let [x, y] = self.components();
        let [bx, by] = base.broadcast();
        let invalid = match base {
            Operand::Scalar(b) => b < 0.0 && (is_fractional(x) || is_fractional(y)),
            _ => (bx < 0.0 && is_fractional(x)) || (by < 0.0 && is_fractional(y)),
        };
        if invalid {
            return Err(negative_fractional_power());
        }
        Ok(Vector2::new(bx.powf(x), by.powf(y)))
    }

    /// Single-boolean comparison.
    ///
    /// Equality against a scalar is always false; orderings broadcast a
    /// scalar and must hold for both lanes.
    pub fn compare(self, op: CmpOp, rhs: impl Into<Operand>) -> bool {
        let rhs = rhs.into();
        match (op, rhs) {
            (CmpOp::Eq, Operand::Scalar(_)) => false,
            (CmpOp::Ne, Operand::Scalar(_)) => true,
            _ => op.holds(self.components(), rhs.broadcast()),
        }
    }
}

#[inline]
fn is_fractional(v: f64) -> bool {
    v.fract() != 0.0
}

fn negative_fractional_power() -> VectorError {
    VectorError::domain("negative number cannot be raised to a fractional power")
}

impl Index<isize> for Elementwise<'_> {
    type Output = f64;

    fn index(&self, index: isize) -> &f64 {
        &self.vector[index]
    }
}

impl IntoIterator for Elementwise<'_> {
    type Item = f64;
    type IntoIter = core::array::IntoIter<f64, 2>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// ── operators ─────────────────────────────────────────────────────────────

impl Neg for Elementwise<'_> {
    type Output = Vector2;
    #[inline]
    fn neg(self) -> Vector2 {
        -*self.vector
    }
}

macro_rules! impl_view_op {
    ($($tr:ident :: $method:ident => $f:expr),* $(,)?) => {$(
        impl<R: Into<Operand>> $tr<R> for Elementwise<'_> {
            type Output = Vector2;
            #[inline]
            fn $method(self, rhs: R) -> Vector2 {
                self.zip(rhs, $f)
            }
        }

        impl $tr<Elementwise<'_>> for f64 {
            type Output = Vector2;
            #[inline]
            fn $method(self, rhs: Elementwise<'_>) -> Vector2 {
                rhs.zip(self, |a, b| ($f)(b, a))
            }
        }

        impl $tr<Elementwise<'_>> for [f64; 2] {
            type Output = Vector2;
            #[inline]
            fn $method(self, rhs: Elementwise<'_>) -> Vector2 {
                rhs.zip(self, |a, b| ($f)(b, a))
            }
        }
    )*};
}

impl_view_op! {
    Add::add => |a: f64, b: f64| a + b,
    Sub::sub => |a: f64, b: f64| a - b,
    Mul::mul => |a: f64, b: f64| a * b,
    Div::div => |a: f64, b: f64| a / b,
    Rem::rem => floor_mod,
}

// ── comparisons ───────────────────────────────────────────────────────────

impl<R: Into<Operand> + Copy> PartialEq<R> for Elementwise<'_> {
    #[inline]
    fn eq(&self, other: &R) -> bool {
        self.compare(CmpOp::Eq, *other)
    }
}

/// Lane-wise ordering: a relation holds only if it holds for both lanes.
///
/// `partial_cmp` returns `None` whenever the lanes disagree (and against a
/// scalar where every lane is equal), so `view <= rhs` can hold while
/// `partial_cmp` gives `None`. The overridden `lt`, `le`, `gt` and `ge` are
/// authoritative.
impl<R: Into<Operand> + Copy> PartialOrd<R> for Elementwise<'_> {
    fn partial_cmp(&self, other: &R) -> Option<Ordering> {
        let rhs: Operand = (*other).into();
        match lane_ordering(self.components(), rhs.broadcast()) {
            // A scalar is never equal to a view.
            Some(Ordering::Equal) if rhs.components().is_none() => None,
            ord => ord,
        }
    }

    fn lt(&self, other: &R) -> bool {
        self.compare(CmpOp::Lt, *other)
    }

    fn le(&self, other: &R) -> bool {
        self.compare(CmpOp::Le, *other)
    }

    fn gt(&self, other: &R) -> bool {
        self.compare(CmpOp::Gt, *other)
    }

    fn ge(&self, other: &R) -> bool {
        self.compare(CmpOp::Ge, *other)
    }
}
