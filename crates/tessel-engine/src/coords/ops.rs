//! Operator surface of [`Vector2`].
//!
//! Two layers:
//! - `std::ops` impls for the operand shapes the type system can tell apart
//!   (scalar, plain pair, elementwise view). Shapes without a meaning, such as
//!   `Vector2 + f64` or `Vector2 / Vector2`, simply have no impl.
//! - `try_*` methods taking an [`Operand`], for callers that only know the
//!   operand shape at runtime. These return `VectorError::TypeConversion` for
//!   the same combinations the static layer leaves out.

use core::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Rem, Sub, SubAssign};

use crate::error::{VectorError, VectorResult};

use super::operand::{floor_div, floor_mod, CmpOp, Operand, Product};
use super::{Elementwise, Vector2};

impl Vector2 {
    #[inline]
    fn map2(self, [a, b]: [f64; 2], f: impl Fn(f64, f64) -> f64) -> Vector2 {
        Vector2::new(f(self.x, a), f(self.y, b))
    }

    // ── dynamic dispatch ──────────────────────────────────────────────────

    /// `self + rhs`; defined for pairs and views, not scalars.
    pub fn try_add(self, rhs: impl Into<Operand>) -> VectorResult<Vector2> {
        let c = sequence_operand(rhs.into(), "+")?;
        Ok(self.map2(c, |a, b| a + b))
    }

    /// `self - rhs`; defined for pairs and views, not scalars.
    pub fn try_sub(self, rhs: impl Into<Operand>) -> VectorResult<Vector2> {
        let c = sequence_operand(rhs.into(), "-")?;
        Ok(self.map2(c, |a, b| a - b))
    }

    /// `lhs - self`.
    pub fn try_rsub(self, lhs: impl Into<Operand>) -> VectorResult<Vector2> {
        let c = sequence_operand(lhs.into(), "-")?;
        Ok(self.map2(c, |a, b| b - a))
    }

    /// `self * rhs`: dot product with a plain pair, scaling by a scalar,
    /// componentwise product with a view.
    pub fn mul_operand(self, rhs: impl Into<Operand>) -> Product {
        match rhs.into() {
            Operand::Scalar(s) => Product::Vector(self * s),
            Operand::Pair(c) => Product::Scalar(self.dot(c)),
            Operand::Elementwise(c) => Product::Vector(self.map2(c, |a, b| a * b)),
        }
    }

    /// `self / rhs`; dividing by a plain pair is undefined.
    pub fn try_div(self, rhs: impl Into<Operand>) -> VectorResult<Vector2> {
        let c = divisor_operand(rhs.into(), "/")?;
        Ok(self.map2(c, |a, b| a / b))
    }

    /// Floor division `self // rhs`; dividing by a plain pair is undefined.
    pub fn try_floor_div(self, rhs: impl Into<Operand>) -> VectorResult<Vector2> {
        let c = divisor_operand(rhs.into(), "//")?;
        Ok(self.map2(c, floor_div))
    }

    /// `lhs / self`; only a view can divide by a vector.
    pub fn try_rdiv(self, lhs: impl Into<Operand>) -> VectorResult<Vector2> {
        let c = view_operand(lhs.into(), "/")?;
        Ok(self.map2(c, |a, b| b / a))
    }

    /// `lhs // self`; only a view can divide by a vector.
    pub fn try_rfloor_div(self, lhs: impl Into<Operand>) -> VectorResult<Vector2> {
        let c = view_operand(lhs.into(), "//")?;
        Ok(self.map2(c, |a, b| floor_div(b, a)))
    }

    pub fn try_add_assign(&mut self, rhs: impl Into<Operand>) -> VectorResult<&mut Self> {
        *self = self.try_add(rhs)?;
        Ok(self)
    }

    pub fn try_sub_assign(&mut self, rhs: impl Into<Operand>) -> VectorResult<&mut Self> {
        *self = self.try_sub(rhs)?;
        Ok(self)
    }

    /// `self *= rhs`. A plain pair would turn the receiver into a dot product,
    /// so it is rejected.
    pub fn try_mul_assign(&mut self, rhs: impl Into<Operand>) -> VectorResult<&mut Self> {
        match self.mul_operand(rhs) {
            Product::Vector(v) => {
                *self = v;
                Ok(self)
            }
            Product::Scalar(_) => Err(VectorError::type_conversion(
                "unsupported operand for *=: use elementwise() for a componentwise product",
            )),
        }
    }

    pub fn try_div_assign(&mut self, rhs: impl Into<Operand>) -> VectorResult<&mut Self> {
        *self = self.try_div(rhs)?;
        Ok(self)
    }

    pub fn try_floor_div_assign(&mut self, rhs: impl Into<Operand>) -> VectorResult<&mut Self> {
        *self = self.try_floor_div(rhs)?;
        Ok(self)
    }

    /// Runtime comparison.
    ///
    /// `Eq`/`Ne` accept any operand (a scalar is never equal). Orderings are
    /// only defined against an elementwise view and hold when they hold for
    /// both components.
    pub fn try_cmp(self, op: CmpOp, rhs: impl Into<Operand>) -> VectorResult<bool> {
        let rhs = rhs.into();
        if !op.is_ordering() {
            let equal = rhs.components().is_some_and(|c| CmpOp::Eq.holds(*self.as_array(), c));
            return Ok(equal == (op == CmpOp::Eq));
        }
        match rhs {
            Operand::Elementwise(c) => Ok(op.holds(*self.as_array(), c)),
            _ => Err(VectorError::type_conversion(format!(
                "ordering {op:?} is not defined between vectors; compare against elementwise()"
            ))),
        }
    }

    // ── floor division ────────────────────────────────────────────────────

    pub fn floor_div(self, rhs: f64) -> Vector2 {
        self.map2([rhs, rhs], floor_div)
    }

    pub fn floor_div_ip(&mut self, rhs: f64) {
        *self = self.floor_div(rhs);
    }
}

fn sequence_operand(op: Operand, symbol: &str) -> VectorResult<[f64; 2]> {
    op.components().ok_or_else(|| {
        VectorError::type_conversion(format!("unsupported operand for {symbol}: expected a 2-element sequence, got a scalar"))
    })
}

fn divisor_operand(op: Operand, symbol: &str) -> VectorResult<[f64; 2]> {
    match op {
        Operand::Scalar(s) => Ok([s, s]),
        Operand::Elementwise(c) => Ok(c),
        Operand::Pair(_) => Err(VectorError::type_conversion(format!(
            "unsupported operand for {symbol}: cannot divide by a vector; use elementwise()"
        ))),
    }
}

fn view_operand(op: Operand, symbol: &str) -> VectorResult<[f64; 2]> {
    match op {
        Operand::Elementwise(c) => Ok(c),
        _ => Err(VectorError::type_conversion(format!(
            "unsupported operand for {symbol}: only an elementwise view can divide by a vector"
        ))),
    }
}

// ── unary ─────────────────────────────────────────────────────────────────

impl Neg for Vector2 {
    type Output = Vector2;
    #[inline]
    fn neg(self) -> Vector2 {
        Vector2::new(-self.x, -self.y)
    }
}

// ── addition & subtraction ────────────────────────────────────────────────

macro_rules! impl_sequence_add_sub {
    ($($rhs:ty),* $(,)?) => {$(
        impl Add<$rhs> for Vector2 {
            type Output = Vector2;
            #[inline]
            fn add(self, rhs: $rhs) -> Vector2 {
                self.map2(Operand::from(rhs).broadcast(), |a, b| a + b)
            }
        }

        impl Sub<$rhs> for Vector2 {
            type Output = Vector2;
            #[inline]
            fn sub(self, rhs: $rhs) -> Vector2 {
                self.map2(Operand::from(rhs).broadcast(), |a, b| a - b)
            }
        }

        impl AddAssign<$rhs> for Vector2 {
            #[inline]
            fn add_assign(&mut self, rhs: $rhs) {
                *self = *self + rhs;
            }
        }

        impl SubAssign<$rhs> for Vector2 {
            #[inline]
            fn sub_assign(&mut self, rhs: $rhs) {
                *self = *self - rhs;
            }
        }
    )*};
}

impl_sequence_add_sub!(Vector2, [f64; 2], (f64, f64), Elementwise<'_>);

macro_rules! impl_reflected_add_sub {
    ($($lhs:ty),* $(,)?) => {$(
        impl Add<Vector2> for $lhs {
            type Output = Vector2;
            #[inline]
            fn add(self, rhs: Vector2) -> Vector2 {
                rhs + self
            }
        }

        impl Sub<Vector2> for $lhs {
            type Output = Vector2;
            #[inline]
            fn sub(self, rhs: Vector2) -> Vector2 {
                rhs.map2(Operand::from(self).broadcast(), |a, b| b - a)
            }
        }

        /// Plain sequences multiply to a dot product.
        impl Mul<Vector2> for $lhs {
            type Output = f64;
            #[inline]
            fn mul(self, rhs: Vector2) -> f64 {
                rhs.dot(self)
            }
        }
    )*};
}

impl_reflected_add_sub!([f64; 2], (f64, f64));

// ── multiplication ────────────────────────────────────────────────────────

impl Mul<f64> for Vector2 {
    type Output = Vector2;
    #[inline]
    fn mul(self, rhs: f64) -> Vector2 {
        Vector2::new(self.x * rhs, self.y * rhs)
    }
}

impl Mul<Vector2> for f64 {
    type Output = Vector2;
    #[inline]
    fn mul(self, rhs: Vector2) -> Vector2 {
        rhs * self
    }
}

/// Dot product.
impl Mul for Vector2 {
    type Output = f64;
    #[inline]
    fn mul(self, rhs: Vector2) -> f64 {
        self.dot(rhs)
    }
}

impl Mul<[f64; 2]> for Vector2 {
    type Output = f64;
    #[inline]
    fn mul(self, rhs: [f64; 2]) -> f64 {
        self.dot(rhs)
    }
}

impl Mul<(f64, f64)> for Vector2 {
    type Output = f64;
    #[inline]
    fn mul(self, rhs: (f64, f64)) -> f64 {
        self.dot(rhs)
    }
}

/// Componentwise product.
impl Mul<Elementwise<'_>> for Vector2 {
    type Output = Vector2;
    #[inline]
    fn mul(self, rhs: Elementwise<'_>) -> Vector2 {
        self.map2(rhs.components(), |a, b| a * b)
    }
}

impl MulAssign<f64> for Vector2 {
    #[inline]
    fn mul_assign(&mut self, rhs: f64) {
        *self = *self * rhs;
    }
}

impl MulAssign<Elementwise<'_>> for Vector2 {
    #[inline]
    fn mul_assign(&mut self, rhs: Elementwise<'_>) {
        *self = *self * rhs;
    }
}

// ── division & remainder ──────────────────────────────────────────────────

impl Div<f64> for Vector2 {
    type Output = Vector2;
    #[inline]
    fn div(self, rhs: f64) -> Vector2 {
        Vector2::new(self.x / rhs, self.y / rhs)
    }
}

impl Div<Elementwise<'_>> for Vector2 {
    type Output = Vector2;
    #[inline]
    fn div(self, rhs: Elementwise<'_>) -> Vector2 {
        self.map2(rhs.components(), |a, b| a / b)
    }
}

impl DivAssign<f64> for Vector2 {
    #[inline]
    fn div_assign(&mut self, rhs: f64) {
        *self = *self / rhs;
    }
}

impl DivAssign<Elementwise<'_>> for Vector2 {
    #[inline]
    fn div_assign(&mut self, rhs: Elementwise<'_>) {
        *self = *self / rhs;
    }
}

/// Floored modulo by a view.
impl Rem<Elementwise<'_>> for Vector2 {
    type Output = Vector2;
    #[inline]
    fn rem(self, rhs: Elementwise<'_>) -> Vector2 {
        self.map2(rhs.components(), floor_mod)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(x: f64, y: f64) -> Vector2 {
        Vector2::new(x, y)
    }

    // ── static operators ──────────────────────────────────────────────────

    #[test]
    fn unary_minus() {
        assert_eq!(-v(1.0, -2.0), v(-1.0, 2.0));
    }

    #[test]
    fn add_sub_with_sequences() {
        let a = v(1.0, 2.0);
        assert_eq!(a + v(3.0, 4.0), v(4.0, 6.0));
        assert_eq!(a - [1.0, 1.0], v(0.0, 1.0));
        assert_eq!(a + (0.5, 0.5), v(1.5, 2.5));
        assert_eq!([10.0, 10.0] - a, v(9.0, 8.0));
        assert_eq!((1.0, 1.0) + a, v(2.0, 3.0));
    }

    #[test]
    fn plain_product_is_dot_view_product_is_componentwise() {
        let a = v(2.0, 3.0);
        let b = v(4.0, 5.0);
        assert_eq!(a * b, 23.0);
        assert_eq!(a * b.elementwise(), v(8.0, 15.0));
        assert_eq!([4.0, 5.0] * a, 23.0);
        assert_eq!(a * 2.0, v(4.0, 6.0));
        assert_eq!(2.0 * a, v(4.0, 6.0));
    }

    #[test]
    fn division_by_scalar_and_view() {
        let a = v(8.0, 15.0);
        let b = v(4.0, 5.0);
        assert_eq!(a / 2.0, v(4.0, 7.5));
        assert_eq!(a / b.elementwise(), v(2.0, 3.0));
        assert_eq!(v(7.0, -7.0).floor_div(2.0), v(3.0, -4.0));
        assert_eq!(v(7.0, -7.0) % v(3.0, 3.0).elementwise(), v(1.0, 2.0));
    }

    #[test]
    fn compound_assignment() {
        let mut a = v(1.0, 2.0);
        a += v(1.0, 1.0);
        assert_eq!(a, v(2.0, 3.0));
        a -= [0.5, 0.5];
        assert_eq!(a, v(1.5, 2.5));
        a *= 2.0;
        assert_eq!(a, v(3.0, 5.0));
        let scale = v(2.0, 10.0);
        a *= scale.elementwise();
        assert_eq!(a, v(6.0, 50.0));
        a /= scale.elementwise();
        assert_eq!(a, v(3.0, 5.0));
        a /= 2.0;
        assert_eq!(a, v(1.5, 2.5));
        a.floor_div_ip(1.0);
        assert_eq!(a, v(1.0, 2.0));
    }

    #[test]
    fn ordering_against_view() {
        assert!(v(1.0, 1.0) < v(2.0, 2.0).elementwise());
        assert!(!(v(1.0, 3.0) < v(2.0, 2.0).elementwise()));
        assert!(!(v(1.0, 3.0) > v(2.0, 2.0).elementwise()));
        assert!(v(2.0, 2.0) <= v(2.0, 3.0).elementwise());
        assert!(v(3.0, 3.0) >= v(2.0, 3.0).elementwise());
        assert!(v(1.0, 2.0) == v(1.0, 2.0).elementwise());
    }

    // ── dynamic dispatch ──────────────────────────────────────────────────

    #[test]
    fn try_add_rejects_scalars() {
        let a = v(1.0, 2.0);
        assert_eq!(a.try_add((1, 1)).unwrap(), v(2.0, 3.0));
        assert_eq!(a.try_sub(v(1.0, 1.0).elementwise()).unwrap(), v(0.0, 1.0));
        assert_eq!(a.try_rsub([5, 5]).unwrap(), v(4.0, 3.0));
        assert!(matches!(a.try_add(1.0), Err(VectorError::TypeConversion(_))));
        assert!(matches!(a.try_sub(1), Err(VectorError::TypeConversion(_))));
        assert!(matches!(a.try_rsub(1), Err(VectorError::TypeConversion(_))));
    }

    #[test]
    fn mul_operand_dispatches_on_tag() {
        let a = v(2.0, 3.0);
        let b = v(4.0, 5.0);
        assert_eq!(a.mul_operand(b), Product::Scalar(23.0));
        assert_eq!(a.mul_operand(b).scalar(), Some(23.0));
        assert_eq!(a.mul_operand(b).vector(), None);
        assert_eq!(a.mul_operand(b.elementwise()).scalar(), None);
        assert_eq!(a.mul_operand(b.elementwise()).vector(), Some(v(8.0, 15.0)));
        assert_eq!(a.mul_operand(3).vector(), Some(v(6.0, 9.0)));
    }

    #[test]
    fn try_div_rejects_plain_pairs() {
        let a = v(8.0, 15.0);
        let b = v(4.0, 5.0);
        assert!(matches!(a.try_div(b), Err(VectorError::TypeConversion(_))));
        assert!(matches!(a.try_floor_div((1, 1)), Err(VectorError::TypeConversion(_))));
        assert_eq!(a.try_div(b.elementwise()).unwrap(), v(2.0, 3.0));
        assert_eq!(a.try_div(2).unwrap(), v(4.0, 7.5));
        assert_eq!(a.try_floor_div(2).unwrap(), v(4.0, 7.0));
        assert_eq!(a.try_floor_div(b.elementwise()).unwrap(), v(2.0, 3.0));
    }

    #[test]
    fn reflected_division_needs_a_view() {
        let a = v(2.0, 4.0);
        let b = v(9.0, 9.0);
        assert!(matches!(a.try_rdiv(2.0), Err(VectorError::TypeConversion(_))));
        assert!(matches!(a.try_rdiv(b), Err(VectorError::TypeConversion(_))));
        assert_eq!(a.try_rdiv(b.elementwise()).unwrap(), v(4.5, 2.25));
        assert_eq!(a.try_rfloor_div(b.elementwise()).unwrap(), v(4.0, 2.0));
    }

    #[test]
    fn in_place_dispatch_returns_receiver() {
        let mut a = v(1.0, 2.0);
        a.try_add_assign((1, 1)).unwrap().try_mul_assign(2).unwrap();
        assert_eq!(a, v(4.0, 6.0));
        a.try_sub_assign([1, 1]).unwrap();
        assert_eq!(a, v(3.0, 5.0));
        a.try_div_assign(2).unwrap();
        assert_eq!(a, v(1.5, 2.5));
        a.try_floor_div_assign(1).unwrap();
        assert_eq!(a, v(1.0, 2.0));
    }

    #[test]
    fn failed_in_place_dispatch_leaves_receiver() {
        let mut a = v(1.0, 2.0);
        assert!(a.try_add_assign(1.0).is_err());
        assert!(a.try_mul_assign(v(3.0, 3.0)).is_err());
        assert!(a.try_div_assign((2, 2)).is_err());
        assert!(a.try_floor_div_assign(v(1.0, 1.0)).is_err());
        assert_eq!(a, v(1.0, 2.0));
    }

    #[test]
    fn try_cmp_equality_accepts_anything() {
        let a = v(1.0, 2.0);
        assert!(a.try_cmp(CmpOp::Eq, (1.0000001, 2.0)).unwrap());
        assert!(!a.try_cmp(CmpOp::Eq, 1.0).unwrap());
        assert!(a.try_cmp(CmpOp::Ne, 1.0).unwrap());
        assert!(a.try_cmp(CmpOp::Ne, (1.01, 2.0)).unwrap());
    }

    #[test]
    fn try_cmp_ordering_requires_view() {
        let a = v(1.0, 1.0);
        let b = v(2.0, 2.0);
        assert!(matches!(a.try_cmp(CmpOp::Lt, b), Err(VectorError::TypeConversion(_))));
        assert!(matches!(a.try_cmp(CmpOp::Ge, 5.0), Err(VectorError::TypeConversion(_))));
        assert!(a.try_cmp(CmpOp::Lt, b.elementwise()).unwrap());
        assert!(!a.try_cmp(CmpOp::Gt, b.elementwise()).unwrap());
        assert!(a.try_cmp(CmpOp::Le, a.elementwise()).unwrap());
    }
}
