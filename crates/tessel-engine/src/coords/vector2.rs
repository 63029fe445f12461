use core::fmt;
use core::ops::{Bound, Index, IndexMut, RangeBounds};
use core::str::FromStr;
use std::f64::consts::{PI, TAU};

use bytemuck::{Pod, Zeroable};

use crate::error::{VectorError, VectorResult};

use super::operand::{approx_eq, lane_ordering, CmpOp, EQ_TOLERANCE};
use super::Elementwise;

/// 2D vector with `f64` components and value semantics.
///
/// Methods ending in `_ip` mutate the receiver; every other geometric method
/// returns a new vector and leaves the receiver untouched. Fallible methods
/// validate before writing, so an `Err` never leaves a half-updated vector.
///
/// Equality is componentwise within [`EQ_TOLERANCE`]. Plain vectors are not
/// ordered; ordering is only available against an [`Elementwise`] view.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, Pod, Zeroable)]
pub struct Vector2 {
    pub x: f64,
    pub y: f64,
}

impl Vector2 {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub const fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    /// Vector from polar coordinates, `phi` in degrees.
    ///
    /// Components are rounded to 6 decimals, like [`Vector2::from_polar`].
    pub fn polar(r: f64, phi: f64) -> Self {
        let mut v = Self::zero();
        v.from_polar((r, phi));
        v
    }

    #[inline]
    pub fn copy(&self) -> Self {
        *self
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// True if at least one component is nonzero.
    #[inline]
    pub fn is_nonzero(self) -> bool {
        self.x != 0.0 || self.y != 0.0
    }

    /// Always 2.
    #[inline]
    #[allow(clippy::len_without_is_empty)]
    pub const fn len(&self) -> usize {
        2
    }

    /// Yields `x` then `y`. Each call starts a fresh pass.
    #[inline]
    pub fn iter(&self) -> core::array::IntoIter<f64, 2> {
        [self.x, self.y].into_iter()
    }

    #[inline]
    pub fn as_array(&self) -> &[f64; 2] {
        bytemuck::cast_ref(self)
    }

    #[inline]
    pub fn as_array_mut(&mut self) -> &mut [f64; 2] {
        bytemuck::cast_mut(self)
    }

    // ── update ────────────────────────────────────────────────────────────

    pub fn update(&mut self, v: impl Into<Vector2>) {
        *self = v.into();
    }

    pub fn update_xy(&mut self, x: f64, y: f64) {
        self.x = x;
        self.y = y;
    }

    /// Updates from a runtime-sized sequence; anything but two values fails.
    pub fn try_update(&mut self, values: &[f64]) -> VectorResult<()> {
        *self = Vector2::try_from(values)?;
        Ok(())
    }

    /// Resets both components to zero.
    pub fn reset(&mut self) {
        *self = Self::zero();
    }

    // ── indexing ──────────────────────────────────────────────────────────

    /// Component at `index`; `-2` and `-1` alias `0` and `1`.
    pub fn get(&self, index: isize) -> VectorResult<f64> {
        match component_slot(index) {
            Some(slot) => Ok(self.as_array()[slot]),
            None => Err(out_of_range(index)),
        }
    }

    pub fn set(&mut self, index: isize, value: f64) -> VectorResult<()> {
        match component_slot(index) {
            Some(slot) => {
                self.as_array_mut()[slot] = value;
                Ok(())
            }
            None => Err(out_of_range(index)),
        }
    }

    /// Components in `range`, clamped to the vector's bounds.
    pub fn slice<R: RangeBounds<usize>>(&self, range: R) -> &[f64] {
        let (start, end) = clamp_range(&range);
        &self.as_array()[start..end]
    }

    /// Replaces the components in `range` with `values`.
    ///
    /// The result must still hold exactly two components; otherwise the
    /// vector is left unchanged and an index error is returned.
    pub fn splice<R: RangeBounds<usize>>(&mut self, range: R, values: &[f64]) -> VectorResult<()> {
        let (start, end) = clamp_range(&range);
        let mut parts = self.as_array().to_vec();
        parts.splice(start..end, values.iter().copied());

        let [x, y]: [f64; 2] = parts.try_into().map_err(|parts: Vec<f64>| {
            VectorError::index(format!(
                "slice assignment would leave {} components, expected 2",
                parts.len()
            ))
        })?;

        self.update_xy(x, y);
        Ok(())
    }

    // ── products & magnitudes ─────────────────────────────────────────────

    #[inline]
    pub fn dot(self, other: impl Into<Vector2>) -> f64 {
        let o = other.into();
        (self.x * o.x) + (self.y * o.y)
    }

    /// 2D cross product (z component of the 3D cross product).
    #[inline]
    pub fn cross(self, other: impl Into<Vector2>) -> f64 {
        let o = other.into();
        (self.x * o.y) - (self.y * o.x)
    }

    #[inline]
    pub fn magnitude(self) -> f64 {
        self.magnitude_squared().sqrt()
    }

    #[inline]
    pub fn magnitude_squared(self) -> f64 {
        (self.x * self.x) + (self.y * self.y)
    }

    #[inline]
    pub fn length(self) -> f64 {
        self.magnitude()
    }

    #[inline]
    pub fn length_squared(self) -> f64 {
        self.magnitude_squared()
    }

    pub fn distance_to(self, other: impl Into<Vector2>) -> f64 {
        self.distance_squared_to(other).sqrt()
    }

    pub fn distance_squared_to(self, other: impl Into<Vector2>) -> f64 {
        let o = other.into();
        let dx = self.x - o.x;
        let dy = self.y - o.y;
        (dx * dx) + (dy * dy)
    }

    // ── normalization & scaling ───────────────────────────────────────────

    pub fn normalize(self) -> VectorResult<Self> {
        let mag = self.magnitude();
        if mag == 0.0 {
            return Err(VectorError::domain("cannot normalize vector of zero length"));
        }
        Ok(Self::new(self.x / mag, self.y / mag))
    }

    pub fn normalize_ip(&mut self) -> VectorResult<()> {
        *self = self.normalize()?;
        Ok(())
    }

    /// Exact comparison of the magnitude against `1.0`.
    ///
    /// Unlike `==` there is no tolerance: `Vector2::new(1.0000001, 0.0)` is
    /// equal to the unit x vector but is not normalized.
    #[allow(clippy::float_cmp)]
    pub fn is_normalized(self) -> bool {
        self.magnitude() == 1.0
    }

    /// Rescales in place so that the magnitude becomes `length`.
    pub fn scale_to_length(&mut self, length: f64) -> VectorResult<()> {
        let mag = self.magnitude();
        if mag == 0.0 {
            return Err(VectorError::domain("cannot scale vector of zero length"));
        }
        self.x = (self.x / mag) * length;
        self.y = (self.y / mag) * length;
        Ok(())
    }

    // ── reflection ────────────────────────────────────────────────────────

    /// Reflects across the line with the given normal: `s - 2(s·n / n·n)n`.
    ///
    /// The normal does not need to be unit length.
    pub fn reflect(self, normal: impl Into<Vector2>) -> VectorResult<Self> {
        let n = normal.into();
        let nn = n.magnitude_squared();
        if nn == 0.0 {
            return Err(VectorError::domain("cannot reflect from normal of zero length"));
        }
        let c = 2.0 * self.dot(n) / nn;
        Ok(Self::new(self.x - (n.x * c), self.y - (n.y * c)))
    }

    pub fn reflect_ip(&mut self, normal: impl Into<Vector2>) -> VectorResult<()> {
        *self = self.reflect(normal)?;
        Ok(())
    }

    // ── interpolation ─────────────────────────────────────────────────────

    /// Linear interpolation, `t` in `[0, 1]`.
    pub fn lerp(self, other: impl Into<Vector2>, t: f64) -> VectorResult<Self> {
        if !(0.0..=1.0).contains(&t) {
            return Err(VectorError::domain(format!("lerp parameter t must be in [0, 1], got {t}")));
        }
        let o = other.into();
        Ok(Self::new(
            (self.x * (1.0 - t)) + (o.x * t),
            (self.y * (1.0 - t)) + (o.y * t),
        ))
    }

    /// Spherical interpolation, `t` in `[-1, 1]`.
    ///
    /// The direction is interpolated by angle, the magnitude linearly. A
    /// negative `t` interpolates the long way around the circle.
    pub fn slerp(self, other: impl Into<Vector2>, t: f64) -> VectorResult<Self> {
        if !(-1.0..=1.0).contains(&t) {
            return Err(VectorError::domain(format!("slerp parameter t must be in [-1, 1], got {t}")));
        }

        let other = other.into();
        let s_mag = self.magnitude();
        let o_mag = other.magnitude();
        if s_mag == 0.0 || o_mag == 0.0 {
            return Err(VectorError::domain("cannot slerp with a zero-length vector"));
        }

        let (sx, sy) = (self.x / s_mag, self.y / s_mag);
        let (ox, oy) = (other.x / o_mag, other.y / o_mag);

        // Fold the angle difference into (-pi, pi].
        let mut theta = oy.atan2(ox) - sy.atan2(sx);
        let abs_theta = theta.abs();
        if abs_theta - PI > EQ_TOLERANCE {
            theta -= TAU * theta.signum();
        } else if (abs_theta - PI).abs() < EQ_TOLERANCE {
            return Err(VectorError::domain("cannot slerp between vectors 180 degrees apart"));
        }

        let mut t = t;
        if t < 0.0 {
            t = -t;
            if theta != 0.0 {
                theta -= TAU * theta.signum();
            }
        }

        let sin_theta = theta.sin();
        let (a, b) = if sin_theta.abs() > f64::EPSILON {
            (((1.0 - t) * theta).sin() / sin_theta, (t * theta).sin() / sin_theta)
        } else {
            (1.0, 0.0)
        };

        let mag = ((1.0 - t) * s_mag) + (t * o_mag);
        Ok(Self::new(
            ((sx * a) + (ox * b)) * mag,
            ((sy * a) + (oy * b)) * mag,
        ))
    }

    // ── rotation ──────────────────────────────────────────────────────────

    /// Rotates by `angle` degrees.
    ///
    /// Cosine and sine are rounded to 6 decimals first, so quarter turns land
    /// on exact axis values.
    pub fn rotate(self, angle: f64) -> Self {
        let rad = angle / 180.0 * PI;
        self.rotated_by(round6(rad.cos()), round6(rad.sin()))
    }

    pub fn rotate_rad(self, angle: f64) -> Self {
        self.rotated_by(angle.cos(), angle.sin())
    }

    pub fn rotate_ip(&mut self, angle: f64) {
        *self = self.rotate(angle);
    }

    pub fn rotate_ip_rad(&mut self, angle: f64) {
        *self = self.rotate_rad(angle);
    }

    #[inline]
    fn rotated_by(self, c: f64, s: f64) -> Self {
        Self::new((c * self.x) - (s * self.y), (s * self.x) + (c * self.y))
    }

    /// Signed angle in degrees from `self` to `other`.
    pub fn angle_to(self, other: impl Into<Vector2>) -> f64 {
        let o = other.into();
        (o.y.atan2(o.x) - self.y.atan2(self.x)) * (180.0 / PI)
    }

    // ── polar ─────────────────────────────────────────────────────────────

    /// `(radius, azimuth in degrees)`.
    pub fn as_polar(self) -> (f64, f64) {
        (self.magnitude(), self.y.atan2(self.x) * (180.0 / PI))
    }

    /// Sets the vector from `(radius, azimuth in degrees)`.
    #[allow(clippy::wrong_self_convention)]
    pub fn from_polar(&mut self, (r, phi): (f64, f64)) {
        let phi = phi * (PI / 180.0);
        self.x = round6(r * phi.cos());
        self.y = round6(r * phi.sin());
    }

    /// Like [`Vector2::from_polar`] for a runtime-sized coordinate.
    pub fn try_from_polar(&mut self, coordinate: &[f64]) -> VectorResult<()> {
        match *coordinate {
            [r, phi] => {
                self.from_polar((r, phi));
                Ok(())
            }
            _ => Err(VectorError::type_conversion(format!(
                "polar coordinate must have 2 elements, got {}",
                coordinate.len()
            ))),
        }
    }

    /// Componentwise operator view of this vector.
    #[inline]
    pub fn elementwise(&self) -> Elementwise<'_> {
        Elementwise::new(self)
    }
}

/// Magnitude from which rounding to 6 decimals cannot change an `f64`.
const ROUND6_LIMIT: f64 = 4_503_599_627.370_496;

/// Rounds to 6 decimal places.
///
/// Values at or above [`ROUND6_LIMIT`] are returned as is, so scaling by 1e6
/// cannot overflow a finite input.
#[inline]
pub(crate) fn round6(v: f64) -> f64 {
    if v.abs() >= ROUND6_LIMIT {
        return v;
    }
    (v * 1e6).round() / 1e6
}

#[inline]
fn component_slot(index: isize) -> Option<usize> {
    match index {
        0 | -2 => Some(0),
        1 | -1 => Some(1),
        _ => None,
    }
}

fn out_of_range(index: isize) -> VectorError {
    VectorError::index(format!("index {index} out of range for a 2-component vector"))
}

fn clamp_range<R: RangeBounds<usize>>(range: &R) -> (usize, usize) {
    let start = match range.start_bound() {
        Bound::Included(&s) => s,
        Bound::Excluded(&s) => s.saturating_add(1),
        Bound::Unbounded => 0,
    }
    .min(2);
    let end = match range.end_bound() {
        Bound::Included(&e) => e.saturating_add(1),
        Bound::Excluded(&e) => e,
        Bound::Unbounded => 2,
    }
    .clamp(start, 2);
    (start, end)
}

impl Index<isize> for Vector2 {
    type Output = f64;

    fn index(&self, index: isize) -> &f64 {
        match component_slot(index) {
            Some(slot) => &self.as_array()[slot],
            None => panic!("index {index} out of range for a 2-component vector"),
        }
    }
}

impl IndexMut<isize> for Vector2 {
    fn index_mut(&mut self, index: isize) -> &mut f64 {
        match component_slot(index) {
            Some(slot) => &mut self.as_array_mut()[slot],
            None => panic!("index {index} out of range for a 2-component vector"),
        }
    }
}

impl IntoIterator for Vector2 {
    type Item = f64;
    type IntoIter = core::array::IntoIter<f64, 2>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for &Vector2 {
    type Item = f64;
    type IntoIter = core::array::IntoIter<f64, 2>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// ── conversions ───────────────────────────────────────────────────────────

macro_rules! impl_numeric_vector {
    ($($t:ty),* $(,)?) => {$(
        impl From<[$t; 2]> for Vector2 {
            #[inline]
            fn from([x, y]: [$t; 2]) -> Self {
                Vector2::new(f64::from(x), f64::from(y))
            }
        }

        impl From<($t, $t)> for Vector2 {
            #[inline]
            fn from((x, y): ($t, $t)) -> Self {
                Vector2::new(f64::from(x), f64::from(y))
            }
        }
    )*};
}

impl_numeric_vector!(f64, f32, i32, u32, i16, u16, i8, u8);

impl From<&Vector2> for Vector2 {
    #[inline]
    fn from(v: &Vector2) -> Self {
        *v
    }
}

impl From<Elementwise<'_>> for Vector2 {
    #[inline]
    fn from(view: Elementwise<'_>) -> Self {
        *view.vector()
    }
}

impl From<Vector2> for [f64; 2] {
    #[inline]
    fn from(v: Vector2) -> Self {
        [v.x, v.y]
    }
}

impl From<Vector2> for (f64, f64) {
    #[inline]
    fn from(v: Vector2) -> Self {
        (v.x, v.y)
    }
}

impl TryFrom<&[f64]> for Vector2 {
    type Error = VectorError;

    fn try_from(values: &[f64]) -> VectorResult<Self> {
        match *values {
            [x, y] => Ok(Vector2::new(x, y)),
            _ => Err(VectorError::type_conversion(format!(
                "expected a 2-element sequence, got {} elements",
                values.len()
            ))),
        }
    }
}

impl TryFrom<Vec<f64>> for Vector2 {
    type Error = VectorError;

    fn try_from(values: Vec<f64>) -> VectorResult<Self> {
        Vector2::try_from(values.as_slice())
    }
}

/// Accepts `[x, y]`, `(x, y)` or `x, y`.
impl FromStr for Vector2 {
    type Err = VectorError;

    fn from_str(s: &str) -> VectorResult<Self> {
        let trimmed = s.trim();
        let inner = trimmed
            .strip_prefix('[')
            .and_then(|r| r.strip_suffix(']'))
            .or_else(|| trimmed.strip_prefix('(').and_then(|r| r.strip_suffix(')')))
            .unwrap_or(trimmed);

        let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
        let [x, y] = *parts.as_slice() else {
            return Err(VectorError::type_conversion(format!(
                "cannot read a vector from {s:?}: expected 2 components"
            )));
        };

        let parse = |part: &str| {
            part.parse::<f64>().map_err(|_| {
                VectorError::type_conversion(format!("cannot convert {part:?} to a number"))
            })
        };
        Ok(Vector2::new(parse(x)?, parse(y)?))
    }
}

impl fmt::Display for Vector2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.x, self.y)
    }
}

// ── equality & ordering ───────────────────────────────────────────────────

impl PartialEq for Vector2 {
    #[inline]
    fn eq(&self, other: &Vector2) -> bool {
        approx_eq(*self.as_array(), *other.as_array())
    }
}

impl PartialEq<[f64; 2]> for Vector2 {
    #[inline]
    fn eq(&self, other: &[f64; 2]) -> bool {
        approx_eq(*self.as_array(), *other)
    }
}

impl PartialEq<(f64, f64)> for Vector2 {
    #[inline]
    fn eq(&self, other: &(f64, f64)) -> bool {
        approx_eq(*self.as_array(), [other.0, other.1])
    }
}

impl PartialEq<Elementwise<'_>> for Vector2 {
    #[inline]
    fn eq(&self, other: &Elementwise<'_>) -> bool {
        approx_eq(*self.as_array(), other.components())
    }
}

/// Componentwise ordering; a relation holds only if it holds for both lanes.
///
/// `partial_cmp` returns `None` whenever the lanes disagree, so `a <= b` can
/// hold while `partial_cmp` gives `None`. The overridden `lt`, `le`, `gt` and
/// `ge` are authoritative.
impl PartialOrd<Elementwise<'_>> for Vector2 {
    fn partial_cmp(&self, other: &Elementwise<'_>) -> Option<core::cmp::Ordering> {
        lane_ordering(*self.as_array(), other.components())
    }

    fn lt(&self, other: &Elementwise<'_>) -> bool {
        CmpOp::Lt.holds(*self.as_array(), other.components())
    }

    fn le(&self, other: &Elementwise<'_>) -> bool {
        CmpOp::Le.holds(*self.as_array(), other.components())
    }

    fn gt(&self, other: &Elementwise<'_>) -> bool {
        CmpOp::Gt.holds(*self.as_array(), other.components())
    }

    fn ge(&self, other: &Elementwise<'_>) -> bool {
        CmpOp::Ge.holds(*self.as_array(), other.components())
    }
}
