//! 2D vector math shared by geometry, motion and animation code.
//!
//! [`Vector2`] is a plain `f64` value type. Binary operators pick their
//! meaning from the operand shape:
//! - scalar: scaling (`v * 2.0`, `v / 2.0`)
//! - plain pair: linear algebra (`v * w` is the dot product)
//! - [`Elementwise`] view: lane by lane (`v * w.elementwise()`)
//!
//! [`Operand`] carries the same distinction at runtime for the `try_*` API.

mod elementwise;
mod operand;
mod ops;
mod vector2;

pub use elementwise::Elementwise;
pub use operand::{CmpOp, Operand, Product, EQ_TOLERANCE};
pub use vector2::Vector2;
