//! Integer shrink policy: halve the distance to a target.

use num_traits::{Euclid, PrimInt};

use crate::tree::Shrink;
use std::rc::Rc;

/// Shrink policy for integers drawn from `[low, high]`.
///
/// The target is `0` when the range contains it, otherwise the bound
/// closest to zero (`low` for all-positive ranges, `high` for all-negative
/// ones). A value shrinks by repeatedly halving its signed distance to the
/// target (floor division), yielding successive strictly-closer
/// approximations, and finishes with the target itself. The sequence is
/// finite and strictly converging, so trees built from it have finite paths.
///
/// Shrinking `17` in `[0, 20]` yields `9, 5, 3, 2, 1, 0`.
pub fn towards<T>(low: T, high: T) -> Shrink<T>
where
    T: PrimInt + Euclid + 'static,
{
    let zero = T::zero();
    let target = if low <= zero && zero <= high {
        zero
    } else if low > zero {
        low
    } else {
        high
    };

    Rc::new(move |&value: &T| {
        let mut candidates = Vec::new();
        if value != target {
            let two = T::one() + T::one();
            let mut half = (value - target).div_euclid(&two);
            let mut current = value - half;
            while half != zero && current != target {
                candidates.push(current);
                half = (current - target).div_euclid(&two);
                current = current - half;
            }
            candidates.push(target);
        }
        Box::new(candidates.into_iter())
    })
}
