//! # Member Batches
//!
//! Every check operates on a batch of N members. Parameters are either a
//! single value applied to every member or one value per member:
//!
//! ```json
//! { "Fy": 50.0, "Lb": [120.0, 144.0, 180.0] }
//! ```
//!
//! The batch length is resolved once at the boundary of each check and all
//! arrays must agree on it. Per-member evaluation is independent, so large
//! batches are spread across threads with rayon.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::errors::{CheckError, CheckResult};

/// Batches at or above this size are evaluated in parallel
pub const PARALLEL_THRESHOLD: usize = 4096;

/// A parameter that is either broadcast to every member or given per member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Broadcast<T> {
    /// One value shared by the whole batch
    Scalar(T),
    /// One value per member
    Array(Vec<T>),
}

impl<T: Copy> Broadcast<T> {
    /// Number of members this parameter describes (`None` for a scalar)
    pub fn len(&self) -> Option<usize> {
        match self {
            Broadcast::Scalar(_) => None,
            Broadcast::Array(values) => Some(values.len()),
        }
    }

    /// Value for member `i`.
    ///
    /// Only valid after the batch length has been resolved with
    /// [`resolve_len`].
    #[inline]
    pub fn at(&self, i: usize) -> T {
        match self {
            Broadcast::Scalar(v) => *v,
            Broadcast::Array(values) => values[i],
        }
    }

    /// Iterate the stored values (one for a scalar)
    pub fn values(&self) -> impl Iterator<Item = T> + '_ {
        let slice: &[T] = match self {
            Broadcast::Scalar(v) => std::slice::from_ref(v),
            Broadcast::Array(values) => values,
        };
        slice.iter().copied()
    }

    /// True if any stored value satisfies the predicate
    pub fn any(&self, pred: impl Fn(T) -> bool) -> bool {
        self.values().any(pred)
    }

    /// Apply `f` to every stored value, keeping the scalar/array shape
    pub fn map<U>(&self, f: impl Fn(T) -> U) -> Broadcast<U> {
        match self {
            Broadcast::Scalar(v) => Broadcast::Scalar(f(*v)),
            Broadcast::Array(values) => Broadcast::Array(values.iter().map(|v| f(*v)).collect()),
        }
    }
}

impl From<f64> for Broadcast<f64> {
    fn from(v: f64) -> Self {
        Broadcast::Scalar(v)
    }
}

impl From<bool> for Broadcast<bool> {
    fn from(v: bool) -> Self {
        Broadcast::Scalar(v)
    }
}

impl<T> From<Vec<T>> for Broadcast<T> {
    fn from(values: Vec<T>) -> Self {
        Broadcast::Array(values)
    }
}

impl<T: Clone> From<&[T]> for Broadcast<T> {
    fn from(values: &[T]) -> Self {
        Broadcast::Array(values.to_vec())
    }
}

impl<T: Clone, const N: usize> From<[T; N]> for Broadcast<T> {
    fn from(values: [T; N]) -> Self {
        Broadcast::Array(values.to_vec())
    }
}

/// Resolve the batch length N shared by a set of named parameters.
///
/// - All arrays must have the same length
/// - Empty arrays are rejected
/// - N = 1 when every parameter is a scalar
///
/// Each entry is a parameter name and its [`Broadcast::len`].
pub fn resolve_len(params: &[(&str, Option<usize>)]) -> CheckResult<usize> {
    let mut resolved: Option<usize> = None;
    for &(field, len) in params {
        let Some(n) = len else {
            continue;
        };
        if n == 0 {
            return Err(CheckError::invalid_input(
                field,
                "[]",
                "Batch must contain at least one member",
            ));
        }
        match resolved {
            None => resolved = Some(n),
            Some(expected) if expected != n => {
                return Err(CheckError::length_mismatch(field, expected, n));
            }
            Some(_) => {}
        }
    }
    Ok(resolved.unwrap_or(1))
}

fn field_at(field: &str, param: &Broadcast<f64>, i: usize) -> String {
    match param {
        Broadcast::Scalar(_) => field.to_string(),
        Broadcast::Array(_) => format!("{}[{}]", field, i),
    }
}

/// Require every value to be finite and strictly positive.
pub fn require_positive(field: &str, param: &Broadcast<f64>) -> CheckResult<()> {
    for (i, v) in param.values().enumerate() {
        if !v.is_finite() || v <= 0.0 {
            return Err(CheckError::invalid_input(
                field_at(field, param, i),
                v.to_string(),
                "Must be a finite positive value",
            ));
        }
    }
    Ok(())
}

/// Require every value to be finite (sign unrestricted).
pub fn require_finite(field: &str, param: &Broadcast<f64>) -> CheckResult<()> {
    for (i, v) in param.values().enumerate() {
        if !v.is_finite() {
            return Err(CheckError::invalid_input(
                field_at(field, param, i),
                v.to_string(),
                "Must be a finite value",
            ));
        }
    }
    Ok(())
}

/// Check that an axial force batch is uniformly signed and return magnitudes.
///
/// Accepted: every value strictly positive, or every value strictly negative.
/// A zero anywhere in the batch has no sign and is rejected, including a
/// batch of all zeros.
pub fn uniform_magnitudes(field: &str, param: &Broadcast<f64>) -> CheckResult<Broadcast<f64>> {
    require_finite(field, param)?;

    let (mut positive, mut negative, mut zero) = (0usize, 0usize, 0usize);
    for v in param.values() {
        if v > 0.0 {
            positive += 1;
        } else if v < 0.0 {
            negative += 1;
        } else {
            zero += 1;
        }
    }

    if zero > 0 || (positive > 0 && negative > 0) {
        return Err(CheckError::NonUniformSign {
            field: field.to_string(),
            positive,
            negative,
            zero,
        });
    }
    Ok(param.map(f64::abs))
}

/// Evaluate `f` for each member index and collect the results in order.
pub fn map_members<T, F>(len: usize, f: F) -> Vec<T>
where
    T: Send,
    F: Fn(usize) -> T + Sync + Send,
{
    if len >= PARALLEL_THRESHOLD {
        (0..len).into_par_iter().map(f).collect()
    } else {
        (0..len).map(f).collect()
    }
}

/// Index of the first member for which `pred` holds
pub fn first_member_where(len: usize, pred: impl Fn(usize) -> bool) -> Option<usize> {
    (0..len).find(|&i| pred(i))
}
