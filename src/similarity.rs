//! # Similarity Engine
//! Plain vector math over `f64` slices: dot product, Euclidean magnitude,
//! cosine similarity.
//!
//! Vectors of unequal length are compared over their common prefix only —
//! rating histories differ in length across users, and truncation is the
//! documented policy rather than an error. A zero-magnitude operand yields
//! `0.0` instead of dividing by zero, so degenerate vectors and true
//! orthogonality are indistinguishable to callers.

/// Dot product over the common prefix of `a` and `b`.
pub fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

/// Euclidean magnitude.
pub fn magnitude(v: &[f64]) -> f64 {
    v.iter().map(|x| x * x).sum::<f64>().sqrt()
}

/// Cosine similarity in `[-1, 1]` over the common prefix of `a` and `b`;
/// `0.0` when either prefix has zero magnitude.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    let n = a.len().min(b.len());
    let (a, b) = (&a[..n], &b[..n]);

    let ma = magnitude(a);
    let mb = magnitude(b);
    if ma == 0.0 || mb == 0.0 {
        return 0.0;
    }
    dot(a, b) / (ma * mb)
}
