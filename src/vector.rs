//! Arithmetic on slices of floats.

use num_traits::Float;

/// Dot product of `xs` and `ys`.
pub fn dot<A>(xs: &[A], ys: &[A]) -> A
where
    A: Float,
{
    xs.iter()
        .zip(ys)
        .fold(A::zero(), |acc, (x, y)| acc + *x * *y)
}

/// Euclidean length of `xs`.
pub fn norm<A>(xs: &[A]) -> A
where
    A: Float,
{
    dot(xs, xs).sqrt()
}

/// Return `xs` scaled to unit length,
/// or unchanged if it has no length.
pub fn normalized<A>(xs: Vec<A>) -> Vec<A>
where
    A: Float,
{
    let length = norm(&xs);
    if length > A::zero() && length.is_finite() {
        xs.into_iter().map(|x| x / length).collect()
    } else {
        xs
    }
}

/// Cosine of the angle between `xs` and `ys`,
/// zero if either has no length.
pub fn cosine<A>(xs: &[A], ys: &[A]) -> A
where
    A: Float,
{
    let denominator = norm(xs) * norm(ys);
    if denominator > A::zero() {
        dot(xs, ys) / denominator
    } else {
        A::zero()
    }
}

/// Component-wise `xs - ys`.
pub fn sub<A>(xs: &[A], ys: &[A]) -> Vec<A>
where
    A: Float,
{
    xs.iter().zip(ys).map(|(x, y)| *x - *y).collect()
}
