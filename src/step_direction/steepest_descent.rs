use std::ops::Neg;

/// Return the direction of steepest descent,
/// the negated derivatives.
pub fn steepest_descent<A>(derivatives: &[A]) -> Vec<A>
where
    A: Copy + Neg<Output = A>,
{
    derivatives.iter().map(|x| -*x).collect()
}
