use rand::{seq::SliceRandom, Rng};

/// Shuffles the candidates and returns the first, i.e. a uniform random pick.
///
/// Returns None if there are no candidates.
pub fn select<R>(mut candidates: Vec<String>, rng: &mut R) -> Option<String>
where
    R: Rng + ?Sized,
{
    candidates.shuffle(rng);
    candidates.into_iter().next()
}
