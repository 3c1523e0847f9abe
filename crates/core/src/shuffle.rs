use rand::Rng;

/// Returns a uniformly shuffled copy of `items` using thread-local entropy.
#[must_use]
pub fn shuffle<T: Clone>(items: &[T]) -> Vec<T> {
    shuffle_with(items, &mut rand::rng())
}

/// Fisher–Yates shuffle into a new vector; `items` is left untouched.
///
/// Walks from the last index down to 1, swapping each slot with a uniformly
/// chosen slot at or below it.
#[must_use]
pub fn shuffle_with<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut shuffled = items.to_vec();
    for i in (1..shuffled.len()).rev() {
        let j = rng.random_range(0..=i);
        shuffled.swap(i, j);
    }
    shuffled
}
