use crate::RandomSource;

/// Picks an index uniformly at random in `0..len`.
///
/// # Parameters
/// - `len`: The number of candidates. Must be strictly positive.
/// - `random`: The random source to draw from. Exactly one value is consumed.
///
/// # Returns
/// `floor(random() * len)`, clamped to `len - 1`.
#[inline]
pub fn uniform_index<R: RandomSource + ?Sized>(len: usize, random: &mut R) -> usize{
    let index = (random.random() * len as f64).floor() as usize;
    index.min(len.saturating_sub(1))
}

/// Finds the item with the highest score.
///
/// Ties are broken in favor of the first encountered maximum, so the
/// result only depends on the iteration order.
///
/// # Returns
/// The winning item, or `None` if `items` is empty.
pub fn first_max_by<T, I, F>(items: I, mut score: F) -> Option<T>
where
    I: IntoIterator<Item = T>,
    F: FnMut(&T) -> f64
{
    let mut best: Option<(T, f64)> = None;

    for item in items{
        let value = score(&item);
        let better = match &best{
            Some((_, best_value)) => value > *best_value,
            None => true
        };

        if better{
            best = Some((item, value));
        }
    }

    best.map(|(item, _)| item)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::ScriptedRandom;

    #[test]
    fn test_uniform_index(){
        let mut random = ScriptedRandom::new(vec![0.0, 0.5, 0.99, 0.3]);

        assert_eq!(uniform_index(4, &mut random), 0);
        assert_eq!(uniform_index(4, &mut random), 2);
        assert_eq!(uniform_index(4, &mut random), 3);
        assert_eq!(uniform_index(1, &mut random), 0);
    }

    #[test]
    fn test_first_max_keeps_first_tie(){
        let scores = [0.5, 0.9, 0.2, 0.9];
        let best = first_max_by(0..scores.len(), |i| scores[*i]);

        assert_eq!(best, Some(1));
    }

    #[test]
    fn test_first_max_empty(){
        let best = first_max_by(Vec::<usize>::new(), |_| 0.0);

        assert_eq!(best, None);
    }

    #[test]
    fn test_first_max_single(){
        let best = first_max_by(vec!['a'], |_| f64::NEG_INFINITY);

        assert_eq!(best, Some('a'));
    }
}
