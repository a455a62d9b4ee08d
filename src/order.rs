use rand::Rng;

/// Picks the index shown after `previous` in a list of `len` images.
///
/// Sequential order walks the list and wraps to 0. Random order draws
/// uniformly, never returning `previous` again when there is another choice.
/// Returns `None` for an empty list.
pub fn next_index<R: Rng + ?Sized>(previous: Option<usize>, len: usize, random: bool, rng: &mut R) -> Option<usize> {
    if len == 0 {
        return None;
    }

    if !random {
        return Some(previous.map_or(0, |index| (index + 1) % len));
    }

    match previous {
        // Draw among the other len - 1 indices, skipping over the previous one
        Some(previous) if previous < len && len > 1 => {
            let pick = rng.random_range(0..len - 1);
            Some(if pick >= previous { pick + 1 } else { pick })
        }
        _ => Some(rng.random_range(0..len)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_empty_list_has_no_index() {
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(next_index(None, 0, false, &mut rng), None);
        assert_eq!(next_index(Some(3), 0, true, &mut rng), None);
    }

    #[test]
    fn test_sequential_starts_at_zero_and_wraps() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut previous = None;
        let mut visited = Vec::new();
        for _ in 0..7 {
            previous = next_index(previous, 3, false, &mut rng);
            visited.push(previous.unwrap());
        }
        assert_eq!(visited, vec![0, 1, 2, 0, 1, 2, 0]);
    }

    #[test]
    fn test_sequential_after_list_shrinks() {
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(next_index(Some(9), 4, false, &mut rng), Some(2));
    }

    #[test]
    fn test_random_never_repeats_previous() {
        let mut rng = StdRng::seed_from_u64(1234);
        let mut previous = next_index(None, 5, true, &mut rng);
        for _ in 0..1000 {
            let next = next_index(previous, 5, true, &mut rng);
            assert_ne!(next, previous);
            assert!(next.unwrap() < 5);
            previous = next;
        }
    }

    #[test]
    fn test_random_reaches_every_other_index() {
        let mut rng = StdRng::seed_from_u64(99);
        let mut hits = [0usize; 4];
        for _ in 0..400 {
            hits[next_index(Some(0), 4, true, &mut rng).unwrap()] += 1;
        }
        assert_eq!(hits[0], 0);
        assert!(hits[1..].iter().all(|&h| h > 0));
    }

    #[test]
    fn test_random_single_image() {
        let mut rng = StdRng::seed_from_u64(5);
        assert_eq!(next_index(Some(0), 1, true, &mut rng), Some(0));
    }

    proptest! {
        #[test]
        fn prop_sequential_is_successor(len in 1usize..50, previous in 0usize..50) {
            let mut rng = StdRng::seed_from_u64(0);
            let next = next_index(Some(previous), len, false, &mut rng).unwrap();
            prop_assert_eq!(next, (previous + 1) % len);
        }

        #[test]
        fn prop_random_differs_and_stays_in_range(len in 2usize..50, seed in any::<u64>()) {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut previous = next_index(None, len, true, &mut rng);
            for _ in 0..1000 {
                let next = next_index(previous, len, true, &mut rng);
                prop_assert!(next.unwrap() < len);
                prop_assert_ne!(next, previous);
                previous = next;
            }
        }
    }
}
