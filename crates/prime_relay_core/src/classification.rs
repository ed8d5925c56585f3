use crate::contract::Number;

/// Primality predicate. Anything below 2 is never prime; the `u64` range is
/// delegated to `primal`. Decoded payloads never exceed `u64::MAX`, so wider
/// values only arrive through direct calls and are reported as non-prime.
pub fn is_prime(number: Number) -> bool {
    match u64::try_from(number) {
        Ok(value) if value >= 2 => primal::is_prime(value),
        _ => false,
    }
}

/// Stable partition of a number list into primes and non-primes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrimeClassification {
    pub primes: Vec<Number>,
    pub non_primes: Vec<Number>,
}

impl PrimeClassification {
    pub fn partition(numbers: &[Number]) -> Self {
        let mut classification = Self::default();
        for &number in numbers {
            if is_prime(number) {
                classification.primes.push(number);
            } else {
                classification.non_primes.push(number);
            }
        }
        classification
    }

    pub fn prime_count(&self) -> usize {
        self.primes.len()
    }

    pub fn has_primes(&self) -> bool {
        !self.primes.is_empty()
    }
}

/// Comma-joined rendering used by the "primes found" diagnostic.
pub fn join_numbers(numbers: &[Number]) -> String {
    numbers
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(2)]
    #[case(3)]
    #[case(5)]
    #[case(7)]
    #[case(11)]
    #[case(97)]
    #[case(101)]
    #[case(2_147_483_647)]
    #[case(9_223_372_036_854_775_783)]
    #[case(18_446_744_073_709_551_557)]
    fn recognises_primes(#[case] number: Number) {
        assert!(is_prime(number), "{number} should be prime");
    }

    #[rstest]
    #[case(1)]
    #[case(4)]
    #[case(6)]
    #[case(8)]
    #[case(9)]
    #[case(10)]
    #[case(98)]
    #[case(99)]
    #[case(100)]
    #[case(18_446_744_073_709_551_615)]
    fn rejects_composites_and_one(#[case] number: Number) {
        assert!(!is_prime(number), "{number} should not be prime");
    }

    #[rstest]
    #[case(0)]
    #[case(-1)]
    #[case(-2)]
    #[case(-7)]
    #[case(i64::MIN as Number)]
    fn numbers_below_two_are_never_prime(#[case] number: Number) {
        assert!(!is_prime(number));
    }

    #[test]
    fn partitions_mixed_list_in_input_order() {
        let classification = PrimeClassification::partition(&[2, 3, 4, 5, 6, 7, 8, 9, 10, 11]);

        assert_eq!(classification.primes, vec![2, 3, 5, 7, 11]);
        assert_eq!(classification.non_primes, vec![4, 6, 8, 9, 10]);
        assert_eq!(classification.prime_count(), 5);
    }

    #[test]
    fn empty_input_yields_empty_partitions() {
        let classification = PrimeClassification::partition(&[]);

        assert!(classification.primes.is_empty());
        assert!(classification.non_primes.is_empty());
        assert!(!classification.has_primes());
    }

    #[test]
    fn composite_only_input_has_no_primes() {
        let classification = PrimeClassification::partition(&[4, 6, 8, 9]);

        assert!(!classification.has_primes());
        assert_eq!(classification.non_primes, vec![4, 6, 8, 9]);
    }

    #[test]
    fn duplicates_are_kept_in_both_partitions() {
        let classification = PrimeClassification::partition(&[7, 4, 7, 4]);

        assert_eq!(classification.primes, vec![7, 7]);
        assert_eq!(classification.non_primes, vec![4, 4]);
    }

    #[test]
    fn joins_numbers_with_commas() {
        assert_eq!(join_numbers(&[2, 3, 5, 7]), "2,3,5,7");
        assert_eq!(join_numbers(&[]), "");
    }

    proptest! {
        #[test]
        fn partition_is_stable_and_preserves_the_multiset(
            numbers in proptest::collection::vec(-1_000i128..10_000, 0..64)
        ) {
            let classification = PrimeClassification::partition(&numbers);

            let expected_primes: Vec<Number> =
                numbers.iter().copied().filter(|&n| is_prime(n)).collect();
            let expected_non_primes: Vec<Number> =
                numbers.iter().copied().filter(|&n| !is_prime(n)).collect();
            prop_assert_eq!(&classification.primes, &expected_primes);
            prop_assert_eq!(&classification.non_primes, &expected_non_primes);

            let mut merged = classification.primes.clone();
            merged.extend(&classification.non_primes);
            merged.sort_unstable();
            let mut sorted_input = numbers.clone();
            sorted_input.sort_unstable();
            prop_assert_eq!(merged, sorted_input);
        }
    }
}
