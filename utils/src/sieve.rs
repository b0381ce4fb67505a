use std::sync::OnceLock;

/// The small-prime table holds every prime below this bound.
pub const SMALL_PRIME_BOUND: usize = 10_000;

/// All primes below [`SMALL_PRIME_BOUND`] in ascending order, sieved once per process.
pub fn small_primes() -> &'static [u32] {
    static PRIMES: OnceLock<Vec<u32>> = OnceLock::new();

    PRIMES.get_or_init(|| {
        let mut composite = vec![false; SMALL_PRIME_BOUND];
        let mut primes = Vec::with_capacity(1229);

        for i in 2..SMALL_PRIME_BOUND {
            if composite[i] {
                continue;
            }

            primes.push(i as u32);
            for j in (i * i..SMALL_PRIME_BOUND).step_by(i) {
                composite[j] = true;
            }
        }

        primes
    })
}

#[cfg(test)]
mod tests {
    use super::small_primes;

    #[test]
    fn table() {
        let primes = small_primes();
        assert_eq!(primes.len(), 1229);
        assert_eq!(&primes[..10], &[2, 3, 5, 7, 11, 13, 17, 19, 23, 29]);
        assert_eq!(primes.last(), Some(&9973));
        assert!(!primes.contains(&7921));
    }
}
