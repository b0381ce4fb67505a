//! 数论工具: 扩展欧几里得/模逆, 素性测试与素数生成, 整数分解.

mod error;
pub use error::NumError;

mod budget;
pub use budget::SearchBudget;

mod bigint_ext;
pub use bigint_ext::BigIntExt;

mod biguint_ext;
pub use biguint_ext::BigUintExt;

mod sieve;
pub use sieve::{small_primes, SMALL_PRIME_BOUND};

mod factor;
pub use factor::TRIAL_DIVISION_LIMIT;

/// Miller-Rabin witness rounds used when the caller has no opinion,
/// i.e. a false "prime" with probability at most $4^{-5}$.
pub const DEFAULT_PRIME_TEST_ROUNDS: usize = 5;
