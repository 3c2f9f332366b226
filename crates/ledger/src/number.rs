//! Account number generation
//!
//! Account numbers are the public 10-digit identifiers receivers are
//! addressed by. Generation draws uniformly; uniqueness within a partition
//! is the create operation's job (collision check before insert, UNIQUE
//! constraint underneath).

use rand::Rng;

pub const ACCOUNT_NUMBER_MIN: i64 = 1_000_000_000;
pub const ACCOUNT_NUMBER_MAX: i64 = 9_999_999_999;

/// A random 10-digit account number.
pub fn random_account_number() -> i64 {
    rand::thread_rng().gen_range(ACCOUNT_NUMBER_MIN..=ACCOUNT_NUMBER_MAX)
}

/// True when `n` has exactly ten digits.
pub fn is_valid_account_number(n: i64) -> bool {
    (ACCOUNT_NUMBER_MIN..=ACCOUNT_NUMBER_MAX).contains(&n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_numbers_have_ten_digits() {
        for _ in 0..1000 {
            let n = random_account_number();
            assert!(is_valid_account_number(n), "not 10 digits: {}", n);
            assert_eq!(n.to_string().len(), 10);
        }
    }

    #[test]
    fn test_validity_bounds() {
        assert!(!is_valid_account_number(999_999_999));
        assert!(is_valid_account_number(ACCOUNT_NUMBER_MIN));
        assert!(is_valid_account_number(ACCOUNT_NUMBER_MAX));
        assert!(!is_valid_account_number(10_000_000_000));
        assert!(!is_valid_account_number(-1_234_567_890));
    }
}
