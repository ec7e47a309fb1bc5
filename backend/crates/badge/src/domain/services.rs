//! Domain Services
//!
//! Pure domain logic for difficulty measurement and mining estimates.

use std::time::Duration;

/// Hash rate assumed by [`estimate_mining_time`]
pub const ESTIMATED_HASHES_PER_SECOND: f64 = 100_000.0;

/// Count leading zero bits of a hex string, nibble by nibble
///
/// A `0` digit contributes 4 and scanning continues; the first non-zero digit
/// contributes its own leading zeros and ends the scan. An empty or all-zero
/// string yields `4 * len`. A non-hex character contributes 4 and ends the
/// scan.
pub fn count_leading_zero_bits(hex: &str) -> u32 {
    let mut count = 0u32;
    for c in hex.chars() {
        match c.to_digit(16) {
            Some(0) => count += 4,
            Some(nibble) => {
                count += nibble.leading_zeros() - 28;
                break;
            }
            None => {
                count += 4;
                break;
            }
        }
    }
    count
}

/// Verify that an id meets the difficulty requirement
pub fn meets_difficulty(id: &str, target_bits: u32) -> bool {
    count_leading_zero_bits(id) >= target_bits
}

/// Expected wall-clock time to mine `bits` of difficulty
pub fn estimate_mining_time(bits: u32) -> Duration {
    let expected_hashes = 2f64.powi(bits.min(1024) as i32);
    Duration::try_from_secs_f64(expected_hashes / ESTIMATED_HASHES_PER_SECOND)
        .unwrap_or(Duration::MAX)
}

/// Human-readable rendering of a mining estimate
pub fn format_mining_time(duration: Duration) -> String {
    let millis = duration.as_secs_f64() * 1000.0;
    if millis < 1_000.0 {
        "Less than 1 second".to_string()
    } else if millis < 60_000.0 {
        format!("~{} seconds", (millis / 1_000.0).round())
    } else if millis < 3_600_000.0 {
        format!("~{} minutes", (millis / 60_000.0).round())
    } else {
        format!("~{} hours", (millis / 3_600_000.0).round())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leading_zero_bits() {
        assert_eq!(count_leading_zero_bits("8fff"), 0);
        assert_eq!(count_leading_zero_bits("4fff"), 1);
        assert_eq!(count_leading_zero_bits("2fff"), 2);
        assert_eq!(count_leading_zero_bits("1fff"), 3);
        assert_eq!(count_leading_zero_bits("0fff"), 4);
        assert_eq!(count_leading_zero_bits("00f0"), 8);
        assert_eq!(count_leading_zero_bits("0007"), 13);
    }

    #[test]
    fn test_leading_zero_bits_stops_at_first_nonzero() {
        // Zeros after the first non-zero nibble do not count
        assert_eq!(count_leading_zero_bits("0100"), 7);
    }

    #[test]
    fn test_leading_zero_bits_empty_and_all_zero() {
        assert_eq!(count_leading_zero_bits(""), 0);
        assert_eq!(count_leading_zero_bits("000"), 12);
        assert_eq!(count_leading_zero_bits(&"0".repeat(64)), 256);
    }

    #[test]
    fn test_leading_zero_bits_case_insensitive() {
        assert_eq!(count_leading_zero_bits("0A"), 4);
        assert_eq!(count_leading_zero_bits("0a"), 4);
    }

    #[test]
    fn test_leading_zero_bits_non_hex_counts_once() {
        assert_eq!(count_leading_zero_bits("00zz"), 12);
        assert_eq!(count_leading_zero_bits("g000"), 4);
        assert_eq!(count_leading_zero_bits("0-"), 8);
    }

    #[test]
    fn test_meets_difficulty() {
        assert!(meets_difficulty("ffff", 0));
        assert!(!meets_difficulty("ffff", 1));
        assert!(meets_difficulty("00ff", 8));
        assert!(!meets_difficulty("00ff", 9));
        assert!(meets_difficulty("0003", 14));
        assert!(!meets_difficulty("0003", 15));
    }

    #[test]
    fn test_estimate_mining_time() {
        // 2^0 = 1 hash at 100k/s = 10 microseconds
        let t = estimate_mining_time(0);
        assert!(t >= Duration::from_nanos(9_999) && t <= Duration::from_nanos(10_001));
        // 2^20 hashes ~ 10.5 seconds
        let t = estimate_mining_time(20);
        assert!(t > Duration::from_secs(10) && t < Duration::from_secs(11));
        assert_eq!(estimate_mining_time(200), Duration::MAX);
    }

    #[test]
    fn test_format_mining_time() {
        assert_eq!(
            format_mining_time(Duration::from_millis(999)),
            "Less than 1 second"
        );
        assert_eq!(format_mining_time(Duration::from_millis(10_486)), "~10 seconds");
        assert_eq!(format_mining_time(Duration::from_secs(90)), "~2 minutes");
        assert_eq!(format_mining_time(Duration::from_secs(7_200)), "~2 hours");
    }
}
