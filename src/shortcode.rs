use rand::Rng;

/// Number of characters in a generated short code
pub const CODE_LENGTH: usize = 6;

const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Generate a random base-36 short code.
///
/// Codes are not checked against the store. Two creates that draw the same
/// code overwrite each other and the later write wins.
pub fn generate_short_code() -> String {
    let mut rng = rand::thread_rng();
    (0..CODE_LENGTH)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect()
}

/// Whether `candidate` has the shape of a generated code
pub fn is_short_code(candidate: &str) -> bool {
    candidate.len() == CODE_LENGTH && candidate.bytes().all(|b| ALPHABET.contains(&b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generated_codes_are_six_base36_chars() {
        for _ in 0..1_000 {
            let code = generate_short_code();
            assert_eq!(code.len(), CODE_LENGTH);
            assert!(
                code.chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()),
                "unexpected character in {}",
                code
            );
            assert!(is_short_code(&code));
        }
    }

    #[test]
    fn test_generated_codes_vary() {
        let codes: HashSet<String> = (0..100).map(|_| generate_short_code()).collect();
        // 36^6 possibilities; 100 draws colliding down to a handful would mean a broken RNG
        assert!(codes.len() > 90);
    }

    #[test]
    fn test_is_short_code() {
        assert!(is_short_code("abc123"));
        assert!(is_short_code("000000"));
        assert!(!is_short_code("abc12"));
        assert!(!is_short_code("abc1234"));
        assert!(!is_short_code("ABC123"));
        assert!(!is_short_code("_healt"));
        assert!(!is_short_code(""));
    }
}
