/// 获取当前 UTC 时间戳（毫秒）
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Generate an opaque redemption code: `PREFIX-` followed by `len` characters
/// drawn uniformly from A-Z0-9 by a CSPRNG.
///
/// At len = 20 the code space is 36^20 (> 100 bits), so collisions are
/// negligible; the database still enforces a unique index and callers retry
/// on conflict.
pub fn secure_code(prefix: &str, len: usize) -> String {
    use rand::Rng;

    const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
    let mut rng = rand::thread_rng();
    let body: String = (0..len)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect();
    format!("{}-{}", prefix, body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_now_millis_monotonic_enough() {
        let a = now_millis();
        let b = now_millis();
        assert!(b >= a);
    }

    #[test]
    fn test_secure_code_format() {
        let code = secure_code("GC", 20);
        assert!(code.starts_with("GC-"));
        assert_eq!(code.len(), 23);
        assert!(
            code[3..].chars().all(|c| c.is_ascii_alphanumeric()),
            "code body must be alphanumeric: {}",
            code
        );
        assert!(!code[3..].chars().any(|c| c.is_ascii_lowercase()));
    }

    #[test]
    fn test_secure_code_draws_from_full_alphabet() {
        // 400 个均匀采样的字符里数字必然出现
        let sample: String = (0..20).map(|_| secure_code("GC", 20)[3..].to_string()).collect();
        assert!(sample.chars().any(|c| c.is_ascii_digit()));
        assert!(sample.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
    }

    #[test]
    fn test_secure_code_no_trivial_repeats() {
        let a = secure_code("GC", 20);
        let b = secure_code("GC", 20);
        assert_ne!(a, b);
    }
}
