/// 获取当前 UTC 时间戳（毫秒）
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Generate a new document key.
///
/// UUID v4 in simple (32 hex chars, no dashes) form, safe to embed in a
/// SurrealDB record id without escaping.
pub fn new_document_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_now_millis_is_monotonic_enough() {
        let a = now_millis();
        let b = now_millis();
        assert!(b >= a);
        // After 2024-01-01
        assert!(a > 1_704_067_200_000);
    }

    #[test]
    fn test_new_document_id_shape() {
        let id = new_document_id();
        assert_eq!(id.len(), 32);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(id, new_document_id());
    }
}
