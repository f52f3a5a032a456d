//! Shared helpers for the MISP tools.

/// Default number of events returned by a search.
pub fn default_limit() -> usize {
    5
}

/// Validate and clamp limit to allowed range (1-100).
pub fn validate_limit(limit: usize) -> usize {
    limit.clamp(1, 100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_limit() {
        assert_eq!(validate_limit(5), 5);
        assert_eq!(validate_limit(0), 1);
        assert_eq!(validate_limit(250), 100);
    }
}
