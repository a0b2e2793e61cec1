//! The record/skip decision for one observed request.

/// Path prefixes whose GETs are always recorded, status regardless.
const SENSITIVE_PREFIXES: &[&str] = &["/users", "/audit-logs", "/admin"];

/// Paths never recorded, whatever the method or status.
const EXCLUDED_PREFIXES: &[&str] = &["/health", "/docs"];

/// Whether a request should produce an audit record.
///
/// Non-GET requests are always recorded. GETs are recorded when they
/// failed (status >= 400) or touched a sensitive prefix; routine
/// successful reads are skipped so the log is not flooded. Health and
/// docs endpoints are never recorded.
pub fn should_record(method: &str, path: &str, status: u16) -> bool {
    if EXCLUDED_PREFIXES.iter().any(|p| path.starts_with(p)) {
        return false;
    }
    if method != "GET" {
        return true;
    }
    if status >= 400 {
        return true;
    }
    SENSITIVE_PREFIXES.iter().any(|p| path.starts_with(p))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_is_never_recorded() {
        assert!(!should_record("GET", "/health", 200));
        assert!(!should_record("GET", "/health", 500));
        assert!(!should_record("POST", "/health", 200));
    }

    #[test]
    fn non_get_is_always_recorded() {
        assert!(should_record("POST", "/vehicles", 201));
        assert!(should_record("DELETE", "/vehicles/5", 404));
        assert!(should_record("PATCH", "/parcels/9", 200));
    }

    #[test]
    fn failed_get_is_recorded() {
        assert!(should_record("GET", "/parcels", 403));
        assert!(should_record("GET", "/parcels", 500));
    }

    #[test]
    fn routine_successful_get_is_skipped() {
        assert!(!should_record("GET", "/parcels", 200));
        assert!(!should_record("GET", "/vehicles", 200));
    }

    #[test]
    fn sensitive_get_is_recorded_even_on_success() {
        assert!(should_record("GET", "/users/5", 200));
        assert!(should_record("GET", "/audit-logs", 200));
        assert!(should_record("GET", "/admin/settings", 200));
    }
}
