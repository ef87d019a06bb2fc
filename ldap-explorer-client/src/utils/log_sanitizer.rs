//! Log sanitization utilities
//!
//! Search filters and attribute values can be arbitrarily long (generated
//! filters, certificates, photos). These helpers keep debug/error logs
//! readable without dumping them whole.

/// Maximum number of bytes of a single string included in log output.
const TRUNCATE_LIMIT: usize = 256;

/// Maximum number of DNs listed by [`summarize_dns`].
const SUMMARY_LIMIT: usize = 3;

/// MSRV-compatible replacement for `str::floor_char_boundary` (stable since 1.91.0).
fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        s.len()
    } else {
        let mut i = index;
        while i > 0 && !s.is_char_boundary(i) {
            i -= 1;
        }
        i
    }
}

/// Truncate a string for safe logging.
///
/// Strings within the limit are returned as-is; longer ones are cut on a
/// character boundary and suffixed with the total length.
pub fn truncate_for_log(s: &str) -> String {
    if s.len() <= TRUNCATE_LIMIT {
        s.to_string()
    } else {
        format!(
            "{}... [truncated, total {} bytes]",
            &s[..floor_char_boundary(s, TRUNCATE_LIMIT)],
            s.len()
        )
    }
}

/// Short description of a DN list: the first few names plus a count.
pub fn summarize_dns<'a>(dns: impl IntoIterator<Item = &'a str>) -> String {
    let mut shown = Vec::new();
    let mut total = 0_usize;
    for dn in dns {
        if shown.len() < SUMMARY_LIMIT {
            shown.push(truncate_for_log(dn));
        }
        total += 1;
    }
    if total > shown.len() {
        format!("[{}, ... {} total]", shown.join("; "), total)
    } else {
        format!("[{}]", shown.join("; "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_filter_unchanged() {
        let s = "(&(objectClass=person)(uid=alice))";
        assert_eq!(truncate_for_log(s), s);
    }

    #[test]
    fn exactly_at_limit() {
        let s = "a".repeat(TRUNCATE_LIMIT);
        assert_eq!(truncate_for_log(&s), s);
    }

    #[test]
    fn generated_filter_truncated() {
        let s = format!("(|{})", "(uid=someone)".repeat(100));
        let result = truncate_for_log(&s);
        assert!(result.contains("... [truncated, total"));
        assert!(result.contains(&format!("{} bytes]", s.len())));
        assert!(result.len() < s.len());
    }

    #[test]
    fn multibyte_values_safe() {
        // Each '目' is 3 bytes; truncation must not split one
        let s = "目".repeat(200);
        let result = truncate_for_log(&s);
        assert!(result.contains("... [truncated, total"));
    }

    #[test]
    fn summary_lists_all_when_short() {
        let dns = ["ou=people,dc=example", "ou=groups,dc=example"];
        assert_eq!(
            summarize_dns(dns),
            "[ou=people,dc=example; ou=groups,dc=example]"
        );
    }

    #[test]
    fn summary_counts_the_rest() {
        let dns = ["cn=a", "cn=b", "cn=c", "cn=d", "cn=e"];
        assert_eq!(summarize_dns(dns), "[cn=a; cn=b; cn=c, ... 5 total]");
    }

    #[test]
    fn summary_of_nothing() {
        assert_eq!(summarize_dns(std::iter::empty()), "[]");
    }
}
