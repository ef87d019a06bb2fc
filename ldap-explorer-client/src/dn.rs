//! Distinguished-name helpers
//!
//! Only the string handling the tree needs: splitting off the leading RDN
//! while honouring `\,` escapes, and naming a child relative to its parent.

/// Byte index of the first unescaped `,` in `dn`.
fn first_separator(dn: &str) -> Option<usize> {
    let mut escaped = false;
    for (i, ch) in dn.char_indices() {
        match ch {
            '\\' if !escaped => escaped = true,
            ',' if !escaped => return Some(i),
            _ => escaped = false,
        }
    }
    None
}

/// The leading RDN of `dn` (`"cn=alice"` for `"cn=alice,ou=people,dc=example"`).
pub fn leading_rdn(dn: &str) -> &str {
    let dn = dn.trim();
    first_separator(dn).map_or(dn, |i| dn[..i].trim())
}

/// The parent DN of `dn`, or `None` for a single-RDN name.
pub fn parent_dn(dn: &str) -> Option<&str> {
    let dn = dn.trim();
    first_separator(dn).map(|i| dn[i + 1..].trim())
}

/// Whether `dn` ends with `suffix`, compared case-insensitively on RDN boundaries.
pub fn is_descendant_of(dn: &str, suffix: &str) -> bool {
    let (dn, suffix) = (dn.trim(), suffix.trim());
    if suffix.is_empty() || dn.len() <= suffix.len() {
        return false;
    }
    let split = dn.len() - suffix.len();
    dn.is_char_boundary(split)
        && dn[split..].eq_ignore_ascii_case(suffix)
        && dn[..split].trim_end().ends_with(',')
}

/// Display name of `dn` as a child of `parent`.
///
/// The parent suffix is stripped first, then the first comma-separated
/// component of what remains is used. With an empty parent the leading RDN
/// of the full DN is returned.
pub fn display_name(dn: &str, parent: &str) -> String {
    let dn = dn.trim();
    let relative = if is_descendant_of(dn, parent) {
        let cut = dn.len() - parent.trim().len();
        dn[..cut].trim_end().trim_end_matches(',')
    } else {
        dn
    };
    leading_rdn(relative).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leading_rdn_of_simple_dn() {
        assert_eq!(leading_rdn("cn=alice,ou=people,dc=example,dc=com"), "cn=alice");
        assert_eq!(leading_rdn("dc=com"), "dc=com");
        assert_eq!(leading_rdn(""), "");
    }

    #[test]
    fn leading_rdn_honours_escaped_comma() {
        assert_eq!(
            leading_rdn(r"cn=Smith\, John,ou=people,dc=example"),
            r"cn=Smith\, John"
        );
    }

    #[test]
    fn parent_of_dn() {
        assert_eq!(parent_dn("ou=people,dc=example,dc=com"), Some("dc=example,dc=com"));
        assert_eq!(parent_dn("dc=com"), None);
    }

    #[test]
    fn descendant_check_is_case_insensitive_and_boundary_aware() {
        assert!(is_descendant_of("ou=People,DC=Example,DC=com", "dc=example,dc=com"));
        assert!(!is_descendant_of("dc=example,dc=com", "dc=example,dc=com"));
        assert!(!is_descendant_of("ou=x,adc=example,dc=com", "dc=example,dc=com"));
        assert!(!is_descendant_of("ou=x", ""));
    }

    #[test]
    fn display_name_relative_to_parent() {
        assert_eq!(
            display_name("ou=people,dc=example,dc=com", "dc=example,dc=com"),
            "ou=people"
        );
        assert_eq!(
            display_name("cn=alice,ou=people,dc=example,dc=com", "ou=people,dc=example,dc=com"),
            "cn=alice"
        );
        assert_eq!(display_name("cn=alice,ou=people", ""), "cn=alice");
    }

    #[test]
    fn display_name_when_parent_does_not_match() {
        assert_eq!(display_name("cn=x,o=other", "dc=example,dc=com"), "cn=x");
    }
}
