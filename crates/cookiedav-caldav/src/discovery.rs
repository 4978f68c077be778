//! Discovery of the per-installation token cookie.
//!
//! The collaboration suite names its session token cookie `oc` followed by a
//! random lowercase alphanumeric suffix (e.g. `ocwe8qziyo2m`). Its other
//! cookies share the prefix but contain underscores or uppercase letters
//! (`oc_sessionPassphrase`, `oc_username`) and must not be picked up.

use std::sync::LazyLock;

use cookiedav_core::CookieJar;
use regex::Regex;
use tracing::debug;

/// Regex for the dynamic token cookie name.
static DYNAMIC_TOKEN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^oc[a-z0-9]+$").expect("Invalid token cookie regex"));

/// How the dynamic token cookie is shown in diagnostics.
pub const DYNAMIC_TOKEN_LABEL: &str = "ocXXXXXXXX (dynamic)";

/// Returns true if `name` looks like the dynamic token cookie.
pub fn is_dynamic_token_name(name: &str) -> bool {
    DYNAMIC_TOKEN_REGEX.is_match(name)
}

/// Finds the dynamic token cookie and returns its `(name, value)`.
///
/// When several names match, the lexicographically smallest one wins. Browsers
/// send cookies in no guaranteed order, so picking "the first one sent" would
/// make the result depend on the transport.
pub fn discover_token_cookie(jar: &CookieJar) -> Option<(&str, &str)> {
    // CookieJar iterates in name order.
    let found = jar.iter().find(|(name, _)| is_dynamic_token_name(name));
    if let Some((name, _)) = found {
        debug!(cookie = name, "found dynamic token cookie");
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_random_names() {
        for name in ["ocwe8qziyo2m", "oc1", "ocabc", "oc0123456789"] {
            assert!(is_dynamic_token_name(name), "{name} should match");
        }
    }

    #[test]
    fn rejects_other_names() {
        for name in [
            "oc",
            "oc_sessionPassphrase",
            "oc_username",
            "oc_token",
            "OC1234",
            "ocABC",
            "ocwe8qZiyo2m",
            "xocabc",
            "ocabc ",
            "nc_token",
            "",
        ] {
            assert!(!is_dynamic_token_name(name), "{name:?} should not match");
        }
    }

    #[test]
    fn discovers_value() {
        let jar: CookieJar = [
            ("oc_sessionPassphrase", "nope"),
            ("ocwe8qziyo2m", "T1"),
            ("nc_username", "alice"),
        ]
        .into_iter()
        .collect();

        assert_eq!(discover_token_cookie(&jar), Some(("ocwe8qziyo2m", "T1")));
    }

    #[test]
    fn none_without_candidate() {
        let jar: CookieJar = [("oc_username", "alice"), ("OC1234", "x")]
            .into_iter()
            .collect();
        assert!(discover_token_cookie(&jar).is_none());
    }

    #[test]
    fn smallest_name_wins() {
        let jar: CookieJar = [("oczzz", "last"), ("ocaaa", "first"), ("ocmmm", "middle")]
            .into_iter()
            .collect();
        assert_eq!(discover_token_cookie(&jar), Some(("ocaaa", "first")));

        let header = CookieJar::parse_header("oczzz=last; ocmmm=middle; ocaaa=first");
        assert_eq!(discover_token_cookie(&header), Some(("ocaaa", "first")));
    }
}
