//! Duration scalar normalization.

use once_cell::sync::Lazy;
use regex::Regex;

static DURATION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:(\d+)h)?(?:(\d+)m)?(?:(\d+)s)?$").expect("valid duration regex"));

/// Collapses a Go-style duration literal to its shortest form.
///
/// `"15m0s"` becomes `"15m"` and `"1h0m0s"` becomes `"1h"`: zero-valued
/// components are dropped and the remaining ones re-emitted in hours,
/// minutes, seconds order. A string that is all zeros (or empty, which the
/// all-optional pattern accepts) becomes `"0s"`.
///
/// Strings that do not look like a duration at all are returned unchanged,
/// so this is safe to apply to any scalar.
pub fn normalize(input: &str) -> String {
    let caps = match DURATION_RE.captures(input) {
        Some(caps) => caps,
        None => return input.to_string(),
    };

    let mut parts = Vec::with_capacity(3);
    for (group, unit) in [(1, 'h'), (2, 'm'), (3, 's')] {
        if let Some(m) = caps.get(group) {
            match m.as_str().parse::<u64>() {
                Ok(0) => {}
                Ok(n) => parts.push(format!("{}{}", n, unit)),
                // Digit runs wider than u64 are not a duration we understand.
                Err(_) => return input.to_string(),
            }
        }
    }

    if parts.is_empty() {
        return "0s".to_string();
    }
    parts.concat()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_drops_zero_components() {
        assert_eq!(normalize("15m0s"), "15m");
        assert_eq!(normalize("1h0m0s"), "1h");
        assert_eq!(normalize("1h0m30s"), "1h30s");
    }

    #[test]
    fn test_all_zero_becomes_zero_seconds() {
        assert_eq!(normalize("0h0m0s"), "0s");
        assert_eq!(normalize("0s"), "0s");
        assert_eq!(normalize(""), "0s");
    }

    #[test]
    fn test_already_normal_is_unchanged() {
        assert_eq!(normalize("2h30m"), "2h30m");
        assert_eq!(normalize("45s"), "45s");
        assert_eq!(normalize("3h"), "3h");
    }

    #[test]
    fn test_non_durations_pass_through() {
        assert_eq!(normalize("not-a-duration"), "not-a-duration");
        assert_eq!(normalize("abc"), "abc");
        assert_eq!(normalize("15m0s extra"), "15m0s extra");
        assert_eq!(normalize("1.5h"), "1.5h");
        // Matches the pattern but overflows u64; treated as opaque.
        assert_eq!(
            normalize("99999999999999999999999h"),
            "99999999999999999999999h"
        );
    }

    #[test]
    fn test_idempotent() {
        for s in [
            "15m0s",
            "1h0m0s",
            "0h0m0s",
            "",
            "2h30m",
            "not-a-duration",
            "0s",
        ] {
            let once = normalize(s);
            assert_eq!(normalize(&once), once, "normalize not idempotent for {:?}", s);
        }
    }
}
