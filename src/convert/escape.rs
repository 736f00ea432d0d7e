//! URI escaping for annotation values
//!
//! Matches the classic `URI.escape` behaviour: ASCII alphanumerics, the
//! unreserved marks and the reserved set stay as-is, everything else is
//! percent-encoded byte by byte (UTF-8, uppercase hex).

/// Left unescaped, in addition to ASCII alphanumerics
const URI_SAFE: &str = "-_.!~*'();/?:@&=+$,[]";

fn is_uri_safe(c: char) -> bool {
    c.is_ascii_alphanumeric() || URI_SAFE.contains(c)
}

/// Percent-encode every character outside the URI-safe set
pub fn uri_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while !rest.is_empty() {
        let safe_len = rest.find(|c: char| !is_uri_safe(c)).unwrap_or(rest.len());
        out.push_str(&rest[..safe_len]);
        rest = &rest[safe_len..];

        let unsafe_len = rest.find(is_uri_safe).unwrap_or(rest.len());
        out.push_str(&urlencoding::encode(&rest[..unsafe_len]));
        rest = &rest[unsafe_len..];
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserved_characters_kept() {
        assert_eq!(
            uri_escape("criteria provided, single submitter"),
            "criteria%20provided,%20single%20submitter"
        );
        assert_eq!(
            uri_escape("NM_004333.4(BRAF):c.1799T>A"),
            "NM_004333.4(BRAF):c.1799T%3EA"
        );
        assert_eq!(uri_escape("a;b/c?d@e&f=g+h$i[j]k!l~m*n'o"), "a;b/c?d@e&f=g+h$i[j]k!l~m*n'o");
    }

    #[test]
    fn test_unsafe_characters_encoded() {
        assert_eq!(uri_escape("50% <x> \"q\" #1 {a}|b"), "50%25%20%3Cx%3E%20%22q%22%20%231%20%7Ba%7D%7Cb");
        assert_eq!(uri_escape("\t"), "%09");
    }

    #[test]
    fn test_non_ascii_is_utf8_encoded() {
        assert_eq!(uri_escape("Ménière"), "M%C3%A9ni%C3%A8re");
        assert_eq!(uri_escape(""), "");
    }
}
