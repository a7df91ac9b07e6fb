// Percent-encoding regimes used during expansion

/// Which characters survive expansion unescaped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// Only RFC 3986 unreserved characters pass through
    Unreserved,
    /// Unreserved and reserved characters plus existing `%XX` triplets pass through
    ReservedPreserving,
}

impl Encoding {
    pub fn encode(&self, value: &str) -> String {
        match self {
            Encoding::Unreserved => unreserved_encode(value),
            Encoding::ReservedPreserving => reserved_encode(value),
        }
    }
}

/// Percent-encode everything outside `ALPHA / DIGIT / "-" / "." / "_" / "~"`.
pub fn unreserved_encode(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// Percent-encode everything outside the unreserved and reserved sets,
/// leaving valid `%XX` triplets untouched.
pub fn reserved_encode(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    let mut buf = [0u8; 4];
    let mut rest = value;

    while let Some(ch) = rest.chars().next() {
        if ch == '%' && starts_with_triplet(rest) {
            result.push_str(&rest[..3]);
            rest = &rest[3..];
            continue;
        }

        if is_unreserved(ch) || is_reserved(ch) {
            result.push(ch);
        } else {
            result.push_str(&urlencoding::encode(ch.encode_utf8(&mut buf)));
        }
        rest = &rest[ch.len_utf8()..];
    }

    result
}

/// True when `input` begins with `%` followed by two hex digits.
pub(crate) fn starts_with_triplet(input: &str) -> bool {
    let bytes = input.as_bytes();
    bytes.len() >= 3
        && bytes[0] == b'%'
        && bytes[1].is_ascii_hexdigit()
        && bytes[2].is_ascii_hexdigit()
}

fn is_unreserved(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || matches!(ch, '-' | '.' | '_' | '~')
}

fn is_reserved(ch: char) -> bool {
    matches!(
        ch,
        ':' | '/' | '?' | '#' | '[' | ']' | '@'
            | '!' | '$' | '&' | '\'' | '(' | ')' | '*' | '+' | ',' | ';' | '='
    )
}
