// Percent-encoding of expanded values

use std::borrow::Cow;

/// Characters RFC 3986 reserves as delimiters
pub const RESERVED: &str = ":/?#[]@!$&'()*+,;=";

/// Which characters survive percent-encoding untouched.
///
/// The unreserved set (`A-Z a-z 0-9 - . _ ~`) is always kept as is; the
/// reserved expansions (`+` and `#`) also keep [`RESERVED`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Encoding {
    Unreserved,
    Reserved,
}

impl Encoding {
    /// Characters allowed through on top of the unreserved set
    pub fn safe_characters(&self) -> &'static str {
        match self {
            Encoding::Unreserved => "",
            Encoding::Reserved => RESERVED,
        }
    }

    /// UTF-8 encode `value` and escape every byte outside the safe set
    pub fn encode<'a>(&self, value: &'a str) -> Cow<'a, str> {
        match self {
            Encoding::Unreserved => urlencoding::encode(value),
            Encoding::Reserved => encode_keeping_reserved(value),
        }
    }
}

fn encode_keeping_reserved(value: &str) -> Cow<'_, str> {
    if !value.contains(|ch: char| RESERVED.contains(ch)) {
        return urlencoding::encode(value);
    }

    let mut encoded = String::with_capacity(value.len());
    let mut rest = value;
    while let Some(idx) = rest.find(|ch: char| RESERVED.contains(ch)) {
        encoded.push_str(&urlencoding::encode(&rest[..idx]));
        // reserved characters are all ASCII
        encoded.push_str(&rest[idx..idx + 1]);
        rest = &rest[idx + 1..];
    }
    encoded.push_str(&urlencoding::encode(rest));
    Cow::Owned(encoded)
}
