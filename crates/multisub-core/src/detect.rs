//! Base64 subscription payload detection.
//!
//! Upstream providers serve either plain line lists or the same list
//! base64-encoded. A payload is only treated as encoded when it decodes
//! cleanly to UTF-8 *and* the decoded text has at least one line starting
//! with a known proxy scheme, so base64-looking plain text is left alone.

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;

/// Scheme prefixes recognized as proxy configuration lines
pub const PROXY_SCHEMES: [&str; 10] = [
    "vmess://",
    "vless://",
    "trojan://",
    "ss://",
    "ssr://",
    "hysteria://",
    "hy2://",
    "tuic://",
    "wireguard://",
    "socks://",
];

/// Standard alphabet, accepts missing/extra padding and non-canonical trailing bits.
const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// Characters that end a line, `\r\n` included as its two halves.
pub const LINE_BREAKS: [char; 10] = [
    '\n', '\r', '\u{0b}', '\u{0c}', '\u{1c}', '\u{1d}', '\u{1e}', '\u{85}', '\u{2028}', '\u{2029}',
];

/// Split `text` on any of [`LINE_BREAKS`]. Pieces may be empty or padded.
pub fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split(LINE_BREAKS)
}

/// Returns true if `line` starts with one of [`PROXY_SCHEMES`]
#[must_use]
pub fn has_proxy_scheme(line: &str) -> bool {
    PROXY_SCHEMES.iter().any(|scheme| line.starts_with(scheme))
}

/// Returns true if any trimmed, non-empty line of `text` carries a proxy scheme
#[must_use]
pub fn looks_like_proxy_payload(text: &str) -> bool {
    split_lines(text)
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .any(has_proxy_scheme)
}

/// Decode `payload` if it is base64-encoded proxy data.
///
/// Returns `None` for anything else, including malformed base64 and
/// decoded bytes that are not UTF-8.
#[must_use]
pub fn decode_base64_payload(payload: &str) -> Option<String> {
    let mut compact: String = payload.split_whitespace().collect();
    if compact.is_empty() || !compact.bytes().all(is_base64_byte) {
        return None;
    }

    let padding = (4 - compact.len() % 4) % 4;
    compact.extend(std::iter::repeat('=').take(padding));

    let decoded = LENIENT.decode(compact.as_bytes()).ok()?;
    let text = String::from_utf8(decoded).ok()?;

    looks_like_proxy_payload(&text).then_some(text)
}

/// Returns true if `payload` would be decoded by [`decode_base64_payload`]
#[must_use]
pub fn is_base64_payload(payload: &str) -> bool {
    decode_base64_payload(payload).is_some()
}

const fn is_base64_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'+' | b'/' | b'=')
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::{STANDARD, STANDARD_NO_PAD};

    #[test]
    fn test_decodes_proxy_payload() {
        let encoded = STANDARD.encode("vmess://a\nvmess://b");
        assert_eq!(decode_base64_payload(&encoded).unwrap(), "vmess://a\nvmess://b");
    }

    #[test]
    fn test_every_known_scheme_passes_gate() {
        for scheme in PROXY_SCHEMES {
            let encoded = STANDARD.encode(format!("{scheme}host:443"));
            assert!(is_base64_payload(&encoded), "{scheme}");
        }
    }

    #[test]
    fn test_one_proxy_line_is_enough() {
        let encoded = STANDARD.encode("# remarks\nSTATUS=ok\n  trojan://pw@host:443  \n");
        assert!(decode_base64_payload(&encoded).is_some());
    }

    #[test]
    fn test_missing_padding_is_restored() {
        let encoded = STANDARD_NO_PAD.encode("ss://abc");
        assert_eq!(encoded.len() % 4, 3);
        assert_eq!(decode_base64_payload(&encoded).unwrap(), "ss://abc");
    }

    #[test]
    fn test_embedded_whitespace_is_ignored() {
        let encoded = STANDARD.encode("vless://uuid@host:443?type=ws\nhy2://pw@host:8443");
        let wrapped: String = encoded
            .as_bytes()
            .chunks(16)
            .map(|chunk| std::str::from_utf8(chunk).unwrap())
            .collect::<Vec<_>>()
            .join("\r\n  ");
        assert!(decode_base64_payload(&wrapped).is_some());
    }

    #[test]
    fn test_plain_lists_are_not_base64() {
        assert!(decode_base64_payload("vmess://a\nvmess://b").is_none());
        assert!(decode_base64_payload("serverA\nserverB").is_none());
        assert!(decode_base64_payload("").is_none());
        assert!(decode_base64_payload("  \n\t ").is_none());
    }

    #[test]
    fn test_base64_without_proxy_lines_is_not_payload() {
        let encoded = STANDARD.encode("hello world\nnothing to see");
        assert!(decode_base64_payload(&encoded).is_none());

        let unlisted = STANDARD.encode("naive+https://user:pw@host");
        assert!(decode_base64_payload(&unlisted).is_none());
    }

    #[test]
    fn test_non_utf8_is_not_payload() {
        let encoded = STANDARD.encode([0xff, 0xfe, 0xfd, 0x00, 0x80]);
        assert!(decode_base64_payload(&encoded).is_none());
    }

    #[test]
    fn test_malformed_base64_falls_back() {
        // Single dangling symbol cannot be decoded regardless of padding.
        assert!(decode_base64_payload("abcde").is_none());
        // Padding in the middle of the data.
        assert!(decode_base64_payload("dm1l=c3M6").is_none());
    }

    #[test]
    fn test_carriage_return_only_payload_is_decoded() {
        let encoded = STANDARD.encode("# header\rvmess://a\rvmess://b");
        assert_eq!(decode_base64_payload(&encoded).unwrap(), "# header\rvmess://a\rvmess://b");
    }

    #[test]
    fn test_split_lines_on_unicode_breaks() {
        let pieces: Vec<&str> = split_lines("a\rb\r\nc\u{2028}d\u{85}e\u{0c}f").collect();
        assert_eq!(pieces, vec!["a", "b", "", "c", "d", "e", "f"]);
        assert!(looks_like_proxy_payload("remarks\u{2029}ss://x"));
    }

    #[test]
    fn test_concatenated_padded_blocks_are_not_decoded() {
        // Padding only counts at the very end; a second padded block is malformed.
        assert!(decode_base64_payload("dm1lc3M6Ly9hYg==dm1lc3M6Ly9iYw==").is_none());
    }

    #[test]
    fn test_scheme_gate_is_case_sensitive() {
        assert!(has_proxy_scheme("vmess://x"));
        assert!(!has_proxy_scheme("VMESS://x"));
        assert!(!has_proxy_scheme(" vmess://x"));
        assert!(looks_like_proxy_payload("  \n  vmess://x  \n"));
    }
}
