//! Turn a raw fetched payload into individual entries.

use crate::detect::{decode_base64_payload, split_lines};
use crate::types::Entry;

/// Split `payload` into trimmed, non-empty entries in their original order.
///
/// Base64 proxy payloads are decoded first. No scheme filter is applied to
/// the resulting lines.
#[must_use]
pub fn normalize_payload(payload: &str) -> Vec<Entry> {
    let raw = payload.trim();
    if raw.is_empty() {
        return Vec::new();
    }

    match decode_base64_payload(raw) {
        Some(decoded) => split_entries(&decoded),
        None => split_entries(raw),
    }
}

/// Split text on line breaks into trimmed, non-empty entries
#[must_use]
pub fn split_entries(text: &str) -> Vec<Entry> {
    split_lines(text).filter_map(Entry::new).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::{engine::general_purpose::STANDARD, Engine};

    fn texts(entries: &[Entry]) -> Vec<&str> {
        entries.iter().map(Entry::as_str).collect()
    }

    #[test]
    fn test_empty_payload() {
        assert!(normalize_payload("").is_empty());
        assert!(normalize_payload(" \r\n\t\n").is_empty());
    }

    #[test]
    fn test_plain_payload() {
        let entries = normalize_payload("serverA\nserverB");
        assert_eq!(texts(&entries), vec!["serverA", "serverB"]);
    }

    #[test]
    fn test_plain_payload_trims_and_drops_blank_lines() {
        let entries = normalize_payload("\n  vmess://a  \r\n\r\n\tss://b\n\n");
        assert_eq!(texts(&entries), vec!["vmess://a", "ss://b"]);
    }

    #[test]
    fn test_base64_payload_is_decoded() {
        let encoded = STANDARD.encode("vmess://a\n\n  vmess://b \n");
        let entries = normalize_payload(&format!("  {encoded}\n"));
        assert_eq!(texts(&entries), vec!["vmess://a", "vmess://b"]);
    }

    #[test]
    fn test_decoded_non_proxy_lines_are_kept() {
        let encoded = STANDARD.encode("REMARKS=provider\nvmess://a\nexpire: 2030");
        let entries = normalize_payload(&encoded);
        assert_eq!(texts(&entries), vec!["REMARKS=provider", "vmess://a", "expire: 2030"]);
    }

    #[test]
    fn test_base64_without_proxy_lines_stays_plain() {
        let encoded = STANDARD.encode("just some text");
        let entries = normalize_payload(&encoded);
        assert_eq!(texts(&entries), vec![encoded.as_str()]);
    }

    #[test]
    fn test_carriage_return_only_plain_payload() {
        let entries = normalize_payload("vmess://a\rvmess://b\r");
        assert_eq!(texts(&entries), vec!["vmess://a", "vmess://b"]);
    }

    #[test]
    fn test_carriage_return_only_base64_payload() {
        let encoded = STANDARD.encode("# header\rvmess://a\rvmess://b");
        let entries = normalize_payload(&encoded);
        assert_eq!(texts(&entries), vec!["# header", "vmess://a", "vmess://b"]);
    }

    #[test]
    fn test_unicode_line_separators_split_entries() {
        let entries = normalize_payload("ss://a\u{2028}ss://b\u{85}ss://c");
        assert_eq!(texts(&entries), vec!["ss://a", "ss://b", "ss://c"]);
    }

    #[test]
    fn test_order_and_duplicates_preserved() {
        let entries = normalize_payload("b\na\nb");
        assert_eq!(texts(&entries), vec!["b", "a", "b"]);
    }
}
