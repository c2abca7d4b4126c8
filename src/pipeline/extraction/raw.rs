use super::types::TextStrategy;

/// Last-resort strategy: decode the byte buffer directly as text.
///
/// Non-printable and non-ASCII characters are replaced with spaces and
/// newlines are preserved. Mechanically this always succeeds; for a binary
/// PDF it yields mostly garbage, and the cascade's length gate is the only
/// judge of whether the result is usable.
pub struct RawBytesText;

impl TextStrategy for RawBytesText {
    fn name(&self) -> &'static str {
        "raw-bytes"
    }

    fn attempt(&self, bytes: &[u8]) -> Result<String, String> {
        let decoded = String::from_utf8_lossy(bytes);
        let cleaned = decoded
            .chars()
            .map(|c| {
                if c == '\n' || (c.is_ascii() && !c.is_ascii_control()) {
                    c
                } else {
                    ' '
                }
            })
            .collect();
        Ok(cleaned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_passes_through() {
        let text = RawBytesText.attempt(b"Final exam on 2025-05-12").unwrap();
        assert_eq!(text, "Final exam on 2025-05-12");
    }

    #[test]
    fn newlines_are_preserved() {
        let text = RawBytesText.attempt(b"line one\nline two").unwrap();
        assert!(text.contains('\n'));
    }

    #[test]
    fn control_and_non_ascii_bytes_become_spaces() {
        let text = RawBytesText.attempt(b"a\x00b\x07c\xffd").unwrap();
        assert!(!text.contains('\x00'));
        assert!(!text.contains('\x07'));
        assert_eq!(text.replace(' ', ""), "abcd");
    }

    #[test]
    fn never_fails_on_binary_input() {
        let bytes: Vec<u8> = (0u8..=255).collect();
        assert!(RawBytesText.attempt(&bytes).is_ok());
    }
}
