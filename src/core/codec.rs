//! Dradis block-text encoding of field maps
//!
//! The server stores issue, evidence and note bodies as text blocks of the
//! form `#[Key]#\r\nValue\r\n\r\n`. Only the outbound direction is needed
//! here: the server parses the text and hands back the structured fields.
//!
//! Values are written verbatim. A value that itself contains a `#[...]#`
//! header line will be split into extra fields by the server; the format
//! has no escape mechanism, so callers must avoid such values.

use crate::core::fields::OrderedFieldMap;

/// Render fields in iteration order. An empty map renders as `""`.
pub fn encode_fields(fields: &OrderedFieldMap) -> String {
    let mut text = String::new();
    for (key, value) in fields.iter() {
        text.push_str("#[");
        text.push_str(key);
        text.push_str("]#\r\n");
        text.push_str(value);
        text.push_str("\r\n\r\n");
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_two_fields() {
        let mut fields = OrderedFieldMap::new();
        fields.set("Port", "443/tcp");
        fields.set("Details", "Lorem ipsum");
        assert_eq!(
            encode_fields(&fields),
            "#[Port]#\r\n443/tcp\r\n\r\n#[Details]#\r\nLorem ipsum\r\n\r\n"
        );
    }

    #[test]
    fn test_encode_empty() {
        assert_eq!(encode_fields(&OrderedFieldMap::new()), "");
    }

    #[test]
    fn test_encode_follows_update_position() {
        let mut fields = OrderedFieldMap::new();
        fields.set("Title", "A");
        fields.set("Rating", "Low");
        fields.set("Title", "B");
        assert_eq!(
            encode_fields(&fields),
            "#[Title]#\r\nB\r\n\r\n#[Rating]#\r\nLow\r\n\r\n"
        );
    }

    #[test]
    fn test_delimiter_in_value_is_not_escaped() {
        let mut fields = OrderedFieldMap::new();
        fields.set("Output", "#[Injected]#");
        assert_eq!(encode_fields(&fields), "#[Output]#\r\n#[Injected]#\r\n\r\n");
    }
}
