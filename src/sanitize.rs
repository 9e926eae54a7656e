//! Markup sanitization for outbound values
//!
//! Before a value leaves the card it is parsed as markup and reduced to its
//! text content: tags, attributes, comments, and processing instructions are
//! dropped, entities are resolved. Input without any markup syntax passes
//! through unchanged.

use quick_xml::events::Event;
use quick_xml::Reader;

/// Reduce a value to its text content, discarding any markup
pub fn sanitize(value: &str) -> String {
    // Fast path: nothing markup-shaped in the input
    if !value.contains('<') && !value.contains('&') {
        return value.to_string();
    }

    let mut reader = Reader::from_str(value);
    let config = reader.config_mut();
    config.check_end_names = false;
    config.allow_unmatched_ends = true;

    let mut out = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Text(text)) => match text.unescape() {
                Ok(unescaped) => out.push_str(&unescaped),
                // Bare ampersands and unknown entities stay as-is
                Err(_) => out.push_str(&String::from_utf8_lossy(&text)),
            },
            Ok(Event::CData(cdata)) => {
                out.push_str(&String::from_utf8_lossy(&cdata));
            }
            Ok(Event::Eof) => break,
            // Tags, comments, PIs, doctype: dropped
            Ok(_) => {}
            Err(e) => {
                // Not well-formed past this point; keep the tail minus
                // anything tag-shaped
                let pos = (reader.buffer_position() as usize).min(value.len());
                tracing::debug!(position = pos, error = %e, "markup parse stopped early");
                out.push_str(&strip_tag_fragments(value.get(pos..).unwrap_or("")));
                break;
            }
        }
    }

    out
}

/// Drop `<...>` runs from a fragment the parser could not handle
fn strip_tag_fragments(tail: &str) -> String {
    let mut out = String::new();
    let mut in_tag = false;

    for c in tail.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => out.push(c),
            _ => {}
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_reduced_to_text() {
        assert_eq!(sanitize("<script>alert(1)</script>hi"), "alert(1)hi");
    }

    #[test]
    fn test_plain_text_unchanged() {
        assert_eq!(sanitize("plain text"), "plain text");
    }

    #[test]
    fn test_idempotent_on_plain_text() {
        let once = sanitize("plain text");
        assert_eq!(sanitize(&once), once);
    }

    #[test]
    fn test_nested_markup_stripped() {
        assert_eq!(sanitize("<b>bold <i>and italic</i></b>"), "bold and italic");
        assert_eq!(
            sanitize(r#"<a href="http://evil.example">click</a>"#),
            "click"
        );
    }

    #[test]
    fn test_entities_resolved() {
        assert_eq!(sanitize("fish &amp; chips"), "fish & chips");
        assert_eq!(sanitize("&lt;3"), "<3");
    }

    #[test]
    fn test_bare_ampersand_kept() {
        assert_eq!(sanitize("Tom & Jerry"), "Tom & Jerry");
    }

    #[test]
    fn test_unmatched_end_tag_dropped() {
        assert_eq!(sanitize("</b>after"), "after");
    }

    #[test]
    fn test_stray_angle_bracket_never_survives() {
        // "5 < 6" is not well-formed markup; whatever the parser salvages,
        // no tag syntax may remain
        let out = sanitize("5 < 6");
        assert!(!out.contains('<'));
        assert!(out.starts_with("5 "));
    }

    #[test]
    fn test_comments_and_cdata() {
        assert_eq!(sanitize("a<!-- hidden -->b"), "ab");
        assert_eq!(sanitize("<x><![CDATA[raw data]]></x>"), "raw data");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(sanitize(""), "");
    }
}
