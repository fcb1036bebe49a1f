//! Browser-viewable URL mapping for stored attachments.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Microsoft Office Online viewer, used so Word files render in the
/// browser instead of downloading.
const OFFICE_VIEWER_BASE: &str = "https://view.officeapps.live.com/op/view.aspx?src=";

/// Characters escaped the way `encodeURIComponent` does: everything but
/// alphanumerics and `- _ . ! ~ * ' ( )`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Map a stored attachment URL to a browser-viewable URL.
///
/// Word files (`.doc`, `.docx`) are wrapped in the Office Online viewer
/// with the original URL as an encoded parameter; anything else (PDF)
/// is returned unchanged. Pure and platform-independent.
#[must_use]
pub fn view_url(url: &str) -> String {
    let extension = url
        .rsplit('.')
        .next()
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    if extension == "doc" || extension == "docx" {
        format!(
            "{OFFICE_VIEWER_BASE}{}",
            utf8_percent_encode(url, URI_COMPONENT)
        )
    } else {
        url.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_pdf_returned_unchanged() {
        let url = "https://files.example.com/abc-123.pdf";
        assert_eq!(view_url(url), url);
    }

    #[rstest]
    #[case("https://files.example.com/abc-123.docx")]
    #[case("https://files.example.com/abc-123.doc")]
    #[case("https://files.example.com/ABC-123.DOCX")]
    fn test_word_wrapped_in_office_viewer(#[case] url: &str) {
        let mapped = view_url(url);
        assert!(mapped.starts_with(OFFICE_VIEWER_BASE));
        assert!(!mapped[OFFICE_VIEWER_BASE.len()..].contains("://"));
    }

    #[test]
    fn test_original_url_is_component_encoded() {
        let mapped = view_url("https://files.example.com/a b.docx");
        assert_eq!(
            mapped,
            "https://view.officeapps.live.com/op/view.aspx?src=https%3A%2F%2Ffiles.example.com%2Fa%20b.docx"
        );
    }

    #[test]
    fn test_url_without_extension_unchanged() {
        let url = "https://files.example.com/no-extension";
        assert_eq!(view_url(url), url);
    }
}
