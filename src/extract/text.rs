// src/extract/text.rs
// =============================================================================
// This module pulls the readable text passages out of an HTML page.
//
// A "passage" is the text of one paragraph (<p>) element, in document order.
// Passages that are empty or almost empty (2 characters or fewer) are noise
// and get dropped.
// =============================================================================

use scraper::{Html, Selector};

use super::clean::SentenceCleaner;

// Passages of this many characters or fewer are dropped
const MIN_PASSAGE_CHARS: usize = 2;

const PASSAGE_SELECTOR: &str = "p";

// Extracts the text passages of a parsed page, in document order
//
// Example:
//   page = "<p>Hello world</p><p>ok</p><p>Second%20paragraph</p>"
//   result = ["Hello world", "Second paragraph"]
pub fn extract_text(page: &Html) -> Vec<String> {
    let Ok(selector) = Selector::parse(PASSAGE_SELECTOR) else {
        return Vec::new();
    };

    page.select(&selector)
        .map(|element| decode(&element.text().collect::<String>()))
        .filter(|passage| passage.chars().count() > MIN_PASSAGE_CHARS)
        .collect()
}

// Extracts passages and runs each one through the sentence cleaner
//
// A passage that cleans down to a single word (or nothing) is dropped:
// those are usually navigation labels like "Home" or "Read more".
pub fn extract_clean_text(page: &Html, cleaner: &SentenceCleaner) -> Vec<String> {
    extract_text(page)
        .iter()
        .map(|passage| cleaner.clean(passage))
        .filter(|sentence| sentence.contains(' '))
        .collect()
}

fn decode(text: &str) -> String {
    match urlencoding::decode(text) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(html: &str) -> Vec<String> {
        extract_text(&Html::parse_document(html))
    }

    #[test]
    fn test_extract_paragraphs_in_order() {
        let html = r#"
            <html><body>
                <h1>Title</h1>
                <p>First paragraph here.</p>
                <div><p>Second <b>bold</b> paragraph.</p></div>
            </body></html>
        "#;
        assert_eq!(
            text(html),
            vec!["First paragraph here.", "Second bold paragraph."]
        );
    }

    #[test]
    fn test_short_passages_are_dropped() {
        let html = "<p>ok</p><p></p><p>yes</p><p>é</p>";
        assert_eq!(text(html), vec!["yes"]);
    }

    #[test]
    fn test_passages_are_percent_decoded() {
        let html = "<p>Second%20paragraph</p>";
        assert_eq!(text(html), vec!["Second paragraph"]);
    }

    #[test]
    fn test_extract_clean_text_drops_single_word_passages() {
        let html = r#"
            <p>Read more</p>
            <p>The volunteers planted twenty trees in the park.</p>
            <p>Home</p>
        "#;
        let cleaner = SentenceCleaner::default();
        assert_eq!(
            extract_clean_text(&Html::parse_document(html), &cleaner),
            vec!["volunteers planted twenty trees park"]
        );
    }

    #[test]
    fn test_page_without_paragraphs() {
        assert!(text("<html><body><div>Nothing</div></body></html>").is_empty());
        assert!(text("").is_empty());
    }
}
