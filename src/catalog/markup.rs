//! Plain-text extraction from HTML description fragments.

use scraper::Html;

/// Strips tags from an HTML fragment, decoding entities along the way.
pub fn strip_markup(fragment: &str) -> String {
    if !fragment.contains('<') && !fragment.contains('&') {
        return fragment.trim().to_string();
    }

    let document = Html::parse_fragment(fragment);
    document.root_element().text().collect::<String>().trim().to_string()
}
