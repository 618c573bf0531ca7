//! Article body extraction from publisher HTML.
//!
//! Full-text pages mark their body with a fixed semantic attribute; the
//! extraction joins the paragraph text of the first such region and ignores
//! everything outside it.

use once_cell::sync::Lazy;
use scraper::{Html, Selector};

/// Sentinel returned when the document has no article-content region.
pub const NOT_FOUND: &str = "NOT FOUND";

static ARTICLE_SECTION_SEL: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(r#"section[aria-label="Article content"]"#)
        .expect("Should parse: ARTICLE_SECTION_SEL")
});
static PARAGRAPH_SEL: Lazy<Selector> =
    Lazy::new(|| Selector::parse("p").expect("Should parse: PARAGRAPH_SEL"));

/// Extract the newline-joined paragraph text of the article-content region,
/// or [`NOT_FOUND`] when the region is absent.
pub fn article_text(html: &str) -> String {
    let document = Html::parse_document(html);

    let Some(section) = document.select(&ARTICLE_SECTION_SEL).next() else {
        return NOT_FOUND.to_string();
    };

    section
        .select(&PARAGRAPH_SEL)
        .map(|p| p.text().collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_joins_paragraphs_with_newlines() {
        let html = r#"
            <html><body>
            <nav><p>site navigation</p></nav>
            <section aria-label="Article content">
                <h2>Results</h2>
                <p>CDK1 phosphorylates Histone H1.</p>
                <p>CASP3 cleaves PARP1.</p>
            </section>
            </body></html>"#;
        assert_eq!(
            article_text(html),
            "CDK1 phosphorylates Histone H1.\nCASP3 cleaves PARP1."
        );
    }

    #[test]
    fn test_missing_region_returns_sentinel() {
        assert_eq!(article_text("<html><body><p>abstract only</p></body></html>"), NOT_FOUND);
    }

    #[test]
    fn test_nested_markup_inside_paragraphs() {
        let html = r#"
            <section aria-label="Article content">
                <p>PPM1D <em>dephosphorylates</em> RUNX2.</p>
            </section>"#;
        assert_eq!(article_text(html), "PPM1D dephosphorylates RUNX2.");
    }
}
