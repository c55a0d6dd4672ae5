//! HTML helpers for BOE consolidated-text pages.
//!
//! The page is parsed once with `scraper` to locate each `<div class="bloque">`
//! and take its inner markup. BOE pages are hand-authored across decades of
//! formats, so inside a block the heading and annotations are picked out
//! with regexes, and the remaining fragment is parsed again for its text.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{Html, Selector};

use crate::types::ExtractionOptions;

#[allow(clippy::expect_used)] // Static selector that is guaranteed to be valid
static BLOQUE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.bloque[id]").expect("valid selector"));

/// Article ids: `a12`, `a12bis`, `a12-3`, `aprimero`, `regla4`, `primero`, `decimo-2`.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static ARTICLE_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(?:a\d+[a-z]*(?:-\d+)?|a[a-záéíóúñ]+|regla\d+|(?:primero|segundo|tercero|cuarto|quinto|sexto|s[ée]ptimo|octavo|noveno|d[ée]cimo)(?:-\d+)?)$",
    )
    .expect("valid regex")
});

/// Disposition ids: `da`, `dt-2`, `df3`, `primera`, `segunda-2`.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static DISPOSITION_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(?:d[atdf](?:-?\d+)?|(?:primera|segunda|tercera|cuarta|quinta|sexta|s[ée]ptima|octava|novena|d[ée]cima)(?:-\d+)?)$",
    )
    .expect("valid regex")
});

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static HEADING_ELEMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<h[1-6]\b[^>]*>(.*?)</h[1-6]\s*>").expect("valid regex")
});

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static ARTICULO_PARAGRAPH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<p\b[^>]*\bclass\s*=\s*["'][^"']*\barticulo\b[^"']*["'][^>]*>(.*?)</p\s*>"#)
        .expect("valid regex")
});

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static FOOTNOTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<p\b[^>]*\bclass\s*=\s*["'][^"']*nota_pie[^"']*["'][^>]*>.*?</p\s*>"#)
        .expect("valid regex")
});

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static BACK_TO_TOP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?is)<p\b[^>]*\bclass\s*=\s*["'][^"']*linksubir[^"']*["'][^>]*>.*?</p\s*>|<a\b[^>]*\bhref\s*=\s*["']#(?:top|inicio)?["'][^>]*>.*?</a\s*>"#,
    )
    .expect("valid regex")
});

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static BLOCKQUOTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<blockquote\b.*?</blockquote\s*>").expect("valid regex")
});

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static FORM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<form\b.*?</form\s*>").expect("valid regex"));

/// Jurisprudence annotations: links, spans and divs tagged as such.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static JURISPRUDENCE: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    [
        Regex::new(r"(?is)<a\b[^>]*jurisprudencia[^>]*>.*?</a\s*>").expect("valid regex"),
        Regex::new(r"(?is)<span\b[^>]*jurisprudencia[^>]*>.*?</span\s*>").expect("valid regex"),
        Regex::new(r"(?is)<div\b[^>]*jurisprudencia[^>]*>.*?</div\s*>").expect("valid regex"),
    ]
});

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static JURISPRUDENCE_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bJurisprudencia\b").expect("valid regex"));

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static BLOCK_BREAK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)</p\s*>|<br\s*/?>|</li\s*>|</div\s*>").expect("valid regex")
});

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static EXTRA_NEWLINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("valid regex"));

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static HORIZONTAL_SPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t\u{a0}]+").expect("valid regex"));

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static ANY_WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s\u{a0}]+").expect("valid regex"));

/// A `bloque` div: its id and inner markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// Value of the `id` attribute.
    pub id: String,

    /// Markup inside the div, up to its matching close tag.
    pub html: String,
}

/// Find all `bloque` divs with a non-empty id, in document order.
pub fn find_blocks(html: &str) -> Vec<Block> {
    let document = Html::parse_document(html);
    document
        .select(&BLOQUE)
        .filter_map(|element| {
            let id = element.value().id().filter(|id| !id.is_empty())?;
            Some(Block {
                id: id.to_string(),
                html: element.inner_html(),
            })
        })
        .collect()
}

/// Whether a block id can hold an article (or a disposition, when enabled).
pub fn is_candidate_id(id: &str, options: &ExtractionOptions) -> bool {
    ARTICLE_ID.is_match(id) || (options.include_disposiciones && DISPOSITION_ID.is_match(id))
}

/// Separate a block into heading text and cleaned body.
///
/// The heading is the first `<h1>`..`<h6>`, else the first
/// `<p class="articulo">`, else the first non-empty line of the block text.
/// Markup before a heading element (block labels) is discarded. Returns
/// `None` when the block has no text at all.
pub fn split_heading(block_html: &str) -> Option<(String, String)> {
    let element = HEADING_ELEMENT
        .captures(block_html)
        .or_else(|| ARTICULO_PARAGRAPH.captures(block_html));

    if let Some(caps) = element {
        let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
            return None;
        };
        let heading = inline_text(inner.as_str());
        let body = clean_body(&block_html[whole.end()..]);
        return Some((heading, body));
    }

    let text = clean_body(block_html);
    let mut lines = text.lines();
    let heading = lines.find(|line| !line.is_empty())?.to_string();
    let body = lines.collect::<Vec<_>>().join("\n").trim().to_string();
    Some((heading, body))
}

/// Text of an inline fragment on a single line.
pub fn inline_text(html: &str) -> String {
    let text = fragment_text(html);
    ANY_WHITESPACE.replace_all(&text, " ").trim().to_string()
}

/// Clean article body markup down to plain text.
///
/// Removes notes, navigation, quoted earlier versions, forms and
/// jurisprudence annotations; keeps paragraph structure as newlines.
pub fn clean_body(html: &str) -> String {
    let mut text = FOOTNOTE.replace_all(html, "").into_owned();
    text = BACK_TO_TOP.replace_all(&text, "").into_owned();
    text = BLOCKQUOTE.replace_all(&text, "").into_owned();
    text = FORM.replace_all(&text, "").into_owned();
    for pattern in JURISPRUDENCE.iter() {
        text = pattern.replace_all(&text, "").into_owned();
    }
    text = JURISPRUDENCE_WORD.replace_all(&text, "").into_owned();

    text = BLOCK_BREAK.replace_all(&text, "\n").into_owned();
    text = fragment_text(&text).replace("\r\n", "\n");

    let text = HORIZONTAL_SPACE.replace_all(&text, " ");
    let lines: Vec<&str> = text.lines().map(str::trim).collect();
    let joined = lines.join("\n");
    EXTRA_NEWLINES.replace_all(&joined, "\n\n").trim().to_string()
}

/// Text content of a markup fragment, tags dropped and character references decoded.
pub fn fragment_text(html: &str) -> String {
    Html::parse_fragment(html).root_element().text().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_blocks_stops_at_matching_close() {
        let html = r#"<body><div class="bloque" id="a1">uno<div class="nota">dentro</div></div><div class="otro">x</div><div id="a2" class="bloque destacado">dos</div><p>pie</p></body>"#;
        let blocks = find_blocks(html);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].id, "a1");
        assert_eq!(blocks[0].html, r#"uno<div class="nota">dentro</div>"#);
        assert_eq!(blocks[1].id, "a2");
        assert_eq!(blocks[1].html, "dos");
    }

    #[test]
    fn test_find_blocks_excludes_page_footer() {
        let html = concat!(
            r#"<div id="textoxslt"><div class="bloque" id="a1"><h5>Artículo 1. Objeto.</h5><p>Texto.</p></div></div>"#,
            r#"<div id="pie"><p>Aviso legal</p><p>Agencia Estatal Boletín Oficial del Estado</p></div>"#,
        );
        let blocks = find_blocks(html);
        assert_eq!(blocks.len(), 1);
        let (_, body) = split_heading(&blocks[0].html).unwrap();
        assert_eq!(body, "Texto.");
    }

    #[test]
    fn test_find_blocks_skips_blocks_without_id() {
        let html = r#"<div class="bloque">pre</div><div class="bloque" id="">vacío</div><div class="bloque" id="a1">uno</div>"#;
        let blocks = find_blocks(html);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].html, "uno");
    }

    #[test]
    fn test_find_blocks_ignores_similar_classes() {
        let html = r#"<div class="bloques" id="a1">uno</div>"#;
        assert!(find_blocks(html).is_empty());
    }

    #[test]
    fn test_article_ids() {
        let options = ExtractionOptions::default();
        for id in ["a1", "a15bis", "a3-2", "aprimero", "regla4", "primero", "decimo", "tercero-2"] {
            assert!(is_candidate_id(id, &options), "{id} should be a candidate");
        }
        for id in ["pr", "ti", "fi", "da", "df-2", "primera", "c1"] {
            assert!(!is_candidate_id(id, &options), "{id} should not be a candidate");
        }
    }

    #[test]
    fn test_disposition_ids_need_option() {
        let options = ExtractionOptions::with_disposiciones();
        for id in ["da", "dt", "dd", "df", "da-3", "dt2", "primera", "segunda-2", "décima"] {
            assert!(is_candidate_id(id, &options), "{id} should be a candidate");
        }
        assert!(!is_candidate_id("dx", &options));
        assert!(!is_candidate_id("undecima", &options));
    }

    #[test]
    fn test_split_heading_from_element() {
        let html = r#"<p class="bloque">[Bloque 2: #a1]</p><h5 class="articulo">Artículo 1. Objeto.</h5><p class="parrafo">Texto.</p></div>"#;
        let (heading, body) = split_heading(html).unwrap();
        assert_eq!(heading, "Artículo 1. Objeto.");
        assert_eq!(body, "Texto.");
    }

    #[test]
    fn test_split_heading_from_articulo_paragraph() {
        let html = r#"<p class="articulo">Artículo&nbsp;2.  <em>Ámbito</em>.</p><p>Texto.</p>"#;
        let (heading, body) = split_heading(html).unwrap();
        assert_eq!(heading, "Artículo 2. Ámbito.");
        assert_eq!(body, "Texto.");
    }

    #[test]
    fn test_split_heading_from_first_line() {
        let (heading, body) = split_heading("Disposición adicional primera. Foo</div>").unwrap();
        assert_eq!(heading, "Disposición adicional primera. Foo");
        assert_eq!(body, "");

        let (heading, body) = split_heading("<p>Primero. Objeto.</p><p>Uno.</p><p>Dos.</p>").unwrap();
        assert_eq!(heading, "Primero. Objeto.");
        assert_eq!(body, "Uno.\nDos.");
    }

    #[test]
    fn test_split_heading_empty_block() {
        assert_eq!(split_heading("<p> </p></div>"), None);
    }

    #[test]
    fn test_clean_body_removes_annotations() {
        let html = concat!(
            r#"<p class="parrafo">Texto vigente.</p>"#,
            r#"<p class="nota_pie">Redactado conforme a la Ley 2/2020.</p>"#,
            r#"<blockquote><p>Redacción anterior.</p></blockquote>"#,
            r#"<form action="/x"><input type="submit" value="Ver"/></form>"#,
            r#"<a class="jurisprudencia" href="/juris">Ver sentencias</a>"#,
            r#"<span class="enlace-jurisprudencia">STS 1/2020</span>"#,
            r#"<div class="jurisprudencia-bloque">Doctrina</div>"#,
            r#"<p>Jurisprudencia</p>"#,
            r##"<p class="linkSubir"><a href="#top">Subir</a></p>"##,
        );
        assert_eq!(clean_body(html), "Texto vigente.");
    }

    #[test]
    fn test_clean_body_whitespace() {
        let html = "<p>  Uno   dos\t tres </p><br/><br><br><br><p>Cuatro</p><ul><li>a</li><li>b</li></ul>";
        assert_eq!(clean_body(html), "Uno dos tres\n\nCuatro\na\nb");
    }

    #[test]
    fn test_fragment_text_decodes_references() {
        assert_eq!(fragment_text("a&nbsp;b &amp; c"), "a\u{a0}b & c");
        assert_eq!(fragment_text("&quot;x&quot; &lt;y&gt;"), "\"x\" <y>");
        assert_eq!(fragment_text("&amp;lt;"), "&lt;");
        assert_eq!(fragment_text("Art&#237;culo &#8220;uno&#8221; &aacute;"), "Artículo “uno” á");
    }

    #[test]
    fn test_inline_text_with_numeric_references() {
        assert_eq!(inline_text("Art&#237;culo&#160;1. <b>Objeto</b>."), "Artículo 1. Objeto.");
    }
}
