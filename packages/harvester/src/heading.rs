//! Article heading recognition.
//!
//! Each heading form has its own matcher returning `Option<Heading>`;
//! [`parse_heading`] tries them in a fixed order and takes the first hit.
//! A heading that no matcher accepts means the block is not an article.

use std::sync::LazyLock;

use regex::Regex;

use crate::ordinal::{feminine_ordinal_value, spanish_text_to_number};
use crate::types::{DispositionKind, ExtractionOptions};

/// "Disposición adicional primera. Título"
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static DISPOSITION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^Disposici[óo]n\s+(adicional|transitoria|derogatoria|final)\s+([^\s.]+(?:\s+[^\s.]+)?)\s*\.(?:\s*(.*))?$",
    )
    .expect("valid regex")
});

/// "Disposición final." (sole disposition of its kind, no ordinal)
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static DISPOSITION_WITHOUT_ORDINAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^Disposici[óo]n\s+(derogatoria|final)\s*\.(?:\s*(.*))?$")
        .expect("valid regex")
});

/// "Artículo 15 bis 2. Título" or "Regla 4. Título"
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static NUMERIC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(?:Art[íi]culo|Regla)\s+(\d+)(?:\s*(bis|ter|qu[aá]ter|quinquies|sexies|septies|octies|nonies|decies)\b)?(?:\s+(\d+))?\s*(?:\.\s*(.*))?$",
    )
    .expect("valid regex")
});

/// "15. Título"
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static BARE_NUMERIC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(\d+)(?:\s*(bis|ter|qu[aá]ter|quinquies|sexies|septies|octies|nonies|decies))?\s*\.(?:\s*(.*))?$",
    )
    .expect("valid regex")
});

/// "Artículo vigésimo tercero. Título"
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static ORDINAL_WORDS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^Art[íi]culo\s+(\D.*?)\s*$").expect("valid regex"));

/// "Primero. Título"
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static BARE_ORDINAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^([a-záéíóúñ]+(?:\s+[a-záéíóúñ]+){0,3})\s*\.(?:\s*(.*))?$")
        .expect("valid regex")
});

/// A recognized article or disposition heading.
///
/// `tail` is whatever follows the number: usually the title, sometimes the
/// title plus the first sentence of the body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Heading {
    /// "Artículo 15 bis. ...", "Regla 3. ...", "15. ..."
    Numeric { number: String, tail: String },

    /// "Artículo primero. ..."
    Text { number: String, tail: String },

    /// "Primero. ..." without the word "Artículo".
    BareOrdinal { number: String, tail: String },

    /// "Disposición adicional primera. ..."; `ordinal` is `None` for the
    /// sole disposition of its kind.
    Disposition {
        kind: DispositionKind,
        ordinal: Option<u32>,
        tail: String,
    },
}

impl Heading {
    /// Identifier for the extracted record ("15 bis", "DA3", "DF").
    #[must_use]
    pub fn article_number(&self) -> String {
        match self {
            Self::Numeric { number, .. }
            | Self::Text { number, .. }
            | Self::BareOrdinal { number, .. } => number.clone(),
            Self::Disposition { kind, ordinal, .. } => match ordinal {
                Some(n) => format!("{}{n}", kind.code()),
                None => kind.code().to_string(),
            },
        }
    }

    /// Text after the number.
    #[must_use]
    pub fn tail(&self) -> &str {
        match self {
            Self::Numeric { tail, .. }
            | Self::Text { tail, .. }
            | Self::BareOrdinal { tail, .. }
            | Self::Disposition { tail, .. } => tail,
        }
    }
}

/// Recognize a heading, trying each form in priority order.
pub fn parse_heading(text: &str, options: &ExtractionOptions) -> Option<Heading> {
    let text = text.trim();
    if options.include_disposiciones {
        if let Some(heading) = match_disposition(text) {
            return Some(heading);
        }
    }
    match_numeric(text)
        .or_else(|| match_bare_numeric(text))
        .or_else(|| match_ordinal_words(text))
        .or_else(|| match_bare_ordinal(text))
}

fn capture(caps: &regex::Captures<'_>, i: usize) -> String {
    caps.get(i)
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default()
}

/// Number plus optional Latin suffix and sub-number, single-spaced.
fn compose_number(base: &str, suffix: Option<&str>, sub: Option<&str>) -> String {
    let mut number = base.to_string();
    for part in [suffix, sub].into_iter().flatten() {
        number.push(' ');
        number.push_str(&part.to_lowercase());
    }
    number
}

pub fn match_disposition(text: &str) -> Option<Heading> {
    if let Some(caps) = DISPOSITION.captures(text) {
        let kind = DispositionKind::from_word(&capture(&caps, 1))?;
        let word = capture(&caps, 2);
        let ordinal = if is_unica(&word) {
            None
        } else {
            Some(feminine_ordinal_value(&word)?)
        };
        return Some(Heading::Disposition {
            kind,
            ordinal,
            tail: capture(&caps, 3),
        });
    }

    let caps = DISPOSITION_WITHOUT_ORDINAL.captures(text)?;
    Some(Heading::Disposition {
        kind: DispositionKind::from_word(&capture(&caps, 1))?,
        ordinal: None,
        tail: capture(&caps, 2),
    })
}

/// "única" / "unica": the only disposition of its kind.
pub(crate) fn is_unica(word: &str) -> bool {
    matches!(word.to_lowercase().as_str(), "única" | "unica")
}

pub fn match_numeric(text: &str) -> Option<Heading> {
    let caps = NUMERIC.captures(text)?;
    let number = compose_number(
        caps.get(1)?.as_str(),
        caps.get(2).map(|m| m.as_str()),
        caps.get(3).map(|m| m.as_str()),
    );
    Some(Heading::Numeric {
        number,
        tail: capture(&caps, 4),
    })
}

pub fn match_bare_numeric(text: &str) -> Option<Heading> {
    let caps = BARE_NUMERIC.captures(text)?;
    let number = compose_number(caps.get(1)?.as_str(), caps.get(2).map(|m| m.as_str()), None);
    Some(Heading::Numeric {
        number,
        tail: capture(&caps, 3),
    })
}

pub fn match_ordinal_words(text: &str) -> Option<Heading> {
    let caps = ORDINAL_WORDS.captures(text)?;
    let rest = capture(&caps, 1);
    let (ordinal, tail) = match rest.split_once(". ") {
        Some((ordinal, tail)) => (ordinal.to_string(), tail.trim().to_string()),
        None => (rest.trim_end_matches('.').to_string(), String::new()),
    };
    Some(Heading::Text {
        number: spanish_text_to_number(&ordinal)?,
        tail,
    })
}

pub fn match_bare_ordinal(text: &str) -> Option<Heading> {
    let caps = BARE_ORDINAL.captures(text)?;
    Some(Heading::BareOrdinal {
        number: spanish_text_to_number(&capture(&caps, 1))?,
        tail: capture(&caps, 2),
    })
}

/// Split a heading tail into title and leading body text.
///
/// The first `". "` separates them; without one the whole tail is the title.
/// A trailing period is dropped from the title and an empty title is `None`.
#[must_use]
pub fn split_title(tail: &str) -> (Option<String>, Option<String>) {
    let tail = tail.trim();
    let (title, lead) = match tail.split_once(". ") {
        Some((title, lead)) => (title, Some(lead.trim())),
        None => (tail, None),
    };
    let title = title.trim().trim_end_matches('.').trim();
    (
        (!title.is_empty()).then(|| title.to_string()),
        lead.filter(|l| !l.is_empty()).map(str::to_string),
    )
}
