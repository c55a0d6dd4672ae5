//! Conversion of Spanish number words to digits.
//!
//! Older consolidated texts number their articles with words ("Artículo
//! vigésimo tercero", "Primero.") and their dispositions with feminine
//! ordinals ("Disposición adicional trigésima segunda"). These tables turn
//! both into plain numbers.

/// Latin suffixes recognized after a number word, as written in headings.
const NUMBER_WORD_SUFFIXES: &[&str] = &[
    "bis", "ter", "quater", "quáter", "quinquies", "sexies", "septies",
];

/// Masculine ordinals, 1st to 20th.
const ORDINALS: &[(&str, u32)] = &[
    ("primero", 1),
    ("segundo", 2),
    ("tercero", 3),
    ("cuarto", 4),
    ("quinto", 5),
    ("sexto", 6),
    ("séptimo", 7),
    ("septimo", 7),
    ("sétimo", 7),
    ("octavo", 8),
    ("noveno", 9),
    ("décimo", 10),
    ("decimo", 10),
    ("undécimo", 11),
    ("undecimo", 11),
    ("decimoprimero", 11),
    ("duodécimo", 12),
    ("duodecimo", 12),
    ("decimosegundo", 12),
    ("decimotercero", 13),
    ("decimocuarto", 14),
    ("decimoquinto", 15),
    ("decimosexto", 16),
    ("decimoséptimo", 17),
    ("decimoseptimo", 17),
    ("decimoctavo", 18),
    ("decimooctavo", 18),
    ("decimonoveno", 19),
    ("decimonono", 19),
    ("vigésimo", 20),
    ("vigesimo", 20),
];

/// Masculine ordinal tens, used in "vigésimo tercero" style compounds.
const ORDINAL_TENS: &[(&str, u32)] = &[
    ("décimo", 10),
    ("decimo", 10),
    ("vigésimo", 20),
    ("vigesimo", 20),
    ("trigésimo", 30),
    ("trigesimo", 30),
    ("cuadragésimo", 40),
    ("cuadragesimo", 40),
    ("quincuagésimo", 50),
    ("quincuagesimo", 50),
    ("sexagésimo", 60),
    ("sexagesimo", 60),
    ("septuagésimo", 70),
    ("septuagesimo", 70),
    ("octogésimo", 80),
    ("octogesimo", 80),
    ("nonagésimo", 90),
    ("nonagesimo", 90),
];

const UNITS: &[(&str, u32)] = &[
    ("uno", 1),
    ("dos", 2),
    ("tres", 3),
    ("cuatro", 4),
    ("cinco", 5),
    ("seis", 6),
    ("siete", 7),
    ("ocho", 8),
    ("nueve", 9),
];

const TEENS: &[(&str, u32)] = &[
    ("diez", 10),
    ("once", 11),
    ("doce", 12),
    ("trece", 13),
    ("catorce", 14),
    ("quince", 15),
    ("dieciséis", 16),
    ("dieciseis", 16),
    ("diecisiete", 17),
    ("dieciocho", 18),
    ("diecinueve", 19),
];

const TWENTIES: &[(&str, u32)] = &[
    ("veinte", 20),
    ("veintiuno", 21),
    ("veintidós", 22),
    ("veintidos", 22),
    ("veintitrés", 23),
    ("veintitres", 23),
    ("veinticuatro", 24),
    ("veinticinco", 25),
    ("veintiséis", 26),
    ("veintiseis", 26),
    ("veintisiete", 27),
    ("veintiocho", 28),
    ("veintinueve", 29),
];

const TENS: &[(&str, u32)] = &[
    ("treinta", 30),
    ("cuarenta", 40),
    ("cincuenta", 50),
    ("sesenta", 60),
    ("setenta", 70),
    ("ochenta", 80),
    ("noventa", 90),
];

const HUNDREDS: &[(&str, u32)] = &[
    ("cien", 100),
    ("ciento", 100),
    ("doscientos", 200),
    ("trescientos", 300),
];

/// Feminine ordinals used by dispositions, 1st to 20th.
const FEMININE_ORDINALS: &[(&str, u32)] = &[
    ("primera", 1),
    ("segunda", 2),
    ("tercera", 3),
    ("cuarta", 4),
    ("quinta", 5),
    ("sexta", 6),
    ("séptima", 7),
    ("septima", 7),
    ("octava", 8),
    ("novena", 9),
    ("décima", 10),
    ("decima", 10),
    ("undécima", 11),
    ("undecima", 11),
    ("decimoprimera", 11),
    ("duodécima", 12),
    ("duodecima", 12),
    ("decimosegunda", 12),
    ("decimotercera", 13),
    ("decimocuarta", 14),
    ("decimoquinta", 15),
    ("decimosexta", 16),
    ("decimoséptima", 17),
    ("decimoseptima", 17),
    ("decimoctava", 18),
    ("decimooctava", 18),
    ("decimonovena", 19),
    ("vigésima", 20),
    ("vigesima", 20),
];

const FEMININE_TENS: &[(&str, u32)] = &[
    ("décima", 10),
    ("decima", 10),
    ("vigésima", 20),
    ("vigesima", 20),
    ("trigésima", 30),
    ("trigesima", 30),
    ("cuadragésima", 40),
    ("cuadragesima", 40),
    ("quincuagésima", 50),
    ("quincuagesima", 50),
    ("sexagésima", 60),
    ("sexagesima", 60),
    ("septuagésima", 70),
    ("septuagesima", 70),
    ("octogésima", 80),
    ("octogesima", 80),
    ("nonagésima", 90),
    ("nonagesima", 90),
];

fn lookup(table: &[(&str, u32)], word: &str) -> Option<u32> {
    table
        .iter()
        .find(|(name, _)| *name == word)
        .map(|(_, value)| *value)
}

/// Lowercase and collapse internal whitespace.
fn canonical_words(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Convert Spanish number words to digits, keeping a trailing Latin suffix.
///
/// Returns `None` for empty input or text no table or compound rule covers.
///
/// # Examples
/// ```
/// use boe_harvester::ordinal::spanish_text_to_number;
///
/// assert_eq!(spanish_text_to_number("primero").as_deref(), Some("1"));
/// assert_eq!(spanish_text_to_number("Treinta y dos").as_deref(), Some("32"));
/// assert_eq!(spanish_text_to_number("ciento uno").as_deref(), Some("101"));
/// assert_eq!(spanish_text_to_number("primero bis").as_deref(), Some("1 bis"));
/// assert_eq!(spanish_text_to_number("xyz"), None);
/// ```
#[must_use]
pub fn spanish_text_to_number(text: &str) -> Option<String> {
    let cleaned = canonical_words(text.trim_end_matches(|c: char| c == '.' || c.is_whitespace()));
    if cleaned.is_empty() {
        return None;
    }

    let (base, suffix) = split_suffix(&cleaned);
    let value = words_to_number(base)?;

    Some(match suffix {
        Some(suffix) => format!("{value} {suffix}"),
        None => value.to_string(),
    })
}

/// Split a trailing Latin suffix word off already-lowercased text.
fn split_suffix(text: &str) -> (&str, Option<&str>) {
    if let Some((base, last)) = text.rsplit_once(' ') {
        if NUMBER_WORD_SUFFIXES.contains(&last) {
            return (base, Some(last));
        }
    }
    (text, None)
}

/// Resolve lowercased, single-spaced number words to a value.
fn words_to_number(text: &str) -> Option<u32> {
    for table in [ORDINALS, UNITS, TEENS, TWENTIES, TENS, HUNDREDS, ORDINAL_TENS] {
        if let Some(value) = lookup(table, text) {
            return Some(value);
        }
    }

    // "treinta y dos"
    if let Some((tens, unit)) = text.split_once(" y ") {
        if let (Some(t), Some(u)) = (lookup(TENS, tens), lookup(UNITS, unit)) {
            return Some(t + u);
        }
    }

    if let Some((head, rest)) = text.split_once(' ') {
        // "ciento uno", "doscientos treinta y dos"
        if let Some(hundreds) = lookup(HUNDREDS, head) {
            return words_to_number(rest).map(|r| hundreds + r);
        }

        // "vigésimo tercero"
        if let (Some(tens), Some(unit)) = (lookup(ORDINAL_TENS, head), lookup(ORDINALS, rest)) {
            if unit < 10 {
                return Some(tens + unit);
            }
        }
    }

    None
}

/// Value of a feminine ordinal as used in disposition headings.
///
/// Supports tens+unit compounds ("vigésima primera" is 21). "única" is not
/// a number and yields `None`.
///
/// # Examples
/// ```
/// use boe_harvester::ordinal::feminine_ordinal_value;
///
/// assert_eq!(feminine_ordinal_value("Primera"), Some(1));
/// assert_eq!(feminine_ordinal_value("vigésima primera"), Some(21));
/// assert_eq!(feminine_ordinal_value("única"), None);
/// ```
#[must_use]
pub fn feminine_ordinal_value(text: &str) -> Option<u32> {
    let words = canonical_words(text);
    if let Some(value) = lookup(FEMININE_ORDINALS, &words) {
        return Some(value);
    }
    if let Some(value) = lookup(FEMININE_TENS, &words) {
        return Some(value);
    }

    let (tens, unit) = words.split_once(' ')?;
    let tens = lookup(FEMININE_TENS, tens)?;
    let unit = lookup(FEMININE_ORDINALS, unit).filter(|u| *u < 10)?;
    Some(tens + unit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordinal_table() {
        assert_eq!(spanish_text_to_number("primero").as_deref(), Some("1"));
        assert_eq!(spanish_text_to_number("Séptimo").as_deref(), Some("7"));
        assert_eq!(spanish_text_to_number("undécimo").as_deref(), Some("11"));
        assert_eq!(spanish_text_to_number("decimoctavo").as_deref(), Some("18"));
        assert_eq!(spanish_text_to_number("vigésimo").as_deref(), Some("20"));
    }

    #[test]
    fn test_every_ordinal_entry_converts() {
        for (word, value) in ORDINALS {
            assert_eq!(
                spanish_text_to_number(word),
                Some(value.to_string()),
                "ordinal {word}"
            );
        }
    }

    #[test]
    fn test_every_cardinal_entry_converts() {
        for table in [UNITS, TEENS, TWENTIES, TENS, HUNDREDS, ORDINAL_TENS] {
            for (word, value) in table {
                assert_eq!(
                    spanish_text_to_number(word),
                    Some(value.to_string()),
                    "table entry {word}"
                );
            }
        }
    }

    #[test]
    fn test_cardinal_tables() {
        assert_eq!(spanish_text_to_number("cinco").as_deref(), Some("5"));
        assert_eq!(spanish_text_to_number("catorce").as_deref(), Some("14"));
        assert_eq!(spanish_text_to_number("veintidós").as_deref(), Some("22"));
        assert_eq!(spanish_text_to_number("noventa").as_deref(), Some("90"));
        assert_eq!(spanish_text_to_number("trescientos").as_deref(), Some("300"));
    }

    #[test]
    fn test_tens_and_units_compound() {
        assert_eq!(spanish_text_to_number("treinta y dos").as_deref(), Some("32"));
        assert_eq!(spanish_text_to_number("Cuarenta  y  nueve").as_deref(), Some("49"));
        assert_eq!(spanish_text_to_number("treinta y veinte"), None);
    }

    #[test]
    fn test_hundreds_compound() {
        assert_eq!(spanish_text_to_number("ciento uno").as_deref(), Some("101"));
        assert_eq!(
            spanish_text_to_number("doscientos treinta y dos").as_deref(),
            Some("232")
        );
        assert_eq!(spanish_text_to_number("ciento xyz"), None);
    }

    #[test]
    fn test_ordinal_tens_compound() {
        assert_eq!(spanish_text_to_number("vigésimo tercero").as_deref(), Some("23"));
        assert_eq!(spanish_text_to_number("trigésimo primero").as_deref(), Some("31"));
        assert_eq!(spanish_text_to_number("trigésimo").as_deref(), Some("30"));
    }

    #[test]
    fn test_suffix_preserved() {
        assert_eq!(spanish_text_to_number("primero bis").as_deref(), Some("1 bis"));
        assert_eq!(spanish_text_to_number("Segundo TER.").as_deref(), Some("2 ter"));
        assert_eq!(spanish_text_to_number("bis"), None);
    }

    #[test]
    fn test_trailing_periods_stripped() {
        assert_eq!(spanish_text_to_number("Tercero.").as_deref(), Some("3"));
        assert_eq!(spanish_text_to_number("  cuarto . ").as_deref(), Some("4"));
    }

    #[test]
    fn test_unrecognized() {
        assert_eq!(spanish_text_to_number("xyz"), None);
        assert_eq!(spanish_text_to_number(""), None);
        assert_eq!(spanish_text_to_number("   "), None);
        assert_eq!(spanish_text_to_number("único"), None);
    }

    #[test]
    fn test_feminine_ordinals() {
        assert_eq!(feminine_ordinal_value("primera"), Some(1));
        assert_eq!(feminine_ordinal_value("Décima"), Some(10));
        assert_eq!(feminine_ordinal_value("decimotercera"), Some(13));
        assert_eq!(feminine_ordinal_value("vigésima primera"), Some(21));
        assert_eq!(feminine_ordinal_value("trigésima segunda"), Some(32));
        assert_eq!(feminine_ordinal_value("cuadragésima"), Some(40));
        assert_eq!(feminine_ordinal_value("vigésima undécima"), None);
        assert_eq!(feminine_ordinal_value("única"), None);
    }
}
