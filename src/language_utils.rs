use anyhow::{Result, anyhow};
use isolang::Language;

/// Language utilities for ISO language code handling
///
/// ISO 639-2 assigns two three-letter codes to twenty languages: a
/// bibliographic (B) code and a terminology (T) code. Everywhere else the
/// two are identical. These helpers classify and normalize codes so that
/// lookups can accept any of the forms.
/// Language code type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageCodeType {
    /// ISO 639-1 (2-letter) code
    Part1,
    /// ISO 639-2/T (3-letter) code
    Part2T,
    /// ISO 639-2/B (3-letter) code
    Part2B,
}

/// ISO 639-2 codes whose bibliographic form differs from the terminology form
const BIBLIOGRAPHIC_PAIRS: &[(&str, &str)] = &[
    ("alb", "sqi"), // Albanian
    ("arm", "hye"), // Armenian
    ("baq", "eus"), // Basque
    ("bur", "mya"), // Burmese
    ("chi", "zho"), // Chinese
    ("cze", "ces"), // Czech
    ("dut", "nld"), // Dutch
    ("fre", "fra"), // French
    ("geo", "kat"), // Georgian
    ("ger", "deu"), // German
    ("gre", "ell"), // Greek
    ("ice", "isl"), // Icelandic
    ("mac", "mkd"), // Macedonian
    ("mao", "mri"), // Maori
    ("may", "msa"), // Malay
    ("per", "fas"), // Persian
    ("rum", "ron"), // Romanian
    ("slo", "slk"), // Slovak
    ("tib", "bod"), // Tibetan
    ("wel", "cym"), // Welsh
];

/// Terminology code for a bibliographic code that differs from it
pub fn terminology_for_bibliographic(code: &str) -> Option<&'static str> {
    BIBLIOGRAPHIC_PAIRS
        .iter()
        .find(|(b, _)| *b == code)
        .map(|(_, t)| *t)
}

/// Bibliographic code for a terminology code that differs from it
pub fn bibliographic_for_terminology(code: &str) -> Option<&'static str> {
    BIBLIOGRAPHIC_PAIRS
        .iter()
        .find(|(_, t)| *t == code)
        .map(|(b, _)| *b)
}

/// Validate if a language code is a valid ISO 639-1 or ISO 639-2 code
pub fn validate_language_code(code: &str) -> Result<LanguageCodeType> {
    let normalized_code = code.trim().to_lowercase();

    if normalized_code.len() == 2 {
        if Language::from_639_1(&normalized_code).is_some() {
            return Ok(LanguageCodeType::Part1);
        }
    } else if normalized_code.len() == 3 {
        if terminology_for_bibliographic(&normalized_code).is_some() {
            return Ok(LanguageCodeType::Part2B);
        }

        if Language::from_639_3(&normalized_code).is_some() {
            return Ok(LanguageCodeType::Part2T);
        }
    }

    Err(anyhow!("Invalid language code: {}", code))
}

/// Normalize a language code to ISO 639-2/T (3-letter) format
pub fn normalize_to_part2t(code: &str) -> Result<String> {
    let normalized_code = code.trim().to_lowercase();

    match validate_language_code(&normalized_code)? {
        LanguageCodeType::Part1 => Language::from_639_1(&normalized_code)
            .map(|lang| lang.to_639_3().to_string())
            .ok_or_else(|| anyhow!("Cannot normalize invalid language code: {}", code)),
        LanguageCodeType::Part2B => terminology_for_bibliographic(&normalized_code)
            .map(str::to_string)
            .ok_or_else(|| anyhow!("Cannot normalize invalid language code: {}", code)),
        LanguageCodeType::Part2T => Ok(normalized_code),
    }
}

/// ISO 639-3 code that `isolang` associates with an ISO 639-1 code
///
/// For the languages in ISO 639-2 this matches the terminology code, so
/// a mismatch in seed data points at a bad `alpha2`.
pub fn expected_terminology_for_alpha2(alpha2: &str) -> Option<&'static str> {
    Language::from_639_1(&alpha2.trim().to_lowercase()).map(|lang| lang.to_639_3())
}

/// Check if two language codes match (represent the same language)
pub fn language_codes_match(code1: &str, code2: &str) -> bool {
    match (normalize_to_part2t(code1), normalize_to_part2t(code2)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// English name `isolang` knows for a code
pub fn get_language_name(code: &str) -> Result<String> {
    let normalized = normalize_to_part2t(code)?;
    let lang = Language::from_639_3(&normalized)
        .ok_or_else(|| anyhow!("Failed to get language from code: {}", normalized))?;

    Ok(lang.to_name().to_string())
}
