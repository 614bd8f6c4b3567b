/*!
 * Slug derivation for catalog records.
 *
 * Names are folded to ASCII through NFKD decomposition, stripped of
 * punctuation and joined with hyphens. Entities that require unique slugs
 * resolve collisions by appending `-2`, `-3`, and so on.
 */

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

static DISALLOWED_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\w\s-]").expect("valid slug regex"));

static SEPARATOR_RUNS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[-\s]+").expect("valid separator regex"));

/// Separator placed between a slug and its collision index
const INDEX_SEPARATOR: char = '-';

/// First index tried after the bare slug is taken
const FIRST_INDEX: usize = 2;

/// Convert a display name into a URL-safe slug.
///
/// `"Côte d'Ivoire"` becomes `"cote-divoire"`. Characters with no ASCII
/// decomposition are dropped, so the result may be empty.
pub fn slugify(name: &str) -> String {
    let ascii: String = name.nfkd().filter(char::is_ascii).collect();
    let cleaned = DISALLOWED_CHARS.replace_all(&ascii, "");
    let lowered = cleaned.trim().to_lowercase();
    let joined = SEPARATOR_RUNS.replace_all(&lowered, "-");

    joined.trim_matches(|c| c == '-' || c == '_').to_string()
}

/// Truncate a slug to `max_len` bytes without leaving a trailing hyphen.
///
/// Slugs are ASCII, so any byte offset is a character boundary.
pub fn crop_slug(slug: &str, max_len: usize) -> String {
    if slug.len() <= max_len {
        return slug.to_string();
    }

    slug[..max_len].trim_end_matches(INDEX_SEPARATOR).to_string()
}

/// Find the first slug derived from `base` that `is_taken` reports free.
///
/// Tries `base` itself, then `base-2`, `base-3`, ... cropping `base` so the
/// suffixed result still fits in `max_len`.
pub fn unique_slug<F, E>(base: &str, max_len: usize, mut is_taken: F) -> Result<String, E>
where
    F: FnMut(&str) -> Result<bool, E>,
{
    let base = crop_slug(base, max_len);
    if !is_taken(&base)? {
        return Ok(base);
    }

    let mut index = FIRST_INDEX;
    loop {
        let suffix = format!("{}{}", INDEX_SEPARATOR, index);
        let room = max_len.saturating_sub(suffix.len());
        let candidate = format!("{}{}", crop_slug(&base, room), suffix);

        if !is_taken(&candidate)? {
            return Ok(candidate);
        }
        index += 1;
    }
}

/// Slug for `name`, or `fallback` when the name has no sluggable characters
pub fn slug_or(name: &str, fallback: &str, max_len: usize) -> String {
    let slug = slugify(name);
    if slug.is_empty() {
        crop_slug(fallback, max_len)
    } else {
        crop_slug(&slug, max_len)
    }
}
