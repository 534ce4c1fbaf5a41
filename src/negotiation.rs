//! Content negotiation over the stored `Accept*` headers
//!
//! Implements quality-value negotiation for media types, charsets,
//! encodings and languages: `q` ordering first, then specificity, then
//! header order, then candidate order. A missing header means everything is
//! acceptable. Candidates are returned exactly as the caller supplied them,
//! so extension shorthands like `"html"` come back as `"html"`.

use mime::Mime;

/// One entry of a parsed `Accept*` header
#[derive(Debug, Clone)]
struct AcceptEntry {
    value: String,
    q: f32,
    index: usize,
}

fn parse_accept(header: &str) -> Vec<AcceptEntry> {
    header
        .split(',')
        .enumerate()
        .filter_map(|(index, part)| {
            let mut pieces = part.trim().split(';');
            let value = pieces.next()?.trim();
            if value.is_empty() {
                return None;
            }
            let mut q = 1.0_f32;
            for piece in pieces {
                let piece = piece.trim();
                if let Some(weight) = piece.strip_prefix("q=").or_else(|| piece.strip_prefix("Q=")) {
                    q = weight.trim().parse().unwrap_or(0.0);
                }
            }
            Some(AcceptEntry {
                value: value.to_string(),
                q,
                index,
            })
        })
        .collect()
}

/// How well a candidate matched an accept entry; higher wins on q ties
type Specificity = u8;

/// Best (q, specificity, entry index) a candidate achieved, if any
#[derive(Debug, Clone, Copy, PartialEq)]
struct Priority {
    q: f32,
    specificity: Specificity,
    index: usize,
}

impl Priority {
    fn beats(&self, other: &Priority) -> bool {
        if self.q != other.q {
            return self.q > other.q;
        }
        if self.specificity != other.specificity {
            return self.specificity > other.specificity;
        }
        self.index < other.index
    }
}

fn best_candidate(
    entries: &[AcceptEntry],
    candidates: &[&str],
    specificity_of: impl Fn(&str, &str) -> Option<Specificity>,
) -> Option<String> {
    let mut best: Option<(usize, Priority)> = None;

    for (candidate_index, candidate) in candidates.iter().enumerate() {
        let mut candidate_best: Option<Priority> = None;
        for entry in entries {
            let Some(specificity) = specificity_of(&entry.value, candidate) else {
                continue;
            };
            let priority = Priority {
                q: entry.q,
                specificity,
                index: entry.index,
            };
            if candidate_best.map_or(true, |current| priority.beats(&current)) {
                candidate_best = Some(priority);
            }
        }

        let Some(priority) = candidate_best else { continue };
        if priority.q <= 0.0 {
            continue;
        }
        // Earlier candidates win ties, so only a strictly better priority
        // displaces the current pick.
        if best
            .as_ref()
            .map_or(true, |(_, current)| priority.beats(current))
        {
            best = Some((candidate_index, priority));
        }
    }

    best.map(|(candidate_index, _)| candidates[candidate_index].to_string())
}

fn preference_list(entries: Vec<AcceptEntry>) -> Vec<String> {
    let mut acceptable: Vec<AcceptEntry> = entries.into_iter().filter(|e| e.q > 0.0).collect();
    acceptable.sort_by(|a, b| {
        b.q.partial_cmp(&a.q)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.index.cmp(&b.index))
    });
    acceptable.into_iter().map(|e| e.value).collect()
}

// --- media types -----------------------------------------------------------

/// Resolve a candidate to `(type, subtype)`, expanding extension shorthands
/// like `"html"` via the shared MIME registry
fn expand_media_candidate(candidate: &str) -> Option<(String, String)> {
    if candidate.contains('/') {
        let mime: Mime = candidate.parse().ok()?;
        let (kind, sub) = mime.essence_str().split_once('/')?;
        return Some((kind.to_ascii_lowercase(), sub.to_ascii_lowercase()));
    }
    let mime = mime_guess::from_ext(candidate).first()?;
    let (kind, sub) = mime.essence_str().split_once('/')?;
    Some((kind.to_ascii_lowercase(), sub.to_ascii_lowercase()))
}

fn media_specificity(entry: &str, candidate: &str) -> Option<Specificity> {
    // Some clients send a bare "*" for "anything".
    let entry = if entry == "*" { "*/*" } else { entry };
    let (entry_kind, entry_sub) = entry.split_once('/')?;
    let entry_kind = entry_kind.trim().to_ascii_lowercase();
    let entry_sub = entry_sub
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase();
    let (kind, sub) = expand_media_candidate(candidate)?;

    let kind_exact = match entry_kind.as_str() {
        "*" => false,
        k if k == kind => true,
        _ => return None,
    };
    let sub_exact = match entry_sub.as_str() {
        "*" => false,
        s if s == sub => true,
        _ => return None,
    };

    Some((kind_exact as u8) * 2 + sub_exact as u8)
}

/// Best acceptable media type among `candidates` for an `Accept` header,
/// or `None` when nothing is acceptable. A missing header accepts anything.
pub fn preferred_media_type(header: Option<&str>, candidates: &[&str]) -> Option<String> {
    let entries = parse_accept(header.unwrap_or("*/*"));
    best_candidate(&entries, candidates, |entry, candidate| {
        media_specificity(entry, candidate)
    })
}

/// Full media type preference list, quality order, as sent by the client
pub fn media_type_preferences(header: Option<&str>) -> Vec<String> {
    preference_list(parse_accept(header.unwrap_or("*/*")))
}

// --- simple token headers (charset / encoding) -----------------------------

fn token_specificity(entry: &str, candidate: &str) -> Option<Specificity> {
    if entry == "*" {
        Some(0)
    } else if entry.eq_ignore_ascii_case(candidate) {
        Some(1)
    } else {
        None
    }
}

/// Best acceptable charset among `candidates` for an `Accept-Charset`
/// header; a missing header accepts anything
pub fn preferred_charset(header: Option<&str>, candidates: &[&str]) -> Option<String> {
    let entries = parse_accept(header.unwrap_or("*"));
    best_candidate(&entries, candidates, token_specificity)
}

/// Full charset preference list, quality order
pub fn charset_preferences(header: Option<&str>) -> Vec<String> {
    preference_list(parse_accept(header.unwrap_or("*")))
}

/// Best acceptable content coding among `candidates` for an
/// `Accept-Encoding` header. `identity` stays acceptable unless the header
/// excludes it explicitly (`identity;q=0`) or via a `*;q=0` wildcard.
pub fn preferred_encoding(header: Option<&str>, candidates: &[&str]) -> Option<String> {
    let entries = parse_accept(header.unwrap_or("*"));
    if let Some(found) = best_candidate(&entries, candidates, token_specificity) {
        return Some(found);
    }

    // Implicit identity fallback.
    let identity_excluded = entries
        .iter()
        .any(|e| (e.value.eq_ignore_ascii_case("identity") || e.value == "*") && e.q <= 0.0);
    if identity_excluded {
        return None;
    }
    candidates
        .iter()
        .find(|c| c.eq_ignore_ascii_case("identity"))
        .map(|c| c.to_string())
}

/// Full content-coding preference list, quality order
pub fn encoding_preferences(header: Option<&str>) -> Vec<String> {
    preference_list(parse_accept(header.unwrap_or("*")))
}

// --- languages -------------------------------------------------------------

fn primary_tag(tag: &str) -> &str {
    tag.split('-').next().unwrap_or(tag)
}

fn language_specificity(entry: &str, candidate: &str) -> Option<Specificity> {
    if entry == "*" {
        Some(0)
    } else if entry.eq_ignore_ascii_case(candidate) {
        Some(4)
    } else if primary_tag(entry).eq_ignore_ascii_case(candidate) {
        // Entry `en-US` covers a plain `en` candidate.
        Some(2)
    } else if entry.eq_ignore_ascii_case(primary_tag(candidate)) {
        // Entry `en` covers an `en-GB` candidate.
        Some(1)
    } else {
        None
    }
}

/// Best acceptable language among `candidates` for an `Accept-Language`
/// header; a missing header accepts anything
pub fn preferred_language(header: Option<&str>, candidates: &[&str]) -> Option<String> {
    let entries = parse_accept(header.unwrap_or("*"));
    best_candidate(&entries, candidates, language_specificity)
}

/// Full language preference list, quality order
pub fn language_preferences(header: Option<&str>) -> Vec<String> {
    preference_list(parse_accept(header.unwrap_or("*")))
}

#[cfg(test)]
mod tests {
    use super::*;

    const BROWSER_ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

    #[test]
    fn test_wildcard_accept_prefers_first_candidate() {
        assert_eq!(
            preferred_media_type(Some("*/*"), &["html", "json"]),
            Some("html".to_string())
        );
    }

    #[test]
    fn test_exact_match_beats_wildcard_quality() {
        // text/html is q=1 while json only matches */*;q=0.8
        assert_eq!(
            preferred_media_type(Some(BROWSER_ACCEPT), &["json", "html"]),
            Some("html".to_string())
        );
    }

    #[test]
    fn test_full_mime_candidates() {
        assert_eq!(
            preferred_media_type(Some(BROWSER_ACCEPT), &["application/xml"]),
            Some("application/xml".to_string())
        );
        assert_eq!(
            preferred_media_type(Some("text/html"), &["image/png"]),
            None
        );
    }

    #[test]
    fn test_zero_quality_excludes() {
        assert_eq!(
            preferred_media_type(Some("text/html;q=0"), &["html"]),
            None
        );
    }

    #[test]
    fn test_missing_accept_header_accepts_anything() {
        assert_eq!(
            preferred_media_type(None, &["json"]),
            Some("json".to_string())
        );
    }

    #[test]
    fn test_media_type_preference_order() {
        assert_eq!(
            media_type_preferences(Some(BROWSER_ACCEPT)),
            vec![
                "text/html".to_string(),
                "application/xhtml+xml".to_string(),
                "application/xml".to_string(),
                "*/*".to_string(),
            ]
        );
        assert_eq!(media_type_preferences(Some("*/*")), vec!["*/*".to_string()]);
    }

    #[test]
    fn test_encodings_against_browser_default() {
        let header = Some("gzip, deflate");
        assert_eq!(preferred_encoding(header, &["zip"]), None);
        assert_eq!(
            preferred_encoding(header, &["gzip"]),
            Some("gzip".to_string())
        );
        assert_eq!(
            preferred_encoding(header, &["deflate"]),
            Some("deflate".to_string())
        );
    }

    #[test]
    fn test_identity_encoding_implicitly_acceptable() {
        assert_eq!(
            preferred_encoding(Some("gzip"), &["identity"]),
            Some("identity".to_string())
        );
        assert_eq!(preferred_encoding(Some("gzip, identity;q=0"), &["identity"]), None);
    }

    #[test]
    fn test_charsets_without_header() {
        assert_eq!(
            preferred_charset(None, &["utf-8"]),
            Some("utf-8".to_string())
        );
    }

    #[test]
    fn test_languages_with_quality_and_prefix() {
        let header = Some("en-US,en;q=0.5");
        assert_eq!(
            preferred_language(header, &["en-US", "fr"]),
            Some("en-US".to_string())
        );
        // `en` still matches via the en-US prefix at full quality.
        assert_eq!(preferred_language(header, &["en"]), Some("en".to_string()));
        assert_eq!(preferred_language(header, &["de"]), None);
        assert_eq!(
            language_preferences(header),
            vec!["en-US".to_string(), "en".to_string()]
        );
    }
}
