//! Mapping from a datasport results page URL to its JSON export.

use url::Url;

use crate::error::{ChartError, ChartResult};

const RESULTS_HOST: &str = "wyniki.datasport.pl";
const RESULTS_PREFIX: &str = "results";

/// Maps `https://wyniki.datasport.pl/results<N>/<anything>` to
/// `https://wyniki.datasport.pl/results<N>/results.json`.
///
/// The first whitespace-separated token that is such a URL wins, so a link
/// pasted together with surrounding text is accepted. The scheme may be
/// `http` or `https` and the `results` prefix matches case-insensitively. A
/// `/` after the results id is required.
pub fn results_json_url(text: &str) -> ChartResult<String> {
    text.split_whitespace()
        .find_map(results_base)
        .map(|base| format!("{base}/results.json"))
        .ok_or_else(|| ChartError::InvalidSourceUrl(text.trim().to_owned()))
}

fn results_base(candidate: &str) -> Option<String> {
    let parsed = Url::parse(candidate).ok()?;
    if !matches!(parsed.scheme(), "http" | "https")
        || parsed.host_str() != Some(RESULTS_HOST)
        || parsed.port().is_some()
    {
        return None;
    }

    let mut segments = parsed.path_segments()?;
    let id = segments.next()?;
    segments.next()?;

    let prefix = id.get(..RESULTS_PREFIX.len())?;
    let digits = &id[RESULTS_PREFIX.len()..];
    if !prefix.eq_ignore_ascii_case(RESULTS_PREFIX)
        || digits.is_empty()
        || !digits.bytes().all(|byte| byte.is_ascii_digit())
    {
        return None;
    }

    Some(format!("{}://{RESULTS_HOST}/{id}", parsed.scheme()))
}

/// Extracts `results<N>` from anywhere in `url`.
#[must_use]
pub fn extract_results_id(url: &str) -> Option<String> {
    let lower = url.to_ascii_lowercase();
    let mut search_from = 0;
    while let Some(found) = lower[search_from..].find("results") {
        let digits_start = search_from + found + "results".len();
        let digits: String = lower[digits_start..]
            .chars()
            .take_while(char::is_ascii_digit)
            .collect();
        if !digits.is_empty() {
            return Some(format!("results{digits}"));
        }
        search_from = digits_start;
    }
    None
}
