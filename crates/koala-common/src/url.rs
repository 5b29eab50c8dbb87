//! URL helpers.
//!
//! [URL Standard](https://url.spec.whatwg.org/)

/// [URL Standard § 4.4 URL parsing](https://url.spec.whatwg.org/#concept-url-fragment)
///
/// "A URL's fragment is either null or an ASCII string that can be used for
/// further processing on the resource the URL's other components identify."
///
/// Returns the fragment of `url` without its leading `#`, or an empty string
/// when the URL has no fragment.
///
/// NOTE: Percent-decoding is not applied; the fragment is returned as written.
#[must_use]
pub fn fragment(url: &str) -> &str {
    url.split_once('#').map_or("", |(_, fragment)| fragment)
}

/// Returns `url` with any fragment removed.
#[must_use]
pub fn strip_fragment(url: &str) -> &str {
    url.split_once('#').map_or(url, |(base, _)| base)
}
