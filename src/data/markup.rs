//! Character reference decoding for question text.
//!
//! Trivia services deliver text HTML-encoded (`&quot;`, `&#039;`,
//! `&atilde;`). Those references are turned into the characters they stand
//! for using the full HTML5 named-reference table; any other markup is left
//! exactly as delivered.

/// Replace character references with the characters they denote.
///
/// Unknown references are kept verbatim.
pub fn decode_entities(text: &str) -> String {
    html_escape::decode_html_entities(text).into_owned()
}
