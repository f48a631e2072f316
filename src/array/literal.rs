//! # Array Literal Rendering and Parsing
//!
//! PostgreSQL-compatible brace-delimited array literals, working on raw
//! element strings. Type-aware conversion happens a layer above, in
//! [`crate::array::ArrayType`]; this module only knows the grammar.
//!
//! ## Grammar
//!
//! ```text
//! literal  := '{' [ element ( ',' element )* ] '}'
//! element  := 'null'                    -- SQL NULL at this position
//!           | '"' quoted-text '"'       -- \" and \\ are the only escapes
//!           | bare-text                 -- until ',' / '}' / whitespace
//! ```
//!
//! The quoting rule is the database's array-literal rule, not a
//! source-language string rule: inside quotes only `\` and `"` are escaped,
//! every other character stands for itself.
//!
//! ## Shapes Preserved
//!
//! | Input | Result |
//! |-------|--------|
//! | `null` (whole input) | absent array |
//! | `{}` | empty, non-null array |
//! | `{null}` | one NULL element |
//! | `{""}` | one present, empty element |
//! | `{"null"}` | one present element spelled n-u-l-l |
//!
//! An unquoted `null` token is always the NULL marker. A producer that means
//! the four-character text must quote it.

use eyre::{bail, ensure, Result};

/// Renders element strings into a brace literal. `None` elements become the
/// bare `null` token.
///
/// `always_quote` forces double quotes around every present element (the rule
/// for text-like element types). When false, quotes are still added for any
/// text the grammar could misread bare: empty strings, the word `null`, or
/// text containing braces, commas, quotes, backslashes, or whitespace.
pub fn render_literal(elements: &[Option<&str>], always_quote: bool) -> String {
    let mut out = String::with_capacity(elements.len() * 8 + 2);
    out.push('{');
    let mut first = true;
    for element in elements {
        if !first {
            out.push(',');
        }
        first = false;
        match element {
            None => out.push_str("null"),
            Some(text) => {
                if always_quote || needs_quoting(text) {
                    out.push('"');
                    for c in text.chars() {
                        if c == '\\' || c == '"' {
                            out.push('\\');
                        }
                        out.push(c);
                    }
                    out.push('"');
                } else {
                    out.push_str(text);
                }
            }
        }
    }
    out.push('}');
    out
}

fn needs_quoting(text: &str) -> bool {
    text.is_empty()
        || text.eq_ignore_ascii_case("null")
        || text
            .chars()
            .any(|c| matches!(c, '{' | '}' | ',' | '"' | '\\') || c.is_whitespace())
}

/// Parses a brace literal into raw element strings, `None` marking NULL
/// elements. The whole-input token `null` yields `None` (absent array).
///
/// Single pass with an in-quote flag; fails fast on the first malformed
/// character and never returns a partial result.
pub fn parse_literal(input: &str) -> Result<Option<Vec<Option<String>>>> {
    let trimmed = input.trim();
    if trimmed == "null" {
        return Ok(None);
    }
    ensure!(
        trimmed.starts_with('{') && trimmed.ends_with('}') && trimmed.len() >= 2,
        "malformed array literal: first and last character must be {{ and }}"
    );

    let chars: Vec<char> = trimmed.chars().collect();
    let end = chars.len() - 1;
    let mut elements: Vec<Option<String>> = Vec::new();
    // Set once an element has been committed since the last separator, so a
    // following comma does not also commit a phantom null.
    let mut committed = false;
    let mut i = 1;

    while i < end {
        let c = chars[i];
        if c == '"' {
            let (text, next) = scan_quoted(&chars, i + 1, end)?;
            elements.push(Some(text));
            committed = true;
            i = next;
        } else if c.is_whitespace() {
            i += 1;
        } else if c == ',' {
            if !committed {
                // no value between separators means null
                elements.push(None);
            }
            committed = false;
            i += 1;
        } else {
            ensure!(
                !committed,
                "malformed array literal: neither whitespace, comma, array end, nor null found"
            );
            let (token, next) = scan_bare(&chars, i, end);
            ensure!(
                next >= end || chars[next] != '"',
                "malformed array literal: neither whitespace, comma, array end, nor null found"
            );
            if token == "null" {
                elements.push(None);
            } else {
                elements.push(Some(token));
            }
            committed = true;
            i = next;
        }
    }

    Ok(Some(elements))
}

/// Scans a double-quoted element body starting just past the opening quote.
/// Returns the unescaped text and the index just past the closing quote.
fn scan_quoted(chars: &[char], mut i: usize, end: usize) -> Result<(String, usize)> {
    let mut text = String::new();
    while i < end {
        match chars[i] {
            '"' => return Ok((text, i + 1)),
            '\\' if i + 1 < end && (chars[i + 1] == '\\' || chars[i + 1] == '"') => {
                text.push(chars[i + 1]);
                i += 2;
            }
            c => {
                text.push(c);
                i += 1;
            }
        }
    }
    bail!("malformed array literal: unterminated quoted element")
}

/// Scans a bare (unquoted) element token. Ends before `,`, `"`, the closing
/// brace, or whitespace.
fn scan_bare(chars: &[char], mut i: usize, end: usize) -> (String, usize) {
    let mut token = String::new();
    while i < end && chars[i] != ',' && chars[i] != '"' && !chars[i].is_whitespace() {
        token.push(chars[i]);
        i += 1;
    }
    (token, i)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn some(s: &str) -> Option<String> {
        Some(s.to_string())
    }

    #[test]
    fn empty_literal_is_empty_non_null_array() {
        assert_eq!(parse_literal("{}").unwrap(), Some(vec![]));
        assert_eq!(parse_literal("  { }  ").unwrap(), Some(vec![]));
    }

    #[test]
    fn bare_null_input_is_absent_array() {
        assert_eq!(parse_literal("null").unwrap(), None);
        assert_eq!(parse_literal("  null ").unwrap(), None);
    }

    #[test]
    fn missing_braces_fail() {
        assert!(parse_literal("1,2,3").is_err());
        assert!(parse_literal("{1,2,3").is_err());
        assert!(parse_literal("1,2,3}").is_err());
        assert!(parse_literal("").is_err());
    }

    #[test]
    fn bare_tokens_and_nulls() {
        assert_eq!(
            parse_literal("{1,null,3}").unwrap(),
            Some(vec![some("1"), None, some("3")])
        );
        assert_eq!(
            parse_literal("{55,12,null,616}").unwrap(),
            Some(vec![some("55"), some("12"), None, some("616")])
        );
    }

    #[test]
    fn quoted_null_text_stays_text() {
        assert_eq!(
            parse_literal(r#"{"512","",null,"null"}"#).unwrap(),
            Some(vec![some("512"), some(""), None, some("null")])
        );
    }

    #[test]
    fn empty_between_commas_is_null() {
        assert_eq!(parse_literal("{,}").unwrap(), Some(vec![None]));
        assert_eq!(
            parse_literal(r#"{"a",,"b"}"#).unwrap(),
            Some(vec![some("a"), None, some("b")])
        );
        // the closing brace commits nothing; a trailing comma is ignored
        assert_eq!(parse_literal(r#"{"a",}"#).unwrap(), Some(vec![some("a")]));
    }

    #[test]
    fn escapes_unescape() {
        assert_eq!(
            parse_literal(r#"{"a\"b","c\\d"}"#).unwrap(),
            Some(vec![some("a\"b"), some("c\\d")])
        );
    }

    #[test]
    fn non_escape_backslash_is_literal() {
        // only \" and \\ are escapes; any other backslash stands for itself
        assert_eq!(parse_literal(r#"{"a\nb"}"#).unwrap(), Some(vec![some("a\\nb")]));
    }

    #[test]
    fn whitespace_outside_quotes_is_skipped() {
        assert_eq!(
            parse_literal("{ 1 , null , 3 }").unwrap(),
            Some(vec![some("1"), None, some("3")])
        );
    }

    #[test]
    fn unterminated_quote_fails() {
        assert!(parse_literal(r#"{"abc}"#).is_err());
    }

    #[test]
    fn bare_text_after_committed_element_fails() {
        let err = parse_literal(r#"{"a"b}"#).unwrap_err();
        assert!(err.to_string().contains("neither whitespace, comma"));
    }

    #[test]
    fn quote_inside_bare_token_fails() {
        assert!(parse_literal(r#"{ab"cd"}"#).is_err());
    }

    #[test]
    fn render_quotes_text_elements() {
        let elems = [Some("512"), Some(""), None, Some("null")];
        assert_eq!(
            render_literal(&elems, true),
            r#"{"512","",null,"null"}"#
        );
    }

    #[test]
    fn render_leaves_numeric_tokens_bare() {
        let elems = [Some("55"), Some("12"), None, Some("616")];
        assert_eq!(render_literal(&elems, false), "{55,12,null,616}");
    }

    #[test]
    fn render_escapes_quotes_and_backslashes() {
        let elems = [Some(r#"say "hi""#), Some(r"back\slash")];
        assert_eq!(
            render_literal(&elems, true),
            r#"{"say \"hi\"","back\\slash"}"#
        );
    }

    #[test]
    fn render_quotes_tricky_bare_text_even_unforced() {
        // empty, the word null, and whitespace would all misparse bare
        let elems = [Some(""), Some("null"), Some("a b")];
        assert_eq!(render_literal(&elems, false), r#"{"","null","a b"}"#);
    }

    #[test]
    fn round_trip_mixed() {
        let elems = vec![
            Some("plain".to_string()),
            None,
            Some("with \"quotes\"".to_string()),
            Some("".to_string()),
            Some("null".to_string()),
            Some("back\\slash".to_string()),
        ];
        let refs: Vec<Option<&str>> = elems.iter().map(|e| e.as_deref()).collect();
        let text = render_literal(&refs, true);
        assert_eq!(parse_literal(&text).unwrap(), Some(elems));
    }
}
