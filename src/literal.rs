//! Filter-literal token parsing.
//!
//! The filter expression compiler hands each constant to the type system as a
//! raw token. This module classifies a token with a PEST grammar (quoted
//! string, character constant, number) and provides the C-style escape
//! decoding/encoding that makes displayed values round-trip as filter
//! literals.

use pest::Parser;
use pest_derive::Parser as PestParser;

use crate::error::FieldTypeError;

#[derive(PestParser)]
#[grammar = "grammar.pest"]
struct LiteralParser;

/// A classified filter-literal token.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Double-quoted string with escapes already decoded.
    QuotedString(String),
    /// Character constant (`'a'`, `'\n'`, `'\x41'`) decoded to its code point.
    CharConst(u32),
    /// Decimal, `0x` hex, or leading-`0` octal number, kept as text so each
    /// kind can apply its own bounds.
    Number(String),
    /// Anything else. String kinds take bare tokens verbatim.
    Bare(String),
}

/// Classify one filter token.
///
/// A token that starts like a quoted string or character constant but does
/// not parse as one is an error; everything else that the grammar rejects is
/// a bare word.
pub fn classify(token: &str) -> Result<Token, FieldTypeError> {
    let mut pairs = match LiteralParser::parse(Rule::token, token) {
        Ok(pairs) => pairs,
        Err(_) if token.starts_with('"') => {
            return Err(FieldTypeError::ParseFailure(format!(
                "{token} is not a valid string literal"
            )));
        }
        Err(_) if token.starts_with('\'') => {
            return Err(FieldTypeError::ParseFailure(format!(
                "{token} is not a valid character constant"
            )));
        }
        Err(_) => return Ok(Token::Bare(token.to_string())),
    };
    let pair = pairs
        .next()
        .ok_or_else(|| FieldTypeError::ParseFailure("empty literal".to_string()))?;
    match pair.as_rule() {
        Rule::string_token => {
            let inner = pair.into_inner().next().map(|p| p.as_str()).unwrap_or("");
            Ok(Token::QuotedString(unescape(inner)?))
        }
        Rule::char_token => {
            let inner = pair.into_inner().next().map(|p| p.as_str()).unwrap_or("");
            Ok(Token::CharConst(decode_char_constant(inner)?))
        }
        Rule::number_token => Ok(Token::Number(pair.as_str().to_string())),
        _ => Ok(Token::Bare(token.to_string())),
    }
}

/// Decode a quoted string token (quotes included) to its value.
pub fn parse_quoted(token: &str) -> Result<String, FieldTypeError> {
    match classify(token)? {
        Token::QuotedString(s) => Ok(s),
        _ => Err(FieldTypeError::ParseFailure(format!(
            "{token} is not a valid string literal"
        ))),
    }
}

fn decode_char_constant(inner: &str) -> Result<u32, FieldTypeError> {
    let decoded = unescape(inner)?;
    let mut chars = decoded.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c as u32),
        _ => Err(FieldTypeError::ParseFailure(format!(
            "'{inner}' is not a valid character constant"
        ))),
    }
}

/// Decode C-style escapes in the body of a string or character literal.
pub fn unescape(s: &str) -> Result<String, FieldTypeError> {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            None => {
                return Err(FieldTypeError::ParseFailure(
                    "trailing backslash in literal".to_string(),
                ));
            }
            Some('\\') => out.push('\\'),
            Some('"') => out.push('"'),
            Some('\'') => out.push('\''),
            Some('a') => out.push('\x07'),
            Some('b') => out.push('\x08'),
            Some('f') => out.push('\x0c'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('v') => out.push('\x0b'),
            Some('x') => {
                let mut value: u32 = 0;
                let mut digits = 0;
                while digits < 2 {
                    match chars.peek().and_then(|d| d.to_digit(16)) {
                        Some(d) => {
                            value = value * 16 + d;
                            chars.next();
                            digits += 1;
                        }
                        None => break,
                    }
                }
                if digits == 0 {
                    return Err(FieldTypeError::ParseFailure(
                        "\\x with no following hex digits".to_string(),
                    ));
                }
                out.push(char::from_u32(value).unwrap_or('\u{fffd}'));
            }
            Some(d @ '0'..='7') => {
                let mut value = d.to_digit(8).unwrap_or(0);
                let mut digits = 1;
                while digits < 3 {
                    match chars.peek().and_then(|d| d.to_digit(8)) {
                        Some(d) => {
                            value = value * 8 + d;
                            chars.next();
                            digits += 1;
                        }
                        None => break,
                    }
                }
                out.push(char::from_u32(value).unwrap_or('\u{fffd}'));
            }
            Some(other) => {
                return Err(FieldTypeError::ParseFailure(format!(
                    "invalid escape sequence \\{other}"
                )));
            }
        }
    }
    Ok(out)
}

/// Render a string as a quoted filter literal, escaping quotes, backslashes
/// and control characters so that [`parse_quoted`] reproduces the value.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            c if (c as u32) < 0x20 || (c as u32) == 0x7f => {
                out.push_str(&format!("\\x{:02x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Parse an unsigned number with C-style base detection.
pub fn parse_unsigned(s: &str) -> Result<u64, FieldTypeError> {
    let t = s.strip_prefix('+').unwrap_or(s);
    if let Some(neg) = t.strip_prefix('-') {
        if neg.chars().all(|c| c == '0') && !neg.is_empty() {
            return Ok(0);
        }
        return Err(FieldTypeError::SizeViolation(format!(
            "\"{s}\" too small for this field, minimum 0"
        )));
    }
    let (digits, radix) = split_base(t);
    u64::from_str_radix(digits, radix)
        .map_err(|_| FieldTypeError::ParseFailure(format!("\"{s}\" is not a valid number")))
}

/// Parse a signed number with C-style base detection.
pub fn parse_signed(s: &str) -> Result<i64, FieldTypeError> {
    let (negative, t) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };
    let (digits, radix) = split_base(t);
    let magnitude = u64::from_str_radix(digits, radix)
        .map_err(|_| FieldTypeError::ParseFailure(format!("\"{s}\" is not a valid number")))?;
    if negative {
        if magnitude > i64::MAX as u64 + 1 {
            return Err(FieldTypeError::SizeViolation(format!(
                "\"{s}\" too small for this field, minimum {}",
                i64::MIN
            )));
        }
        Ok((magnitude as i128).wrapping_neg() as i64)
    } else {
        if magnitude > i64::MAX as u64 {
            return Err(FieldTypeError::SizeViolation(format!(
                "\"{s}\" too big for this field, maximum {}",
                i64::MAX
            )));
        }
        Ok(magnitude as i64)
    }
}

fn split_base(t: &str) -> (&str, u32) {
    if let Some(hex) = t.strip_prefix("0x").or_else(|| t.strip_prefix("0X")) {
        (hex, 16)
    } else if t.len() > 1 && t.starts_with('0') {
        (&t[1..], 8)
    } else {
        (t, 10)
    }
}
