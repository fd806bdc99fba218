use logos::{Lexer, Logos};
use std::fmt;

/// Markup-level tokens.
///
/// Open tags are scanned as a single token (quote-aware up to the closing
/// `>`); their attributes are split afterwards by [`AttrToken`].
#[derive(Logos, Debug, Clone, PartialEq)]
pub enum Token<'src> {
    #[token("<!--", lex_comment)]
    Comment(&'src str),

    /// `<!DOCTYPE ...>`, `<![CDATA[ ... ]>` and friends
    #[regex(r"<![a-zA-Z\[]", lex_declaration)]
    Declaration(&'src str),

    #[token("<?", lex_processing_instruction)]
    ProcessingInstruction(&'src str),

    #[regex(r"<[a-zA-Z][a-zA-Z0-9:_-]*", lex_open_tag)]
    OpenTag(&'src str),

    #[regex(r"</[a-zA-Z][a-zA-Z0-9:_-]*[ \t\r\n]*>", |lex| lex.slice())]
    CloseTag(&'src str),

    #[regex(r"[^<]+", |lex| lex.slice())]
    Text(&'src str),

    /// A `<` that does not start any markup construct
    #[token("<", |lex| lex.slice())]
    Stray(&'src str),
}

/// Tokens inside an open tag, after the tag name.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum AttrToken<'src> {
    /// Attribute name, or an unquoted value when it follows `=`
    #[regex(r#"[^ \t\r\n\f"'>=]+"#, |lex| lex.slice())]
    Word(&'src str),

    #[token("=")]
    Equals,

    #[regex(r#""[^"]*""#, |lex| unquote(lex.slice()))]
    DoubleQuoted(&'src str),

    #[regex(r#"'[^']*'"#, |lex| unquote(lex.slice()))]
    SingleQuoted(&'src str),
}

fn unquote(slice: &str) -> &str {
    &slice[1..slice.len() - 1]
}

fn lex_comment<'s>(lex: &mut Lexer<'s, Token<'s>>) -> &'s str {
    let rest = lex.remainder();
    let consumed = rest.find("-->").map(|end| end + 3).unwrap_or(rest.len());
    lex.bump(consumed);
    lex.slice()
}

fn lex_declaration<'s>(lex: &mut Lexer<'s, Token<'s>>) -> &'s str {
    let rest = lex.remainder();
    let consumed = rest.find('>').map(|end| end + 1).unwrap_or(rest.len());
    lex.bump(consumed);
    lex.slice()
}

fn lex_processing_instruction<'s>(lex: &mut Lexer<'s, Token<'s>>) -> &'s str {
    let rest = lex.remainder();
    let consumed = rest
        .find("?>")
        .map(|end| end + 2)
        .or_else(|| rest.find('>').map(|end| end + 1))
        .unwrap_or(rest.len());
    lex.bump(consumed);
    lex.slice()
}

fn lex_open_tag<'s>(lex: &mut Lexer<'s, Token<'s>>) -> &'s str {
    let rest = lex.remainder();
    let consumed = find_tag_end(rest)
        .or_else(|| rest.find('>'))
        .map(|end| end + 1)
        .unwrap_or(rest.len());
    lex.bump(consumed);
    lex.slice()
}

/// Index of the `>` closing a tag, skipping over quoted attribute values.
fn find_tag_end(rest: &str) -> Option<usize> {
    let mut quote: Option<u8> = None;

    for (idx, byte) in rest.bytes().enumerate() {
        match quote {
            Some(open) if byte == open => quote = None,
            Some(_) => {}
            None => match byte {
                b'"' | b'\'' => quote = Some(byte),
                b'>' => return Some(idx),
                _ => {}
            },
        }
    }

    None
}

impl<'src> fmt::Display for Token<'src> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Comment(_) => write!(f, "comment"),
            Token::Declaration(d) => write!(f, "declaration {}", d),
            Token::ProcessingInstruction(_) => write!(f, "processing instruction"),
            Token::OpenTag(t) => write!(f, "open tag {}", t),
            Token::CloseTag(t) => write!(f, "close tag {}", t),
            Token::Text(_) => write!(f, "text"),
            Token::Stray(_) => write!(f, "'<'"),
        }
    }
}

/// Tokenize a source string
///
/// Bytes the lexer cannot classify are reported as text, so no input is lost.
pub fn tokenize(source: &str) -> Vec<(Token<'_>, std::ops::Range<usize>)> {
    let mut lexer = Token::lexer(source);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        let token = result.unwrap_or_else(|_| Token::Text(lexer.slice()));
        tokens.push((token, lexer.span()));
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<Token<'_>> {
        tokenize(source).into_iter().map(|(token, _)| token).collect()
    }

    #[test]
    fn test_basic_element() {
        let tokens = kinds("<p>Hello</p>");
        assert_eq!(
            tokens,
            vec![
                Token::OpenTag("<p>"),
                Token::Text("Hello"),
                Token::CloseTag("</p>"),
            ]
        );
    }

    #[test]
    fn test_open_tag_with_quoted_gt() {
        let tokens = kinds(r#"<img alt="a > b" src="x.png">"#);
        assert_eq!(tokens, vec![Token::OpenTag(r#"<img alt="a > b" src="x.png">"#)]);
    }

    #[test]
    fn test_comment_and_doctype() {
        let tokens = kinds("<!DOCTYPE html><!-- a <b> -->text");
        assert_eq!(
            tokens,
            vec![
                Token::Declaration("<!DOCTYPE html>"),
                Token::Comment("<!-- a <b> -->"),
                Token::Text("text"),
            ]
        );
    }

    #[test]
    fn test_stray_angle_bracket() {
        let tokens = kinds("a < b");
        assert_eq!(
            tokens,
            vec![Token::Text("a "), Token::Stray("<"), Token::Text(" b")]
        );
    }

    #[test]
    fn test_unterminated_comment_consumes_rest() {
        let tokens = kinds("x<!-- never closed <p>");
        assert_eq!(
            tokens,
            vec![Token::Text("x"), Token::Comment("<!-- never closed <p>")]
        );
    }

    #[test]
    fn test_attribute_tokens() {
        let tokens: Vec<_> =
            AttrToken::lexer(r#" src=images/a.png alt="An image" hidden data-x='1'"#)
                .filter_map(Result::ok)
                .collect();

        assert_eq!(
            tokens,
            vec![
                AttrToken::Word("src"),
                AttrToken::Equals,
                AttrToken::Word("images/a.png"),
                AttrToken::Word("alt"),
                AttrToken::Equals,
                AttrToken::DoubleQuoted("An image"),
                AttrToken::Word("hidden"),
                AttrToken::Word("data-x"),
                AttrToken::Equals,
                AttrToken::SingleQuoted("1"),
            ]
        );
    }
}
