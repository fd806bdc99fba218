use crate::entities::decode_entities;
use crate::error::{ParseDiagnostic, ParseError, ParseResult};
use crate::raw::{RawElement, RawNode};
use crate::tokenizer::{AttrToken, Token};
use logos::Logos;
use std::ops::Range;
use tracing::{debug, instrument};

/// Elements that never have children
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

/// Elements whose content is taken literally up to the matching close tag
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style", "textarea", "title"];

/// Raw text elements that still decode character references
const ESCAPABLE_RAW_TEXT_ELEMENTS: &[&str] = &["textarea", "title"];

/// Tag of the synthetic root holding all top-level nodes
pub const ROOT_TAG: &str = "body";

/// Limits applied while parsing
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Maximum element nesting depth (0 = unlimited)
    pub max_depth: usize,

    /// Maximum input length in bytes (0 = unlimited)
    pub max_len: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_depth: 256,
            max_len: 0,
        }
    }
}

/// Outcome of a parse: an optional root plus recovered problems
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Parsed {
    /// Synthetic `body` root, or `None` when the input holds no content
    pub root: Option<RawElement>,

    pub diagnostics: Vec<ParseDiagnostic>,
}

struct OpenElement {
    element: RawElement,
    span: Range<usize>,
}

/// Tolerant parser for markup fragments
pub struct Parser<'src> {
    source: &'src str,
    options: ParseOptions,
    stack: Vec<OpenElement>,
    diagnostics: Vec<ParseDiagnostic>,
}

impl<'src> Parser<'src> {
    pub fn new(source: &'src str, options: ParseOptions) -> Self {
        Self {
            source,
            options,
            stack: vec![OpenElement {
                element: RawElement::new(ROOT_TAG),
                span: 0..0,
            }],
            diagnostics: Vec::new(),
        }
    }

    /// Parse the whole fragment
    #[instrument(skip(self), fields(len = self.source.len()))]
    pub fn parse_fragment(mut self) -> ParseResult<Parsed> {
        if self.options.max_len > 0 && self.source.len() > self.options.max_len {
            return Err(ParseError::TooLarge {
                len: self.source.len(),
                max_len: self.options.max_len,
            });
        }

        let mut lexer = Token::lexer(self.source);

        while let Some(result) = lexer.next() {
            let span = lexer.span();
            let token = result.unwrap_or_else(|_| Token::Text(lexer.slice()));

            match token {
                Token::Comment(_) | Token::Declaration(_) | Token::ProcessingInstruction(_) => {}
                Token::Text(text) | Token::Stray(text) => {
                    self.top_mut().push_text(&decode_entities(text));
                }
                Token::OpenTag(raw) => {
                    let (element, self_closing) = parse_open_tag(raw);
                    let tag_name = element.tag_name.clone();

                    if self_closing || VOID_ELEMENTS.contains(&tag_name.as_str()) {
                        self.top_mut().children.push(RawNode::Element(element));
                        continue;
                    }

                    self.open(element, span.clone())?;

                    if RAW_TEXT_ELEMENTS.contains(&tag_name.as_str()) {
                        let rest = lexer.remainder();
                        let end = find_raw_text_end(rest, &tag_name).unwrap_or(rest.len());
                        if end > 0 {
                            let content = &rest[..end];
                            if ESCAPABLE_RAW_TEXT_ELEMENTS.contains(&tag_name.as_str()) {
                                self.top_mut().push_text(&decode_entities(content));
                            } else {
                                self.top_mut().push_text(content);
                            }
                        }
                        lexer.bump(end);
                    }
                }
                Token::CloseTag(raw) => {
                    self.close(&close_tag_name(raw), span);
                }
            }
        }

        while self.stack.len() > 1 {
            if let Some(open) = self.stack.pop() {
                self.diagnostics.push(ParseDiagnostic::Unclosed {
                    tag: open.element.tag_name.clone(),
                    span: open.span,
                });
                self.top_mut().children.push(RawNode::Element(open.element));
            }
        }

        let root = self
            .stack
            .pop()
            .map(|open| open.element)
            .filter(RawElement::has_content);

        debug!(
            diagnostics = self.diagnostics.len(),
            empty = root.is_none(),
            "Parsed markup fragment"
        );

        Ok(Parsed {
            root,
            diagnostics: self.diagnostics,
        })
    }

    fn top_mut(&mut self) -> &mut RawElement {
        let last = self.stack.len() - 1;
        &mut self.stack[last].element
    }

    fn open(&mut self, element: RawElement, span: Range<usize>) -> ParseResult<()> {
        // The synthetic root does not count towards the depth.
        if self.options.max_depth > 0 && self.stack.len() > self.options.max_depth {
            return Err(ParseError::TooDeep {
                max_depth: self.options.max_depth,
                pos: span.start,
            });
        }

        self.stack.push(OpenElement { element, span });
        Ok(())
    }

    fn close(&mut self, tag_name: &str, span: Range<usize>) {
        let Some(position) = self
            .stack
            .iter()
            .skip(1)
            .rposition(|open| open.element.tag_name == tag_name)
            .map(|position| position + 1)
        else {
            self.diagnostics.push(ParseDiagnostic::UnmatchedCloseTag {
                tag: tag_name.to_string(),
                span,
            });
            return;
        };

        while self.stack.len() > position + 1 {
            if let Some(open) = self.stack.pop() {
                self.diagnostics.push(ParseDiagnostic::ImplicitlyClosed {
                    tag: open.element.tag_name.clone(),
                    closed_by: tag_name.to_string(),
                    span: open.span,
                });
                self.top_mut().children.push(RawNode::Element(open.element));
            }
        }

        if let Some(open) = self.stack.pop() {
            self.top_mut().children.push(RawNode::Element(open.element));
        }
    }
}

/// Split `<tag attr=value ...>` into an element and its self-closing flag
fn parse_open_tag(raw: &str) -> (RawElement, bool) {
    let inner = raw.strip_prefix('<').unwrap_or(raw);
    let inner = inner.strip_suffix('>').unwrap_or(inner);

    let name_end = inner
        .find(|c: char| c.is_ascii_whitespace() || c == '/' || c == '>')
        .unwrap_or(inner.len());
    let mut element = RawElement::new(inner[..name_end].to_ascii_lowercase());

    let body = &inner[name_end..];
    let self_closing = body.trim_end().ends_with('/');

    let mut pending: Option<String> = None;
    let mut awaiting_value = false;

    for token in AttrToken::lexer(body).filter_map(Result::ok) {
        match token {
            AttrToken::Word(word) if awaiting_value => {
                if let Some(name) = pending.take() {
                    element.set_attribute(name, decode_entities(word));
                }
                awaiting_value = false;
            }
            AttrToken::DoubleQuoted(value) | AttrToken::SingleQuoted(value) if awaiting_value => {
                if let Some(name) = pending.take() {
                    element.set_attribute(name, decode_entities(value));
                }
                awaiting_value = false;
            }
            AttrToken::Word(word) => {
                if let Some(name) = pending.take() {
                    element.set_attribute(name, "");
                }
                let name = word.trim_matches('/');
                if !name.is_empty() {
                    pending = Some(name.to_ascii_lowercase());
                }
            }
            AttrToken::Equals => awaiting_value = pending.is_some(),
            AttrToken::DoubleQuoted(_) | AttrToken::SingleQuoted(_) => {}
        }
    }

    if let Some(name) = pending {
        element.set_attribute(name, "");
    }

    (element, self_closing)
}

fn close_tag_name(raw: &str) -> String {
    raw.trim_start_matches("</")
        .trim_end_matches('>')
        .trim()
        .to_ascii_lowercase()
}

/// Offset of `</tag` (any case, followed by a name boundary) in `rest`
fn find_raw_text_end(rest: &str, tag_name: &str) -> Option<usize> {
    let bytes = rest.as_bytes();
    let tag = tag_name.as_bytes();

    (0..bytes.len()).find(|&idx| {
        let name_start = idx + 2;
        let name_end = name_start + tag.len();

        bytes[idx] == b'<'
            && bytes.get(idx + 1) == Some(&b'/')
            && name_end <= bytes.len()
            && bytes[name_start..name_end].eq_ignore_ascii_case(tag)
            && bytes
                .get(name_end)
                .map_or(true, |b| b.is_ascii_whitespace() || *b == b'>')
    })
}

/// Parse a markup fragment with default options
pub fn parse(source: &str) -> ParseResult<Parsed> {
    Parser::new(source, ParseOptions::default()).parse_fragment()
}

/// Parse a markup fragment with explicit limits
pub fn parse_with_options(source: &str, options: ParseOptions) -> ParseResult<Parsed> {
    Parser::new(source, options).parse_fragment()
}
