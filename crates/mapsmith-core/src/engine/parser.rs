//! Fragment parser.
//!
//! Fragments are plain text with `{{ ... }}` tags. The vocabulary is fixed
//! and small; this is deliberately not a general templating language:
//!
//! ```text
//! {{path.to.value}}                          interpolation (strict)
//! {{> fragmentName}}  {{> name some.path}}    partial inclusion
//! {{typeof x}}  {{quote x}}                  helpers
//! {{#if path}} ... {{else}} ... {{/if}}      truthiness branch
//! {{#eq a b}} ... {{else}} ... {{/eq}}       strict equality branch
//! {{#each path}} ... {{/each}}               array iteration
//! {{#switch x}}
//!   {{#case "v"}} ... {{/case}}
//!   {{#default}} ... {{/default}}
//! {{/switch}}                                first-match dispatch
//! ```
//!
//! Parsing happens once per fragment at compile time; rendering walks the
//! resulting node tree.

use super::error::TemplateError;

/// A parsed path: dot-separated segments, or one of the loop meta
/// variables. `this` refers to the current context value.
#[derive(Debug, Clone, PartialEq)]
pub enum Path {
    This,
    Segments(Vec<String>),
    LoopIndex,
    LoopFirst,
    LoopLast,
}

impl Path {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "this" | "." => Self::This,
            "@index" => Self::LoopIndex,
            "@first" => Self::LoopFirst,
            "@last" => Self::LoopLast,
            _ => Self::Segments(raw.split('.').map(str::to_string).collect()),
        }
    }

    /// Original dotted form, for error messages.
    pub fn display(&self) -> String {
        match self {
            Self::This => "this".into(),
            Self::Segments(segments) => segments.join("."),
            Self::LoopIndex => "@index".into(),
            Self::LoopFirst => "@first".into(),
            Self::LoopLast => "@last".into(),
        }
    }
}

/// An argument to `eq`, `switch` or `case`: a path or a literal.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    Path(Path),
    String(String),
    Number(f64),
    Bool(bool),
}

impl Arg {
    fn parse(raw: &str, fragment: &str) -> Result<Self, TemplateError> {
        if let Some(stripped) = raw.strip_prefix('"') {
            let Some(inner) = stripped.strip_suffix('"') else {
                return Err(parse_error(fragment, format!("unterminated string: {raw}")));
            };
            return Ok(Self::String(inner.to_string()));
        }
        match raw {
            "true" => return Ok(Self::Bool(true)),
            "false" => return Ok(Self::Bool(false)),
            _ => {}
        }
        if raw.starts_with(|c: char| c.is_ascii_digit() || c == '-') {
            return raw
                .parse::<f64>()
                .map(Self::Number)
                .map_err(|_| parse_error(fragment, format!("invalid number literal: {raw}")));
        }
        Ok(Self::Path(Path::parse(raw)))
    }
}

/// Split the inside of a block tag on whitespace, keeping double-quoted
/// literals (which may contain spaces) as single tokens. An unterminated
/// quote runs to the end of the tag and is rejected by [`Arg::parse`].
fn split_args(raw: &str) -> Vec<&str> {
    let mut args = Vec::new();
    let bytes = raw.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        if i == bytes.len() {
            break;
        }
        let start = i;
        if bytes[i] == b'"' {
            i += 1;
            while i < bytes.len() && bytes[i] != b'"' {
                i += 1;
            }
            i = (i + 1).min(bytes.len());
        } else {
            while i < bytes.len() && !bytes[i].is_ascii_whitespace() {
                i += 1;
            }
        }
        args.push(&raw[start..i]);
    }
    args
}

/// One node of a parsed fragment.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Text(String),
    Interp(Path),
    Partial {
        name: String,
        /// Optional context shift: the partial renders against this path
        /// instead of the current context.
        context: Option<Path>,
    },
    TypeOf(Path),
    Quote(Path),
    If {
        path: Path,
        then: Vec<Node>,
        otherwise: Vec<Node>,
    },
    Eq {
        left: Arg,
        right: Arg,
        then: Vec<Node>,
        otherwise: Vec<Node>,
    },
    Each {
        path: Path,
        body: Vec<Node>,
    },
    Switch {
        subject: Arg,
        cases: Vec<(Arg, Vec<Node>)>,
        default: Option<Vec<Node>>,
    },
}

/// Parse a fragment's text into a node list.
pub fn parse_fragment(fragment: &str, text: &str) -> Result<Vec<Node>, TemplateError> {
    let tokens = tokenize(fragment, text)?;
    let mut cursor = Cursor {
        fragment,
        tokens,
        position: 0,
    };
    let nodes = cursor.parse_nodes(None)?;
    if cursor.position < cursor.tokens.len() {
        return Err(parse_error(
            fragment,
            "unexpected closing or else tag at top level".into(),
        ));
    }
    Ok(nodes)
}

#[derive(Debug, Clone)]
enum Token {
    Text(String),
    Tag(String),
}

fn tokenize(fragment: &str, text: &str) -> Result<Vec<Token>, TemplateError> {
    let mut tokens = Vec::new();
    let mut rest = text;
    while let Some(open) = rest.find("{{") {
        if open > 0 {
            tokens.push(Token::Text(rest[..open].to_string()));
        }
        let after = &rest[open + 2..];
        let Some(close) = after.find("}}") else {
            return Err(parse_error(fragment, "unterminated '{{' tag".into()));
        };
        let content = after[..close].trim();
        if content.is_empty() {
            return Err(parse_error(fragment, "empty tag".into()));
        }
        tokens.push(Token::Tag(content.to_string()));
        rest = &after[close + 2..];
    }
    if !rest.is_empty() {
        tokens.push(Token::Text(rest.to_string()));
    }
    Ok(tokens)
}

struct Cursor<'a> {
    fragment: &'a str,
    tokens: Vec<Token>,
    position: usize,
}

impl Cursor<'_> {
    /// Parse nodes until the matching terminator of `block` (or until the
    /// token stream ends at the top level). Stops *before* `else` and
    /// terminator tags so the caller can consume them.
    fn parse_nodes(&mut self, block: Option<&str>) -> Result<Vec<Node>, TemplateError> {
        let mut nodes = Vec::new();
        while self.position < self.tokens.len() {
            match self.tokens[self.position].clone() {
                Token::Text(text) => {
                    self.position += 1;
                    nodes.push(Node::Text(text));
                }
                Token::Tag(tag) => {
                    if tag == "else" || tag.starts_with('/') {
                        // Caller owns structure tags.
                        if block.is_none() {
                            return Err(parse_error(
                                self.fragment,
                                format!("tag '{{{{{tag}}}}}' has no opening block"),
                            ));
                        }
                        return Ok(nodes);
                    }
                    self.position += 1;
                    nodes.push(self.parse_tag(&tag)?);
                }
            }
        }
        if let Some(block) = block {
            return Err(parse_error(
                self.fragment,
                format!("unclosed '{{{{#{block}}}}}' block"),
            ));
        }
        Ok(nodes)
    }

    fn parse_tag(&mut self, tag: &str) -> Result<Node, TemplateError> {
        if let Some(rest) = tag.strip_prefix('>') {
            let mut words = rest.split_whitespace();
            let Some(name) = words.next() else {
                return Err(parse_error(self.fragment, "partial tag without a name".into()));
            };
            let context = words.next().map(Path::parse);
            return Ok(Node::Partial {
                name: name.to_string(),
                context,
            });
        }

        if let Some(rest) = tag.strip_prefix('#') {
            return self.parse_block(rest);
        }

        let mut words = tag.split_whitespace();
        let head = words.next().unwrap_or_default();
        match head {
            "typeof" | "quote" => {
                let Some(path) = words.next() else {
                    return Err(parse_error(
                        self.fragment,
                        format!("'{head}' helper needs an argument"),
                    ));
                };
                let path = Path::parse(path);
                Ok(match head {
                    "typeof" => Node::TypeOf(path),
                    _ => Node::Quote(path),
                })
            }
            _ => {
                if tag.contains(char::is_whitespace) {
                    return Err(parse_error(
                        self.fragment,
                        format!("unknown helper or malformed tag: '{tag}'"),
                    ));
                }
                Ok(Node::Interp(Path::parse(tag)))
            }
        }
    }

    fn parse_block(&mut self, rest: &str) -> Result<Node, TemplateError> {
        let mut words = split_args(rest).into_iter();
        let keyword = words.next().unwrap_or_default();
        match keyword {
            "if" => {
                let Some(path) = words.next() else {
                    return Err(parse_error(self.fragment, "'if' needs a path".into()));
                };
                let then = self.parse_nodes(Some("if"))?;
                let otherwise = self.parse_else_branch("if")?;
                Ok(Node::If {
                    path: Path::parse(path),
                    then,
                    otherwise,
                })
            }
            "eq" => {
                let (Some(left), Some(right)) = (words.next(), words.next()) else {
                    return Err(parse_error(self.fragment, "'eq' needs two arguments".into()));
                };
                let left = Arg::parse(left, self.fragment)?;
                let right = Arg::parse(right, self.fragment)?;
                let then = self.parse_nodes(Some("eq"))?;
                let otherwise = self.parse_else_branch("eq")?;
                Ok(Node::Eq {
                    left,
                    right,
                    then,
                    otherwise,
                })
            }
            "each" => {
                let Some(path) = words.next() else {
                    return Err(parse_error(self.fragment, "'each' needs a path".into()));
                };
                let body = self.parse_nodes(Some("each"))?;
                self.expect_close("each")?;
                Ok(Node::Each {
                    path: Path::parse(path),
                    body,
                })
            }
            "switch" => {
                let Some(subject) = words.next() else {
                    return Err(parse_error(self.fragment, "'switch' needs a subject".into()));
                };
                let subject = Arg::parse(subject, self.fragment)?;
                self.parse_switch_body(subject)
            }
            other => Err(parse_error(
                self.fragment,
                format!("unknown block helper '#{other}'"),
            )),
        }
    }

    /// After a block body stopped at `else` or `/name`: consume either.
    fn parse_else_branch(&mut self, block: &str) -> Result<Vec<Node>, TemplateError> {
        match self.next_tag()? {
            tag if tag == "else" => {
                let otherwise = self.parse_nodes(Some(block))?;
                self.expect_close(block)?;
                Ok(otherwise)
            }
            tag if tag == format!("/{block}") => Ok(Vec::new()),
            tag => Err(parse_error(
                self.fragment,
                format!("expected '{{{{else}}}}' or '{{{{/{block}}}}}', found '{{{{{tag}}}}}'"),
            )),
        }
    }

    /// Only whitespace, `#case`, and `#default` may appear between a
    /// switch's braces.
    fn parse_switch_body(&mut self, subject: Arg) -> Result<Node, TemplateError> {
        let mut cases = Vec::new();
        let mut default = None;
        loop {
            match self.tokens.get(self.position).cloned() {
                Some(Token::Text(text)) if text.trim().is_empty() => {
                    self.position += 1;
                }
                Some(Token::Text(_)) => {
                    return Err(parse_error(
                        self.fragment,
                        "switch blocks may only contain case and default blocks".into(),
                    ));
                }
                Some(Token::Tag(tag)) if tag == "/switch" => {
                    self.position += 1;
                    return Ok(Node::Switch {
                        subject,
                        cases,
                        default,
                    });
                }
                Some(Token::Tag(tag)) if tag.starts_with("#case") => {
                    self.position += 1;
                    let raw = tag["#case".len()..].trim();
                    if raw.is_empty() {
                        return Err(parse_error(self.fragment, "'case' needs a literal".into()));
                    }
                    let arg = Arg::parse(raw, self.fragment)?;
                    let body = self.parse_nodes(Some("case"))?;
                    self.expect_close("case")?;
                    cases.push((arg, body));
                }
                Some(Token::Tag(tag)) if tag == "#default" => {
                    self.position += 1;
                    let body = self.parse_nodes(Some("default"))?;
                    self.expect_close("default")?;
                    if default.replace(body).is_some() {
                        return Err(parse_error(
                            self.fragment,
                            "switch has more than one default block".into(),
                        ));
                    }
                }
                Some(Token::Tag(tag)) => {
                    return Err(parse_error(
                        self.fragment,
                        format!("unexpected tag '{{{{{tag}}}}}' inside switch"),
                    ));
                }
                None => {
                    return Err(parse_error(self.fragment, "unclosed switch block".into()));
                }
            }
        }
    }

    fn next_tag(&mut self) -> Result<String, TemplateError> {
        match self.tokens.get(self.position).cloned() {
            Some(Token::Tag(tag)) => {
                self.position += 1;
                Ok(tag)
            }
            _ => Err(parse_error(
                self.fragment,
                "expected a tag, found text or end of fragment".into(),
            )),
        }
    }

    fn expect_close(&mut self, block: &str) -> Result<(), TemplateError> {
        let tag = self.next_tag()?;
        if tag != format!("/{block}") {
            return Err(parse_error(
                self.fragment,
                format!("expected '{{{{/{block}}}}}', found '{{{{{tag}}}}}'"),
            ));
        }
        Ok(())
    }
}

fn parse_error(fragment: &str, message: String) -> TemplateError {
    TemplateError::Parse {
        fragment: fragment.to_string(),
        message,
    }
}
