//! Template parsing.
//!
//! Splits template text into literal text and `{{ ... }}` tags, then folds
//! the tags into a [`Node`] tree. `{{~` and `~}}` trim the whitespace
//! preceding and following a tag.

use std::ops::Range;

/// A field reference inside a tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldPath {
    /// `{{.}}` or `{{this}}`: the current scope value.
    This,
    /// Dotted lookup, e.g. `structure.query` or `@index`.
    Field(Vec<String>),
}

impl FieldPath {
    fn parse(text: &str) -> Option<Self> {
        match text {
            "" => None,
            "." | "this" => Some(FieldPath::This),
            _ => {
                let segments: Vec<String> = text.split('.').map(str::to_string).collect();
                if segments.iter().any(|s| !is_segment(s)) {
                    return None;
                }
                Some(FieldPath::Field(segments))
            }
        }
    }
}

impl std::fmt::Display for FieldPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldPath::This => write!(f, "."),
            FieldPath::Field(segments) => write!(f, "{}", segments.join(".")),
        }
    }
}

fn is_segment(s: &str) -> bool {
    let ident = s.strip_prefix('@').unwrap_or(s);
    !ident.is_empty() && ident.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// A parsed template element.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Literal text copied to the output.
    Text(String),
    /// A field substitution.
    Expr { path: FieldPath, span: Range<usize> },
    /// Render `body` once per element of the list at `path`.
    Each {
        path: FieldPath,
        span: Range<usize>,
        body: Vec<Node>,
    },
    /// Conditional on the truthiness of `path` (inverted for `#unless`).
    If {
        path: FieldPath,
        span: Range<usize>,
        negate: bool,
        then: Vec<Node>,
        otherwise: Vec<Node>,
    },
    /// Rendered for every loop element except the last.
    Separator(Vec<Node>),
}

/// A syntax error with the byte range of the offending tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub message: String,
    pub span: Range<usize>,
}

impl SyntaxError {
    fn new(message: impl Into<String>, span: Range<usize>) -> Self {
        Self {
            message: message.into(),
            span,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockKind {
    Each,
    If,
    Unless,
    Separator,
}

impl BlockKind {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "each" => Some(BlockKind::Each),
            "if" => Some(BlockKind::If),
            "unless" => Some(BlockKind::Unless),
            "sep" => Some(BlockKind::Separator),
            _ => None,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            BlockKind::Each => "each",
            BlockKind::If => "if",
            BlockKind::Unless => "unless",
            BlockKind::Separator => "sep",
        }
    }
}

/// An open block waiting for its closing tag.
struct Frame {
    kind: BlockKind,
    path: Option<FieldPath>,
    span: Range<usize>,
    then: Vec<Node>,
    otherwise: Option<Vec<Node>>,
}

impl Frame {
    fn nodes(&mut self) -> &mut Vec<Node> {
        match &mut self.otherwise {
            Some(otherwise) => otherwise,
            None => &mut self.then,
        }
    }

    fn into_node(self) -> Node {
        match self.kind {
            BlockKind::Each => Node::Each {
                path: self.path.unwrap_or(FieldPath::This),
                span: self.span,
                body: self.then,
            },
            BlockKind::If | BlockKind::Unless => Node::If {
                path: self.path.unwrap_or(FieldPath::This),
                span: self.span,
                negate: self.kind == BlockKind::Unless,
                then: self.then,
                otherwise: self.otherwise.unwrap_or_default(),
            },
            BlockKind::Separator => Node::Separator(self.then),
        }
    }
}

enum Token<'a> {
    Text(String),
    Tag { body: &'a str, span: Range<usize> },
}

fn tokenize(src: &str) -> Result<Vec<Token<'_>>, SyntaxError> {
    let mut tokens = Vec::new();
    let mut pos = 0;
    let mut trim_next = false;

    while let Some(found) = src[pos..].find("{{") {
        let open = pos + found;
        let close = match src[open..].find("}}") {
            Some(offset) => open + offset,
            None => return Err(SyntaxError::new("unclosed tag", open..src.len())),
        };
        let span = open..close + 2;
        let mut inner = &src[open + 2..close];

        let mut text = &src[pos..open];
        if trim_next {
            text = text.trim_start();
        }
        if let Some(rest) = inner.strip_prefix('~') {
            inner = rest;
            text = text.trim_end();
        }
        trim_next = false;
        if let Some(rest) = inner.strip_suffix('~') {
            inner = rest;
            trim_next = true;
        }

        if !text.is_empty() {
            tokens.push(Token::Text(text.to_string()));
        }
        tokens.push(Token::Tag {
            body: inner.trim(),
            span,
        });
        pos = close + 2;
    }

    let mut rest = &src[pos..];
    if trim_next {
        rest = rest.trim_start();
    }
    if !rest.is_empty() {
        tokens.push(Token::Text(rest.to_string()));
    }
    Ok(tokens)
}

/// Parse template text into a node tree.
pub fn parse(src: &str) -> Result<Vec<Node>, SyntaxError> {
    let mut root: Vec<Node> = Vec::new();
    let mut stack: Vec<Frame> = Vec::new();

    for token in tokenize(src)? {
        let (body, span) = match token {
            Token::Text(text) => {
                current(&mut root, &mut stack).push(Node::Text(text));
                continue;
            }
            Token::Tag { body, span } => (body, span),
        };

        if let Some(open) = body.strip_prefix('#') {
            let (name, arg) = split_tag(open);
            let kind = BlockKind::from_name(name)
                .ok_or_else(|| SyntaxError::new(format!("unknown block '#{}'", name), span.clone()))?;

            let path = match kind {
                BlockKind::Separator => {
                    if !arg.is_empty() {
                        return Err(SyntaxError::new("'#sep' takes no argument", span));
                    }
                    if !stack.iter().any(|f| f.kind == BlockKind::Each) {
                        return Err(SyntaxError::new("'#sep' is only allowed inside '#each'", span));
                    }
                    None
                }
                _ => Some(FieldPath::parse(arg).ok_or_else(|| {
                    SyntaxError::new(format!("'#{}' needs a field to operate on", name), span.clone())
                })?),
            };

            stack.push(Frame {
                kind,
                path,
                span,
                then: Vec::new(),
                otherwise: None,
            });
        } else if let Some(close) = body.strip_prefix('/') {
            let close = close.trim();
            let frame = stack
                .pop()
                .ok_or_else(|| SyntaxError::new(format!("unexpected '/{}'", close), span.clone()))?;
            if frame.kind.name() != close {
                return Err(SyntaxError::new(
                    format!("expected '/{}', found '/{}'", frame.kind.name(), close),
                    span,
                ));
            }
            let node = frame.into_node();
            current(&mut root, &mut stack).push(node);
        } else if body == "else" {
            match stack.last_mut() {
                Some(frame)
                    if matches!(frame.kind, BlockKind::If | BlockKind::Unless)
                        && frame.otherwise.is_none() =>
                {
                    frame.otherwise = Some(Vec::new());
                }
                _ => return Err(SyntaxError::new("'else' outside of '#if' or '#unless'", span)),
            }
        } else {
            let path = FieldPath::parse(body).ok_or_else(|| {
                if body.is_empty() {
                    SyntaxError::new("empty expression", span.clone())
                } else {
                    SyntaxError::new(format!("invalid expression '{}'", body), span.clone())
                }
            })?;
            current(&mut root, &mut stack).push(Node::Expr { path, span });
        }
    }

    if let Some(frame) = stack.pop() {
        return Err(SyntaxError::new(
            format!("'#{}' is never closed", frame.kind.name()),
            frame.span,
        ));
    }

    Ok(root)
}

fn current<'a>(root: &'a mut Vec<Node>, stack: &'a mut [Frame]) -> &'a mut Vec<Node> {
    match stack.last_mut() {
        Some(frame) => frame.nodes(),
        None => root,
    }
}

fn split_tag(tag: &str) -> (&str, &str) {
    match tag.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (tag, ""),
    }
}
