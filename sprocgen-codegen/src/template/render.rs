//! Template evaluation over a JSON context.

use std::ops::Range;

use serde_json::Value;

use super::parse::{FieldPath, Node};

/// A render failure with the byte range of the tag that caused it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderError {
    pub message: String,
    pub span: Range<usize>,
}

/// Loop position of the innermost `#each` iteration.
#[derive(Debug, Clone, Copy)]
struct LoopPosition {
    index: usize,
    len: usize,
}

impl LoopPosition {
    fn is_last(&self) -> bool {
        self.index == self.len - 1
    }
}

struct Scope<'a> {
    value: &'a Value,
    position: Option<LoopPosition>,
}

/// Walks a node tree, writing output into a buffer.
pub struct Renderer<'a> {
    root: &'a Value,
    scopes: Vec<Scope<'a>>,
    out: String,
}

impl<'a> Renderer<'a> {
    pub fn new(root: &'a Value) -> Self {
        Self {
            root,
            scopes: vec![Scope {
                value: root,
                position: None,
            }],
            out: String::new(),
        }
    }

    pub fn render(mut self, nodes: &[Node]) -> Result<String, RenderError> {
        self.render_nodes(nodes)?;
        Ok(self.out)
    }

    fn render_nodes(&mut self, nodes: &[Node]) -> Result<(), RenderError> {
        for node in nodes {
            self.render_node(node)?;
        }
        Ok(())
    }

    fn render_node(&mut self, node: &Node) -> Result<(), RenderError> {
        match node {
            Node::Text(text) => self.out.push_str(text),
            Node::Expr { path, span } => {
                let value = self.lookup(path, span)?;
                let text = display(&value).ok_or_else(|| RenderError {
                    message: format!("'{}' is not a printable value", path),
                    span: span.clone(),
                })?;
                self.out.push_str(&text);
            }
            Node::Each { path, span, body } => {
                let items = match self.resolve(path, span)? {
                    Value::Array(items) => items,
                    _ => {
                        return Err(RenderError {
                            message: format!("'{}' is not a list", path),
                            span: span.clone(),
                        });
                    }
                };
                let len = items.len();
                for (index, item) in items.iter().enumerate() {
                    self.scopes.push(Scope {
                        value: item,
                        position: Some(LoopPosition { index, len }),
                    });
                    let result = self.render_nodes(body);
                    self.scopes.pop();
                    result?;
                }
            }
            Node::If {
                path,
                span,
                negate,
                then,
                otherwise,
            } => {
                let value = self.lookup(path, span)?;
                if is_truthy(&value) != *negate {
                    self.render_nodes(then)?;
                } else {
                    self.render_nodes(otherwise)?;
                }
            }
            Node::Separator(body) => {
                let last = self.position().is_none_or(|p| p.is_last());
                if !last {
                    self.render_nodes(body)?;
                }
            }
        }
        Ok(())
    }

    fn position(&self) -> Option<LoopPosition> {
        self.scopes.iter().rev().find_map(|s| s.position)
    }

    /// Resolve a path to a value, including loop variables.
    fn lookup(&self, path: &FieldPath, span: &Range<usize>) -> Result<Value, RenderError> {
        if let FieldPath::Field(segments) = path {
            if let [variable] = segments.as_slice() {
                if let Some(name) = variable.strip_prefix('@') {
                    return self.loop_variable(name, span);
                }
            }
        }
        self.resolve(path, span).cloned()
    }

    fn loop_variable(&self, name: &str, span: &Range<usize>) -> Result<Value, RenderError> {
        let position = self.position().ok_or_else(|| RenderError {
            message: format!("'@{}' used outside of '#each'", name),
            span: span.clone(),
        })?;
        match name {
            "index" => Ok(Value::from(position.index)),
            "first" => Ok(Value::Bool(position.index == 0)),
            "last" => Ok(Value::Bool(position.is_last())),
            _ => Err(RenderError {
                message: format!("unknown loop variable '@{}'", name),
                span: span.clone(),
            }),
        }
    }

    /// Resolve a path against the scope stack, innermost scope first.
    fn resolve(&self, path: &FieldPath, span: &Range<usize>) -> Result<&'a Value, RenderError> {
        let segments = match path {
            FieldPath::This => return Ok(self.current()),
            FieldPath::Field(segments) => segments,
        };
        let (first, rest) = segments
            .split_first()
            .ok_or_else(|| unknown_field(path, span))?;

        let (mut value, rest) = if first == "this" {
            (self.current(), rest)
        } else {
            let found = self
                .scopes
                .iter()
                .rev()
                .find_map(|scope| scope.value.get(first.as_str()))
                .ok_or_else(|| unknown_field(path, span))?;
            (found, rest)
        };

        for segment in rest {
            value = value
                .get(segment.as_str())
                .ok_or_else(|| unknown_field(path, span))?;
        }
        Ok(value)
    }

    fn current(&self) -> &'a Value {
        self.scopes.last().map_or(self.root, |scope| scope.value)
    }
}

fn unknown_field(path: &FieldPath, span: &Range<usize>) -> RenderError {
    RenderError {
        message: format!("unknown field '{}'", path),
        span: span.clone(),
    }
}

fn display(value: &Value) -> Option<String> {
    match value {
        Value::Null => Some(String::new()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s.clone()),
        Value::Array(_) | Value::Object(_) => None,
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}
