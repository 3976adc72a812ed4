//! # Template Engine
//!
//! A small, literal (non-escaping) template language compatible with the subset
//! of Go's `text/template` used by license templates:
//!
//! - field actions: `{{.Year}}`, `{{.Holder}}`, `{{.SPDXID}}`
//! - conditionals: `{{ if COND }} ... {{ else }} ... {{ end }}`, where `COND` is
//!   a field, `and F...`, `or F...` or `not F`; a field is true when non-empty
//! - trim markers `{{- ` and ` -}}`, and comments `{{/* ... */}}`
//!
//! Templates are parsed once and can then be executed any number of times from
//! any number of threads.

use std::iter::Peekable;
use std::vec::IntoIter;

use super::CopyrightData;
use crate::error::HeaderError;

/// A data field a template can reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
  Year,
  Holder,
  SpdxId,
}

impl Field {
  fn parse(word: &str) -> Result<Self, HeaderError> {
    match word {
      ".Year" => Ok(Self::Year),
      ".Holder" => Ok(Self::Holder),
      ".SPDXID" => Ok(Self::SpdxId),
      other => Err(HeaderError::template_parse(format!("can't evaluate field {other:?}"))),
    }
  }

  fn value(self, data: &CopyrightData) -> &str {
    match self {
      Self::Year => &data.year,
      Self::Holder => &data.holder,
      Self::SpdxId => &data.spdx_id,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Condition {
  Field(Field),
  And(Vec<Field>),
  Or(Vec<Field>),
  Not(Field),
}

impl Condition {
  fn parse(words: &[&str]) -> Result<Self, HeaderError> {
    let fields = |args: &[&str]| -> Result<Vec<Field>, HeaderError> {
      if args.is_empty() {
        return Err(HeaderError::template_parse("missing operands in condition"));
      }
      args.iter().map(|word| Field::parse(word)).collect()
    };

    match words {
      [] => Err(HeaderError::template_parse("missing value for if")),
      [field] if field.starts_with('.') => Ok(Self::Field(Field::parse(field)?)),
      ["and", args @ ..] => Ok(Self::And(fields(args)?)),
      ["or", args @ ..] => Ok(Self::Or(fields(args)?)),
      ["not", field] => Ok(Self::Not(Field::parse(field)?)),
      _ => Err(HeaderError::template_parse(format!(
        "unsupported condition {:?}",
        words.join(" ")
      ))),
    }
  }

  fn holds(&self, data: &CopyrightData) -> bool {
    let truthy = |field: &Field| !field.value(data).is_empty();
    match self {
      Self::Field(field) => truthy(field),
      Self::And(fields) => fields.iter().all(truthy),
      Self::Or(fields) => fields.iter().any(truthy),
      Self::Not(field) => !truthy(field),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Node {
  Text(String),
  Field(Field),
  If {
    condition: Condition,
    then: Vec<Node>,
    otherwise: Vec<Node>,
  },
}

#[derive(Debug)]
enum Token {
  Text(String),
  Action(String),
}

/// How a block of nodes was closed.
#[derive(Debug, PartialEq, Eq)]
enum Terminator {
  Eof,
  Else,
  End,
}

/// A parsed license template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LicenseTemplate {
  nodes: Vec<Node>,
}

impl LicenseTemplate {
  /// Parses template text.
  ///
  /// # Errors
  ///
  /// Returns [`HeaderError::TemplateParse`] for unterminated actions, unknown
  /// fields or keywords, and unbalanced `if`/`else`/`end`.
  pub fn parse(source: &str) -> Result<Self, HeaderError> {
    let mut tokens = tokenize(source)?.into_iter().peekable();
    let (nodes, terminator) = parse_block(&mut tokens)?;
    match terminator {
      Terminator::Eof => Ok(Self { nodes }),
      Terminator::Else => Err(HeaderError::template_parse("unexpected {{else}}")),
      Terminator::End => Err(HeaderError::template_parse("unexpected {{end}}")),
    }
  }

  /// Executes the template against `data`. Values are inserted verbatim.
  pub fn execute(&self, data: &CopyrightData) -> String {
    let mut out = String::new();
    execute_nodes(&self.nodes, data, &mut out);
    out
  }
}

fn execute_nodes(nodes: &[Node], data: &CopyrightData, out: &mut String) {
  for node in nodes {
    match node {
      Node::Text(text) => out.push_str(text),
      Node::Field(field) => out.push_str(field.value(data)),
      Node::If {
        condition,
        then,
        otherwise,
      } => {
        if condition.holds(data) {
          execute_nodes(then, data, out);
        } else {
          execute_nodes(otherwise, data, out);
        }
      }
    }
  }
}

fn tokenize(source: &str) -> Result<Vec<Token>, HeaderError> {
  let mut tokens = Vec::new();
  let mut rest = source;
  let mut trim_next_text = false;

  while let Some(open) = rest.find("{{") {
    let mut text = &rest[..open];
    if trim_next_text {
      text = text.trim_start();
    }

    let after_open = &rest[open + 2..];
    let trim_left = after_open.starts_with('-') && after_open[1..].starts_with(char::is_whitespace);
    if trim_left {
      text = text.trim_end();
    }
    if !text.is_empty() {
      tokens.push(Token::Text(text.to_string()));
    }

    let Some(close) = after_open.find("}}") else {
      return Err(HeaderError::template_parse("unclosed action"));
    };
    let mut inner = &after_open[..close];
    if trim_left {
      inner = &inner[1..];
    }
    trim_next_text = inner.ends_with('-') && inner[..inner.len() - 1].ends_with(char::is_whitespace);
    if trim_next_text {
      inner = &inner[..inner.len() - 1];
    }

    let inner = inner.trim();
    if inner.starts_with("/*") {
      if !inner.ends_with("*/") || inner.len() < 4 {
        return Err(HeaderError::template_parse("unclosed comment"));
      }
    } else {
      tokens.push(Token::Action(inner.to_string()));
    }

    rest = &after_open[close + 2..];
  }

  let text = if trim_next_text { rest.trim_start() } else { rest };
  if !text.is_empty() {
    tokens.push(Token::Text(text.to_string()));
  }

  Ok(tokens)
}

fn parse_block(tokens: &mut Peekable<IntoIter<Token>>) -> Result<(Vec<Node>, Terminator), HeaderError> {
  let mut nodes = Vec::new();

  while let Some(token) = tokens.next() {
    let action = match token {
      Token::Text(text) => {
        nodes.push(Node::Text(text));
        continue;
      }
      Token::Action(action) => action,
    };

    let words: Vec<&str> = action.split_whitespace().collect();
    match words.as_slice() {
      [] => return Err(HeaderError::template_parse("missing value for command")),
      ["else"] => return Ok((nodes, Terminator::Else)),
      ["end"] => return Ok((nodes, Terminator::End)),
      ["if", condition @ ..] => {
        let condition = Condition::parse(condition)?;
        let (then, terminator) = parse_block(tokens)?;
        let otherwise = match terminator {
          Terminator::End => Vec::new(),
          Terminator::Else => {
            let (otherwise, terminator) = parse_block(tokens)?;
            if terminator != Terminator::End {
              return Err(HeaderError::template_parse("missing {{end}} after {{else}}"));
            }
            otherwise
          }
          Terminator::Eof => return Err(HeaderError::template_parse("unexpected EOF: missing {{end}}")),
        };
        nodes.push(Node::If {
          condition,
          then,
          otherwise,
        });
      }
      [field] if field.starts_with('.') => nodes.push(Node::Field(Field::parse(field)?)),
      [keyword, ..] => {
        return Err(HeaderError::template_parse(format!("function {keyword:?} not defined")));
      }
    }
  }

  Ok((nodes, Terminator::Eof))
}
