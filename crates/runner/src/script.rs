// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Test-script parser.
//!
//! The script is a sequence of logical units. `#` starts a comment, a blank
//! line ends the current unit, and a line with leading whitespace continues
//! the prior unit. A finished unit is whitespace-collapsed and classified:
//!
//! ```text
//! frame_size = 1024                       # assignment
//! cube_union | --ascii | A ${op} B        # test directive
//! ```
//!
//! Directives split on the first two `|` into id, space-separated args, and
//! an operation template; `${name}` references resolve against earlier
//! assignments. Malformed units become per-unit errors rather than aborting
//! the parse, so one bad directive never takes down the suite.

use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

mod literal;

pub use literal::Literal;

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("line {line}: directive needs 'id | args | operation': {text}")]
    MalformedDirective { line: usize, text: String },

    #[error("line {line}: invalid literal: {reason}")]
    InvalidLiteral { line: usize, reason: String },

    #[error("line {line}: undefined variable ${{{name}}}")]
    UndefinedVariable { line: usize, name: String },

    #[error("line {line}: unterminated ${{...}} reference")]
    UnterminatedReference { line: usize },
}

/// One test invocation: id, extra subject arguments, and the operation
/// string with all `${name}` references already resolved.
#[derive(Clone, Debug, PartialEq)]
pub struct TestDirective {
    pub id: String,
    pub args: Vec<String>,
    pub operation: String,
}

/// Name → literal table, written only while parsing.
#[derive(Debug, Default)]
pub struct VariableStore {
    vars: HashMap<String, Literal>,
}

/// A `${name}` reference that could not be resolved.
#[derive(Debug, PartialEq)]
pub enum SubstitutionError {
    Undefined(String),
    Unterminated,
}

impl VariableStore {
    pub fn set(&mut self, name: impl Into<String>, value: Literal) {
        self.vars.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&Literal> {
        self.vars.get(name)
    }

    /// Expand every `${name}` in `template`. A lone `$` is literal text.
    pub fn substitute(&self, template: &str) -> Result<String, SubstitutionError> {
        let mut out = String::with_capacity(template.len());
        let mut chars = template.chars().peekable();

        while let Some(c) = chars.next() {
            if c != '$' || chars.peek() != Some(&'{') {
                out.push(c);
                continue;
            }
            chars.next(); // consume '{'
            let mut name = String::new();
            loop {
                match chars.next() {
                    Some('}') => break,
                    Some(c) => name.push(c),
                    None => return Err(SubstitutionError::Unterminated),
                }
            }
            match self.vars.get(&name) {
                Some(value) => out.push_str(&value.to_string()),
                None => return Err(SubstitutionError::Undefined(name)),
            }
        }
        Ok(out)
    }
}

/// Parse result: well-formed directives in file order, plus every per-unit
/// error encountered. Errors never abort the parse.
#[derive(Debug, Default)]
pub struct ParsedScript {
    pub directives: Vec<TestDirective>,
    pub errors: Vec<ScriptError>,
}

pub fn parse(source: &str) -> ParsedScript {
    let mut vars = VariableStore::default();
    let mut parsed = ParsedScript::default();

    for (line, text) in split_units(source) {
        if let Some((name, value_src)) = assignment_parts(&text) {
            match literal::parse(value_src) {
                Ok(value) => vars.set(name, value),
                Err(reason) => parsed
                    .errors
                    .push(ScriptError::InvalidLiteral { line, reason }),
            }
            continue;
        }
        match directive_from(&text, line, &vars) {
            Ok(directive) => parsed.directives.push(directive),
            Err(error) => parsed.errors.push(error),
        }
    }
    parsed
}

/// Split the source into whitespace-collapsed logical units, each tagged
/// with the 1-based line number where it starts.
fn split_units(source: &str) -> Vec<(usize, String)> {
    fn flush(buf: &mut Vec<&str>, start: usize, units: &mut Vec<(usize, String)>) {
        if buf.is_empty() {
            return;
        }
        let joined = buf.join(" ");
        let collapsed = joined.split_whitespace().collect::<Vec<_>>().join(" ");
        units.push((start, collapsed));
        buf.clear();
    }

    let mut units = Vec::new();
    let mut buf: Vec<&str> = Vec::new();
    let mut start = 0;

    for (idx, raw) in source.lines().enumerate() {
        let line = strip_comment(raw);
        if line.trim().is_empty() {
            flush(&mut buf, start, &mut units);
            continue;
        }
        if line.starts_with(char::is_whitespace) && !buf.is_empty() {
            buf.push(line);
            continue;
        }
        flush(&mut buf, start, &mut units);
        start = idx + 1;
        buf.push(line);
    }
    flush(&mut buf, start, &mut units);
    units
}

fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(idx) => &line[..idx],
        None => line,
    }
}

/// `name = rest` where `name` is an identifier. Anything else is a
/// directive candidate; a `|` in the value disqualifies nothing here, the
/// literal grammar rejects it downstream.
fn assignment_parts(text: &str) -> Option<(&str, &str)> {
    let (left, right) = text.split_once('=')?;
    let name = left.trim();
    if is_identifier(name) {
        Some((name, right.trim()))
    } else {
        None
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn directive_from(
    text: &str,
    line: usize,
    vars: &VariableStore,
) -> Result<TestDirective, ScriptError> {
    let mut parts = text.splitn(3, '|');
    let (Some(id), Some(args), Some(template)) = (parts.next(), parts.next(), parts.next()) else {
        return Err(ScriptError::MalformedDirective {
            line,
            text: text.to_string(),
        });
    };

    let id = id.trim();
    if id.is_empty() {
        return Err(ScriptError::MalformedDirective {
            line,
            text: text.to_string(),
        });
    }

    let operation = vars.substitute(template.trim()).map_err(|e| match e {
        SubstitutionError::Undefined(name) => ScriptError::UndefinedVariable { line, name },
        SubstitutionError::Unterminated => ScriptError::UnterminatedReference { line },
    })?;

    Ok(TestDirective {
        id: id.to_string(),
        args: args.split_whitespace().map(str::to_string).collect(),
        operation,
    })
}

impl fmt::Display for TestDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} | {} | {}", self.id, self.args.join(" "), self.operation)
    }
}

#[cfg(test)]
#[path = "script_tests.rs"]
mod tests;
