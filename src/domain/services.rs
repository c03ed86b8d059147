//! Formula evaluation services for the terminal calculator.
//!
//! This module provides the calculator engine: it classifies each submitted
//! line (macro definition, variable assignment, or plain expression), runs
//! the parse → macro-expansion → evaluation pipeline, and snapshots or
//! restores whole sessions.

use super::errors::{DomainError, DomainResult};
use super::macros::MacroTable;
use super::models::{is_valid_name, Environment, HistoryEntry, Session, Value};
use super::parser::{ExpressionEvaluator, FunctionRegistry, Parser};

/// The calculator engine: environment, macro table, and primitives.
///
/// Every expression goes through the same pipeline: parse into an AST,
/// expand macro calls into plain arithmetic, then evaluate against the
/// variable environment and the primitive functions (`LN`, `ANTILN`,
/// `SQRT`, plus a few conveniences).
///
/// Submitted lines take one of three forms:
/// - `NAME(P1, ..., Pn) = body` defines a macro,
/// - `name = expression` assigns a variable,
/// - anything else evaluates as an expression.
///
/// # Examples
///
/// ```
/// use tcalc::domain::Calculator;
///
/// let mut calc = Calculator::new();
///
/// // Formula macros expand before evaluation
/// assert_eq!(calc.evaluate_line("MIN(3, 4)").unwrap(), "3");
/// assert_eq!(calc.evaluate_line("HEX(\"FF\")").unwrap(), "255");
///
/// // Variables and user macros
/// assert_eq!(calc.evaluate_line("x = 2 + 3").unwrap(), "5");
/// assert_eq!(calc.evaluate_line("DOUBLE(N) = N * 2").unwrap(), "defined DOUBLE(N)");
/// assert_eq!(calc.evaluate_line("DOUBLE(x)").unwrap(), "10");
/// ```
#[derive(Debug)]
pub struct Calculator {
    environment: Environment,
    macros: MacroTable,
    functions: FunctionRegistry,
}

impl Calculator {
    /// Creates a calculator with the builtin macro catalogue, the primitive
    /// functions, and an empty environment.
    pub fn new() -> Self {
        Self {
            environment: Environment::default(),
            macros: MacroTable::builtin(),
            functions: FunctionRegistry::new(),
        }
    }

    /// Rebuilds a calculator from a persisted session.
    ///
    /// User macros are re-installed through the same validation as live
    /// definitions, so a tampered session file cannot smuggle in a recursive
    /// or malformed macro.
    pub fn from_session(session: &Session) -> DomainResult<Self> {
        let mut calculator = Self::new();
        calculator.environment = session.environment.clone();
        for macro_source in &session.macros {
            calculator.define_macro(
                &macro_source.name,
                &macro_source.params,
                &macro_source.source,
            )?;
        }
        Ok(calculator)
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    pub fn macros(&self) -> &MacroTable {
        &self.macros
    }

    /// Captures the restorable parts of this calculator plus the given
    /// history as a `Session`.
    pub fn snapshot(&self, history: &[HistoryEntry]) -> Session {
        Session {
            environment: self.environment.clone(),
            macros: self.macros.user_macros(),
            history: history.to_vec(),
        }
    }

    /// Evaluates one submitted line and returns the text to show for it.
    ///
    /// Classification: a left-hand side shaped like `NAME(P1, ...)` in front
    /// of a top-level `=` defines a macro; a bare identifier assigns a
    /// variable; everything else is an expression (so `5 = 5` is still the
    /// equality test, and `(x) = 5` compares rather than assigns).
    pub fn evaluate_line(&mut self, input: &str) -> DomainResult<String> {
        if let Some((lhs, rhs)) = split_on_assignment(input) {
            if let Some(name) = variable_target(lhs) {
                let value = self.assign(&name, rhs)?;
                return Ok(value.to_string());
            }
            if let Some((name, params)) = macro_target(lhs) {
                self.macros.define(&name, &params, rhs)?;
                return Ok(format!("defined {}({})", name, params.join(", ")));
            }
        }

        let value = self.evaluate_expression(input)?;
        Ok(value.to_string())
    }

    /// Runs the full pipeline on an expression: parse, expand macros,
    /// evaluate.
    pub fn evaluate_expression(&self, source: &str) -> DomainResult<Value> {
        let mut parser = Parser::new(source).map_err(DomainError::InvalidFormula)?;
        let ast = parser.parse().map_err(DomainError::InvalidFormula)?;

        let expanded = self.macros.expand_expr(&ast)?;

        let evaluator = ExpressionEvaluator::new(&self.environment, &self.functions);
        evaluator.evaluate(&expanded).map_err(DomainError::EvaluationError)
    }

    /// Evaluates an expression and binds the result to a variable.
    ///
    /// Macro names cannot be assigned: expansion rewrites them before the
    /// environment is ever consulted, so the binding would be unreachable.
    pub fn assign(&mut self, name: &str, source: &str) -> DomainResult<Value> {
        let name = name.to_uppercase();
        if self.macros.contains(&name) {
            return Err(DomainError::MacroExists(name));
        }

        let value = self.evaluate_expression(source)?;
        self.environment.set(&name, value.clone());
        Ok(value)
    }

    /// Defines a user macro directly (the REPL goes through
    /// `evaluate_line`).
    pub fn define_macro(&mut self, name: &str, params: &[String], source: &str) -> DomainResult<()> {
        self.macros.define(name, params, source)
    }
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new()
    }
}

/// Splits `input` at the first `=` that sits outside text literals and is
/// not part of `<=` or `>=`. Returns `None` when the line has no such `=`.
fn split_on_assignment(input: &str) -> Option<(&str, &str)> {
    let bytes = input.as_bytes();
    let mut in_text = false;

    for (i, &byte) in bytes.iter().enumerate() {
        match byte {
            b'"' => in_text = !in_text,
            b'=' if !in_text => {
                if i > 0 && matches!(bytes[i - 1], b'<' | b'>') {
                    continue;
                }
                return Some((&input[..i], &input[i + 1..]));
            }
            _ => {}
        }
    }

    None
}

fn variable_target(lhs: &str) -> Option<String> {
    let name = lhs.trim();
    if is_valid_name(name) {
        Some(name.to_uppercase())
    } else {
        None
    }
}

fn macro_target(lhs: &str) -> Option<(String, Vec<String>)> {
    let lhs = lhs.trim();
    let open = lhs.find('(')?;
    let name = lhs[..open].trim();
    if !is_valid_name(name) {
        return None;
    }

    let inner = lhs[open + 1..].trim_end().strip_suffix(')')?;
    let params: Vec<String> = if inner.trim().is_empty() {
        Vec::new()
    } else {
        inner.split(',').map(|p| p.trim().to_string()).collect()
    };
    if !params.iter().all(|p| is_valid_name(p)) {
        return None;
    }

    Some((
        name.to_uppercase(),
        params.iter().map(|p| p.to_uppercase()).collect(),
    ))
}
