//! The formula macro table.
//!
//! Macros are named, fixed-arity formulas that expand into plain arithmetic
//! expressions before evaluation. Expansion is purely structural: each call
//! site is replaced by the macro's template with the argument expressions
//! substituted for its formal parameters. Arguments are not pre-evaluated,
//! so an argument reused by a template appears once per occurrence.
//!
//! The builtin catalogue covers min/max, color packing, numeral parsing with
//! base prefixes, exponentiation and gamma correction via `LN`/`ANTILN`,
//! clamping, the hyperbolic family, and the constants `PI` and `E`. It is
//! constructed once and never changes; user-defined macros layer on top and
//! may neither shadow a builtin nor expand through themselves.

use std::collections::{HashMap, HashSet};

use super::errors::{DomainError, DomainResult};
use super::models::MacroSource;
use super::parser::{Expr, Parser};

/// The builtin formula catalogue: name, parameters, template.
///
/// `CLAMP` yields 0 (not its lower bound) when `VALUE <= MIN`; the formula
/// is kept exactly as written because callers may depend on its algebraic
/// shape, not just its value at sampled points.
const BUILTIN_MACROS: &[(&str, &[&str], &str)] = &[
    ("MIN", &["A", "B"], "A - (A - B) * (A > B)"),
    ("MAX", &["A", "B"], "A + (B - A) * (A < B)"),
    ("RGB", &["R", "G", "B"], "R * 65536 + G * 256 + B"),
    ("RGBA", &["R", "G", "B", "A"], "A * 16777216 + R * 65536 + G * 256 + B"),
    ("HEX", &["VALUE"], "(\"0x\" & VALUE) + 0"),
    ("BIN", &["VALUE"], "(\"0b\" & VALUE) + 0"),
    ("POW", &["BASE", "EXP"], "ANTILN(LN(BASE) * EXP)"),
    ("GAMMA", &["VALUE"], "ANTILN(LN(VALUE) / 2.2)"),
    ("POSITIVE_CLAMP", &["VALUE"], "(VALUE > 0) * VALUE"),
    ("NEGATIVE_CLAMP", &["VALUE"], "(VALUE < 0) * VALUE"),
    ("CLAMP", &["VALUE", "MIN", "MAX"], "(VALUE > MIN) * (MAX + (VALUE - MAX) * (VALUE < MAX))"),
    ("ACOSH", &["X"], "LN(X + SQRT(X * X - 1))"),
    ("ASINH", &["X"], "LN(X + SQRT(X * X + 1))"),
    ("ATANH", &["X"], "LN((1 + X) / (1 - X)) / 2"),
    ("COSH", &["X"], "(ANTILN(X) + ANTILN(-X)) / 2"),
    ("SINH", &["X"], "(ANTILN(X) - ANTILN(-X)) / 2"),
    ("TANH", &["X"], "(ANTILN(X) - ANTILN(-X)) / (ANTILN(X) + ANTILN(-X))"),
    ("PI", &[], "3.141592653589793"),
    ("E", &[], "2.718281828459045"),
];

/// Expansion depth backstop. Cycles are rejected at definition time, so this
/// only bounds pathological chains of user macros.
const MAX_EXPANSION_DEPTH: usize = 64;

/// A named formula with fixed parameters and a pre-parsed template.
#[derive(Debug, Clone)]
pub struct MacroDefinition {
    name: String,
    params: Vec<String>,
    source: String,
    template: Expr,
    builtin: bool,
}

impl MacroDefinition {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn params(&self) -> &[String] {
        &self.params
    }

    pub fn arity(&self) -> usize {
        self.params.len()
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn is_builtin(&self) -> bool {
        self.builtin
    }
}

/// Registry of formula macros, queried by name and arity at expansion time.
#[derive(Debug)]
pub struct MacroTable {
    macros: HashMap<String, MacroDefinition>,
}

impl MacroTable {
    /// Creates a table holding the builtin catalogue.
    pub fn builtin() -> Self {
        let mut macros = HashMap::new();

        for (name, params, source) in BUILTIN_MACROS {
            let template = parse_template(source)
                .unwrap_or_else(|err| panic!("builtin macro {} failed to parse: {}", name, err));
            macros.insert(
                (*name).to_string(),
                MacroDefinition {
                    name: (*name).to_string(),
                    params: params.iter().map(|p| (*p).to_string()).collect(),
                    source: (*source).to_string(),
                    template,
                    builtin: true,
                },
            );
        }

        Self { macros }
    }

    /// Looks up a macro by name (case-insensitive).
    pub fn get(&self, name: &str) -> Option<&MacroDefinition> {
        self.macros.get(&name.to_uppercase())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Installs a user-defined macro.
    ///
    /// Rejects builtin names, duplicate parameters, templates that do not
    /// parse, and definitions that would expand through themselves, directly
    /// or via other user macros. Redefining an existing user macro replaces
    /// it.
    pub fn define(&mut self, name: &str, params: &[String], source: &str) -> DomainResult<()> {
        let name = name.to_uppercase();
        if self.macros.get(&name).is_some_and(|m| m.builtin) {
            return Err(DomainError::MacroExists(name));
        }

        let params: Vec<String> = params.iter().map(|p| p.to_uppercase()).collect();
        for (i, param) in params.iter().enumerate() {
            if params[..i].contains(param) {
                return Err(DomainError::InvalidFormula(
                    format!("duplicate parameter: {}", param),
                ));
            }
        }

        let template = parse_template(source).map_err(DomainError::InvalidFormula)?;

        if self.would_recurse(&name, &template) {
            return Err(DomainError::RecursiveMacro(name));
        }

        self.macros.insert(
            name.clone(),
            MacroDefinition {
                name,
                params,
                source: source.trim().to_string(),
                template,
                builtin: false,
            },
        );
        Ok(())
    }

    /// Returns the user-defined macros in persistable form, sorted by name.
    pub fn user_macros(&self) -> Vec<MacroSource> {
        let mut sources: Vec<MacroSource> = self.macros.values()
            .filter(|m| !m.builtin)
            .map(|m| MacroSource {
                name: m.name.clone(),
                params: m.params.clone(),
                source: m.source.clone(),
            })
            .collect();
        sources.sort_by(|a, b| a.name.cmp(&b.name));
        sources
    }

    /// Returns all definitions sorted by name, builtins first. Used by the
    /// help screen.
    pub fn definitions(&self) -> Vec<&MacroDefinition> {
        let mut definitions: Vec<&MacroDefinition> = self.macros.values().collect();
        definitions.sort_by_key(|m| (!m.builtin, m.name.clone()));
        definitions
    }

    /// Expands a single macro call: substitutes the argument expressions for
    /// the formal parameters in the template.
    ///
    /// Fails with `UnknownMacro` if the name is not in the table and with
    /// `ArityMismatch` if the argument count differs from the declared
    /// arity. Arguments are inlined as sub-expressions, never evaluated.
    pub fn expand(&self, name: &str, args: &[Expr]) -> DomainResult<Expr> {
        let definition = self.get(name)
            .ok_or_else(|| DomainError::UnknownMacro(name.to_uppercase()))?;

        if args.len() != definition.arity() {
            return Err(DomainError::ArityMismatch {
                name: definition.name.clone(),
                expected: definition.arity(),
                found: args.len(),
            });
        }

        let bindings: HashMap<&str, &Expr> = definition.params.iter()
            .map(String::as_str)
            .zip(args.iter())
            .collect();
        Ok(substitute(&definition.template, &bindings))
    }

    /// Rewrites a whole expression tree, replacing every macro call with its
    /// expansion. Bare identifiers naming a zero-arity macro (`PI`, `E`)
    /// expand too. Names not in the table are left alone for the evaluator.
    pub fn expand_expr(&self, expr: &Expr) -> DomainResult<Expr> {
        self.expand_depth(expr, 0)
    }

    fn expand_depth(&self, expr: &Expr, depth: usize) -> DomainResult<Expr> {
        match expr {
            Expr::Call { name, args } if self.contains(name) => {
                if depth >= MAX_EXPANSION_DEPTH {
                    return Err(DomainError::RecursiveMacro(name.to_uppercase()));
                }
                let expanded_args: Vec<Expr> = args.iter()
                    .map(|arg| self.expand_depth(arg, depth))
                    .collect::<DomainResult<_>>()?;
                let body = self.expand(name, &expanded_args)?;
                self.expand_depth(&body, depth + 1)
            }

            Expr::Call { name, args } => {
                let expanded_args: Vec<Expr> = args.iter()
                    .map(|arg| self.expand_depth(arg, depth))
                    .collect::<DomainResult<_>>()?;
                Ok(Expr::Call {
                    name: name.clone(),
                    args: expanded_args,
                })
            }

            Expr::Variable(name) if self.get(name).is_some_and(|m| m.arity() == 0) => {
                if depth >= MAX_EXPANSION_DEPTH {
                    return Err(DomainError::RecursiveMacro(name.to_uppercase()));
                }
                let body = self.expand(name, &[])?;
                self.expand_depth(&body, depth + 1)
            }

            Expr::Binary { left, operator, right } => Ok(Expr::Binary {
                left: Box::new(self.expand_depth(left, depth)?),
                operator: operator.clone(),
                right: Box::new(self.expand_depth(right, depth)?),
            }),

            Expr::Unary { operator, operand } => Ok(Expr::Unary {
                operator: operator.clone(),
                operand: Box::new(self.expand_depth(operand, depth)?),
            }),

            Expr::Number(_) | Expr::Text(_) | Expr::Variable(_) => Ok(expr.clone()),
        }
    }

    /// Checks whether installing `name` with the given template would let it
    /// expand back into itself through the current table.
    fn would_recurse(&self, name: &str, template: &Expr) -> bool {
        let mut pending = Vec::new();
        collect_macro_references(template, &mut pending);

        let mut visited = HashSet::new();
        while let Some(reference) = pending.pop() {
            if reference == name {
                return true;
            }
            if !visited.insert(reference.clone()) {
                continue;
            }
            if let Some(definition) = self.macros.get(&reference) {
                collect_macro_references(&definition.template, &mut pending);
            }
        }
        false
    }
}

impl Default for MacroTable {
    fn default() -> Self {
        Self::builtin()
    }
}

fn parse_template(source: &str) -> Result<Expr, String> {
    let mut parser = Parser::new(source)?;
    parser.parse()
}

/// Replaces parameter references with the bound argument expressions.
/// Call names are never parameters; only bare identifiers substitute.
fn substitute(template: &Expr, bindings: &HashMap<&str, &Expr>) -> Expr {
    match template {
        Expr::Variable(name) => match bindings.get(name.as_str()) {
            Some(argument) => (*argument).clone(),
            None => template.clone(),
        },

        Expr::Binary { left, operator, right } => Expr::Binary {
            left: Box::new(substitute(left, bindings)),
            operator: operator.clone(),
            right: Box::new(substitute(right, bindings)),
        },

        Expr::Unary { operator, operand } => Expr::Unary {
            operator: operator.clone(),
            operand: Box::new(substitute(operand, bindings)),
        },

        Expr::Call { name, args } => Expr::Call {
            name: name.clone(),
            args: args.iter().map(|arg| substitute(arg, bindings)).collect(),
        },

        Expr::Number(_) | Expr::Text(_) => template.clone(),
    }
}

/// Collects the names a template could expand through: call targets plus
/// bare identifiers (zero-arity macro references).
fn collect_macro_references(expr: &Expr, out: &mut Vec<String>) {
    match expr {
        Expr::Variable(name) => out.push(name.clone()),
        Expr::Call { name, args } => {
            out.push(name.clone());
            for arg in args {
                collect_macro_references(arg, out);
            }
        }
        Expr::Binary { left, right, .. } => {
            collect_macro_references(left, out);
            collect_macro_references(right, out);
        }
        Expr::Unary { operand, .. } => {
            collect_macro_references(operand, out);
        }
        Expr::Number(_) | Expr::Text(_) => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{Environment, Value};
    use crate::domain::parser::{ExpressionEvaluator, FunctionRegistry};

    /// Parses, expands, and evaluates with an empty environment.
    fn eval(input: &str) -> Result<f64, String> {
        let table = MacroTable::builtin();
        let mut parser = Parser::new(input)?;
        let ast = parser.parse()?;
        let expanded = table.expand_expr(&ast).map_err(|e| e.to_string())?;
        let env = Environment::default();
        let registry = FunctionRegistry::new();
        let evaluator = ExpressionEvaluator::new(&env, &registry);
        evaluator.evaluate(&expanded)?.to_number()
    }

    fn eval_ok(input: &str) -> f64 {
        eval(input).unwrap()
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {} to be close to {}",
            actual,
            expected
        );
    }

    #[test]
    fn test_builtin_table_is_complete() {
        let table = MacroTable::builtin();
        for (name, params, _) in BUILTIN_MACROS {
            let definition = table.get(name).unwrap();
            assert_eq!(definition.arity(), params.len());
            assert!(definition.is_builtin());
        }
        assert_eq!(table.definitions().len(), BUILTIN_MACROS.len());
    }

    #[test]
    fn test_min_max() {
        assert_eq!(eval_ok("MIN(3, 4)"), 3.0);
        assert_eq!(eval_ok("MIN(4, 3)"), 3.0);
        assert_eq!(eval_ok("MIN(-2, 1)"), -2.0);
        assert_eq!(eval_ok("MAX(3, 4)"), 4.0);
        assert_eq!(eval_ok("MAX(4, 3)"), 4.0);
        assert_eq!(eval_ok("MAX(-2, -7)"), -2.0);

        // Ties resolve to the first argument
        assert_eq!(eval_ok("MIN(5, 5)"), 5.0);
        assert_eq!(eval_ok("MAX(5, 5)"), 5.0);
    }

    #[test]
    fn test_rgb_packs_big_endian() {
        let packed = eval_ok("RGB(18, 52, 86)");
        let value = packed as i64;
        assert_eq!(value / 65536, 18);
        assert_eq!((value / 256) % 256, 52);
        assert_eq!(value % 256, 86);

        assert_eq!(eval_ok("RGB(255, 255, 255)"), 16777215.0);
        assert_eq!(eval_ok("RGB(0, 0, 0)"), 0.0);
    }

    #[test]
    fn test_rgba_adds_alpha_byte() {
        let rgb = eval_ok("RGB(10, 20, 30)");
        let rgba = eval_ok("RGBA(10, 20, 30, 7)");
        assert_eq!(rgba - rgb, 7.0 * 16777216.0);
    }

    #[test]
    fn test_hex_and_bin() {
        assert_eq!(eval_ok("HEX(\"FF\")"), 255.0);
        assert_eq!(eval_ok("HEX(\"10\")"), 16.0);
        assert_eq!(eval_ok("HEX(\"c0ffee\")"), 12648430.0);
        assert_eq!(eval_ok("BIN(\"1010\")"), 10.0);
        assert_eq!(eval_ok("BIN(\"0\")"), 0.0);

        // Bad digits surface as evaluation errors, not silent zeros
        assert!(eval("HEX(\"GG\")").is_err());
        assert!(eval("BIN(\"12\")").is_err());
    }

    #[test]
    fn test_pow_via_logarithms() {
        assert_close(eval_ok("POW(2, 10)"), 1024.0);
        assert_close(eval_ok("POW(9, 0.5)"), 3.0);
        assert_close(eval_ok("POW(7, 0)"), 1.0);
        assert_close(eval_ok("POW(2, -1)"), 0.5);

        // LN's domain: non-positive bases are errors
        assert!(eval("POW(0, 2)").is_err());
        assert!(eval("POW(-2, 2)").is_err());
    }

    #[test]
    fn test_gamma() {
        assert_close(eval_ok("GAMMA(1)"), 1.0);
        assert_close(eval_ok("GAMMA(8)"), 8f64.powf(1.0 / 2.2));

        // Monotonic increasing on (0, inf)
        let samples = [0.1, 0.5, 1.0, 2.0, 8.0, 100.0];
        for pair in samples.windows(2) {
            let lower = eval_ok(&format!("GAMMA({})", pair[0]));
            let upper = eval_ok(&format!("GAMMA({})", pair[1]));
            assert!(lower < upper);
        }

        assert!(eval("GAMMA(0)").is_err());
    }

    #[test]
    fn test_positive_negative_clamp() {
        assert_eq!(eval_ok("POSITIVE_CLAMP(5)"), 5.0);
        assert_eq!(eval_ok("POSITIVE_CLAMP(-5)"), 0.0);
        assert_eq!(eval_ok("POSITIVE_CLAMP(0)"), 0.0);
        assert_eq!(eval_ok("NEGATIVE_CLAMP(-5)"), -5.0);
        assert_eq!(eval_ok("NEGATIVE_CLAMP(5)"), 0.0);
        assert_eq!(eval_ok("NEGATIVE_CLAMP(0)"), 0.0);
    }

    #[test]
    fn test_clamp() {
        assert_eq!(eval_ok("CLAMP(5, 0, 10)"), 5.0);
        assert_eq!(eval_ok("CLAMP(15, 0, 10)"), 10.0);
        assert_eq!(eval_ok("CLAMP(10, 0, 10)"), 10.0);

        // The formula yields 0 below the lower bound, not MIN; kept as-is.
        assert_eq!(eval_ok("CLAMP(-5, 2, 10)"), 0.0);
        assert_eq!(eval_ok("CLAMP(2, 2, 10)"), 0.0);
    }

    #[test]
    fn test_hyperbolic_forward() {
        for x in [-2.0_f64, -0.5, 0.0, 0.5, 1.0, 3.0] {
            let source = format!("({})", x);
            assert_close(eval_ok(&format!("COSH{}", source)), x.cosh());
            assert_close(eval_ok(&format!("SINH{}", source)), x.sinh());
            assert_close(eval_ok(&format!("TANH{}", source)), x.tanh());
        }
    }

    #[test]
    fn test_hyperbolic_identities() {
        for x in [0.0, 0.5, 1.0, 2.0] {
            let cosh = eval_ok(&format!("COSH({})", x));
            let sinh = eval_ok(&format!("SINH({})", x));
            let tanh = eval_ok(&format!("TANH({})", x));
            assert_close(cosh * cosh - sinh * sinh, 1.0);
            assert_close(tanh, sinh / cosh);
        }
    }

    #[test]
    fn test_hyperbolic_inverse() {
        for x in [0.0, 0.5, 1.0, 2.0] {
            assert_close(eval_ok(&format!("ACOSH(COSH({}))", x)), x);
            assert_close(eval_ok(&format!("ASINH(SINH({}))", x)), x);
        }
        for x in [-0.9, -0.3, 0.3, 0.9] {
            assert_close(eval_ok(&format!("ATANH(TANH({}))", x)), x);
        }

        assert!(eval("ACOSH(0.5)").is_err());
        assert!(eval("ATANH(1)").is_err());
    }

    #[test]
    fn test_constants() {
        assert_close(eval_ok("PI"), std::f64::consts::PI);
        assert_close(eval_ok("E"), std::f64::consts::E);

        // Both invocation forms expand
        assert_close(eval_ok("PI()"), std::f64::consts::PI);
        assert_close(eval_ok("2 * PI"), 2.0 * std::f64::consts::PI);
        assert_close(eval_ok("LN(E)"), 1.0);
    }

    #[test]
    fn test_unknown_macro() {
        let table = MacroTable::builtin();
        let result = table.expand("NO_SUCH_MACRO", &[]);
        assert_eq!(
            result,
            Err(DomainError::UnknownMacro("NO_SUCH_MACRO".to_string()))
        );
    }

    #[test]
    fn test_arity_mismatch() {
        let table = MacroTable::builtin();
        let result = table.expand("MIN", &[Expr::Number(1.0)]);
        assert_eq!(
            result,
            Err(DomainError::ArityMismatch {
                name: "MIN".to_string(),
                expected: 2,
                found: 1,
            })
        );
    }

    #[test]
    fn test_expansion_is_structural() {
        // MIN(X + 1, 2): the argument expression appears once per parameter
        // occurrence in the template, unevaluated.
        let table = MacroTable::builtin();
        let mut parser = Parser::new("MIN(X + 1, 2)").unwrap();
        let ast = parser.parse().unwrap();
        let expanded = table.expand_expr(&ast).unwrap();

        let mut references = Vec::new();
        collect_macro_references(&expanded, &mut references);
        let occurrences = references.iter().filter(|n| *n == "X").count();
        assert_eq!(occurrences, 3);
    }

    #[test]
    fn test_expansion_preserves_argument_expressions() {
        let table = MacroTable::builtin();
        let mut parser = Parser::new("POSITIVE_CLAMP(A - B)").unwrap();
        let ast = parser.parse().unwrap();
        let expanded = table.expand_expr(&ast).unwrap();

        // (A - B > 0) * (A - B), with the argument inlined twice
        let mut env = Environment::default();
        env.set("A", Value::Number(9.0));
        env.set("B", Value::Number(4.0));
        let registry = FunctionRegistry::new();
        let evaluator = ExpressionEvaluator::new(&env, &registry);
        assert_eq!(evaluator.evaluate(&expanded).unwrap(), Value::Number(5.0));
    }

    #[test]
    fn test_nested_macro_calls() {
        assert_eq!(eval_ok("MIN(MAX(1, 5), 3)"), 3.0);
        assert_eq!(eval_ok("CLAMP(MIN(7, 20), 0, 10)"), 7.0);
        assert_close(eval_ok("POW(MAX(2, 3), 2)"), 9.0);
    }

    #[test]
    fn test_user_macro_definition_and_expansion() {
        let mut table = MacroTable::builtin();
        table.define("DOUBLE", &["X".to_string()], "X * 2").unwrap();

        let mut parser = Parser::new("DOUBLE(21)").unwrap();
        let ast = parser.parse().unwrap();
        let expanded = table.expand_expr(&ast).unwrap();

        let env = Environment::default();
        let registry = FunctionRegistry::new();
        let evaluator = ExpressionEvaluator::new(&env, &registry);
        assert_eq!(evaluator.evaluate(&expanded).unwrap(), Value::Number(42.0));
    }

    #[test]
    fn test_user_macro_may_call_builtins() {
        let mut table = MacroTable::builtin();
        table
            .define("CUBE", &["X".to_string()], "POW(X, 3)")
            .unwrap();

        let mut parser = Parser::new("CUBE(2)").unwrap();
        let ast = parser.parse().unwrap();
        let expanded = table.expand_expr(&ast).unwrap();

        let env = Environment::default();
        let registry = FunctionRegistry::new();
        let evaluator = ExpressionEvaluator::new(&env, &registry);
        let result = evaluator.evaluate(&expanded).unwrap().to_number().unwrap();
        assert!((result - 8.0).abs() < 1e-9);
    }

    #[test]
    fn test_builtins_cannot_be_redefined() {
        let mut table = MacroTable::builtin();
        let result = table.define("MIN", &["A".to_string()], "A");
        assert_eq!(result, Err(DomainError::MacroExists("MIN".to_string())));
    }

    #[test]
    fn test_recursive_definitions_rejected() {
        let mut table = MacroTable::builtin();

        // Direct self-reference
        let result = table.define("LOOP", &["X".to_string()], "LOOP(X)");
        assert_eq!(result, Err(DomainError::RecursiveMacro("LOOP".to_string())));

        // Mutual recursion through redefinition
        table.define("F", &["X".to_string()], "X + 1").unwrap();
        table.define("G", &["X".to_string()], "F(X)").unwrap();
        let result = table.define("F", &["X".to_string()], "G(X)");
        assert_eq!(result, Err(DomainError::RecursiveMacro("F".to_string())));
    }

    #[test]
    fn test_duplicate_parameters_rejected() {
        let mut table = MacroTable::builtin();
        let result = table.define("BAD", &["X".to_string(), "X".to_string()], "X");
        assert!(matches!(result, Err(DomainError::InvalidFormula(_))));
    }

    #[test]
    fn test_user_macros_listing() {
        let mut table = MacroTable::builtin();
        assert!(table.user_macros().is_empty());

        table.define("TWICE", &["X".to_string()], "X * 2").unwrap();
        table.define("AREA", &["W".to_string(), "H".to_string()], "W * H").unwrap();

        let sources = table.user_macros();
        assert_eq!(sources.len(), 2);
        assert_eq!(sources[0].name, "AREA");
        assert_eq!(sources[1].name, "TWICE");
        assert_eq!(sources[1].source, "X * 2");
    }

    #[test]
    fn test_macro_names_are_case_insensitive() {
        assert_eq!(eval_ok("min(3, 4)"), 3.0);
        assert_eq!(eval_ok("Clamp(5, 0, 10)"), 5.0);
    }

    #[test]
    fn test_expansion_leaves_primitives_alone() {
        let table = MacroTable::builtin();
        let mut parser = Parser::new("LN(5) + SQRT(4)").unwrap();
        let ast = parser.parse().unwrap();
        let expanded = table.expand_expr(&ast).unwrap();
        assert_eq!(expanded, ast);
    }
}
