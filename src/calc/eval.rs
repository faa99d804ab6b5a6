//! Arithmetic expression evaluator
//!
//! Supports decimal numbers, named variables, `+ - * / %`, `**` exponent,
//! unary signs and parentheses. The input is tokenized, then a
//! recursive-descent parser evaluates it directly. Nesting is bounded so a
//! pasted wall of brackets fails instead of exhausting the stack.

use std::collections::HashMap;
use thiserror::Error;

/// Fixed text shown in place of a result when evaluation fails
pub const INVALID_EXPRESSION: &str = "ERROR : Invalid Expression";

/// Anything that can go wrong between raw input and a finite number
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    #[error("empty expression")]
    Empty,
    #[error("unexpected character '{0}' at position {1}")]
    UnexpectedChar(char, usize),
    #[error("malformed number '{0}'")]
    BadNumber(String),
    #[error("unexpected end of expression")]
    UnexpectedEnd,
    #[error("unexpected token '{0}'")]
    UnexpectedToken(String),
    #[error("unbalanced parentheses")]
    Unbalanced,
    #[error("unknown variable '{0}'")]
    UnknownVariable(String),
    #[error("parentheses nested deeper than {0}")]
    TooDeep(usize),
    #[error("result is not a finite number")]
    NonFinite,
}

/// Variable bindings available to an expression
#[derive(Debug, Clone)]
pub struct Scope {
    vars: HashMap<String, f64>,
}

impl Default for Scope {
    fn default() -> Self {
        let mut vars = HashMap::new();
        vars.insert("pi".to_string(), std::f64::consts::PI);
        vars.insert("e".to_string(), std::f64::consts::E);
        Self { vars }
    }
}

impl Scope {
    /// Scope with only the built-in constants
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind (or rebind) a variable
    pub fn set(&mut self, name: impl Into<String>, value: f64) {
        self.vars.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.vars.get(name).copied()
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Pow,
    LParen,
    RParen,
}

impl Token {
    fn describe(&self) -> String {
        match self {
            Token::Number(n) => n.to_string(),
            Token::Ident(name) => name.clone(),
            Token::Plus => "+".into(),
            Token::Minus => "-".into(),
            Token::Star => "*".into(),
            Token::Slash => "/".into(),
            Token::Percent => "%".into(),
            Token::Pow => "**".into(),
            Token::LParen => "(".into(),
            Token::RParen => ")".into(),
        }
    }
}

fn tokenize(input: &str) -> Result<Vec<Token>, EvalError> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            ' ' | '\t' | '\n' | '\r' => {
                i += 1;
            }
            '0'..='9' | '.' => {
                let start = i;
                while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                    i += 1;
                }
                let literal: String = chars[start..i].iter().collect();
                let value = literal
                    .parse::<f64>()
                    .map_err(|_| EvalError::BadNumber(literal.clone()))?;
                tokens.push(Token::Number(value));
            }
            c if c.is_alphabetic() || c == '_' => {
                let start = i;
                while i < chars.len() && (chars[i].is_alphanumeric() || chars[i] == '_') {
                    i += 1;
                }
                tokens.push(Token::Ident(chars[start..i].iter().collect()));
            }
            '*' => {
                if chars.get(i + 1) == Some(&'*') {
                    tokens.push(Token::Pow);
                    i += 2;
                } else {
                    tokens.push(Token::Star);
                    i += 1;
                }
            }
            '+' | '-' | '/' | '%' | '(' | ')' => {
                tokens.push(match c {
                    '+' => Token::Plus,
                    '-' => Token::Minus,
                    '/' => Token::Slash,
                    '%' => Token::Percent,
                    '(' => Token::LParen,
                    _ => Token::RParen,
                });
                i += 1;
            }
            other => return Err(EvalError::UnexpectedChar(other, i)),
        }
    }

    Ok(tokens)
}

/// Deepest parenthesis nesting accepted before giving up
pub const MAX_DEPTH: usize = 256;

/// Recursive-descent evaluator over a token slice
///
/// expr   := term (('+' | '-') term)*
/// term   := power (('*' | '/' | '%') power)*
/// power  := unary ('**' unary)*
/// unary  := ('-' | '+')* atom
/// atom   := number | ident | '(' expr ')'
///
/// A prefix sign belongs to the operand it precedes, so `-2**2` is
/// `(-2)**2`. Only parentheses recurse, and they are capped at [`MAX_DEPTH`].
struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    depth: usize,
    scope: &'a Scope,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<&Token> {
        let token = self.tokens.get(self.pos);
        self.pos += 1;
        token
    }

    fn expr(&mut self) -> Result<f64, EvalError> {
        let mut value = self.term()?;
        loop {
            match self.peek() {
                Some(Token::Plus) => {
                    self.pos += 1;
                    value += self.term()?;
                }
                Some(Token::Minus) => {
                    self.pos += 1;
                    value -= self.term()?;
                }
                _ => return Ok(value),
            }
        }
    }

    fn term(&mut self) -> Result<f64, EvalError> {
        let mut value = self.power()?;
        loop {
            match self.peek() {
                Some(Token::Star) => {
                    self.pos += 1;
                    value *= self.power()?;
                }
                Some(Token::Slash) => {
                    self.pos += 1;
                    value /= self.power()?;
                }
                Some(Token::Percent) => {
                    self.pos += 1;
                    value %= self.power()?;
                }
                _ => return Ok(value),
            }
        }
    }

    fn power(&mut self) -> Result<f64, EvalError> {
        let mut operands = vec![self.unary()?];
        while let Some(Token::Pow) = self.peek() {
            self.pos += 1;
            operands.push(self.unary()?);
        }

        // Right-associative: 2 ** 3 ** 2 == 2 ** 9
        let mut value = operands.pop().ok_or(EvalError::UnexpectedEnd)?;
        while let Some(base) = operands.pop() {
            value = base.powf(value);
        }
        Ok(value)
    }

    fn unary(&mut self) -> Result<f64, EvalError> {
        let mut negative = false;
        loop {
            match self.peek() {
                Some(Token::Minus) => negative = !negative,
                Some(Token::Plus) => {}
                _ => break,
            }
            self.pos += 1;
        }

        let value = self.atom()?;
        Ok(if negative { -value } else { value })
    }

    fn atom(&mut self) -> Result<f64, EvalError> {
        let scope = self.scope;
        match self.next().cloned() {
            Some(Token::Number(n)) => Ok(n),
            Some(Token::Ident(name)) => scope
                .get(&name)
                .ok_or(EvalError::UnknownVariable(name)),
            Some(Token::LParen) => {
                if self.depth >= MAX_DEPTH {
                    return Err(EvalError::TooDeep(MAX_DEPTH));
                }
                self.depth += 1;
                let value = self.expr()?;
                self.depth -= 1;

                match self.next() {
                    Some(Token::RParen) => Ok(value),
                    Some(other) => Err(EvalError::UnexpectedToken(other.describe())),
                    None => Err(EvalError::Unbalanced),
                }
            }
            Some(Token::RParen) => Err(EvalError::Unbalanced),
            Some(other) => Err(EvalError::UnexpectedToken(other.describe())),
            None => Err(EvalError::UnexpectedEnd),
        }
    }
}

/// Evaluate an expression against the given variable scope
pub fn evaluate(input: &str, scope: &Scope) -> Result<f64, EvalError> {
    let tokens = tokenize(input)?;
    if tokens.is_empty() {
        return Err(EvalError::Empty);
    }

    let mut parser = Parser {
        tokens: &tokens,
        pos: 0,
        depth: 0,
        scope,
    };
    let value = parser.expr()?;

    if let Some(extra) = parser.peek() {
        return Err(match extra {
            Token::RParen => EvalError::Unbalanced,
            other => EvalError::UnexpectedToken(other.describe()),
        });
    }

    if !value.is_finite() {
        return Err(EvalError::NonFinite);
    }

    Ok(value)
}

/// Shortest decimal text that round-trips, never in exponent form
pub fn format_result(value: f64) -> String {
    // Display for f64 already picks the minimal digits without exponent
    let text = value.to_string();
    if text == "-0" {
        "0".to_string()
    } else {
        text
    }
}

/// Evaluate for display: the text to show plus whether it succeeded
///
/// On failure the text is always [`INVALID_EXPRESSION`].
pub fn eval_display(input: &str) -> (String, Result<(), EvalError>) {
    match evaluate(input, &Scope::default()) {
        Ok(value) => (format_result(value), Ok(())),
        Err(err) => (INVALID_EXPRESSION.to_string(), Err(err)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(input: &str) -> Result<f64, EvalError> {
        evaluate(input, &Scope::default())
    }

    #[test]
    fn test_operator_precedence() {
        let (text, result) = eval_display("2+3*4");
        assert!(result.is_ok());
        assert_eq!(text, "14");
        assert_eq!(eval("(2+3)*4").unwrap(), 20.0);
        assert_eq!(eval("10-4-3").unwrap(), 3.0);
        assert_eq!(eval("8/4/2").unwrap(), 1.0);
        assert_eq!(eval("7%4").unwrap(), 3.0);
    }

    #[test]
    fn test_exponent_is_right_associative() {
        assert_eq!(eval("2**3**2").unwrap(), 512.0);
        assert_eq!(eval("2**-1").unwrap(), 0.5);
        assert_eq!(eval("2*3**2").unwrap(), 18.0);
    }

    #[test]
    fn test_prefix_sign_binds_to_exponent_base() {
        assert_eq!(eval("-2**2").unwrap(), 4.0);
        assert_eq!(eval("-(2**2)").unwrap(), -4.0);
        assert_eq!(eval("0-2**2").unwrap(), -4.0);
        assert_eq!(eval("--3").unwrap(), 3.0);
        assert_eq!(eval("-+-3").unwrap(), 3.0);
    }

    #[test]
    fn test_deep_nesting_is_an_error() {
        let deep = format!("{}1{}", "(".repeat(100_000), ")".repeat(100_000));
        let (text, result) = eval_display(&deep);
        assert_eq!(text, INVALID_EXPRESSION);
        assert_eq!(result, Err(EvalError::TooDeep(MAX_DEPTH)));

        let unclosed = "(".repeat(100_000);
        assert_eq!(eval(&unclosed), Err(EvalError::TooDeep(MAX_DEPTH)));

        let at_limit = format!("{}7{}", "(".repeat(MAX_DEPTH), ")".repeat(MAX_DEPTH));
        assert_eq!(eval(&at_limit).unwrap(), 7.0);
    }

    #[test]
    fn test_long_flat_chains_do_not_recurse() {
        let signs = format!("{}5", "-".repeat(100_000));
        assert_eq!(eval(&signs).unwrap(), 5.0);

        let powers = format!("{}1", "1**".repeat(100_000));
        assert_eq!(eval(&powers).unwrap(), 1.0);
    }

    #[test]
    fn test_trailing_operator_is_an_error() {
        let (text, result) = eval_display("2+");
        assert_eq!(text, INVALID_EXPRESSION);
        assert_eq!(result, Err(EvalError::UnexpectedEnd));
    }

    #[test]
    fn test_malformed_inputs_do_not_panic() {
        for input in ["", "(", ")", "(1+2", "1+2)", "1..2", "3 $ 4", "*5", "2 3", "foo"] {
            let (text, result) = eval_display(input);
            assert!(result.is_err(), "{input:?} should fail");
            assert_eq!(text, INVALID_EXPRESSION);
        }
    }

    #[test]
    fn test_division_by_zero_is_rejected() {
        assert_eq!(eval("1/0"), Err(EvalError::NonFinite));
    }

    #[test]
    fn test_variables() {
        let mut scope = Scope::new();
        scope.set("x", 4.0);
        assert_eq!(evaluate("x * x + 1", &scope).unwrap(), 17.0);
        assert!((evaluate("2 * pi", &scope).unwrap() - std::f64::consts::TAU).abs() < 1e-12);
        assert_eq!(
            evaluate("y + 1", &scope),
            Err(EvalError::UnknownVariable("y".into()))
        );
    }

    #[test]
    fn test_minimal_precision_formatting() {
        assert_eq!(format_result(0.5), "0.5");
        assert_eq!(format_result(1e21), "1000000000000000000000");
        assert_eq!(format_result(-0.0), "0");
        assert_eq!(eval_display("10/3").0, "3.3333333333333335");
        assert_eq!(eval_display(".5+.25").0, "0.75");
    }
}
