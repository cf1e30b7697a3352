//! Arithmetic calculator.
//!
//! Input is checked against a character allow-list before anything else, then evaluated by a
//! small recursive-descent parser. Nothing is ever executed as code.
//!
//! Grammar (lowest to highest precedence):
//!
//! ```text
//! expr   := term (('+' | '-') term)*
//! term   := unary (('*' | '/' | '//') unary)*
//! unary  := ('+' | '-') unary | power
//! power  := atom ('**' unary)?
//! atom   := number | '(' expr ')'
//! ```
//!
//! Integers stay integers under `+ - * // **`; `/` always yields a float.

use async_trait::async_trait;

use super::{Tool, ToolError, ToolSpec};

pub const TOOL_CALCULATOR: &str = "calculator";

const ALLOWED_CHARS: &str = "0123456789+-*/.() ";
const MAX_DEPTH: usize = 64;

pub struct CalculatorTool;

#[async_trait]
impl Tool for CalculatorTool {
    fn name(&self) -> &str {
        TOOL_CALCULATOR
    }

    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: TOOL_CALCULATOR.to_string(),
            description: "Evaluate an arithmetic expression (+, -, *, /, //, **, parentheses)"
                .to_string(),
            input: "arithmetic expression".to_string(),
        }
    }

    async fn call(&self, args: &str) -> Result<String, ToolError> {
        Ok(calculate(args))
    }
}

/// Evaluates `expression`, returning the result or an error description as text.
pub fn calculate(expression: &str) -> String {
    if !expression.chars().all(|c| ALLOWED_CHARS.contains(c)) {
        return "Error: Invalid characters in expression".to_string();
    }
    match evaluate(expression) {
        Ok(value) => value.to_string(),
        Err(e) => format!("Calculation error: {}", e),
    }
}

fn evaluate(expression: &str) -> Result<Number, String> {
    let tokens = tokenize(expression)?;
    if tokens.is_empty() {
        return Err("empty expression".to_string());
    }
    let mut parser = Parser {
        tokens,
        pos: 0,
        depth: 0,
    };
    let value = parser.expr()?;
    match parser.peek() {
        None => Ok(value),
        Some(tok) => Err(format!("unexpected {}", tok)),
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    fn as_f64(self) -> f64 {
        match self {
            Number::Int(i) => i as f64,
            Number::Float(f) => f,
        }
    }
}

impl std::fmt::Display for Number {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Number::Int(i) => write!(f, "{}", i),
            // Debug keeps the trailing `.0` on whole floats (6.0, not 6).
            Number::Float(x) => write!(f, "{:?}", x),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token {
    Num(Number),
    Plus,
    Minus,
    Star,
    Slash,
    DoubleSlash,
    DoubleStar,
    LParen,
    RParen,
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Num(n) => write!(f, "number {}", n),
            Token::Plus => f.write_str("'+'"),
            Token::Minus => f.write_str("'-'"),
            Token::Star => f.write_str("'*'"),
            Token::Slash => f.write_str("'/'"),
            Token::DoubleSlash => f.write_str("'//'"),
            Token::DoubleStar => f.write_str("'**'"),
            Token::LParen => f.write_str("'('"),
            Token::RParen => f.write_str("')'"),
        }
    }
}

fn tokenize(input: &str) -> Result<Vec<Token>, String> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        let next = chars.get(i + 1).copied();
        match c {
            ' ' => i += 1,
            '+' => {
                tokens.push(Token::Plus);
                i += 1;
            }
            '-' => {
                tokens.push(Token::Minus);
                i += 1;
            }
            '*' if next == Some('*') => {
                tokens.push(Token::DoubleStar);
                i += 2;
            }
            '*' => {
                tokens.push(Token::Star);
                i += 1;
            }
            '/' if next == Some('/') => {
                tokens.push(Token::DoubleSlash);
                i += 2;
            }
            '/' => {
                tokens.push(Token::Slash);
                i += 1;
            }
            '(' => {
                tokens.push(Token::LParen);
                i += 1;
            }
            ')' => {
                tokens.push(Token::RParen);
                i += 1;
            }
            _ => {
                let start = i;
                while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                    i += 1;
                }
                if start == i {
                    return Err(format!("unexpected character '{}'", c));
                }
                let literal: String = chars[start..i].iter().collect();
                tokens.push(Token::Num(parse_number(&literal)?));
            }
        }
    }
    Ok(tokens)
}

fn parse_number(literal: &str) -> Result<Number, String> {
    if literal.contains('.') {
        if literal == "." || literal.matches('.').count() > 1 {
            return Err(format!("invalid number '{}'", literal));
        }
        literal
            .parse::<f64>()
            .map(Number::Float)
            .map_err(|_| format!("invalid number '{}'", literal))
    } else {
        match literal.parse::<i64>() {
            Ok(i) => Ok(Number::Int(i)),
            // Too large for i64: keep going in floating point.
            Err(_) => literal
                .parse::<f64>()
                .map(Number::Float)
                .map_err(|_| format!("invalid number '{}'", literal)),
        }
    }
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

impl Parser {
    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<Token> {
        let tok = self.peek();
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    fn expr(&mut self) -> Result<Number, String> {
        let mut value = self.term()?;
        while let Some(op @ (Token::Plus | Token::Minus)) = self.peek() {
            self.advance();
            let rhs = self.term()?;
            value = apply(op, value, rhs)?;
        }
        Ok(value)
    }

    fn term(&mut self) -> Result<Number, String> {
        let mut value = self.unary()?;
        while let Some(op @ (Token::Star | Token::Slash | Token::DoubleSlash)) = self.peek() {
            self.advance();
            let rhs = self.unary()?;
            value = apply(op, value, rhs)?;
        }
        Ok(value)
    }

    fn unary(&mut self) -> Result<Number, String> {
        match self.peek() {
            Some(Token::Plus) => {
                self.advance();
                self.nested(|p| p.unary())
            }
            Some(Token::Minus) => {
                self.advance();
                let value = self.nested(|p| p.unary())?;
                Ok(match value {
                    Number::Int(i) => i
                        .checked_neg()
                        .map(Number::Int)
                        .unwrap_or(Number::Float(-(i as f64))),
                    Number::Float(f) => Number::Float(-f),
                })
            }
            _ => self.power(),
        }
    }

    fn power(&mut self) -> Result<Number, String> {
        let base = self.atom()?;
        if let Some(Token::DoubleStar) = self.peek() {
            self.advance();
            let exponent = self.nested(|p| p.unary())?;
            return apply(Token::DoubleStar, base, exponent);
        }
        Ok(base)
    }

    fn atom(&mut self) -> Result<Number, String> {
        match self.advance() {
            Some(Token::Num(n)) => Ok(n),
            Some(Token::LParen) => {
                let value = self.nested(|p| p.expr())?;
                match self.advance() {
                    Some(Token::RParen) => Ok(value),
                    Some(tok) => Err(format!("expected ')' but found {}", tok)),
                    None => Err("missing closing parenthesis".to_string()),
                }
            }
            Some(tok) => Err(format!("unexpected {}", tok)),
            None => Err("unexpected end of expression".to_string()),
        }
    }

    fn nested<F>(&mut self, f: F) -> Result<Number, String>
    where
        F: FnOnce(&mut Self) -> Result<Number, String>,
    {
        if self.depth >= MAX_DEPTH {
            return Err("expression nested too deeply".to_string());
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }
}

fn apply(op: Token, lhs: Number, rhs: Number) -> Result<Number, String> {
    use Number::{Float, Int};

    let value = match (op, lhs, rhs) {
        (Token::Plus, Int(a), Int(b)) => a.checked_add(b).map(Int),
        (Token::Minus, Int(a), Int(b)) => a.checked_sub(b).map(Int),
        (Token::Star, Int(a), Int(b)) => a.checked_mul(b).map(Int),
        (Token::DoubleSlash, Int(_), Int(0)) => {
            return Err("integer division by zero".to_string())
        }
        (Token::DoubleSlash, Int(a), Int(b)) => floor_div(a, b).map(Int),
        (Token::DoubleStar, Int(0), Int(b)) if b < 0 => {
            return Err("zero cannot be raised to a negative power".to_string())
        }
        (Token::DoubleStar, Int(a), Int(b)) if b >= 0 => u32::try_from(b)
            .ok()
            .and_then(|e| a.checked_pow(e))
            .map(Int),
        _ => None,
    };
    if let Some(value) = value {
        return Ok(value);
    }

    let (a, b) = (lhs.as_f64(), rhs.as_f64());
    let result = match op {
        Token::Plus => a + b,
        Token::Minus => a - b,
        Token::Star => a * b,
        Token::Slash if b == 0.0 => return Err("division by zero".to_string()),
        Token::Slash => a / b,
        Token::DoubleSlash if b == 0.0 => return Err("float floor division by zero".to_string()),
        Token::DoubleSlash => (a / b).floor(),
        Token::DoubleStar if a == 0.0 && b < 0.0 => {
            return Err("zero cannot be raised to a negative power".to_string())
        }
        Token::DoubleStar => a.powf(b),
        other => return Err(format!("unexpected {}", other)),
    };
    if result.is_nan() {
        return Err("result is not a real number".to_string());
    }
    if result.is_infinite() {
        return Err("result too large".to_string());
    }
    Ok(Float(result))
}

/// Rounds toward negative infinity. `None` on overflow (`i64::MIN // -1`).
fn floor_div(a: i64, b: i64) -> Option<i64> {
    let q = a.checked_div(b)?;
    let r = a.checked_rem(b)?;
    if r != 0 && ((r < 0) != (b < 0)) {
        Some(q - 1)
    } else {
        Some(q)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// **Scenario**: Integer arithmetic stays integral; `/` gives a float.
    #[test]
    fn integer_and_float_results() {
        assert_eq!(calculate("2+2"), "4");
        assert_eq!(calculate("2 + 3 * 4"), "14");
        assert_eq!(calculate("(2 + 3) * 4"), "20");
        assert_eq!(calculate("7/2"), "3.5");
        assert_eq!(calculate("6/2"), "3.0");
        assert_eq!(calculate("2.5*2"), "5.0");
        assert_eq!(calculate("10 - 2 - 3"), "5");
    }

    /// **Scenario**: Power is right-associative and binds tighter than unary minus.
    #[test]
    fn power_and_unary() {
        assert_eq!(calculate("2**3"), "8");
        assert_eq!(calculate("2**3**2"), "512");
        assert_eq!(calculate("-2**2"), "-4");
        assert_eq!(calculate("2**-1"), "0.5");
        assert_eq!(calculate("--3"), "3");
    }

    /// **Scenario**: Floor division rounds toward negative infinity.
    #[test]
    fn floor_division() {
        assert_eq!(calculate("7//2"), "3");
        assert_eq!(calculate("-7//2"), "-4");
        assert_eq!(calculate("7.0//2"), "3.0");
    }

    /// **Scenario**: Disallowed characters are rejected before evaluation.
    #[test]
    fn rejects_disallowed_characters() {
        assert_eq!(calculate("import os"), "Error: Invalid characters in expression");
        assert_eq!(calculate("2^3"), "Error: Invalid characters in expression");
        assert_eq!(calculate("__import__('os')"), "Error: Invalid characters in expression");
    }

    /// **Scenario**: Runtime and syntax problems are reported as text.
    #[test]
    fn calculation_errors_are_text() {
        assert_eq!(calculate("1/0"), "Calculation error: division by zero");
        assert_eq!(calculate("1//0"), "Calculation error: integer division by zero");
        assert!(calculate("").starts_with("Calculation error:"));
        assert!(calculate("(1+2").starts_with("Calculation error:"));
        assert!(calculate("1+").starts_with("Calculation error:"));
        assert!(calculate("1 2").starts_with("Calculation error:"));
        assert!(calculate("1..2").starts_with("Calculation error:"));
    }

    /// **Scenario**: Deep nesting is refused instead of overflowing the stack.
    #[test]
    fn deep_nesting_is_bounded() {
        let expr = format!("{}1{}", "(".repeat(500), ")".repeat(500));
        assert_eq!(calculate(&expr), "Calculation error: expression nested too deeply");
    }

    /// **Scenario**: Integer overflow continues in floating point.
    #[test]
    fn overflow_promotes_to_float() {
        let out = calculate("9223372036854775807 + 1");
        assert!(out.contains('e') || out.contains('.'), "{}", out);
    }
}
