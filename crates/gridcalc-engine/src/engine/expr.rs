//! Arithmetic expression parser and evaluator.
//!
//! A recursive descent parser over numbers, `+ - * /`, unary signs and
//! parentheses. Nothing else is accepted: identifiers, strings, calls and
//! stray `=` signs are parse errors. Evaluation is plain `f64` arithmetic.
//!
//! Grammar, lowest precedence first:
//!
//! ```text
//! expr    := term (("+" | "-") term)*
//! term    := unary (("*" | "/") unary)*
//! unary   := ("+" | "-") unary | primary
//! primary := number | "(" expr ")"
//! ```

use super::error::EvalError;

/// Maximum nesting of parentheses and unary signs.
pub const MAX_NESTING_DEPTH: usize = 256;

/// Binary operators, all left-associative.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
}

/// Parsed arithmetic expression.
///
/// Runs of same-precedence operators are kept flat in a [`Expr::Chain`], so
/// tree depth grows only with parentheses and unary signs.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Number(f64),
    Neg(Box<Expr>),
    /// `first op1 rest1 op2 rest2 ...`, applied left to right.
    Chain {
        first: Box<Expr>,
        rest: Vec<(BinaryOp, Expr)>,
    },
}

impl Expr {
    /// Evaluate the expression.
    ///
    /// Division by zero is an error rather than an infinity, and so is any
    /// result that overflows.
    pub fn evaluate(&self) -> Result<f64, EvalError> {
        let value = match self {
            Expr::Number(n) => *n,
            Expr::Neg(inner) => -inner.evaluate()?,
            Expr::Chain { first, rest } => {
                let mut acc = first.evaluate()?;
                for (op, operand) in rest {
                    acc = apply(*op, acc, operand.evaluate()?)?;
                }
                acc
            }
        };
        finite(value)
    }
}

fn apply(op: BinaryOp, l: f64, r: f64) -> Result<f64, EvalError> {
    let value = match op {
        BinaryOp::Add => l + r,
        BinaryOp::Sub => l - r,
        BinaryOp::Mul => l * r,
        BinaryOp::Div => {
            if r == 0.0 {
                return Err(EvalError::DivisionByZero);
            }
            l / r
        }
    };
    finite(value)
}

fn finite(value: f64) -> Result<f64, EvalError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(EvalError::NonFinite)
    }
}

/// Parse an arithmetic expression. The whole input must be consumed.
pub fn parse_expression(input: &str) -> Result<Expr, EvalError> {
    let mut parser = ExprParser::new(input)?;
    if parser.current == Token::Eof {
        return Err(EvalError::parse(0, "empty expression"));
    }
    let expr = parser.parse_expr()?;
    if parser.current != Token::Eof {
        return Err(EvalError::parse(
            parser.token_start,
            format!("unexpected {} after expression", parser.current.describe()),
        ));
    }
    Ok(expr)
}

/// Parse and evaluate in one step.
pub fn evaluate_expression(input: &str) -> Result<f64, EvalError> {
    parse_expression(input)?.evaluate()
}

#[derive(Clone, Debug, PartialEq)]
enum Token {
    Number(f64),
    Plus,
    Minus,
    Star,
    Slash,
    LeftParen,
    RightParen,
    Eof,
}

impl Token {
    fn describe(&self) -> String {
        match self {
            Token::Number(n) => format!("number {}", n),
            Token::Plus => "'+'".to_string(),
            Token::Minus => "'-'".to_string(),
            Token::Star => "'*'".to_string(),
            Token::Slash => "'/'".to_string(),
            Token::LeftParen => "'('".to_string(),
            Token::RightParen => "')'".to_string(),
            Token::Eof => "end of input".to_string(),
        }
    }
}

struct ExprParser<'a> {
    input: &'a str,
    pos: usize,
    current: Token,
    token_start: usize,
    depth: usize,
}

impl<'a> ExprParser<'a> {
    fn new(input: &'a str) -> Result<Self, EvalError> {
        let mut parser = ExprParser {
            input,
            pos: 0,
            current: Token::Eof,
            token_start: 0,
            depth: 0,
        };
        parser.advance()?;
        Ok(parser)
    }

    // === Token scanning ===

    fn advance(&mut self) -> Result<(), EvalError> {
        self.skip_whitespace();
        self.token_start = self.pos;
        self.current = self.scan_token()?;
        Ok(())
    }

    fn scan_token(&mut self) -> Result<Token, EvalError> {
        let Some(c) = self.peek_byte(0) else {
            return Ok(Token::Eof);
        };

        let single = match c {
            b'+' => Some(Token::Plus),
            b'-' => Some(Token::Minus),
            b'*' => Some(Token::Star),
            b'/' => Some(Token::Slash),
            b'(' => Some(Token::LeftParen),
            b')' => Some(Token::RightParen),
            _ => None,
        };
        if let Some(token) = single {
            self.pos += 1;
            return Ok(token);
        }

        if c.is_ascii_digit() || (c == b'.' && self.peek_byte(1).is_some_and(|b| b.is_ascii_digit()))
        {
            return self.scan_number();
        }

        let found = self.input[self.pos..].chars().next().unwrap_or('?');
        Err(EvalError::parse(
            self.pos,
            format!("unexpected character '{}'", found),
        ))
    }

    fn scan_number(&mut self) -> Result<Token, EvalError> {
        let start = self.pos;
        self.skip_digits();
        if self.peek_byte(0) == Some(b'.') {
            self.pos += 1;
            self.skip_digits();
        }

        // Exponent only if digits actually follow, otherwise the `e` is left
        // to be reported as an unexpected character.
        if matches!(self.peek_byte(0), Some(b'e' | b'E')) {
            let sign = usize::from(matches!(self.peek_byte(1), Some(b'+' | b'-')));
            if self.peek_byte(1 + sign).is_some_and(|b| b.is_ascii_digit()) {
                self.pos += 1 + sign;
                self.skip_digits();
            }
        }

        let text = &self.input[start..self.pos];
        text.parse::<f64>()
            .map(Token::Number)
            .map_err(|_| EvalError::parse(start, format!("invalid number '{}'", text)))
    }

    fn skip_digits(&mut self) {
        while self.peek_byte(0).is_some_and(|b| b.is_ascii_digit()) {
            self.pos += 1;
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek_byte(0).is_some_and(|b| b.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    fn peek_byte(&self, offset: usize) -> Option<u8> {
        self.input.as_bytes().get(self.pos + offset).copied()
    }

    // === Grammar ===

    fn parse_expr(&mut self) -> Result<Expr, EvalError> {
        let first = self.parse_term()?;
        let mut rest = Vec::new();
        loop {
            let op = match self.current {
                Token::Plus => BinaryOp::Add,
                Token::Minus => BinaryOp::Sub,
                _ => return Ok(chain(first, rest)),
            };
            self.advance()?;
            rest.push((op, self.parse_term()?));
        }
    }

    fn parse_term(&mut self) -> Result<Expr, EvalError> {
        let first = self.parse_unary()?;
        let mut rest = Vec::new();
        loop {
            let op = match self.current {
                Token::Star => BinaryOp::Mul,
                Token::Slash => BinaryOp::Div,
                _ => return Ok(chain(first, rest)),
            };
            self.advance()?;
            rest.push((op, self.parse_unary()?));
        }
    }

    fn parse_unary(&mut self) -> Result<Expr, EvalError> {
        match self.current {
            Token::Plus | Token::Minus => {
                let negate = self.current == Token::Minus;
                self.enter()?;
                self.advance()?;
                let operand = self.parse_unary()?;
                self.depth -= 1;
                Ok(if negate {
                    Expr::Neg(Box::new(operand))
                } else {
                    operand
                })
            }
            _ => self.parse_primary(),
        }
    }

    fn parse_primary(&mut self) -> Result<Expr, EvalError> {
        match self.current.clone() {
            Token::Number(n) => {
                self.advance()?;
                Ok(Expr::Number(n))
            }
            Token::LeftParen => {
                let open_at = self.token_start;
                self.enter()?;
                self.advance()?;
                let inner = self.parse_expr()?;
                if self.current != Token::RightParen {
                    return Err(EvalError::parse(
                        self.token_start,
                        format!("unclosed '(' opened at byte {}", open_at),
                    ));
                }
                self.advance()?;
                self.depth -= 1;
                Ok(inner)
            }
            other => Err(EvalError::parse(
                self.token_start,
                format!("expected a number or '(', found {}", other.describe()),
            )),
        }
    }

    fn enter(&mut self) -> Result<(), EvalError> {
        self.depth += 1;
        if self.depth > MAX_NESTING_DEPTH {
            return Err(EvalError::NestingTooDeep(MAX_NESTING_DEPTH));
        }
        Ok(())
    }
}

fn chain(first: Expr, rest: Vec<(BinaryOp, Expr)>) -> Expr {
    if rest.is_empty() {
        first
    } else {
        Expr::Chain {
            first: Box::new(first),
            rest,
        }
    }
}
