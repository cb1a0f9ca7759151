// ABOUTME: Size specifications and their conversion to pixels.
// ABOUTME: Parses "200px", "30%", "50% - 10px" and "auto" into SizeSpec values.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A sibling's requested length along one axis
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawSize", into = "RawSize")]
pub enum SizeSpec {
    /// Absolute pixels
    Fixed(f32),
    /// Percentage of the container length
    Percent(f32),
    /// Terms evaluated left to right with no operator precedence
    Expr(Vec<Term>),
    /// Fills whatever the other siblings leave over
    #[default]
    Auto,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Operand {
    Px(f32),
    Percent(f32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Term {
    pub op: Operator,
    pub operand: Operand,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SizeError {
    #[error("empty size")]
    Empty,

    #[error("invalid number `{0}`")]
    InvalidNumber(String),

    #[error("unknown unit `{0}`")]
    UnknownUnit(String),

    #[error("unexpected `{0}`")]
    UnexpectedToken(char),

    #[error("expected a value after the last operator")]
    DanglingOperator,
}

/// Percentages of an unmeasured container resolve to nothing
fn percent_of(container: f32, percent: f32) -> f32 {
    if container.is_finite() && container > 0.0 {
        container * percent / 100.0
    } else {
        0.0
    }
}

impl Operand {
    pub fn resolve(&self, container: f32) -> f32 {
        match *self {
            Operand::Px(px) => px,
            Operand::Percent(p) => percent_of(container, p),
        }
    }
}

impl Operator {
    fn symbol(&self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Sub => '-',
            Operator::Mul => '*',
            Operator::Div => '/',
        }
    }

    fn from_symbol(c: char) -> Option<Self> {
        match c {
            '+' => Some(Operator::Add),
            '-' => Some(Operator::Sub),
            '*' => Some(Operator::Mul),
            '/' => Some(Operator::Div),
            _ => None,
        }
    }
}

impl SizeSpec {
    pub fn px(px: f32) -> Self {
        SizeSpec::Fixed(px)
    }

    pub fn percent(p: f32) -> Self {
        SizeSpec::Percent(p)
    }

    pub fn is_auto(&self) -> bool {
        matches!(self, SizeSpec::Auto)
    }

    /// Convert to pixels against `container`.
    ///
    /// Never returns NaN or infinity: percentages of an unmeasured container,
    /// division by zero and overflowing expressions all yield 0. `Auto` has no
    /// intrinsic length and also yields 0; only the axis allocator gives it one.
    pub fn resolve(&self, container: f32) -> f32 {
        let value = match self {
            SizeSpec::Fixed(px) => *px,
            SizeSpec::Percent(p) => percent_of(container, *p),
            SizeSpec::Expr(terms) => evaluate(terms, container),
            SizeSpec::Auto => 0.0,
        };
        if value.is_finite() {
            value
        } else {
            tracing::warn!("Size {} resolved to a non-finite value, using 0", self);
            0.0
        }
    }

    /// Parse, logging a warning and falling back to 0px when the text is malformed
    pub fn parse_lossy(text: &str) -> Self {
        text.parse().unwrap_or_else(|e| {
            tracing::warn!("Unparseable size {:?} ({}), using 0px", text, e);
            SizeSpec::Fixed(0.0)
        })
    }
}

fn evaluate(terms: &[Term], container: f32) -> f32 {
    let mut acc = 0.0;
    for term in terms {
        let value = term.operand.resolve(container);
        acc = match term.op {
            Operator::Add => acc + value,
            Operator::Sub => acc - value,
            Operator::Mul => acc * value,
            Operator::Div => {
                if value == 0.0 {
                    tracing::warn!("Division by zero in size expression, using 0");
                    return 0.0;
                }
                acc / value
            }
        };
    }
    acc
}

/// Convert a textual size to pixels in one step
pub fn size_to_pixels(text: &str, container: f32) -> f32 {
    SizeSpec::parse_lossy(text).resolve(container)
}

fn parse_operand(number: &str, unit: &str) -> Result<Operand, SizeError> {
    let value: f32 = number
        .parse()
        .map_err(|_| SizeError::InvalidNumber(number.to_string()))?;
    match unit {
        "" | "px" => Ok(Operand::Px(value)),
        "%" => Ok(Operand::Percent(value)),
        other => Err(SizeError::UnknownUnit(other.to_string())),
    }
}

fn tokenize(text: &str) -> Result<Vec<Term>, SizeError> {
    let mut terms = Vec::new();
    let mut pending = None;
    let mut chars = text.chars().peekable();

    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            continue;
        }

        if let Some(op) = Operator::from_symbol(c) {
            // Operators alternate with operands; a leading one may only be a sign
            let leading_sign = matches!(op, Operator::Add | Operator::Sub);
            if pending.is_some() || (terms.is_empty() && !leading_sign) {
                return Err(SizeError::UnexpectedToken(c));
            }
            pending = Some(op);
            chars.next();
            continue;
        }

        if c.is_ascii_digit() || c == '.' {
            let op = match pending.take() {
                Some(op) => op,
                None if terms.is_empty() => Operator::Add,
                None => return Err(SizeError::UnexpectedToken(c)),
            };

            let mut number = String::new();
            while let Some(&d) = chars.peek() {
                if d.is_ascii_digit() || d == '.' {
                    number.push(d);
                    chars.next();
                } else {
                    break;
                }
            }
            let mut unit = String::new();
            while let Some(&u) = chars.peek() {
                if u.is_alphabetic() || u == '%' {
                    unit.push(u.to_ascii_lowercase());
                    chars.next();
                } else {
                    break;
                }
            }

            terms.push(Term {
                op,
                operand: parse_operand(&number, &unit)?,
            });
            continue;
        }

        return Err(SizeError::UnexpectedToken(c));
    }

    if pending.is_some() {
        return Err(SizeError::DanglingOperator);
    }
    if terms.is_empty() {
        return Err(SizeError::Empty);
    }
    Ok(terms)
}

impl FromStr for SizeSpec {
    type Err = SizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        if text.eq_ignore_ascii_case("auto") {
            return Ok(SizeSpec::Auto);
        }

        let terms = tokenize(text)?;
        match terms.as_slice() {
            [Term {
                op: Operator::Add,
                operand: Operand::Px(px),
            }] => Ok(SizeSpec::Fixed(*px)),
            [Term {
                op: Operator::Add,
                operand: Operand::Percent(p),
            }] => Ok(SizeSpec::Percent(*p)),
            _ => Ok(SizeSpec::Expr(terms)),
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Px(px) => write!(f, "{px}px"),
            Operand::Percent(p) => write!(f, "{p}%"),
        }
    }
}

impl fmt::Display for SizeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SizeSpec::Fixed(px) => write!(f, "{px}px"),
            SizeSpec::Percent(p) => write!(f, "{p}%"),
            SizeSpec::Auto => f.write_str("auto"),
            SizeSpec::Expr(terms) => {
                for (i, term) in terms.iter().enumerate() {
                    match (i, term.op) {
                        (0, Operator::Add) => write!(f, "{}", term.operand)?,
                        (0, op) => write!(f, "{}{}", op.symbol(), term.operand)?,
                        (_, op) => write!(f, " {} {}", op.symbol(), term.operand)?,
                    }
                }
                Ok(())
            }
        }
    }
}

impl From<f32> for SizeSpec {
    fn from(px: f32) -> Self {
        SizeSpec::Fixed(px)
    }
}

impl From<f64> for SizeSpec {
    fn from(px: f64) -> Self {
        SizeSpec::Fixed(px as f32)
    }
}

impl From<&str> for SizeSpec {
    fn from(text: &str) -> Self {
        SizeSpec::parse_lossy(text)
    }
}

/// Wire form: bare numbers are pixels, strings go through the lossy parser
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawSize {
    Number(f32),
    Text(String),
}

impl From<RawSize> for SizeSpec {
    fn from(raw: RawSize) -> Self {
        match raw {
            RawSize::Number(px) => SizeSpec::Fixed(px),
            RawSize::Text(text) => SizeSpec::parse_lossy(&text),
        }
    }
}

impl From<SizeSpec> for RawSize {
    fn from(spec: SizeSpec) -> Self {
        match spec {
            SizeSpec::Fixed(px) => RawSize::Number(px),
            other => RawSize::Text(other.to_string()),
        }
    }
}
