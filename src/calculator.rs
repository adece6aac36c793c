use std::fmt;
use std::io::{BufRead, Write};
use std::str::FromStr;

use anyhow::{Context, Result};
use thiserror::Error;
use tracing::debug;

use crate::prompt::ask;

/// The four supported operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
}

/// A binary expression such as `4 * 5`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Expression {
    pub lhs: f64,
    pub op: Operator,
    pub rhs: f64,
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CalcError {
    #[error("malformed expression, expected '<number> <operator> <number>'")]
    Malformed,
    #[error("unknown operator '{0}'")]
    UnknownOperator(String),
    #[error("division by zero")]
    DivisionByZero,
}

impl FromStr for Operator {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "+" => Ok(Operator::Add),
            "-" => Ok(Operator::Sub),
            "*" => Ok(Operator::Mul),
            "/" => Ok(Operator::Div),
            other => Err(CalcError::UnknownOperator(other.to_string())),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Operator::Add => "+",
            Operator::Sub => "-",
            Operator::Mul => "*",
            Operator::Div => "/",
        };
        write!(f, "{}", symbol)
    }
}

impl Expression {
    pub fn evaluate(&self) -> Result<f64, CalcError> {
        match self.op {
            Operator::Add => Ok(self.lhs + self.rhs),
            Operator::Sub => Ok(self.lhs - self.rhs),
            Operator::Mul => Ok(self.lhs * self.rhs),
            Operator::Div if self.rhs == 0.0 => Err(CalcError::DivisionByZero),
            Operator::Div => Ok(self.lhs / self.rhs),
        }
    }
}

/// Parse a whitespace separated `<number> <operator> <number>` line.
/// Operands are checked before the operator.
pub fn parse(line: &str) -> Result<Expression, CalcError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let (lhs, op, rhs) = match tokens.as_slice() {
        [lhs, op, rhs] => (*lhs, *op, *rhs),
        _ => return Err(CalcError::Malformed),
    };

    let lhs = lhs.parse::<f64>().map_err(|_| CalcError::Malformed)?;
    let rhs = rhs.parse::<f64>().map_err(|_| CalcError::Malformed)?;
    let op = op.parse::<Operator>()?;

    Ok(Expression { lhs, op, rhs })
}

/// Read expressions until `q` or end of input, printing each result.
pub fn run(input: &mut impl BufRead, out: &mut impl Write) -> Result<()> {
    writeln!(out, "Mini calculator").context("Failed to write banner.")?;
    writeln!(out, "Available operations: +  -  *  /").context("Failed to write banner.")?;

    while let Some(line) = ask(input, out, "Enter an expression (e.g. 4 * 5) or 'q' to quit: ")? {
        if line.trim().eq_ignore_ascii_case("q") {
            writeln!(out, "Goodbye.").context("Failed to write farewell.")?;
            break;
        }

        let outcome = parse(&line).and_then(|expr| {
            let value = expr.evaluate()?;
            debug!(lhs = expr.lhs, op = %expr.op, rhs = expr.rhs, value, "evaluated");
            Ok(value)
        });

        if let Err(e) = &outcome {
            debug!("{}", e);
        }

        let message = match outcome {
            Ok(value) => format!("Result: {}", value),
            Err(CalcError::Malformed) => "Invalid input! Try again.".to_string(),
            Err(CalcError::UnknownOperator(_)) => "Unknown operation!".to_string(),
            Err(CalcError::DivisionByZero) => "Division by zero!".to_string(),
        };
        writeln!(out, "{}\n", message).context("Failed to write result.")?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("4 * 5", 20.0)]
    #[case("1.5 + 2", 3.5)]
    #[case("  10   -   3  ", 7.0)]
    #[case("-2 * -3", 6.0)]
    #[case("7 / 2", 3.5)]
    #[case("0 / 5", 0.0)]
    fn evaluates_expressions(#[case] line: &str, #[case] expected: f64) {
        let value = parse(line).and_then(|e| e.evaluate()).unwrap();
        assert!((value - expected).abs() < f64::EPSILON);
    }

    #[rstest]
    #[case("4*5", CalcError::Malformed)]
    #[case("", CalcError::Malformed)]
    #[case("1 + 2 + 3", CalcError::Malformed)]
    #[case("one + 2", CalcError::Malformed)]
    #[case("2 % 3", CalcError::UnknownOperator("%".to_string()))]
    #[case("2 x 3", CalcError::UnknownOperator("x".to_string()))]
    fn rejects_bad_input(#[case] line: &str, #[case] expected: CalcError) {
        assert_eq!(parse(line).unwrap_err(), expected);
    }

    #[rstest]
    #[case("1 / 0")]
    #[case("1 / -0")]
    fn division_by_zero_is_an_error(#[case] line: &str) {
        assert_eq!(parse(line).unwrap().evaluate(), Err(CalcError::DivisionByZero));
    }

    #[rstest]
    fn repl_reports_and_continues() {
        let script = "4 * 5\nfoo\n2 ^ 3\n1 / 0\nQ\n9 + 9\n";
        let mut out = Vec::new();
        run(&mut script.as_bytes(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("Result: 20"));
        assert!(text.contains("Invalid input! Try again."));
        assert!(text.contains("Unknown operation!"));
        assert!(text.contains("Division by zero!"));
        assert!(text.contains("Goodbye."));
        assert!(!text.contains("Result: 18"));
    }

    #[rstest]
    fn repl_stops_at_end_of_input() {
        let mut out = Vec::new();
        run(&mut "1 + 1\n".as_bytes(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Result: 2"));
        assert!(!text.contains("Goodbye."));
    }
}
