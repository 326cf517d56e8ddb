/*!
A deliberately small integer arithmetic evaluator for directive arguments: decimal and `0x` hex
literals, `+ - * /`, unary minus and parentheses. Anything else is unevaluable.
*/

use lazy_static::lazy_static;
use nom::{
  branch::alt,
  bytes::complete::tag_no_case,
  character::complete::{
    char as char1,
    digit1,
    hex_digit1,
    multispace0,
    one_of,
  },
  combinator::{
    all_consuming,
    map_opt,
    map_res,
  },
  error::{
    Error as NomError,
    ErrorKind,
  },
  sequence::{
    delimited,
    preceded,
  },
  Err as NomErr,
  IResult,
};
use regex::Regex;

use crate::error::UnevaluableExpressionError;
use super::{LSpan, ToSpan};


lazy_static! {
  static ref HEX_LITERAL: Regex = Regex::new(r"^0[xX]([0-9a-fA-F]+)$").unwrap();
  static ref ALLOWED: Regex = Regex::new(r"^[0-9a-fA-FxX+\-*/()\s]+$").unwrap();
}


type InputType<'a> = LSpan<'a>;
type EResult<'a> = IResult<InputType<'a>, i64>;


/**
Evaluates a directive argument.

A lone hex literal is converted to decimal first. The text is then checked against the characters
an expression may contain, and only then parsed. The returned error carries no span; the caller
knows which line the expression came from.
*/
pub fn evaluate(expression: &str) -> Result<i64, UnevaluableExpressionError> {
  let trimmed = expression.trim();

  let text = match HEX_LITERAL.captures(trimmed) {
    Some(captures) => {
      i64::from_str_radix(&captures[1], 16)
          .map_err(|_| UnevaluableExpressionError::new(trimmed, "hex literal out of range"))?
          .to_string()
    }
    None => trimmed.to_string(),
  };

  if !ALLOWED.is_match(&text) {
    return Err(UnevaluableExpressionError::new(trimmed, "characters outside of an arithmetic expression"));
  }

  let parsed = all_consuming(expr)(InputType::new(&text));
  match parsed {
    Ok((_, value)) => Ok(value),

    Err(NomErr::Failure(error)) if error.code == ErrorKind::Verify => {
      Err(UnevaluableExpressionError::new(trimmed, "division by zero or overflow"))
    }

    Err(NomErr::Error(error)) | Err(NomErr::Failure(error)) => {
      let column = error.input.to_span().start().to_usize();
      Err(UnevaluableExpressionError::new(trimmed, "malformed arithmetic").at_column(column))
    }

    Err(NomErr::Incomplete(_)) => Err(UnevaluableExpressionError::new(trimmed, "incomplete expression")),
  }
}


/**
Turns an inclusive pixel range end into a pixel count: `MDRV_VISIBLE_AREA(0, 255, ...)` spans 256
pixels, so an odd difference is bumped to the next even number. `None` when that overflows.
*/
pub fn round_resolution(value: i64) -> Option<i64> {
  let next = value.checked_add(1)?;
  if next.rem_euclid(2) == 0 {
    Some(next)
  } else {
    Some(value)
  }
}


// region Nom Arithmetic

/// Noms surrounding whitespace, returning the result of `inner`.
fn ws<'a, F>(inner: F) -> impl FnMut(InputType<'a>) -> IResult<InputType<'a>, char>
  where F: FnMut(InputType<'a>) -> IResult<InputType<'a>, char>
{
  delimited(multispace0, inner, multispace0)
}


fn apply(operator: char, lhs: i64, rhs: i64) -> Option<i64> {
  match operator {
    '+' => lhs.checked_add(rhs),
    '-' => lhs.checked_sub(rhs),
    '*' => lhs.checked_mul(rhs),
    '/' => lhs.checked_div(rhs),
    _ => None,
  }
}


/// Folds `operand (operator operand)*` left to right.
fn chain<'a>(i: InputType<'a>, operand: fn(InputType<'a>) -> EResult<'a>, operators: &'static str)
             -> EResult<'a>
{
  let (mut rest, mut accumulator) = operand(i)?;

  loop {
    let (after_operator, operator) = match ws(one_of(operators))(rest) {
      Ok(parsed) => parsed,
      Err(NomErr::Error(_)) => return Ok((rest, accumulator)),
      Err(error) => return Err(error),
    };

    let (after_operand, value) = operand(after_operator)?;
    accumulator = apply(operator, accumulator, value).ok_or_else(|| {
      NomErr::Failure(NomError::new(after_operator, ErrorKind::Verify))
    })?;
    rest = after_operand;
  }
}


fn expr(i: InputType) -> EResult {
  chain(i, term, "+-")
}


fn term(i: InputType) -> EResult {
  chain(i, unary, "*/")
}


fn unary(i: InputType) -> EResult {
  alt((
    map_opt(preceded(ws(char1('-')), unary), |value: i64| value.checked_neg()),
    atom,
  ))(i)
}


fn atom(i: InputType) -> EResult {
  delimited(
    multispace0,
    alt((
      hex_literal,
      decimal_literal,
      delimited(char1('('), expr, char1(')')),
    )),
    multispace0,
  )(i)
}


fn hex_literal(i: InputType) -> EResult {
  map_res(
    preceded(tag_no_case("0x"), hex_digit1),
    |digits: InputType| i64::from_str_radix(digits.fragment(), 16),
  )(i)
}


fn decimal_literal(i: InputType) -> EResult {
  map_res(digit1, |digits: InputType| digits.fragment().parse::<i64>())(i)
}

// endregion
