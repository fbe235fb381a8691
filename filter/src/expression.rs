use serde::{Deserialize, Serialize};

use binlog::column::column_value::Column;
use binlog::row::row_data::RowData;
use common::err::decode_error::RelayError;
use common::err::CResult;

/// Prefix marking a string literal as a column reference (`$$N`).
const COLUMN_REF_PREFIX: &str = "$$";

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    #[serde(rename = "=")]
    Eq,
    #[serde(rename = "!=")]
    Ne,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = "<=")]
    Le,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = ">=")]
    Ge,
    #[serde(rename = "and")]
    And,
    #[serde(rename = "or")]
    Or,
}

/// A leaf literal (integer or string, the latter possibly a `$$N` column
/// reference) or a nested sub-expression.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum Operand {
    Int(i64),
    Str(String),
    Expr(Box<Expression>),
}

/// A boolean expression over the columns of one row: comparisons at the
/// leaves, `and`/`or` at the inner nodes.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Expression {
    pub left: Operand,
    pub op: Op,
    pub right: Operand,
}

/// A comparison operand after column references are resolved.
enum Resolved<'a> {
    Int(i64),
    Str(String),
    Col(&'a Column),
}

impl Expression {
    pub fn new(left: Operand, op: Op, right: Operand) -> Self {
        Expression { left, op, right }
    }

    pub fn evaluate(&self, row: &RowData) -> CResult<bool> {
        match self.op {
            Op::And | Op::Or => {
                let left = self.sub_expression(&self.left)?;
                let right = self.sub_expression(&self.right)?;

                let first = left.evaluate(row)?;
                let second = right.evaluate(row)?;
                if self.op == Op::And {
                    Ok(first && second)
                } else {
                    Ok(first || second)
                }
            }
            _ => self.compare(row),
        }
    }

    fn sub_expression<'a>(&self, operand: &'a Operand) -> CResult<&'a Expression> {
        match operand {
            Operand::Expr(expression) => Ok(expression),
            other => Err(RelayError::FilterError(format!(
                "operand of {:?} is not an expression: {:?}",
                self.op, other
            ))),
        }
    }

    fn compare(&self, row: &RowData) -> CResult<bool> {
        let left = resolve(&self.left, row)?;
        let right = resolve(&self.right, row)?;
        let (left, right) = coerce(left, right)?;

        match self.op {
            Op::Eq => eq_values(&left, &right),
            Op::Ne => Ok(!eq_values(&left, &right)?),
            Op::Ge => ge_values(&left, &right),
            Op::Gt => gt_values(&left, &right),
            Op::Le => Ok(!gt_values(&left, &right)?),
            Op::Lt => Ok(!ge_values(&left, &right)?),
            Op::And | Op::Or => Err(RelayError::FilterError(format!(
                "{:?} is not a comparison operator",
                self.op
            ))),
        }
    }
}

/// Turn a literal into a comparison value; `$$N` strings index the row.
fn resolve<'a>(operand: &'a Operand, row: &'a RowData) -> CResult<Resolved<'a>> {
    match operand {
        Operand::Int(value) => Ok(Resolved::Int(*value)),
        Operand::Str(text) => match text.strip_prefix(COLUMN_REF_PREFIX) {
            Some(index) => {
                let index: usize = index.parse().map_err(|_| {
                    RelayError::FilterError(format!("invalid column index: {:?}", text))
                })?;
                let column = row.columns.get(index).ok_or_else(|| {
                    RelayError::FilterError(format!(
                        "column index {} out of range (row has {} columns)",
                        index,
                        row.columns.len()
                    ))
                })?;
                Ok(Resolved::Col(column))
            }
            None => Ok(Resolved::Str(text.clone())),
        },
        Operand::Expr(_) => Err(RelayError::FilterError(
            "expression operand inside a comparison".to_string(),
        )),
    }
}

/// Coerce both sides to a common representation. A column paired with a
/// literal adopts the column's view of that literal's type; an integer
/// paired with a string converts the string (failing when unparseable)
/// or renders the integer, depending on the left side.
fn coerce<'a>(left: Resolved<'a>, right: Resolved<'a>) -> CResult<(Resolved<'a>, Resolved<'a>)> {
    match (&left, &right) {
        (Resolved::Int(_), Resolved::Str(text)) => {
            let value = text.parse::<i64>().map_err(|_| {
                RelayError::FilterError(format!("literal {:?} is not an integer", text))
            })?;
            Ok((left, Resolved::Int(value)))
        }
        (Resolved::Int(_), Resolved::Col(column)) => {
            let value = column.as_int();
            Ok((left, Resolved::Int(value)))
        }
        (Resolved::Str(_), Resolved::Int(value)) => {
            let text = value.to_string();
            Ok((left, Resolved::Str(text)))
        }
        (Resolved::Str(_), Resolved::Col(column)) => {
            let text = column.render();
            Ok((left, Resolved::Str(text)))
        }
        (Resolved::Col(column), Resolved::Int(_)) => {
            let value = column.as_int();
            Ok((Resolved::Int(value), right))
        }
        (Resolved::Col(column), Resolved::Str(_)) => {
            let text = column.render();
            Ok((Resolved::Str(text), right))
        }
        _ => Ok((left, right)),
    }
}

fn eq_values(left: &Resolved, right: &Resolved) -> CResult<bool> {
    match (left, right) {
        (Resolved::Col(left), Resolved::Col(right)) => Ok(left.equals(right)),
        (Resolved::Int(left), Resolved::Int(right)) => Ok(left == right),
        (Resolved::Str(left), Resolved::Str(right)) => Ok(left == right),
        _ => Ok(false),
    }
}

fn ge_values(left: &Resolved, right: &Resolved) -> CResult<bool> {
    match (left, right) {
        (Resolved::Col(left), Resolved::Col(right)) => Ok(left.greater_equals(right)),
        (Resolved::Int(left), Resolved::Int(right)) => Ok(left >= right),
        (Resolved::Str(left), Resolved::Str(right)) => Ok(left >= right),
        _ => Err(RelayError::FilterError(
            "unsupported operand types in comparison".to_string(),
        )),
    }
}

fn gt_values(left: &Resolved, right: &Resolved) -> CResult<bool> {
    match (left, right) {
        (Resolved::Col(left), Resolved::Col(right)) => Ok(left.greater_than(right)),
        (Resolved::Int(left), Resolved::Int(right)) => Ok(left > right),
        (Resolved::Str(left), Resolved::Str(right)) => Ok(left > right),
        _ => Err(RelayError::FilterError(
            "unsupported operand types in comparison".to_string(),
        )),
    }
}
