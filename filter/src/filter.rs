use serde::{Deserialize, Serialize};

use binlog::events::rows_event::RowsEvent;
use binlog::row::row_data::RowData;
use common::err::decode_error::RelayError;
use common::err::CResult;

use crate::expression::Expression;

/// One filter clause: optional database/table gates, a column projection
/// (indices into the source row; empty keeps all) and a row predicate.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Filter {
    #[serde(default)]
    pub database: String,

    #[serde(default)]
    pub table: String,

    #[serde(default)]
    pub columns: Vec<usize>,

    #[serde(rename = "where", default, skip_serializing_if = "Option::is_none")]
    pub where_clause: Option<Expression>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct FilterConfig {
    #[serde(default)]
    pub filters: Vec<Filter>,
}

/// The externalized form of a matched row.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct FilteredRow {
    pub database: String,
    pub table: String,
    pub columns: Vec<String>,
}

impl FilteredRow {
    fn from_row(event: &RowsEvent, row: &RowData, projection: &[usize]) -> CResult<Self> {
        let mut columns = Vec::new();
        if projection.is_empty() {
            for column in &row.columns {
                columns.push(column.render());
            }
        } else {
            for &index in projection {
                let column = row.columns.get(index).ok_or_else(|| {
                    RelayError::FilterError(format!(
                        "projection index {} out of range (row has {} columns)",
                        index,
                        row.columns.len()
                    ))
                })?;
                columns.push(column.render());
            }
        }

        Ok(FilteredRow {
            database: event.schema.clone(),
            table: event.table.clone(),
            columns,
        })
    }
}

impl FilterConfig {
    /// Apply every clause, in declaration order, to the rows of one event.
    /// Matches from all clauses concatenate without deduplication; an empty
    /// clause list passes every row through unprojected. Returns the JSON
    /// document for the sink, or `None` when nothing matched.
    pub fn filter_event(&self, event: &RowsEvent) -> CResult<Option<Vec<u8>>> {
        let mut matched: Vec<(&RowData, &[usize])> = Vec::new();

        if self.filters.is_empty() {
            for row in &event.rows {
                matched.push((row, &[]));
            }
        } else {
            for filter in &self.filters {
                if !filter.database.is_empty() && filter.database != event.schema {
                    continue;
                }
                if !filter.table.is_empty() && filter.table != event.table {
                    continue;
                }

                for row in &event.rows {
                    let is_match = match &filter.where_clause {
                        None => true,
                        Some(expression) => expression.evaluate(row)?,
                    };
                    if is_match {
                        matched.push((row, &filter.columns));
                    }
                }
            }
        }

        if matched.is_empty() {
            return Ok(None);
        }

        let mut rows = Vec::with_capacity(matched.len());
        for (row, projection) in matched {
            rows.push(FilteredRow::from_row(event, row, projection)?);
        }

        let body = serde_json::to_vec(&rows)
            .map_err(|err| RelayError::FilterError(err.to_string()))?;
        Ok(Some(body))
    }
}
