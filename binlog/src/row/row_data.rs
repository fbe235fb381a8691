use serde::Serialize;

use crate::column::column_value::Column;

/// One decoded row image. Columns keep their table positions, including
/// placeholders for columns the event did not carry. Update events attach
/// the paired image through `before`.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct RowData {
    pub present_bitmap: Vec<bool>,
    pub null_bitmap: Vec<bool>,
    pub columns: Vec<Column>,
    pub before: Option<Box<RowData>>,
}

impl RowData {
    pub fn new(present_bitmap: Vec<bool>, null_bitmap: Vec<bool>, columns: Vec<Column>) -> Self {
        RowData {
            present_bitmap,
            null_bitmap,
            columns,
            before: None,
        }
    }
}
