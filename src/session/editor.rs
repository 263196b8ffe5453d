//! Item list editing for a session.

use crate::invoice::{ItemRow, RowInput};

use super::model::InvoiceSession;
use super::SessionError;

impl InvoiceSession {
    /// Append a blank row, but only when the last row has a name or a price.
    ///
    /// Returns `Ok(false)` when the last row is still blank.
    pub fn add_row(&mut self, max_rows: usize) -> Result<bool, SessionError> {
        if let Some(last) = self.rows.last() {
            if last.is_blank() {
                return Ok(false);
            }
        }

        if self.rows.len() >= max_rows {
            return Err(SessionError::RowLimitReached(max_rows));
        }

        self.rows.push(ItemRow::blank());
        Ok(true)
    }

    /// Replace the raw input of an existing row and re-parse it.
    pub fn update_row(&mut self, index: usize, input: RowInput) -> Result<&ItemRow, SessionError> {
        let len = self.rows.len();
        let row = self
            .rows
            .get_mut(index)
            .ok_or(SessionError::RowOutOfRange { index, len })?;
        *row = ItemRow::new(input);
        Ok(row)
    }
}
