//! Invoice sessions - one user's form state, kept between requests.

pub mod editor;
pub mod model;
pub mod routes;
pub mod store;

pub use model::{AddRowResponse, DiscountSetting, InvoiceSession, UpdateDiscountRequest};
pub use store::{SessionStore, SharedSession};

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session {0} not found")]
    NotFound(Uuid),
    #[error("row {index} does not exist (session has {len} rows)")]
    RowOutOfRange { index: usize, len: usize },
    #[error("item list already has the maximum of {0} rows")]
    RowLimitReached(usize),
}
