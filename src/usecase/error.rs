//! UseCase layer errors.

use thiserror::Error;

use crate::domain::StoreError;

/// Failure of a send-message operation.
///
/// A store failure fails only the individual send: the message is not
/// broadcast (history replay must show everything ever broadcast) and
/// the room and connection stay healthy.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SendMessageError {
    #[error(transparent)]
    Store(#[from] StoreError),
}
