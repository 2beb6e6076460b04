//! Domain-level validation errors.

use thiserror::Error;

/// Validation errors raised by value object constructors.
///
/// Per the error taxonomy of this system, a validation failure on
/// client-supplied input is never fatal: callers log it and drop the
/// offending event.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("username must not be empty")]
    EmptyUsername,

    #[error("username too long: {0} chars (max {max})", max = super::value_object::MAX_NAME_LEN)]
    UsernameTooLong(usize),

    #[error("room name must not be empty")]
    EmptyRoomName,

    #[error("room name too long: {0} chars (max {max})", max = super::value_object::MAX_NAME_LEN)]
    RoomNameTooLong(usize),

    #[error("message must not be empty")]
    EmptyMessage,

    #[error("message too long: {0} chars (max {max})", max = super::value_object::MAX_MESSAGE_LEN)]
    MessageTooLong(usize),
}
