//! Pure decision logic of the review poller: response validation,
//! status formatting and the notification memory.

pub mod formatter;
pub mod memory;
pub mod validator;
