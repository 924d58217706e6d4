//! Live form validation.
//!
//! The pieces, leaf to root:
//!
//! - [`validate`] / [`Rules`]: pure checks from a field's state to a [`Verdict`]
//! - [`presenter`]: renders or clears the error annotation next to one field
//! - [`FormValidationController`]: wires both to blur/input events on every
//!   form control of the page
//!
//! # Example
//!
//! ```
//! use sitekit::config::Messages;
//! use sitekit::validation::{Field, FieldKind, Verdict, validate};
//!
//! let field = Field::new("not-an-email", FieldKind::Email, true);
//! assert_eq!(
//!     validate(&field, &Messages::default()),
//!     Verdict::invalid("Please enter a valid email address")
//! );
//! ```

mod controller;
mod field;
pub mod presenter;
mod result;
mod validator;

pub use controller::FormValidationController;
pub use field::{Field, FieldKind};
pub use presenter::{ERROR_CLASS, ERROR_MESSAGE_CLASS};
pub use result::Verdict;
pub use validator::{Rules, is_valid_email, is_valid_phone, validate};
