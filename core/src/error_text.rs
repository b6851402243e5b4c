//! Text for the `Error in name(): ...` line, for any error type.
//!
//! [`error_text!`](crate::error_text) picks, at the call site, the best
//! rendering the concrete error type supports: `Display`, then `Debug`,
//! then the type name. It has to be a macro: inside a generic function the
//! choice would already be fixed to the last tier.

use std::any::type_name;
use std::fmt;

#[doc(hidden)]
pub struct ErrorText<'a, E>(pub &'a E);

#[doc(hidden)]
pub trait DisplayText {
    fn error_text(&self) -> String;
}

#[doc(hidden)]
pub trait DebugText {
    fn error_text(&self) -> String;
}

#[doc(hidden)]
pub trait TypeNameText {
    fn error_text(&self) -> String;
}

impl<E: fmt::Display> DisplayText for &&ErrorText<'_, E> {
    fn error_text(&self) -> String {
        self.0.to_string()
    }
}

impl<E: fmt::Debug> DebugText for &ErrorText<'_, E> {
    fn error_text(&self) -> String {
        format!("{:?}", self.0)
    }
}

impl<E> TypeNameText for ErrorText<'_, E> {
    fn error_text(&self) -> String {
        type_name::<E>().to_string()
    }
}

/// Render `&err` with `Display` if it has one, else `Debug`, else its type
/// name.
///
/// ```
/// #[derive(Debug)]
/// struct Opaque;
///
/// assert_eq!(time_executioner::error_text!(&"disk full"), "disk full");
/// assert_eq!(time_executioner::error_text!(&Opaque), "Opaque");
/// ```
#[macro_export]
macro_rules! error_text {
    ($err:expr) => {{
        #[allow(unused_imports)]
        use $crate::error_text::{DebugText as _, DisplayText as _, TypeNameText as _};
        #[allow(clippy::needless_borrow)]
        let text = (&&&$crate::error_text::ErrorText($err)).error_text();
        text
    }};
}
