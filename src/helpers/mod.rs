pub(crate) mod form;
pub(crate) mod json;

pub use form::*;
pub use json::*;
