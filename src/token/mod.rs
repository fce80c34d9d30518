//! Token data model and encoding

mod header;
#[allow(clippy::module_inception)]
mod token;

pub use header::{Header, TOKEN_TYPE};
pub use token::Token;
