//! Request and response types for the JSON boundary.

mod requests;
mod responses;

pub use requests::*;
pub use responses::*;
