mod link;
pub use link::Link;
mod link_set;
pub use link_set::LinkSet;
mod links;
pub use links::Links;
mod error;
pub use error::DecodeError;
