mod entry;
mod link;
mod set;
mod source;

pub use entry::*;
pub use link::*;
pub use set::*;
pub use source::*;
