pub mod builtin;
pub mod responses;

pub use builtin::dispatcher;
