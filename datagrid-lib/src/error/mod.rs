//! Error types

mod action;
mod export;
mod fetch;
mod store;

pub use action::*;
pub use export::*;
pub use fetch::*;
pub use store::*;
