//! Errors surfaced by the engine and by game components.
//!
//! Every subsystem has its own typed `Error`; at the application level they are
//! all carried as a `failure::Error`.

pub use failure::Error;

pub type Result<T> = ::std::result::Result<T, Error>;
