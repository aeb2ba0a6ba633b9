//! Track model, MP3 validation and file import.
//!
//! The `Track` type lives in `library::model`; validation rules (extension,
//! header sniff, size cap) live in `library::validate` and path import in
//! `library::import`.

mod import;
mod model;
mod validate;

pub use import::*;
pub use model::*;
pub use validate::*;

#[cfg(test)]
mod tests;
