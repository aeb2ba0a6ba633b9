//! Playlist persistence: one JSON file holding the ordered track list.

mod store;

pub use store::*;

#[cfg(test)]
mod tests;
