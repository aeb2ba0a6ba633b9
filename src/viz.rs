//! Frequency-spectrum analysis for the visualizer pane.

mod analyser;

pub use analyser::*;

#[cfg(test)]
mod tests;
