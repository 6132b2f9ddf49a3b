//! izh CLI crate
//!
//! Command-line front end for the fixed-point Izhikevich neuron core:
//! - run: simulate a stimulus pattern and print or export the result
//! - frame: decode a 4-byte parameter frame and show its bitstream
//! - sweep: constant-stimulus response curve
//! - init: write a default configuration file
//!
//! The binary (src/main.rs) wires up logging and argument parsing, then calls
//! [`IzhCli::execute`]. The library surface exists so commands can be driven
//! from tests without spawning a process.

pub mod commands;
pub mod config;
pub mod error;

pub use commands::IzhCli;
