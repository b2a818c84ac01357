//! # Command line interface for avgtracks
//! [avgtracks command line interface and options.](cli::Cli)
//! # README for avgtracks
#![doc = include_str!("../README.md")]
/// Averaging bed files into bedGraph files.
pub mod average;
/// Bed records and their row means.
pub mod bed;
/// Command line interface for avgtracks.
pub mod cli;
/// Errors raised while averaging.
pub mod error;
/// Module for automatically reading a writing compressed or uncompressed files.
pub mod myio;
