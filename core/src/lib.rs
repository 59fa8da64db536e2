//! Core library for promptbatch.
//!
//! Turns a grid of rows and a set of completion providers into a
//! bounded-concurrency stream of chat-completion requests, each with its own
//! timeout and retry budget, and collects the answers back into the grid as
//! one output column per provider.

pub mod api;
pub mod catalog;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod grid;
pub mod template;
