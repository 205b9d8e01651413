//! # todo
//!
//! A small command-line to-do list. Tasks live in a document store and are
//! addressed by name.
//!
//! ```bash
//! todo add "buy milk" "2%"
//! todo list
//! todo complete "buy milk"
//! todo delete "buy milk"
//! ```
//!
//! ## Data Storage
//!
//! By default tasks are saved under the local data directory:
//! *   Linux: `~/.local/share/todo/todo/task.json`
//! *   macOS: `~/Library/Application Support/todo/todo/task.json`
//! *   Windows: `%LOCALAPPDATA%\todo\todo\task.json`
//!
//! Point elsewhere with `--db <uri>`, the `TODO_URI` environment variable or
//! `uri = "..."` in `~/.config/todo/config.toml`.

pub mod commands;
pub mod config;
pub mod error;
pub mod models;
pub mod render;
pub mod repository;
pub mod storage;
