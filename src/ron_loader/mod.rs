//! Loading of writer settings from `*.writer.ron` files.

pub mod loader;
