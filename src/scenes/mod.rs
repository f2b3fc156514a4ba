//! Built-in scenes that are assembled in code rather than loaded from JSON.

pub mod huffman;
