#![allow(dead_code)]

pub mod loader;
pub mod reporter;
pub mod summarizer;
