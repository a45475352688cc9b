#![allow(dead_code)]

pub use builders::{response, RecordBuilder};
