#![allow(dead_code)]

pub mod fixtures;
pub mod migrators;

pub use fixtures::*;
pub use migrators::*;
