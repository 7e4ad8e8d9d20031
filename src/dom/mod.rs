pub mod builder;
pub mod page;
pub mod parse;
pub mod sanitize;
pub mod serialize;
pub mod tree;
