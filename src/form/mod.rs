pub mod descriptor;
pub mod engine;
pub mod introspect;
pub mod payload;
pub mod prefill;
pub mod rating;
pub mod serialize;
pub mod signature;
pub mod validate;
