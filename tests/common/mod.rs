#![allow(dead_code)]

pub mod fixtures;
pub mod stub_api;
