pub mod pricing;
pub mod response;
pub mod widget_config;
