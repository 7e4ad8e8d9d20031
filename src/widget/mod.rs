pub mod assets;
pub mod branding;
pub mod discovery;
pub mod loader;
pub mod mount;
pub mod variant;
