//! Headless runtime for embeddable contact, pricing and booking widgets.
//!
//! A host page is parsed into an owned [`dom::tree::RenderTree`]; the
//! [`widget::loader::WidgetLoader`] discovers the mount, injects assets,
//! fetches the widget payload and renders it. Browser side effects go through
//! [`host::HostEnvironment`], HTTP through [`net::api::WidgetApi`].

pub mod cli;
pub mod dom;
pub mod error;
pub mod form;
pub mod host;
pub mod model;
pub mod net;
pub mod pricing;
pub mod response;
pub mod trace;
pub mod widget;

pub use error::WidgetError;
pub use widget::loader::{LoadedWidget, LoaderSettings, WidgetLoader};
pub use widget::variant::WidgetVariant;
