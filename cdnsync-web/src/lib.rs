//! Request-time helpers for assets served from the CDN origin.
//!
//! - [`LocaleResolver`] fetches translation bundles with a default-locale fallback
//! - [`ImageLoader`] rewrites image references to resized CDN URLs

pub mod config;
pub mod error;
pub mod image;
pub mod locale;

pub use config::WebConfig;
pub use error::{WebError, WebResult};
pub use image::ImageLoader;
pub use locale::{LocaleResolver, Messages, ResolvedMessages, locale_from_cookie_header};
