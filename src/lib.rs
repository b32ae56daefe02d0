//! Post-Preview - Progressive Disclosure for Server-Rendered Pages
//!
//! A small WASM frontend enhancement built on wasm-bindgen and web-sys.
//! Dashboard templates render each post with a "show post body" link whose
//! `href` fragment names a hidden preview element in the same container;
//! this crate wires a click handler per link that suppresses navigation,
//! hides the link, and reveals the preview.
//!
//! ## Features
//!
//! - **One-directional reveal**: a click always shows the preview and hides
//!   the trigger; repeated clicks are harmless.
//! - **Inert on bad markup**: a trigger without an `href`, or whose fragment
//!   resolves to nothing, never errors; it simply stays inert.
//! - **Dual-target DOM layer**: `web-sys` in the browser, an in-memory tree
//!   on native targets so the behavior runs under plain `cargo test`.
//! - **Low-level only**: no framework dependency; just wasm-bindgen, web-sys,
//!   and a thiserror-based error surface.
//!
//! ## Example
//!
//! Boot once from the page's WASM entry point:
//!
//! ```ignore
//! use post_preview::launch;
//!
//! #[wasm_bindgen(start)]
//! pub fn start() {
//!     launch();
//! }
//! ```
//!
//! Or keep control of the listener lifetimes:
//!
//! ```ignore
//! use post_preview::{RevealOptions, init_previews};
//!
//! let registry = init_previews(&RevealOptions::default())?;
//! // Listeners detach when the registry is dropped; leak them instead:
//! registry.forget();
//! ```

#![warn(missing_docs)]

// Core modules
pub mod dom;
pub mod logging;
pub mod reveal;

// Re-export commonly used types
pub use dom::{Document, Element, Event, EventHandle, SelectorError, document};
pub use reveal::{
	DEFAULT_HIDDEN_CLASS, DEFAULT_TRIGGER_CLASS, RevealError, RevealOptions, RevealRegistry,
	init_previews, init_previews_in, launch,
};

// Logging macros are exported via #[macro_export]:
// post_preview::debug_log!, info_log!, warn_log!, error_log!.
