//! Preview Revealer.
//!
//! Wires the "show post body" links of a server-rendered dashboard: each
//! trigger link carries, in its `href` fragment, the id of a hidden preview
//! element inside the same container. Clicking the link suppresses
//! navigation, hides the link, and reveals the preview. The toggle is
//! one-directional; there is no re-hide path.
//!
//! Initialization runs once, synchronously. Triggers whose target does not
//! resolve stay inert: their click handler only suppresses navigation.

use crate::dom::{Document, EventHandle, SelectorError, document};
use std::collections::HashMap;
use thiserror::Error;

/// Class carried by trigger links in the rendered markup.
pub const DEFAULT_TRIGGER_CLASS: &str = "show-post-body";

/// Marker class used as the visibility flag. Styling lives in the page's
/// stylesheet; this crate only toggles the class.
pub const DEFAULT_HIDDEN_CLASS: &str = "visuallyhidden";

/// Errors that can occur while wiring previews.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RevealError {
	/// No document is available (e.g. outside a browser context).
	#[error("document is not available in this environment")]
	DocumentUnavailable,
	/// The trigger selector was rejected by the DOM backend.
	#[error(transparent)]
	SelectorFailed(#[from] SelectorError),
}

/// Configuration for preview wiring.
///
/// The defaults match the markup contract of the dashboard templates:
/// `.show-post-body` triggers and the `visuallyhidden` marker class.
///
/// # Example
///
/// ```
/// use post_preview::RevealOptions;
///
/// let options = RevealOptions::new()
/// 	.trigger_class("expand-comment")
/// 	.hidden_class("is-hidden");
/// assert_eq!(options.trigger_selector(), ".expand-comment");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevealOptions {
	trigger_class: String,
	hidden_class: String,
}

impl Default for RevealOptions {
	fn default() -> Self {
		Self::new()
	}
}

impl RevealOptions {
	/// Creates options with the default trigger and marker classes.
	pub fn new() -> Self {
		Self {
			trigger_class: DEFAULT_TRIGGER_CLASS.to_string(),
			hidden_class: DEFAULT_HIDDEN_CLASS.to_string(),
		}
	}

	/// Sets the class that marks trigger links.
	pub fn trigger_class(mut self, class: impl Into<String>) -> Self {
		self.trigger_class = class.into();
		self
	}

	/// Sets the marker class toggled on trigger and target.
	pub fn hidden_class(mut self, class: impl Into<String>) -> Self {
		self.hidden_class = class.into();
		self
	}

	/// Returns the CSS selector used to find triggers.
	pub fn trigger_selector(&self) -> String {
		format!(".{}", self.trigger_class)
	}
}

/// Owns the event handles created during initialization.
///
/// Listeners stay attached while the registry is alive. Dropping the
/// registry detaches them; [`RevealRegistry::forget`] leaks them for the
/// page lifetime, the normal mode for a fire-and-forget boot.
#[derive(Debug, Default)]
pub struct RevealRegistry {
	handles: HashMap<String, Vec<EventHandle>>,
}

impl RevealRegistry {
	/// Creates an empty registry.
	pub fn new() -> Self {
		Self::default()
	}

	fn register(&mut self, fragment: impl Into<String>, handle: EventHandle) {
		self.handles.entry(fragment.into()).or_default().push(handle);
	}

	/// Returns the number of distinct target fragments wired.
	pub fn len(&self) -> usize {
		self.handles.len()
	}

	/// Returns true if no triggers were wired.
	pub fn is_empty(&self) -> bool {
		self.handles.is_empty()
	}

	/// Detaches all listeners wired for the given fragment.
	pub fn unregister(&mut self, fragment: &str) {
		self.handles.remove(fragment);
	}

	/// Detaches all wired listeners.
	pub fn clear(&mut self) {
		self.handles.clear();
	}

	/// Leaks every handle so the listeners live for the page lifetime.
	pub fn forget(self) {
		for handle in self.handles.into_values().flatten() {
			handle.forget();
		}
	}
}

/// Wires preview triggers found in the ambient page document.
///
/// Convenience wrapper around [`init_previews_in`] using [`document`].
pub fn init_previews(options: &RevealOptions) -> Result<RevealRegistry, RevealError> {
	let doc = document().ok_or(RevealError::DocumentUnavailable)?;
	init_previews_in(&doc, options)
}

/// Wires preview triggers found in the given document.
///
/// For each element matching the trigger selector, reads its `href`
/// attribute, resolves that id selector once within the trigger's parent
/// container, and attaches a click listener that hides the trigger and
/// reveals the target. A page with zero triggers is a no-op and yields an
/// empty registry.
pub fn init_previews_in(
	doc: &Document,
	options: &RevealOptions,
) -> Result<RevealRegistry, RevealError> {
	let triggers = doc.query_selector_all(&options.trigger_selector())?;
	let mut registry = RevealRegistry::new();

	if triggers.is_empty() {
		crate::debug_log!("no '{}' triggers on this page", options.trigger_class);
		return Ok(registry);
	}

	for trigger in triggers {
		let Some(fragment) = trigger.get_attribute("href") else {
			crate::warn_log!(
				"'{}' trigger has no href, leaving it unwired",
				options.trigger_class
			);
			continue;
		};

		// Resolve the target once, scoped to the trigger's container.
		let target = trigger
			.parent_element()
			.and_then(|container| container.query_selector(&fragment));
		if target.is_none() {
			crate::warn_log!("no preview target matches '{}', trigger stays inert", fragment);
		}

		let handle = trigger.add_event_listener("click", {
			let trigger = trigger.clone();
			let hidden_class = options.hidden_class.clone();
			move |event| {
				event.prevent_default();
				let Some(target) = &target else {
					return;
				};
				trigger.class_list_add(&hidden_class);
				target.class_list_remove(&hidden_class);
			}
		});
		registry.register(fragment, handle);
	}

	crate::debug_log!("wired {} preview trigger(s)", registry.len());
	Ok(registry)
}

/// Boot entry for the browser: wires the previews of the current page with
/// default options and leaves the listeners attached for the page lifetime.
///
/// Failures are logged to the console; a page without the expected markup is
/// not an error.
pub fn launch() {
	#[cfg(feature = "console_error_panic_hook")]
	console_error_panic_hook::set_once();

	match init_previews(&RevealOptions::default()) {
		Ok(registry) => {
			crate::info_log!("post previews ready ({} trigger(s))", registry.len());
			registry.forget();
		}
		Err(err) => crate::error_log!("preview wiring failed: {}", err),
	}
}
