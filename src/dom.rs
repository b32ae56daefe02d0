//! DOM abstraction layer.
//!
//! The reveal logic is written once against this module and runs on two
//! backends: on `wasm32` the types are thin wrappers over `web-sys`, while on
//! native targets they are an in-memory element tree so behavior can be
//! exercised with plain `cargo test`, including synthetic event dispatch.
//!
//! Only the handful of operations the crate needs are exposed: attribute
//! access, parent lookup, scoped selector queries, class-list mutation, and
//! event listener attachment. The native selector engine understands the
//! subset this crate emits: `#id`, `.class`, and bare tag names.

#[cfg(not(target_arch = "wasm32"))]
use std::cell::{Cell, RefCell};
#[cfg(not(target_arch = "wasm32"))]
use std::collections::HashMap;
#[cfg(not(target_arch = "wasm32"))]
use std::rc::{Rc, Weak};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::closure::Closure;

/// The event argument passed to listeners.
///
/// On `wasm32` this is [`web_sys::Event`]; listeners get the real browser
/// event. On native targets it is a synthetic event produced by
/// [`Element::dispatch`].
#[cfg(target_arch = "wasm32")]
pub type Event = web_sys::Event;

/// Synthetic event for the native backend.
///
/// Clones share state, so `prevent_default` calls made inside a listener are
/// visible to the dispatching test afterwards.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct Event {
	inner: Rc<EventState>,
}

#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug)]
struct EventState {
	event_type: String,
	default_prevented: Cell<bool>,
}

#[cfg(not(target_arch = "wasm32"))]
impl Event {
	fn new(event_type: &str) -> Self {
		Self {
			inner: Rc::new(EventState {
				event_type: event_type.to_string(),
				default_prevented: Cell::new(false),
			}),
		}
	}

	/// Returns the event type (e.g. `"click"`).
	pub fn event_type(&self) -> &str {
		&self.inner.event_type
	}

	/// Suppresses the default action for this event.
	pub fn prevent_default(&self) {
		self.inner.default_prevented.set(true);
	}

	/// Returns true if `prevent_default` was called.
	pub fn default_prevented(&self) -> bool {
		self.inner.default_prevented.get()
	}
}

/// Error returned when a selector query is rejected by the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorError {
	/// The selector that failed.
	pub selector: String,
	/// The reason reported by the backend.
	pub reason: String,
}

impl std::fmt::Display for SelectorError {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "selector '{}' failed: {}", self.selector, self.reason)
	}
}

impl std::error::Error for SelectorError {}

#[cfg(not(target_arch = "wasm32"))]
type Listener = Rc<dyn Fn(Event)>;

#[cfg(not(target_arch = "wasm32"))]
struct NodeState {
	tag: String,
	attributes: HashMap<String, String>,
	classes: Vec<String>,
	children: Vec<Element>,
	parent: Weak<RefCell<NodeState>>,
	listeners: Vec<(u64, String, Listener)>,
	next_listener_id: u64,
}

/// A DOM element.
///
/// Cheaply cloneable; clones refer to the same underlying node.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone)]
pub struct Element {
	inner: web_sys::Element,
}

/// A DOM element (native in-memory backend).
///
/// Cheaply cloneable; clones refer to the same underlying node.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Clone)]
pub struct Element {
	node: Rc<RefCell<NodeState>>,
}

#[cfg(target_arch = "wasm32")]
impl Element {
	/// Wraps a raw `web_sys::Element`.
	pub fn new(inner: web_sys::Element) -> Self {
		Self { inner }
	}

	/// Returns the underlying `web_sys::Element`.
	pub fn raw(&self) -> &web_sys::Element {
		&self.inner
	}

	/// Returns the value of the given attribute, if present.
	pub fn get_attribute(&self, name: &str) -> Option<String> {
		self.inner.get_attribute(name)
	}

	/// Returns the parent element, if any.
	pub fn parent_element(&self) -> Option<Element> {
		self.inner.parent_element().map(Element::new)
	}

	/// Returns the first descendant matching the selector.
	///
	/// Invalid selectors resolve to `None`; the reveal contract treats
	/// malformed references as inert rather than fatal.
	pub fn query_selector(&self, selector: &str) -> Option<Element> {
		self.inner
			.query_selector(selector)
			.ok()
			.flatten()
			.map(Element::new)
	}

	/// Adds a class to the element's class list.
	pub fn class_list_add(&self, class: &str) {
		let _ = self.inner.class_list().add_1(class);
	}

	/// Removes a class from the element's class list.
	pub fn class_list_remove(&self, class: &str) {
		let _ = self.inner.class_list().remove_1(class);
	}

	/// Returns true if the element's class list contains the class.
	pub fn class_list_contains(&self, class: &str) -> bool {
		self.inner.class_list().contains(class)
	}

	/// Registers an event listener and returns its owning handle.
	///
	/// The listener stays attached as long as the handle is alive (or has
	/// been [`EventHandle::forget`]-ed); dropping the handle detaches it.
	pub fn add_event_listener(
		&self,
		event_type: &str,
		handler: impl Fn(Event) + 'static,
	) -> EventHandle {
		let closure = Closure::wrap(Box::new(move |event: web_sys::Event| {
			handler(event);
		}) as Box<dyn FnMut(web_sys::Event)>);

		self.inner
			.add_event_listener_with_callback(event_type, closure.as_ref().unchecked_ref())
			.expect("Failed to add event listener");

		EventHandle {
			element: self.inner.clone(),
			event_type: event_type.to_string(),
			closure: Some(closure),
		}
	}
}

#[cfg(not(target_arch = "wasm32"))]
impl Element {
	/// Creates a detached element with the given tag name.
	pub fn new(tag: &str) -> Self {
		Self {
			node: Rc::new(RefCell::new(NodeState {
				tag: tag.to_string(),
				attributes: HashMap::new(),
				classes: Vec::new(),
				children: Vec::new(),
				parent: Weak::new(),
				listeners: Vec::new(),
				next_listener_id: 0,
			})),
		}
	}

	/// Sets an attribute. `class` is kept in sync with the class list.
	pub fn set_attribute(&self, name: &str, value: &str) {
		if name == "class" {
			self.node.borrow_mut().classes =
				value.split_whitespace().map(str::to_string).collect();
			return;
		}
		self.node
			.borrow_mut()
			.attributes
			.insert(name.to_string(), value.to_string());
	}

	/// Returns the value of the given attribute, if present.
	pub fn get_attribute(&self, name: &str) -> Option<String> {
		let node = self.node.borrow();
		if name == "class" {
			if node.classes.is_empty() {
				return None;
			}
			return Some(node.classes.join(" "));
		}
		node.attributes.get(name).cloned()
	}

	/// Appends a child element, reparenting it under this node.
	pub fn append_child(&self, child: &Element) {
		child.node.borrow_mut().parent = Rc::downgrade(&self.node);
		self.node.borrow_mut().children.push(child.clone());
	}

	/// Returns the parent element, if any.
	pub fn parent_element(&self) -> Option<Element> {
		self.node.borrow().parent.upgrade().map(|node| Element { node })
	}

	/// Returns the first descendant matching the selector (tree order).
	pub fn query_selector(&self, selector: &str) -> Option<Element> {
		for child in self.node.borrow().children.iter() {
			if child.matches(selector) {
				return Some(child.clone());
			}
			if let Some(found) = child.query_selector(selector) {
				return Some(found);
			}
		}
		None
	}

	/// Adds a class to the element's class list.
	pub fn class_list_add(&self, class: &str) {
		let mut node = self.node.borrow_mut();
		if !node.classes.iter().any(|c| c == class) {
			node.classes.push(class.to_string());
		}
	}

	/// Removes a class from the element's class list.
	pub fn class_list_remove(&self, class: &str) {
		self.node.borrow_mut().classes.retain(|c| c != class);
	}

	/// Returns true if the element's class list contains the class.
	pub fn class_list_contains(&self, class: &str) -> bool {
		self.node.borrow().classes.iter().any(|c| c == class)
	}

	/// Registers an event listener and returns its owning handle.
	pub fn add_event_listener(
		&self,
		event_type: &str,
		handler: impl Fn(Event) + 'static,
	) -> EventHandle {
		let mut node = self.node.borrow_mut();
		let id = node.next_listener_id;
		node.next_listener_id += 1;
		node.listeners
			.push((id, event_type.to_string(), Rc::new(handler)));
		EventHandle {
			node: Rc::downgrade(&self.node),
			event_type: event_type.to_string(),
			id,
			forgotten: false,
		}
	}

	/// Dispatches a synthetic event to this element's listeners.
	///
	/// Returns the event so callers can inspect `default_prevented`.
	pub fn dispatch(&self, event_type: &str) -> Event {
		let event = Event::new(event_type);
		// Snapshot listeners first: handlers may re-borrow this node.
		let listeners: Vec<Listener> = self
			.node
			.borrow()
			.listeners
			.iter()
			.filter(|(_, ty, _)| ty == event_type)
			.map(|(_, _, listener)| Rc::clone(listener))
			.collect();
		for listener in listeners {
			listener(event.clone());
		}
		event
	}

	/// Dispatches a synthetic click.
	pub fn click(&self) -> Event {
		self.dispatch("click")
	}

	fn matches(&self, selector: &str) -> bool {
		let node = self.node.borrow();
		if let Some(id) = selector.strip_prefix('#') {
			return node.attributes.get("id").map(String::as_str) == Some(id);
		}
		if let Some(class) = selector.strip_prefix('.') {
			return node.classes.iter().any(|c| c == class);
		}
		node.tag == selector
	}

	fn collect_matching(&self, selector: &str, out: &mut Vec<Element>) {
		for child in self.node.borrow().children.iter() {
			if child.matches(selector) {
				out.push(child.clone());
			}
			child.collect_matching(selector, out);
		}
	}
}

#[cfg(not(target_arch = "wasm32"))]
impl std::fmt::Debug for Element {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let node = self.node.borrow();
		f.debug_struct("Element")
			.field("tag", &node.tag)
			.field("classes", &node.classes)
			.field("children", &node.children.len())
			.finish()
	}
}

/// Owns a registered event listener.
///
/// Dropping the handle detaches the listener; [`EventHandle::forget`] leaks
/// it instead, the normal mode for page-lifetime handlers.
#[cfg(target_arch = "wasm32")]
pub struct EventHandle {
	element: web_sys::Element,
	event_type: String,
	closure: Option<Closure<dyn FnMut(web_sys::Event)>>,
}

/// Owns a registered event listener (native backend).
#[cfg(not(target_arch = "wasm32"))]
pub struct EventHandle {
	node: Weak<RefCell<NodeState>>,
	event_type: String,
	id: u64,
	forgotten: bool,
}

#[cfg(target_arch = "wasm32")]
impl EventHandle {
	/// Leaks the listener so it stays attached for the page lifetime.
	pub fn forget(mut self) {
		if let Some(closure) = self.closure.take() {
			closure.forget();
		}
	}
}

#[cfg(target_arch = "wasm32")]
impl Drop for EventHandle {
	fn drop(&mut self) {
		if let Some(closure) = &self.closure {
			let _ = self.element.remove_event_listener_with_callback(
				&self.event_type,
				closure.as_ref().unchecked_ref(),
			);
		}
	}
}

#[cfg(not(target_arch = "wasm32"))]
impl EventHandle {
	/// Leaks the listener so it stays attached for the page lifetime.
	pub fn forget(mut self) {
		self.forgotten = true;
	}
}

#[cfg(not(target_arch = "wasm32"))]
impl Drop for EventHandle {
	fn drop(&mut self) {
		if self.forgotten {
			return;
		}
		if let Some(node) = self.node.upgrade() {
			node.borrow_mut().listeners.retain(|(id, _, _)| *id != self.id);
		}
	}
}

impl std::fmt::Debug for EventHandle {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("EventHandle")
			.field("event_type", &self.event_type)
			.finish()
	}
}

/// The page document.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone)]
pub struct Document {
	inner: web_sys::Document,
}

/// The page document (native backend): a buildable root element.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct Document {
	root: Element,
}

#[cfg(target_arch = "wasm32")]
impl Document {
	/// Wraps a raw `web_sys::Document`.
	pub fn new(inner: web_sys::Document) -> Self {
		Self { inner }
	}

	/// Returns all elements matching the selector, in tree order.
	pub fn query_selector_all(&self, selector: &str) -> Result<Vec<Element>, SelectorError> {
		let list = self.inner.query_selector_all(selector).map_err(|err| SelectorError {
			selector: selector.to_string(),
			reason: format!("{:?}", err),
		})?;
		let mut elements = Vec::new();
		for index in 0..list.length() {
			if let Some(node) = list.item(index) {
				if let Ok(element) = node.dyn_into::<web_sys::Element>() {
					elements.push(Element::new(element));
				}
			}
		}
		Ok(elements)
	}

	/// Returns the first element matching the selector.
	pub fn query_selector(&self, selector: &str) -> Result<Option<Element>, SelectorError> {
		self.inner
			.query_selector(selector)
			.map(|found| found.map(Element::new))
			.map_err(|err| SelectorError {
				selector: selector.to_string(),
				reason: format!("{:?}", err),
			})
	}
}

#[cfg(not(target_arch = "wasm32"))]
impl Document {
	/// Creates an empty document with a `body` root.
	pub fn new() -> Self {
		Self {
			root: Element::new("body"),
		}
	}

	/// Returns the document body, the attachment point for test markup.
	pub fn body(&self) -> Element {
		self.root.clone()
	}

	/// Returns all elements matching the selector, in tree order.
	pub fn query_selector_all(&self, selector: &str) -> Result<Vec<Element>, SelectorError> {
		let mut elements = Vec::new();
		if self.root.matches(selector) {
			elements.push(self.root.clone());
		}
		self.root.collect_matching(selector, &mut elements);
		Ok(elements)
	}

	/// Returns the first element matching the selector.
	pub fn query_selector(&self, selector: &str) -> Result<Option<Element>, SelectorError> {
		Ok(self.query_selector_all(selector)?.into_iter().next())
	}
}

#[cfg(not(target_arch = "wasm32"))]
impl Default for Document {
	fn default() -> Self {
		Self::new()
	}
}

/// Returns the current page document.
///
/// `None` outside a browser context. The native backend has no ambient
/// document; tests build one with [`Document::new`] and pass it explicitly.
#[cfg(target_arch = "wasm32")]
pub fn document() -> Option<Document> {
	web_sys::window()?.document().map(Document::new)
}

/// Returns the current page document (native backend: always `None`).
#[cfg(not(target_arch = "wasm32"))]
pub fn document() -> Option<Document> {
	None
}
