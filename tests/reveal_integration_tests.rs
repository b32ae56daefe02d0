//! Integration tests for preview wiring, driven through the native DOM
//! backend with synthetic click dispatch.

#![cfg(not(target_arch = "wasm32"))]

use post_preview::dom::{Document, Element};
use post_preview::{
	DEFAULT_HIDDEN_CLASS, DEFAULT_TRIGGER_CLASS, RevealOptions, init_previews_in,
};
use rstest::rstest;

/// Builds one post container: a trigger link plus its hidden preview.
fn post_container(doc: &Document, n: usize) -> (Element, Element) {
	let container = Element::new("div");

	let link = Element::new("a");
	link.class_list_add(DEFAULT_TRIGGER_CLASS);
	link.set_attribute("href", &format!("#body-{n}"));
	container.append_child(&link);

	let preview = Element::new("div");
	preview.set_attribute("id", &format!("body-{n}"));
	preview.class_list_add(DEFAULT_HIDDEN_CLASS);
	container.append_child(&preview);

	doc.body().append_child(&container);
	(link, preview)
}

#[test]
fn click_reveals_preview_and_hides_trigger() {
	let doc = Document::new();
	let (link, preview) = post_container(&doc, 1);

	let registry = init_previews_in(&doc, &RevealOptions::default()).unwrap();
	assert_eq!(registry.len(), 1);

	let event = link.click();

	assert!(event.default_prevented());
	assert!(link.class_list_contains(DEFAULT_HIDDEN_CLASS));
	assert!(!preview.class_list_contains(DEFAULT_HIDDEN_CLASS));
}

#[test]
fn repeated_clicks_are_idempotent() {
	let doc = Document::new();
	let (link, preview) = post_container(&doc, 1);

	let _registry = init_previews_in(&doc, &RevealOptions::default()).unwrap();

	link.click();
	let after_one = (
		link.get_attribute("class"),
		preview.get_attribute("class"),
	);
	link.click();
	let after_two = (
		link.get_attribute("class"),
		preview.get_attribute("class"),
	);

	assert_eq!(after_one, after_two);
}

#[test]
fn missing_target_leaves_state_untouched() {
	let doc = Document::new();
	let container = Element::new("div");
	let link = Element::new("a");
	link.class_list_add(DEFAULT_TRIGGER_CLASS);
	link.set_attribute("href", "#nowhere");
	container.append_child(&link);
	doc.body().append_child(&container);

	let registry = init_previews_in(&doc, &RevealOptions::default()).unwrap();
	assert_eq!(registry.len(), 1);

	let event = link.click();

	// Navigation is still suppressed, but nothing visible changes.
	assert!(event.default_prevented());
	assert!(!link.class_list_contains(DEFAULT_HIDDEN_CLASS));
}

#[test]
fn zero_triggers_is_a_noop() {
	let doc = Document::new();
	let bystander = Element::new("div");
	bystander.set_attribute("class", "post-body");
	doc.body().append_child(&bystander);

	let registry = init_previews_in(&doc, &RevealOptions::default()).unwrap();

	assert!(registry.is_empty());
	assert_eq!(bystander.get_attribute("class"), Some("post-body".to_string()));
}

#[rstest]
#[case(2)]
#[case(5)]
fn triggers_toggle_independently(#[case] count: usize) {
	let doc = Document::new();
	let posts: Vec<_> = (0..count).map(|n| post_container(&doc, n)).collect();

	let registry = init_previews_in(&doc, &RevealOptions::default()).unwrap();
	assert_eq!(registry.len(), count);

	// Reveal only the first post.
	posts[0].0.click();

	assert!(posts[0].0.class_list_contains(DEFAULT_HIDDEN_CLASS));
	assert!(!posts[0].1.class_list_contains(DEFAULT_HIDDEN_CLASS));
	for (link, preview) in &posts[1..] {
		assert!(!link.class_list_contains(DEFAULT_HIDDEN_CLASS));
		assert!(preview.class_list_contains(DEFAULT_HIDDEN_CLASS));
	}
}

#[test]
fn target_resolution_is_scoped_to_the_container() {
	let doc = Document::new();

	// The trigger's container holds no #body-1; a sibling container does.
	let first = Element::new("div");
	let link = Element::new("a");
	link.class_list_add(DEFAULT_TRIGGER_CLASS);
	link.set_attribute("href", "#body-1");
	first.append_child(&link);
	doc.body().append_child(&first);

	let second = Element::new("div");
	let outside = Element::new("div");
	outside.set_attribute("id", "body-1");
	outside.class_list_add(DEFAULT_HIDDEN_CLASS);
	second.append_child(&outside);
	doc.body().append_child(&second);

	let _registry = init_previews_in(&doc, &RevealOptions::default()).unwrap();
	link.click();

	// The out-of-scope element must not be revealed.
	assert!(outside.class_list_contains(DEFAULT_HIDDEN_CLASS));
	assert!(!link.class_list_contains(DEFAULT_HIDDEN_CLASS));
}

#[test]
fn custom_classes_are_honored() {
	let doc = Document::new();
	let container = Element::new("div");

	let link = Element::new("a");
	link.class_list_add("expand-comment");
	link.set_attribute("href", "#comment-9");
	container.append_child(&link);

	let preview = Element::new("div");
	preview.set_attribute("id", "comment-9");
	preview.class_list_add("is-hidden");
	container.append_child(&preview);
	doc.body().append_child(&container);

	let options = RevealOptions::new()
		.trigger_class("expand-comment")
		.hidden_class("is-hidden");
	let _registry = init_previews_in(&doc, &options).unwrap();

	link.click();

	assert!(link.class_list_contains("is-hidden"));
	assert!(!preview.class_list_contains("is-hidden"));
}

#[test]
fn dropping_the_registry_detaches_all_listeners() {
	let doc = Document::new();
	let (link, preview) = post_container(&doc, 1);

	let registry = init_previews_in(&doc, &RevealOptions::default()).unwrap();
	drop(registry);

	let event = link.click();

	assert!(!event.default_prevented());
	assert!(!link.class_list_contains(DEFAULT_HIDDEN_CLASS));
	assert!(preview.class_list_contains(DEFAULT_HIDDEN_CLASS));
}
