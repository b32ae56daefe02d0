//! Browser-side preview wiring tests.
//!
//! Run with: wasm-pack test --chrome --headless

#![cfg(target_arch = "wasm32")]

use post_preview::dom::Document;
use post_preview::{DEFAULT_HIDDEN_CLASS, DEFAULT_TRIGGER_CLASS, RevealOptions, init_previews_in};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn raw_document() -> web_sys::Document {
	web_sys::window().unwrap().document().unwrap()
}

/// Renders one post container into `<body>` and returns (trigger, preview).
fn render_post(n: usize) -> (web_sys::Element, web_sys::Element) {
	let doc = raw_document();
	let body = doc.body().unwrap();

	let container = doc.create_element("div").unwrap();

	let link = doc.create_element("a").unwrap();
	link.set_class_name(DEFAULT_TRIGGER_CLASS);
	link.set_attribute("href", &format!("#body-{n}")).unwrap();
	container.append_child(&link).unwrap();

	let preview = doc.create_element("div").unwrap();
	preview.set_id(&format!("body-{n}"));
	preview.set_class_name(DEFAULT_HIDDEN_CLASS);
	container.append_child(&preview).unwrap();

	body.append_child(&container).unwrap();
	(link, preview)
}

fn clear_body() {
	raw_document().body().unwrap().set_inner_html("");
}

fn click(element: &web_sys::Element) {
	element
		.clone()
		.dyn_into::<web_sys::HtmlElement>()
		.unwrap()
		.click();
}

#[wasm_bindgen_test]
fn click_reveals_preview_and_hides_trigger() {
	clear_body();
	let (link, preview) = render_post(1);

	let registry = init_previews_in(&Document::new(raw_document()), &RevealOptions::default())
		.expect("init should succeed");
	assert_eq!(registry.len(), 1);

	click(&link);

	assert!(link.class_list().contains(DEFAULT_HIDDEN_CLASS));
	assert!(!preview.class_list().contains(DEFAULT_HIDDEN_CLASS));
	registry.forget();
}

#[wasm_bindgen_test]
fn repeated_clicks_are_idempotent() {
	clear_body();
	let (link, preview) = render_post(2);

	let registry = init_previews_in(&Document::new(raw_document()), &RevealOptions::default())
		.expect("init should succeed");

	click(&link);
	click(&link);

	assert!(link.class_list().contains(DEFAULT_HIDDEN_CLASS));
	assert!(!preview.class_list().contains(DEFAULT_HIDDEN_CLASS));
	registry.forget();
}

#[wasm_bindgen_test]
fn missing_target_is_inert() {
	clear_body();
	let doc = raw_document();
	let body = doc.body().unwrap();

	let container = doc.create_element("div").unwrap();
	let link = doc.create_element("a").unwrap();
	link.set_class_name(DEFAULT_TRIGGER_CLASS);
	link.set_attribute("href", "#nowhere").unwrap();
	container.append_child(&link).unwrap();
	body.append_child(&container).unwrap();

	let registry = init_previews_in(&Document::new(doc), &RevealOptions::default())
		.expect("init should succeed");
	assert_eq!(registry.len(), 1);

	click(&link);

	assert!(!link.class_list().contains(DEFAULT_HIDDEN_CLASS));
	registry.forget();
}

#[wasm_bindgen_test]
fn zero_triggers_is_a_noop() {
	clear_body();

	let registry = init_previews_in(&Document::new(raw_document()), &RevealOptions::default())
		.expect("init should succeed");

	assert!(registry.is_empty());
}

#[wasm_bindgen_test]
fn ambient_document_is_available() {
	assert!(post_preview::document().is_some());
}
