//! WASM bindings for rendering in the browser.
//!
//! This module exposes the renderers to JavaScript via wasm-bindgen. Inputs
//! are docutils XML strings.

use wasm_bindgen::prelude::*;

use crate::import::parse_docutils_xml;
use crate::markdown::MarkdownRenderer;
use crate::notebook::NotebookRenderer;

/// Initialize panic hook for better error messages in the browser console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "wasm")]
    console_error_panic_hook::set_once();
}

fn to_js(e: crate::Error) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Render docutils XML to Markdown.
#[wasm_bindgen]
pub fn render_markdown(xml: &str) -> Result<String, JsValue> {
    let doc = parse_docutils_xml(xml).map_err(to_js)?;
    MarkdownRenderer::new()
        .and_then(|mut renderer| renderer.render(&doc))
        .map_err(to_js)
}

/// Render docutils XML to nbformat v4 JSON.
#[wasm_bindgen]
pub fn render_notebook(xml: &str) -> Result<String, JsValue> {
    let doc = parse_docutils_xml(xml).map_err(to_js)?;
    NotebookRenderer::new()
        .and_then(|mut renderer| renderer.render_to_string(&doc))
        .map_err(to_js)
}
