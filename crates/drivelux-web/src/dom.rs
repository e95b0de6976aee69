#![forbid(unsafe_code)]

//! Small `web-sys` helpers shared by the site binding.

use chrono::NaiveDate;
use drivelux_core::viewport::ViewportProbe;
use drivelux_core::{SiteError, SiteResult};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Element, Event, EventTarget, HtmlElement, NodeList, ScrollBehavior,
    ScrollIntoViewOptions, ScrollLogicalPosition, ScrollToOptions, Window,
};

pub(crate) fn window() -> SiteResult<Window> {
    web_sys::window().ok_or(SiteError::Unsupported("no global window"))
}

pub(crate) fn document(window: &Window) -> SiteResult<Document> {
    window
        .document()
        .ok_or(SiteError::Unsupported("window has no document"))
}

fn elements(list: Option<NodeList>) -> Vec<Element> {
    let Some(list) = list else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// First match in the document. Invalid selectors match nothing.
pub(crate) fn query(document: &Document, selector: &str) -> Option<Element> {
    document.query_selector(selector).ok().flatten()
}

pub(crate) fn query_all(document: &Document, selector: &str) -> Vec<Element> {
    elements(document.query_selector_all(selector).ok())
}

pub(crate) fn query_in(root: &Element, selector: &str) -> Option<Element> {
    root.query_selector(selector).ok().flatten()
}

pub(crate) fn query_all_in(root: &Element, selector: &str) -> Vec<Element> {
    elements(root.query_selector_all(selector).ok())
}

/// Like [`query`], but absence is an error.
pub(crate) fn required(document: &Document, selector: &str) -> SiteResult<Element> {
    query(document, selector).ok_or_else(|| SiteError::MissingElement(selector.to_string()))
}

/// Numeric DOM property (`scrollLeft`, `offsetWidth`, ...), 0 when absent.
///
/// Read through `Reflect` so fractional scroll offsets survive.
pub(crate) fn number_prop(element: &Element, name: &str) -> f64 {
    js_sys::Reflect::get(element, &JsValue::from_str(name))
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(0.0)
}

/// `value` of an input, select or textarea.
pub(crate) fn value_of(target: &JsValue) -> Option<String> {
    js_sys::Reflect::get(target, &JsValue::from_str("value"))
        .ok()
        .and_then(|value| value.as_string())
}

pub(crate) fn set_value(target: &JsValue, value: &str) {
    let _ = js_sys::Reflect::set(
        target,
        &JsValue::from_str("value"),
        &JsValue::from_str(value),
    );
}

pub(crate) fn set_class(element: &Element, class: &str, on: bool) {
    let _ = element.class_list().toggle_with_force(class, on);
}

pub(crate) fn set_display(element: &Element, visible: bool) {
    if let Some(element) = element.dyn_ref::<HtmlElement>() {
        let _ = element
            .style()
            .set_property("display", if visible { "block" } else { "none" });
    }
}

pub(crate) fn smooth_scroll_into_view(element: &Element) {
    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    options.set_block(ScrollLogicalPosition::Nearest);
    options.set_inline(ScrollLogicalPosition::Start);
    element.scroll_into_view_with_scroll_into_view_options(&options);
}

pub(crate) fn smooth_scroll_to_left(element: &Element, left: f64) {
    let options = ScrollToOptions::new();
    options.set_left(left);
    options.set_behavior(ScrollBehavior::Smooth);
    element.scroll_to_with_scroll_to_options(&options);
}

/// Call `showPicker()` where the platform has it.
///
/// Returns false when the method is missing or refused (no user activation,
/// cross-origin frame); the click then keeps its default behavior.
pub(crate) fn show_picker(element: &Element) -> bool {
    let Ok(method) = js_sys::Reflect::get(element, &JsValue::from_str("showPicker")) else {
        return false;
    };
    match method.dyn_into::<js_sys::Function>() {
        Ok(method) => method.call0(element).is_ok(),
        Err(_) => false,
    }
}

/// Local calendar date of the browser clock.
pub(crate) fn today() -> SiteResult<NaiveDate> {
    let now = js_sys::Date::new_0();
    i32::try_from(now.get_full_year())
        .ok()
        .and_then(|year| NaiveDate::from_ymd_opt(year, now.get_month() + 1, now.get_date()))
        .ok_or(SiteError::Unsupported("browser clock is not a calendar date"))
}

/// Whether `event` was dispatched on `element` itself.
pub(crate) fn targets(event: &Event, element: &Element) -> bool {
    event
        .target()
        .is_some_and(|target| js_sys::Object::is(target.as_ref(), element.as_ref()))
}

/// An event listener that is removed when dropped.
pub(crate) struct Listener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    pub(crate) fn new(
        target: &EventTarget,
        event: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> SiteResult<Self> {
        let callback = Closure::<dyn FnMut(Event)>::new(handler);
        target
            .add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
            .map_err(|_| SiteError::Unsupported("addEventListener rejected the callback"))?;
        Ok(Self {
            target: target.clone(),
            event,
            callback,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let callback = self.callback.as_ref().unchecked_ref();
        let _ = self.target.remove_event_listener_with_callback(self.event, callback);
    }
}

/// Live `matchMedia` probe.
///
/// Falls back to comparing `innerWidth` with the breakpoint when the query
/// cannot be evaluated.
pub(crate) struct MediaQueryViewport {
    window: Window,
    query: String,
    breakpoint_px: f64,
}

impl MediaQueryViewport {
    pub(crate) fn new(window: Window, query: String, breakpoint_px: u32) -> Self {
        Self {
            window,
            query,
            breakpoint_px: f64::from(breakpoint_px),
        }
    }
}

impl ViewportProbe for MediaQueryViewport {
    fn is_narrow(&self) -> bool {
        match self.window.match_media(&self.query) {
            Ok(Some(list)) => list.matches(),
            _ => self
                .window
                .inner_width()
                .ok()
                .and_then(|width| width.as_f64())
                .is_some_and(|width| width <= self.breakpoint_px),
        }
    }
}
