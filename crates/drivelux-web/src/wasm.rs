#![forbid(unsafe_code)]

use std::cell::RefCell;
use std::rc::Rc;

use drivelux_core::booking::BookingField;
use drivelux_core::controller::InputTarget;
use drivelux_core::event::{DateField, Key, SliderId};
use drivelux_core::slider::{CardExtent, SliderMetrics};
use drivelux_core::{Cmd, Msg, PageLayout, PageView, SiteError, SiteResult, ViewStateController};
use tracing::{debug, info, trace, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Event, HtmlFormElement, KeyboardEvent, Window};

use crate::contract::{DomContract, WebConfig};
use crate::dom::{self, Listener, MediaQueryViewport};
use crate::logging::{self, LogConfig};

/// The interactive layer of the DriveLux page.
///
/// `mount` binds every behavior to the current document; `destroy` (or
/// `free`) removes all listeners again.
#[wasm_bindgen]
pub struct DriveluxSite {
    listeners: Vec<Listener>,
}

#[wasm_bindgen]
impl DriveluxSite {
    /// Bind to the current document.
    ///
    /// `config` is an optional plain object with `site`, `dom` and
    /// `log_level` keys; omitted keys keep their defaults.
    pub fn mount(config: Option<JsValue>) -> Result<DriveluxSite, JsValue> {
        Self::try_mount(config).map_err(to_js_error)
    }

    /// Remove every listener. The page keeps its last rendered state.
    pub fn destroy(&mut self) {
        debug!(target: "drivelux::site", listeners = self.listeners.len(), "site destroyed");
        self.listeners.clear();
    }

    /// Number of listeners currently attached.
    #[wasm_bindgen(getter, js_name = listenerCount)]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl DriveluxSite {
    fn try_mount(config: Option<JsValue>) -> SiteResult<Self> {
        let config = parse_config(config)?;
        logging::install(LogConfig::default().max_level(config.max_level()?));

        let window = dom::window()?;
        let document = dom::document(&window)?;
        let nodes = PageDom::query(window.clone(), document, &config.dom)?;
        let viewport = MediaQueryViewport::new(
            window,
            config.site.narrow_media_query(),
            config.site.narrow_breakpoint_px,
        );
        let layout = nodes.layout();
        info!(
            target: "drivelux::site",
            faq = layout.faq_count,
            cards = layout.cards.len(),
            reasons = ?layout.reasons_dots,
            booking = ?layout.booking_dots,
            "site mounted"
        );
        let controller =
            ViewStateController::new(config.site, layout, Box::new(viewport), dom::today()?);
        let page = Rc::new(Page {
            dom: nodes,
            controller: RefCell::new(controller),
            last_view: RefCell::new(None),
        });

        let init = page.controller.borrow_mut().init();
        page.execute(init, None);
        page.render();

        // Listeners own the page from here on.
        let listeners = bind_all(&page)?;
        Ok(Self { listeners })
    }
}

fn parse_config(config: Option<JsValue>) -> SiteResult<WebConfig> {
    let Some(value) = config.filter(|value| !value.is_undefined() && !value.is_null()) else {
        return Ok(WebConfig::default());
    };
    let json = js_sys::JSON::stringify(&value)
        .map_err(|_| SiteError::Unsupported("mount config is not JSON-serializable"))?;
    WebConfig::from_json_str(&String::from(json))
}

fn to_js_error(err: SiteError) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}

// ============================================================================
// Document handles
// ============================================================================

struct CardDom {
    strip: Option<Element>,
    images: Vec<Element>,
    dots: Vec<Element>,
    prev: Option<Element>,
    next: Option<Element>,
}

struct SliderDom {
    id: SliderId,
    slider: Element,
    card_selector: String,
    dots: Vec<Element>,
}

impl SliderDom {
    fn metrics(&self) -> SliderMetrics {
        let cards = dom::query_all_in(&self.slider, &self.card_selector)
            .iter()
            .map(|card| {
                CardExtent::new(
                    dom::number_prop(card, "offsetLeft"),
                    dom::number_prop(card, "offsetWidth"),
                )
            })
            .collect();
        SliderMetrics {
            scroll_left: dom::number_prop(&self.slider, "scrollLeft"),
            viewport_width: dom::number_prop(&self.slider, "offsetWidth"),
            cards,
        }
    }
}

/// Elements resolved once at mount.
struct PageDom {
    window: Window,
    document: Document,
    nav_toggle: Element,
    nav_panel: Element,
    menu_icon: Option<Element>,
    close_icon: Option<Element>,
    nav_links: Vec<Element>,
    faq_questions: Vec<Element>,
    cards: Vec<CardDom>,
    lightbox: Element,
    lightbox_image: Element,
    lightbox_close: Element,
    lightbox_prev: Option<Element>,
    lightbox_next: Option<Element>,
    sliders: Vec<SliderDom>,
    date_text: Vec<Element>,
    pickers: Vec<Element>,
    pickup_date: Option<Element>,
    return_date: Option<Element>,
    form: HtmlFormElement,
}

impl PageDom {
    fn query(window: Window, document: Document, contract: &DomContract) -> SiteResult<Self> {
        let cards = dom::query_all(&document, &contract.vehicle_card)
            .iter()
            .map(|card| CardDom {
                strip: dom::query_in(card, &contract.vehicle_strip),
                images: dom::query_all_in(card, &contract.vehicle_image),
                dots: dom::query_all_in(card, &contract.vehicle_dot),
                prev: dom::query_in(card, &contract.vehicle_prev),
                next: dom::query_in(card, &contract.vehicle_next),
            })
            .collect();

        let sliders = SliderId::ALL
            .into_iter()
            .filter_map(|id| {
                let selectors = contract.slider(id);
                let slider = dom::query(&document, &selectors.slider)?;
                let dots = dom::query_all(&document, &selectors.dots);
                if dots.is_empty() {
                    trace!(
                        target: "drivelux::slider",
                        slider = id.as_str(),
                        "no dots, slider skipped"
                    );
                    return None;
                }
                Some(SliderDom {
                    id,
                    slider,
                    card_selector: selectors.card.clone(),
                    dots,
                })
            })
            .collect();

        let form = dom::required(&document, &contract.booking_form)?
            .dyn_into::<HtmlFormElement>()
            .map_err(|_| SiteError::MissingElement(contract.booking_form.clone()))?;

        Ok(Self {
            nav_toggle: dom::required(&document, &contract.nav_toggle)?,
            nav_panel: dom::required(&document, &contract.nav_panel)?,
            menu_icon: dom::query(&document, &contract.menu_icon),
            close_icon: dom::query(&document, &contract.close_icon),
            nav_links: dom::query_all(&document, &contract.nav_links),
            faq_questions: dom::query_all(&document, &contract.faq_question),
            cards,
            lightbox: dom::required(&document, &contract.lightbox)?,
            lightbox_image: dom::required(&document, &contract.lightbox_image)?,
            lightbox_close: dom::required(&document, &contract.lightbox_close)?,
            lightbox_prev: dom::query(&document, &contract.lightbox_prev),
            lightbox_next: dom::query(&document, &contract.lightbox_next),
            sliders,
            date_text: dom::query_all(&document, &contract.date_text),
            pickers: dom::query_all(&document, &contract.picker),
            pickup_date: dom::query(&document, &contract.pickup_date),
            return_date: dom::query(&document, &contract.return_date),
            form,
            window,
            document,
        })
    }

    fn layout(&self) -> PageLayout {
        let dots = |id| self.slider(id).map(|slider| slider.dots.len());
        PageLayout {
            faq_count: self.faq_questions.len(),
            cards: self
                .cards
                .iter()
                .map(|card| {
                    card.images
                        .iter()
                        .map(|img| img.get_attribute("src").unwrap_or_default())
                        .collect()
                })
                .collect(),
            reasons_dots: dots(SliderId::Reasons),
            booking_dots: dots(SliderId::Booking),
        }
    }

    fn slider(&self, id: SliderId) -> Option<&SliderDom> {
        self.sliders.iter().find(|slider| slider.id == id)
    }

    fn field(&self, field: BookingField) -> Option<js_sys::Object> {
        self.form.elements().named_item(field.name())
    }

    fn field_value(&self, field: BookingField) -> String {
        self.field(field)
            .and_then(|input| dom::value_of(&input))
            .unwrap_or_default()
    }

    fn date_bound(&self, field: DateField) -> Option<&Element> {
        match field {
            DateField::Pickup => self.pickup_date.as_ref(),
            DateField::Return => self.return_date.as_ref(),
        }
    }

    fn set_input(&self, target: InputTarget, value: &str) {
        match target {
            InputTarget::DateText(index) => {
                if let Some(input) = self.date_text.get(index) {
                    dom::set_value(input, value);
                }
            }
            InputTarget::Field(field) => {
                if let Some(input) = self.field(field) {
                    dom::set_value(&input, value);
                }
            }
        }
    }
}

// ============================================================================
// Dispatch
// ============================================================================

struct Page {
    dom: PageDom,
    controller: RefCell<ViewStateController>,
    last_view: RefCell<Option<PageView>>,
}

impl Page {
    fn dispatch(&self, msg: Msg, event: Option<&Event>) {
        let cmd = match self.controller.try_borrow_mut() {
            Ok(mut controller) => controller.update(msg),
            Err(_) => {
                warn!(target: "drivelux::site", ?msg, "re-entrant event dropped");
                return;
            }
        };
        self.execute(cmd, event);
        self.render();
    }

    fn execute(&self, cmd: Cmd, event: Option<&Event>) {
        for cmd in cmd.flatten() {
            match cmd {
                Cmd::None | Cmd::Batch(_) => {}
                Cmd::PreventDefault => {
                    if let Some(event) = event {
                        event.prevent_default();
                    }
                }
                Cmd::ScrollIntoView { card, image } => {
                    let image = self.dom.cards.get(card).and_then(|c| c.images.get(image));
                    if let Some(image) = image {
                        dom::smooth_scroll_into_view(image);
                    }
                }
                Cmd::ScrollSliderTo { slider, left } => {
                    if let Some(slider) = self.dom.slider(slider) {
                        dom::smooth_scroll_to_left(&slider.slider, left);
                    }
                }
                Cmd::ShowPicker(index) => {
                    if let Some(input) = self.dom.pickers.get(index)
                        && !dom::show_picker(input)
                    {
                        trace!(target: "drivelux::date", index, "showPicker unavailable");
                    }
                }
                Cmd::SetValue { target, value } => self.dom.set_input(target, &value),
                Cmd::SetDateMin { field, min } => {
                    if let Some(input) = self.dom.date_bound(field) {
                        let _ = input.set_attribute("min", &min);
                    }
                }
                Cmd::OpenUrl { url, target } => {
                    if self.dom.window.open_with_url_and_target(&url, target).is_err() {
                        warn!(target: "drivelux::booking", "window.open failed");
                    }
                }
                Cmd::ResetForm => self.dom.form.reset(),
            }
        }
    }

    /// Paint the controller's view, skipping unchanged snapshots.
    fn render(&self) {
        let view = self.controller.borrow().view();
        let mut last = self.last_view.borrow_mut();
        if last.as_ref() == Some(&view) {
            return;
        }
        let nodes = &self.dom;

        dom::set_class(&nodes.nav_panel, "open", view.nav_open);
        if let Some(icon) = &nodes.menu_icon {
            dom::set_display(icon, view.menu_icon_visible);
        }
        if let Some(icon) = &nodes.close_icon {
            dom::set_display(icon, view.close_icon_visible);
        }

        for (index, question) in nodes.faq_questions.iter().enumerate() {
            let open = view.faq_open == Some(index);
            dom::set_class(question, "active", open);
            let _ = question.set_attribute("aria-expanded", if open { "true" } else { "false" });
            if let Some(answer) = question.next_element_sibling() {
                dom::set_class(&answer, "open", open);
            }
        }

        for (card, card_view) in nodes.cards.iter().zip(&view.cards) {
            for (index, image) in card.images.iter().enumerate() {
                let visible = index == card_view.visible;
                dom::set_class(image, "visible", visible);
                dom::set_class(image, "hidden", !visible);
            }
            for (index, dot) in card.dots.iter().enumerate() {
                dom::set_class(dot, "active", index == card_view.active_dot);
            }
        }

        dom::set_class(&nodes.lightbox, "open", view.lightbox.is_some());
        if let Some(lightbox) = &view.lightbox
            && nodes.lightbox_image.get_attribute("src").as_deref() != Some(lightbox.src.as_str())
        {
            let _ = nodes.lightbox_image.set_attribute("src", &lightbox.src);
        }

        for slider in &nodes.sliders {
            let active = match slider.id {
                SliderId::Reasons => view.reasons_active,
                SliderId::Booking => view.booking_active,
            };
            for (index, dot) in slider.dots.iter().enumerate() {
                dom::set_class(dot, "active", active == Some(index));
            }
        }

        *last = Some(view);
    }

    /// Feed form values the controller has not seen yet.
    fn sync_fields(&self) {
        for field in BookingField::ALL {
            let value = self.dom.field_value(field);
            let stale = self.controller.borrow().booking().get(field) != value;
            if stale {
                self.dispatch(Msg::FieldEdited { field, value }, None);
            }
        }
    }
}

// ============================================================================
// Listeners
// ============================================================================

struct Binder<'a> {
    page: &'a Rc<Page>,
    listeners: Vec<Listener>,
}

impl Binder<'_> {
    /// Dispatch the message `to_msg` derives from each `event` on `target`.
    fn on(
        &mut self,
        target: &web_sys::EventTarget,
        event: &'static str,
        to_msg: impl Fn(&Page, &Event) -> Option<Msg> + 'static,
    ) -> SiteResult<()> {
        let page = Rc::clone(self.page);
        let listener = Listener::new(target, event, move |ev: Event| {
            if let Some(msg) = to_msg(&page, &ev) {
                page.dispatch(msg, Some(&ev));
            }
        })?;
        self.listeners.push(listener);
        Ok(())
    }

    fn on_click(&mut self, target: &Element, msg: Msg) -> SiteResult<()> {
        self.on(target, "click", move |_, _| Some(msg.clone()))
    }
}

fn event_value(event: &Event) -> String {
    event
        .target()
        .and_then(|target| dom::value_of(&target))
        .unwrap_or_default()
}

fn event_key(event: &Event) -> Option<Key> {
    event
        .dyn_ref::<KeyboardEvent>()
        .map(|event| Key::from_dom(&event.key()))
}

fn bind_all(page: &Rc<Page>) -> SiteResult<Vec<Listener>> {
    let mut binder = Binder {
        page,
        listeners: Vec::new(),
    };
    let nodes = &page.dom;

    binder.on_click(&nodes.nav_toggle, Msg::NavToggled)?;
    for link in &nodes.nav_links {
        binder.on_click(link, Msg::NavLinkClicked)?;
    }
    for (index, question) in nodes.faq_questions.iter().enumerate() {
        binder.on_click(question, Msg::FaqClicked(index))?;
    }

    for (card, card_dom) in nodes.cards.iter().enumerate() {
        if let Some(prev) = &card_dom.prev {
            binder.on_click(prev, Msg::CarouselPrev { card })?;
        }
        if let Some(next) = &card_dom.next {
            binder.on_click(next, Msg::CarouselNext { card })?;
        }
        for (dot, element) in card_dom.dots.iter().enumerate() {
            binder.on_click(element, Msg::CarouselDot { card, dot })?;
        }
        for (image, element) in card_dom.images.iter().enumerate() {
            binder.on_click(element, Msg::ImageClicked { card, image })?;
        }
        if let Some(strip) = &card_dom.strip {
            let measured = strip.clone();
            binder.on(strip, "scroll", move |_, _| {
                Some(Msg::CarouselScrolled {
                    card,
                    scroll_left: dom::number_prop(&measured, "scrollLeft"),
                    strip_width: dom::number_prop(&measured, "offsetWidth"),
                })
            })?;
        }
    }

    binder.on_click(&nodes.lightbox_close, Msg::LightboxClose)?;
    if let Some(prev) = &nodes.lightbox_prev {
        binder.on_click(prev, Msg::LightboxPrev)?;
    }
    if let Some(next) = &nodes.lightbox_next {
        binder.on_click(next, Msg::LightboxNext)?;
    }
    binder.on(&nodes.lightbox, "click", |page, event| {
        Some(Msg::LightboxBackdrop {
            on_overlay: dom::targets(event, &page.dom.lightbox),
        })
    })?;
    binder.on(&nodes.document, "keydown", |_, event| {
        event_key(event).map(Msg::KeyPressed)
    })?;

    for slider in &nodes.sliders {
        let id = slider.id;
        binder.on(&slider.slider, "scroll", move |page, _| {
            let metrics = page.dom.slider(id)?.metrics();
            Some(Msg::SliderScrolled { slider: id, metrics })
        })?;
        for (dot, element) in slider.dots.iter().enumerate() {
            binder.on(element, "click", move |page, _| {
                let metrics = page.dom.slider(id)?.metrics();
                Some(Msg::SliderDot {
                    slider: id,
                    dot,
                    metrics,
                })
            })?;
        }
    }

    for (input, element) in nodes.date_text.iter().enumerate() {
        binder.on(element, "input", move |_, event| {
            Some(Msg::DateTyped {
                input,
                value: event_value(event),
            })
        })?;
        binder.on(element, "keydown", move |_, event| {
            Some(Msg::DateKeyDown {
                input,
                key: event_key(event)?,
                value: event_value(event),
            })
        })?;
    }
    for (index, picker) in nodes.pickers.iter().enumerate() {
        binder.on_click(picker, Msg::PickerClicked(index))?;
    }

    for event in ["input", "change"] {
        binder.on(&nodes.form, event, |_, event| {
            let target = event.target()?;
            let name = js_sys::Reflect::get(&target, &JsValue::from_str("name"))
                .ok()?
                .as_string()?;
            let field = BookingField::from_name(&name)?;
            Some(Msg::FieldEdited {
                field,
                value: event_value(event),
            })
        })?;
    }

    let submit_page = Rc::clone(page);
    binder.listeners.push(Listener::new(&nodes.form, "submit", move |event: Event| {
        submit_page.sync_fields();
        submit_page.dispatch(Msg::BookingSubmitted, Some(&event));
    })?);

    debug!(target: "drivelux::site", listeners = binder.listeners.len(), "listeners attached");
    Ok(binder.listeners)
}
