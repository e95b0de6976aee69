#![forbid(unsafe_code)]

//! The page-level view-state controller.
//!
//! Shaped like an Elm program: the host turns DOM events into [`Msg`]s,
//! [`ViewStateController::update`] applies them to the owned per-behavior
//! states and answers with a [`Cmd`] describing side effects the host must
//! perform (scrolling, writing input values, opening the booking link).
//! After each update the host re-renders from [`ViewStateController::view`].
//!
//! Behaviors never read each other's state.

use chrono::NaiveDate;
use tracing::{debug, trace, warn};

use crate::accordion::AccordionState;
use crate::booking::{BookingField, BookingFields, booking_url};
use crate::carousel::CarouselState;
use crate::config::SiteConfig;
use crate::date::{DateWindow, erase_separator, format_date_digits, to_input_value};
use crate::event::{DateField, Key, SliderId};
use crate::lightbox::LightboxState;
use crate::nav::NavState;
use crate::slider::{SliderMetrics, SliderState};
use crate::viewport::{ViewportMode, ViewportProbe};

/// Browsing context the booking link opens in.
pub const BOOKING_LINK_TARGET: &str = "_blank";

/// What the host found in the document at mount time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageLayout {
    /// Number of FAQ questions.
    pub faq_count: usize,
    /// Image URLs of each vehicle card, in document order.
    pub cards: Vec<Vec<String>>,
    /// Dot count of the reasons slider, `None` when it is absent.
    pub reasons_dots: Option<usize>,
    /// Dot count of the booking slider, `None` when it is absent.
    pub booking_dots: Option<usize>,
}

/// Inputs whose value the controller may rewrite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputTarget {
    /// N-th free-text `DD/MM/YYYY` field.
    DateText(usize),
    /// A named booking form field.
    Field(BookingField),
}

/// Host events, already reduced to what the behaviors need.
#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    NavToggled,
    NavLinkClicked,
    FaqClicked(usize),
    CarouselPrev {
        card: usize,
    },
    CarouselNext {
        card: usize,
    },
    CarouselDot {
        card: usize,
        dot: usize,
    },
    CarouselScrolled {
        card: usize,
        scroll_left: f64,
        strip_width: f64,
    },
    ImageClicked {
        card: usize,
        image: usize,
    },
    LightboxClose,
    /// Click inside the overlay. `on_overlay` is true when the target is the
    /// overlay element itself rather than one of its descendants.
    LightboxBackdrop {
        on_overlay: bool,
    },
    LightboxNext,
    LightboxPrev,
    KeyPressed(Key),
    SliderScrolled {
        slider: SliderId,
        metrics: SliderMetrics,
    },
    SliderDot {
        slider: SliderId,
        dot: usize,
        metrics: SliderMetrics,
    },
    DateTyped {
        input: usize,
        value: String,
    },
    DateKeyDown {
        input: usize,
        key: Key,
        value: String,
    },
    PickerClicked(usize),
    FieldEdited {
        field: BookingField,
        value: String,
    },
    BookingSubmitted,
}

/// Side effects requested by an update.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Cmd {
    #[default]
    None,
    Batch(Vec<Cmd>),
    /// Cancel the DOM default action of the event being handled.
    PreventDefault,
    /// Smoothly bring a card's image into view (block `nearest`, inline `start`).
    ScrollIntoView {
        card: usize,
        image: usize,
    },
    /// Smoothly scroll a slider to a horizontal offset.
    ScrollSliderTo {
        slider: SliderId,
        left: f64,
    },
    /// Open the platform picker of the N-th date/time input, if supported.
    ShowPicker(usize),
    SetValue {
        target: InputTarget,
        value: String,
    },
    /// Set the `min` attribute of a bounded date input (`YYYY-MM-DD`).
    SetDateMin {
        field: DateField,
        min: String,
    },
    OpenUrl {
        url: String,
        target: &'static str,
    },
    ResetForm,
}

impl Cmd {
    #[must_use]
    pub const fn none() -> Self {
        Self::None
    }

    /// Batch commands, dropping no-ops and collapsing trivial batches.
    #[must_use]
    pub fn batch(cmds: Vec<Cmd>) -> Self {
        let mut cmds: Vec<Cmd> = cmds.into_iter().filter(|cmd| !cmd.is_none()).collect();
        match cmds.len() {
            0 => Self::None,
            1 => cmds.remove(0),
            _ => Self::Batch(cmds),
        }
    }

    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Leaf commands in execution order.
    #[must_use]
    pub fn flatten(self) -> Vec<Cmd> {
        let mut out = Vec::new();
        self.flatten_into(&mut out);
        out
    }

    fn flatten_into(self, out: &mut Vec<Cmd>) {
        match self {
            Self::None => {}
            Self::Batch(cmds) => {
                for cmd in cmds {
                    cmd.flatten_into(out);
                }
            }
            leaf => out.push(leaf),
        }
    }
}

/// Render snapshot of one vehicle card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardView {
    pub image_count: usize,
    /// Image carrying the `visible` class; the others are `hidden`.
    pub visible: usize,
    pub active_dot: usize,
}

/// Render snapshot of the lightbox while open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LightboxView {
    pub src: String,
    pub index: usize,
    pub count: usize,
}

/// Everything the host needs to paint the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageView {
    pub nav_open: bool,
    pub menu_icon_visible: bool,
    pub close_icon_visible: bool,
    pub faq_open: Option<usize>,
    pub cards: Vec<CardView>,
    pub lightbox: Option<LightboxView>,
    pub reasons_active: Option<usize>,
    pub booking_active: Option<usize>,
}

struct VehicleCard {
    images: Vec<String>,
    carousel: CarouselState,
}

/// Owns the state of every interactive behavior on the page.
pub struct ViewStateController {
    config: SiteConfig,
    viewport: Box<dyn ViewportProbe>,
    nav: NavState,
    faq: AccordionState,
    cards: Vec<VehicleCard>,
    lightbox: LightboxState,
    reasons: Option<SliderState>,
    booking_slider: Option<SliderState>,
    dates: DateWindow,
    booking: BookingFields,
}

impl core::fmt::Debug for ViewStateController {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ViewStateController")
            .field("nav", &self.nav)
            .field("faq", &self.faq)
            .field("cards", &self.cards.len())
            .field("lightbox", &self.lightbox)
            .field("reasons", &self.reasons)
            .field("booking_slider", &self.booking_slider)
            .field("dates", &self.dates)
            .finish_non_exhaustive()
    }
}

impl ViewStateController {
    pub fn new(
        config: SiteConfig,
        layout: PageLayout,
        viewport: Box<dyn ViewportProbe>,
        today: NaiveDate,
    ) -> Self {
        let cards = layout
            .cards
            .into_iter()
            .map(|images| VehicleCard {
                carousel: CarouselState::new(images.len()),
                images,
            })
            .collect();
        Self {
            config,
            viewport,
            nav: NavState::default(),
            faq: AccordionState::new(layout.faq_count),
            cards,
            lightbox: LightboxState::closed(),
            reasons: layout.reasons_dots.filter(|&n| n > 0).map(SliderState::new),
            booking_slider: layout.booking_dots.filter(|&n| n > 0).map(SliderState::new),
            dates: DateWindow::new(today),
            booking: BookingFields::default(),
        }
    }

    #[must_use]
    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    #[must_use]
    pub fn nav(&self) -> NavState {
        self.nav
    }

    #[must_use]
    pub fn faq(&self) -> AccordionState {
        self.faq
    }

    #[must_use]
    pub fn carousel(&self, card: usize) -> Option<CarouselState> {
        self.cards.get(card).map(|c| c.carousel)
    }

    #[must_use]
    pub fn lightbox(&self) -> &LightboxState {
        &self.lightbox
    }

    #[must_use]
    pub fn slider(&self, id: SliderId) -> Option<SliderState> {
        match id {
            SliderId::Reasons => self.reasons,
            SliderId::Booking => self.booking_slider,
        }
    }

    #[must_use]
    pub fn dates(&self) -> DateWindow {
        self.dates
    }

    #[must_use]
    pub fn booking(&self) -> &BookingFields {
        &self.booking
    }

    /// Startup commands: both bounded date inputs start at today.
    pub fn init(&mut self) -> Cmd {
        let today = to_input_value(self.dates.today());
        debug!(target: "drivelux::date", %today, "date bounds initialized");
        Cmd::batch(vec![
            Cmd::SetDateMin {
                field: DateField::Pickup,
                min: today.clone(),
            },
            Cmd::SetDateMin {
                field: DateField::Return,
                min: today,
            },
        ])
    }

    /// Apply one host message.
    pub fn update(&mut self, msg: Msg) -> Cmd {
        let mode = ViewportMode::sample(self.viewport.as_ref());
        trace!(target: "drivelux::controller", ?msg, ?mode, "update");
        match msg {
            Msg::NavToggled => {
                let open = self.nav.toggle();
                debug!(target: "drivelux::nav", open, "nav toggled");
                Cmd::none()
            }
            Msg::NavLinkClicked => {
                self.nav.close();
                Cmd::none()
            }
            Msg::FaqClicked(index) => {
                if !self.faq.toggle(index) {
                    warn!(target: "drivelux::faq", index, "click on unknown question ignored");
                }
                Cmd::none()
            }
            Msg::CarouselPrev { card } => self.step_carousel(card, mode, false),
            Msg::CarouselNext { card } => self.step_carousel(card, mode, true),
            Msg::CarouselDot { card, dot } => self.carousel_dot(card, dot, mode),
            Msg::CarouselScrolled {
                card,
                scroll_left,
                strip_width,
            } => {
                if mode == ViewportMode::Narrow
                    && let Some(entry) = self.cards.get_mut(card)
                {
                    entry.carousel.sync_from_scroll(scroll_left, strip_width);
                }
                Cmd::none()
            }
            Msg::ImageClicked { card, image } => {
                if let Some(entry) = self.cards.get(card)
                    && image < entry.images.len()
                {
                    let lightbox = LightboxState::open(entry.images.clone(), image);
                    debug!(target: "drivelux::lightbox", card, image, "lightbox opened");
                    self.lightbox = lightbox;
                }
                Cmd::none()
            }
            Msg::LightboxClose => {
                self.close_lightbox();
                Cmd::none()
            }
            Msg::LightboxBackdrop { on_overlay } => {
                if on_overlay {
                    self.close_lightbox();
                }
                Cmd::none()
            }
            Msg::LightboxNext => {
                self.lightbox = core::mem::take(&mut self.lightbox).next();
                Cmd::none()
            }
            Msg::LightboxPrev => {
                self.lightbox = core::mem::take(&mut self.lightbox).prev();
                Cmd::none()
            }
            Msg::KeyPressed(key) => {
                self.key_pressed(&key);
                Cmd::none()
            }
            Msg::SliderScrolled { slider, metrics } => {
                if let Some(state) = self.slider_mut(slider) {
                    let active = state.on_scroll(&metrics);
                    trace!(target: "drivelux::slider", slider = slider.as_str(), active, "scroll");
                }
                Cmd::none()
            }
            Msg::SliderDot {
                slider,
                dot,
                metrics,
            } => {
                let target = self
                    .slider(slider)
                    .and_then(|state| state.target_for_dot(dot, &metrics));
                match target {
                    Some(left) => Cmd::ScrollSliderTo { slider, left },
                    None => Cmd::none(),
                }
            }
            Msg::DateTyped { input, value } => {
                let formatted = format_date_digits(&value);
                if formatted == value {
                    Cmd::none()
                } else {
                    Cmd::SetValue {
                        target: InputTarget::DateText(input),
                        value: formatted,
                    }
                }
            }
            Msg::DateKeyDown { input, key, value } => {
                if key != Key::Backspace {
                    return Cmd::none();
                }
                match erase_separator(&value) {
                    Some(value) => Cmd::batch(vec![
                        Cmd::PreventDefault,
                        Cmd::SetValue {
                            target: InputTarget::DateText(input),
                            value,
                        },
                    ]),
                    None => Cmd::none(),
                }
            }
            Msg::PickerClicked(input) => Cmd::ShowPicker(input),
            Msg::FieldEdited { field, value } => self.field_edited(field, value),
            Msg::BookingSubmitted => self.submit_booking(),
        }
    }

    /// Render snapshot of the current state.
    #[must_use]
    pub fn view(&self) -> PageView {
        let (menu_icon_visible, close_icon_visible) = self.nav.icons();
        PageView {
            nav_open: self.nav.is_open(),
            menu_icon_visible,
            close_icon_visible,
            faq_open: self.faq.open_index(),
            cards: self
                .cards
                .iter()
                .map(|card| CardView {
                    image_count: card.carousel.len(),
                    visible: card.carousel.visible(),
                    active_dot: card.carousel.current(),
                })
                .collect(),
            lightbox: self.lightbox.current_src().map(|src| LightboxView {
                src: src.to_string(),
                index: self.lightbox.index(),
                count: self.lightbox.images().len(),
            }),
            reasons_active: self.reasons.map(|s| s.active()),
            booking_active: self.booking_slider.map(|s| s.active()),
        }
    }

    fn step_carousel(&mut self, card: usize, mode: ViewportMode, forward: bool) -> Cmd {
        if mode == ViewportMode::Narrow {
            return Cmd::none();
        }
        if let Some(entry) = self.cards.get_mut(card) {
            let shown = if forward {
                entry.carousel.next()
            } else {
                entry.carousel.prev()
            };
            debug!(target: "drivelux::carousel", card, ?shown, "carousel stepped");
        }
        Cmd::none()
    }

    fn carousel_dot(&mut self, card: usize, dot: usize, mode: ViewportMode) -> Cmd {
        let Some(entry) = self.cards.get_mut(card) else {
            return Cmd::none();
        };
        if dot >= entry.carousel.len() {
            return Cmd::none();
        }
        match mode {
            ViewportMode::Narrow => Cmd::ScrollIntoView { card, image: dot },
            ViewportMode::Wide => {
                let index = isize::try_from(dot).unwrap_or(isize::MAX);
                entry.carousel.show(index);
                Cmd::none()
            }
        }
    }

    fn close_lightbox(&mut self) {
        if self.lightbox.is_open() {
            debug!(target: "drivelux::lightbox", "lightbox closed");
        }
        self.lightbox = core::mem::take(&mut self.lightbox).close();
    }

    fn key_pressed(&mut self, key: &Key) {
        if !self.lightbox.is_open() {
            return;
        }
        let lightbox = core::mem::take(&mut self.lightbox);
        self.lightbox = match key {
            Key::Escape => lightbox.close(),
            Key::ArrowRight => lightbox.next(),
            Key::ArrowLeft => lightbox.prev(),
            Key::Backspace | Key::Other(_) => lightbox,
        };
    }

    fn slider_mut(&mut self, id: SliderId) -> Option<&mut SliderState> {
        match id {
            SliderId::Reasons => self.reasons.as_mut(),
            SliderId::Booking => self.booking_slider.as_mut(),
        }
    }

    fn field_edited(&mut self, field: BookingField, value: String) -> Cmd {
        let cmd = if field == BookingField::PickupDate {
            match self.dates.choose_pickup(&value, &self.booking.return_date) {
                Some(change) => {
                    debug!(
                        target: "drivelux::date",
                        pickup = %value,
                        return_min = %change.return_min,
                        clear_return = change.clear_return,
                        "pickup date chosen"
                    );
                    let mut cmds = vec![Cmd::SetDateMin {
                        field: DateField::Return,
                        min: to_input_value(change.return_min),
                    }];
                    if change.clear_return {
                        self.booking.return_date.clear();
                        cmds.push(Cmd::SetValue {
                            target: InputTarget::Field(BookingField::ReturnDate),
                            value: String::new(),
                        });
                    }
                    Cmd::batch(cmds)
                }
                None => Cmd::none(),
            }
        } else {
            Cmd::none()
        };
        self.booking.set(field, value);
        cmd
    }

    fn submit_booking(&mut self) -> Cmd {
        let url = booking_url(&self.config, &self.booking);
        debug!(target: "drivelux::booking", url_len = url.len(), "booking submitted");
        self.booking.clear();
        // The reset empties the pickup field, so its bound goes with it.
        let return_min = to_input_value(self.dates.clear_pickup());
        Cmd::batch(vec![
            Cmd::PreventDefault,
            Cmd::OpenUrl {
                url,
                target: BOOKING_LINK_TARGET,
            },
            Cmd::ResetForm,
            Cmd::SetDateMin {
                field: DateField::Return,
                min: return_min,
            },
        ])
    }
}
