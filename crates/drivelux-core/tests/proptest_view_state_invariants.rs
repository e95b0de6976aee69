//! Property-based invariant tests for the view-state machines.
//!
//! Verifies:
//! 1. Carousel: `show(i)` always lands in `[0, count)` and equals `i mod count`
//! 2. Carousel: scroll sync never leaves the dot range
//! 3. Lightbox: `n` nexts (or prevs) from any start return to the start
//! 4. Lightbox: next then prev is the identity
//! 5. Accordion: any click sequence leaves at most one question open
//! 6. Accordion: clicking the open question closes everything
//! 7. Date mask: output digits are the input's first eight digits, in order
//! 8. Date mask: output length never exceeds `DD/MM/YYYY`
//! 9. Date window: return minimum is never before the chosen pickup
//! 10. Slider: active card is at least as close to center as every other card
//! 11. URL encoding: encoded text only uses the unreserved set and `%XX`

use chrono::{Days, NaiveDate};
use drivelux_core::accordion::AccordionState;
use drivelux_core::booking::{decode_uri_component, encode_uri_component};
use drivelux_core::carousel::CarouselState;
use drivelux_core::date::{DateWindow, format_date_digits, to_input_value};
use drivelux_core::lightbox::LightboxState;
use drivelux_core::slider::{CardExtent, SliderMetrics, nearest_center};
use proptest::prelude::*;

// ── Strategy helpers ──────────────────────────────────────────────────

fn arb_images() -> impl Strategy<Value = Vec<String>> {
    (1usize..12).prop_map(|n| (0..n).map(|i| format!("/img/{i}.jpg")).collect())
}

fn arb_cards() -> impl Strategy<Value = Vec<CardExtent>> {
    prop::collection::vec((0.0f64..2000.0, 1.0f64..600.0), 1..10).prop_map(|cards| {
        cards
            .into_iter()
            .map(|(left, width)| CardExtent::new(left, width))
            .collect()
    })
}

fn base_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

proptest! {
    #[test]
    fn carousel_show_normalizes(count in 1usize..50, index in -10_000isize..10_000) {
        let mut carousel = CarouselState::new(count);
        let shown = carousel.show(index).unwrap();
        prop_assert!(shown < count);
        prop_assert_eq!(shown as isize, index.rem_euclid(count as isize));
        prop_assert_eq!(carousel.current(), carousel.visible());
    }

    #[test]
    fn carousel_scroll_stays_in_range(
        count in 1usize..20,
        scroll_left in -5000.0f64..50_000.0,
        width in 0.0f64..2000.0,
    ) {
        let mut carousel = CarouselState::new(count);
        let index = carousel.sync_from_scroll(scroll_left, width).unwrap();
        prop_assert!(index < count);
        prop_assert_eq!(carousel.visible(), 0);
    }

    #[test]
    fn lightbox_full_cycle_returns_to_start(images in arb_images(), start in 0usize..12) {
        let n = images.len();
        let opened = LightboxState::open(images, start);
        let start_index = opened.index();

        let mut forward = opened.clone();
        for _ in 0..n {
            forward = forward.next();
        }
        prop_assert_eq!(forward.index(), start_index);

        let mut backward = opened;
        for _ in 0..n {
            backward = backward.prev();
        }
        prop_assert_eq!(backward.index(), start_index);
    }

    #[test]
    fn lightbox_next_prev_is_identity(images in arb_images(), start in 0usize..12) {
        let opened = LightboxState::open(images, start);
        prop_assert_eq!(opened.clone().next().prev(), opened);
    }

    #[test]
    fn accordion_single_open(count in 1usize..10, clicks in prop::collection::vec(0usize..12, 0..60)) {
        let mut faq = AccordionState::new(count);
        for click in clicks {
            let before = faq.open_index();
            faq.toggle(click);
            let open = (0..count).filter(|&i| faq.is_open(i)).count();
            prop_assert!(open <= 1);
            if click < count {
                if before == Some(click) {
                    prop_assert_eq!(faq.open_index(), None);
                } else {
                    prop_assert_eq!(faq.open_index(), Some(click));
                }
            } else {
                prop_assert_eq!(faq.open_index(), before);
            }
        }
    }

    #[test]
    fn date_mask_preserves_digit_prefix(raw in ".{0,24}") {
        let masked = format_date_digits(&raw);
        let expected: String = raw.chars().filter(char::is_ascii_digit).take(8).collect();
        let kept: String = masked.chars().filter(|c| *c != '/').collect();
        prop_assert_eq!(kept, expected);
        prop_assert!(masked.len() <= "DD/MM/YYYY".len());
        prop_assert!(!masked.ends_with('/'));
    }

    #[test]
    fn return_min_never_precedes_pickup(
        picks in prop::collection::vec((0u64..400, 0u64..400), 1..20),
    ) {
        let mut window = DateWindow::new(base_day());
        for (pickup_off, return_off) in picks {
            let pickup = base_day().checked_add_days(Days::new(pickup_off)).unwrap();
            let ret = base_day().checked_add_days(Days::new(return_off)).unwrap();
            let change = window
                .choose_pickup(&to_input_value(pickup), &to_input_value(ret))
                .unwrap();
            prop_assert!(change.return_min >= pickup);
            prop_assert_eq!(change.clear_return, ret < pickup);
            prop_assert!(window.return_min() >= pickup);
        }
    }

    #[test]
    fn slider_picks_nearest_center(
        cards in arb_cards(),
        scroll_left in 0.0f64..3000.0,
        viewport_width in 1.0f64..1200.0,
    ) {
        let metrics = SliderMetrics { scroll_left, viewport_width, cards };
        let active = nearest_center(&metrics);
        let center = metrics.viewport_center();
        let best = (metrics.cards[active].center() - center).abs();
        for card in &metrics.cards {
            prop_assert!(best <= (card.center() - center).abs());
        }
    }

    #[test]
    fn encoded_text_is_url_safe(text in any::<String>()) {
        let encoded = encode_uri_component(&text);
        prop_assert!(encoded.bytes().all(|b| b.is_ascii_alphanumeric()
            || b"-_.!~*'()%".contains(&b)));
        prop_assert_eq!(decode_uri_component(&encoded), text);
    }
}
