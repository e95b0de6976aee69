#![forbid(unsafe_code)]

//! Date entry helpers: free-text `DD/MM/YYYY` masking and the pickup/return
//! bounds of the native date pickers.

use chrono::NaiveDate;

/// Wire format of `<input type="date">` values.
pub const INPUT_DATE_FORMAT: &str = "%Y-%m-%d";
/// Display format used in the booking message.
pub const DISPLAY_DATE_FORMAT: &str = "%d/%m/%Y";

const MAX_DATE_DIGITS: usize = 8;

/// Re-mask free text as a progressive `DD/MM/YYYY`.
///
/// Non-digits are dropped and at most eight digits kept. Separators appear
/// once a digit exists past them: `"011"` renders as `"01/1"`, `"01022"` as
/// `"01/02/2"`.
#[must_use]
pub fn format_date_digits(raw: &str) -> String {
    let digits: String = raw
        .chars()
        .filter(char::is_ascii_digit)
        .take(MAX_DATE_DIGITS)
        .collect();
    match digits.len() {
        0..=2 => digits,
        3..=4 => format!("{}/{}", &digits[..2], &digits[2..]),
        _ => format!("{}/{}/{}", &digits[..2], &digits[2..4], &digits[4..]),
    }
}

/// Backspace over a trailing separator.
///
/// Returns the replacement value when `value` ends with `/`: the separator
/// and the character before it are removed together. `None` means the key
/// should keep its default behavior.
#[must_use]
pub fn erase_separator(value: &str) -> Option<String> {
    let rest = value.strip_suffix('/')?;
    let mut out = rest.to_string();
    out.pop();
    Some(out)
}

/// Parse an `<input type="date">` value.
#[must_use]
pub fn parse_input_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), INPUT_DATE_FORMAT).ok()
}

/// Format a date the way `<input type="date">` expects it.
#[must_use]
pub fn to_input_value(date: NaiveDate) -> String {
    date.format(INPUT_DATE_FORMAT).to_string()
}

/// Day/month/year rendering of a picker value for human readers.
///
/// Values that are not `YYYY-MM-DD` pass through unchanged, so an empty
/// field stays empty and already-masked text is not mangled.
#[must_use]
pub fn display_date(value: &str) -> String {
    match parse_input_date(value) {
        Some(date) => date.format(DISPLAY_DATE_FORMAT).to_string(),
        None => value.to_string(),
    }
}

/// Result of choosing a pickup date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PickupChange {
    /// New lower bound for the return field.
    pub return_min: NaiveDate,
    /// The chosen return date now precedes pickup and must be cleared.
    pub clear_return: bool,
}

/// Bounds of the pickup/return picker pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    today: NaiveDate,
    pickup: Option<NaiveDate>,
}

impl DateWindow {
    #[must_use]
    pub const fn new(today: NaiveDate) -> Self {
        Self {
            today,
            pickup: None,
        }
    }

    #[must_use]
    pub const fn today(&self) -> NaiveDate {
        self.today
    }

    #[must_use]
    pub const fn pickup_min(&self) -> NaiveDate {
        self.today
    }

    /// Lower bound of the return field: the pickup date once chosen.
    #[must_use]
    pub fn return_min(&self) -> NaiveDate {
        self.pickup.unwrap_or(self.today)
    }

    /// Forget the chosen pickup; returns the return field's new bound.
    pub fn clear_pickup(&mut self) -> NaiveDate {
        self.pickup = None;
        self.return_min()
    }

    /// Apply a new pickup value against the return field's current value.
    ///
    /// An empty pickup releases the return bound back to today. A value that
    /// does not parse leaves the window untouched and yields `None`.
    pub fn choose_pickup(&mut self, pickup: &str, current_return: &str) -> Option<PickupChange> {
        if pickup.trim().is_empty() {
            return Some(PickupChange {
                return_min: self.clear_pickup(),
                clear_return: false,
            });
        }
        let date = parse_input_date(pickup)?;
        self.pickup = Some(date);
        let clear_return = parse_input_date(current_return).is_some_and(|ret| ret < date);
        Some(PickupChange {
            return_min: date,
            clear_return,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn masks_progressively() {
        assert_eq!(format_date_digits(""), "");
        assert_eq!(format_date_digits("0"), "0");
        assert_eq!(format_date_digits("01"), "01");
        assert_eq!(format_date_digits("011"), "01/1");
        assert_eq!(format_date_digits("0102"), "01/02");
        assert_eq!(format_date_digits("01022"), "01/02/2");
        assert_eq!(format_date_digits("01022024"), "01/02/2024");
    }

    #[test]
    fn masking_strips_noise_and_caps_length() {
        assert_eq!(format_date_digits("01/02/2024"), "01/02/2024");
        assert_eq!(format_date_digits("01-02-20245"), "01/02/2024");
        assert_eq!(format_date_digits("ab1c"), "1");
        assert_eq!(format_date_digits("１２"), "");
    }

    #[test]
    fn backspace_after_separator_eats_digit_too() {
        assert_eq!(erase_separator("01/").as_deref(), Some("0"));
        assert_eq!(erase_separator("01/02/").as_deref(), Some("01/0"));
        assert_eq!(erase_separator("01/0"), None);
        assert_eq!(erase_separator("/").as_deref(), Some(""));
    }

    #[test]
    fn display_reorders_iso_dates() {
        assert_eq!(display_date("2024-05-01"), "01/05/2024");
        assert_eq!(display_date(""), "");
        assert_eq!(display_date("01/05/2024"), "01/05/2024");
    }

    #[test]
    fn pickup_raises_return_min_and_clears_earlier_return() {
        let mut window = DateWindow::new(ymd(2024, 4, 20));
        assert_eq!(window.return_min(), ymd(2024, 4, 20));

        let change = window.choose_pickup("2024-05-03", "2024-05-01").unwrap();
        assert_eq!(change.return_min, ymd(2024, 5, 3));
        assert!(change.clear_return);

        let change = window.choose_pickup("2024-05-01", "2024-05-03").unwrap();
        assert!(!change.clear_return);
        assert_eq!(window.return_min(), ymd(2024, 5, 1));
    }

    #[test]
    fn same_day_return_is_kept() {
        let mut window = DateWindow::new(ymd(2024, 4, 20));
        let change = window.choose_pickup("2024-05-01", "2024-05-01").unwrap();
        assert!(!change.clear_return);
    }

    #[test]
    fn unparseable_pickup_changes_nothing() {
        let mut window = DateWindow::new(ymd(2024, 4, 20));
        window.choose_pickup("2024-05-01", "").unwrap();
        assert_eq!(window.choose_pickup("garbage", ""), None);
        assert_eq!(window.return_min(), ymd(2024, 5, 1));
    }

    #[test]
    fn clearing_pickup_releases_return_bound() {
        let mut window = DateWindow::new(ymd(2024, 4, 20));
        window.choose_pickup("2024-05-01", "").unwrap();
        let change = window.choose_pickup("", "2024-05-02").unwrap();
        assert_eq!(change.return_min, ymd(2024, 4, 20));
        assert!(!change.clear_return);
    }

    #[test]
    fn clear_pickup_returns_today_bound() {
        let mut window = DateWindow::new(ymd(2024, 4, 20));
        window.choose_pickup("2024-05-06", "").unwrap();
        assert_eq!(window.pickup_min(), ymd(2024, 4, 20));
        assert_eq!(window.clear_pickup(), ymd(2024, 4, 20));
        assert_eq!(window.return_min(), window.today());
    }
}
