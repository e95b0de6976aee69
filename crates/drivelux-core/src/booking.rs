#![forbid(unsafe_code)]

//! Booking form: field values, the message template, and the outbound
//! messaging deep link.

use crate::config::SiteConfig;
use crate::date::display_date;

/// Named inputs of the booking form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BookingField {
    Name,
    Phone,
    Vehicle,
    PickupDate,
    PickupTime,
    ReturnDate,
    ReturnTime,
    Location,
}

impl BookingField {
    pub const ALL: [Self; 8] = [
        Self::Name,
        Self::Phone,
        Self::Vehicle,
        Self::PickupDate,
        Self::PickupTime,
        Self::ReturnDate,
        Self::ReturnTime,
        Self::Location,
    ];

    /// `name` attribute of the input.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Phone => "phone",
            Self::Vehicle => "vehicle",
            Self::PickupDate => "pickupDate",
            Self::PickupTime => "pickupTime",
            Self::ReturnDate => "returnDate",
            Self::ReturnTime => "returnTime",
            Self::Location => "location",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.name() == name)
    }
}

/// Current values of the booking form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingFields {
    pub name: String,
    pub phone: String,
    pub vehicle: String,
    pub pickup_date: String,
    pub pickup_time: String,
    pub return_date: String,
    pub return_time: String,
    pub location: String,
}

impl BookingFields {
    #[must_use]
    pub fn get(&self, field: BookingField) -> &str {
        match field {
            BookingField::Name => &self.name,
            BookingField::Phone => &self.phone,
            BookingField::Vehicle => &self.vehicle,
            BookingField::PickupDate => &self.pickup_date,
            BookingField::PickupTime => &self.pickup_time,
            BookingField::ReturnDate => &self.return_date,
            BookingField::ReturnTime => &self.return_time,
            BookingField::Location => &self.location,
        }
    }

    pub fn set(&mut self, field: BookingField, value: impl Into<String>) {
        let slot = match field {
            BookingField::Name => &mut self.name,
            BookingField::Phone => &mut self.phone,
            BookingField::Vehicle => &mut self.vehicle,
            BookingField::PickupDate => &mut self.pickup_date,
            BookingField::PickupTime => &mut self.pickup_time,
            BookingField::ReturnDate => &mut self.return_date,
            BookingField::ReturnTime => &mut self.return_time,
            BookingField::Location => &mut self.location,
        };
        *slot = value.into();
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        BookingField::ALL
            .into_iter()
            .all(|field| self.get(field).is_empty())
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Render the booking message. Missing values become empty strings.
#[must_use]
pub fn render_message(fields: &BookingFields, greeting: &str) -> String {
    let pickup_date = display_date(&fields.pickup_date);
    let return_date = display_date(&fields.return_date);
    format!(
        "{greeting}\n\
         \n\
         Name: {name}\n\
         Phone: {phone}\n\
         Vehicle: {vehicle}\n\
         \n\
         Pick-up\n\
         Date: {pickup_date}\n\
         Time: {pickup_time}\n\
         \n\
         Return\n\
         Date: {return_date}\n\
         Time: {return_time}\n\
         \n\
         Location: {location}",
        name = fields.name,
        phone = fields.phone,
        vehicle = fields.vehicle,
        pickup_time = fields.pickup_time,
        return_time = fields.return_time,
        location = fields.location,
    )
}

/// Deep link that opens a chat with `message` pre-filled.
#[must_use]
pub fn whatsapp_url(config: &SiteConfig, message: &str) -> String {
    format!(
        "{}/{}?text={}",
        config.wa_base_url.trim_end_matches('/'),
        config.whatsapp_number.trim(),
        encode_uri_component(message)
    )
}

/// Message plus deep link for the current field values.
#[must_use]
pub fn booking_url(config: &SiteConfig, fields: &BookingFields) -> String {
    whatsapp_url(config, &render_message(fields, &config.greeting))
}

/// Percent-encode with `encodeURIComponent` rules.
#[must_use]
pub fn encode_uri_component(src: &str) -> String {
    let mut out = String::with_capacity(src.len());
    for &b in src.as_bytes() {
        if is_unreserved(b) {
            out.push(b as char);
        } else {
            out.push('%');
            out.push(hex_upper(b >> 4));
            out.push(hex_upper(b & 0x0F));
        }
    }
    out
}

/// Inverse of [`encode_uri_component`]. Malformed escapes are kept verbatim.
#[must_use]
pub fn decode_uri_component(src: &str) -> String {
    let bytes = src.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%'
            && i + 2 < bytes.len()
            && let (Some(hi), Some(lo)) = (hex_value(bytes[i + 1]), hex_value(bytes[i + 2]))
        {
            out.push((hi << 4) | lo);
            i += 3;
            continue;
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn is_unreserved(b: u8) -> bool {
    b.is_ascii_alphanumeric()
        || matches!(b, b'-' | b'_' | b'.' | b'!' | b'~' | b'*' | b'\'' | b'(' | b')')
}

fn hex_upper(nibble: u8) -> char {
    char::from(b"0123456789ABCDEF"[usize::from(nibble & 0x0F)])
}

fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}
