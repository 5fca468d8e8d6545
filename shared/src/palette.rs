//! Color helpers for wheel segments and the labels drawn on them.

use std::collections::HashSet;

use log::warn;
use rand::seq::SliceRandom;
use rand::Rng;

pub const PALETTE: [&str; 16] = [
    "#FF6B6B", "#4ECDC4", "#FFD93D", "#95E1D3",
    "#F38181", "#A8E6CF", "#6C5CE7", "#FD79A8",
    "#00B894", "#E17055", "#0984E3", "#FDCB6E",
    "#E84393", "#00CEC9", "#A29BFE", "#55EFC4",
];

pub const DARK_TEXT: &str = "#1f2937";
pub const LIGHT_TEXT: &str = "#ffffff";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Perceived luminance in `[0, 1]`.
    pub fn luminance(self) -> f64 {
        (0.299 * self.r as f64 + 0.587 * self.g as f64 + 0.114 * self.b as f64) / 255.0
    }

    fn shift(self, amount: i32) -> Self {
        let channel = |c: u8| (c as i32 + amount).clamp(0, 255) as u8;
        Self {
            r: channel(self.r),
            g: channel(self.g),
            b: channel(self.b),
        }
    }
}

/// Parses `#RRGGBB` (the leading `#` is optional).
pub fn parse_hex(color: &str) -> Option<Rgb> {
    let hex = color.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
    Some(Rgb {
        r: channel(0..2)?,
        g: channel(2..4)?,
        b: channel(4..6)?,
    })
}

/// Picks a palette color not present in `used`, falling back to the whole
/// palette once every color is taken.
pub fn random_color(used: &HashSet<String>) -> String {
    random_color_with(&mut rand::thread_rng(), used)
}

pub fn random_color_with<R: Rng + ?Sized>(rng: &mut R, used: &HashSet<String>) -> String {
    let used_upper: HashSet<String> = used.iter().map(|c| c.to_ascii_uppercase()).collect();
    let available: Vec<&str> = PALETTE
        .iter()
        .copied()
        .filter(|color| !used_upper.contains(*color))
        .collect();

    let pool: &[&str] = if available.is_empty() { &PALETTE } else { &available };
    pool.choose(rng).copied().unwrap_or(PALETTE[0]).to_string()
}

fn channel_step(percent: f64) -> i32 {
    (2.55 * percent).round() as i32
}

pub fn lighten(color: &str, percent: f64) -> String {
    match parse_hex(color) {
        Some(rgb) => rgb.shift(channel_step(percent)).to_hex(),
        None => {
            warn!("Cannot lighten malformed color {:?}", color);
            color.to_string()
        }
    }
}

pub fn darken(color: &str, percent: f64) -> String {
    match parse_hex(color) {
        Some(rgb) => rgb.shift(-channel_step(percent)).to_hex(),
        None => {
            warn!("Cannot darken malformed color {:?}", color);
            color.to_string()
        }
    }
}

/// Dark text on light backgrounds, light text otherwise. A luminance of
/// exactly 0.5 counts as dark background.
pub fn contrast_text_color(background: &str) -> &'static str {
    match parse_hex(background) {
        Some(rgb) if rgb.luminance() > 0.5 => DARK_TEXT,
        Some(_) => LIGHT_TEXT,
        None => {
            warn!("Cannot compute contrast for malformed color {:?}", background);
            DARK_TEXT
        }
    }
}
