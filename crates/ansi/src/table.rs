//! The closed set of SGR color sequences the console understands
//!
//! `ESC[3Xm` and `ESC[0;3Xm` select the dim variant of hue `X`, `ESC[1;3Xm`
//! the bright variant and `ESC[0m` resets to the default foreground.
//! Anything else is unsupported.

use crate::ESC;
use hueconsole_core::{Color, RunColor};

/// One of the eight SGR hues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hue {
    /// Selector 30
    Black,
    /// Selector 31
    Red,
    /// Selector 32
    Green,
    /// Selector 33
    Yellow,
    /// Selector 34
    Blue,
    /// Selector 35
    Magenta,
    /// Selector 36
    Cyan,
    /// Selector 37
    White,
}

/// Dim (`0;` or no prefix) or bright (`1;` prefix)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intensity {
    /// Half brightness
    Dim,
    /// Full brightness
    Bright,
}

/// What a recognized SGR sequence selects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SgrColor {
    /// `ESC[0m`
    Reset,
    /// A palette entry
    Palette(Hue, Intensity),
}

impl Hue {
    /// All hues in selector order
    pub const ALL: [Hue; 8] = [
        Hue::Black,
        Hue::Red,
        Hue::Green,
        Hue::Yellow,
        Hue::Blue,
        Hue::Magenta,
        Hue::Cyan,
        Hue::White,
    ];

    fn from_selector(selector: u8) -> Option<Hue> {
        Hue::ALL.get(usize::from(selector.checked_sub(30)?)).copied()
    }

    fn selector(self) -> u8 {
        30 + self as u8
    }

    /// RGB value of this hue at the given intensity
    pub fn color(self, intensity: Intensity) -> Color {
        let brightness = match intensity {
            Intensity::Dim => 0.502,
            Intensity::Bright => 1.0,
        };
        match self {
            Hue::Black => match intensity {
                Intensity::Dim => Color::from_hsb(0.0, 0.0, 0.0),
                Intensity::Bright => Color::from_hsb(0.0, 0.0, 0.502),
            },
            Hue::White => match intensity {
                Intensity::Dim => Color::from_hsb(0.0, 0.0, 0.753),
                Intensity::Bright => Color::from_hsb(0.0, 0.0, 1.0),
            },
            Hue::Red => Color::from_hsb(0.0, 1.0, brightness),
            Hue::Yellow => Color::from_hsb(0.167, 1.0, brightness),
            Hue::Green => Color::from_hsb(0.333, 1.0, brightness),
            Hue::Cyan => Color::from_hsb(0.5, 1.0, brightness),
            Hue::Blue => Color::from_hsb(0.667, 1.0, brightness),
            Hue::Magenta => Color::from_hsb(0.833, 1.0, brightness),
        }
    }
}

impl SgrColor {
    /// The run color this selection produces
    pub fn run_color(self) -> RunColor {
        match self {
            SgrColor::Reset => RunColor::Default,
            SgrColor::Palette(hue, intensity) => RunColor::Rgb(hue.color(intensity)),
        }
    }

    /// Canonical escape sequence for this selection
    pub fn sequence(self) -> String {
        match self {
            SgrColor::Reset => format!("{}[0m", ESC),
            SgrColor::Palette(hue, Intensity::Dim) => format!("{}[{}m", ESC, hue.selector()),
            SgrColor::Palette(hue, Intensity::Bright) => {
                format!("{}[1;{}m", ESC, hue.selector())
            }
        }
    }
}

/// Look up the parameter string between `ESC[` and `m`
pub fn lookup(params: &str) -> Option<SgrColor> {
    if params == "0" {
        return Some(SgrColor::Reset);
    }

    let (intensity, selector) = match params.split_once(';') {
        None => (Intensity::Dim, params),
        Some(("0", selector)) => (Intensity::Dim, selector),
        Some(("1", selector)) => (Intensity::Bright, selector),
        Some(_) => return None,
    };

    // Only two-digit selectors exist, so reject "031" and friends up front
    if selector.len() != 2 {
        return None;
    }
    let hue = Hue::from_selector(selector.parse().ok()?)?;
    Some(SgrColor::Palette(hue, intensity))
}

/// Every recognized sequence with its meaning, in table order
pub fn sequences() -> Vec<(String, SgrColor)> {
    let mut entries = Vec::with_capacity(25);
    for hue in Hue::ALL {
        entries.push((
            format!("{}[{}m", ESC, hue.selector()),
            SgrColor::Palette(hue, Intensity::Dim),
        ));
    }
    for hue in Hue::ALL {
        entries.push((
            format!("{}[0;{}m", ESC, hue.selector()),
            SgrColor::Palette(hue, Intensity::Dim),
        ));
    }
    for hue in Hue::ALL {
        entries.push((
            format!("{}[1;{}m", ESC, hue.selector()),
            SgrColor::Palette(hue, Intensity::Bright),
        ));
    }
    entries.push((format!("{}[0m", ESC), SgrColor::Reset));
    entries
}

/// Human-readable list of supported sequences, with `ESC` spelled `\u001B`
pub fn supported_sequences(delimiter: &str) -> String {
    sequences()
        .into_iter()
        .map(|(sequence, _)| sequence.replace(ESC, "\\u001B"))
        .collect::<Vec<_>>()
        .join(delimiter)
}

/// The palette sequence whose color is closest to `color`
pub fn nearest_sequence(color: Color) -> String {
    let mut best = SgrColor::Palette(Hue::Blue, Intensity::Dim);
    let mut best_distance = color.distance(&Hue::Blue.color(Intensity::Dim));

    for intensity in [Intensity::Dim, Intensity::Bright] {
        for hue in Hue::ALL {
            let distance = color.distance(&hue.color(intensity));
            if distance < best_distance {
                best = SgrColor::Palette(hue, intensity);
                best_distance = distance;
            }
        }
    }

    best.sequence()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_dim_forms() {
        assert_eq!(lookup("31"), Some(SgrColor::Palette(Hue::Red, Intensity::Dim)));
        assert_eq!(lookup("0;31"), Some(SgrColor::Palette(Hue::Red, Intensity::Dim)));
        assert_eq!(lookup("37"), Some(SgrColor::Palette(Hue::White, Intensity::Dim)));
    }

    #[test]
    fn test_lookup_bright_and_reset() {
        assert_eq!(lookup("1;36"), Some(SgrColor::Palette(Hue::Cyan, Intensity::Bright)));
        assert_eq!(lookup("0"), Some(SgrColor::Reset));
    }

    #[test]
    fn test_lookup_rejects_unknown() {
        for params in ["", "1", "38", "29", "1;38", "2;31", "0;0", "031", "31;1", "1;31;0", "4"] {
            assert_eq!(lookup(params), None, "params {:?}", params);
        }
    }

    #[test]
    fn test_palette_values() {
        assert_eq!(Hue::Red.color(Intensity::Dim), Color::rgb(128, 0, 0));
        assert_eq!(Hue::Red.color(Intensity::Bright), Color::rgb(255, 0, 0));
        assert_eq!(Hue::Black.color(Intensity::Dim), Color::rgb(0, 0, 0));
        assert_eq!(Hue::Black.color(Intensity::Bright), Color::rgb(128, 128, 128));
        assert_eq!(Hue::White.color(Intensity::Dim), Color::rgb(192, 192, 192));
        assert_eq!(Hue::White.color(Intensity::Bright), Color::rgb(255, 255, 255));
        assert_eq!(Hue::Cyan.color(Intensity::Bright), Color::rgb(0, 255, 255));
    }

    #[test]
    fn test_table_is_closed_set() {
        let entries = sequences();
        assert_eq!(entries.len(), 25);
        for (sequence, color) in entries {
            let params = &sequence[2..sequence.len() - 1];
            assert_eq!(lookup(params), Some(color), "sequence {:?}", sequence);
        }
    }

    #[test]
    fn test_supported_sequences_listing() {
        let listing = supported_sequences(",");
        assert!(listing.starts_with("\\u001B[30m,"));
        assert!(listing.ends_with("\\u001B[0m"));
        assert!(!listing.contains(ESC));
    }

    #[test]
    fn test_nearest_sequence() {
        assert_eq!(nearest_sequence(Color::rgb(250, 5, 5)), format!("{}[1;31m", ESC));
        assert_eq!(nearest_sequence(Color::rgb(120, 0, 0)), format!("{}[31m", ESC));
        assert_eq!(nearest_sequence(Color::BLACK), format!("{}[30m", ESC));
    }

    #[test]
    fn test_canonical_sequence_round_trips() {
        assert_eq!(SgrColor::Reset.sequence(), "\u{1b}[0m");
        assert_eq!(
            SgrColor::Palette(Hue::Green, Intensity::Bright).sequence(),
            "\u{1b}[1;32m"
        );
        assert_eq!(SgrColor::Reset.run_color(), RunColor::Default);
    }
}
