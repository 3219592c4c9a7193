use ratatui::style::Color;
use twocats_core::NotificationKind;

/// Colors for the terminal preview
#[derive(Debug, Clone)]
pub struct Theme {
    pub bg0: Color,
    pub bg1: Color,
    pub bg2: Color,

    pub fg0: Color,
    pub fg1: Color,
    pub grey0: Color,
    pub grey1: Color,

    /// Gradient start of the site's brand color
    pub accent: Color,
    /// Gradient end of the site's brand color
    pub accent_alt: Color,
    pub error: Color,
    /// Text of elements still waiting to fade in
    pub pending: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            bg0: Color::Rgb(0x0f, 0x0f, 0x23),
            bg1: Color::Rgb(0x1a, 0x1a, 0x2e),
            bg2: Color::Rgb(0x2a, 0x2a, 0x44),
            fg0: Color::Rgb(0xf5, 0xf5, 0xf5),
            fg1: Color::Rgb(0xcf, 0xcf, 0xe0),
            grey0: Color::Rgb(0x5c, 0x5c, 0x7a),
            grey1: Color::Rgb(0x8a, 0x8a, 0xa8),
            accent: Color::Rgb(0x66, 0x7e, 0xea),
            accent_alt: Color::Rgb(0x76, 0x4b, 0xa2),
            error: Color::Rgb(0xef, 0x44, 0x44),
            pending: Color::Rgb(0x3a, 0x3a, 0x58),
        }
    }
}

impl Theme {
    /// Background of a notification, taken from the start of its CSS gradient
    pub fn notification(&self, kind: NotificationKind) -> Color {
        first_hex_color(kind.background()).unwrap_or(self.accent)
    }
}

/// Parse a hex color string into a ratatui Color
/// Accepts formats: "#RRGGBB", "RRGGBB", "#RGB", "RGB"
pub fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.trim().trim_start_matches('#');

    match hex.len() {
        // Short form: RGB -> RRGGBB
        3 => {
            let r = u8::from_str_radix(&hex[0..1], 16).ok()? * 17;
            let g = u8::from_str_radix(&hex[1..2], 16).ok()? * 17;
            let b = u8::from_str_radix(&hex[2..3], 16).ok()? * 17;
            Some(Color::Rgb(r, g, b))
        }
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some(Color::Rgb(r, g, b))
        }
        _ => None,
    }
}

/// First `#rrggbb` found in a CSS value such as a gradient
pub fn first_hex_color(css: &str) -> Option<Color> {
    let start = css.find('#')?;
    let digits: String = css[start + 1..]
        .chars()
        .take_while(|c| c.is_ascii_hexdigit())
        .collect();
    parse_hex_color(&digits)
}
