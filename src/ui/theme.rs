use crate::core::config::{PaletteOverrides, SwatchOverrides};
use ratatui::style::Color;
use tracing::warn;

/// Semantic color slots the recolorer asks for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColorRole {
    Label,
    SecondaryLabel,
    Link,
    Code,
    CodeBackground,
    UserText,
    AssistantText,
}

/// Opaque color lookup. The recolorer only ever asks for a role and a theme
/// flag; where the colors come from is the host's business.
pub trait ColorLookup {
    fn color(&self, role: ColorRole, is_dark: bool) -> Color;
}

impl<F> ColorLookup for F
where
    F: Fn(ColorRole, bool) -> Color,
{
    fn color(&self, role: ColorRole, is_dark: bool) -> Color {
        self(role, is_dark)
    }
}

/// One theme's worth of colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Swatch {
    pub label: Color,
    pub secondary_label: Color,
    pub link: Color,
    pub code: Color,
    pub code_background: Color,
    pub user_text: Color,
    pub assistant_text: Color,
}

impl Swatch {
    pub fn get(&self, role: ColorRole) -> Color {
        match role {
            ColorRole::Label => self.label,
            ColorRole::SecondaryLabel => self.secondary_label,
            ColorRole::Link => self.link,
            ColorRole::Code => self.code,
            ColorRole::CodeBackground => self.code_background,
            ColorRole::UserText => self.user_text,
            ColorRole::AssistantText => self.assistant_text,
        }
    }

    fn apply(&mut self, overrides: &SwatchOverrides) {
        let slots = [
            (&mut self.label, &overrides.label),
            (&mut self.secondary_label, &overrides.secondary_label),
            (&mut self.link, &overrides.link),
            (&mut self.code, &overrides.code),
            (&mut self.code_background, &overrides.code_background),
            (&mut self.user_text, &overrides.user_text),
            (&mut self.assistant_text, &overrides.assistant_text),
        ];
        for (slot, value) in slots {
            let Some(value) = value.as_deref() else {
                continue;
            };
            match parse_color(value) {
                Some(color) => *slot = color,
                None => warn!(value, "Ignoring unparseable palette color"),
            }
        }
    }
}

/// Built-in light/dark palette modeled on the platform's semantic colors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    light: Swatch,
    dark: Swatch,
}

impl Palette {
    pub fn semantic() -> Self {
        let light = Swatch {
            label: Color::Rgb(0x1d, 0x1d, 0x1f),
            secondary_label: Color::Rgb(0x6e, 0x6e, 0x73),
            link: Color::Rgb(0x00, 0x66, 0xcc),
            code: Color::Rgb(0xc4, 0x1a, 0x16),
            code_background: Color::Rgb(0xf2, 0xf2, 0xf7),
            user_text: Color::Rgb(0x00, 0x57, 0xb8),
            assistant_text: Color::Rgb(0x1d, 0x1d, 0x1f),
        };
        let dark = Swatch {
            label: Color::Rgb(0xf5, 0xf5, 0xf7),
            secondary_label: Color::Rgb(0x98, 0x98, 0x9d),
            link: Color::Rgb(0x41, 0x9c, 0xff),
            code: Color::Rgb(0xff, 0x6b, 0x5e),
            code_background: Color::Rgb(0x2c, 0x2c, 0x2e),
            user_text: Color::Rgb(0x64, 0xd2, 0xff),
            assistant_text: Color::Rgb(0xf5, 0xf5, 0xf7),
        };
        Self { light, dark }
    }

    pub fn with_overrides(mut self, overrides: &PaletteOverrides) -> Self {
        self.light.apply(&overrides.light);
        self.dark.apply(&overrides.dark);
        self
    }

    pub fn swatch(&self, is_dark: bool) -> &Swatch {
        if is_dark {
            &self.dark
        } else {
            &self.light
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::semantic()
    }
}

impl ColorLookup for Palette {
    fn color(&self, role: ColorRole, is_dark: bool) -> Color {
        self.swatch(is_dark).get(role)
    }
}

/// Parses `#rgb`, `#rrggbb`, `rgb(r,g,b)` or a named terminal color.
pub fn parse_color(s: &str) -> Option<Color> {
    let lower = s.trim().to_ascii_lowercase();
    if let Some(c) = parse_hex_color(&lower) {
        return Some(c);
    }
    if let Some(c) = parse_rgb_func(&lower) {
        return Some(c);
    }
    match lower.as_str() {
        "black" => Some(Color::Black),
        "white" => Some(Color::White),
        "gray" | "grey" => Some(Color::Gray),
        "dark_gray" | "dark-grey" | "darkgray" => Some(Color::DarkGray),
        "red" => Some(Color::Red),
        "green" => Some(Color::Green),
        "blue" => Some(Color::Blue),
        "light_blue" | "light-blue" => Some(Color::LightBlue),
        "cyan" => Some(Color::Cyan),
        "magenta" => Some(Color::Magenta),
        "yellow" => Some(Color::Yellow),
        "reset" => Some(Color::Reset),
        _ => None,
    }
}

fn parse_hex_color(s: &str) -> Option<Color> {
    let hex = s.strip_prefix('#')?;
    if !hex.is_ascii() {
        return None;
    }
    match hex.len() {
        3 => {
            let r = u8::from_str_radix(&hex[0..1].repeat(2), 16).ok()?;
            let g = u8::from_str_radix(&hex[1..2].repeat(2), 16).ok()?;
            let b = u8::from_str_radix(&hex[2..3].repeat(2), 16).ok()?;
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

fn parse_rgb_func(s: &str) -> Option<Color> {
    let content = s.strip_prefix("rgb(")?.strip_suffix(')')?;
    let parts: Vec<_> = content
        .split([',', ' '])
        .filter(|t| !t.is_empty())
        .collect();
    if parts.len() != 3 {
        return None;
    }
    let r = parts[0].parse::<u16>().ok()?;
    let g = parts[1].parse::<u16>().ok()?;
    let b = parts[2].parse::<u16>().ok()?;
    Some(Color::Rgb(
        r.min(255) as u8,
        g.min(255) as u8,
        b.min(255) as u8,
    ))
}
