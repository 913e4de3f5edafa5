use ratatui::style::Color;

// Accent values the named terminal palette cannot express
const PINK_BG: Color = Color::Rgb(255, 105, 180); // hot pink
const PUCE_BG: Color = Color::Rgb(128, 0, 128); // purple
const PUCE_RESET: Color = Color::Rgb(166, 77, 166); // white at 30% over the purple

/// Full rotation of the dashed ring, in 10 ms ticks (5 s linear loop).
pub const RING_PERIOD_TICKS: u64 = 500;
/// Full heart pulse, in 10 ms ticks (1 s loop).
pub const HEART_PERIOD_TICKS: u64 = 100;

/// Stored font names, in picker order.
pub const FONT_NAMES: [&str; 4] = ["Monospaced", "Rounded", "Serif", "Sans-serif"];

#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Theme {
    Original,
    Red,
    Pink,
    Puce,
}

impl Theme {
    pub const ALL: [Theme; 4] = [Theme::Original, Theme::Red, Theme::Pink, Theme::Puce];

    pub fn name(self) -> &'static str {
        match self {
            Theme::Original => "Original",
            Theme::Red => "Red",
            Theme::Pink => "Pink",
            Theme::Puce => "Puce",
        }
    }

    /// Case-insensitive lookup for the launch flag.
    pub fn from_name(name: &str) -> Option<Theme> {
        Theme::ALL
            .iter()
            .copied()
            .find(|t| t.name().eq_ignore_ascii_case(name))
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme::Original
    }
}

/// Colors for one theme, after the night-mode override. `Color::Reset`
/// stands in for the terminal's own default, which is what the Original
/// theme uses for background and text.
pub struct Palette {
    pub background: Color,
    pub foreground: Color,
    pub ring: Color,
    pub start_fill: Color,
    pub reset_fill: Color,
    pub reset_text: Color,
}

pub fn palette(theme: Theme, night_mode: bool) -> Palette {
    let background = if night_mode {
        Color::Black
    } else {
        match theme {
            Theme::Original => Color::Reset,
            Theme::Red => Color::Red,
            Theme::Pink => PINK_BG,
            Theme::Puce => PUCE_BG,
        }
    };
    Palette {
        background,
        foreground: match theme {
            Theme::Original => Color::Reset,
            _ => Color::White,
        },
        // Terminal cells cannot blend, so the translucent strokes render
        // as plain colors
        ring: match theme {
            Theme::Original => Color::Yellow,
            _ => Color::White,
        },
        start_fill: match theme {
            Theme::Original => Color::Yellow,
            Theme::Red => Color::Green,
            Theme::Pink => Color::White,
            Theme::Puce => Color::Black,
        },
        reset_fill: match theme {
            Theme::Original => Color::Red,
            Theme::Red => Color::White,
            Theme::Pink => Color::Black,
            Theme::Puce => PUCE_RESET,
        },
        reset_text: match theme {
            Theme::Red => Color::Red,
            _ => Color::White,
        },
    }
}

/// Start/stop control colors as (fill, text). While running the fill takes
/// the theme's foreground color and the text takes the button color, so the
/// control reads inverted.
pub fn start_button_colors(palette: &Palette, running: bool) -> (Color, Color) {
    if running {
        (palette.foreground, palette.start_fill)
    } else {
        (palette.start_fill, Color::White)
    }
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub enum AnimationKind {
    DashedRing,
    PulsingHeart,
    None,
}

/// Decoration for a theme, after the enable-animations gate.
pub fn animation(theme: Theme, animations_enabled: bool) -> AnimationKind {
    if !animations_enabled {
        return AnimationKind::None;
    }
    match theme {
        Theme::Original | Theme::Red => AnimationKind::DashedRing,
        Theme::Pink => AnimationKind::PulsingHeart,
        Theme::Puce => AnimationKind::None,
    }
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub enum ControlLayout {
    Stacked,
    SideBySide,
}

pub fn control_layout(theme: Theme) -> ControlLayout {
    match theme {
        Theme::Red => ControlLayout::SideBySide,
        _ => ControlLayout::Stacked,
    }
}

/// Whether the reset control renders. Red keeps both buttons on screen at
/// all times; the stacked themes show reset only for a stopped, nonzero
/// clock.
pub fn reset_visible(theme: Theme, running: bool, elapsed_secs: f64) -> bool {
    match control_layout(theme) {
        ControlLayout::SideBySide => true,
        ControlLayout::Stacked => !running && elapsed_secs > 0.0,
    }
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub enum DigitFont {
    Monospaced,
    Rounded,
    Serif,
    SansSerif,
}

impl DigitFont {
    /// Resolve a stored font name; anything unrecognized falls back to
    /// monospaced.
    pub fn from_name(name: &str) -> DigitFont {
        match name {
            "Rounded" => DigitFont::Rounded,
            "Serif" => DigitFont::Serif,
            "Sans-serif" => DigitFont::SansSerif,
            _ => DigitFont::Monospaced,
        }
    }
}

/// Map one readout character into the font's digit form. Terminal cells are
/// fixed-width, so the families map to Unicode digit variants: monospace
/// digits, sans-serif bold for the rounded look, bold for the serif look,
/// plain ASCII for Sans-serif. Separators pass through untouched.
pub fn digit_glyph(font: DigitFont, ch: char) -> char {
    let d = match ch.to_digit(10) {
        Some(d) => d,
        None => return ch,
    };
    let base = match font {
        DigitFont::Monospaced => 0x1D7F6, // MATHEMATICAL MONOSPACE DIGIT ZERO
        DigitFont::Rounded => 0x1D7EC,    // MATHEMATICAL SANS-SERIF BOLD DIGIT ZERO
        DigitFont::Serif => 0x1D7CE,      // MATHEMATICAL BOLD DIGIT ZERO
        DigitFont::SansSerif => return ch,
    };
    char::from_u32(base + d).unwrap_or(ch)
}

/// Render a formatted readout in the given digit font.
pub fn style_readout(font: DigitFont, readout: &str) -> String {
    readout.chars().map(|c| digit_glyph(font, c)).collect()
}

/// How far around the ring the dash pattern has rotated, as an offset in
/// perimeter cells.
pub fn ring_offset(anim_ticks: u64, perimeter: usize) -> usize {
    if perimeter == 0 {
        return 0;
    }
    let phase = (anim_ticks % RING_PERIOD_TICKS) as usize;
    phase * perimeter / RING_PERIOD_TICKS as usize
}

/// Large half of the heart pulse (the scale rises and falls once per
/// period).
pub fn heart_large(anim_ticks: u64) -> bool {
    anim_ticks % HEART_PERIOD_TICKS < HEART_PERIOD_TICKS / 2
}
