//! Cell: The atomic unit of the frame buffer, plus the color and style
//! primitives shared by the colorizer and the widgets.

use bitflags::bitflags;
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// True-color RGB representation.
///
/// Serialized as a `"#rrggbb"` string in configuration files.
#[derive(Clone, Copy, PartialEq, Eq, Default, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    /// Red channel (0-255)
    pub r: u8,
    /// Green channel (0-255)
    pub g: u8,
    /// Blue channel (0-255)
    pub b: u8,
}

impl Rgb {
    /// Create a new RGB color.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Black (0, 0, 0)
    pub const BLACK: Self = Self::new(0, 0, 0);
    /// White (255, 255, 255)
    pub const WHITE: Self = Self::new(255, 255, 255);
    /// Pure green, the default insertion color.
    pub const GREEN: Self = Self::new(0, 255, 0);
    /// Pure red, the default deletion color.
    pub const RED: Self = Self::new(255, 0, 0);

    /// Create from a 24-bit hex color (e.g., 0xFF5500).
    #[inline]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn from_u32(hex: u32) -> Self {
        Self::new(
            ((hex >> 16) & 0xFF) as u8,
            ((hex >> 8) & 0xFF) as u8,
            (hex & 0xFF) as u8,
        )
    }
}

impl fmt::Debug for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl From<(u8, u8, u8)> for Rgb {
    #[inline]
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::new(r, g, b)
    }
}

impl FromStr for Rgb {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s
            .strip_prefix('#')
            .filter(|h| h.len() == 6 && h.chars().all(|c| c.is_ascii_hexdigit()))
            .ok_or_else(|| Error::InvalidColor(s.to_string()))?;
        u32::from_str_radix(hex, 16)
            .map(Self::from_u32)
            .map_err(|_| Error::InvalidColor(s.to_string()))
    }
}

impl TryFrom<String> for Rgb {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgb> for String {
    fn from(color: Rgb) -> Self {
        color.to_string()
    }
}

bitflags! {
    /// Text style modifiers.
    ///
    /// These can be combined using bitwise OR.
    ///
    /// # Example
    /// ```
    /// use diffbench::Modifiers;
    /// let style = Modifiers::BOLD | Modifiers::UNDERLINE;
    /// assert!(style.contains(Modifiers::BOLD));
    /// ```
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        /// Bold text
        const BOLD = 0b0000_0001;
        /// Dim/faint text
        const DIM = 0b0000_0010;
        /// Italic text
        const ITALIC = 0b0000_0100;
        /// Underlined text
        const UNDERLINE = 0b0000_1000;
        /// Reversed colors (fg/bg swapped)
        const REVERSED = 0b0010_0000;
        /// Strikethrough text
        const STRIKETHROUGH = 0b1000_0000;
    }
}

impl fmt::Debug for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        bitflags::parser::to_writer(self, f)
    }
}

bitflags! {
    /// Cell-level flags for special states.
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct CellFlags: u8 {
        /// This cell is covered by the wide character to its left
        const WIDE_CONTINUATION = 0b0000_0001;
    }
}

impl fmt::Debug for CellFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        bitflags::parser::to_writer(self, f)
    }
}

/// Visual attributes of a span of text.
///
/// `None` colors mean "the terminal's default", so unstyled text blends
/// with the user's color scheme instead of forcing white on black.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Style {
    /// Foreground color.
    pub fg: Option<Rgb>,
    /// Background color.
    pub bg: Option<Rgb>,
    /// Text modifiers.
    pub modifiers: Modifiers,
}

impl Style {
    /// The terminal's default style.
    pub const PLAIN: Self = Self {
        fg: None,
        bg: None,
        modifiers: Modifiers::empty(),
    };

    /// Set the foreground color (builder pattern).
    #[inline]
    #[must_use]
    pub const fn fg(mut self, fg: Rgb) -> Self {
        self.fg = Some(fg);
        self
    }

    /// Set the background color (builder pattern).
    #[inline]
    #[must_use]
    pub const fn bg(mut self, bg: Rgb) -> Self {
        self.bg = Some(bg);
        self
    }

    /// Add modifiers (builder pattern).
    #[inline]
    #[must_use]
    pub const fn modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = self.modifiers.union(modifiers);
        self
    }

    /// Layer `other` on top of `self`: colors set in `other` win.
    #[inline]
    #[must_use]
    pub const fn patch(self, other: Self) -> Self {
        Self {
            fg: match other.fg {
                Some(fg) => Some(fg),
                None => self.fg,
            },
            bg: match other.bg {
                Some(bg) => Some(bg),
                None => self.bg,
            },
            modifiers: self.modifiers.union(other.modifiers),
        }
    }
}

/// A single terminal cell.
///
/// Holds one grapheme cluster and its style. A grapheme two columns wide
/// occupies its own cell plus a `WIDE_CONTINUATION` cell to its right.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Cell {
    symbol: String,
    style: Style,
    flags: CellFlags,
}

impl Default for Cell {
    fn default() -> Self {
        Self::blank()
    }
}

impl Cell {
    /// An empty cell (space with the default style).
    pub fn blank() -> Self {
        Self {
            symbol: String::from(" "),
            style: Style::PLAIN,
            flags: CellFlags::empty(),
        }
    }

    /// Create a cell holding a single character.
    pub fn new(c: char) -> Self {
        Self {
            symbol: c.to_string(),
            style: Style::PLAIN,
            flags: CellFlags::empty(),
        }
    }

    /// Create a cell holding a grapheme cluster.
    pub fn from_grapheme(grapheme: &str) -> Self {
        Self {
            symbol: grapheme.to_string(),
            style: Style::PLAIN,
            flags: CellFlags::empty(),
        }
    }

    /// Create a wide-character continuation cell.
    pub fn wide_continuation(style: Style) -> Self {
        Self {
            symbol: String::new(),
            style,
            flags: CellFlags::WIDE_CONTINUATION,
        }
    }

    /// The grapheme stored in this cell (empty for continuations).
    #[inline]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// The cell's style.
    #[inline]
    pub const fn style(&self) -> Style {
        self.style
    }

    /// Check if this is a wide-character continuation.
    #[inline]
    pub const fn is_wide_continuation(&self) -> bool {
        self.flags.contains(CellFlags::WIDE_CONTINUATION)
    }

    /// Display width of the stored grapheme (0 for continuations).
    pub fn display_width(&self) -> usize {
        unicode_width::UnicodeWidthStr::width(self.symbol.as_str())
    }

    /// Set the style (builder pattern).
    #[inline]
    #[must_use]
    pub const fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Set the foreground color (builder pattern).
    #[inline]
    #[must_use]
    pub const fn with_fg(mut self, fg: Rgb) -> Self {
        self.style.fg = Some(fg);
        self
    }
}

impl fmt::Debug for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cell")
            .field("symbol", &self.symbol)
            .field("style", &self.style)
            .field("flags", &self.flags)
            .finish()
    }
}
