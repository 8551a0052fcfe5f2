//! Domain-specific types shared by the codec and the media layers

use std::fmt;

/// Alpha value written into every encoded pixel
pub const PIXEL_ALPHA: u8 = 255;

/// One RGBA pixel. Alpha carries no data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Pixel {
    /// Opaque pixel from the three data channels
    #[must_use]
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self {
            r,
            g,
            b,
            a: PIXEL_ALPHA,
        }
    }

    #[inline]
    #[must_use]
    pub const fn from_rgba(rgba: [u8; 4]) -> Self {
        Self {
            r: rgba[0],
            g: rgba[1],
            b: rgba[2],
            a: rgba[3],
        }
    }

    #[inline]
    #[must_use]
    pub const fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Same data channels, alpha ignored
    #[inline]
    #[must_use]
    pub fn same_color(&self, other: &Self) -> bool {
        self.r == other.r && self.g == other.g && self.b == other.b
    }
}

impl fmt::Display for Pixel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rgba({r}, {g}, {b}, {a})",
            r = self.r,
            g = self.g,
            b = self.b,
            a = self.a
        )
    }
}

/// A scaled sample split into its integer part and two three-digit
/// fractional groups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DigitTriple {
    pub first: i32,
    pub next: u32,
    pub last: u32,
}

impl DigitTriple {
    #[must_use]
    pub const fn new(first: i32, next: u32, last: u32) -> Self {
        Self { first, next, last }
    }

    /// Integer part clamped into a colour channel
    #[inline]
    #[must_use]
    pub fn first_channel(&self) -> u8 {
        self.first.clamp(0, i32::from(u8::MAX)) as u8
    }
}

impl fmt::Display for DigitTriple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{first}.{next:03}{last:03}",
            first = self.first,
            next = self.next,
            last = self.last
        )
    }
}

/// Canvas size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Smallest near-square canvas that holds `len` pixels
    #[must_use]
    pub fn for_len(len: usize) -> Self {
        if len == 0 {
            return Self::new(0, 0);
        }

        let mut width = (len as f64).sqrt().ceil() as usize;
        // Float sqrt may overshoot by one on perfect squares near the limit
        while width > 1 && (width - 1) * (width - 1) >= len {
            width -= 1;
        }
        let height = len.div_ceil(width);

        Self::new(width as u32, height as u32)
    }

    #[inline]
    #[must_use]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    #[inline]
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}

impl Default for Dimensions {
    /// Canvas size used when nothing else is known
    fn default() -> Self {
        Self::new(500, 500)
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{width}x{height}", width = self.width, height = self.height)
    }
}
