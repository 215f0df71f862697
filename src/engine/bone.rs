//! Bone (domino tile) value type and its text encodings.
//!
//! The canonical text form is a single Unicode domino glyph. A bone `x|y`
//! maps to offset `x * 7 + y` inside one of two glyph blocks: the horizontal
//! block for ordinary bones and the vertical block for doubles. Parsing also
//! accepts the ASCII forms `x-y` and `x|y`.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use once_cell::sync::Lazy;

use super::error::{EngineError, EngineResult};

/// Highest pip value in a double-six set.
pub const MAX_PIP: u8 = 6;
/// Number of distinct pip values (`0..=MAX_PIP`).
pub const PIP_VALUES: usize = MAX_PIP as usize + 1;
/// `(N + 1)(N + 2) / 2` unique bones.
pub const UNIQUE_BONES: usize = PIP_VALUES * (PIP_VALUES + 1) / 2;

/// First glyph of the horizontal block (0|0 horizontal).
const GLYPH_HORIZONTAL: u32 = 0x1F031;
/// First glyph of the vertical block (0|0 vertical).
const GLYPH_VERTICAL: u32 = 0x1F063;
const GLYPH_BLOCK_LEN: u32 = (PIP_VALUES * PIP_VALUES) as u32;

static FULL_SET: Lazy<Vec<Bone>> = Lazy::new(|| {
    let mut bones = Vec::with_capacity(UNIQUE_BONES);
    for low in 0..=MAX_PIP {
        for high in low..=MAX_PIP {
            bones.push(Bone { x: low, y: high });
        }
    }
    bones
});

/// An unordered pair of pip values.
///
/// The written order `(x, y)` is kept so the bone renders back to the glyph
/// it was parsed from; equality, hashing and ordering ignore it.
#[derive(Debug, Clone, Copy)]
pub struct Bone {
    x: u8,
    y: u8,
}

impl Bone {
    pub fn new(x: u8, y: u8) -> EngineResult<Self> {
        if x > MAX_PIP || y > MAX_PIP {
            return Err(EngineError::malformed(format!(
                "pip values must be within 0..={MAX_PIP}, got {x}|{y}"
            )));
        }
        Ok(Self { x, y })
    }

    /// Every bone of a double-six set, lowest first.
    pub fn full_set() -> &'static [Bone] {
        &FULL_SET
    }

    /// Pips in written order.
    #[inline]
    pub fn pips(self) -> (u8, u8) {
        (self.x, self.y)
    }

    #[inline]
    pub fn low(self) -> u8 {
        self.x.min(self.y)
    }

    #[inline]
    pub fn high(self) -> u8 {
        self.x.max(self.y)
    }

    #[inline]
    pub fn is_double(self) -> bool {
        self.x == self.y
    }

    #[inline]
    pub fn pip_sum(self) -> u8 {
        self.x + self.y
    }

    #[inline]
    pub fn matches(self, value: u8) -> bool {
        self.x == value || self.y == value
    }

    /// The value left exposed when this bone is attached at `value`.
    pub fn other(self, value: u8) -> Option<u8> {
        if self.x == value {
            Some(self.y)
        } else if self.y == value {
            Some(self.x)
        } else {
            None
        }
    }

    /// Same bone, written the other way round.
    #[inline]
    pub fn flipped(self) -> Self {
        Self { x: self.y, y: self.x }
    }

    /// `(low, high)`; identifies the bone regardless of written order.
    #[inline]
    pub fn key(self) -> (u8, u8) {
        (self.low(), self.high())
    }

    pub fn glyph(self) -> char {
        let offset = u32::from(self.x) * PIP_VALUES as u32 + u32::from(self.y);
        let base = if self.is_double() {
            GLYPH_VERTICAL
        } else {
            GLYPH_HORIZONTAL
        };
        char::from_u32(base + offset).unwrap_or(char::REPLACEMENT_CHARACTER)
    }

    pub fn from_glyph(c: char) -> Option<Self> {
        let code = u32::from(c);
        let offset = [GLYPH_HORIZONTAL, GLYPH_VERTICAL]
            .iter()
            .find(|&&base| (base..base + GLYPH_BLOCK_LEN).contains(&code))
            .map(|&base| code - base)?;
        let x = (offset / PIP_VALUES as u32) as u8;
        let y = (offset % PIP_VALUES as u32) as u8;
        Some(Self { x, y })
    }
}

fn parse_pip(text: &str, whole: &str) -> EngineResult<u8> {
    let value: u8 = text
        .trim()
        .parse()
        .map_err(|_| EngineError::malformed(format!("invalid bone \"{whole}\"")))?;
    if value > MAX_PIP {
        return Err(EngineError::malformed(format!(
            "pip value {value} out of range in \"{whole}\""
        )));
    }
    Ok(value)
}

impl FromStr for Bone {
    type Err = EngineError;

    fn from_str(s: &str) -> EngineResult<Self> {
        let text = s.trim();
        let mut chars = text.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Bone::from_glyph(c)
                .ok_or_else(|| EngineError::malformed(format!("unknown bone glyph \"{text}\"")));
        }
        let (a, b) = text
            .split_once(|c: char| c == '-' || c == '|')
            .ok_or_else(|| EngineError::malformed(format!("invalid bone \"{text}\"")))?;
        Ok(Self {
            x: parse_pip(a, text)?,
            y: parse_pip(b, text)?,
        })
    }
}

/// `{}` renders the glyph, `{:#}` renders ASCII `x-y`.
impl fmt::Display for Bone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            write!(f, "{}-{}", self.x, self.y)
        } else {
            write!(f, "{}", self.glyph())
        }
    }
}

impl PartialEq for Bone {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Bone {}

impl Hash for Bone {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl PartialOrd for Bone {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Bone {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}
