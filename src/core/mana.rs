//! Mana colors, costs and pools

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign};

/// Mana colors in MTG
///
/// `Colorless` only appears on the production side: a source that can pay
/// generic costs but no colored requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Color {
    White,
    Blue,
    Black,
    Red,
    Green,
    Colorless,
}

impl Color {
    /// The five colors, in WUBRG order
    pub const WUBRG: [Color; 5] = [Color::White, Color::Blue, Color::Black, Color::Red, Color::Green];

    /// Parse from single-character representation
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'W' | 'w' => Some(Color::White),
            'U' | 'u' => Some(Color::Blue),
            'B' | 'b' => Some(Color::Black),
            'R' | 'r' => Some(Color::Red),
            'G' | 'g' => Some(Color::Green),
            'C' | 'c' => Some(Color::Colorless),
            _ => None,
        }
    }

    /// Position in a WUBRG-then-colorless count array
    pub(crate) fn slot(self) -> usize {
        match self {
            Color::White => 0,
            Color::Blue => 1,
            Color::Black => 2,
            Color::Red => 3,
            Color::Green => 4,
            Color::Colorless => 5,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "W"),
            Color::Blue => write!(f, "U"),
            Color::Black => write!(f, "B"),
            Color::Red => write!(f, "R"),
            Color::Green => write!(f, "G"),
            Color::Colorless => write!(f, "C"),
        }
    }
}

/// Represents a mana cost (e.g., "2RR" = 2 generic + 2 red)
/// Copy-eligible since it's just 6 u8 fields
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ManaCost {
    pub generic: u8,
    pub white: u8,
    pub blue: u8,
    pub black: u8,
    pub red: u8,
    pub green: u8,
}

impl ManaCost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a mana cost string like "2RR" or "1WB"
    ///
    /// Digits accumulate into the generic part; `C` is treated as one generic
    /// symbol since costs here never demand colorless specifically.
    pub fn from_string(s: &str) -> Self {
        let mut cost = ManaCost::new();
        let mut generic_str = String::new();

        for c in s.chars() {
            match c {
                '0'..='9' => generic_str.push(c),
                _ => match Color::from_char(c) {
                    Some(Color::Colorless) => cost.generic += 1,
                    Some(color) => *cost.color_mut(color) += 1,
                    None => {} // Ignore braces and other decoration
                },
            }
        }

        if !generic_str.is_empty() {
            cost.generic += generic_str.parse::<u8>().unwrap_or(0);
        }

        cost
    }

    /// Required amount of one specific color
    pub fn color(&self, color: Color) -> u8 {
        match color {
            Color::White => self.white,
            Color::Blue => self.blue,
            Color::Black => self.black,
            Color::Red => self.red,
            Color::Green => self.green,
            Color::Colorless => 0,
        }
    }

    fn color_mut(&mut self, color: Color) -> &mut u8 {
        match color {
            Color::White => &mut self.white,
            Color::Blue => &mut self.blue,
            Color::Black => &mut self.black,
            Color::Red => &mut self.red,
            Color::Green => &mut self.green,
            Color::Colorless => &mut self.generic,
        }
    }

    /// Does paying this cost require at least one mana of `color`?
    pub fn has_color(&self, color: Color) -> bool {
        self.color(color) > 0
    }

    /// Total converted mana cost
    pub fn cmc(&self) -> u8 {
        self.generic + self.white + self.blue + self.black + self.red + self.green
    }

    pub fn is_free(&self) -> bool {
        self.cmc() == 0
    }
}

impl AddAssign for ManaCost {
    fn add_assign(&mut self, rhs: ManaCost) {
        self.generic = self.generic.saturating_add(rhs.generic);
        self.white = self.white.saturating_add(rhs.white);
        self.blue = self.blue.saturating_add(rhs.blue);
        self.black = self.black.saturating_add(rhs.black);
        self.red = self.red.saturating_add(rhs.red);
        self.green = self.green.saturating_add(rhs.green);
    }
}

impl Add for ManaCost {
    type Output = ManaCost;

    fn add(mut self, rhs: ManaCost) -> ManaCost {
        self += rhs;
        self
    }
}

impl fmt::Display for ManaCost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.generic > 0 || self.is_free() {
            write!(f, "{}", self.generic)?;
        }
        for color in Color::WUBRG {
            for _ in 0..self.color(color) {
                write!(f, "{color}")?;
            }
        }
        Ok(())
    }
}

/// Mana pool filled by executing mana abilities
/// Copy-eligible since it's just 6 u8 fields (6 bytes)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManaPool {
    pub white: u8,
    pub blue: u8,
    pub black: u8,
    pub red: u8,
    pub green: u8,
    pub colorless: u8,
}

impl ManaPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn amount(&self, color: Color) -> u8 {
        match color {
            Color::White => self.white,
            Color::Blue => self.blue,
            Color::Black => self.black,
            Color::Red => self.red,
            Color::Green => self.green,
            Color::Colorless => self.colorless,
        }
    }

    fn amount_mut(&mut self, color: Color) -> &mut u8 {
        match color {
            Color::White => &mut self.white,
            Color::Blue => &mut self.blue,
            Color::Black => &mut self.black,
            Color::Red => &mut self.red,
            Color::Green => &mut self.green,
            Color::Colorless => &mut self.colorless,
        }
    }

    pub fn add_color(&mut self, color: Color) {
        *self.amount_mut(color) += 1;
    }

    /// Remove one mana of `color`; returns false if none was present
    pub fn remove_color(&mut self, color: Color) -> bool {
        let amount = self.amount_mut(color);
        if *amount == 0 {
            return false;
        }
        *amount -= 1;
        true
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Check if we can pay the given mana cost
    ///
    /// Colored requirements are matched per color; whatever is left over
    /// (including colorless) goes toward the generic part.
    pub fn can_pay(&self, cost: &ManaCost) -> bool {
        let mut surplus = self.colorless;
        for color in Color::WUBRG {
            let available = self.amount(color);
            let required = cost.color(color);
            if available < required {
                return false;
            }
            surplus += available - required;
        }
        surplus >= cost.generic
    }

    /// Total mana in pool
    pub fn total(&self) -> u8 {
        self.white + self.blue + self.black + self.red + self.green + self.colorless
    }
}
