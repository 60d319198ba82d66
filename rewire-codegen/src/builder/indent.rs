//! Indentation of generated code.

use std::borrow::Cow;

/// One indentation level of generated code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indent {
    Spaces(u8),
    Tab,
}

impl Indent {
    /// Controller modules: 4 spaces.
    pub const CONTROLLER: Self = Self::Spaces(4);

    /// `rewire explain` outlines: 2 spaces.
    pub const OUTLINE: Self = Self::Spaces(2);

    /// Level configured as `[output] indent`; 0 selects tabs.
    pub fn from_width(width: u8) -> Self {
        match width {
            0 => Self::Tab,
            n => Self::Spaces(n),
        }
    }

    /// Text of one level.
    pub fn unit(&self) -> Cow<'static, str> {
        match self {
            Self::Spaces(2) => Cow::Borrowed("  "),
            Self::Spaces(4) => Cow::Borrowed("    "),
            Self::Spaces(n) => Cow::Owned(" ".repeat(usize::from(*n))),
            Self::Tab => Cow::Borrowed("\t"),
        }
    }
}

impl Default for Indent {
    fn default() -> Self {
        Self::CONTROLLER
    }
}
