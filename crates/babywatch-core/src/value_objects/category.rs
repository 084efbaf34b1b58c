//! Category flags for name suggestions
//!
//! A name may be offered for boys, girls, or both. Neither is representable
//! but the submission flow never produces it.

use bitflags::bitflags;

bitflags! {
    /// Which group(s) a suggested name applies to
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Category: u8 {
        /// Offered as a boy's name
        const BOY  = 1 << 0;
        /// Offered as a girl's name
        const GIRL = 1 << 1;

        const BOTH = Self::BOY.bits() | Self::GIRL.bits();
    }
}

impl Category {
    /// Build from the two independent booleans carried on the wire
    #[inline]
    pub fn from_flags(is_boy: bool, is_girl: bool) -> Self {
        let mut category = Self::empty();
        category.set(Self::BOY, is_boy);
        category.set(Self::GIRL, is_girl);
        category
    }

    #[inline]
    pub fn is_boy(self) -> bool {
        self.contains(Self::BOY)
    }

    #[inline]
    pub fn is_girl(self) -> bool {
        self.contains(Self::GIRL)
    }

    /// Key suffix: boy before girl, empty when neither is set
    pub fn suffix(self) -> &'static str {
        match (self.is_boy(), self.is_girl()) {
            (true, true) => "bg",
            (true, false) => "b",
            (false, true) => "g",
            (false, false) => "",
        }
    }

    /// Parse a key suffix back into flags
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        match suffix {
            "bg" => Some(Self::BOTH),
            "b" => Some(Self::BOY),
            "g" => Some(Self::GIRL),
            "" => Some(Self::empty()),
            _ => None,
        }
    }

    /// Short label shown next to the vote button
    pub fn hint(self) -> Option<&'static str> {
        match (self.is_boy(), self.is_girl()) {
            (true, true) => Some("(b/g)"),
            (true, false) => Some("(b)"),
            (false, true) => Some("(g)"),
            (false, false) => None,
        }
    }
}
