//! Collision layer masks.

use std::ops::{BitOr, BitOrAssign};

/// Number of distinct collision layers a mask can address.
pub const MAX_LAYERS: u8 = 32;

/// A set of collision layers, one bit per layer.
///
/// Masks are combined with `|` the same way collision content flags usually are:
///
/// ```
/// use echocast::scene::LayerMask;
///
/// const WALLS: LayerMask = LayerMask::layer(3);
/// const SOURCES: LayerMask = LayerMask::layer(8);
///
/// let probe_mask = WALLS | SOURCES;
/// assert!(probe_mask.contains(3));
/// assert!(probe_mask.contains(8));
/// assert!(!probe_mask.contains(0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LayerMask(pub u32);

impl LayerMask {
    pub const NONE: Self = Self(0);
    pub const ALL: Self = Self(u32::MAX);

    /// Mask containing only `layer`. Layers at or beyond [`MAX_LAYERS`] yield an empty mask.
    pub const fn layer(layer: u8) -> Self {
        if layer < MAX_LAYERS {
            Self(1 << layer)
        } else {
            Self::NONE
        }
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Returns true if `layer` is part of this mask.
    pub const fn contains(self, layer: u8) -> bool {
        layer < MAX_LAYERS && self.0 & (1 << layer) != 0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

impl BitOr for LayerMask {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl BitOrAssign for LayerMask {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}
