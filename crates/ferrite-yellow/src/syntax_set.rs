use std::fmt;

use crate::SyntaxKind;

const SIZE: usize = 2;

/// Constant-time membership set over `SyntaxKind`, usable in `const` context.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SyntaxSet {
    bits: [u64; SIZE],
}

impl SyntaxSet {
    pub const EMPTY: Self = Self { bits: [0; SIZE] };

    /// Word index and bit mask of `kind`.
    const fn position(kind: SyntaxKind) -> (usize, u64) {
        let raw = kind as u16 as u32;
        let slot = (raw / u64::BITS) as usize;
        assert!(slot < SIZE, "`SyntaxKind` outgrew `SyntaxSet`");
        (slot, 1 << (raw % u64::BITS))
    }

    pub const fn new<const N: usize>(kinds: [SyntaxKind; N]) -> Self {
        let mut bits = [0; SIZE];
        let mut i = 0;
        while i < N {
            let (slot, mask) = Self::position(kinds[i]);
            bits[slot] |= mask;
            i += 1;
        }
        Self { bits }
    }

    pub const fn union(mut self, other: &Self) -> Self {
        let mut slot = 0;
        while slot < SIZE {
            self.bits[slot] |= other.bits[slot];
            slot += 1;
        }
        self
    }

    pub const fn contains(&self, kind: SyntaxKind) -> bool {
        let (slot, mask) = Self::position(kind);
        self.bits[slot] & mask != 0
    }

    pub fn insert(&mut self, kind: SyntaxKind) {
        let (slot, mask) = Self::position(kind);
        self.bits[slot] |= mask;
    }

    pub const fn len(&self) -> usize {
        let mut len = 0;
        let mut slot = 0;
        while slot < SIZE {
            len += self.bits[slot].count_ones() as usize;
            slot += 1;
        }
        len
    }

    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates the members in `SyntaxKind` order.
    pub fn iter(&self) -> impl Iterator<Item = SyntaxKind> + '_ {
        self.bits.iter().enumerate().flat_map(|(slot, &word)| {
            (0..u64::BITS as u16)
                .filter(move |bit| word & (1 << bit) != 0)
                .filter_map(move |bit| SyntaxKind::from_raw(slot as u16 * u64::BITS as u16 + bit))
        })
    }
}

impl FromIterator<SyntaxKind> for SyntaxSet {
    fn from_iter<I: IntoIterator<Item = SyntaxKind>>(iter: I) -> Self {
        let mut set = Self::EMPTY;
        for kind in iter {
            set.insert(kind);
        }
        set
    }
}

impl fmt::Debug for SyntaxSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
