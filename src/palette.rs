//! The 256-entry RGBA color palette used by MagicaVoxel scenes.

/// 256 RGBA color entries. Index 0 is always transparent black; entries
/// 1..255 are either the file's `RGBA` chunk contents or
/// [`Palette::default`]'s canonical MagicaVoxel palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette(pub [[u8; 4]; 256]);

impl Palette {
    pub fn entries(&self) -> &[[u8; 4]; 256] {
        &self.0
    }
}

impl Default for Palette {
    fn default() -> Self {
        Palette(DEFAULT_PALETTE)
    }
}

/// MagicaVoxel's canonical default palette, used whenever a scene has no
/// `RGBA` chunk. Entry 0 is reserved and always transparent black.
pub const DEFAULT_PALETTE: [[u8; 4]; 256] = [
    [0x00, 0x00, 0x00, 0x00], [0xff, 0xff, 0xff, 0xff], [0xff, 0xff, 0xcc, 0xff], [0xff, 0xff, 0x99, 0xff],
    [0xff, 0xff, 0x66, 0xff], [0xff, 0xff, 0x33, 0xff], [0xff, 0xff, 0x00, 0xff], [0xff, 0xcc, 0xff, 0xff],
    [0xff, 0xcc, 0xcc, 0xff], [0xff, 0xcc, 0x99, 0xff], [0xff, 0xcc, 0x66, 0xff], [0xff, 0xcc, 0x33, 0xff],
    [0xff, 0xcc, 0x00, 0xff], [0xff, 0x99, 0xff, 0xff], [0xff, 0x99, 0xcc, 0xff], [0xff, 0x99, 0x99, 0xff],
    [0xff, 0x99, 0x66, 0xff], [0xff, 0x99, 0x33, 0xff], [0xff, 0x99, 0x00, 0xff], [0xff, 0x66, 0xff, 0xff],
    [0xff, 0x66, 0xcc, 0xff], [0xff, 0x66, 0x99, 0xff], [0xff, 0x66, 0x66, 0xff], [0xff, 0x66, 0x33, 0xff],
    [0xff, 0x66, 0x00, 0xff], [0xff, 0x33, 0xff, 0xff], [0xff, 0x33, 0xcc, 0xff], [0xff, 0x33, 0x99, 0xff],
    [0xff, 0x33, 0x66, 0xff], [0xff, 0x33, 0x33, 0xff], [0xff, 0x33, 0x00, 0xff], [0xff, 0x00, 0xff, 0xff],
    [0xff, 0x00, 0xcc, 0xff], [0xff, 0x00, 0x99, 0xff], [0xff, 0x00, 0x66, 0xff], [0xff, 0x00, 0x33, 0xff],
    [0xff, 0x00, 0x00, 0xff], [0xcc, 0xff, 0xff, 0xff], [0xcc, 0xff, 0xcc, 0xff], [0xcc, 0xff, 0x99, 0xff],
    [0xcc, 0xff, 0x66, 0xff], [0xcc, 0xff, 0x33, 0xff], [0xcc, 0xff, 0x00, 0xff], [0xcc, 0xcc, 0xff, 0xff],
    [0xcc, 0xcc, 0xcc, 0xff], [0xcc, 0xcc, 0x99, 0xff], [0xcc, 0xcc, 0x66, 0xff], [0xcc, 0xcc, 0x33, 0xff],
    [0xcc, 0xcc, 0x00, 0xff], [0xcc, 0x99, 0xff, 0xff], [0xcc, 0x99, 0xcc, 0xff], [0xcc, 0x99, 0x99, 0xff],
    [0xcc, 0x99, 0x66, 0xff], [0xcc, 0x99, 0x33, 0xff], [0xcc, 0x99, 0x00, 0xff], [0xcc, 0x66, 0xff, 0xff],
    [0xcc, 0x66, 0xcc, 0xff], [0xcc, 0x66, 0x99, 0xff], [0xcc, 0x66, 0x66, 0xff], [0xcc, 0x66, 0x33, 0xff],
    [0xcc, 0x66, 0x00, 0xff], [0xcc, 0x33, 0xff, 0xff], [0xcc, 0x33, 0xcc, 0xff], [0xcc, 0x33, 0x99, 0xff],
    [0xcc, 0x33, 0x66, 0xff], [0xcc, 0x33, 0x33, 0xff], [0xcc, 0x33, 0x00, 0xff], [0xcc, 0x00, 0xff, 0xff],
    [0xcc, 0x00, 0xcc, 0xff], [0xcc, 0x00, 0x99, 0xff], [0xcc, 0x00, 0x66, 0xff], [0xcc, 0x00, 0x33, 0xff],
    [0xcc, 0x00, 0x00, 0xff], [0x99, 0xff, 0xff, 0xff], [0x99, 0xff, 0xcc, 0xff], [0x99, 0xff, 0x99, 0xff],
    [0x99, 0xff, 0x66, 0xff], [0x99, 0xff, 0x33, 0xff], [0x99, 0xff, 0x00, 0xff], [0x99, 0xcc, 0xff, 0xff],
    [0x99, 0xcc, 0xcc, 0xff], [0x99, 0xcc, 0x99, 0xff], [0x99, 0xcc, 0x66, 0xff], [0x99, 0xcc, 0x33, 0xff],
    [0x99, 0xcc, 0x00, 0xff], [0x99, 0x99, 0xff, 0xff], [0x99, 0x99, 0xcc, 0xff], [0x99, 0x99, 0x99, 0xff],
    [0x99, 0x99, 0x66, 0xff], [0x99, 0x99, 0x33, 0xff], [0x99, 0x99, 0x00, 0xff], [0x99, 0x66, 0xff, 0xff],
    [0x99, 0x66, 0xcc, 0xff], [0x99, 0x66, 0x99, 0xff], [0x99, 0x66, 0x66, 0xff], [0x99, 0x66, 0x33, 0xff],
    [0x99, 0x66, 0x00, 0xff], [0x99, 0x33, 0xff, 0xff], [0x99, 0x33, 0xcc, 0xff], [0x99, 0x33, 0x99, 0xff],
    [0x99, 0x33, 0x66, 0xff], [0x99, 0x33, 0x33, 0xff], [0x99, 0x33, 0x00, 0xff], [0x99, 0x00, 0xff, 0xff],
    [0x99, 0x00, 0xcc, 0xff], [0x99, 0x00, 0x99, 0xff], [0x99, 0x00, 0x66, 0xff], [0x99, 0x00, 0x33, 0xff],
    [0x99, 0x00, 0x00, 0xff], [0x66, 0xff, 0xff, 0xff], [0x66, 0xff, 0xcc, 0xff], [0x66, 0xff, 0x99, 0xff],
    [0x66, 0xff, 0x66, 0xff], [0x66, 0xff, 0x33, 0xff], [0x66, 0xff, 0x00, 0xff], [0x66, 0xcc, 0xff, 0xff],
    [0x66, 0xcc, 0xcc, 0xff], [0x66, 0xcc, 0x99, 0xff], [0x66, 0xcc, 0x66, 0xff], [0x66, 0xcc, 0x33, 0xff],
    [0x66, 0xcc, 0x00, 0xff], [0x66, 0x99, 0xff, 0xff], [0x66, 0x99, 0xcc, 0xff], [0x66, 0x99, 0x99, 0xff],
    [0x66, 0x99, 0x66, 0xff], [0x66, 0x99, 0x33, 0xff], [0x66, 0x99, 0x00, 0xff], [0x66, 0x66, 0xff, 0xff],
    [0x66, 0x66, 0xcc, 0xff], [0x66, 0x66, 0x99, 0xff], [0x66, 0x66, 0x66, 0xff], [0x66, 0x66, 0x33, 0xff],
    [0x66, 0x66, 0x00, 0xff], [0x66, 0x33, 0xff, 0xff], [0x66, 0x33, 0xcc, 0xff], [0x66, 0x33, 0x99, 0xff],
    [0x66, 0x33, 0x66, 0xff], [0x66, 0x33, 0x33, 0xff], [0x66, 0x33, 0x00, 0xff], [0x66, 0x00, 0xff, 0xff],
    [0x66, 0x00, 0xcc, 0xff], [0x66, 0x00, 0x99, 0xff], [0x66, 0x00, 0x66, 0xff], [0x66, 0x00, 0x33, 0xff],
    [0x66, 0x00, 0x00, 0xff], [0x33, 0xff, 0xff, 0xff], [0x33, 0xff, 0xcc, 0xff], [0x33, 0xff, 0x99, 0xff],
    [0x33, 0xff, 0x66, 0xff], [0x33, 0xff, 0x33, 0xff], [0x33, 0xff, 0x00, 0xff], [0x33, 0xcc, 0xff, 0xff],
    [0x33, 0xcc, 0xcc, 0xff], [0x33, 0xcc, 0x99, 0xff], [0x33, 0xcc, 0x66, 0xff], [0x33, 0xcc, 0x33, 0xff],
    [0x33, 0xcc, 0x00, 0xff], [0x33, 0x99, 0xff, 0xff], [0x33, 0x99, 0xcc, 0xff], [0x33, 0x99, 0x99, 0xff],
    [0x33, 0x99, 0x66, 0xff], [0x33, 0x99, 0x33, 0xff], [0x33, 0x99, 0x00, 0xff], [0x33, 0x66, 0xff, 0xff],
    [0x33, 0x66, 0xcc, 0xff], [0x33, 0x66, 0x99, 0xff], [0x33, 0x66, 0x66, 0xff], [0x33, 0x66, 0x33, 0xff],
    [0x33, 0x66, 0x00, 0xff], [0x33, 0x33, 0xff, 0xff], [0x33, 0x33, 0xcc, 0xff], [0x33, 0x33, 0x99, 0xff],
    [0x33, 0x33, 0x66, 0xff], [0x33, 0x33, 0x33, 0xff], [0x33, 0x33, 0x00, 0xff], [0x33, 0x00, 0xff, 0xff],
    [0x33, 0x00, 0xcc, 0xff], [0x33, 0x00, 0x99, 0xff], [0x33, 0x00, 0x66, 0xff], [0x33, 0x00, 0x33, 0xff],
    [0x33, 0x00, 0x00, 0xff], [0x00, 0xff, 0xff, 0xff], [0x00, 0xff, 0xcc, 0xff], [0x00, 0xff, 0x99, 0xff],
    [0x00, 0xff, 0x66, 0xff], [0x00, 0xff, 0x33, 0xff], [0x00, 0xff, 0x00, 0xff], [0x00, 0xcc, 0xff, 0xff],
    [0x00, 0xcc, 0xcc, 0xff], [0x00, 0xcc, 0x99, 0xff], [0x00, 0xcc, 0x66, 0xff], [0x00, 0xcc, 0x33, 0xff],
    [0x00, 0xcc, 0x00, 0xff], [0x00, 0x99, 0xff, 0xff], [0x00, 0x99, 0xcc, 0xff], [0x00, 0x99, 0x99, 0xff],
    [0x00, 0x99, 0x66, 0xff], [0x00, 0x99, 0x33, 0xff], [0x00, 0x99, 0x00, 0xff], [0x00, 0x66, 0xff, 0xff],
    [0x00, 0x66, 0xcc, 0xff], [0x00, 0x66, 0x99, 0xff], [0x00, 0x66, 0x66, 0xff], [0x00, 0x66, 0x33, 0xff],
    [0x00, 0x66, 0x00, 0xff], [0x00, 0x33, 0xff, 0xff], [0x00, 0x33, 0xcc, 0xff], [0x00, 0x33, 0x99, 0xff],
    [0x00, 0x33, 0x66, 0xff], [0x00, 0x33, 0x33, 0xff], [0x00, 0x33, 0x00, 0xff], [0x00, 0x00, 0xff, 0xff],
    [0x00, 0x00, 0xcc, 0xff], [0x00, 0x00, 0x99, 0xff], [0x00, 0x00, 0x66, 0xff], [0x00, 0x00, 0x33, 0xff],
    [0xee, 0x00, 0x00, 0xff], [0xdd, 0x00, 0x00, 0xff], [0xbb, 0x00, 0x00, 0xff], [0xaa, 0x00, 0x00, 0xff],
    [0x88, 0x00, 0x00, 0xff], [0x77, 0x00, 0x00, 0xff], [0x55, 0x00, 0x00, 0xff], [0x44, 0x00, 0x00, 0xff],
    [0x22, 0x00, 0x00, 0xff], [0x11, 0x00, 0x00, 0xff], [0x00, 0xee, 0x00, 0xff], [0x00, 0xdd, 0x00, 0xff],
    [0x00, 0xbb, 0x00, 0xff], [0x00, 0xaa, 0x00, 0xff], [0x00, 0x88, 0x00, 0xff], [0x00, 0x77, 0x00, 0xff],
    [0x00, 0x55, 0x00, 0xff], [0x00, 0x44, 0x00, 0xff], [0x00, 0x22, 0x00, 0xff], [0x00, 0x11, 0x00, 0xff],
    [0x00, 0x00, 0xee, 0xff], [0x00, 0x00, 0xdd, 0xff], [0x00, 0x00, 0xbb, 0xff], [0x00, 0x00, 0xaa, 0xff],
    [0x00, 0x00, 0x88, 0xff], [0x00, 0x00, 0x77, 0xff], [0x00, 0x00, 0x55, 0xff], [0x00, 0x00, 0x44, 0xff],
    [0x00, 0x00, 0x22, 0xff], [0x00, 0x00, 0x11, 0xff], [0xee, 0xee, 0xee, 0xff], [0xdd, 0xdd, 0xdd, 0xff],
    [0xbb, 0xbb, 0xbb, 0xff], [0xaa, 0xaa, 0xaa, 0xff], [0x88, 0x88, 0x88, 0xff], [0x77, 0x77, 0x77, 0xff],
    [0x55, 0x55, 0x55, 0xff], [0x44, 0x44, 0x44, 0xff], [0x22, 0x22, 0x22, 0xff], [0x11, 0x11, 0x11, 0xff],
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_zero_is_transparent_black() {
        assert_eq!(DEFAULT_PALETTE[0], [0, 0, 0, 0]);
    }

    #[test]
    fn default_palette_has_256_entries() {
        assert_eq!(DEFAULT_PALETTE.len(), 256);
    }

    #[test]
    fn default_impl_matches_table() {
        assert_eq!(Palette::default().0, DEFAULT_PALETTE);
    }
}
