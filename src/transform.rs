//! Signed axis-permutation + translation algebra used to place model-local
//! voxel coordinates into the scene's world coordinate system.

/// A signed permutation of the three axes plus an integer translation.
///
/// `cols[i]` names which source axis feeds output row `i`, and `signs[i]`
/// is that row's sign. This is exactly the rotation encoding MagicaVoxel
/// stores in `nTRN` frame dictionaries under the `"_r"` key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transform {
    pub cols: [u8; 3],
    pub signs: [i8; 3],
    pub translation: [i32; 3],
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        cols: [0, 1, 2],
        signs: [1, 1, 1],
        translation: [0, 0, 0],
    };

    /// Apply this transform to a model-local coordinate, producing a world
    /// (or parent-relative) coordinate.
    pub fn apply(&self, v: [i32; 3]) -> [i32; 3] {
        let mut out = [0i32; 3];
        for i in 0..3 {
            out[i] = v[self.cols[i] as usize] * i32::from(self.signs[i]) + self.translation[i];
        }
        out
    }

    /// Compose `self` (applied first, e.g. a parent) with `next` (applied
    /// to the result, e.g. a child's own frame transform), such that
    /// `self.compose(next).apply(v) == next.apply(self.apply(v))`.
    pub fn compose(&self, next: &Transform) -> Transform {
        let mut cols = [0u8; 3];
        let mut signs = [0i8; 3];
        let mut translation = [0i32; 3];
        for i in 0..3 {
            let a_col = self.cols[i] as usize;
            cols[i] = next.cols[a_col];
            signs[i] = self.signs[i] * next.signs[a_col];
            translation[i] =
                self.translation[i] + next.translation[a_col] * i32::from(self.signs[i]);
        }
        Transform {
            cols,
            signs,
            translation,
        }
    }

    /// Derive the transform that centers a model of the given size under
    /// this (parent) transform, so model-local voxel coordinates land
    /// correctly in the parent's coordinate system.
    pub fn model_transform(&self, size: [u32; 3]) -> Transform {
        let mut result = *self;
        for i in 0..3 {
            let source_extent = size[self.cols[i] as usize];
            result.translation[i] -= (source_extent / 2) as i32 * i32::from(self.signs[i]);
            if self.signs[i] < 0 {
                result.translation[i] -= 1;
            }
        }
        result
    }
}
