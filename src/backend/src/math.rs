use std::mem;
use std::ops::Index;

/// Vertex position as uploaded to the GPU: three tightly packed floats.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const COMPONENTS: u32 = 3;

    pub const fn new(x: f32, y: f32, z: f32) -> Vec3 {
        Vec3 { x, y, z }
    }

    #[inline(always)]
    pub fn as_array(&self) -> &[f32; 3] {
        let ary: &[f32; 3] = unsafe { mem::transmute(self) };
        ary
    }
}

impl Index<usize> for Vec3 {
    type Output = f32;
    #[inline(always)]
    fn index(&self, i: usize) -> &f32 {
        self.as_array().index(i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_is_tightly_packed() {
        assert_eq!(mem::size_of::<Vec3>(), 3 * mem::size_of::<f32>());
        assert_eq!(mem::size_of::<[Vec3; 3]>(), 36);
    }

    #[test]
    fn indexing_follows_field_order() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!((v[0], v[1], v[2]), (1.0, 2.0, 3.0));
    }

    #[test]
    fn default_is_origin() {
        assert_eq!(Vec3::default().as_array(), &[0.0, 0.0, 0.0]);
    }
}
