//! Owned GL buffer and vertex array handles.
//!
//! Each handle deletes its GL object on drop, so it must not outlive the
//! context that created it.

use super::glutils::*;
use gl::*;

#[derive(Debug)]
pub struct VertexBuffer {
    id: u32,
}

impl VertexBuffer {
    /// Generates a buffer, binds it to `ARRAY_BUFFER` and uploads `data`
    /// with `STATIC_DRAW`. The buffer is left bound.
    pub fn new_static<T: Sized>(data: &[T]) -> VertexBuffer {
        let mut id = 0;
        unsafe { gl::GenBuffers(1, &mut id) };
        let buffer = VertexBuffer { id };
        buffer.bind();
        gl_buffer_data_arr_stat(data);
        log::debug!(
            "vertex buffer {} filled with {} bytes",
            id,
            std::mem::size_of_val(data)
        );
        buffer
    }

    pub fn bind(&self) {
        unsafe { gl::BindBuffer(ARRAY_BUFFER, self.id) };
    }

    pub fn unbind(&self) {
        unsafe { gl::BindBuffer(ARRAY_BUFFER, 0) };
    }
}

impl Drop for VertexBuffer {
    fn drop(&mut self) {
        unsafe { gl::DeleteBuffers(1, &self.id) };
    }
}

#[derive(Debug)]
pub struct VertexArray {
    id: u32,
}

impl VertexArray {
    pub fn new() -> VertexArray {
        let mut id = 0;
        unsafe { gl::GenVertexArrays(1, &mut id) };
        VertexArray { id }
    }

    /// While bound, attribute pointers and the `ARRAY_BUFFER` binding used
    /// by them are recorded into this array.
    pub fn bind(&self) {
        unsafe { gl::BindVertexArray(self.id) };
    }

    pub fn unbind(&self) {
        unsafe { gl::BindVertexArray(0) };
    }
}

impl Default for VertexArray {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for VertexArray {
    fn drop(&mut self) {
        unsafe { gl::DeleteVertexArrays(1, &self.id) };
    }
}

/// Float vertex attribute layout, counted in floats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexAttrib {
    pub location: u32,
    pub components: u32,
    pub stride: u32,
    pub offset: usize,
}

impl VertexAttrib {
    /// A vec3 in a buffer holding nothing else.
    pub fn vec3_packed(location: u32) -> VertexAttrib {
        VertexAttrib {
            location,
            components: 3,
            stride: 3,
            offset: 0,
        }
    }

    pub fn stride_bytes(&self) -> usize {
        self.stride as usize * std::mem::size_of::<f32>()
    }

    pub fn enable(&self) {
        gl_vertex_attrib_ptr_enab(self.location, self.components, self.stride, self.offset);
    }
}

/// Number of whole vertices in `bytes` of buffer data laid out as
/// `attribs`. Zero when the layout has no stride.
pub fn vertex_count(bytes: usize, attribs: &[VertexAttrib]) -> i32 {
    let stride = attribs.iter().map(VertexAttrib::stride_bytes).max().unwrap_or(0);
    if stride == 0 {
        return 0;
    }
    (bytes / stride) as i32
}

/// A vertex buffer plus the vertex array describing it, drawn as
/// `TRIANGLES`.
#[derive(Debug)]
pub struct TriangleMesh {
    // vao is declared first so it is deleted before the buffer it references
    vao: VertexArray,
    _vbo: VertexBuffer,
    vertex_count: i32,
}

impl TriangleMesh {
    /// `vertices` may be a slice of vertex structs or a flat float array;
    /// the draw count comes from its byte size and the attribute stride.
    pub fn new<T: Sized>(vertices: &[T], attribs: &[VertexAttrib]) -> TriangleMesh {
        let count = vertex_count(std::mem::size_of_val(vertices), attribs);
        if count == 0 {
            log::warn!("triangle mesh without vertices or attribute layout");
        }

        let vao = VertexArray::new();
        vao.bind();

        let vbo = VertexBuffer::new_static(vertices);
        for attrib in attribs {
            attrib.enable();
        }

        // the attribute pointers already captured the buffer
        vbo.unbind();
        vao.unbind();

        TriangleMesh {
            vao,
            _vbo: vbo,
            vertex_count: count,
        }
    }

    pub fn draw(&self) {
        self.vao.bind();
        unsafe { gl::DrawArrays(TRIANGLES, 0, self.vertex_count) };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec3;

    #[test]
    fn packed_vec3_matches_vertex_layout() {
        let attrib = VertexAttrib::vec3_packed(0);
        assert_eq!(attrib.components, Vec3::COMPONENTS);
        assert_eq!(attrib.stride_bytes(), std::mem::size_of::<Vec3>());
        assert_eq!(attrib.offset, 0);
    }

    #[test]
    fn flat_float_array_counts_vertices_not_floats() {
        let flat = [
            -0.5f32, -0.5, 0.0, //
            0.5, -0.5, 0.0, //
            0.0, 0.5, 0.0,
        ];
        let attribs = [VertexAttrib::vec3_packed(0)];
        assert_eq!(vertex_count(std::mem::size_of_val(&flat), &attribs), 3);
    }

    #[test]
    fn vec3_slice_counts_one_per_element() {
        let verts = [Vec3::default(); 6];
        let attribs = [VertexAttrib::vec3_packed(0)];
        assert_eq!(vertex_count(std::mem::size_of_val(&verts), &attribs), 6);
    }

    #[test]
    fn interleaved_layout_uses_full_stride() {
        // position + color, 6 floats per vertex
        let attribs = [
            VertexAttrib { location: 0, components: 3, stride: 6, offset: 0 },
            VertexAttrib { location: 1, components: 3, stride: 6, offset: 3 },
        ];
        assert_eq!(vertex_count(18 * std::mem::size_of::<f32>(), &attribs), 3);
    }

    #[test]
    fn no_layout_draws_nothing() {
        assert_eq!(vertex_count(36, &[]), 0);
    }
}
