use gl::types::*;
use std::mem;
use std::ptr;

/// One interleaved vertex attribute: shader location and `f32` component count.
#[derive(Debug, Clone, Copy)]
pub struct VertexAttrib {
    pub location: GLuint,
    pub components: GLint,
}

/// An indexed mesh uploaded once and drawn with `glDrawElements`.
///
/// Vertices are a flat interleaved `f32` array; `attribs` describes how the
/// interleaving splits into shader inputs. GL objects are deleted on drop.
pub struct Mesh {
    vao: GLuint,
    vbo: GLuint,
    ebo: GLuint,
    index_count: GLsizei,
}

impl Mesh {
    /// The GL context must be current on the calling thread.
    pub fn new(vertices: &[f32], indices: &[u32], attribs: &[VertexAttrib]) -> Self {
        let stride = stride_bytes(attribs);
        let offsets = attrib_offsets(attribs);

        let mut vao = 0;
        let mut vbo = 0;
        let mut ebo = 0;
        unsafe {
            gl::GenVertexArrays(1, &mut vao);
            gl::GenBuffers(1, &mut vbo);
            gl::GenBuffers(1, &mut ebo);

            gl::BindVertexArray(vao);

            gl::BindBuffer(gl::ARRAY_BUFFER, vbo);
            gl::BufferData(
                gl::ARRAY_BUFFER,
                (vertices.len() * mem::size_of::<f32>()) as isize,
                vertices.as_ptr() as *const _,
                gl::STATIC_DRAW,
            );

            // The element buffer stays bound; the VAO records it.
            gl::BindBuffer(gl::ELEMENT_ARRAY_BUFFER, ebo);
            gl::BufferData(
                gl::ELEMENT_ARRAY_BUFFER,
                (indices.len() * mem::size_of::<u32>()) as isize,
                indices.as_ptr() as *const _,
                gl::STATIC_DRAW,
            );

            for (attrib, offset) in attribs.iter().zip(offsets) {
                gl::VertexAttribPointer(
                    attrib.location,
                    attrib.components,
                    gl::FLOAT,
                    gl::FALSE,
                    stride,
                    offset as *const _,
                );
                gl::EnableVertexAttribArray(attrib.location);
            }

            gl::BindBuffer(gl::ARRAY_BUFFER, 0);
            gl::BindVertexArray(0);
        }

        Self {
            vao,
            vbo,
            ebo,
            index_count: indices.len() as GLsizei,
        }
    }

    pub fn draw(&self) {
        unsafe {
            gl::BindVertexArray(self.vao);
            gl::DrawElements(gl::TRIANGLES, self.index_count, gl::UNSIGNED_INT, ptr::null());
        }
    }
}

impl Drop for Mesh {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteVertexArrays(1, &self.vao);
            gl::DeleteBuffers(1, &self.vbo);
            gl::DeleteBuffers(1, &self.ebo);
        }
    }
}

fn stride_bytes(attribs: &[VertexAttrib]) -> GLsizei {
    attribs.iter().map(|attrib| attrib.components).sum::<GLint>()
        * mem::size_of::<f32>() as GLsizei
}

fn attrib_offsets(attribs: &[VertexAttrib]) -> Vec<usize> {
    let mut offsets = Vec::with_capacity(attribs.len());
    let mut offset = 0usize;
    for attrib in attribs {
        offsets.push(offset);
        offset += attrib.components as usize * mem::size_of::<f32>();
    }
    offsets
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stride_covers_all_components() {
        let attribs = [
            VertexAttrib { location: 0, components: 3 },
            VertexAttrib { location: 1, components: 3 },
        ];
        assert_eq!(stride_bytes(&attribs), 24);
    }

    #[test]
    fn offsets_accumulate_per_attribute() {
        let attribs = [
            VertexAttrib { location: 0, components: 3 },
            VertexAttrib { location: 1, components: 3 },
            VertexAttrib { location: 2, components: 2 },
        ];
        assert_eq!(attrib_offsets(&attribs), vec![0, 12, 24]);
    }

    #[test]
    fn empty_layout_is_zero_sized() {
        assert_eq!(stride_bytes(&[]), 0);
        assert!(attrib_offsets(&[]).is_empty());
    }
}
