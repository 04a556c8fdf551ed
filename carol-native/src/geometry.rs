//! Vertex arrays and immutable buffers

use bitflags::bitflags;
use bytemuck::Pod;

use crate::driver::GlDriver;
use crate::error::{ResourceError, ResourceResult};
use crate::handles::{BufferHandle, VertexArrayHandle};

bitflags! {
    /// Usage flags of immutable buffer storage
    ///
    /// The empty set is static storage: the content is fixed at creation.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct BufferStorageFlags: u32 {
        const MAP_READ = glow::MAP_READ_BIT;
        const MAP_WRITE = glow::MAP_WRITE_BIT;
        const MAP_PERSISTENT = glow::MAP_PERSISTENT_BIT;
        const MAP_COHERENT = glow::MAP_COHERENT_BIT;
        const DYNAMIC_STORAGE = glow::DYNAMIC_STORAGE_BIT;
        const CLIENT_STORAGE = glow::CLIENT_STORAGE_BIT;
    }
}

/// Component type of a vertex attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentType {
    Byte,
    UnsignedByte,
    Short,
    UnsignedShort,
    Int,
    UnsignedInt,
    HalfFloat,
    Float,
}

impl ComponentType {
    pub const fn to_gl(self) -> u32 {
        match self {
            ComponentType::Byte => glow::BYTE,
            ComponentType::UnsignedByte => glow::UNSIGNED_BYTE,
            ComponentType::Short => glow::SHORT,
            ComponentType::UnsignedShort => glow::UNSIGNED_SHORT,
            ComponentType::Int => glow::INT,
            ComponentType::UnsignedInt => glow::UNSIGNED_INT,
            ComponentType::HalfFloat => glow::HALF_FLOAT,
            ComponentType::Float => glow::FLOAT,
        }
    }

    pub fn from_gl(value: u32) -> Option<Self> {
        Some(match value {
            glow::BYTE => ComponentType::Byte,
            glow::UNSIGNED_BYTE => ComponentType::UnsignedByte,
            glow::SHORT => ComponentType::Short,
            glow::UNSIGNED_SHORT => ComponentType::UnsignedShort,
            glow::INT => ComponentType::Int,
            glow::UNSIGNED_INT => ComponentType::UnsignedInt,
            glow::HALF_FLOAT => ComponentType::HalfFloat,
            glow::FLOAT => ComponentType::Float,
            _ => return None,
        })
    }

    /// Size of one component in bytes
    pub const fn size(self) -> usize {
        match self {
            ComponentType::Byte | ComponentType::UnsignedByte => 1,
            ComponentType::Short | ComponentType::UnsignedShort | ComponentType::HalfFloat => 2,
            ComponentType::Int | ComponentType::UnsignedInt | ComponentType::Float => 4,
        }
    }
}

/// Layout of one vertex attribute within a binding slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexAttribute {
    /// Shader attribute location
    pub index: u32,
    /// Binding slot the attribute reads from
    pub binding: u32,
    /// Number of components, 1 to 4
    pub count: i32,
    pub component: ComponentType,
    /// Map integer components to `[0, 1]` / `[-1, 1]`
    pub normalized: bool,
    /// Byte offset within one vertex
    pub offset: u32,
}

pub fn create_vertex_array<D: GlDriver + ?Sized>(gl: &D) -> ResourceResult<VertexArrayHandle> {
    gl.create_vertex_array()
        .ok_or(ResourceError::CreateVertexArray)
}

/// Declare the format of an attribute, tie it to its binding slot and enable
/// it
pub fn bind_attribute<D: GlDriver + ?Sized>(
    gl: &D,
    vao: VertexArrayHandle,
    attribute: &VertexAttribute,
) {
    gl.vertex_attrib_format(
        vao,
        attribute.index,
        attribute.count,
        attribute.component.to_gl(),
        attribute.normalized,
        attribute.offset,
    );
    gl.vertex_attrib_binding(vao, attribute.index, attribute.binding);
    gl.enable_vertex_attrib(vao, attribute.index);
}

/// Allocate `size` bytes of immutable storage
///
/// Without `data` the storage is zero-filled. With `data`, its length must be
/// exactly `size`. Sizes above `i32::MAX` are rejected before anything is
/// allocated.
pub fn create_buffer<D: GlDriver + ?Sized>(
    gl: &D,
    size: usize,
    data: Option<&[u8]>,
    flags: BufferStorageFlags,
) -> ResourceResult<BufferHandle> {
    if i32::try_from(size).is_err() {
        return Err(ResourceError::BufferTooLarge(size));
    }
    let zeroes;
    let data = match data {
        Some(data) if data.len() != size => {
            return Err(ResourceError::DataSizeMismatch {
                expected: size,
                actual: data.len(),
            });
        }
        Some(data) => data,
        None => {
            zeroes = vec![0u8; size];
            &zeroes[..]
        }
    };
    gl.create_buffer(data, flags.bits())
        .ok_or(ResourceError::CreateBuffer(size))
}

/// Allocate immutable storage holding a copy of `data`
pub fn create_buffer_from<T: Pod, D: GlDriver + ?Sized>(
    gl: &D,
    data: &[T],
    flags: BufferStorageFlags,
) -> ResourceResult<BufferHandle> {
    let bytes: &[u8] = bytemuck::cast_slice(data);
    create_buffer(gl, bytes.len(), Some(bytes), flags)
}

/// Attach `buffer` to a binding slot of `vao`
pub fn vertex_buffer<D: GlDriver + ?Sized>(
    gl: &D,
    vao: VertexArrayHandle,
    binding: u32,
    buffer: BufferHandle,
    offset: i32,
    stride: i32,
) {
    gl.vertex_buffer(vao, binding, buffer, offset, stride);
}

/// Bind `buffer` to an indexed uniform block slot
pub fn uniform_buffer<D: GlDriver + ?Sized>(gl: &D, binding: u32, buffer: BufferHandle) {
    gl.bind_uniform_buffer(binding, buffer);
}

/// Copy `out.len()` bytes of `buffer`, starting at `offset`, into `out`
pub fn read_buffer<D: GlDriver + ?Sized>(
    gl: &D,
    buffer: BufferHandle,
    offset: usize,
    out: &mut [u8],
) {
    gl.read_buffer(buffer, offset, out);
}

pub fn delete_buffer<D: GlDriver + ?Sized>(gl: &D, buffer: BufferHandle) {
    gl.delete_buffer(buffer);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_match_driver_bits() {
        assert_eq!(BufferStorageFlags::empty().bits(), 0);
        assert_eq!(
            (BufferStorageFlags::MAP_READ | BufferStorageFlags::DYNAMIC_STORAGE).bits(),
            glow::MAP_READ_BIT | glow::DYNAMIC_STORAGE_BIT
        );
    }

    #[test]
    fn component_sizes() {
        assert_eq!(ComponentType::Float.size(), 4);
        assert_eq!(ComponentType::HalfFloat.size(), 2);
        assert_eq!(
            ComponentType::from_gl(glow::UNSIGNED_BYTE),
            Some(ComponentType::UnsignedByte)
        );
        assert_eq!(ComponentType::from_gl(glow::DOUBLE), None);
    }
}
