mod common;

use carol_native::{
    BufferStorageFlags, ComponentType, ResourceError, VertexAttribute, bind_attribute,
    create_buffer, create_buffer_from, create_vertex_array, geometry, read_buffer,
    uniform_buffer, vertex_buffer,
};
use common::{Call, RecordingDriver};
use pretty_assertions::assert_eq;

#[test]
fn buffer_without_data_is_zero_filled() {
    let gl = RecordingDriver::new();
    let buffer = create_buffer(&gl, 64, None, BufferStorageFlags::empty()).unwrap();

    let mut out = [0xAAu8; 64];
    read_buffer(&gl, buffer, 0, &mut out);
    assert_eq!(out, [0u8; 64]);
}

#[test]
fn buffer_keeps_initial_data_and_flags() {
    let gl = RecordingDriver::new();
    let data = [1u8, 2, 3, 4, 5, 6, 7, 8];
    let flags = BufferStorageFlags::MAP_READ | BufferStorageFlags::DYNAMIC_STORAGE;
    let buffer = create_buffer(&gl, data.len(), Some(&data[..]), flags).unwrap();

    assert_eq!(
        gl.calls(),
        vec![Call::CreateBuffer {
            size: 8,
            flags: glow::MAP_READ_BIT | glow::DYNAMIC_STORAGE_BIT
        }]
    );
    let mut tail = [0u8; 3];
    read_buffer(&gl, buffer, 5, &mut tail);
    assert_eq!(tail, [6, 7, 8]);
}

#[test]
fn data_of_the_wrong_size_is_rejected() {
    let gl = RecordingDriver::new();
    assert_eq!(
        create_buffer(&gl, 64, Some(&[0u8; 12][..]), BufferStorageFlags::empty()),
        Err(ResourceError::DataSizeMismatch {
            expected: 64,
            actual: 12
        })
    );
    assert!(gl.calls().is_empty());
}

#[test]
fn oversized_buffer_is_rejected_before_allocation() {
    let gl = RecordingDriver::new();
    let size = i32::MAX as usize + 1;
    assert_eq!(
        create_buffer(&gl, size, None, BufferStorageFlags::empty()),
        Err(ResourceError::BufferTooLarge(size))
    );
    assert!(gl.calls().is_empty());
}

#[test]
fn typed_buffer_is_copied_as_bytes() {
    let gl = RecordingDriver::new();
    let vertices: [[f32; 2]; 3] = [[0.0, 0.65], [-0.65, -0.475], [0.65, -0.475]];
    let buffer = create_buffer_from(&gl, &vertices, BufferStorageFlags::empty()).unwrap();

    let bytes = gl.buffer_contents(buffer).unwrap();
    assert_eq!(bytes.len(), 24);
    assert_eq!(&bytes[4..8], &0.65f32.to_ne_bytes());
}

#[test]
fn refused_allocations_are_errors() {
    let gl = RecordingDriver::new();
    gl.refuse_allocations.set(true);
    assert_eq!(
        create_vertex_array(&gl),
        Err(ResourceError::CreateVertexArray)
    );
    assert_eq!(
        create_buffer(&gl, 16, None, BufferStorageFlags::empty()),
        Err(ResourceError::CreateBuffer(16))
    );
}

#[test]
fn attribute_is_formatted_bound_and_enabled() {
    let gl = RecordingDriver::new();
    let vao = create_vertex_array(&gl).unwrap();
    gl.take_calls();

    bind_attribute(
        &gl,
        vao,
        &VertexAttribute {
            index: 1,
            binding: 0,
            count: 3,
            component: ComponentType::Float,
            normalized: false,
            offset: 8,
        },
    );

    assert_eq!(
        gl.calls(),
        vec![
            Call::VertexAttribFormat {
                vao: vao.raw(),
                index: 1,
                size: 3,
                data_type: glow::FLOAT,
                normalized: false,
                offset: 8
            },
            Call::VertexAttribBinding {
                vao: vao.raw(),
                index: 1,
                binding: 0
            },
            Call::EnableVertexAttrib {
                vao: vao.raw(),
                index: 1
            },
        ]
    );
}

#[test]
fn buffers_attach_to_binding_slots() {
    let gl = RecordingDriver::new();
    let vao = create_vertex_array(&gl).unwrap();
    let vbo = create_buffer(&gl, 20 * 3, None, BufferStorageFlags::empty()).unwrap();
    let ubo = create_buffer(&gl, 64, None, BufferStorageFlags::DYNAMIC_STORAGE).unwrap();
    gl.take_calls();

    vertex_buffer(&gl, vao, 0, vbo, 0, 20);
    uniform_buffer(&gl, 2, ubo);
    geometry::delete_buffer(&gl, vbo);

    assert_eq!(
        gl.calls(),
        vec![
            Call::VertexBuffer {
                vao: vao.raw(),
                binding: 0,
                buffer: vbo.raw(),
                offset: 0,
                stride: 20
            },
            Call::BindUniformBuffer(2, ubo.raw()),
            Call::DeleteBuffer(vbo.raw()),
        ]
    );
    assert!(!gl.is_live_buffer(vbo));
    assert!(gl.is_live_buffer(ubo));
}
