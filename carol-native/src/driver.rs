//! The narrow set of OpenGL calls this layer forwards to
//!
//! Every builder in this crate talks to the driver through [`GlDriver`]. The
//! production implementation is [`GlowDriver`], which forwards one-to-one to
//! `glow`. Object-scoped calls (vertex array attributes, buffer storage) are
//! issued through a temporary binding that is restored afterwards, so a
//! pipeline the host has bound for drawing stays bound.

use std::sync::{Arc, PoisonError, RwLock};

use glow::{Context, HasContext};

use crate::debug::{self, DebugSink};
use crate::handles::{BufferHandle, ProgramHandle, ShaderHandle, VertexArrayHandle};
use crate::versions::GlVersion;

/// OpenGL entry points used by the builders
///
/// Enumerations are passed as raw `u32` values (`glow::DEPTH_TEST`,
/// `glow::TRIANGLES`, ...). All methods must be called on the thread that
/// owns the context.
pub trait GlDriver {
    // Fixed-function state
    fn clear_color(&self, rgba: [f32; 4]);
    fn clear_depth(&self, depth: f64);
    fn enable(&self, capability: u32);
    fn depth_func(&self, func: u32);
    fn cull_face(&self, mode: u32);
    fn blend_func(&self, src: u32, dst: u32);

    /// Route driver debug output to `sink`, replacing any previous sink
    fn install_debug_callback(&mut self, sink: DebugSink);

    // Shader stages
    fn create_shader(&self, stage: u32) -> Option<ShaderHandle>;
    fn shader_source(&self, shader: ShaderHandle, source: &str);
    fn compile_shader(&self, shader: ShaderHandle);
    fn shader_compile_status(&self, shader: ShaderHandle) -> bool;
    fn shader_info_log(&self, shader: ShaderHandle) -> String;
    fn delete_shader(&self, shader: ShaderHandle);

    // Programs
    fn create_program(&self) -> Option<ProgramHandle>;
    fn attach_shader(&self, program: ProgramHandle, shader: ShaderHandle);
    fn link_program(&self, program: ProgramHandle);
    fn program_link_status(&self, program: ProgramHandle) -> bool;
    fn program_info_log(&self, program: ProgramHandle) -> String;
    fn delete_program(&self, program: ProgramHandle);
    fn use_program(&self, program: Option<ProgramHandle>);

    // Vertex arrays
    fn create_vertex_array(&self) -> Option<VertexArrayHandle>;
    fn delete_vertex_array(&self, vao: VertexArrayHandle);
    fn bind_vertex_array(&self, vao: Option<VertexArrayHandle>);
    fn vertex_attrib_format(
        &self,
        vao: VertexArrayHandle,
        index: u32,
        size: i32,
        data_type: u32,
        normalized: bool,
        relative_offset: u32,
    );
    fn vertex_attrib_binding(&self, vao: VertexArrayHandle, index: u32, binding: u32);
    fn enable_vertex_attrib(&self, vao: VertexArrayHandle, index: u32);
    fn vertex_buffer(
        &self,
        vao: VertexArrayHandle,
        binding: u32,
        buffer: BufferHandle,
        offset: i32,
        stride: i32,
    );

    // Buffers
    /// Allocate immutable storage holding exactly `data`
    fn create_buffer(&self, data: &[u8], flags: u32) -> Option<BufferHandle>;
    fn bind_uniform_buffer(&self, binding: u32, buffer: BufferHandle);
    fn read_buffer(&self, buffer: BufferHandle, offset: usize, out: &mut [u8]);
    fn delete_buffer(&self, buffer: BufferHandle);

    // Frame
    fn clear(&self, mask: u32);
    fn draw_arrays(&self, mode: u32, first: i32, count: i32);
    fn get_error(&self) -> u32;
}

/// [`GlDriver`] backed by a `glow` context
pub struct GlowDriver {
    gl: Context,
    version: GlVersion,
    /// Sink read by the driver callback; `None` until debug output is routed
    debug_sink: Option<Arc<RwLock<DebugSink>>>,
}

impl GlowDriver {
    /// Wrap an already loaded `glow` context
    pub fn new(gl: Context) -> Self {
        let version = GlVersion::read(&gl);
        Self {
            gl,
            version,
            debug_sink: None,
        }
    }

    /// The version reported by the driver when the context was loaded
    pub fn version(&self) -> GlVersion {
        self.version
    }

    /// The underlying `glow` context, for calls this layer does not wrap
    pub fn gl(&self) -> &Context {
        &self.gl
    }

    fn with_vertex_array<R>(&self, vao: VertexArrayHandle, f: impl FnOnce(&Context) -> R) -> R {
        unsafe {
            let previous = self.gl.get_parameter_i32(glow::VERTEX_ARRAY_BINDING) as u32;
            self.gl.bind_vertex_array(Some(native_vao(vao)));
            let result = f(&self.gl);
            self.gl
                .bind_vertex_array(VertexArrayHandle::from_raw(previous).map(native_vao));
            result
        }
    }
}

fn native_shader(h: ShaderHandle) -> glow::NativeShader {
    glow::NativeShader(h.non_zero())
}

fn native_program(h: ProgramHandle) -> glow::NativeProgram {
    glow::NativeProgram(h.non_zero())
}

fn native_vao(h: VertexArrayHandle) -> glow::NativeVertexArray {
    glow::NativeVertexArray(h.non_zero())
}

fn native_buffer(h: BufferHandle) -> glow::NativeBuffer {
    glow::NativeBuffer(h.non_zero())
}

impl GlDriver for GlowDriver {
    fn clear_color(&self, rgba: [f32; 4]) {
        unsafe { self.gl.clear_color(rgba[0], rgba[1], rgba[2], rgba[3]) }
    }

    fn clear_depth(&self, depth: f64) {
        unsafe { self.gl.clear_depth_f64(depth) }
    }

    fn enable(&self, capability: u32) {
        unsafe { self.gl.enable(capability) }
    }

    fn depth_func(&self, func: u32) {
        unsafe { self.gl.depth_func(func) }
    }

    fn cull_face(&self, mode: u32) {
        unsafe { self.gl.cull_face(mode) }
    }

    fn blend_func(&self, src: u32, dst: u32) {
        unsafe { self.gl.blend_func(src, dst) }
    }

    fn install_debug_callback(&mut self, sink: DebugSink) {
        // glow accepts a single callback per context, so later calls only
        // swap the sink it reads from.
        if let Some(slot) = &self.debug_sink {
            *slot.write().unwrap_or_else(PoisonError::into_inner) = sink;
            return;
        }
        let slot = Arc::new(RwLock::new(sink));
        let read_slot = Arc::clone(&slot);
        unsafe {
            self.gl
                .debug_message_callback(move |source, kind, id, severity, text: &str| {
                    // Cloned out of the lock: a sink may itself trigger a message.
                    let sink = Arc::clone(
                        &read_slot.read().unwrap_or_else(PoisonError::into_inner),
                    );
                    debug::forward(&sink, source, kind, id, severity, text);
                });
        }
        self.debug_sink = Some(slot);
    }

    fn create_shader(&self, stage: u32) -> Option<ShaderHandle> {
        let shader = unsafe { self.gl.create_shader(stage) }.ok()?;
        ShaderHandle::from_raw(shader.0.get())
    }

    fn shader_source(&self, shader: ShaderHandle, source: &str) {
        unsafe { self.gl.shader_source(native_shader(shader), source) }
    }

    fn compile_shader(&self, shader: ShaderHandle) {
        unsafe { self.gl.compile_shader(native_shader(shader)) }
    }

    fn shader_compile_status(&self, shader: ShaderHandle) -> bool {
        unsafe { self.gl.get_shader_compile_status(native_shader(shader)) }
    }

    fn shader_info_log(&self, shader: ShaderHandle) -> String {
        unsafe { self.gl.get_shader_info_log(native_shader(shader)) }
    }

    fn delete_shader(&self, shader: ShaderHandle) {
        unsafe { self.gl.delete_shader(native_shader(shader)) }
    }

    fn create_program(&self) -> Option<ProgramHandle> {
        let program = unsafe { self.gl.create_program() }.ok()?;
        ProgramHandle::from_raw(program.0.get())
    }

    fn attach_shader(&self, program: ProgramHandle, shader: ShaderHandle) {
        unsafe {
            self.gl
                .attach_shader(native_program(program), native_shader(shader))
        }
    }

    fn link_program(&self, program: ProgramHandle) {
        unsafe { self.gl.link_program(native_program(program)) }
    }

    fn program_link_status(&self, program: ProgramHandle) -> bool {
        unsafe { self.gl.get_program_link_status(native_program(program)) }
    }

    fn program_info_log(&self, program: ProgramHandle) -> String {
        unsafe { self.gl.get_program_info_log(native_program(program)) }
    }

    fn delete_program(&self, program: ProgramHandle) {
        unsafe { self.gl.delete_program(native_program(program)) }
    }

    fn use_program(&self, program: Option<ProgramHandle>) {
        unsafe { self.gl.use_program(program.map(native_program)) }
    }

    fn create_vertex_array(&self) -> Option<VertexArrayHandle> {
        let vao = unsafe { self.gl.create_vertex_array() }.ok()?;
        VertexArrayHandle::from_raw(vao.0.get())
    }

    fn delete_vertex_array(&self, vao: VertexArrayHandle) {
        unsafe { self.gl.delete_vertex_array(native_vao(vao)) }
    }

    fn bind_vertex_array(&self, vao: Option<VertexArrayHandle>) {
        unsafe { self.gl.bind_vertex_array(vao.map(native_vao)) }
    }

    fn vertex_attrib_format(
        &self,
        vao: VertexArrayHandle,
        index: u32,
        size: i32,
        data_type: u32,
        normalized: bool,
        relative_offset: u32,
    ) {
        self.with_vertex_array(vao, |gl| unsafe {
            gl.vertex_attrib_format_f32(index, size, data_type, normalized, relative_offset)
        })
    }

    fn vertex_attrib_binding(&self, vao: VertexArrayHandle, index: u32, binding: u32) {
        self.with_vertex_array(vao, |gl| unsafe { gl.vertex_attrib_binding(index, binding) })
    }

    fn enable_vertex_attrib(&self, vao: VertexArrayHandle, index: u32) {
        self.with_vertex_array(vao, |gl| unsafe { gl.enable_vertex_attrib_array(index) })
    }

    fn vertex_buffer(
        &self,
        vao: VertexArrayHandle,
        binding: u32,
        buffer: BufferHandle,
        offset: i32,
        stride: i32,
    ) {
        self.with_vertex_array(vao, |gl| unsafe {
            gl.bind_vertex_buffer(binding, Some(native_buffer(buffer)), offset, stride)
        })
    }

    fn create_buffer(&self, data: &[u8], flags: u32) -> Option<BufferHandle> {
        let size = i32::try_from(data.len()).ok()?;
        unsafe {
            let buffer = self.gl.create_buffer().ok()?;
            self.gl.bind_buffer(glow::COPY_WRITE_BUFFER, Some(buffer));
            self.gl
                .buffer_storage(glow::COPY_WRITE_BUFFER, size, Some(data), flags);
            self.gl.bind_buffer(glow::COPY_WRITE_BUFFER, None);
            BufferHandle::from_raw(buffer.0.get())
        }
    }

    fn bind_uniform_buffer(&self, binding: u32, buffer: BufferHandle) {
        unsafe {
            self.gl
                .bind_buffer_base(glow::UNIFORM_BUFFER, binding, Some(native_buffer(buffer)))
        }
    }

    fn read_buffer(&self, buffer: BufferHandle, offset: usize, out: &mut [u8]) {
        let Ok(offset) = i32::try_from(offset) else {
            tracing::error!(offset, "Buffer read offset out of range");
            return;
        };
        unsafe {
            self.gl
                .bind_buffer(glow::COPY_READ_BUFFER, Some(native_buffer(buffer)));
            self.gl
                .get_buffer_sub_data(glow::COPY_READ_BUFFER, offset, out);
            self.gl.bind_buffer(glow::COPY_READ_BUFFER, None);
        }
    }

    fn delete_buffer(&self, buffer: BufferHandle) {
        unsafe { self.gl.delete_buffer(native_buffer(buffer)) }
    }

    fn clear(&self, mask: u32) {
        unsafe { self.gl.clear(mask) }
    }

    fn draw_arrays(&self, mode: u32, first: i32, count: i32) {
        unsafe { self.gl.draw_arrays(mode, first, count) }
    }

    fn get_error(&self) -> u32 {
        unsafe { self.gl.get_error() }
    }
}
