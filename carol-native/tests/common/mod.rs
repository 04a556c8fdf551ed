#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};

use carol_native::{
    BufferHandle, DebugSink, EVENT_CAPACITY, EventRecord, EventSource, GlDriver,
    ProgramHandle, ShaderHandle, VertexArrayHandle, debug,
};

/// One driver call, as seen by [`RecordingDriver`]
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    ClearColor([f32; 4]),
    ClearDepth(f64),
    Enable(u32),
    DepthFunc(u32),
    CullFace(u32),
    BlendFunc(u32, u32),
    InstallDebugCallback,
    CreateShader(u32),
    ShaderSource(u32),
    CompileShader(u32),
    DeleteShader(u32),
    CreateProgram,
    AttachShader(u32, u32),
    LinkProgram(u32),
    DeleteProgram(u32),
    UseProgram(u32),
    CreateVertexArray,
    DeleteVertexArray(u32),
    BindVertexArray(u32),
    VertexAttribFormat {
        vao: u32,
        index: u32,
        size: i32,
        data_type: u32,
        normalized: bool,
        offset: u32,
    },
    VertexAttribBinding {
        vao: u32,
        index: u32,
        binding: u32,
    },
    EnableVertexAttrib {
        vao: u32,
        index: u32,
    },
    VertexBuffer {
        vao: u32,
        binding: u32,
        buffer: u32,
        offset: i32,
        stride: i32,
    },
    CreateBuffer {
        size: usize,
        flags: u32,
    },
    BindUniformBuffer(u32, u32),
    DeleteBuffer(u32),
    Clear(u32),
    DrawArrays(u32, i32, i32),
}

/// In-memory stand-in for a GL context
///
/// Compilation fails for sources containing a `#error` directive, with a log
/// that quotes the directive. Linking fails when any attached stage failed.
#[derive(Default)]
pub struct RecordingDriver {
    calls: RefCell<Vec<Call>>,
    next_name: Cell<u32>,
    sources: RefCell<HashMap<u32, String>>,
    compile_logs: RefCell<HashMap<u32, Option<String>>>,
    attachments: RefCell<HashMap<u32, Vec<u32>>>,
    link_logs: RefCell<HashMap<u32, Option<String>>>,
    buffers: RefCell<HashMap<u32, Vec<u8>>>,
    pending_errors: RefCell<VecDeque<u32>>,
    pub refuse_allocations: Cell<bool>,
    pub debug_sink: Option<DebugSink>,
}

impl RecordingDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn take_calls(&self) -> Vec<Call> {
        std::mem::take(&mut *self.calls.borrow_mut())
    }

    pub fn buffer_contents(&self, buffer: BufferHandle) -> Option<Vec<u8>> {
        self.buffers.borrow().get(&buffer.raw()).cloned()
    }

    pub fn is_live_buffer(&self, buffer: BufferHandle) -> bool {
        self.buffers.borrow().contains_key(&buffer.raw())
    }

    pub fn push_error(&self, code: u32) {
        self.pending_errors.borrow_mut().push_back(code);
    }

    /// Deliver a message the way the driver's debug callback would
    pub fn emit_debug(&self, source: u32, kind: u32, id: u32, severity: u32, text: &str) {
        if let Some(sink) = &self.debug_sink {
            debug::forward(sink, source, kind, id, severity, text);
        }
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    fn allocate(&self) -> Option<u32> {
        if self.refuse_allocations.get() {
            return None;
        }
        let name = self.next_name.get() + 1;
        self.next_name.set(name);
        Some(name)
    }
}

fn fake_compile(source: &str) -> Option<String> {
    source.lines().enumerate().find_map(|(n, line)| {
        let message = line.trim().strip_prefix("#error")?;
        Some(format!("ERROR: 0:{}: '#error' :{}\n", n + 1, message))
    })
}

impl GlDriver for RecordingDriver {
    fn clear_color(&self, rgba: [f32; 4]) {
        self.record(Call::ClearColor(rgba));
    }

    fn clear_depth(&self, depth: f64) {
        self.record(Call::ClearDepth(depth));
    }

    fn enable(&self, capability: u32) {
        self.record(Call::Enable(capability));
    }

    fn depth_func(&self, func: u32) {
        self.record(Call::DepthFunc(func));
    }

    fn cull_face(&self, mode: u32) {
        self.record(Call::CullFace(mode));
    }

    fn blend_func(&self, src: u32, dst: u32) {
        self.record(Call::BlendFunc(src, dst));
    }

    fn install_debug_callback(&mut self, sink: DebugSink) {
        self.record(Call::InstallDebugCallback);
        self.debug_sink = Some(sink);
    }

    fn create_shader(&self, stage: u32) -> Option<ShaderHandle> {
        self.record(Call::CreateShader(stage));
        ShaderHandle::from_raw(self.allocate()?)
    }

    fn shader_source(&self, shader: ShaderHandle, source: &str) {
        self.record(Call::ShaderSource(shader.raw()));
        self.sources
            .borrow_mut()
            .insert(shader.raw(), source.to_owned());
    }

    fn compile_shader(&self, shader: ShaderHandle) {
        self.record(Call::CompileShader(shader.raw()));
        let log = self
            .sources
            .borrow()
            .get(&shader.raw())
            .and_then(|s| fake_compile(s));
        self.compile_logs.borrow_mut().insert(shader.raw(), log);
    }

    fn shader_compile_status(&self, shader: ShaderHandle) -> bool {
        matches!(self.compile_logs.borrow().get(&shader.raw()), Some(None))
    }

    fn shader_info_log(&self, shader: ShaderHandle) -> String {
        self.compile_logs
            .borrow()
            .get(&shader.raw())
            .cloned()
            .flatten()
            .unwrap_or_default()
    }

    fn delete_shader(&self, shader: ShaderHandle) {
        self.record(Call::DeleteShader(shader.raw()));
        self.sources.borrow_mut().remove(&shader.raw());
    }

    fn create_program(&self) -> Option<ProgramHandle> {
        self.record(Call::CreateProgram);
        ProgramHandle::from_raw(self.allocate()?)
    }

    fn attach_shader(&self, program: ProgramHandle, shader: ShaderHandle) {
        self.record(Call::AttachShader(program.raw(), shader.raw()));
        self.attachments
            .borrow_mut()
            .entry(program.raw())
            .or_default()
            .push(shader.raw());
    }

    fn link_program(&self, program: ProgramHandle) {
        self.record(Call::LinkProgram(program.raw()));
        let compiled = self.compile_logs.borrow();
        let all_compiled = self
            .attachments
            .borrow()
            .get(&program.raw())
            .is_some_and(|stages| {
                stages
                    .iter()
                    .all(|s| matches!(compiled.get(s), Some(None)))
            });
        let log = (!all_compiled)
            .then(|| "ERROR: One or more attached shaders not successfully compiled\n".to_string());
        self.link_logs.borrow_mut().insert(program.raw(), log);
    }

    fn program_link_status(&self, program: ProgramHandle) -> bool {
        matches!(self.link_logs.borrow().get(&program.raw()), Some(None))
    }

    fn program_info_log(&self, program: ProgramHandle) -> String {
        self.link_logs
            .borrow()
            .get(&program.raw())
            .cloned()
            .flatten()
            .unwrap_or_default()
    }

    fn delete_program(&self, program: ProgramHandle) {
        self.record(Call::DeleteProgram(program.raw()));
    }

    fn use_program(&self, program: Option<ProgramHandle>) {
        self.record(Call::UseProgram(program.map_or(0, |p| p.raw())));
    }

    fn create_vertex_array(&self) -> Option<VertexArrayHandle> {
        self.record(Call::CreateVertexArray);
        VertexArrayHandle::from_raw(self.allocate()?)
    }

    fn delete_vertex_array(&self, vao: VertexArrayHandle) {
        self.record(Call::DeleteVertexArray(vao.raw()));
    }

    fn bind_vertex_array(&self, vao: Option<VertexArrayHandle>) {
        self.record(Call::BindVertexArray(vao.map_or(0, |v| v.raw())));
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
        self.record(Call::VertexAttribFormat {
            vao: vao.raw(),
            index,
            size,
            data_type,
            normalized,
            offset: relative_offset,
        });
    }

    fn vertex_attrib_binding(&self, vao: VertexArrayHandle, index: u32, binding: u32) {
        self.record(Call::VertexAttribBinding {
            vao: vao.raw(),
            index,
            binding,
        });
    }

    fn enable_vertex_attrib(&self, vao: VertexArrayHandle, index: u32) {
        self.record(Call::EnableVertexAttrib {
            vao: vao.raw(),
            index,
        });
    }

    fn vertex_buffer(
        &self,
        vao: VertexArrayHandle,
        binding: u32,
        buffer: BufferHandle,
        offset: i32,
        stride: i32,
    ) {
        self.record(Call::VertexBuffer {
            vao: vao.raw(),
            binding,
            buffer: buffer.raw(),
            offset,
            stride,
        });
    }

    fn create_buffer(&self, data: &[u8], flags: u32) -> Option<BufferHandle> {
        self.record(Call::CreateBuffer {
            size: data.len(),
            flags,
        });
        let name = self.allocate()?;
        self.buffers.borrow_mut().insert(name, data.to_vec());
        BufferHandle::from_raw(name)
    }

    fn bind_uniform_buffer(&self, binding: u32, buffer: BufferHandle) {
        self.record(Call::BindUniformBuffer(binding, buffer.raw()));
    }

    fn read_buffer(&self, buffer: BufferHandle, offset: usize, out: &mut [u8]) {
        if let Some(data) = self.buffers.borrow().get(&buffer.raw()) {
            let end = (offset + out.len()).min(data.len());
            let start = offset.min(end);
            out[..end - start].copy_from_slice(&data[start..end]);
        }
    }

    fn delete_buffer(&self, buffer: BufferHandle) {
        self.record(Call::DeleteBuffer(buffer.raw()));
        self.buffers.borrow_mut().remove(&buffer.raw());
    }

    fn clear(&self, mask: u32) {
        self.record(Call::Clear(mask));
    }

    fn draw_arrays(&self, mode: u32, first: i32, count: i32) {
        self.record(Call::DrawArrays(mode, first, count));
    }

    fn get_error(&self) -> u32 {
        self.pending_errors
            .borrow_mut()
            .pop_front()
            .unwrap_or(glow::NO_ERROR)
    }
}

/// Event record used by [`ScriptedEvents`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FakeEvent(pub u32);

impl EventRecord for FakeEvent {
    fn empty() -> Self {
        FakeEvent(0)
    }
}

/// Event source replaying a scripted queue
#[derive(Default)]
pub struct ScriptedEvents {
    pub queue: VecDeque<FakeEvent>,
    pub pumps: usize,
    pub fail_next_peep: bool,
    pub keys: Vec<u8>,
    pub modifiers: u32,
    pub mouse: (u32, i32, i32),
}

impl ScriptedEvents {
    /// A queue holding events numbered `1..=count`
    pub fn with_events(count: u32) -> Self {
        Self {
            queue: (1..=count).map(FakeEvent).collect(),
            ..Self::default()
        }
    }
}

impl EventSource for ScriptedEvents {
    type Event = FakeEvent;

    fn pump(&mut self) {
        self.pumps += 1;
    }

    fn peep(&mut self, out: &mut [FakeEvent; EVENT_CAPACITY]) -> i32 {
        if std::mem::take(&mut self.fail_next_peep) {
            return -1;
        }
        let n = self.queue.len().min(EVENT_CAPACITY);
        for (slot, event) in out.iter_mut().zip(self.queue.drain(..n)) {
            *slot = event;
        }
        n as i32
    }

    fn keyboard_state(&self) -> &[u8] {
        &self.keys
    }

    fn modifiers(&self) -> u32 {
        self.modifiers
    }

    fn mouse_state(&self) -> (u32, i32, i32) {
        self.mouse
    }
}
