//! Shader stages and program objects
//!
//! Building is two-phase: [`compile_shader`] and [`link_program`] only issue
//! the driver calls, and [`check_compile_error`] / [`check_link_error`] query
//! the outcome afterwards. A successful check returns `None` and allocates
//! nothing.

use crate::driver::GlDriver;
use crate::error::{ResourceError, ResourceResult};
use crate::handles::{ProgramHandle, ShaderHandle, VertexArrayHandle};

/// Programmable pipeline stage of a shader object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
    Geometry,
    TessControl,
    TessEvaluation,
    Compute,
}

impl ShaderStage {
    /// The driver's enum for this stage
    pub const fn to_gl(self) -> u32 {
        match self {
            ShaderStage::Vertex => glow::VERTEX_SHADER,
            ShaderStage::Fragment => glow::FRAGMENT_SHADER,
            ShaderStage::Geometry => glow::GEOMETRY_SHADER,
            ShaderStage::TessControl => glow::TESS_CONTROL_SHADER,
            ShaderStage::TessEvaluation => glow::TESS_EVALUATION_SHADER,
            ShaderStage::Compute => glow::COMPUTE_SHADER,
        }
    }

    pub fn from_gl(value: u32) -> Option<Self> {
        match value {
            glow::VERTEX_SHADER => Some(ShaderStage::Vertex),
            glow::FRAGMENT_SHADER => Some(ShaderStage::Fragment),
            glow::GEOMETRY_SHADER => Some(ShaderStage::Geometry),
            glow::TESS_CONTROL_SHADER => Some(ShaderStage::TessControl),
            glow::TESS_EVALUATION_SHADER => Some(ShaderStage::TessEvaluation),
            glow::COMPUTE_SHADER => Some(ShaderStage::Compute),
            _ => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            ShaderStage::Vertex => "vertex",
            ShaderStage::Fragment => "fragment",
            ShaderStage::Geometry => "geometry",
            ShaderStage::TessControl => "tessellation control",
            ShaderStage::TessEvaluation => "tessellation evaluation",
            ShaderStage::Compute => "compute",
        }
    }
}

/// Create a shader object, attach `source` and compile it
///
/// Fails only when the driver cannot create the object; compile errors are
/// reported by [`check_compile_error`].
pub fn compile_shader<D: GlDriver + ?Sized>(
    gl: &D,
    source: &str,
    stage: ShaderStage,
) -> ResourceResult<ShaderHandle> {
    let shader = gl
        .create_shader(stage.to_gl())
        .ok_or(ResourceError::CreateShader(stage.name()))?;
    gl.shader_source(shader, source);
    gl.compile_shader(shader);
    Ok(shader)
}

/// The compile diagnostic of `shader`, or `None` if it compiled
pub fn check_compile_error<D: GlDriver + ?Sized>(gl: &D, shader: ShaderHandle) -> Option<String> {
    if gl.shader_compile_status(shader) {
        return None;
    }
    Some(non_empty_log(
        gl.shader_info_log(shader),
        "shader compilation failed",
    ))
}

/// Create a program from a vertex and a fragment stage and link it
pub fn link_program<D: GlDriver + ?Sized>(
    gl: &D,
    vertex: ShaderHandle,
    fragment: ShaderHandle,
) -> ResourceResult<ProgramHandle> {
    link_stages(gl, &[vertex, fragment])
}

/// Create a program from any set of compiled stages and link it
///
/// Fails only when the driver cannot create the program object; link errors
/// are reported by [`check_link_error`].
pub fn link_stages<D: GlDriver + ?Sized>(
    gl: &D,
    stages: &[ShaderHandle],
) -> ResourceResult<ProgramHandle> {
    let program = gl.create_program().ok_or(ResourceError::CreateProgram)?;
    for &stage in stages {
        gl.attach_shader(program, stage);
    }
    gl.link_program(program);
    Ok(program)
}

/// The link diagnostic of `program`, or `None` if it linked
pub fn check_link_error<D: GlDriver + ?Sized>(gl: &D, program: ProgramHandle) -> Option<String> {
    if gl.program_link_status(program) {
        return None;
    }
    Some(non_empty_log(
        gl.program_info_log(program),
        "program link failed",
    ))
}

fn non_empty_log(log: String, fallback: &str) -> String {
    if log.trim().is_empty() {
        format!("{fallback} (no info log)")
    } else {
        log
    }
}

/// Delete a shader stage, typically once every program using it is linked
pub fn release_shader<D: GlDriver + ?Sized>(gl: &D, shader: ShaderHandle) {
    gl.delete_shader(shader);
}

/// Bind `program` and `vao` for the following draw calls
pub fn use_pipeline<D: GlDriver + ?Sized>(gl: &D, program: ProgramHandle, vao: VertexArrayHandle) {
    gl.use_program(Some(program));
    gl.bind_vertex_array(Some(vao));
}

/// Delete the vertex array and the program of a pipeline
///
/// Both handles are dead afterwards.
pub fn destroy_pipeline<D: GlDriver + ?Sized>(
    gl: &D,
    program: ProgramHandle,
    vao: VertexArrayHandle,
) {
    gl.delete_vertex_array(vao);
    gl.delete_program(program);
}
