//! A colored triangle from a vertex buffer
//!
//! Reads `init.json` next to the executable (see `InitConfig`), opens the
//! window and draws until it is closed or Escape is pressed.

use bytemuck::{Pod, Zeroable};
use carol_native::sdl2::event::Event;
use carol_native::sdl2::keyboard::Keycode;
use carol_native::*;

const VERTEX_SHADER: &str = r#"#version 450 core

layout(location = 0) in vec2 position;
layout(location = 1) in vec3 color;

out vec3 vertex_color;

void main(void) {
	gl_Position = vec4(position, 0.5, 1.0);
	vertex_color = color;
}
"#;

const FRAGMENT_SHADER: &str = r#"#version 450 core

in vec3 vertex_color;
out vec4 out_color;

void main(void) {
	out_color = vec4(vertex_color, 1.0);
}
"#;

#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
struct Vertex {
    position: [f32; 2],
    color: [f32; 3],
}

const TRIANGLE: [Vertex; 3] = [
    Vertex {
        position: [0.0, 0.65],
        color: [0.3, 0.0, 0.8],
    },
    Vertex {
        position: [-0.65, -0.475],
        color: [0.8, 0.3, 0.0],
    },
    Vertex {
        position: [0.65, -0.475],
        color: [0.0, 0.6, 0.2],
    },
];

type PipelineResult = Result<(ProgramHandle, VertexArrayHandle), Box<dyn std::error::Error>>;

fn build_pipeline<D: GlDriver>(gl: &D) -> PipelineResult {
    let vs = compile_shader(gl, VERTEX_SHADER, ShaderStage::Vertex)?;
    if let Some(log) = check_compile_error(gl, vs) {
        return Err(format!("vertex shader: {log}").into());
    }
    let fs = compile_shader(gl, FRAGMENT_SHADER, ShaderStage::Fragment)?;
    if let Some(log) = check_compile_error(gl, fs) {
        return Err(format!("fragment shader: {log}").into());
    }
    let program = link_program(gl, vs, fs)?;
    if let Some(log) = check_link_error(gl, program) {
        return Err(format!("link: {log}").into());
    }
    release_shader(gl, vs);
    release_shader(gl, fs);

    let vao = create_vertex_array(gl)?;
    for (index, count, offset) in [(0, 2, 0), (1, 3, 8)] {
        bind_attribute(
            gl,
            vao,
            &VertexAttribute {
                index,
                binding: 0,
                count,
                component: ComponentType::Float,
                normalized: false,
                offset,
            },
        );
    }
    let vbo = create_buffer_from(gl, &TRIANGLE, BufferStorageFlags::empty())?;
    vertex_buffer(gl, vao, 0, vbo, 0, std::mem::size_of::<Vertex>() as i32);
    Ok((program, vao))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let config = InitConfig::load_default()?;
    let sdl = sdl2::init()?;
    let video = sdl.video()?;
    let game = open_window(&video, &config)?;
    let gl = unsafe { init_graphics(config.debug.then(tracing_sink)) }?;
    tracing::info!(version = %gl.version(), "Ready");

    let (program, vao) = build_pipeline(&gl)?;
    let mut events = sdl.event_pump()?;

    'running: loop {
        for event in events.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => break 'running,
                _ => {}
            }
        }

        clear(&gl);
        use_pipeline(&gl, program, vao);
        draw(&gl, glow::TRIANGLES, 0, 3);
        present(&game.window);

        let code = get_last_error(&gl);
        if code != glow::NO_ERROR {
            tracing::warn!(error = %GlErrorCode(code), "OpenGL error");
        }
    }

    destroy_pipeline(&gl, program, vao);
    Ok(())
}
