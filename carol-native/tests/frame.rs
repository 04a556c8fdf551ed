mod common;

use std::cell::Cell;

use carol_native::{
    DrawCall, GlErrorCode, Presenter, clear, draw, get_last_error, present, render,
};
use common::{Call, RecordingDriver};
use pretty_assertions::assert_eq;

#[derive(Default)]
struct CountingWindow {
    swaps: Cell<u32>,
}

impl Presenter for CountingWindow {
    fn swap(&self) {
        self.swaps.set(self.swaps.get() + 1);
    }
}

#[test]
fn render_clears_and_presents() {
    let gl = RecordingDriver::new();
    let window = CountingWindow::default();

    render(&gl, &window, None);

    assert_eq!(
        gl.calls(),
        vec![Call::Clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT)]
    );
    assert_eq!(window.swaps.get(), 1);
}

#[test]
fn render_with_a_draw_issues_it_between_clear_and_present() {
    let gl = RecordingDriver::new();
    let window = CountingWindow::default();

    render(&gl, &window, Some(DrawCall::triangles(0, 3)));

    assert_eq!(
        gl.calls(),
        vec![
            Call::Clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT),
            Call::DrawArrays(glow::TRIANGLES, 0, 3),
        ]
    );
    assert_eq!(window.swaps.get(), 1);
}

#[test]
fn host_side_draws_fit_between_clear_and_present() {
    let gl = RecordingDriver::new();
    let window = CountingWindow::default();

    clear(&gl);
    draw(&gl, glow::TRIANGLES, 0, 3);
    draw(&gl, glow::TRIANGLES, 3, 6);
    assert_eq!(window.swaps.get(), 0);
    present(&window);

    assert_eq!(
        gl.calls(),
        vec![
            Call::Clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT),
            Call::DrawArrays(glow::TRIANGLES, 0, 3),
            Call::DrawArrays(glow::TRIANGLES, 3, 6),
        ]
    );
    assert_eq!(window.swaps.get(), 1);
}

#[test]
fn draw_is_a_passthrough() {
    let gl = RecordingDriver::new();
    draw(&gl, glow::LINES, 4, 10);
    assert_eq!(gl.calls(), vec![Call::DrawArrays(glow::LINES, 4, 10)]);
}

#[test]
fn errors_are_passed_through_raw() {
    let gl = RecordingDriver::new();
    gl.push_error(glow::INVALID_OPERATION);
    gl.push_error(0x9999);

    let first = get_last_error(&gl);
    assert_eq!(first, glow::INVALID_OPERATION);
    assert_eq!(GlErrorCode(first).describe(), "INVALID_OPERATION");
    assert_eq!(get_last_error(&gl), 0x9999);
    assert_eq!(get_last_error(&gl), glow::NO_ERROR);
}
