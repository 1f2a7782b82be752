//! Browser plumbing shared by the canvas components.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent};

/// Simulation time advanced per animation frame, in seconds.
pub const FRAME_SECS: f64 = 0.016;

pub type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

pub fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
	canvas.get_context("2d").ok()??.dyn_into().ok()
}

/// Pointer position relative to the canvas' top-left corner.
pub fn pointer_position(canvas: &HtmlCanvasElement, ev: &MouseEvent) -> (f64, f64) {
	let rect = canvas.get_bounding_client_rect();
	(
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	)
}

/// Run `frame` on every animation frame for the lifetime of the page.
pub fn start_frame_loop(slot: &FrameCallback, mut frame: impl FnMut() + 'static) {
	let next = slot.clone();
	*slot.borrow_mut() = Some(Closure::new(move || {
		frame();
		request_frame(&next);
	}));
	request_frame(slot);
}

fn request_frame(slot: &FrameCallback) {
	if let (Some(window), Some(cb)) = (web_sys::window(), slot.borrow().as_ref()) {
		let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
	}
}

pub fn set_cursor(canvas: &HtmlCanvasElement, cursor: &str) {
	let _ = canvas.style().set_property("cursor", cursor);
}
