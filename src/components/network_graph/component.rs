use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{debug, error, info, warn};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent};

use super::render;
use super::state::NetworkState;
use crate::components::canvas::{self, FrameCallback};
use crate::config::Viewport;
use crate::data::{NetworkGraph, TopicId};

/// Ask the network panel to show `topic`. Every new `generation` rebuilds the
/// scene from scratch, even for the topic already shown.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NetworkRequest {
	pub topic: TopicId,
	pub generation: u64,
}

#[component]
pub fn NetworkGraphCanvas(
	networks: Vec<NetworkGraph>,
	#[prop(into)] request: Signal<Option<NetworkRequest>>,
	viewport: Viewport,
	#[prop(into)] on_back: Callback<()>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: Rc<RefCell<Option<NetworkState>>> = Rc::new(RefCell::new(None));
	let context: Rc<RefCell<Option<CanvasRenderingContext2d>>> = Rc::new(RefCell::new(None));
	let animate: FrameCallback = Rc::new(RefCell::new(None));
	let (state_init, context_init, animate_init) = (state.clone(), context.clone(), animate.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if animate_init.borrow().is_some() {
			return;
		}
		let canvas: HtmlCanvasElement = canvas.into();
		canvas.set_width(viewport.width as u32);
		canvas.set_height(viewport.height as u32);
		let Some(ctx) = canvas::context_2d(&canvas) else {
			error!("network graph: canvas has no 2d context");
			return;
		};
		*context_init.borrow_mut() = Some(ctx.clone());

		let state_anim = state_init.clone();
		canvas::start_frame_loop(&animate_init, move || {
			if let Some(ref mut s) = *state_anim.borrow_mut() {
				s.tick();
				if s.take_dirty() {
					render::render(s, &ctx);
				}
			}
		});
	});

	let (state_req, context_req) = (state.clone(), context.clone());
	Effect::new(move |_| {
		let Some(req) = request.get() else {
			return;
		};
		debug!("network graph: request #{} for topic {}", req.generation, req.topic);
		// drop the previous scene and its simulation before building the next
		state_req.borrow_mut().take();
		if let Some(ref ctx) = *context_req.borrow() {
			render::clear(viewport.width, viewport.height, ctx);
		}

		let mut random = js_sys::Math::random;
		match NetworkState::build(&networks, req.topic, viewport, &mut random) {
			Ok(Some(scene)) => {
				let unconnected = scene.nodes.iter().filter(|n| n.unconnected).count();
				info!(
					"network graph: topic {} with {} nodes ({} unconnected), {} links",
					scene.topic,
					scene.nodes.len(),
					unconnected,
					scene.links.len()
				);
				*state_req.borrow_mut() = Some(scene);
			}
			Ok(None) => debug!("network graph: no network for topic {}", req.topic),
			Err(e) => warn!("network graph: topic {} not drawn: {}", req.topic, e),
		}
	});

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		// primary button only
		if ev.button() != 0 {
			return;
		}
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let (x, y) = canvas::pointer_position(&canvas, &ev);

		if let Some(ref mut s) = *state_md.borrow_mut() {
			if let Some(idx) = s.node_at(x, y) {
				s.drag_start(idx);
				canvas::set_cursor(&canvas, "grabbing");
			}
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let (x, y) = canvas::pointer_position(&canvas, &ev);

		if let Some(ref mut s) = *state_mm.borrow_mut() {
			if s.drag.node_idx.is_some() {
				s.drag_move(x, y);
			} else {
				let cursor = if s.node_at(x, y).is_some() { "grab" } else { "default" };
				canvas::set_cursor(&canvas, cursor);
			}
		}
	};

	let state_mu = state.clone();
	let on_mouseup = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_mu.borrow_mut() {
			s.drag_end();
		}
		if let Some(canvas) = canvas_ref.get() {
			let canvas: HtmlCanvasElement = canvas.into();
			canvas::set_cursor(&canvas, "default");
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_ml.borrow_mut() {
			s.drag_end();
		}
	};

	view! {
		<button class="back-button" on:click=move |_| on_back.run(())>
			"← Back"
		</button>
		<canvas
			node_ref=canvas_ref
			class="network-graph-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			style="display: block;"
		/>
	}
}
