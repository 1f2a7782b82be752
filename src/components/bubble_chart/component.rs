use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{error, info};
use web_sys::{HtmlCanvasElement, MouseEvent};

use super::render;
use super::state::BubbleState;
use crate::components::canvas::{self, FRAME_SECS, FrameCallback};
use crate::config::{AppConfig, Viewport};
use crate::data::{Topic, TopicId};

#[component]
pub fn BubbleChart(
	topics: Vec<Topic>,
	viewport: Viewport,
	#[prop(into)] on_select: Callback<TopicId>,
) -> impl IntoView {
	let config = use_context::<AppConfig>().unwrap_or_default();
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: Rc<RefCell<Option<BubbleState>>> = Rc::new(RefCell::new(None));
	let animate: FrameCallback = Rc::new(RefCell::new(None));
	let (state_init, animate_init) = (state.clone(), animate.clone());

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
			error!("bubble chart: canvas has no 2d context");
			return;
		};

		let mut random = js_sys::Math::random;
		let shift_secs = config.shift_ms as f64 / 1000.0;
		*state_init.borrow_mut() = Some(BubbleState::new(&topics, viewport, shift_secs, &mut random));
		info!("bubble chart: laid out {} topics", topics.len());

		let state_anim = state_init.clone();
		canvas::start_frame_loop(&animate_init, move || {
			if let Some(ref mut s) = *state_anim.borrow_mut() {
				s.tick(FRAME_SECS);
				if s.take_dirty() {
					render::render(s, &ctx);
				}
			}
		});
	});

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let (x, y) = canvas::pointer_position(&canvas, &ev);

		if let Some(ref mut s) = *state_mm.borrow_mut() {
			let hovered = s.bubble_at(x, y);
			if s.set_hover(hovered) {
				match hovered.and_then(|i| s.bubbles.get(i)) {
					Some(bubble) => {
						canvas.set_title(&format!("#{} {}", bubble.topic.id, bubble.topic.label));
						canvas::set_cursor(&canvas, "pointer");
					}
					None => {
						canvas.set_title("");
						canvas::set_cursor(&canvas, "default");
					}
				}
			}
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_ml.borrow_mut() {
			s.set_hover(None);
		}
	};

	let state_cl = state.clone();
	let on_click = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let (x, y) = canvas::pointer_position(&canvas, &ev);

		let clicked = state_cl
			.borrow()
			.as_ref()
			.and_then(|s| s.bubble_at(x, y).and_then(|i| s.topic_id(i)));
		if let Some(topic) = clicked {
			on_select.run(topic);
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="bubble-chart-canvas"
			on:mousemove=on_mousemove
			on:mouseleave=on_mouseleave
			on:click=on_click
			style="display: block;"
		/>
	}
}
