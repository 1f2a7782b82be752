use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::state::{BubbleState, LABEL_DY};
use crate::components::detail_panel;

pub fn render(state: &BubbleState, ctx: &CanvasRenderingContext2d) {
	ctx.clear_rect(0.0, 0.0, state.viewport.width, state.viewport.height);
	ctx.save();
	let _ = ctx.translate(state.shift.offset(), 0.0);
	draw_bubbles(state, ctx);
	draw_labels(state, ctx);
	ctx.restore();

	if let Some(chart) = &state.detail {
		detail_panel::render(chart, ctx);
	}
}

fn draw_bubbles(state: &BubbleState, ctx: &CanvasRenderingContext2d) {
	ctx.set_stroke_style_str("#333");
	ctx.set_line_width(0.5);
	for (bubble, body) in state.bubbles.iter().zip(state.simulation.bodies()) {
		ctx.begin_path();
		let _ = ctx.arc(body.x, body.y, bubble.radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(bubble.color);
		ctx.fill();
		ctx.stroke();
	}
}

fn draw_labels(state: &BubbleState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str("#333");
	ctx.set_font("10px sans-serif");
	ctx.set_text_align("center");
	for (bubble, body) in state.bubbles.iter().zip(state.simulation.bodies()) {
		// only curated labels are printed on the bubbles
		if let Some(label) = &bubble.topic.manual_label {
			let _ = ctx.fill_text(label, body.x, body.y + LABEL_DY);
		}
	}
	ctx.set_text_align("start");
}
