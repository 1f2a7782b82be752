use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::state::NetworkState;

pub fn clear(width: f64, height: f64, ctx: &CanvasRenderingContext2d) {
	ctx.clear_rect(0.0, 0.0, width, height);
}

pub fn render(state: &NetworkState, ctx: &CanvasRenderingContext2d) {
	clear(state.viewport.width, state.viewport.height, ctx);
	draw_links(state, ctx);
	draw_nodes(state, ctx);
	draw_labels(state, ctx);
}

fn draw_links(state: &NetworkState, ctx: &CanvasRenderingContext2d) {
	let bodies = state.simulation.bodies();
	ctx.set_stroke_style_str("#d4d2d2");
	for link in &state.links {
		let (src, tgt) = (&bodies[link.source], &bodies[link.target]);
		ctx.set_line_width(link.stroke_width());
		ctx.begin_path();
		ctx.move_to(src.x, src.y);
		ctx.line_to(tgt.x, tgt.y);
		ctx.stroke();
	}
}

fn draw_nodes(state: &NetworkState, ctx: &CanvasRenderingContext2d) {
	ctx.set_stroke_style_str("#333");
	ctx.set_line_width(0.5);
	for (node, body) in state.nodes.iter().zip(state.simulation.bodies()) {
		ctx.begin_path();
		let _ = ctx.arc(body.x, body.y, node.radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(node.color);
		ctx.fill();
		ctx.stroke();
	}
}

fn draw_labels(state: &NetworkState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str("#000");
	ctx.set_font("8px sans-serif");
	for (node, body) in state.nodes.iter().zip(state.simulation.bodies()) {
		let _ = ctx.fill_text(&node.id, body.x, body.y);
	}
}
