use web_sys::CanvasRenderingContext2d;

use super::chart::{BarChart, SUBTITLE};

pub fn render(chart: &BarChart, ctx: &CanvasRenderingContext2d) {
	ctx.set_text_baseline("alphabetic");
	ctx.set_text_align("start");
	ctx.set_fill_style_str("#111");
	ctx.set_font("bold 12px sans-serif");
	let _ = ctx.fill_text(&chart.title, chart.title_pos.0, chart.title_pos.1);

	ctx.set_fill_style_str("#333");
	ctx.set_font("11px sans-serif");
	let _ = ctx.fill_text(SUBTITLE, chart.subtitle_pos.0, chart.subtitle_pos.1);

	ctx.set_text_baseline("middle");
	for bar in &chart.bars {
		ctx.set_fill_style_str("#555");
		ctx.fill_rect(bar.x, bar.y, bar.width, bar.height);

		let (wx, wy) = bar.word_anchor();
		ctx.set_text_align("end");
		ctx.set_fill_style_str("#333");
		ctx.set_font("10px sans-serif");
		let _ = ctx.fill_text(&bar.word, wx, wy);

		let (vx, vy) = bar.value_anchor();
		ctx.set_text_align("start");
		ctx.set_fill_style_str("#555");
		ctx.set_font("9px sans-serif");
		let _ = ctx.fill_text(&bar.value_text(), vx, vy);
	}
	ctx.set_text_baseline("alphabetic");
}
