use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::state::ParallelLinksState;

pub fn render(state: &ParallelLinksState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(state.config.background);
	ctx.fill_rect(0.0, 0.0, state.size, state.size);
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	draw_links(state, ctx);
	draw_nodes(state, ctx);
	ctx.restore();
}

/// Each link is drawn straight between its nodes, then shifted by its translation.
fn draw_links(state: &ParallelLinksState, ctx: &CanvasRenderingContext2d) {
	ctx.set_line_width(state.config.link_width);
	for segment in state.link_segments() {
		ctx.save();
		let _ = ctx.translate(segment.translation.dx, segment.translation.dy);
		ctx.set_stroke_style_str(segment.color);
		ctx.begin_path();
		ctx.move_to(segment.start.x, segment.start.y);
		ctx.line_to(segment.end.x, segment.end.y);
		ctx.stroke();
		ctx.restore();
	}
}

fn draw_nodes(state: &ParallelLinksState, ctx: &CanvasRenderingContext2d) {
	let radius = state.node_radius;
	state.graph.visit_nodes(|node| {
		let (x, y) = (node.x() as f64, node.y() as f64);
		ctx.begin_path();
		let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(state.config.node_color);
		ctx.fill();

		if let Some(label) = &node.data.user_data.label {
			ctx.set_fill_style_str("white");
			ctx.set_font(&format!("{}px sans-serif", (radius * 0.8).max(8.0)));
			let _ = ctx.fill_text(label, x - radius * 0.4, y + radius * 0.3);
		}
	});
}
