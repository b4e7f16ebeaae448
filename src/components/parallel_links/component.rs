use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::error;
use thiserror::Error;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, Window};

use super::render;
use super::state::ParallelLinksState;
use super::types::GraphData;
use crate::config::ParallelLinksConfig;
use crate::parallel::CalcMethod;

/// Frame step handed to the simulation.
const FRAME_DT: f32 = 0.016;

/// Failure to set up the canvas.
#[derive(Debug, Error)]
pub enum CanvasError {
	/// Not running in a browser window.
	#[error("no global window")]
	NoWindow,
	/// The canvas has no usable 2d context.
	#[error("2d context unavailable: {0}")]
	Context(String),
}

type SharedState = Rc<RefCell<Option<ParallelLinksState>>>;
type SharedClosure = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, CanvasError> {
	canvas
		.get_context("2d")
		.map_err(|e| CanvasError::Context(format!("{e:?}")))?
		.ok_or_else(|| CanvasError::Context("no context returned".into()))?
		.dyn_into()
		.map_err(|_| CanvasError::Context("not a CanvasRenderingContext2d".into()))
}

/// Side of the square canvas that fits the parent element.
fn fit_canvas(canvas: &HtmlCanvasElement, config: &ParallelLinksConfig) -> f64 {
	let (w, h) = canvas
		.parent_element()
		.map(|p| (p.client_width() as f64, p.client_height() as f64))
		.unwrap_or((800.0, 600.0));
	let size = config.view_size(w, h);
	canvas.set_width(size as u32);
	canvas.set_height(size as u32);
	size
}

fn request_frame(window: &Window, cb: &SharedClosure) {
	if let Some(ref cb) = *cb.borrow() {
		let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
	}
}

/// Fills `slot` with `make()` unless it already holds a value.
fn install_once<T>(slot: &RefCell<Option<T>>, make: impl FnOnce() -> T) -> bool {
	let mut slot = slot.borrow_mut();
	if slot.is_some() {
		return false;
	}
	*slot = Some(make());
	true
}

/// Builds the simulation for `data`. The resize listener and frame loop are
/// installed on the first call only and pick up the replaced state.
fn mount(
	canvas: HtmlCanvasElement,
	data: &GraphData,
	config: ParallelLinksConfig,
	state: &SharedState,
	animate: &SharedClosure,
	resize_cb: &SharedClosure,
) -> Result<(), CanvasError> {
	let window = web_sys::window().ok_or(CanvasError::NoWindow)?;
	let ctx = context_2d(&canvas)?;
	let size = fit_canvas(&canvas, &config);
	let seed = js_sys::Date::now() as u64;
	*state.borrow_mut() = Some(ParallelLinksState::new(data, config.clone(), size, seed));

	let (state_resize, canvas_resize) = (state.clone(), canvas.clone());
	let resize_added = install_once(resize_cb, || {
		Closure::new(move || {
			let size = fit_canvas(&canvas_resize, &config);
			if let Some(ref mut s) = *state_resize.borrow_mut() {
				s.resize(size);
			}
		})
	});
	if resize_added {
		if let Some(ref cb) = *resize_cb.borrow() {
			let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}
	}

	let (state_anim, animate_inner) = (state.clone(), animate.clone());
	let animate_added = install_once(animate, || {
		Closure::new(move || {
			if let Some(ref mut s) = *state_anim.borrow_mut() {
				if s.running {
					s.tick(FRAME_DT);
				}
				render::render(s, &ctx);
			}
			if let Some(window) = web_sys::window() {
				request_frame(&window, &animate_inner);
			}
		})
	});
	if animate_added {
		request_frame(&window, animate);
	}
	Ok(())
}

fn canvas_position(
	canvas_ref: NodeRef<leptos::html::Canvas>,
	ev: &MouseEvent,
) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

/// Canvas drawing the links of `data` side by side while the nodes move.
#[component]
pub fn ParallelLinksCanvas(
	#[prop(into)] data: Signal<GraphData>,
	#[prop(into)] running: Signal<bool>,
	#[prop(into)] method: Signal<CalcMethod>,
	#[prop(optional)] config: ParallelLinksConfig,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: SharedState = Rc::new(RefCell::new(None));
	let animate: SharedClosure = Rc::new(RefCell::new(None));
	let resize_cb: SharedClosure = Rc::new(RefCell::new(None));
	let (state_init, animate_init, resize_cb_init) =
		(state.clone(), animate.clone(), resize_cb.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let mounted = mount(
			canvas.into(),
			&data.get(),
			config.clone(),
			&state_init,
			&animate_init,
			&resize_cb_init,
		);
		match mounted {
			Ok(()) => {
				if let Some(ref mut s) = *state_init.borrow_mut() {
					s.running = running.get_untracked();
					s.set_method(method.get_untracked());
				}
			}
			Err(err) => error!("parallel links canvas: {err}"),
		}
	});

	let state_run = state.clone();
	Effect::new(move |_| {
		let running = running.get();
		if let Some(ref mut s) = *state_run.borrow_mut() {
			s.running = running;
		}
	});

	let state_method = state.clone();
	Effect::new(move |_| {
		let method = method.get();
		if let Some(ref mut s) = *state_method.borrow_mut() {
			s.set_method(method);
		}
	});

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = canvas_position(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_md.borrow_mut() {
			s.begin_drag(x, y);
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = canvas_position(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_mm.borrow_mut() {
			s.drag_to(x, y);
		}
	};

	let state_mu = state.clone();
	let on_mouseup = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_mu.borrow_mut() {
			s.end_drag();
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_ml.borrow_mut() {
			s.end_drag();
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="parallel-links-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			style="display: block; margin: 10px; cursor: grab;"
		/>
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn should_install_callback_only_once() {
		let slot = RefCell::new(None);
		assert!(install_once(&slot, || 1));
		assert!(!install_once(&slot, || 2));
		assert_eq!(*slot.borrow(), Some(1));
	}
}
