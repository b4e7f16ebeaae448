use leptos::prelude::*;

use crate::components::parallel_links::ParallelLinksCanvas;
use crate::config::{ParallelLinksConfig, demo_graph};

/// Demo page: the canvas plus controls for the simulation and translation method.
#[component]
pub fn Home() -> impl IntoView {
	let graph_data = Signal::derive(demo_graph);
	let running = RwSignal::new(true);
	let method = RwSignal::new(ParallelLinksConfig::default().method);

	view! {
		<div class="parallel-links-container" style="width: 100vw; height: 85vh;">
			<ParallelLinksCanvas data=graph_data running=running method=method />
		</div>
		<div class="parallel-links-controls">
			<button on:click=move |_| running.set(false)>"Stop"</button>
			<button on:click=move |_| running.set(true)>"Start"</button>
			<button on:click=move |_| method.update(|m| *m = m.toggled())>
				{move || format!("Translation: {}", method.get().label())}
			</button>
		</div>
	}
}
