use leptos::prelude::*;
use parallel_links::{App, init_logging};

fn main() {
	init_logging();
	mount_to_body(|| view! { <App /> })
}
