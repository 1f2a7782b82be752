use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use leptos::task::spawn_local;
use log::error;

use crate::components::bubble_chart::BubbleChart;
use crate::components::network_graph::{NetworkGraphCanvas, NetworkRequest};
use crate::components::transition::{Command, Panel, ViewController, ViewEvent};
use crate::config::{AppConfig, Viewport};
use crate::data::{Datasets, LoadError, TopicId, load_datasets};

/// Loads both datasets, then shows the explorer or the reason it cannot start.
#[component]
pub fn Home() -> impl IntoView {
	let config = use_context::<AppConfig>().unwrap_or_default();
	let viewport = Viewport::from_window();
	let datasets = RwSignal::new(None::<Result<Datasets, LoadError>>);

	spawn_local(async move {
		let result = load_datasets(&config).await;
		if let Err(e) = &result {
			error!("topic explorer cannot start: {}", e);
		}
		datasets.set(Some(result));
	});

	view! {
		{move || match datasets.get() {
			None => view! { <p class="status">"Loading topics…"</p> }.into_any(),
			Some(Err(e)) => {
				view! {
					<div class="status load-error">
						<h1>"The topic data could not be loaded"</h1>
						<p>{e.to_string()}</p>
					</div>
				}
					.into_any()
			}
			Some(Ok(data)) => view! { <Explorer datasets=data viewport=viewport /> }.into_any(),
		}}
	}
}

/// The two stacked panels and the controller that swaps them.
#[component]
fn Explorer(datasets: Datasets, viewport: Viewport) -> impl IntoView {
	let fade_ms = use_context::<AppConfig>().unwrap_or_default().fade_ms;
	let controller = RwSignal::new(ViewController::default());
	let request = RwSignal::new(None::<NetworkRequest>);
	let generation = StoredValue::new(0u64);

	let dispatch = move |event: ViewEvent| {
		let mut command = None;
		controller.update(|c| command = c.dispatch(event));
		let Some(command) = command else {
			return;
		};
		if let Command::OpenNetwork(topic) = command {
			generation.update_value(|g| *g += 1);
			request.set(Some(NetworkRequest {
				topic,
				generation: generation.get_value(),
			}));
		}
		Timeout::new(fade_ms, move || {
			controller.update(|c| {
				c.dispatch(ViewEvent::FadeFinished);
			});
		})
		.forget();
	};

	let Datasets { topics, networks } = datasets;
	let on_select = Callback::new(move |topic: TopicId| dispatch(ViewEvent::TopicSelected(topic)));
	let on_back = Callback::new(move |_: ()| dispatch(ViewEvent::Back));

	view! {
		<div class="explorer">
			<div
				id="chart"
				class="panel"
				style=move || controller.get().panel_style(Panel::Bubbles).css(fade_ms)
			>
				<BubbleChart topics=topics viewport=viewport on_select=on_select />
			</div>
			<div
				id="network"
				class="panel"
				style=move || controller.get().panel_style(Panel::Network).css(fade_ms)
			>
				<NetworkGraphCanvas
					networks=networks
					request=request
					viewport=viewport
					on_back=on_back
				/>
			</div>
		</div>
	}
}
