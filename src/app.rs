use chrono::Utc;
use leptos::*;
use tracing::{info, warn};

use crate::components::{WorkoutEntry, WorkoutList};
use crate::config::AppConfig;
use crate::error::MaptyError;
use crate::geolocation;
use crate::leaflet::LeafletMap;
use crate::tracker::Tracker;
use crate::types::GeoPoint;

pub type AppTracker = StoredValue<Tracker<LeafletMap>>;

/// Blocking browser alert.
pub fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}

/// Alerts the user about errors they can act on, logs the rest.
pub fn report(err: &MaptyError) {
    if err.is_user_facing() {
        warn!(error = ?err, "alerting user");
        alert(&err.to_string());
    } else {
        warn!(error = ?err, "ignored");
    }
}

#[component]
pub fn App(config: AppConfig) -> impl IntoView {
    let tracker: AppTracker = store_value(Tracker::new(config.clone()));
    // Bumped after every tracker mutation so views re-read it.
    let (revision, set_revision) = create_signal(0u32);
    let bump = move || set_revision.update(|r| *r = r.wrapping_add(1));

    let map_ref = create_node_ref::<html::Div>();
    let distance_ref = create_node_ref::<html::Input>();

    let on_map_click = move |at: GeoPoint| {
        let mut shown = false;
        tracker.update_value(|t| shown = t.handle_map_click(at));
        if shown {
            bump();
            if let Some(input) = distance_ref.get_untracked() {
                let _ = input.focus();
            }
        }
    };

    spawn_local(async move {
        let center = match geolocation::current_position(&config.geolocation).await {
            Ok(center) => center,
            Err(e) => {
                report(&e);
                return;
            }
        };

        let Some(container) = map_ref.get_untracked() else {
            warn!("map container missing, cannot show map");
            return;
        };

        match LeafletMap::initialize(&container, center, &config.map, on_map_click) {
            Ok(map) => {
                tracker.update_value(|t| t.attach_map(map));
                info!("ready, click on the map to log a workout");
                bump();
            }
            Err(e) => report(&e),
        }
    });

    let on_submit = move || {
        let mut outcome = Ok(());
        tracker.update_value(|t| outcome = t.submit(Utc::now()).map(|_| ()));
        match outcome {
            Ok(()) => bump(),
            Err(e) => report(&e),
        }
    };

    let on_select = move |id: String| {
        if let Err(e) = tracker.with_value(|t| t.focus_workout(&id)) {
            report(&e);
        }
    };

    view! {
        <div class="sidebar">
            <ul class="workouts">
                <WorkoutEntry
                    tracker=tracker
                    revision=revision
                    set_revision=set_revision
                    distance_ref=distance_ref
                    on_submit=on_submit
                />
                <WorkoutList tracker=tracker revision=revision on_select=on_select />
            </ul>
        </div>
        <div id="map" node_ref=map_ref></div>
    }
}
