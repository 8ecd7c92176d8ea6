mod app;
mod components;
mod config;
mod error;
mod form;
mod geolocation;
mod leaflet;
mod logging;
mod map;
mod tracker;
mod types;

pub use config::AppConfig;
pub use error::{MaptyError, Result};
pub use form::{Field, WorkoutForm};
pub use map::MapAdapter;
pub use tracker::Tracker;
pub use types::{Activity, GeoPoint, Workout, WorkoutInput, WorkoutType};

use leptos::*;
use wasm_bindgen::prelude::*;

use app::App;

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();

    let (config, problem) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };
    logging::init(config.max_level());
    if let Some(e) = problem {
        tracing::warn!(error = %e, "ignoring embedded configuration");
    }

    mount_to_body(move || view! { <App config=config.clone() /> });
}
