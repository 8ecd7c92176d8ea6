use tracing::{info, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Position, PositionError, PositionOptions};

use crate::config::GeolocationConfig;
use crate::error::{MaptyError, Result};
use crate::types::GeoPoint;

/// Human-readable reason for a browser `PositionError`.
fn error_reason(code: u16, message: &str) -> String {
    let kind = match code {
        PositionError::PERMISSION_DENIED => "permission denied",
        PositionError::POSITION_UNAVAILABLE => "position unavailable",
        PositionError::TIMEOUT => "timed out",
        _ => "unknown error",
    };
    if message.is_empty() {
        kind.to_string()
    } else {
        format!("{kind}: {message}")
    }
}

fn unavailable(reason: impl Into<String>) -> MaptyError {
    MaptyError::PositionUnavailable {
        reason: reason.into(),
    }
}

/// Asks the browser for the user's position once.
///
/// Resolves when the browser calls either callback. With a timeout configured
/// the browser gives up on its own and the error path is taken.
pub async fn current_position(config: &GeolocationConfig) -> Result<GeoPoint> {
    let geolocation = web_sys::window()
        .ok_or_else(|| unavailable("no window"))?
        .navigator()
        .geolocation()
        .map_err(|_| unavailable("geolocation not supported"))?;

    let options = PositionOptions::new();
    options.set_enable_high_accuracy(config.enable_high_accuracy);
    options.set_maximum_age(config.maximum_age_ms);
    if let Some(timeout) = config.timeout_ms {
        options.set_timeout(timeout);
    }

    let promise = js_sys::Promise::new(&mut |resolve, reject| {
        if let Err(e) = geolocation.get_current_position_with_error_callback_and_options(
            &resolve,
            Some(&reject),
            &options,
        ) {
            let _ = reject.call1(&JsValue::NULL, &e);
        }
    });

    let value = JsFuture::from(promise).await.map_err(|e| {
        let reason = match e.dyn_ref::<PositionError>() {
            Some(err) => error_reason(err.code(), &err.message()),
            None => format!("{:?}", e),
        };
        warn!(%reason, "geolocation failed");
        unavailable(reason)
    })?;

    let position: Position = value
        .dyn_into()
        .map_err(|_| unavailable("unexpected geolocation result"))?;
    let coords = position.coords();
    let at = GeoPoint::new(coords.latitude(), coords.longitude());

    info!(
        "located at https://www.google.com/maps/@{},{}",
        at.lat, at.lng
    );
    Ok(at)
}
