use serde::{Deserialize, Serialize};
use tracing::level_filters::LevelFilter;

use crate::error::Result;
use crate::types::WorkoutType;

/// Id of the optional `<script type="application/json">` element holding overrides.
pub const CONFIG_ELEMENT_ID: &str = "mapty-config";

const OSM_HOT_TILES: &str = "https://tile.openstreetmap.fr/hot/{z}/{x}/{y}.png";
const OSM_ATTRIBUTION: &str =
    "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors";

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct AppConfig {
    pub map: MapConfig,
    pub popup: PopupConfig,
    pub geolocation: GeolocationConfig,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            map: MapConfig::default(),
            popup: PopupConfig::default(),
            geolocation: GeolocationConfig::default(),
            log_level: "info".to_string(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct MapConfig {
    pub tile_url: String,
    pub attribution: String,
    pub zoom: u8,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            tile_url: OSM_HOT_TILES.to_string(),
            attribution: OSM_ATTRIBUTION.to_string(),
            zoom: 13,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct PopupConfig {
    pub max_width: u32,
    pub min_width: u32,
    pub auto_close: bool,
    pub close_on_click: bool,
}

impl Default for PopupConfig {
    fn default() -> Self {
        Self {
            max_width: 250,
            min_width: 100,
            auto_close: false,
            close_on_click: false,
        }
    }
}

impl PopupConfig {
    pub fn for_type(&self, kind: WorkoutType) -> PopupOptions {
        PopupOptions {
            max_width: self.max_width,
            min_width: self.min_width,
            auto_close: self.auto_close,
            close_on_click: self.close_on_click,
            class_name: format!("{}-popup", kind.as_str()),
        }
    }
}

/// Options object handed to `L.popup`.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PopupOptions {
    pub max_width: u32,
    pub min_width: u32,
    pub auto_close: bool,
    pub close_on_click: bool,
    pub class_name: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct GeolocationConfig {
    /// `None` waits forever, like the browser default.
    pub timeout_ms: Option<u32>,
    pub enable_high_accuracy: bool,
    pub maximum_age_ms: u32,
}

impl Default for GeolocationConfig {
    fn default() -> Self {
        Self {
            timeout_ms: Some(10_000),
            enable_high_accuracy: false,
            maximum_age_ms: 0,
        }
    }
}

impl AppConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads overrides embedded in the page. No config element means defaults.
    pub fn load() -> Result<Self> {
        let json = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(CONFIG_ELEMENT_ID))
            .and_then(|el| el.text_content());

        match json {
            Some(json) => Self::from_json(&json),
            None => Ok(Self::default()),
        }
    }

    pub fn max_level(&self) -> LevelFilter {
        self.log_level.parse().unwrap_or(LevelFilter::INFO)
    }
}
