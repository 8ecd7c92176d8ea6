use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::config::AppConfig;
use crate::error::{MaptyError, Result};
use crate::form::WorkoutForm;
use crate::map::MapAdapter;
use crate::types::{workout_id, GeoPoint, Workout};

/// Owns the map, the entry form and every workout logged this session.
pub struct Tracker<M> {
    config: AppConfig,
    map: Option<M>,
    pending: Option<GeoPoint>,
    form: WorkoutForm,
    workouts: Vec<Workout>,
    next_seq: u64,
}

impl<M: MapAdapter> Tracker<M> {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            map: None,
            pending: None,
            form: WorkoutForm::default(),
            workouts: Vec::new(),
            next_seq: 0,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn is_map_ready(&self) -> bool {
        self.map.is_some()
    }

    /// Called once the map exists. Replaces nothing if one is already attached.
    pub fn attach_map(&mut self, map: M) {
        if self.map.is_some() {
            warn!("map already attached, ignoring the new one");
            return;
        }
        self.map = Some(map);
    }

    /// Records where the next workout happened and shows the form.
    ///
    /// Returns `false` when there is no map to click on yet.
    pub fn handle_map_click(&mut self, at: GeoPoint) -> bool {
        if self.map.is_none() {
            debug!("map click before the map exists");
            return false;
        }
        self.pending = Some(at);
        self.form.show();
        true
    }

    pub fn pending_location(&self) -> Option<GeoPoint> {
        self.pending
    }

    pub fn form(&self) -> &WorkoutForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut WorkoutForm {
        &mut self.form
    }

    pub fn workouts(&self) -> &[Workout] {
        &self.workouts
    }

    /// Turns the form contents into a workout and puts it on the map.
    ///
    /// On error nothing changes: the form keeps its values and stays open.
    pub fn submit(&mut self, now: DateTime<Utc>) -> Result<&Workout> {
        let at = self.pending.ok_or(MaptyError::NoPendingLocation)?;
        let input = self.form.parse()?;
        let map = self.map.as_ref().ok_or(MaptyError::MapUnavailable)?;

        self.next_seq += 1;
        let workout = Workout::new(workout_id(&now, self.next_seq), now, at, input);

        let kind = workout.workout_type();
        map.add_marker(
            workout.coords(),
            &self.config.popup.for_type(kind),
            &format!("{} {}", kind.icon(), workout.description()),
        );
        info!(id = workout.id(), kind = %kind, "workout logged");

        self.form.clear();
        self.form.hide();
        self.pending = None;
        self.workouts.push(workout);

        Ok(&self.workouts[self.workouts.len() - 1])
    }

    /// Pans the map to a logged workout.
    pub fn focus_workout(&self, id: &str) -> Result<()> {
        let map = self.map.as_ref().ok_or(MaptyError::MapUnavailable)?;
        let workout = self
            .workouts
            .iter()
            .find(|w| w.id() == id)
            .ok_or_else(|| MaptyError::WorkoutNotFound(id.to_string()))?;
        map.pan_to(workout.coords(), self.config.map.zoom);
        Ok(())
    }
}
