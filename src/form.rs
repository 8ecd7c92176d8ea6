use crate::error::{MaptyError, Result};
use crate::types::{WorkoutInput, WorkoutType};

/// Which form field an input event targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Distance,
    Duration,
    Cadence,
    Elevation,
}

/// Raw state of the workout entry form, as typed by the user.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WorkoutForm {
    pub kind: WorkoutType,
    pub distance: String,
    pub duration: String,
    pub cadence: String,
    pub elevation: String,
    visible: bool,
}

impl WorkoutForm {
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn show(&mut self) {
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn shows_cadence(&self) -> bool {
        self.kind == WorkoutType::Running
    }

    pub fn shows_elevation(&self) -> bool {
        self.kind == WorkoutType::Cycling
    }

    /// Flips between the running and cycling rows.
    pub fn toggle_type(&mut self) {
        self.kind = self.kind.other();
    }

    /// Applies the value of the type selector.
    pub fn select_type(&mut self, value: &str) -> Result<()> {
        let kind: WorkoutType = value.parse()?;
        if kind != self.kind {
            self.toggle_type();
        }
        Ok(())
    }

    pub fn set(&mut self, field: Field, value: String) {
        match field {
            Field::Distance => self.distance = value,
            Field::Duration => self.duration = value,
            Field::Cadence => self.cadence = value,
            Field::Elevation => self.elevation = value,
        }
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Distance => &self.distance,
            Field::Duration => &self.duration,
            Field::Cadence => &self.cadence,
            Field::Elevation => &self.elevation,
        }
    }

    /// Validates the fields for the selected type. Leaves the form untouched.
    pub fn parse(&self) -> Result<WorkoutInput> {
        let distance = number("distance", &self.distance)?;
        let duration = number("duration", &self.duration)?;
        match self.kind {
            WorkoutType::Running => {
                WorkoutInput::running(distance, duration, number("cadence", &self.cadence)?)
            }
            WorkoutType::Cycling => {
                WorkoutInput::cycling(distance, duration, number("elevation", &self.elevation)?)
            }
        }
    }

    /// Empties every numeric field. The selected type stays.
    pub fn clear(&mut self) {
        self.distance.clear();
        self.duration.clear();
        self.cadence.clear();
        self.elevation.clear();
    }
}

// An empty field reads as 0, the positivity checks then decide.
fn number(field: &'static str, raw: &str) -> Result<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(0.0);
    }
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or(MaptyError::InvalidWorkoutInput { field })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(kind: WorkoutType, distance: &str, duration: &str, extra: &str) -> WorkoutForm {
        let mut form = WorkoutForm {
            kind,
            ..WorkoutForm::default()
        };
        form.set(Field::Distance, distance.into());
        form.set(Field::Duration, duration.into());
        match kind {
            WorkoutType::Running => form.set(Field::Cadence, extra.into()),
            WorkoutType::Cycling => form.set(Field::Elevation, extra.into()),
        }
        form
    }

    #[test]
    fn test_toggle_parity() {
        let mut form = WorkoutForm::default();
        let (cadence, elevation) = (form.shows_cadence(), form.shows_elevation());

        for _ in 0..4 {
            form.toggle_type();
        }
        assert_eq!((form.shows_cadence(), form.shows_elevation()), (cadence, elevation));

        for _ in 0..3 {
            form.toggle_type();
        }
        assert_eq!((form.shows_cadence(), form.shows_elevation()), (!cadence, !elevation));
    }

    #[test]
    fn test_select_type() {
        let mut form = WorkoutForm::default();
        form.select_type("cycling").unwrap();
        assert!(form.shows_elevation());

        // selecting the current type again changes nothing
        form.select_type("cycling").unwrap();
        assert!(form.shows_elevation());

        assert_eq!(
            form.select_type("rowing"),
            Err(MaptyError::UnknownWorkoutType("rowing".into()))
        );
        assert_eq!(form.kind, WorkoutType::Cycling);
    }

    #[test]
    fn test_parse_running() {
        let form = filled(WorkoutType::Running, "5.2", " 24 ", "178");
        assert_eq!(
            form.parse(),
            Ok(WorkoutInput::Running {
                distance_km: 5.2,
                duration_min: 24.0,
                cadence_spm: 178.0,
            })
        );
    }

    #[test]
    fn test_parse_ignores_hidden_field() {
        let mut form = filled(WorkoutType::Cycling, "27", "95", "523");
        form.set(Field::Cadence, "not a number".into());
        assert!(form.parse().is_ok());
    }

    #[test]
    fn test_parse_rejects_bad_numbers() {
        for (distance, duration, extra) in [
            ("-1", "24", "178"),
            ("abc", "24", "178"),
            ("", "24", "178"),
            ("5", "inf", "178"),
            ("5", "NaN", "178"),
            ("5", "24", ""),
        ] {
            let form = filled(WorkoutType::Running, distance, duration, extra);
            assert!(
                matches!(form.parse(), Err(MaptyError::InvalidWorkoutInput { .. })),
                "{distance}/{duration}/{extra} should be rejected"
            );
        }
    }

    #[test]
    fn test_empty_elevation_reads_as_zero() {
        let form = filled(WorkoutType::Cycling, "27", "95", "");
        assert_eq!(
            form.parse(),
            Ok(WorkoutInput::Cycling {
                distance_km: 27.0,
                duration_min: 95.0,
                elevation_gain_m: 0.0,
            })
        );

        // the same empty value is still not a valid distance or cadence
        let form = filled(WorkoutType::Cycling, "", "95", "");
        assert_eq!(form.parse(), Err(MaptyError::InvalidWorkoutInput { field: "distance" }));
        let form = filled(WorkoutType::Running, "5", "24", "  ");
        assert_eq!(form.parse(), Err(MaptyError::InvalidWorkoutInput { field: "cadence" }));
    }

    #[test]
    fn test_clear_empties_all_numeric_fields() {
        let mut form = filled(WorkoutType::Running, "5.2", "24", "178");
        form.set(Field::Elevation, "12".into());
        form.clear();

        for field in [Field::Distance, Field::Duration, Field::Cadence, Field::Elevation] {
            assert_eq!(form.get(field), "");
        }
        assert_eq!(form.kind, WorkoutType::Running);
    }
}
