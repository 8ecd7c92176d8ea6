use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Local, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{MaptyError, Result};

/// A latitude/longitude pair in degrees.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum WorkoutType {
    #[default]
    Running,
    Cycling,
}

impl WorkoutType {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkoutType::Running => "running",
            WorkoutType::Cycling => "cycling",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            WorkoutType::Running => "Running",
            WorkoutType::Cycling => "Cycling",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            WorkoutType::Running => "🏃‍♂️",
            WorkoutType::Cycling => "🚴‍♀️",
        }
    }

    pub fn other(&self) -> Self {
        match self {
            WorkoutType::Running => WorkoutType::Cycling,
            WorkoutType::Cycling => WorkoutType::Running,
        }
    }
}

impl fmt::Display for WorkoutType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WorkoutType {
    type Err = MaptyError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "running" => Ok(WorkoutType::Running),
            "cycling" => Ok(WorkoutType::Cycling),
            other => Err(MaptyError::UnknownWorkoutType(other.to_string())),
        }
    }
}

/// Variant payload of a workout, with its derived metric computed up front.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Activity {
    Running {
        cadence_spm: f64,
        pace_min_per_km: f64,
    },
    Cycling {
        elevation_gain_m: f64,
        speed_km_per_hr: f64,
    },
}

impl Activity {
    pub fn workout_type(&self) -> WorkoutType {
        match self {
            Activity::Running { .. } => WorkoutType::Running,
            Activity::Cycling { .. } => WorkoutType::Cycling,
        }
    }
}

/// Validated numbers for a workout that has not been placed yet.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum WorkoutInput {
    Running {
        distance_km: f64,
        duration_min: f64,
        cadence_spm: f64,
    },
    Cycling {
        distance_km: f64,
        duration_min: f64,
        elevation_gain_m: f64,
    },
}

fn positive(field: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(MaptyError::InvalidWorkoutInput { field })
    }
}

fn finite(field: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(MaptyError::InvalidWorkoutInput { field })
    }
}

impl WorkoutInput {
    pub fn running(distance_km: f64, duration_min: f64, cadence_spm: f64) -> Result<Self> {
        Ok(WorkoutInput::Running {
            distance_km: positive("distance", distance_km)?,
            duration_min: positive("duration", duration_min)?,
            cadence_spm: positive("cadence", cadence_spm)?,
        })
    }

    /// Elevation may be negative (a downhill ride), it only has to be a number.
    pub fn cycling(distance_km: f64, duration_min: f64, elevation_gain_m: f64) -> Result<Self> {
        Ok(WorkoutInput::Cycling {
            distance_km: positive("distance", distance_km)?,
            duration_min: positive("duration", duration_min)?,
            elevation_gain_m: finite("elevation", elevation_gain_m)?,
        })
    }

    pub fn workout_type(&self) -> WorkoutType {
        match self {
            WorkoutInput::Running { .. } => WorkoutType::Running,
            WorkoutInput::Cycling { .. } => WorkoutType::Cycling,
        }
    }
}

/// One logged workout. Never changes after construction.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Workout {
    id: String,
    created_at: DateTime<Utc>,
    coords: GeoPoint,
    distance_km: f64,
    duration_min: f64,
    description: String,
    #[serde(flatten)]
    activity: Activity,
}

impl Workout {
    pub fn new(id: String, created_at: DateTime<Utc>, coords: GeoPoint, input: WorkoutInput) -> Self {
        let (distance_km, duration_min, activity) = match input {
            WorkoutInput::Running { distance_km, duration_min, cadence_spm } => (
                distance_km,
                duration_min,
                Activity::Running {
                    cadence_spm,
                    pace_min_per_km: duration_min / distance_km,
                },
            ),
            WorkoutInput::Cycling { distance_km, duration_min, elevation_gain_m } => (
                distance_km,
                duration_min,
                Activity::Cycling {
                    elevation_gain_m,
                    speed_km_per_hr: distance_km / (duration_min / 60.0),
                },
            ),
        };

        let description = describe(activity.workout_type(), &created_at, &Local);

        Self {
            id,
            created_at,
            coords,
            distance_km,
            duration_min,
            description,
            activity,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn coords(&self) -> GeoPoint {
        self.coords
    }

    pub fn distance_km(&self) -> f64 {
        self.distance_km
    }

    pub fn duration_min(&self) -> f64 {
        self.duration_min
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn activity(&self) -> &Activity {
        &self.activity
    }

    pub fn workout_type(&self) -> WorkoutType {
        self.activity.workout_type()
    }

    /// Minutes per kilometer, running only.
    pub fn pace(&self) -> Option<f64> {
        match self.activity {
            Activity::Running { pace_min_per_km, .. } => Some(pace_min_per_km),
            Activity::Cycling { .. } => None,
        }
    }

    /// Kilometers per hour, cycling only.
    pub fn speed(&self) -> Option<f64> {
        match self.activity {
            Activity::Cycling { speed_km_per_hr, .. } => Some(speed_km_per_hr),
            Activity::Running { .. } => None,
        }
    }
}

/// "Running on April 14", on the calendar of `tz` (the browser's zone in practice).
pub fn describe<Tz: TimeZone>(kind: WorkoutType, created_at: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz::Offset: fmt::Display,
{
    let local = created_at.with_timezone(tz);
    format!("{} on {}", kind.label(), local.format("%B %-d"))
}

/// Short id: the last ten digits of the creation time in ms plus a sequence number.
pub fn workout_id(created_at: &DateTime<Utc>, seq: u64) -> String {
    let millis = created_at.timestamp_millis().rem_euclid(10_000_000_000);
    format!("{:010}-{}", millis, seq)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn noon(month: u32, day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, month, day, 12, 0, 0).unwrap()
    }

    fn place(input: WorkoutInput) -> Workout {
        Workout::new("1".into(), noon(4, 14), GeoPoint::new(39.7, -105.0), input)
    }

    #[test]
    fn test_running_pace() {
        for (distance, duration) in [(5.2, 24.0), (10.0, 50.0), (0.4, 1.5), (42.195, 180.0)] {
            let workout = place(WorkoutInput::running(distance, duration, 170.0).unwrap());
            assert_eq!(workout.pace(), Some(duration / distance));
            assert_eq!(workout.speed(), None);
        }
    }

    #[test]
    fn test_cycling_speed() {
        for (distance, duration) in [(27.0, 95.0), (100.0, 240.0), (3.0, 7.0)] {
            let workout = place(WorkoutInput::cycling(distance, duration, 0.0).unwrap());
            assert_eq!(workout.speed(), Some(distance / (duration / 60.0)));
            assert_eq!(workout.pace(), None);
        }
    }

    #[test]
    fn test_rejects_non_positive_distance_and_duration() {
        assert_eq!(
            WorkoutInput::running(-1.0, 24.0, 178.0),
            Err(MaptyError::InvalidWorkoutInput { field: "distance" })
        );
        assert_eq!(
            WorkoutInput::cycling(27.0, 0.0, 523.0),
            Err(MaptyError::InvalidWorkoutInput { field: "duration" })
        );
        assert!(WorkoutInput::running(f64::NAN, 24.0, 178.0).is_err());
        assert!(WorkoutInput::cycling(f64::INFINITY, 24.0, 10.0).is_err());
    }

    #[test]
    fn test_cadence_must_be_positive_number() {
        assert!(WorkoutInput::running(5.0, 24.0, f64::NAN).is_err());
        assert!(WorkoutInput::running(5.0, 24.0, 0.0).is_err());
    }

    #[test]
    fn test_elevation_only_needs_to_be_finite() {
        assert!(WorkoutInput::cycling(27.0, 95.0, -120.0).is_ok());
        assert_eq!(
            WorkoutInput::cycling(27.0, 95.0, f64::NAN),
            Err(MaptyError::InvalidWorkoutInput { field: "elevation" })
        );
    }

    #[test]
    fn test_description() {
        assert_eq!(
            describe(WorkoutType::Running, &noon(4, 14), &Utc),
            "Running on April 14"
        );
        assert_eq!(
            describe(WorkoutType::Cycling, &noon(12, 3), &Utc),
            "Cycling on December 3"
        );
    }

    #[test]
    fn test_description_follows_the_calendar_of_the_zone() {
        let auckland = FixedOffset::east_opt(13 * 3600).unwrap();
        let honolulu = FixedOffset::west_opt(10 * 3600).unwrap();
        let late = Utc.with_ymd_and_hms(2024, 4, 14, 23, 30, 0).unwrap();

        assert_eq!(describe(WorkoutType::Running, &late, &auckland), "Running on April 15");
        assert_eq!(describe(WorkoutType::Running, &noon(4, 14), &honolulu), "Running on April 14");
        assert_eq!(describe(WorkoutType::Running, &late, &Utc), "Running on April 14");
    }

    #[test]
    fn test_workout_carries_local_description() {
        let workout = place(WorkoutInput::running(5.2, 24.0, 178.0).unwrap());
        assert_eq!(
            workout.description(),
            describe(WorkoutType::Running, &noon(4, 14), &Local)
        );
    }

    #[test]
    fn test_workout_type_parsing() {
        assert_eq!("running".parse::<WorkoutType>(), Ok(WorkoutType::Running));
        assert_eq!("cycling".parse::<WorkoutType>(), Ok(WorkoutType::Cycling));
        assert_eq!(
            "swimming".parse::<WorkoutType>(),
            Err(MaptyError::UnknownWorkoutType("swimming".into()))
        );
        assert_eq!(WorkoutType::Running.other(), WorkoutType::Cycling);
    }

    #[test]
    fn test_workout_ids_are_unique_within_a_millisecond() {
        let at = noon(4, 14);
        let a = workout_id(&at, 1);
        let b = workout_id(&at, 2);
        assert_ne!(a, b);
        assert!(a.starts_with(&format!("{:010}", at.timestamp_millis() % 10_000_000_000)));
    }

    #[test]
    fn test_serialized_shape() {
        let workout = place(WorkoutInput::cycling(27.0, 95.0, 523.0).unwrap());
        let json = serde_json::to_value(&workout).unwrap();
        assert_eq!(json["type"], "cycling");
        assert_eq!(json["elevation_gain_m"], 523.0);
    }
}
