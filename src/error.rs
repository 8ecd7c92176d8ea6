use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MaptyError {
    /// Geolocation was denied, failed, timed out or is not supported.
    #[error("Could not get your position")]
    PositionUnavailable { reason: String },

    #[error("Inputs have to be positive numbers!")]
    InvalidWorkoutInput { field: &'static str },

    #[error("Unknown workout type: {0}")]
    UnknownWorkoutType(String),

    #[error("Click on the map to choose where the workout happened")]
    NoPendingLocation,

    #[error("Map is not ready yet")]
    MapUnavailable,

    #[error("Map error: {0}")]
    Map(String),

    #[error("Workout {0} not found")]
    WorkoutNotFound(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl MaptyError {
    /// Errors that interrupt the user with a blocking alert.
    pub fn is_user_facing(&self) -> bool {
        !matches!(
            self,
            MaptyError::MapUnavailable | MaptyError::WorkoutNotFound(_) | MaptyError::Config(_)
        )
    }
}

impl From<serde_json::Error> for MaptyError {
    fn from(err: serde_json::Error) -> Self {
        MaptyError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, MaptyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alert_messages() {
        let err = MaptyError::InvalidWorkoutInput { field: "distance" };
        assert_eq!(err.to_string(), "Inputs have to be positive numbers!");

        let err = MaptyError::PositionUnavailable { reason: "denied".into() };
        assert_eq!(err.to_string(), "Could not get your position");
        assert!(err.is_user_facing());
    }

    #[test]
    fn test_internal_errors_are_not_alerted() {
        assert!(!MaptyError::MapUnavailable.is_user_facing());
        assert!(!MaptyError::WorkoutNotFound("42".into()).is_user_facing());
    }
}
