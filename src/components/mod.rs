mod workout_entry;
mod workout_list;

pub use workout_entry::WorkoutEntry;
pub use workout_list::WorkoutList;
