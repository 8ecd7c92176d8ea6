use leptos::*;

use crate::app::AppTracker;
use crate::types::{Activity, Workout};

#[derive(Clone, Debug, PartialEq)]
pub struct Detail {
    pub icon: &'static str,
    pub value: String,
    pub unit: &'static str,
}

fn detail(icon: &'static str, value: String, unit: &'static str) -> Detail {
    Detail { icon, value, unit }
}

/// The four figures shown under a workout's title.
pub fn details(workout: &Workout) -> Vec<Detail> {
    let mut rows = vec![
        detail(workout.workout_type().icon(), workout.distance_km().to_string(), "km"),
        detail("⏱", workout.duration_min().to_string(), "min"),
    ];
    match *workout.activity() {
        Activity::Running { cadence_spm, pace_min_per_km } => {
            rows.push(detail("⚡️", format!("{:.1}", pace_min_per_km), "min/km"));
            rows.push(detail("🦶🏼", cadence_spm.to_string(), "spm"));
        }
        Activity::Cycling { elevation_gain_m, speed_km_per_hr } => {
            rows.push(detail("⚡️", format!("{:.1}", speed_km_per_hr), "km/h"));
            rows.push(detail("⛰", elevation_gain_m.to_string(), "m"));
        }
    }
    rows
}

/// Logged workouts, newest first. Clicking one pans the map to it.
#[component]
pub fn WorkoutList(
    tracker: AppTracker,
    revision: ReadSignal<u32>,
    on_select: impl Fn(String) + Copy + 'static,
) -> impl IntoView {
    let workouts = move || {
        revision.get();
        tracker.with_value(|t| t.workouts().iter().rev().cloned().collect::<Vec<_>>())
    };

    view! {
        <For
            each=workouts
            key=|w: &Workout| w.id().to_string()
            children=move |workout: Workout| {
                let id = workout.id().to_string();
                let data_id = id.clone();
                let class = format!("workout workout--{}", workout.workout_type());
                view! {
                    <li class=class data-id=data_id on:click=move |_| on_select(id.clone())>
                        <h2 class="workout__title">{workout.description().to_string()}</h2>
                        {details(&workout)
                            .into_iter()
                            .map(|d| view! {
                                <div class="workout__details">
                                    <span class="workout__icon">{d.icon}</span>
                                    <span class="workout__value">{d.value}</span>
                                    <span class="workout__unit">{d.unit}</span>
                                </div>
                            })
                            .collect_view()}
                    </li>
                }
            }
        />
    }
}
