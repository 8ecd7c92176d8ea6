use leptos::*;

use crate::app::{report, AppTracker};
use crate::form::{Field, WorkoutForm};

fn row_class(visible: bool) -> &'static str {
    if visible {
        "form__row"
    } else {
        "form__row form__row--hidden"
    }
}

/// The entry form, shown after a map click.
#[component]
pub fn WorkoutEntry(
    tracker: AppTracker,
    revision: ReadSignal<u32>,
    set_revision: WriteSignal<u32>,
    distance_ref: NodeRef<html::Input>,
    on_submit: impl Fn() + Copy + 'static,
) -> impl IntoView {
    let form = move || -> WorkoutForm {
        revision.get();
        tracker.with_value(|t| t.form().clone())
    };

    let set_field = move |field: Field, ev: ev::Event| {
        let value = event_target_value(&ev);
        tracker.update_value(|t| t.form_mut().set(field, value));
    };

    let on_type_change = move |ev: ev::Event| {
        let value = event_target_value(&ev);
        let mut outcome = Ok(());
        tracker.update_value(|t| outcome = t.form_mut().select_type(&value));
        match outcome {
            Ok(()) => set_revision.update(|r| *r = r.wrapping_add(1)),
            Err(e) => report(&e),
        }
    };

    view! {
        <form
            class=move || if form().is_visible() { "form" } else { "form hidden" }
            on:submit=move |ev: ev::SubmitEvent| {
                ev.prevent_default();
                on_submit();
            }
        >
            <div class="form__row">
                <label class="form__label">"Type"</label>
                <select
                    class="form__input form__input--type"
                    on:change=on_type_change
                    prop:value=move || form().kind.as_str()
                >
                    <option value="running">"Running"</option>
                    <option value="cycling">"Cycling"</option>
                </select>
            </div>
            <div class="form__row">
                <label class="form__label">"Distance"</label>
                <input
                    class="form__input form__input--distance"
                    placeholder="km"
                    node_ref=distance_ref
                    on:input=move |ev| set_field(Field::Distance, ev)
                    prop:value=move || form().distance
                />
            </div>
            <div class="form__row">
                <label class="form__label">"Duration"</label>
                <input
                    class="form__input form__input--duration"
                    placeholder="min"
                    on:input=move |ev| set_field(Field::Duration, ev)
                    prop:value=move || form().duration
                />
            </div>
            <div class=move || row_class(form().shows_cadence())>
                <label class="form__label">"Cadence"</label>
                <input
                    class="form__input form__input--cadence"
                    placeholder="step/min"
                    on:input=move |ev| set_field(Field::Cadence, ev)
                    prop:value=move || form().cadence
                />
            </div>
            <div class=move || row_class(form().shows_elevation())>
                <label class="form__label">"Elev Gain"</label>
                <input
                    class="form__input form__input--elevation"
                    placeholder="meters"
                    on:input=move |ev| set_field(Field::Elevation, ev)
                    prop:value=move || form().elevation
                />
            </div>
            <button class="form__btn">"OK"</button>
        </form>
    }
}
