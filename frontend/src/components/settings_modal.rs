use shared::constants::{MAX_CATEGORIES, MAX_NAME_LENGTH, MAX_TITLE_LENGTH, MIN_CATEGORIES};
use shared::editor::{
    add_category, delete_category, recolor_category, rename_category, reset_to_defaults,
    validate_title,
};
use shared::{Category, EditorError};
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::styles;

#[derive(Properties, PartialEq)]
pub struct SettingsModalProps {
    pub title: String,
    pub categories: Vec<Category>,
    pub on_title_change: Callback<String>,
    pub on_categories_change: Callback<Vec<Category>>,
    pub on_close: Callback<()>,
}

/// Applies an editor result: valid lists go upstream, failures show inline.
fn apply(
    result: Result<Vec<Category>, EditorError>,
    on_change: &Callback<Vec<Category>>,
    error: &UseStateHandle<Option<String>>,
) -> bool {
    match result {
        Ok(next) => {
            error.set(None);
            on_change.emit(next);
            true
        }
        Err(e) => {
            error.set(Some(e.to_string()));
            false
        }
    }
}

#[function_component(SettingsModal)]
pub fn settings_modal(props: &SettingsModalProps) -> Html {
    let error = use_state(|| None::<String>);
    let new_name = use_state(String::new);

    let close = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    let on_title = {
        let on_title_change = props.on_title_change.clone();
        let error = error.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            match validate_title(&input.value()) {
                Ok(title) => {
                    error.set(None);
                    on_title_change.emit(title);
                }
                Err(e) => error.set(Some(e.to_string())),
            }
        })
    };

    let on_new_name_input = {
        let new_name = new_name.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            new_name.set(input.value());
        })
    };

    let on_add = {
        let categories = props.categories.clone();
        let on_change = props.on_categories_change.clone();
        let error = error.clone();
        let new_name = new_name.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if apply(add_category(&categories, &new_name), &on_change, &error) {
                new_name.set(String::new());
            }
        })
    };

    let on_reset = {
        let on_change = props.on_categories_change.clone();
        let error = error.clone();
        Callback::from(move |_: MouseEvent| {
            apply(Ok(reset_to_defaults()), &on_change, &error);
        })
    };

    let at_min = props.categories.len() <= MIN_CATEGORIES;
    let at_max = props.categories.len() >= MAX_CATEGORIES;

    let rows = props.categories.iter().map(|category| {
        let on_rename = {
            let categories = props.categories.clone();
            let on_change = props.on_categories_change.clone();
            let error = error.clone();
            let id = category.id.clone();
            Callback::from(move |e: Event| {
                let input: HtmlInputElement = e.target_unchecked_into();
                if !apply(rename_category(&categories, &id, &input.value()), &on_change, &error) {
                    if let Some(current) = categories.iter().find(|c| c.id == id) {
                        input.set_value(&current.name);
                    }
                }
            })
        };
        let on_recolor = {
            let categories = props.categories.clone();
            let on_change = props.on_categories_change.clone();
            let error = error.clone();
            let id = category.id.clone();
            Callback::from(move |e: InputEvent| {
                let input: HtmlInputElement = e.target_unchecked_into();
                apply(recolor_category(&categories, &id, &input.value()), &on_change, &error);
            })
        };
        let on_delete = {
            let categories = props.categories.clone();
            let on_change = props.on_categories_change.clone();
            let error = error.clone();
            let id = category.id.clone();
            Callback::from(move |_: MouseEvent| {
                apply(delete_category(&categories, &id), &on_change, &error);
            })
        };

        html! {
            <li key={category.id.clone()} class="flex items-center gap-2">
                <input
                    type="color"
                    class={styles::COLOR_INPUT}
                    value={category.color.clone()}
                    oninput={on_recolor}
                    aria-label="Category color"
                />
                <input
                    type="text"
                    class={styles::INPUT}
                    value={category.name.clone()}
                    maxlength={MAX_NAME_LENGTH.to_string()}
                    onchange={on_rename}
                    aria-label="Category name"
                />
                <button
                    class={styles::BUTTON_DANGER}
                    onclick={on_delete}
                    disabled={at_min}
                    title="Remove category"
                >
                    {"✕"}
                </button>
            </li>
        }
    });

    html! {
        <div class={styles::MODAL_OVERLAY} onclick={close.clone()}>
            <div
                class={styles::MODAL_PANEL}
                onclick={Callback::from(|e: MouseEvent| e.stop_propagation())}
            >
                <div class="flex items-center justify-between mb-6">
                    <h3 class={styles::TEXT_H3}>{"Wheel settings"}</h3>
                    <button class={styles::BUTTON_ICON} onclick={close.clone()} aria-label="Close">
                        {"✕"}
                    </button>
                </div>

                if let Some(message) = (*error).clone() {
                    <div class={classes!(styles::CARD_ERROR, "mb-4")}>{message}</div>
                }

                <div class="mb-6">
                    <label class={styles::TEXT_LABEL} for="wheel-title">{"Title"}</label>
                    <input
                        id="wheel-title"
                        type="text"
                        class={classes!(styles::INPUT, "mt-2")}
                        value={props.title.clone()}
                        maxlength={MAX_TITLE_LENGTH.to_string()}
                        onchange={on_title}
                    />
                </div>

                <div class="mb-2 flex items-center justify-between">
                    <span class={styles::TEXT_LABEL}>{"Categories"}</span>
                    <span class={styles::TEXT_SMALL}>
                        {format!("{} / {}", props.categories.len(), MAX_CATEGORIES)}
                    </span>
                </div>
                <ul class="space-y-2 mb-4">
                    { for rows }
                </ul>

                <form class="flex gap-2 mb-1" onsubmit={on_add}>
                    <input
                        type="text"
                        class={styles::INPUT}
                        placeholder="New category"
                        value={(*new_name).clone()}
                        maxlength={MAX_NAME_LENGTH.to_string()}
                        oninput={on_new_name_input}
                        disabled={at_max}
                    />
                    <button type="submit" class={styles::BUTTON_PRIMARY} disabled={at_max}>
                        {"Add"}
                    </button>
                </form>
                <p class={styles::TEXT_HINT}>
                    {format!("Between {} and {} categories, names up to {} characters.", MIN_CATEGORIES, MAX_CATEGORIES, MAX_NAME_LENGTH)}
                </p>

                <div class="mt-6 flex justify-between">
                    <button class={styles::BUTTON_SECONDARY} onclick={on_reset}>
                        {"Reset to defaults"}
                    </button>
                    <button class={styles::BUTTON_PRIMARY} onclick={close}>
                        {"Done"}
                    </button>
                </div>
            </div>
        </div>
    }
}
