mod wheel_canvas;
mod wheel_utils;

use log::warn;
use shared::category::default_categories;
use shared::constants::MIN_CATEGORIES;
use shared::editor::delete_category;
use shared::validation::{sanitize_categories, sanitize_title};
use shared::{Category, StoreUpdate, WheelEngine};
use web_sys::window;
use yew::prelude::*;

use crate::components::{ResultModal, SettingsModal};
use crate::config::WheelConfig;
use crate::hooks::use_persisted_state;
use crate::styles;

use wheel_canvas::WheelCanvas;
use wheel_utils::{now_ms, schedule_frame, FrameSlot, SharedEngine, SpinButton};

#[derive(Properties, PartialEq)]
pub struct WheelPageProps {
    pub config: WheelConfig,
}

#[function_component(WheelPage)]
pub fn wheel_page(props: &WheelPageProps) -> Html {
    let config = &props.config;
    let default_title = config.default_title;

    let categories = use_persisted_state(
        config.categories_key,
        default_categories(),
        sanitize_categories,
    );
    let title = use_persisted_state(
        config.title_key,
        default_title.to_string(),
        move |title: String| sanitize_title(title, default_title),
    );

    let rotation = use_state(|| 0.0_f64);
    let is_spinning = use_state(|| false);
    let winner = use_state(|| None::<Category>);
    let show_settings = use_state(|| false);

    let engine: SharedEngine = {
        let is_spinning = is_spinning.clone();
        let winner = winner.clone();
        let initial = categories.value.clone();
        use_mut_ref(move || {
            let started = is_spinning.clone();
            WheelEngine::new(initial)
                .on_spin_start(move || started.set(true))
                .on_spin_end(move |category| {
                    is_spinning.set(false);
                    winner.set(Some(category.clone()));
                })
        })
    };
    let frame: FrameSlot = use_mut_ref(|| None);

    // Edits made mid-spin (e.g. from another tab) land once the wheel stops.
    {
        let engine = engine.clone();
        use_effect_with(
            (categories.value.clone(), *is_spinning),
            move |(categories, spinning)| {
                if !*spinning {
                    engine.borrow_mut().set_categories(categories.clone());
                }
                || ()
            },
        );
    }

    {
        let engine = engine.clone();
        let frame = frame.clone();
        use_effect_with((), move |_| {
            move || {
                frame.borrow_mut().take();
                engine.borrow_mut().teardown();
            }
        });
    }

    use_effect_with(title.value.clone(), |title| {
        if let Some(document) = window().and_then(|w| w.document()) {
            document.set_title(title);
        }
        || ()
    });

    let start_spin = {
        let engine = engine.clone();
        let frame = frame.clone();
        let rotation = rotation.clone();
        let winner = winner.clone();
        Callback::from(move |_: ()| {
            let plan = engine.borrow_mut().spin(now_ms());
            if plan.is_some() {
                winner.set(None);
                schedule_frame(engine.clone(), frame.clone(), rotation.clone());
            }
        })
    };

    let on_spin_click = {
        let start_spin = start_spin.clone();
        Callback::from(move |_: MouseEvent| start_spin.emit(()))
    };

    let open_settings = {
        let show_settings = show_settings.clone();
        Callback::from(move |_: MouseEvent| show_settings.set(true))
    };
    let close_settings = {
        let show_settings = show_settings.clone();
        Callback::from(move |_: ()| show_settings.set(false))
    };

    let on_title_change = {
        let set = title.set.clone();
        Callback::from(move |next: String| set.emit(StoreUpdate::Value(next)))
    };
    let on_categories_change = {
        let set = categories.set.clone();
        Callback::from(move |next: Vec<Category>| set.emit(StoreUpdate::Value(next)))
    };

    let close_result = {
        let winner = winner.clone();
        Callback::from(move |_: ()| winner.set(None))
    };
    let remove_winner = {
        let set = categories.set.clone();
        let winner = winner.clone();
        Callback::from(move |id: String| {
            set.emit(StoreUpdate::with(move |current: &Vec<Category>| {
                match delete_category(current, &id) {
                    Ok(next) => next,
                    Err(e) => {
                        warn!("Could not remove winner: {}", e);
                        current.clone()
                    }
                }
            }));
            winner.set(None);
        })
    };

    let has_enough = categories.value.len() >= MIN_CATEGORIES;
    let shown = engine.borrow().display_categories(&categories.value);

    html! {
        <div class={classes!(styles::CONTAINER, "py-10")}>
            <div class={styles::CARD}>
                <div class="flex items-start justify-between gap-4 mb-6">
                    <h1 class={classes!(styles::TEXT_H1, "break-words")}>{title.value.clone()}</h1>
                    <button
                        class={styles::BUTTON_ICON}
                        onclick={open_settings}
                        disabled={*is_spinning}
                        aria-label="Wheel settings"
                        title="Wheel settings"
                    >
                        <svg xmlns="http://www.w3.org/2000/svg" class="h-6 w-6" fill="none" viewBox="0 0 24 24" stroke="currentColor" stroke-width="2">
                            <path stroke-linecap="round" stroke-linejoin="round" d="M10.325 4.317c.426-1.756 2.924-1.756 3.35 0a1.724 1.724 0 002.573 1.066c1.543-.94 3.31.826 2.37 2.37a1.724 1.724 0 001.065 2.572c1.756.426 1.756 2.924 0 3.35a1.724 1.724 0 00-1.066 2.573c.94 1.543-.826 3.31-2.37 2.37a1.724 1.724 0 00-2.572 1.065c-.426 1.756-2.924 1.756-3.35 0a1.724 1.724 0 00-2.573-1.066c-1.543.94-3.31-.826-2.37-2.37a1.724 1.724 0 00-1.065-2.572c-1.756-.426-1.756-2.924 0-3.35a1.724 1.724 0 001.066-2.573c-.94-1.543.826-3.31 2.37-2.37.996.608 2.296.07 2.572-1.065z" />
                            <path stroke-linecap="round" stroke-linejoin="round" d="M15 12a3 3 0 11-6 0 3 3 0 016 0z" />
                        </svg>
                    </button>
                </div>

                <div class="flex justify-center mb-8">
                    <WheelCanvas
                        categories={shown}
                        rotation={*rotation}
                        is_spinning={*is_spinning}
                        size={config.canvas_size}
                    />
                </div>

                <div class="max-w-xs mx-auto">
                    <SpinButton is_spinning={*is_spinning} can_spin={has_enough} onclick={on_spin_click} />
                </div>
                <p class={classes!(styles::TEXT_SMALL, "text-center", "mt-4")}>
                    {format!("{} categories on the wheel", categories.value.len())}
                </p>
            </div>

            if let Some(category) = (*winner).clone() {
                <ResultModal
                    winner={category}
                    can_remove={categories.value.len() > MIN_CATEGORIES}
                    on_close={close_result}
                    on_spin_again={start_spin.clone()}
                    on_remove={remove_winner}
                />
            }

            if *show_settings && !*is_spinning {
                <SettingsModal
                    title={title.value.clone()}
                    categories={categories.value.clone()}
                    on_title_change={on_title_change}
                    on_categories_change={on_categories_change}
                    on_close={close_settings}
                />
            }
        </div>
    }
}
