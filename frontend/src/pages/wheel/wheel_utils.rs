use std::cell::RefCell;
use std::rc::Rc;

use gloo_render::{request_animation_frame, AnimationFrame};
use shared::{FrameState, WheelEngine};
use yew::prelude::*;

pub type SharedEngine = Rc<RefCell<WheelEngine>>;
pub type FrameSlot = Rc<RefCell<Option<AnimationFrame>>>;

pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

/// Requests the next animation frame and keeps requesting until the engine
/// reports the spin is over. Dropping whatever sits in `slot` cancels the loop.
pub fn schedule_frame(engine: SharedEngine, slot: FrameSlot, rotation: UseStateHandle<f64>) {
    let next_slot = slot.clone();
    let handle = request_animation_frame(move |_| {
        let state = engine.borrow_mut().tick(now_ms());
        rotation.set(state.rotation());
        match state {
            FrameState::Spinning { .. } => schedule_frame(engine, next_slot, rotation),
            FrameState::Idle { .. } | FrameState::Finished { .. } => {
                next_slot.borrow_mut().take();
            }
        }
    });
    *slot.borrow_mut() = Some(handle);
}

#[derive(Properties, PartialEq)]
pub struct SpinButtonProps {
    pub is_spinning: bool,
    pub can_spin: bool,
    pub onclick: Callback<MouseEvent>,
}

#[function_component(SpinButton)]
pub fn spin_button(props: &SpinButtonProps) -> Html {
    let button_text = if props.is_spinning {
        "Spinning..."
    } else if !props.can_spin {
        "Add more categories"
    } else {
        "Spin"
    };

    let is_disabled = props.is_spinning || !props.can_spin;

    let button_class = if is_disabled {
        "bg-gradient-to-r from-gray-400 to-gray-500 opacity-75 cursor-not-allowed text-white"
    } else {
        "bg-gradient-to-r from-yellow-400 to-orange-500 hover:from-yellow-500 hover:to-orange-600 text-white shadow-lg hover:shadow-xl transform hover:-translate-y-0.5 active:translate-y-0"
    };

    let spin_icon_class = if props.is_spinning {
        "inline-block mr-2 animate-spin"
    } else {
        "hidden"
    };

    html! {
        <div class="relative">
            <div class={classes!("relative", "overflow-hidden", "rounded-full", "w-full", button_class)}>
                <button
                    onclick={props.onclick.clone()}
                    disabled={is_disabled}
                    class="relative w-full px-8 py-4 font-bold text-lg transition-all duration-300 border-2 border-transparent hover:border-white focus:outline-none focus:ring-4 focus:ring-yellow-300 focus:ring-opacity-50 bg-transparent"
                >
                    <div class="flex items-center justify-center relative z-10">
                        <svg class={spin_icon_class} xmlns="http://www.w3.org/2000/svg" width="20" height="20" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2">
                            <circle cx="12" cy="12" r="10" />
                            <path d="M12 6v6l4 2" />
                        </svg>
                        <span>{button_text}</span>
                    </div>
                </button>
            </div>
            <div class={classes!(
                "absolute", "inset-0", "rounded-full", "filter", "blur-md", "bg-yellow-400",
                "pointer-events-none", "transition-opacity", "duration-300",
                if is_disabled { "opacity-0" } else { "opacity-30" }
            )}></div>
        </div>
    }
}
