use shared::palette::{contrast_text_color, lighten};
use shared::Category;
use yew::prelude::*;

use crate::styles;

#[derive(Properties, PartialEq)]
pub struct ResultModalProps {
    pub winner: Category,
    /// Removing is offered only while the wheel keeps at least two slices.
    pub can_remove: bool,
    pub on_close: Callback<()>,
    pub on_spin_again: Callback<()>,
    pub on_remove: Callback<String>,
}

#[function_component(ResultModal)]
pub fn result_modal(props: &ResultModalProps) -> Html {
    let winner = &props.winner;
    let banner_style = format!(
        "background: linear-gradient(135deg, {}, {}); color: {};",
        winner.color,
        lighten(&winner.color, 15.0),
        contrast_text_color(&winner.color)
    );

    let close = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };
    let spin_again = {
        let on_spin_again = props.on_spin_again.clone();
        Callback::from(move |_: MouseEvent| on_spin_again.emit(()))
    };
    let remove = {
        let on_remove = props.on_remove.clone();
        let id = winner.id.clone();
        Callback::from(move |_: MouseEvent| on_remove.emit(id.clone()))
    };

    html! {
        <div class={styles::MODAL_OVERLAY} onclick={close.clone()}>
            <div
                class={classes!(styles::MODAL_PANEL, "text-center")}
                onclick={Callback::from(|e: MouseEvent| e.stop_propagation())}
            >
                <p class={styles::TEXT_SMALL}>{"The wheel has spoken"}</p>
                <div
                    class="my-6 px-6 py-5 rounded-xl shadow-lg text-3xl font-bold break-words animate-bounce"
                    style={banner_style}
                >
                    {winner.name.clone()}
                </div>
                <div class="flex flex-wrap justify-center gap-3">
                    <button class={styles::BUTTON_PRIMARY} onclick={spin_again}>
                        {"Spin again"}
                    </button>
                    <button class={styles::BUTTON_DANGER} onclick={remove} disabled={!props.can_remove}>
                        {"Remove & close"}
                    </button>
                    <button class={styles::BUTTON_SECONDARY} onclick={close}>
                        {"Close"}
                    </button>
                </div>
            </div>
        </div>
    }
}
