pub mod components;
pub mod config;
pub mod hooks;
pub mod pages;
pub mod storage;
pub mod styles;

use yew::prelude::*;

use crate::config::WheelConfig;
use crate::pages::wheel::WheelPage;

#[function_component(App)]
pub fn app() -> Html {
    let config = use_memo((), |_| WheelConfig::default());

    html! {
        <div class="min-h-screen w-full">
            <WheelPage config={(*config).clone()} />
        </div>
    }
}
