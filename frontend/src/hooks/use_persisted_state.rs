use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::EventListener;
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared::{PersistedCell, StoreUpdate};
use wasm_bindgen::JsCast;
use web_sys::{window, StorageEvent};
use yew::prelude::*;

use crate::storage::AppStorage;

#[derive(Clone)]
pub struct PersistedState<T> {
    pub value: T,
    pub set: Callback<StoreUpdate<T>>,
}

impl<T: PartialEq> PartialEq for PersistedState<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value && self.set == other.set
    }
}

/// State that survives reloads. Writes go to `localStorage` only when the
/// serialized value changes, and changes made in other tabs flow back in.
#[hook]
pub fn use_persisted_state<T, F>(key: &'static str, initial: T, normalize: F) -> PersistedState<T>
where
    T: Serialize + DeserializeOwned + Clone + PartialEq + 'static,
    F: Fn(T) -> T + 'static,
{
    let cell: Rc<RefCell<PersistedCell<T, AppStorage>>> = use_mut_ref(move || {
        PersistedCell::with_normalizer(AppStorage::local(), key, initial, normalize)
    });
    let value = {
        let cell = cell.clone();
        use_state_eq(move || cell.borrow().get().clone())
    };

    let set = {
        let cell = cell.clone();
        let value = value.clone();
        use_callback((), move |update: StoreUpdate<T>, _| {
            let mut cell = cell.borrow_mut();
            cell.set(update);
            value.set(cell.get().clone());
        })
    };

    {
        let cell = cell.clone();
        let value = value.clone();
        use_effect_with((), move |_| {
            let listener = window().map(|window| {
                EventListener::new(&window, "storage", move |event| {
                    let Some(event) = event.dyn_ref::<StorageEvent>() else {
                        return;
                    };
                    if event.key().as_deref() != Some(key) {
                        return;
                    }
                    let mut cell = cell.borrow_mut();
                    if cell.sync_external(event.new_value().as_deref()) {
                        value.set(cell.get().clone());
                    }
                })
            });

            move || drop(listener)
        });
    }

    PersistedState {
        value: (*value).clone(),
        set,
    }
}
