//! Toast stack bound to the store's notification queue.

use crate::core::store::{self, AppStore, ToastTimers};
use crate::models::Toast;
use gloo::timers::callback::Timeout;
use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;
use yew::prelude::*;
use yewdux::prelude::{Dispatch, use_selector};

/// Auto-dismiss delay.
const TOAST_TTL_MS: u32 = 4000;

/// Renders the store's toast queue; each toast expires on its own timer.
#[function_component(ToastHost)]
pub(crate) fn toast_host() -> Html {
    let toasts = use_selector(|store: &AppStore| store.toasts.items.clone());
    let timers = use_mut_ref(BTreeMap::<u64, Timeout>::new);
    let on_dismiss = Callback::from(|id: u64| {
        Dispatch::<AppStore>::new().reduce_mut(|state| store::dismiss_toast(state, id));
    });
    {
        let on_dismiss = on_dismiss.clone();
        let timers = timers.clone();
        use_effect_with_deps(
            move |list: &Rc<Vec<Toast>>| {
                let armed: BTreeSet<u64> = timers.borrow().keys().copied().collect();
                let ToastTimers { arm, release } = store::toast_timer_changes(&armed, list);
                let mut slots = timers.borrow_mut();
                for id in release {
                    slots.remove(&id);
                }
                for id in arm {
                    let on_dismiss = on_dismiss.clone();
                    // Dismiss after the callback returns; the store update drops this timer.
                    let expire = move || {
                        yew::platform::spawn_local(async move { on_dismiss.emit(id) });
                    };
                    slots.insert(id, Timeout::new(TOAST_TTL_MS, expire));
                }
                || ()
            },
            toasts.clone(),
        );
    }
    use_effect_with_deps(move |_| move || timers.borrow_mut().clear(), ());

    html! {
        <div class="toast-host" aria-live="polite" aria-atomic="true">
            {for toasts.iter().map(|toast| render_toast(toast, on_dismiss.clone()))}
        </div>
    }
}

fn render_toast(toast: &Toast, on_dismiss: Callback<u64>) -> Html {
    let id = toast.id;
    let on_close = Callback::from(move |_| on_dismiss.emit(id));
    html! {
        <div class={classes!("toast", toast.kind.class())} role="status">
            <span>{toast.message.clone()}</span>
            <button class="ghost" aria-label="Dismiss" onclick={on_close}>{"\u{2715}"}</button>
        </div>
    }
}
