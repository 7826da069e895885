//! Confirmation dialog for destructive actions.
//!
//! # Design
//! - Visibility and busy state come from a `ConfirmFlow` owned by the caller.
//! - Both buttons are disabled while the action is in flight.

use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct ConfirmModalProps {
    pub open: bool,
    pub title: AttrValue,
    pub message: AttrValue,
    #[prop_or(AttrValue::Static("Delete"))]
    pub confirm_label: AttrValue,
    #[prop_or_default]
    pub busy: bool,
    pub on_confirm: Callback<()>,
    pub on_cancel: Callback<()>,
}

#[function_component(ConfirmModal)]
pub(crate) fn confirm_modal(props: &ConfirmModalProps) -> Html {
    if !props.open {
        return html! {};
    }
    let on_confirm = props.on_confirm.reform(|_: MouseEvent| ());
    let on_cancel = props.on_cancel.reform(|_: MouseEvent| ());
    html! {
        <div class="modal-backdrop">
            <div class="modal" role="dialog" aria-modal="true">
                <h3>{props.title.clone()}</h3>
                <p>{props.message.clone()}</p>
                <div class="modal-actions">
                    <button class="ghost" disabled={props.busy} onclick={on_cancel}>{"Cancel"}</button>
                    <button class="danger" disabled={props.busy} onclick={on_confirm}>
                        {if props.busy { AttrValue::Static("Working...") } else { props.confirm_label.clone() }}
                    </button>
                </div>
            </div>
        </div>
    }
}
