//! File input restricted to resume formats.

use crate::features::resume::logic::RESUME_EXTENSIONS;
use web_sys::{File, HtmlInputElement};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct ResumePickerProps {
    pub label: AttrValue,
    pub on_pick: Callback<File>,
    #[prop_or_default]
    pub error: Option<AttrValue>,
    #[prop_or_default]
    pub disabled: bool,
}

#[function_component(ResumePicker)]
pub(crate) fn resume_picker(props: &ResumePickerProps) -> Html {
    let on_pick = props.on_pick.clone();
    let onchange = Callback::from(move |event: Event| {
        let Some(input) = event.target_dyn_into::<HtmlInputElement>() else {
            return;
        };
        if let Some(file) = input.files().and_then(|files| files.get(0)) {
            on_pick.emit(file);
        }
        // Allow picking the same file again after a rejection.
        input.set_value("");
    });
    html! {
        <label class="resume-picker">
            <span>{props.label.clone()}</span>
            <input
                type="file"
                accept={RESUME_EXTENSIONS.join(",")}
                disabled={props.disabled}
                onchange={onchange}
            />
            {props.error.clone().map(|message| html! {
                <p class="field-error">{message}</p>
            }).unwrap_or_default()}
        </label>
    }
}

/// Byte size of a picked file.
pub(crate) fn file_size(file: &File) -> u64 {
    let size = file.size();
    if size.is_finite() && size > 0.0 {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let bytes = size as u64;
        bytes
    } else {
        0
    }
}
