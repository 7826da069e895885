//! Search box for the job list toolbar.
//!
//! # Design
//! - Controlled by the caller; every keystroke is emitted.
//! - Debouncing belongs to the list state, not the widget.

use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct SearchInputProps {
    pub value: AttrValue,
    #[prop_or_default]
    pub placeholder: Option<AttrValue>,
    #[prop_or_default]
    pub on_input: Callback<String>,
}

#[function_component(SearchInput)]
pub(crate) fn search_input(props: &SearchInputProps) -> Html {
    let on_input = props.on_input.clone();
    let on_clear = {
        let on_input = props.on_input.clone();
        Callback::from(move |_: MouseEvent| on_input.emit(String::new()))
    };
    html! {
        <label class="search-input">
            <span class="icon-search" aria-hidden="true"></span>
            <input
                type="search"
                placeholder={props.placeholder.clone()}
                aria-label="Search jobs"
                value={props.value.clone()}
                oninput={Callback::from(move |event: InputEvent| {
                    if let Some(input) = event.target_dyn_into::<web_sys::HtmlInputElement>() {
                        on_input.emit(input.value());
                    }
                })}
            />
            if !props.value.is_empty() {
                <button class="ghost" aria-label="Clear search" onclick={on_clear}>{"\u{2715}"}</button>
            }
        </label>
    }
}
