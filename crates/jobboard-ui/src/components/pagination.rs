//! Windowed page selector with previous/next controls.

use crate::core::logic::PageToken;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct PaginationProps {
    pub tokens: Vec<PageToken>,
    pub current: u32,
    pub total: u32,
    pub on_select: Callback<u32>,
}

#[function_component(Pagination)]
pub(crate) fn pagination(props: &PaginationProps) -> Html {
    if props.total <= 1 {
        return html! {};
    }
    let jump = |page: u32| {
        let on_select = props.on_select.clone();
        Callback::from(move |_: MouseEvent| on_select.emit(page))
    };
    html! {
        <nav class="pagination" aria-label="Pagination">
            <button
                class="ghost"
                disabled={props.current <= 1}
                onclick={jump(props.current.saturating_sub(1))}
            >{"Previous"}</button>
            {for props.tokens.iter().map(|token| match *token {
                PageToken::Page(page) => html! {
                    <button
                        class={classes!("page", (page == props.current).then_some("active"))}
                        aria-current={(page == props.current).then_some("page")}
                        onclick={jump(page)}
                    >{page}</button>
                },
                PageToken::Ellipsis => html! { <span class="ellipsis">{"..."}</span> },
            })}
            <button
                class="ghost"
                disabled={props.current >= props.total}
                onclick={jump(props.current + 1)}
            >{"Next"}</button>
        </nav>
    }
}
