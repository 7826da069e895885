pub(crate) mod confirm_modal;
pub(crate) mod empty_state;
pub(crate) mod guard;
pub(crate) mod job_card;
pub(crate) mod navbar;
pub(crate) mod pagination;
pub(crate) mod resume_picker;
pub(crate) mod search_input;
pub(crate) mod toast;
