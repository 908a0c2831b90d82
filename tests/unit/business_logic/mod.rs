pub mod aggregation;
pub mod editor_form;
pub mod session_tokens;
