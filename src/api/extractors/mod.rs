//! Custom request extractors.

mod login_form;
mod validated_json;

pub use login_form::LoginForm;
pub use validated_json::ValidatedJson;
