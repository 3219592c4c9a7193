mod form;
mod navbar;
mod page;
mod popup;
mod status_bar;
mod toast;

pub use form::FormWidget;
pub use navbar::NavbarWidget;
pub use page::{document_lines, PageWidget};
pub use popup::PopupWidget;
pub use status_bar::StatusBarWidget;
pub use toast::ToastWidget;
