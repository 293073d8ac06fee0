//! UI Components
//!
//! Reusable Leptos components.

mod delete_confirm_button;
mod field_input;
mod log_panel;
mod notice_bar;
mod resource_form;
mod resource_list;
mod resource_tabs;

pub use delete_confirm_button::DeleteConfirmButton;
pub use field_input::FieldInput;
pub use log_panel::LogPanel;
pub use notice_bar::NoticeBar;
pub use resource_form::{PersistFn, ResourceForm};
pub use resource_list::ResourceList;
pub use resource_tabs::ResourceTabs;
