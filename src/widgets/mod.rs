pub mod chrome;
pub mod client_list;
pub mod form;
pub mod form_widget;
pub mod status_bar;
