pub mod admin_panel;
pub mod landing;
pub mod login_form;
