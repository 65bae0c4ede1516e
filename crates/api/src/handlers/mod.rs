mod state;
mod photos;
mod admin;
pub mod files;

pub use state::AppState;
pub use photos::{upload_photo, list_photos, delete_photo, delete_all_photos};
pub use admin::admin_login;
pub use files::serve_photo;
