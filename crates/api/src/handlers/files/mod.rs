mod disk;
mod handler;

pub use handler::serve_photo;
