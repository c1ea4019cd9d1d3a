mod health;
mod verify;

pub use health::health_handler;
pub use verify::{verify_handler, verify_image_handler};
