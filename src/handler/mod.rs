pub mod auth_handler;
pub mod banner_handler;
pub mod blog_handler;
pub mod booking_handler;
pub mod gallery_handler;
pub mod proposal_handler;
pub mod restaurant_handler;
pub mod room_handler;
pub mod testimonial_handler;
pub mod upload_handler;
