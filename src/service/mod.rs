pub mod banner_service;
pub mod room_service;
pub mod restaurant_service;
pub mod booking_service;
pub mod blog_service;
pub mod testimonial_service;
pub mod proposal_service;
pub mod gallery_service;
pub mod upload_service;
pub mod auth_service;
