pub mod auth_router;
pub mod banner_router;
pub mod blog_router;
pub mod booking_router;
pub mod gallery_router;
pub mod proposal_router;
pub mod restaurant_router;
pub mod room_router;
pub mod testimonial_router;
pub mod upload_router;
