pub mod banner;
pub mod room;
pub mod restaurant;
pub mod booking;
pub mod restaurant_booking;
pub mod blog_post;
pub mod testimonial;
pub mod proposal;
pub mod banquet_gallery;
