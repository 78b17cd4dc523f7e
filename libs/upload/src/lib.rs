//! Image upload for movie posters
//!
//! Reads and checks a local image, posts it as multipart to the upload
//! endpoint and turns the returned location into an absolute URL.

pub mod client;
pub mod image;

pub use client::{UploadClient, normalize_image_url};
pub use image::ImageFile;
