//! Thumbnail pipeline components.
//!
//! - **fetch**: download a thumbnail URL
//! - **decode**: decode the payload and normalize it to RGBA
//! - **writer**: save `<slug>.png` atomically
//! - **archive**: zip the output directory
//! - **driver**: run the entity list through all of the above

pub mod archive;
pub mod decode;
pub mod driver;
pub mod fetch;
pub mod writer;

pub use archive::Archiver;
pub use decode::{ImageDecoder, NormalizedImage};
pub use driver::{Pipeline, RunSettings};
pub use fetch::{HttpImageFetcher, ImageFetcher};
pub use writer::{ImageWriter, SavedImage};
