// Screen chrome shared by every screen

pub mod footer;
pub mod header;

pub use footer::Footer;
pub use header::{Header, HEADER_HEIGHT};
