#![doc = env!("CARGO_PKG_DESCRIPTION")]

#[doc(inline)]
pub use rotscale_image as image;

#[doc(inline)]
pub use rotscale_imgproc as imgproc;

#[doc(inline)]
pub use rotscale_io as io;

/// Command line surface of the `rotscale` binary.
pub mod cli;
