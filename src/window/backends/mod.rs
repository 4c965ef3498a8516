pub mod headless;

#[cfg(feature = "glutin")]
pub mod glutin;
