#[cfg(feature = "tracing")]
mod trace;

#[cfg(feature = "tracing")]
pub use self::trace::TracedUploader;
