//! Initialization that needs to be done on startup

use tracing_subscriber::EnvFilter;

/// Performs any global state initialization that needs to be done before performing image operations
pub fn init() {
    // Log to stderr so that logs never end up mixed into an image written to stdout.
    // `RUST_LOG=wondermagick_info=trace` shows every acquire and release of encoding parameters.
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();

    #[cfg(feature = "jxl")]
    jxl_oxide::integration::register_image_decoding_hook();
}
