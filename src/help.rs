use std::ffi::OsStr;

use current_platform::CURRENT_PLATFORM;
use strum::VariantArray;

use crate::{args::Arg, colorspace::Colorspace, compression::Compression};

pub fn maybe_print_help_and_exit(bin_name: &str) {
    match std::env::args_os().nth(1) {
        None => print_help_and_exit(bin_name),
        Some(arg) => {
            if arg.as_os_str() == OsStr::new("--help") || arg.as_os_str() == OsStr::new("-help") {
                print_help_and_exit(bin_name)
            }
        }
    }
}

fn print_help_and_exit(bin_name: &str) -> ! {
    print!("{}", help_text(bin_name));
    std::process::exit(0);
}

fn help_text(bin_name: &str) -> String {
    let mut text = String::new();
    text += &format!("Version: {}\n", version_string());
    text += "Copyright: (C) 2024-2025 WonderMagick contributors\n";
    text += &format!("License: {}\n", env!("CARGO_PKG_LICENSE"));
    text += &format!("Usage: {bin_name} [options ...] file [options ...] file\n\n");
    text += "Image Settings:\n";
    for arg in Arg::VARIANTS {
        let name: &'static str = arg.into();
        text += &format!("  -{name:19} {}\n", arg.help_text());
    }
    text += &format!("\nCompression types: {}\n", join(Compression::VARIANTS));
    text += &format!("Colorspaces: {}\n", join(Colorspace::VARIANTS));
    text
}

fn join<T: ToString>(items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn version_string() -> String {
    let cpu = CURRENT_PLATFORM.split('-').next().unwrap_or("unknown");
    let major = env!("CARGO_PKG_VERSION_MAJOR");
    let minor = env!("CARGO_PKG_VERSION_MINOR");
    let patch = env!("CARGO_PKG_VERSION_PATCH");
    let repo = env!("CARGO_PKG_REPOSITORY");

    format!("WonderMagick 6.{major}.{minor}-{patch} Q16 {cpu} 2050-01-01 {repo}")
}
