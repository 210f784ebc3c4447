#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use strum::VariantArray;
use wondermagick_info::{native::MAX_TEXT_LEN, Colorspace, Density, Info};

#[derive(Debug, Arbitrary)]
enum Setting {
    Format(String),
    Quality(u64),
    Compression(String),
    Density(u32, u32),
    DensityText(String),
    Colorspace(u8),
}

fuzz_target!(|settings: Vec<Setting>| {
    Info::scoped(|info| {
        for setting in settings {
            match setting {
                Setting::Format(format) => {
                    info.set_format(&format);
                    let stored = info.format();
                    assert!(stored.len() <= MAX_TEXT_LEN);
                    assert!(format.starts_with(&stored));
                }
                Setting::Quality(quality) => {
                    info.set_quality(quality);
                    assert_eq!(info.quality(), quality & u64::from(u32::MAX));
                }
                Setting::Compression(name) => {
                    let before = info.compression();
                    if info.set_compression(&name).is_err() {
                        assert_eq!(info.compression(), before);
                    }
                }
                Setting::Density(x, y) => {
                    info.set_density(x, y);
                    assert_eq!(info.density_text(), Some(format!("{x}x{y}").as_str()));
                }
                Setting::DensityText(text) => {
                    let _ = text.parse::<Density>();
                }
                Setting::Colorspace(index) => {
                    let colorspace =
                        Colorspace::VARIANTS[usize::from(index) % Colorspace::VARIANTS.len()];
                    info.set_colorspace(colorspace);
                    assert_eq!(info.colorspace(), colorspace);
                }
            }
        }
    });
});
