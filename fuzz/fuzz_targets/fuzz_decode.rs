#![no_main]
use libfuzzer_sys::fuzz_target;
use zenconvert::{DecodeRequest, Format, Limits};

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes must produce an error, never a panic
    let _ = zenconvert::decode_bmp(data, enough::Unstoppable);
    let _ = zenconvert::decode_ppm(data, enough::Unstoppable);

    let limits = Limits {
        max_pixels: Some(1 << 20),
        ..Default::default()
    };
    let _ = DecodeRequest::new(Format::Bmp, data)
        .with_limits(&limits)
        .decode(enough::Unstoppable);
});
