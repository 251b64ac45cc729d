#![no_main]
use libfuzzer_sys::fuzz_target;
use zenconvert::*;

fuzz_target!(|data: &[u8]| {
    // Anything that decodes must survive encode -> decode unchanged
    let Ok(decoded) = decode_bmp(data, Unstoppable) else {
        return;
    };
    let Ok(reencoded) = encode_bmp(&decoded, Unstoppable) else {
        return;
    };
    let Ok(decoded2) = decode_bmp(&reencoded, Unstoppable) else {
        panic!("re-encoded BMP failed to decode");
    };
    assert_eq!(decoded, decoded2, "BMP roundtrip pixel mismatch");

    // The same pixels must also pass through PPM losslessly
    let ppm = encode_ppm(&decoded, Unstoppable).expect("ppm encode");
    let from_ppm = decode_ppm(&ppm, Unstoppable).expect("ppm decode");
    assert_eq!(decoded, from_ppm, "PPM roundtrip pixel mismatch");
});
