#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn bmp(width: i32, height: i32, pixels: &[[u8; 3]]) -> Vec<u8> {
    let stride = (width as usize * 3 + 3) & !3;
    let data_size = stride * height.unsigned_abs() as usize;
    let mut out = vec![0u8; 54];
    out[0] = b'B';
    out[1] = b'M';
    out[2..6].copy_from_slice(&((54 + data_size) as u32).to_le_bytes()); // file size
    out[10..14].copy_from_slice(&54u32.to_le_bytes()); // data offset
    out[14..18].copy_from_slice(&40u32.to_le_bytes()); // DIB header size
    out[18..22].copy_from_slice(&width.to_le_bytes());
    out[22..26].copy_from_slice(&height.to_le_bytes());
    out[26..28].copy_from_slice(&1u16.to_le_bytes()); // planes
    out[28..30].copy_from_slice(&24u16.to_le_bytes()); // bpp
    out[34..38].copy_from_slice(&(data_size as u32).to_le_bytes());
    for row in pixels.chunks(width as usize) {
        for bgr in row {
            out.extend_from_slice(bgr);
        }
        out.resize(out.len() + stride - row.len() * 3, 0);
    }
    out
}

fn main() {
    use std::fs;
    let dir = "fuzz/corpus/fuzz_decode";
    fs::create_dir_all(dir).unwrap();

    let px = [[0xff, 0, 0], [0, 0xff, 0], [0, 0, 0xff], [0x80, 0x80, 0x80]];
    fs::write(format!("{dir}/bmp_1x1.bmp"), bmp(1, 1, &px[..1])).unwrap();
    fs::write(format!("{dir}/bmp_2x2_bottom_up.bmp"), bmp(2, 2, &px)).unwrap();
    fs::write(format!("{dir}/bmp_2x2_top_down.bmp"), bmp(2, -2, &px)).unwrap();
    fs::write(format!("{dir}/bmp_4x1.bmp"), bmp(4, 1, &px)).unwrap();

    let ppm = b"P6\n2 2\n255\n\xff\x00\x00\x00\xff\x00\x00\x00\xff\x80\x80\x80";
    fs::write(format!("{dir}/ppm_2x2.ppm"), ppm).unwrap();
    let ppm_comment = b"P6 # c\n1 1\n15\n\x0f\x07\x00";
    fs::write(format!("{dir}/ppm_maxval15.ppm"), ppm_comment).unwrap();

    // Truncated/malformed seeds for edge coverage
    fs::write(format!("{dir}/empty.bin"), b"").unwrap();
    fs::write(format!("{dir}/just_p6.bin"), b"P6").unwrap();
    fs::write(format!("{dir}/bm_short.bin"), b"BM\x00\x00").unwrap();
    let mut rle = bmp(1, 1, &px[..1]);
    rle[30] = 1;
    fs::write(format!("{dir}/bmp_rle8.bin"), rle).unwrap();

    println!("Generated seed corpus in {dir}/");
}
