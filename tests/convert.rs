//! File-level load/save and whole conversions.

use std::fs;

use enough::Unstoppable;
use zenconvert::*;

fn gradient(w: u32, h: u32) -> Image {
    let mut img = Image::new(w, h, Color::BLACK);
    for y in 0..h {
        for (x, px) in img.line_mut(y).iter_mut().enumerate() {
            *px = Color::opaque((x * 255 / w as usize) as u8, (y * 255 / h) as u8, 77);
        }
    }
    img
}

#[test]
fn bmp_file_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("g.bmp");
    let img = gradient(13, 7);

    assert!(save_bmp(&path, &img));
    let bytes = fs::read(&path).unwrap();
    // 13 * 3 = 39 -> stride 40
    assert_eq!(bytes.len(), 54 + 40 * 7);
    assert_eq!(load_bmp(&path), img);
    assert_eq!(try_load_bmp(&path).unwrap(), img);
}

#[test]
fn load_failures_collapse_to_empty_sentinel() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.bmp");
    fs::write(&path, b"GIF89a not a bitmap at all, but long enough for two headers.....").unwrap();

    let img = load_bmp(&path);
    assert!(img.is_empty());
    assert!(matches!(
        try_load_bmp(&path),
        Err(DecodeError::InvalidMagic)
    ));

    let missing = dir.path().join("missing.bmp");
    assert!(load_bmp(&missing).is_empty());
    assert!(matches!(try_load_bmp(&missing), Err(DecodeError::Io(_))));
}

#[test]
fn truncated_file_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("t.bmp");
    let bytes = encode_bmp(&gradient(4, 4), Unstoppable).unwrap();
    fs::write(&path, &bytes[..bytes.len() - 3]).unwrap();
    assert!(matches!(try_load_bmp(&path), Err(DecodeError::Truncated)));
    assert_eq!(load_bmp(&path), Image::empty());
}

#[test]
fn save_into_missing_directory_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("no/such/dir/out.bmp");
    assert!(!save_bmp(&path, &gradient(2, 2)));
    assert!(matches!(
        try_save_bmp(&path, &gradient(2, 2)),
        Err(EncodeError::Io(_))
    ));
}

#[test]
fn convert_ppm_to_bmp_with_bmp_enabled() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.ppm");
    let output = dir.path().join("out.bmp");
    let img = gradient(9, 5);
    assert!(save_ppm(&input, &img));

    ConvertRequest::new(&input, &output)
        .with_dispatcher(Dispatcher::with_bmp())
        .run(Unstoppable)
        .unwrap();
    assert_eq!(load_bmp(&output), img);
}

#[test]
fn default_dispatcher_has_no_bmp() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.ppm");
    let output = dir.path().join("out.bmp");
    assert!(save_ppm(&input, &gradient(2, 2)));

    let err = ConvertRequest::new(&input, &output)
        .run(Unstoppable)
        .unwrap_err();
    assert!(matches!(
        err,
        ConvertError::FormatUnknown {
            side: Side::Output,
            ..
        }
    ));
    assert_eq!(err.exit_code(), 3);
    assert!(!output.exists());
}

#[test]
fn unknown_input_reported_before_output() {
    let err = ConvertRequest::new("image.gif", "also.gif")
        .run(Unstoppable)
        .unwrap_err();
    assert!(matches!(
        err,
        ConvertError::FormatUnknown {
            side: Side::Input,
            ..
        }
    ));
    assert_eq!(err.exit_code(), 2);
}

#[test]
fn decode_failure_is_exit_code_1() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.ppm");
    let output = dir.path().join("out.ppm");
    fs::write(&input, b"P6 4 4 255\n").unwrap();

    let err = ConvertRequest::new(&input, &output)
        .run(Unstoppable)
        .unwrap_err();
    assert!(matches!(
        err,
        ConvertError::Decode {
            source: DecodeError::Truncated,
            ..
        }
    ));
    assert_eq!(err.exit_code(), 1);
}

#[test]
fn limits_apply_to_conversions() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.ppm");
    let output = dir.path().join("out.ppm");
    assert!(save_ppm(&input, &gradient(10, 10)));

    let limits = Limits {
        max_width: Some(8),
        ..Default::default()
    };
    let err = ConvertRequest::new(&input, &output)
        .with_limits(&limits)
        .run(Unstoppable)
        .unwrap_err();
    assert!(matches!(
        err,
        ConvertError::Decode {
            source: DecodeError::LimitExceeded(_),
            ..
        }
    ));
}

#[cfg(feature = "jpeg")]
#[test]
fn convert_ppm_to_jpeg_and_back() {
    let dir = tempfile::tempdir().unwrap();
    let ppm = dir.path().join("in.ppm");
    let jpg = dir.path().join("mid.jpg");
    let back = dir.path().join("back.ppm");
    assert!(save_ppm(&ppm, &Image::new(16, 16, Color::opaque(30, 60, 90))));

    ConvertRequest::new(&ppm, &jpg)
        .with_jpeg_quality(95)
        .run(Unstoppable)
        .unwrap();
    ConvertRequest::new(&jpg, &back).run(Unstoppable).unwrap();

    let img = load_ppm(&back);
    assert_eq!((img.width(), img.height()), (16, 16));
    let px = img.line(8)[8];
    assert!(px.r.abs_diff(30) <= 6 && px.g.abs_diff(60) <= 6 && px.b.abs_diff(90) <= 6);
}

#[cfg(feature = "cli")]
mod cli {
    use std::process::Command;

    use super::*;

    fn run(args: &[&std::ffi::OsStr]) -> (i32, String) {
        let out = Command::new(env!("CARGO_BIN_EXE_zenconvert"))
            .args(args)
            .output()
            .unwrap();
        (
            out.status.code().unwrap(),
            String::from_utf8_lossy(&out.stdout).into_owned(),
        )
    }

    #[test]
    fn exit_codes() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.ppm");
        let output = dir.path().join("out.jpg");
        assert!(save_ppm(&input, &gradient(8, 8)));

        let (code, _) = run(&[input.as_os_str()]);
        assert_eq!(code, 1);

        let (code, stdout) = run(&["x.gif".as_ref(), output.as_os_str()]);
        assert_eq!(code, 2);
        assert!(stdout.contains("Unknown format of the input file"));

        let (code, stdout) = run(&[input.as_os_str(), "y.gif".as_ref()]);
        assert_eq!(code, 3);
        assert!(stdout.contains("Unknown format of the output file"));

        let missing = dir.path().join("missing.ppm");
        let (code, _) = run(&[missing.as_os_str(), output.as_os_str()]);
        assert_eq!(code, 1);
    }

    #[cfg(feature = "jpeg")]
    #[test]
    fn successful_conversion() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.ppm");
        let output = dir.path().join("out.jpg");
        assert!(save_ppm(&input, &gradient(8, 8)));

        let (code, stdout) = run(&[input.as_os_str(), output.as_os_str()]);
        assert_eq!(code, 0);
        assert!(stdout.contains("Successfully converted"));
        assert!(output.exists());
    }

    #[test]
    fn enable_bmp_flag() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.ppm");
        let output = dir.path().join("out.bmp");
        assert!(save_ppm(&input, &gradient(3, 3)));

        let (code, _) = run(&[input.as_os_str(), output.as_os_str()]);
        assert_eq!(code, 3);

        let (code, _) = run(&["--enable-bmp".as_ref(), input.as_os_str(), output.as_os_str()]);
        assert_eq!(code, 0);
        assert_eq!(load_bmp(&output), gradient(3, 3));
    }
}
