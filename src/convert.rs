use std::path::Path;

use enough::Stop;

use crate::decode::DecodeRequest;
use crate::encode::EncodeRequest;
use crate::error::{ConvertError, DecodeError, Side};
use crate::format::Dispatcher;
use crate::jpeg::DEFAULT_JPEG_QUALITY;
use crate::limits::Limits;

/// One file-to-file conversion: resolve both formats, decode, encode.
///
/// Both paths are resolved before any file is opened, so an unknown output
/// extension is reported without reading the input.
///
/// ```no_run
/// use zenconvert::{ConvertRequest, Dispatcher, Unstoppable};
///
/// ConvertRequest::new("in.ppm", "out.bmp")
///     .with_dispatcher(Dispatcher::with_bmp())
///     .run(Unstoppable)?;
/// # Ok::<(), zenconvert::ConvertError>(())
/// ```
#[derive(Clone, Debug)]
pub struct ConvertRequest<'a> {
    input: &'a Path,
    output: &'a Path,
    dispatcher: Dispatcher,
    limits: Option<&'a Limits>,
    jpeg_quality: u8,
}

impl<'a> ConvertRequest<'a> {
    pub fn new<I, O>(input: &'a I, output: &'a O) -> Self
    where
        I: AsRef<Path> + ?Sized,
        O: AsRef<Path> + ?Sized,
    {
        Self {
            input: input.as_ref(),
            output: output.as_ref(),
            dispatcher: Dispatcher::default(),
            limits: None,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }

    pub fn with_dispatcher(mut self, dispatcher: Dispatcher) -> Self {
        self.dispatcher = dispatcher;
        self
    }

    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// JPEG output quality, clamped to 1..=100.
    pub fn with_jpeg_quality(mut self, quality: u8) -> Self {
        self.jpeg_quality = quality.clamp(1, 100);
        self
    }

    pub fn run(&self, stop: impl Stop) -> Result<(), ConvertError> {
        let stop: &dyn Stop = &stop;

        let input_format = self.dispatcher.resolve(self.input, Side::Input)?;
        let output_format = self.dispatcher.resolve(self.output, Side::Output)?;

        let decode_err = |source: DecodeError| ConvertError::Decode {
            path: self.input.to_path_buf(),
            source,
        };
        let data = std::fs::read(self.input).map_err(|e| decode_err(e.into()))?;
        let mut request = DecodeRequest::new(input_format, &data);
        if let Some(limits) = self.limits {
            request = request.with_limits(limits);
        }
        let image = request.decode_dyn(stop).map_err(decode_err)?;

        EncodeRequest::new(output_format)
            .with_jpeg_quality(self.jpeg_quality)
            .save_dyn(self.output, &image, stop)
            .map_err(|source| ConvertError::Encode {
                path: self.output.to_path_buf(),
                source,
            })?;

        log::info!(
            "converted {} ({input_format:?}) -> {} ({output_format:?}), {}x{}",
            self.input.display(),
            self.output.display(),
            image.width(),
            image.height()
        );
        Ok(())
    }
}
