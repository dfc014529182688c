use crate::asset::PixelSize;
use crate::error::Result;
use crate::pipeline::frame::Frame;

/// Per-frame processing stage applied during rendering
///
/// Implementations transform the frame in place. The crate ships only the
/// identity passthrough; anything beyond that (cropping, color work) plugs
/// in through this seam.
pub trait FrameFilter: Send + Sync {
    /// Returns the unique name of this filter
    fn name(&self) -> &str;

    /// Apply the filter to a video frame
    fn apply(&self, frame: &mut Frame) -> Result<()>;
}

/// Passthrough filter: source frame in, same frame out
#[derive(Debug, Default)]
pub struct IdentityFilter;

impl IdentityFilter {
    pub fn new() -> Self {
        Self
    }
}

impl FrameFilter for IdentityFilter {
    fn name(&self) -> &str {
        "identity"
    }

    fn apply(&self, _frame: &mut Frame) -> Result<()> {
        Ok(())
    }
}

/// Frame pipeline attached to a timeline
///
/// Binds the render target size (computed from the inserted track's
/// geometry, not the raw source asset) to the per-frame filter the render
/// engine runs each frame through. Lifetime is 1:1 with its timeline.
pub struct FramePipeline {
    render_size: PixelSize,
    filter: Box<dyn FrameFilter>,
}

impl FramePipeline {
    /// Build a pipeline around an arbitrary filter
    pub fn new(render_size: PixelSize, filter: Box<dyn FrameFilter>) -> Self {
        Self {
            render_size,
            filter,
        }
    }

    /// Build the default identity pipeline
    pub fn identity(render_size: PixelSize) -> Self {
        Self::new(render_size, Box::new(IdentityFilter::new()))
    }

    /// Render target size in pixels
    pub fn render_size(&self) -> PixelSize {
        self.render_size
    }

    /// Name of the attached filter
    pub fn filter_name(&self) -> &str {
        self.filter.name()
    }

    /// Run one frame through the attached filter
    pub fn process(&self, frame: &mut Frame) -> Result<()> {
        self.filter.apply(frame)
    }
}

impl std::fmt::Debug for FramePipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FramePipeline")
            .field("render_size", &self.render_size)
            .field("filter", &self.filter.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_filter_leaves_frame_untouched() {
        let pipeline = FramePipeline::identity(PixelSize::new(4.0, 2.0));

        let mut frame = Frame::new_filled(4, 2, [200, 100, 50]);
        let before = frame.clone();
        pipeline.process(&mut frame).unwrap();

        assert_eq!(frame, before);
        assert_eq!(pipeline.filter_name(), "identity");
    }

    #[test]
    fn test_custom_filter_runs_per_frame() {
        struct Invert;

        impl FrameFilter for Invert {
            fn name(&self) -> &str {
                "invert"
            }

            fn apply(&self, frame: &mut Frame) -> Result<()> {
                for y in 0..frame.height() {
                    for x in 0..frame.width() {
                        let [r, g, b] = frame.get_pixel(x, y);
                        frame.set_pixel(x, y, [255 - r, 255 - g, 255 - b]);
                    }
                }
                Ok(())
            }
        }

        let pipeline = FramePipeline::new(PixelSize::new(2.0, 1.0), Box::new(Invert));
        let mut frame = Frame::new_filled(2, 1, [255, 0, 10]);
        pipeline.process(&mut frame).unwrap();
        assert_eq!(frame.get_pixel(0, 0), [0, 255, 245]);
    }
}
