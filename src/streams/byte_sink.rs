/// A sink for decompressed output bytes. Returns how many bytes of the
/// given slice it actually accepted; a short write is a fatal error to the
/// caller (checked by [`crate::window::SlidingWindow::flush`]).
pub trait ByteSink {
    fn write(&mut self, bytes: &[u8]) -> usize;
}

/// Wraps a caller-supplied callback.
pub struct CallbackSink<'a> {
    push: Box<dyn FnMut(&[u8]) -> usize + 'a>,
}

impl<'a> CallbackSink<'a> {
    pub fn new(push: impl FnMut(&[u8]) -> usize + 'a) -> Self {
        CallbackSink { push: Box::new(push) }
    }
}

impl<'a> ByteSink for CallbackSink<'a> {
    fn write(&mut self, bytes: &[u8]) -> usize {
        (self.push)(bytes)
    }
}
