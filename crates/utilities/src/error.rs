use core::error::Error;
use core::fmt::Debug;
use core::fmt::Display;

/// The error type used to propagate failures out of the automin tools.
///
/// Every type implementing [`Error`] converts into it, as does a plain `&str`
/// or `String` message, so it works with `?` everywhere. The specific error
/// (for example a format error raised while reading an automaton) can be
/// recovered with [`AutominError::downcast_ref`].
pub struct AutominError {
    inner: Box<Inner>,
}

/// Keeps `AutominError` a single pointer wide, results stay small.
struct Inner {
    error: Box<dyn Error + Send + Sync + 'static>,
    backtrace: std::backtrace::Backtrace,
}

impl AutominError {
    /// Attempts to downcast the underlying error to the given type.
    pub fn downcast_ref<E: Error + 'static>(&self) -> Option<&E> {
        self.inner.error.downcast_ref::<E>()
    }

    /// Returns true iff the underlying error is of type `E`.
    pub fn is<E: Error + 'static>(&self) -> bool {
        self.inner.error.is::<E>()
    }
}

// NOTE: writing the impl this way gives us From<&str>
impl<E> From<E> for AutominError
where
    Box<dyn Error + Send + Sync + 'static>: From<E>,
{
    #[cold]
    fn from(error: E) -> Self {
        AutominError {
            inner: Box::new(Inner {
                error: error.into(),
                backtrace: std::backtrace::Backtrace::capture(),
            }),
        }
    }
}

impl Display for AutominError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.inner.error)
    }
}

impl Debug for AutominError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "{}", self.inner.error)?;

        let backtrace = &self.inner.backtrace;
        if let std::backtrace::BacktraceStatus::Captured = backtrace.status() {
            writeln!(f, "{backtrace}")?;
        }

        Ok(())
    }
}
