use std::io::{self, Write as _};

/// Tag prefixed to every diagnostic the logger emits about itself.
pub const DIAGNOSTIC_TAG: &str = "[S] ";

/// Process-level side effects of the writer.
///
/// The writer never touches stdout, stderr or the process directly; it goes
/// through this trait so the console echo, the diagnostic channel and the
/// termination after a `Fatal` record can be observed in tests.
pub trait Host: Send + 'static {
    /// Echo a record to the console.
    fn stdout(&mut self, content: &str);

    /// Report a failure of the logger itself. The message already carries
    /// [`DIAGNOSTIC_TAG`].
    fn diagnostic(&mut self, message: &str);

    /// Terminate the process after a `Fatal` record has been written.
    fn terminate(&mut self, code: i32);
}

/// The default host: stdout, stderr and [`std::process::exit`].
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessHost;

impl Host for ProcessHost {
    fn stdout(&mut self, content: &str) {
        let mut stdout = io::stdout().lock();
        let _ = stdout.write_all(content.as_bytes());
        let _ = stdout.flush();
    }

    fn diagnostic(&mut self, message: &str) {
        eprintln!("{message}");
    }

    fn terminate(&mut self, code: i32) {
        let _ = io::stdout().flush();
        std::process::exit(code);
    }
}
