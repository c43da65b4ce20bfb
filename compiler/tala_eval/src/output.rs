//! Destination for output produced by natives such as `io:print`.
//!
//! Enum dispatch keeps the common stdout path free of vtable calls.

use parking_lot::Mutex;

/// Where native output goes.
#[derive(Default)]
pub enum OutputSink {
    /// Write to stdout.
    #[default]
    Stdout,
    /// Capture into a buffer for tests and embedding hosts.
    Buffer(Mutex<String>),
    /// Discard everything.
    Silent,
}

impl OutputSink {
    pub fn buffer() -> Self {
        OutputSink::Buffer(Mutex::new(String::new()))
    }

    /// Write `msg` without a trailing newline.
    pub fn print(&self, msg: &str) {
        match self {
            OutputSink::Stdout => print!("{msg}"),
            OutputSink::Buffer(buf) => buf.lock().push_str(msg),
            OutputSink::Silent => {}
        }
    }

    /// Write `msg` followed by a newline.
    pub fn println(&self, msg: &str) {
        match self {
            OutputSink::Stdout => println!("{msg}"),
            OutputSink::Buffer(buf) => {
                let mut buf = buf.lock();
                buf.push_str(msg);
                buf.push('\n');
            }
            OutputSink::Silent => {}
        }
    }

    /// Captured output. Empty unless this is a buffer.
    pub fn captured(&self) -> String {
        match self {
            OutputSink::Buffer(buf) => buf.lock().clone(),
            OutputSink::Stdout | OutputSink::Silent => String::new(),
        }
    }

    pub fn clear(&self) {
        if let OutputSink::Buffer(buf) = self {
            buf.lock().clear();
        }
    }
}

impl std::fmt::Debug for OutputSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputSink::Stdout => f.write_str("Stdout"),
            OutputSink::Buffer(_) => f.write_str("Buffer"),
            OutputSink::Silent => f.write_str("Silent"),
        }
    }
}
