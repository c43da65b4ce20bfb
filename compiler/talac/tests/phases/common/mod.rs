//! Shared setup for phase tests.

use talac::{Session, SessionConfig};
use tala_eval::OutputSink;
use tala_ir::{Name, TypeRef};

/// A session with builtins whose output is captured.
pub fn session() -> Session {
    Session::with_output(SessionConfig::default(), OutputSink::buffer())
}

/// A session without builtins whose output is captured.
pub fn empty_session() -> Session {
    Session::with_output(SessionConfig::default().without_builtins(), OutputSink::buffer())
}

/// `http:<name>` as a type reference.
pub fn http_type(session: &Session, name: &str) -> TypeRef {
    TypeRef::new(http(session), session.intern(name))
}

pub fn http(session: &Session) -> Name {
    session.intern("http")
}
