use super::*;
use pretty_assertions::assert_eq;

#[test]
fn intern_and_lookup() {
    let interner = StringInterner::new();

    let runtime = interner.intern("runtime");
    let get_property = interner.intern("getProperty");
    let runtime2 = interner.intern("runtime");

    assert_eq!(runtime, runtime2);
    assert_ne!(runtime, get_property);
    assert_eq!(interner.lookup(get_property), "getProperty");
}

#[test]
fn empty_string_is_name_empty() {
    let interner = StringInterner::new();
    assert_eq!(interner.intern(""), Name::EMPTY);
    assert_eq!(interner.lookup(Name::EMPTY), "");
}

#[test]
fn keywords_do_not_grow_interner() {
    let interner = StringInterner::new();
    let before = interner.len();
    interner.intern("int");
    interner.intern("io");
    assert_eq!(interner.len(), before);
}

#[test]
fn shared_interner_clones_see_same_names() {
    let interner = SharedInterner::new();
    let other = interner.clone();

    let a = interner.intern("Connector");
    let b = other.intern("Connector");

    assert_eq!(a, b);
    assert_eq!(StringLookup::lookup(&other, a), "Connector");
}

#[test]
fn concurrent_interning_agrees() {
    let interner = SharedInterner::new();
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let interner = interner.clone();
            std::thread::spawn(move || interner.intern("setBinaryPayload"))
        })
        .collect();

    let names: Vec<Name> = handles
        .into_iter()
        .map(|h| h.join().unwrap_or_else(|_| panic!("interning thread panicked")))
        .collect();
    assert!(names.windows(2).all(|w| w[0] == w[1]));
}
