//! Registration and lookup through the package table and global scope.

use pretty_assertions::assert_eq;
use tala_ir::Ty;
use tala_natives::{
    CallableDescriptor, CallableKind, MemberName, Package, SymbolFlags, SymbolName, Visibility,
};

use crate::common::{empty_session, http, http_type, session};

#[test]
fn io_print_has_string_param_and_no_returns() {
    let session = session();
    let io = session.intern("io");
    let print = MemberName::plain(session.intern("print"));

    let packages = session.packages().read();
    let descriptor = packages
        .get_package(io)
        .and_then(|pkg| pkg.function(print))
        .expect("io:print is a builtin");
    assert_eq!(descriptor.params(), &[Ty::String]);
    assert_eq!(descriptor.returns(), &[] as &[Ty]);
    assert_eq!(descriptor.visibility(), Visibility::Public);

    let symbol = packages
        .lookup_symbol(&SymbolName::function(io, print, vec![Ty::String]))
        .expect("symbol registered with the descriptor");
    assert_eq!(symbol.ty.params, vec![Ty::String]);
    assert!(symbol.ty.returns.is_empty());
    assert!(symbol.flags.contains(SymbolFlags::NATIVE | SymbolFlags::PUBLIC));
}

#[test]
fn reregistered_action_replaces_return_type() {
    let session = empty_session();
    let http = http(&session);
    let connector = http_type(&session, "Connector");
    let response = http_type(&session, "Response");
    let get = session.intern("get");

    let first = CallableDescriptor::action(http, connector, get)
        .param(Ty::String)
        .returns(Ty::Struct(response))
        .build();
    let second = CallableDescriptor::action(http, connector, get)
        .param(Ty::String)
        .returns(Ty::Json)
        .build();
    session.packages().write().register_action(first);
    session.packages().write().register_action(second.clone());

    let packages = session.packages().read();
    let package = packages.get_package(http).unwrap();
    assert_eq!(package.actions().count(), 1);
    assert_eq!(package.action(second.member()), Some(&second));

    let symbol = packages.lookup_symbol(second.symbol()).unwrap();
    assert_eq!(symbol.ty.returns, vec![Ty::Json]);
    assert_eq!(symbol.ty.kind, CallableKind::Action);
    assert!(symbol.is_action());
}

#[test]
fn unregister_from_unknown_package_is_a_noop() {
    let session = empty_session();
    let ghost = CallableDescriptor::function(session.intern("ghost"), session.intern("boo")).build();

    session.packages().write().unregister_function(&ghost);

    let packages = session.packages().read();
    assert!(packages.is_empty());
    assert!(packages.get_package(ghost.package()).is_none());
}

#[test]
fn private_functions_share_the_package_map() {
    let session = empty_session();
    let util = session.intern("util");
    let public = CallableDescriptor::function(util, session.intern("trim"))
        .param(Ty::String)
        .returns(Ty::String)
        .build();
    let private = CallableDescriptor::function(util, session.intern("scratch"))
        .private()
        .build();
    session.packages().write().register_function(public.clone());
    session.packages().write().register_function(private.clone());

    let packages = session.packages().read();
    let package = packages.get_package(util).unwrap();
    assert_eq!(package.public_functions().collect::<Vec<_>>(), vec![&public]);
    assert_eq!(package.private_functions().collect::<Vec<_>>(), vec![&private]);

    let symbol = packages.lookup_symbol(private.symbol()).unwrap();
    assert!(!symbol.flags.contains(SymbolFlags::PUBLIC));
}

#[test]
fn register_package_replaces_whole_package() {
    let session = empty_session();
    let util = session.intern("util");
    let old = CallableDescriptor::function(util, session.intern("old")).build();
    let new = CallableDescriptor::function(util, session.intern("new")).build();
    session.packages().write().register_function(old.clone());

    let mut package = Package::new(util);
    package.insert(new.clone());
    session.register_package(package);

    {
        let packages = session.packages().read();
        let package = packages.get_package(util).unwrap();
        assert!(package.function(old.member()).is_none());
        assert!(package.function(new.member()).is_some());
        assert!(packages.lookup_symbol(new.symbol()).is_some());
        // Replaced descriptors stay resolvable until the scope is rebuilt.
        assert!(packages.lookup_symbol(old.symbol()).is_some());
    }

    session.rebuild_scope();
    assert!(session.packages().read().lookup_symbol(old.symbol()).is_none());
}

#[test]
fn attached_members_are_distinct_per_receiver() {
    let session = session();
    let http = http(&session);
    let request = http_type(&session, "Request");
    let set_binary = session.intern("setBinaryPayload");
    let on_request = CallableDescriptor::function(http, set_binary)
        .attached_to(request)
        .param(Ty::Blob)
        .build();
    session.packages().write().register_function(on_request.clone());

    let packages = session.packages().read();
    let package = packages.get_package(http).unwrap();
    assert_eq!(package.functions().count(), 2);
    assert_eq!(package.function(on_request.member()), Some(&on_request));
    assert_eq!(on_request.receiver(), Some(&Ty::Struct(request)));
}
