use super::*;
use pretty_assertions::assert_eq;
use tala_diagnostic::{DiagnosticConfig, ErrorCode};
use tala_eval::{JsonValue, StructRef};
use tala_ir::{ExprId, TypeRef};

fn quiet_session(config: SessionConfig) -> Session {
    Session::with_output(config, OutputSink::buffer())
}

#[test]
fn bootstrap_registers_builtins() {
    let session = quiet_session(SessionConfig::default());
    let runtime = session.intern("runtime");
    let io = session.intern("io");
    let http = session.intern("http");

    let packages = session.packages().read();
    assert!(packages.get_package(runtime).is_some());
    assert!(packages.get_package(io).is_some());
    assert!(packages.get_package(http).is_some());
    assert_eq!(session.conversions().read().len(), 7);
}

#[test]
fn bootstrap_can_skip_builtins() {
    let session = quiet_session(SessionConfig::default().without_builtins());
    assert!(session.packages().read().is_empty());
    assert!(session.conversions().read().is_empty());
}

#[test]
fn invoke_get_property_uses_config() {
    let session = quiet_session(SessionConfig::default().with_property("user.name", "tala"));
    let symbol = SymbolName::function(
        session.intern("runtime"),
        MemberName::plain(session.intern("getProperty")),
        vec![Ty::String],
    );

    assert_eq!(
        session.invoke(&symbol, &[Value::from("user.name")]),
        Ok(vec![Value::from("tala")])
    );
}

#[test]
fn invoke_print_captures_output() {
    let session = quiet_session(SessionConfig::default());
    let symbol = SymbolName::function(
        session.intern("io"),
        MemberName::plain(session.intern("print")),
        vec![Ty::String],
    );

    session
        .invoke(&symbol, &[Value::from("hi")])
        .unwrap_or_else(|e| panic!("{e:?}"));
    assert_eq!(session.output().captured(), "hi");
}

#[test]
fn resolve_call_returns_symbol_or_diagnostic() {
    let session = quiet_session(SessionConfig::default());
    let io = session.intern("io");
    let print = MemberName::plain(session.intern("print"));

    let symbol = session
        .resolve_call(Span::new(0, 5), io, print, &[Ty::String])
        .unwrap_or_else(|d| panic!("{d}"));
    assert_eq!(symbol.ty.params, vec![Ty::String]);
    assert!(symbol.ty.returns.is_empty());

    let err = session.resolve_call(Span::new(0, 5), io, print, &[Ty::Int]);
    assert_eq!(err.map_err(|d| d.code), Err(ErrorCode::E2001));
}

#[test]
fn unregister_native_keeps_symbol_until_rebuild() {
    let session = quiet_session(SessionConfig::default().without_builtins());
    let descriptor = CallableDescriptor::function(session.intern("math"), session.intern("abs"))
        .param(Ty::Int)
        .returns(Ty::Int)
        .build();
    let symbol = descriptor.symbol().clone();
    session.register_native_fn(descriptor.clone(), |_, args| match args {
        [Value::Int(n)] => vec![Value::Int(n.abs())],
        _ => vec![Value::Int(0)],
    });
    assert_eq!(session.invoke(&symbol, &[Value::Int(-3)]), Ok(vec![Value::Int(3)]));

    session.unregister_native(&descriptor);
    assert!(session.packages().read().lookup_symbol(&symbol).is_some());
    assert_eq!(
        session.invoke(&symbol, &[Value::Int(-3)]),
        Err(DispatchError::UnknownNative)
    );

    session.rebuild_scope();
    assert!(session.packages().read().lookup_symbol(&symbol).is_none());
}

#[test]
fn actions_route_to_the_action_table() {
    let session = quiet_session(SessionConfig::default().without_builtins());
    let http = session.intern("http");
    let connector = TypeRef::new(http, session.intern("Connector"));
    let response = TypeRef::new(http, session.intern("Response"));
    let get = CallableDescriptor::action(http, connector, session.intern("get"))
        .param(Ty::String)
        .returns(Ty::Struct(response))
        .fallible()
        .build();
    let member = get.member();

    session.register_native_fn(get, |_, _| vec![Value::Nil, Value::error("offline")]);

    let packages = session.packages().read();
    let package = packages.get_package(http).unwrap_or_else(|| panic!("package"));
    assert!(package.action(member).is_some());
    assert!(package.function(member).is_none());
}

#[test]
fn check_conversions_reports_every_failure() {
    let session = quiet_session(SessionConfig::default());
    let site = |id, target, source, start| {
        ConversionSite::new(
            ConversionExpr::new(ExprId::new(id), target, Span::new(start, start + 5)),
            source,
        )
    };
    let mut units = vec![
        vec![site(0, Ty::Int, Ty::Json, 0), site(1, Ty::Xml, Ty::Json, 10)],
        vec![site(2, Ty::Blob, Ty::Int, 0), site(3, Ty::Float, Ty::Int, 10)],
    ];

    let mut queue = session.check_conversions(&mut units);

    assert_eq!(queue.error_count(), 2);
    assert!(units[0][0].expr.is_resolved());
    assert!(!units[0][1].expr.is_resolved());
    assert!(!units[1][0].expr.is_resolved());
    assert!(units[1][1].expr.is_resolved());
    assert!(queue.flush().iter().all(|d| d.code == ErrorCode::E2101));
}

#[test]
fn convert_runs_bound_expressions() {
    let session = quiet_session(SessionConfig::default());
    let mut units = vec![vec![ConversionSite::new(
        ConversionExpr::new(ExprId::new(0), Ty::Int, Span::DUMMY),
        Ty::String,
    )]];
    let queue = session.check_conversions(&mut units);
    assert!(!queue.has_errors());

    let expr = &units[0][0].expr;
    assert_eq!(
        session.convert(expr, &Value::from("41")),
        Ok(vec![Value::Int(41), Value::Nil])
    );
}

#[test]
fn check_conversions_uses_configured_diagnostics() {
    let session = quiet_session(SessionConfig {
        diagnostics: DiagnosticConfig::unlimited(),
        ..SessionConfig::default()
    });
    let mut units = vec![(0..60u32)
        .map(|i| {
            ConversionSite::new(
                ConversionExpr::new(ExprId::new(i), Ty::Xml, Span::new(i * 10, i * 10 + 5)),
                Ty::Json,
            )
        })
        .collect::<Vec<_>>()];

    let queue = session.check_conversions(&mut units);

    assert_eq!(queue.error_count(), 60);
    assert_eq!(queue.diagnostics().len(), 60);
}

#[test]
fn action_and_attached_function_bind_separately() {
    let session = quiet_session(SessionConfig::default().without_builtins());
    let http = session.intern("http");
    let client = TypeRef::new(http, session.intern("Client"));
    let get = session.intern("get");
    let action = CallableDescriptor::action(http, client, get)
        .param(Ty::String)
        .returns(Ty::Json)
        .build();
    let attached = CallableDescriptor::function(http, get)
        .attached_to(client)
        .param(Ty::String)
        .returns(Ty::Int)
        .build();
    let (action_symbol, attached_symbol) = (action.symbol().clone(), attached.symbol().clone());

    session.register_native_fn(action, |_, _| vec![Value::json(JsonValue::Int(1))]);
    session.register_native_fn(attached, |_, _| vec![Value::Int(2)]);

    let symbol = session
        .packages()
        .read()
        .lookup_symbol(&action_symbol)
        .cloned()
        .unwrap_or_else(|| panic!("action symbol registered"));
    assert_eq!(symbol.ty.kind, CallableKind::Action);
    assert_eq!(symbol.ty.returns, vec![Ty::Json]);

    let receiver = Value::Struct(StructRef::new(client));
    assert_eq!(
        session.invoke(&attached_symbol, &[receiver, Value::from("/")]),
        Ok(vec![Value::Int(2)])
    );
}
