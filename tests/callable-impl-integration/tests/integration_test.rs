//! 解析器集成测试
use callable_abstractions::{
    Constructible, Invocable, LookupService, Middleware, Payload, Reference, RequestHandler,
    ResolveCallable, ResolvedCallable, Service,
};
use callable_impl::{
    next_payload, CallableResolver, Closure, ConstructorRegistry, NativeCallable, ServiceContainer,
};
use resolver_common::{
    DependencyResult, InvocationError, InvocationResult, Lifetime, ResolutionError,
};
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// 带 `hello` 方法的普通服务
#[derive(Debug)]
struct Greeter {
    greeting: String,
}

impl Service for Greeter {
    fn service_name(&self) -> &str {
        "Greeter"
    }

    fn has_method(&self, method: &str) -> bool {
        method == "hello"
    }

    fn call_method(&self, method: &str, args: Vec<Payload>) -> InvocationResult<Payload> {
        match method {
            "hello" => {
                let name = args
                    .first()
                    .and_then(|arg| arg.downcast_ref::<String>())
                    .ok_or_else(|| InvocationError::invalid_argument(0, "String"))?;
                Ok(Arc::new(format!("{}, {}", self.greeting, name)))
            }
            other => Err(InvocationError::MethodNotFound {
                method: other.to_string(),
            }),
        }
    }
}

/// 可直接实例化的请求处理器
struct AppHandler {
    container: Option<Arc<dyn LookupService>>,
}

impl std::fmt::Debug for AppHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppHandler")
            .field("has_container", &self.container.is_some())
            .finish()
    }
}

impl Constructible for AppHandler {
    const TYPE_NAME: &'static str = "App\\Handler";

    fn construct(container: Option<Arc<dyn LookupService>>) -> DependencyResult<Self> {
        Ok(Self { container })
    }
}

impl RequestHandler for AppHandler {
    fn handle(&self, request: Payload) -> InvocationResult<Payload> {
        let path = request
            .downcast_ref::<String>()
            .ok_or_else(|| InvocationError::invalid_argument(0, "String"))?;
        Ok(Arc::new(format!("handled {}", path)))
    }
}

impl Service for AppHandler {
    fn service_name(&self) -> &str {
        Self::TYPE_NAME
    }

    fn as_request_handler(self: Arc<Self>) -> Option<Arc<dyn RequestHandler>> {
        Some(self)
    }

    fn has_method(&self, method: &str) -> bool {
        method == "handle" || method == "describe"
    }
}

/// 也能被直接调用的中间件
#[derive(Debug)]
struct Auth;

impl Middleware for Auth {
    fn process(&self, request: Payload, next: &dyn RequestHandler) -> InvocationResult<Payload> {
        let path = request
            .downcast_ref::<String>()
            .ok_or_else(|| InvocationError::invalid_argument(0, "String"))?;
        next.handle(Arc::new(format!("{} [authorized]", path)))
    }
}

impl Invocable for Auth {
    fn invoke(&self, _args: Vec<Payload>) -> InvocationResult<Payload> {
        Ok(Arc::new("bypassed".to_string()))
    }
}

impl Service for Auth {
    fn as_middleware(self: Arc<Self>) -> Option<Arc<dyn Middleware>> {
        Some(self)
    }

    fn as_invocable(self: Arc<Self>) -> Option<Arc<dyn Invocable>> {
        Some(self)
    }
}

fn registry() -> Arc<ConstructorRegistry> {
    let mut registry = ConstructorRegistry::new();
    registry.register_default::<AppHandler>();
    Arc::new(registry)
}

fn text(payload: &Payload) -> &str {
    payload.downcast_ref::<String>().map(String::as_str).unwrap_or("")
}

#[test]
fn test_greeter_method_from_container() {
    init_tracing();
    let container = ServiceContainer::new();
    container.register_instance(
        "Greeter",
        Greeter {
            greeting: "Hello".to_string(),
        },
    );
    let container = Arc::new(container);
    let expected = container.get("Greeter").unwrap();
    let resolver = CallableResolver::new(Some(container));

    let resolved = resolver.resolve(Reference::from("Greeter:hello")).unwrap();

    assert_eq!(resolved.method_name(), Some("hello"));
    assert!(Arc::ptr_eq(resolved.instance().unwrap(), &expected));

    let output = resolved
        .invoke(vec![Arc::new("world".to_string())])
        .unwrap();
    assert_eq!(text(&output), "Hello, world");
}

#[test]
fn test_constructible_handler_without_container() {
    init_tracing();
    let resolver = CallableResolver::builder().with_types(registry()).build();

    let resolved = resolver.resolve(Reference::from("App\\Handler")).unwrap();

    assert!(matches!(resolved, ResolvedCallable::Handler { .. }));
    assert_eq!(resolved.method_name(), Some("handle"));
    let handler = resolved
        .instance()
        .and_then(|instance| instance.downcast_ref::<AppHandler>())
        .unwrap();
    assert!(handler.container.is_none());

    let output = resolved.invoke(vec![Arc::new("/users".to_string())]).unwrap();
    assert_eq!(text(&output), "handled /users");
}

#[test]
fn test_constructed_instance_receives_container() {
    init_tracing();
    let container: Arc<dyn LookupService> = Arc::new(ServiceContainer::new());
    let resolver = CallableResolver::builder()
        .with_container(container.clone())
        .with_types(registry())
        .build();

    let resolved = resolver
        .resolve(Reference::from("App\\Handler:describe"))
        .unwrap();

    // 显式方法名，不按请求处理器分发
    assert!(matches!(resolved, ResolvedCallable::Method { .. }));
    let handler = resolved
        .instance()
        .and_then(|instance| instance.downcast_ref::<AppHandler>())
        .unwrap();
    assert!(Arc::ptr_eq(handler.container.as_ref().unwrap(), &container));
}

#[test]
fn test_container_wins_over_construction() {
    init_tracing();
    let container = ServiceContainer::new();
    container.register_instance(
        "App\\Handler",
        Greeter {
            greeting: "Hi".to_string(),
        },
    );
    let resolver = CallableResolver::builder()
        .with_container(Arc::new(container))
        .with_types(registry())
        .build();

    let result = resolver.resolve(Reference::from("App\\Handler"));

    // Greeter 没有任何能力标记
    assert!(matches!(
        result,
        Err(ResolutionError::NotCallable { ref value }) if value == "Greeter"
    ));
}

#[test]
fn test_middleware_is_wrapped_even_if_invocable() {
    init_tracing();
    let resolver = CallableResolver::new(None);

    let resolved = resolver.resolve(Reference::Object(Arc::new(Auth))).unwrap();
    assert!(matches!(resolved, ResolvedCallable::Adapter(_)));

    let next: Arc<dyn Invocable> = Arc::new(NativeCallable::new("next", |args| {
        let path = args
            .first()
            .and_then(|arg| arg.downcast_ref::<String>())
            .cloned()
            .unwrap_or_default();
        Ok(Arc::new(format!("{} -> done", path)))
    }));
    let output = resolved
        .invoke(vec![Arc::new("/admin".to_string()), next_payload(next)])
        .unwrap();
    assert_eq!(text(&output), "/admin [authorized] -> done");
}

#[test]
fn test_middleware_from_container_key() {
    init_tracing();
    let container = ServiceContainer::new();
    container.register_instance("auth", Auth);
    let resolver = CallableResolver::new(Some(Arc::new(container)));

    let resolved = resolver.resolve(Reference::from("auth")).unwrap();
    assert!(matches!(resolved, ResolvedCallable::Adapter(_)));
}

#[test]
fn test_request_handler_object() {
    init_tracing();
    let resolver = CallableResolver::new(None);
    let handler: Arc<dyn Service> = Arc::new(AppHandler { container: None });

    let resolved = resolver.resolve(Reference::Object(handler.clone())).unwrap();

    assert_eq!(resolved.method_name(), Some("handle"));
    assert!(Arc::ptr_eq(resolved.instance().unwrap(), &handler));
}

#[test]
fn test_closure_rebound_to_container() {
    init_tracing();
    let container: Arc<dyn LookupService> = Arc::new(ServiceContainer::new());
    let resolver = CallableResolver::new(Some(container.clone()));
    let closure = Closure::new(|_, _| Ok(Arc::new(())));

    let resolved = resolver.resolve(Reference::Object(Arc::new(closure))).unwrap();

    match resolved {
        ResolvedCallable::Closure(rebound) => {
            let context = rebound.bound_context().unwrap();
            assert!(Arc::ptr_eq(&context, &container));
        }
        other => panic!("期望闭包, 实际 {:?}", other),
    }
}

#[test]
fn test_closure_unchanged_without_container() {
    init_tracing();
    let resolver = CallableResolver::new(None);
    let closure: Arc<dyn Service> = Arc::new(Closure::new(|_, _| Ok(Arc::new(()))));

    let resolved = resolver.resolve(Reference::Object(closure)).unwrap();

    match resolved {
        ResolvedCallable::Closure(returned) => assert!(returned.bound_context().is_none()),
        other => panic!("期望闭包, 实际 {:?}", other),
    }
}

#[test]
fn test_closure_keeps_existing_binding_without_container() {
    init_tracing();
    let original: Arc<dyn LookupService> = Arc::new(ServiceContainer::new());
    let resolver = CallableResolver::new(None);
    let closure = Closure::bound(original.clone(), |_, _| Ok(Arc::new(())));

    let resolved = resolver.resolve(Reference::Object(Arc::new(closure))).unwrap();

    match resolved {
        ResolvedCallable::Closure(returned) => {
            let context = returned.bound_context().unwrap();
            assert!(Arc::ptr_eq(&context, &original));
        }
        other => panic!("期望闭包, 实际 {:?}", other),
    }
}

#[test]
fn test_explicit_pair_returned_unchanged() {
    init_tracing();
    let resolver = CallableResolver::new(None);
    let greeter: Arc<dyn Service> = Arc::new(Greeter {
        greeting: "Hey".to_string(),
    });

    let resolved = resolver
        .resolve(Reference::pair(greeter.clone(), "hello"))
        .unwrap();

    assert!(Arc::ptr_eq(resolved.instance().unwrap(), &greeter));
    assert_eq!(resolved.method_name(), Some("hello"));
}

#[test]
fn test_named_pair_is_looked_up() {
    init_tracing();
    let resolver = CallableResolver::builder().with_types(registry()).build();

    let resolved = resolver
        .resolve(Reference::pair("App\\Handler", "handle"))
        .unwrap();

    // 显式方法对不做能力分类
    assert!(matches!(resolved, ResolvedCallable::Method { .. }));
}

#[test]
fn test_unknown_identifier_not_found() {
    init_tracing();
    let resolver = CallableResolver::builder()
        .with_container(Arc::new(ServiceContainer::new()))
        .with_types(registry())
        .build();

    let result = resolver.resolve(Reference::from("App\\Missing"));
    assert!(matches!(
        result,
        Err(ResolutionError::NotFound { ref identifier }) if identifier == "App\\Missing"
    ));
}

#[test]
fn test_number_not_resolvable() {
    init_tracing();
    let resolver = CallableResolver::new(None);

    let err = resolver.resolve(Reference::from(json!(42))).unwrap_err();
    assert!(matches!(err, ResolutionError::NotResolvable { .. }));
    assert_eq!(err.to_string(), "42 无法解析");
}

#[test]
fn test_non_identifier_method_is_plain_key() {
    init_tracing();
    let container = ServiceContainer::new();
    container.register_instance("route:1", Auth);
    let resolver = CallableResolver::new(Some(Arc::new(container)));

    // "1" 不是合法方法名，整串作为容器键
    let resolved = resolver.resolve(Reference::from("route:1")).unwrap();
    assert!(matches!(resolved, ResolvedCallable::Adapter(_)));
}

#[test]
fn test_resolution_is_repeatable() {
    init_tracing();
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let container = ServiceContainer::new();
    container.register_factory(
        "Greeter",
        move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(Greeter {
                greeting: "Hello".to_string(),
            })
        },
        Lifetime::Singleton,
    );
    let resolver = CallableResolver::new(Some(Arc::new(container)));

    let first = resolver.resolve(Reference::from("Greeter:hello")).unwrap();
    let second = resolver.resolve(Reference::from("Greeter:hello")).unwrap();

    assert!(Arc::ptr_eq(
        first.instance().unwrap(),
        second.instance().unwrap()
    ));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_resolver_shared_across_threads() {
    init_tracing();
    let container = ServiceContainer::new();
    container.register_instance(
        "Greeter",
        Greeter {
            greeting: "Hello".to_string(),
        },
    );
    let resolver = Arc::new(CallableResolver::new(Some(Arc::new(container))));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let resolver = resolver.clone();
            std::thread::spawn(move || {
                resolver
                    .resolve(Reference::from("Greeter:hello"))
                    .map(|resolved| resolved.describe())
            })
        })
        .collect();

    for handle in handles {
        let described = handle.join().unwrap().unwrap();
        assert_eq!(described, "Greeter::hello");
    }
}
