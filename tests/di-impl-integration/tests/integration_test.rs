//! Centralized integration tests for di-impl crate
use di_abstractions::{
    inject, instantiate, lazy, proto_of, BeanConfig, BeanDefinition, BeanRegistry, Class,
    Namespace, ObjectRef, Value,
};
use di_impl::{bake_beans, bake_beans_with};
use infrastructure_common::{ContainerOptions, DependencyError, NodeState, CONTEXT_HOOK, INIT_HOOK};
use infrastructure_composition::ContainerBuilder;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Once};

static INIT_LOGGER: Once = Once::new();

/// 初始化测试日志系统（只初始化一次）
fn init_test_logger() {
    INIT_LOGGER.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter("debug")
            .with_test_writer()
            .try_init()
            .ok(); // 忽略初始化失败的错误
    });
}

/// 读取对象属性并要求它是对象
fn object_prop(object: &ObjectRef, name: &str) -> ObjectRef {
    object
        .get(name)
        .and_then(|value| value.as_object().cloned())
        .unwrap_or_else(|| panic!("property `{name}` is not an object"))
}

/// 构造函数把第一个参数保存到 `property`
fn storing_first_arg(name: &str, property: &'static str) -> Class {
    Class::new(name, move |this, args| {
        this.set(property, args.first().cloned().unwrap_or_default());
        Ok(())
    })
}

/// 构造函数在 `property` 上放置指向 `target` 的占位符
fn injecting(name: &str, property: &'static str, target: &Class) -> Class {
    let target = target.clone();
    Class::new(name, move |this, _| {
        this.set(property, inject(&target)?);
        Ok(())
    })
}

/// 一对通过属性相互引用的类
fn mutually_referencing() -> (Class, Class) {
    let class_a = Class::declare("ClassA");
    let class_b = Class::declare("ClassB");
    let b = class_b.clone();
    class_a.define(move |this, _| {
        this.set("classB", inject(&b)?);
        Ok(())
    });
    let a = class_a.clone();
    class_b.define(move |this, _| {
        this.set("classA", inject(&a)?);
        Ok(())
    });
    (class_a, class_b)
}

#[test]
fn test_inject_dependencies_by_constructor_args() -> anyhow::Result<()> {
    init_test_logger();
    let class_b = Class::plain("ClassB");
    let class_a = storing_first_arg("ClassA", "classB");

    let context = bake_beans(
        &BeanConfig::new()
            .bean("classA", instantiate(&class_a).with_arg(inject(&class_b)?))
            .bean("classB", instantiate(&class_b)),
    )?;

    let a = context.get_object(&class_a)?;
    let b = context.get_object(&class_b)?;
    assert!(object_prop(&a, "classB").ptr_eq(&b));
    Ok(())
}

#[test]
fn test_inject_dependencies_on_properties() -> anyhow::Result<()> {
    let class_b = Class::plain("ClassB");
    let class_a = injecting("ClassA", "classB", &class_b);

    let context = bake_beans(
        &BeanConfig::new()
            .bean("classA", class_a.instantiate(Vec::<Value>::new())?)
            .bean("classB", class_b.instantiate(Vec::<Value>::new())?),
    )?;

    let a = context.get_object(&class_a)?;
    let b = context.get_object(&class_b)?;
    assert!(object_prop(&a, "classB").ptr_eq(&b));
    Ok(())
}

#[test]
fn test_cross_dependencies_on_already_created_beans() -> anyhow::Result<()> {
    let (class_a, class_b) = mutually_referencing();

    let context = bake_beans(
        &BeanConfig::new()
            .bean("classA", class_a.instantiate(Vec::<Value>::new())?)
            .bean("classB", class_b.instantiate(Vec::<Value>::new())?),
    )?;

    let a = context.get_object(&class_a)?;
    let b = context.get_object(&class_b)?;
    assert!(object_prop(&a, "classB").ptr_eq(&b));
    assert!(object_prop(&b, "classA").ptr_eq(&a));
    Ok(())
}

#[test]
fn test_cross_dependencies_on_singleton_beans() -> anyhow::Result<()> {
    let (class_a, class_b) = mutually_referencing();

    let context = bake_beans(
        &BeanConfig::new()
            .bean("classA", instantiate(&class_a))
            .bean("classB", instantiate(&class_b)),
    )?;

    let a = context.get_object(&class_a)?;
    let b = context.get_object(&class_b)?;
    assert!(object_prop(&a, "classB").ptr_eq(&b));
    assert!(object_prop(&b, "classA").ptr_eq(&a));
    Ok(())
}

#[test]
fn test_cross_dependencies_on_lazy_singleton_beans() -> anyhow::Result<()> {
    let (class_a, class_b) = mutually_referencing();

    let context = bake_beans(
        &BeanConfig::new()
            .bean("classA", lazy(&class_a))
            .bean("classB", lazy(&class_b)),
    )?;
    assert_eq!(context.state_of("classA"), Some(NodeState::Pending));
    assert_eq!(context.state_of("classB"), Some(NodeState::Pending));

    let a = context.get_object(&class_a)?;
    let b = context.get_object(&class_b)?;
    assert!(object_prop(&a, "classB").ptr_eq(&b));
    assert!(object_prop(&b, "classA").ptr_eq(&a));
    assert_eq!(context.state_of("classB"), Some(NodeState::Constructed));
    Ok(())
}

#[test]
fn test_property_cycle_of_three_beans() -> anyhow::Result<()> {
    let class_a = Class::declare("ClassA");
    let class_b = Class::declare("ClassB");
    let class_c = Class::declare("ClassC");
    for (class, property, target) in [
        (&class_a, "next", "b"),
        (&class_b, "next", "c"),
        (&class_c, "next", "a"),
    ] {
        class.define(move |this, _| {
            this.set(property, inject(target)?);
            Ok(())
        });
    }

    let context = bake_beans(
        &BeanConfig::new()
            .bean("a", instantiate(&class_a))
            .bean("b", lazy(&class_b))
            .bean("c", instantiate(&class_c)),
    )?;

    let a = context.get_object("a")?;
    let b = context.get_object("b")?;
    let c = context.get_object("c")?;
    assert!(object_prop(&a, "next").ptr_eq(&b));
    assert!(object_prop(&b, "next").ptr_eq(&c));
    assert!(object_prop(&c, "next").ptr_eq(&a));
    Ok(())
}

#[test]
fn test_inject_mixed_dependencies() -> anyhow::Result<()> {
    let class_b = Class::plain("ClassB");
    let class_c = Class::plain("ClassC");
    let c = class_c.clone();
    let class_a = Class::new("ClassA", move |this, args| {
        this.set("classB", args.first().cloned().unwrap_or_default());
        this.set("classC", inject(&c)?);
        Ok(())
    });

    let context = bake_beans(
        &BeanConfig::new()
            .bean("classA", instantiate(&class_a).with_arg(inject(&class_b)?))
            .bean("classB", class_b.instantiate(Vec::<Value>::new())?)
            .bean("classC", proto_of(&class_c)),
    )?;

    let a = context.get_object(&class_a)?;
    assert!(object_prop(&a, "classB").is_instance_of(&class_b));
    assert!(object_prop(&a, "classC").is_instance_of(&class_c));
    assert_eq!(context.stats().prototype_instances, 1);
    Ok(())
}

#[test]
fn test_circular_dependencies_in_constructors() {
    let class_a = Class::plain("ClassA");
    let class_b = Class::plain("ClassB");
    let class_c = Class::plain("ClassC");

    let config = BeanConfig::new()
        .bean("a", instantiate(&class_a).with_arg(inject("b").unwrap()))
        .bean("b", instantiate(&class_b).with_arg(inject(&class_c).unwrap()))
        .bean("c", instantiate(&class_c).with_arg(inject(&class_a).unwrap()));

    let error = bake_beans(&config).unwrap_err();
    assert_eq!(
        error.to_string(),
        "Circular dependencies found. If it is possible try inject those dependencies by properties instead by arguments."
    );
    match error {
        DependencyError::CircularDependency { chain } => {
            assert_eq!(chain, vec!["a", "b", "c", "a"]);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_circular_dependency_through_lazy_bean() {
    let class_a = Class::plain("ClassA");
    let class_b = Class::plain("ClassB");
    let config = BeanConfig::new()
        .bean("a", lazy(&class_a).with_arg(inject("b").unwrap()))
        .bean("b", lazy(&class_b).with_arg(inject("a").unwrap()));

    assert!(bake_beans(&config).unwrap_err().is_circular());

    // 关闭构图检测后，循环在首次查找时被发现
    let options = ContainerOptions {
        detect_circular_dependencies: false,
        ..ContainerOptions::default()
    };
    let context = bake_beans_with(&config, Namespace::new(), options).unwrap();
    assert!(context.get_bean("a").unwrap_err().is_circular());
    assert_eq!(context.state_of("a"), Some(NodeState::Pending));
}

#[test]
fn test_inject_dependency_by_dotted_string_class() -> anyhow::Result<()> {
    let class_b = Class::plain("ClassB");
    let class_a = Class::new("ClassA", |this, _| {
        this.set("classB", inject("org.ClassB")?);
        Ok(())
    });
    let namespace = Namespace::new()
        .with_class("org.ClassA", &class_a)
        .with_class("org.ClassB", &class_b);

    let context = bake_beans_with(
        &BeanConfig::new()
            .bean("classA", class_a.instantiate(Vec::<Value>::new())?)
            .bean("classB", class_b.instantiate(Vec::<Value>::new())?),
        namespace,
        ContainerOptions::default(),
    )?;

    let a = context.get_object("org.ClassA")?;
    let b = context.get_object("org.ClassB")?;
    assert!(object_prop(&a, "classB").ptr_eq(&b));
    assert!(b.ptr_eq(&context.get_object("classB")?));
    Ok(())
}

#[test]
fn test_not_existing_bean_by_constructor_dependency() {
    let class = Class::plain("Class");
    let config = BeanConfig::new().bean(
        "aClass",
        instantiate(&class).with_arg(inject("not existing bean").unwrap()),
    );

    let message = bake_beans(&config).unwrap_err().to_string();
    assert!(message.contains("Bean: `not existing bean` couldn't be found from injection at line:"));
    assert!(message.contains("integration_test.rs"));
}

#[test]
fn test_not_existing_bean_by_object_property() {
    let class = Class::new("Class", |this, _| {
        this.set("classX", inject("not existing bean")?);
        Ok(())
    });
    let config = BeanConfig::new().bean("aClass", instantiate(&class));

    let error = bake_beans(&config).unwrap_err();
    assert!(error.is_not_found());
    assert!(error
        .to_string()
        .contains("Bean: `not existing bean` couldn't be found from injection at line:"));
}

#[test]
fn test_not_existing_bean_displays_class_name() {
    let not_existing = Class::plain("NotExistingClass");
    let class = injecting("Class", "classX", &not_existing);
    let config = BeanConfig::new().bean("aClass", instantiate(&class));

    let message = bake_beans(&config).unwrap_err().to_string();
    assert!(message.contains("Bean: `NotExistingClass` couldn't be found from injection at line:"));
}

#[test]
fn test_lookup_of_missing_bean_reports_identity_only() -> anyhow::Result<()> {
    let context = bake_beans(&BeanConfig::new().bean("answer", BeanDefinition::raw(42)))?;
    let error = context.get_bean("question").unwrap_err();
    assert_eq!(error.to_string(), "Bean: `question` couldn't be found");
    assert!(matches!(error, DependencyError::LookupFailed { .. }));
    Ok(())
}

/// 构造时定义两个记录调用顺序的钩子
fn hooked(
    name: &'static str,
    inits: &Arc<Mutex<Vec<&'static str>>>,
    contexts: &Arc<Mutex<Vec<&'static str>>>,
    dependency: Option<&'static str>,
) -> Class {
    let inits = Arc::clone(inits);
    let contexts = Arc::clone(contexts);
    Class::new(name, move |this, _| {
        if let Some(key) = dependency {
            this.set(key, inject(key)?);
        }
        let inits = Arc::clone(&inits);
        this.define_method(INIT_HOOK, move |_| {
            inits.lock().push(name);
            Ok(())
        });
        let contexts = Arc::clone(&contexts);
        this.define_method(CONTEXT_HOOK, move |_| {
            contexts.lock().push(name);
            Ok(())
        });
        Ok(())
    })
}

#[test]
fn test_lifecycle_hooks_in_dependency_order() -> anyhow::Result<()> {
    init_test_logger();
    let inits = Arc::new(Mutex::new(Vec::new()));
    let contexts = Arc::new(Mutex::new(Vec::new()));

    let class_a = hooked("ClassA", &inits, &contexts, Some("classB"));
    let class_b = hooked("ClassB", &inits, &contexts, Some("classC"));
    let class_c = hooked("ClassC", &inits, &contexts, None);
    let class_d = hooked("ClassD", &inits, &contexts, None);

    let context = bake_beans(
        &BeanConfig::new()
            .bean("classC", instantiate(&class_c).with_arg(inject("classD")?))
            .bean("classA", class_a.instantiate(Vec::<Value>::new())?)
            .bean("classD", class_d.instantiate(Vec::<Value>::new())?)
            .bean("classB", class_b.instantiate(Vec::<Value>::new())?),
    )?;

    assert_eq!(*inits.lock(), vec!["ClassD", "ClassC", "ClassB", "ClassA"]);
    assert_eq!(*contexts.lock(), vec!["ClassD", "ClassC", "ClassB", "ClassA"]);
    assert_eq!(context.stats().init_hooks_invoked, 4);
    assert_eq!(context.stats().context_hooks_invoked, 4);
    Ok(())
}

#[test]
fn test_lifecycle_hooks_run_on_lazy_first_lookup() -> anyhow::Result<()> {
    let inits = Arc::new(Mutex::new(Vec::new()));
    let contexts = Arc::new(Mutex::new(Vec::new()));
    let class_a = hooked("ClassA", &inits, &contexts, Some("classB"));
    let class_b = hooked("ClassB", &inits, &contexts, None);

    let context = bake_beans(
        &BeanConfig::new()
            .bean("classA", lazy(&class_a))
            .bean("classB", lazy(&class_b)),
    )?;
    assert!(inits.lock().is_empty());

    context.get_bean("classA")?;
    assert_eq!(*inits.lock(), vec!["ClassB", "ClassA"]);
    assert_eq!(*contexts.lock(), vec!["ClassB", "ClassA"]);

    // 已构造的延迟单例不会再次触发钩子
    context.get_bean("classB")?;
    assert_eq!(inits.lock().len(), 2);
    Ok(())
}

#[test]
fn test_overwrite_properties_on_bean_definition() -> anyhow::Result<()> {
    let class_a = Class::new("ClassA", |this, _| {
        this.set("field1", "Value 1");
        this.set("field2", inject("ClassB")?);
        Ok(())
    });
    let class_c = Class::plain("ClassC");

    let config = BeanConfig::new()
        .bean("bean1", class_c.instantiate(Vec::<Value>::new())?)
        .bean(
            "bean2",
            instantiate(&class_a).with_props([
                ("field1", Value::from("Value 2")),
                ("field2", Value::from(inject("bean1")?)),
            ]),
        )
        .bean(
            "bean3",
            proto_of(&class_a).with_props([
                ("field1", Value::from("Value 3")),
                ("field2", Value::from(inject("bean1")?)),
            ]),
        )
        .bean(
            "bean4",
            lazy(&class_a).with_props([
                ("field1", Value::from("Value 4")),
                ("field2", Value::from(inject("bean1")?)),
            ]),
        );
    let context = bake_beans(&config)?;

    let bean1 = context.get_object("bean1")?;
    for (key, expected) in [("bean2", "Value 2"), ("bean3", "Value 3"), ("bean4", "Value 4")] {
        let bean = context.get_object(key)?;
        assert_eq!(bean.get("field1"), Some(Value::from(expected)));
        assert!(object_prop(&bean, "field2").ptr_eq(&bean1));
    }
    Ok(())
}

#[test]
fn test_instantiate_global_accessible_classes_by_string() -> anyhow::Result<()> {
    let global = Class::new("GlobalClass", |this, _| {
        this.set("field", "Value");
        Ok(())
    });

    let context = ContainerBuilder::new()
        .with_class("GlobalClass", &global)
        .build(
            &BeanConfig::new()
                .bean("bean1", instantiate("GlobalClass"))
                .bean("bean2", proto_of("GlobalClass"))
                .bean("bean3", lazy("GlobalClass")),
        )?;

    for key in ["bean1", "bean2", "bean3"] {
        assert!(context.get_object(key)?.is_instance_of(&global));
    }
    Ok(())
}

#[test]
fn test_unknown_global_class() {
    let error = bake_beans(&BeanConfig::new().bean("bean1", instantiate("GlobalClass"))).unwrap_err();
    assert!(matches!(error, DependencyError::ClassNotFound { .. }));
}

#[test]
fn test_inject_invalid_bean() {
    for error in [
        inject(None::<&str>).unwrap_err(),
        inject(None::<&Class>).unwrap_err(),
        inject("").unwrap_err(),
    ] {
        assert_eq!(error.to_string(), "Trying to inject invalid empty bean");
    }
}

#[test]
fn test_inject_by_custom_dependency_injector() -> anyhow::Result<()> {
    let class_a = Class::new("ClassA", |this, _| {
        let descriptor = inject("ClassB")?.by(|point, dependency| {
            let value = dependency
                .as_object()
                .and_then(|object| object.get("value"))
                .unwrap_or_default();
            point.assign(value);
            Ok(())
        });
        this.set("bValue", descriptor);
        Ok(())
    });
    let class_b = Class::new("ClassB", |this, _| {
        this.set("value", "ClassB value");
        Ok(())
    });

    let context = bake_beans(
        &BeanConfig::new()
            .bean("ClassA", instantiate(&class_a))
            .bean("ClassB", instantiate(&class_b)),
    )?;

    assert_eq!(
        context.get_object("ClassA")?.get("bValue"),
        Some(Value::from("ClassB value"))
    );
    Ok(())
}

fn take_value(dependency: &Value) -> Value {
    dependency
        .as_object()
        .and_then(|object| object.get("value"))
        .unwrap_or_default()
}

#[test]
fn test_inject_through_dependency_converter() -> anyhow::Result<()> {
    let class_a = Class::new("ClassA", |this, args| {
        this.set("argValue", args.first().cloned().unwrap_or_default());
        this.set("argPropertyValue", args.get(1).cloned().unwrap_or_default());
        this.set("throughValue", inject("ClassB")?.through(take_value));
        this.set("propertyValue", inject("ClassB")?.property("value"));
        Ok(())
    });
    let class_b = Class::new("ClassB", |this, _| {
        this.set("value", "ClassB value");
        Ok(())
    });

    let context = bake_beans(
        &BeanConfig::new()
            .bean(
                "ClassA",
                instantiate(&class_a).with_args([
                    inject("ClassB")?.through(take_value),
                    inject("ClassB")?.property("value"),
                ]),
            )
            .bean("ClassB", instantiate(&class_b)),
    )?;

    let bean_a = context.get_object("ClassA")?;
    for property in ["argValue", "argPropertyValue", "propertyValue", "throughValue"] {
        assert_eq!(bean_a.get(property), Some(Value::from("ClassB value")), "{property}");
    }
    Ok(())
}

#[test]
fn test_inject_property_with_default_value() -> anyhow::Result<()> {
    let class_a = Class::new("ClassA", |this, _| {
        this.set("propA", inject("ClassB")?.property_or("propA", "defaultA"));
        this.set("propB", inject("ClassB")?.property_or("propB", "defaultB"));
        this.set("propC", inject("ClassB")?.property_or("propC", "defaultC"));
        this.set("propD", inject("ClassB")?.property("propD"));
        Ok(())
    });
    let class_b = Class::new("ClassB", |this, _| {
        this.set("propA", "propA");
        this.set("propB", Value::Null);
        Ok(())
    });

    let context = bake_beans(
        &BeanConfig::new()
            .bean("ClassA", instantiate(&class_a))
            .bean("ClassB", instantiate(&class_b)),
    )?;

    let bean_a = context.get_object("ClassA")?;
    assert_eq!(bean_a.get("propA"), Some(Value::from("propA")));
    assert_eq!(bean_a.get("propB"), Some(Value::Null));
    assert_eq!(bean_a.get("propC"), Some(Value::from("defaultC")));
    assert_eq!(bean_a.get("propD"), Some(Value::Null));
    Ok(())
}

#[test]
fn test_lazy_singleton_constructed_once() -> anyhow::Result<()> {
    let constructed = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&constructed);
    let shared = Class::new("Shared", move |_, _| {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(())
    });
    let user = storing_first_arg("User", "shared");
    let watcher = injecting("Watcher", "shared", &shared);

    let context = bake_beans(
        &BeanConfig::new()
            .bean("shared", lazy(&shared))
            .bean("user1", instantiate(&user).with_arg(inject("shared")?))
            .bean("user2", instantiate(&user).with_arg(inject(&shared)?))
            .bean("watcher", instantiate(&watcher)),
    )?;

    assert_eq!(constructed.load(Ordering::SeqCst), 1);
    let instance = context.get_object("shared")?;
    assert!(instance.ptr_eq(&context.get_object(&shared)?));
    assert!(object_prop(&context.get_object("user1")?, "shared").ptr_eq(&instance));
    assert!(object_prop(&context.get_object("user2")?, "shared").ptr_eq(&instance));
    assert!(object_prop(&context.get_object("watcher")?, "shared").ptr_eq(&instance));
    assert_eq!(constructed.load(Ordering::SeqCst), 1);
    Ok(())
}

#[test]
fn test_prototype_produces_distinct_instances() -> anyhow::Result<()> {
    let part = Class::plain("Part");
    let service = Class::plain("Service");
    let s = service.clone();
    let p = part.clone();
    let product = Class::new("Product", move |this, _| {
        this.set("service", inject(&s)?);
        this.set("part", inject(&p)?);
        Ok(())
    });

    let context = bake_beans(
        &BeanConfig::new()
            .bean("service", instantiate(&service))
            .bean("part", proto_of(&part))
            .bean("product", proto_of(&product)),
    )?;

    let first = context.get_object("product")?;
    let second = context.get_object(&product)?;
    assert!(!first.ptr_eq(&second));

    // 单例依赖共享，原型依赖每次重新解析
    assert!(object_prop(&first, "service").ptr_eq(&object_prop(&second, "service")));
    assert!(!object_prop(&first, "part").ptr_eq(&object_prop(&second, "part")));
    assert_eq!(context.stats().prototype_instances, 4);
    Ok(())
}

#[test]
fn test_prototype_chain_is_bounded() {
    let ping = Class::declare("Ping");
    let pong = Class::declare("Pong");
    ping.define(|this, _| {
        this.set("pong", inject("pong")?);
        Ok(())
    });
    pong.define(|this, _| {
        this.set("ping", inject("ping")?);
        Ok(())
    });
    let options = ContainerOptions {
        max_resolution_depth: 10,
        ..ContainerOptions::default()
    };

    let context = bake_beans_with(
        &BeanConfig::new()
            .bean("ping", proto_of(&ping))
            .bean("pong", proto_of(&pong)),
        Namespace::new(),
        options,
    )
    .unwrap();

    assert!(matches!(
        context.get_bean("ping"),
        Err(DependencyError::ResolutionDepthExceeded { max_depth: 10, .. })
    ));
}

#[test]
fn test_rebuild_from_same_configuration() -> anyhow::Result<()> {
    let (class_a, class_b) = mutually_referencing();
    let raw_a = class_a.instantiate(Vec::<Value>::new())?;
    let config = BeanConfig::new()
        .bean("classA", &raw_a)
        .bean("classB", instantiate(&class_b));

    let first = bake_beans(&config)?;
    let second = bake_beans(&config)?;

    let a1 = first.get_object("classA")?;
    let a2 = second.get_object("classA")?;
    assert!(!a1.ptr_eq(&a2));
    assert!(object_prop(&a1, "classB").ptr_eq(&first.get_object("classB")?));
    assert!(object_prop(&a2, "classB").ptr_eq(&second.get_object("classB")?));

    // 配置中的原始对象保持未装配
    assert!(raw_a.get("classB").unwrap().as_inject().is_some());
    Ok(())
}

#[test]
fn test_raw_primitive_beans() -> anyhow::Result<()> {
    let class = Class::new("Settings", |this, args| {
        this.set("port", args.first().cloned().unwrap_or_default());
        Ok(())
    });
    let context = bake_beans(
        &BeanConfig::new()
            .bean("port", BeanDefinition::raw(8080))
            .bean("settings", instantiate(&class).with_arg(inject("port")?)),
    )?;

    assert_eq!(context.get_bean("port")?, Value::Int(8080));
    assert_eq!(context.get_object("settings")?.get("port"), Some(Value::Int(8080)));
    assert_eq!(context.stats().registered_beans, 2);
    assert_eq!(context.stats().constructed_beans, 2);
    Ok(())
}

#[test]
fn test_long_constructor_chain_is_fully_constructed() -> anyhow::Result<()> {
    init_test_logger();

    let link = storing_first_arg("Link", "next");
    let mut config = BeanConfig::new();
    for index in 0..150 {
        let definition = if index < 149 {
            instantiate(&link).with_arg(inject(format!("n{}", index + 1))?)
        } else {
            instantiate(&link)
        };
        config = config.bean(format!("n{index}"), definition);
    }

    let context = bake_beans(&config)?;
    assert_eq!(context.stats().constructed_beans, 150);
    let head = context.get_object("n0")?;
    assert!(object_prop(&head, "next").ptr_eq(&context.get_object("n1")?));
    Ok(())
}

#[test]
fn test_failed_lazy_lookup_can_be_retried() -> anyhow::Result<()> {
    init_test_logger();

    let broken = Class::new("Broken", |this, _| {
        this.set("missing", inject("nowhere")?);
        Ok(())
    });
    let context = bake_beans(&BeanConfig::new().bean("broken", lazy(&broken)))?;

    for _ in 0..2 {
        let error = context.get_bean("broken").unwrap_err();
        assert!(error.to_string().starts_with("Bean: `nowhere` couldn't be found from injection at line:"));
        assert_eq!(context.state_of("broken"), Some(NodeState::Pending));
    }
    assert_eq!(context.stats().constructed_beans, 0);
    Ok(())
}

#[test]
fn test_property_accessor_waits_for_dependency_wiring() -> anyhow::Result<()> {
    init_test_logger();

    let class_a = Class::new("ClassA", |this, _| {
        this.set("x", inject("b")?.property("y"));
        Ok(())
    });
    let class_b = Class::new("ClassB", |this, _| {
        this.set("y", inject("c")?);
        Ok(())
    });
    let settings = Class::plain("Settings").instantiate(Vec::<Value>::new())?;
    settings.set("name", "settings");

    let context = bake_beans(
        &BeanConfig::new()
            .bean("a", instantiate(&class_a))
            .bean("b", instantiate(&class_b))
            .bean("c", &settings),
    )?;

    let c = context.get_object("c")?;
    assert!(object_prop(&context.get_object("a")?, "x").ptr_eq(&c));
    assert!(object_prop(&context.get_object("b")?, "y").ptr_eq(&c));
    Ok(())
}

#[test]
fn test_literal_reference_to_raw_object_uses_context_copy() -> anyhow::Result<()> {
    init_test_logger();

    let (class_a, class_b) = mutually_referencing();
    let raw_a = class_a.instantiate(Vec::<Value>::new())?;
    let holder = Class::plain("Holder");

    let context = bake_beans(
        &BeanConfig::new()
            .bean("classA", &raw_a)
            .bean("classB", instantiate(&class_b))
            .bean("holder", instantiate(&holder).with_prop("a", &raw_a)),
    )?;

    let a = context.get_object("classA")?;
    let held = object_prop(&context.get_object("holder")?, "a");
    assert!(held.ptr_eq(&a));
    assert!(!held.ptr_eq(&raw_a));
    assert!(object_prop(&held, "classB").ptr_eq(&context.get_object("classB")?));
    Ok(())
}
