use framename::domain::{ClassRef, Epoch, IntrospectionError, MethodId, Tid};
use framename::managed::{Introspection, MethodInfo, Modifiers};
use framename::symbolization::NoLibraries;
use framename::{
    Collaborators, FormatterConfig, Frame, FrameNameFormatter, MethodNameCache, Style, ThreadNames,
};
use framename_common::{encode_frame_type, FrameTypeId, RawFrame, BCI_ALLOC, BCI_THREAD_ID};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Runtime stub: method `n` is `pkg/Cls<n>.method<n>`, except 0xbad which fails
#[derive(Default)]
struct FakeRuntime {
    lookups: AtomicUsize,
}

impl Introspection for FakeRuntime {
    fn method_info(&self, method: MethodId) -> Result<MethodInfo, IntrospectionError> {
        self.lookups.fetch_add(1, Ordering::Relaxed);
        if method.0 == 0xbad {
            return Err(IntrospectionError::new(23));
        }
        Ok(MethodInfo {
            name: format!("method{}", method.0),
            signature: "(Ljava/lang/Object;)V".to_string(),
            declaring_class: ClassRef(method.0),
        })
    }

    fn class_descriptor(&self, class: ClassRef) -> Result<String, IntrospectionError> {
        Ok(format!("Lpkg/Cls{};", class.0))
    }

    fn modifiers(&self, _method: MethodId) -> Result<Modifiers, IntrospectionError> {
        Ok(Modifiers::PUBLIC)
    }
}

struct World {
    runtime: FakeRuntime,
    classes: HashMap<u32, String>,
    threads: Mutex<ThreadNames>,
}

impl World {
    fn new() -> Self {
        Self {
            runtime: FakeRuntime::default(),
            classes: HashMap::from([(1, "java/lang/String".to_string()), (2, "[[I".to_string())]),
            threads: Mutex::new(HashMap::from([(Tid(42), "main".to_string())])),
        }
    }

    fn formatter(
        &self,
        config: FormatterConfig,
        cache: &Arc<MethodNameCache>,
    ) -> FrameNameFormatter<'_> {
        let collaborators = Collaborators {
            introspection: &self.runtime,
            libraries: &NoLibraries,
            classes: &self.classes,
            thread_names: &self.threads,
        };
        FrameNameFormatter::new(config, collaborators, Arc::clone(cache))
    }
}

fn decode(method_id: u64, bci: i32) -> Frame {
    Frame::decode(&RawFrame::new(method_id, bci), |_| None)
}

#[test]
fn test_same_method_same_name_within_session() {
    let world = World::new();
    let cache = Arc::new(MethodNameCache::new());
    let fmt = world.formatter(FormatterConfig::new(Style::DOTTED_NAMES, Epoch(0), 0), &cache);

    let frame = decode(17, 4);
    let first = fmt.name(&frame, false);
    let second = fmt.name(&frame, false);

    assert_eq!(first, "pkg.Cls17.method17");
    assert_eq!(first, second);
    assert_eq!(world.runtime.lookups.load(Ordering::Relaxed), 1);
}

#[test]
fn test_cache_survives_sessions_until_stale() {
    let world = World::new();
    let cache = Arc::new(MethodNameCache::new());
    let max_age = 2;

    // Session 0 resolves methods 1 and 2
    {
        let fmt = world.formatter(FormatterConfig::new(Style::empty(), Epoch(0), max_age), &cache);
        let _ = fmt.name(&decode(1, 0), false);
        let _ = fmt.name(&decode(2, 0), false);
    }
    assert_eq!(cache.len(), 2);

    // Session 1 only touches method 2
    {
        let fmt = world.formatter(FormatterConfig::new(Style::empty(), Epoch(1), max_age), &cache);
        let _ = fmt.name(&decode(2, 0), false);
    }
    assert_eq!(cache.len(), 2, "method 1 is only one session old");

    // Session 2: method 1 reaches age 2 and is evicted, method 2 has age 1
    drop(world.formatter(FormatterConfig::new(Style::empty(), Epoch(2), max_age), &cache));
    assert_eq!(cache.get(MethodId(1)), None);
    assert_eq!(cache.get(MethodId(2)).as_deref(), Some("pkg/Cls2.method2"));
}

#[test]
fn test_zero_max_age_clears_at_teardown() {
    let world = World::new();
    let cache = Arc::new(MethodNameCache::new());
    {
        let fmt = world.formatter(FormatterConfig::new(Style::empty(), Epoch(9), 0), &cache);
        let _ = fmt.name(&decode(1, 0), false);
    }
    assert!(cache.is_empty());
}

#[test]
fn test_tier_suffix_applied_after_cache() {
    let world = World::new();
    let cache = Arc::new(MethodNameCache::new());
    let interpreted = decode(5, encode_frame_type(FrameTypeId::Interpreted, 0));
    let compiled = decode(5, encode_frame_type(FrameTypeId::JitCompiled, 0));

    let plain = world.formatter(FormatterConfig::new(Style::SIMPLE_NAMES, Epoch(0), 1), &cache);
    assert_eq!(plain.name(&interpreted, false), "Cls5.method5");
    assert_eq!(plain.name(&compiled, false), "Cls5.method5");
    drop(plain);

    let config = FormatterConfig::new(Style::SIMPLE_NAMES | Style::ANNOTATE_TIER, Epoch(0), 1);
    let annotated = world.formatter(config, &cache);
    assert_eq!(annotated.name(&interpreted, false), "Cls5.method5_[0]");
    assert_eq!(annotated.name(&compiled, false), "Cls5.method5_[j]");
    assert_eq!(cache.get(MethodId(5)).as_deref(), Some("Cls5.method5"));
}

#[test]
fn test_introspection_failure_does_not_stop_session() {
    let world = World::new();
    let cache = Arc::new(MethodNameCache::new());
    let fmt = world.formatter(FormatterConfig::new(Style::SIGNATURES, Epoch(0), 0), &cache);

    assert_eq!(fmt.name(&decode(0xbad, 0), false), "[introspection-error 23]");
    assert_eq!(fmt.name(&decode(3, 0), false), "pkg/Cls3.method3(Ljava/lang/Object;)V");
}

#[test]
fn test_thread_id_frames() {
    let world = World::new();
    let cache = Arc::new(MethodNameCache::new());
    let fmt = world.formatter(FormatterConfig::default(), &cache);

    assert_eq!(fmt.name(&decode(42, BCI_THREAD_ID), false), "[main tid=42]");
    world.threads.lock().unwrap().clear();
    assert_eq!(fmt.name(&decode(42, BCI_THREAD_ID), false), "[tid=42]");
}

#[test]
fn test_class_rendering_for_allocations() {
    let world = World::new();
    let cache = Arc::new(MethodNameCache::new());
    let fmt = world.formatter(FormatterConfig::new(Style::SIMPLE_NAMES, Epoch(0), 0), &cache);

    assert_eq!(fmt.name(&decode(2, BCI_ALLOC), true), "int[][]");
    assert_eq!(fmt.name(&decode(1, BCI_ALLOC), true), "String");
    assert_eq!(fmt.name(&decode(1, BCI_ALLOC), false), "String_[i]");
}

#[test]
fn test_filters_from_wire_buffer() {
    let world = World::new();
    let cache = Arc::new(MethodNameCache::new());

    let mut buffer = framename::filter::FilterBuffer::new();
    buffer.append_include("pkg/*");
    buffer.append_exclude("*method7");
    let config = FormatterConfig::default()
        .with_filter_buffer(buffer.as_bytes(), buffer.include_head(), buffer.exclude_head())
        .unwrap();
    let fmt = world.formatter(config, &cache);

    assert!(fmt.has_include_list());
    assert!(fmt.has_exclude_list());

    let seven = fmt.name(&decode(7, 0), true);
    assert!(fmt.include(&seven));
    assert!(fmt.exclude(&seven));
    assert!(!fmt.exclude(&fmt.name(&decode(8, 0), true)));
    assert!(!fmt.include("java/lang/Thread.run"));
}

#[test]
fn test_concurrent_formatters_share_cache() {
    let world = World::new();
    let cache = Arc::new(MethodNameCache::new());

    std::thread::scope(|s| {
        for _ in 0..4 {
            s.spawn(|| {
                let config = FormatterConfig::new(Style::DOTTED_NAMES, Epoch(1), 3);
                let fmt = world.formatter(config, &cache);
                for id in 1..=32u64 {
                    assert_eq!(fmt.name(&decode(id, 0), false), format!("pkg.Cls{id}.method{id}"));
                }
            });
        }
    });

    assert_eq!(cache.len(), 32);
    // Concurrent misses may render twice, but never more than once per thread
    let lookups = world.runtime.lookups.load(Ordering::Relaxed);
    assert!((32..=4 * 32).contains(&lookups), "{lookups} lookups");
}
