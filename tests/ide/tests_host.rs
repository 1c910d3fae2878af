//! DocumentHost: background generations over a shared resolver.

use std::sync::Arc;
use std::time::Duration;

use msbuild::hir::Resolver;
use msbuild::ide::{DocumentHost, UpdateOutcome};
use msbuild::project::{MemoryFileSystem, ResolveOptions, RuntimeInformation};

use crate::helpers::project_fixtures::{COMMON_PROPS, IMPORTS_COMMON, PROPERTY_AND_ITEM};
use crate::helpers::resolve_helpers::{GatedFileSystem, memory_fs, project_path, resolver_for};

const WAIT: Duration = Duration::from_secs(10);

fn host_with_common(debounce: Duration) -> (DocumentHost, Arc<MemoryFileSystem>) {
    let fs = memory_fs(&[("common.props", COMMON_PROPS)]);
    let resolver = resolver_for(&fs).with_options(ResolveOptions {
        debounce,
        ..ResolveOptions::default()
    });
    (DocumentHost::new(project_path("app.proj"), resolver), fs)
}

#[test]
fn test_update_publishes_in_background() {
    let (host, _) = host_with_common(Duration::ZERO);
    assert_eq!(host.update(IMPORTS_COMMON), UpdateOutcome::Started);
    assert!(host.wait_idle(WAIT));
    assert!(!host.is_resolving());

    let ctx = host.current().unwrap();
    assert!(ctx.property("Shared").is_some());
    assert_eq!(ctx.file(), host.file());
}

#[test]
fn test_readers_keep_their_snapshot() {
    let (host, _) = host_with_common(Duration::ZERO);
    let first = host.resolve_now(PROPERTY_AND_ITEM).unwrap();
    let second = host.resolve_now(IMPORTS_COMMON).unwrap();

    assert!(first.property("Foo").is_some());
    assert!(first.resolved_imports().is_empty());
    assert!(second.property("Foo").is_none());
    assert_eq!(host.generation(), 2);
    assert!(Arc::ptr_eq(&second, &host.current().unwrap()));
}

#[test]
fn test_background_generations_reuse_imports() {
    let (host, fs) = host_with_common(Duration::ZERO);
    let common = std::path::PathBuf::from(project_path("common.props"));

    host.update(IMPORTS_COMMON);
    assert!(host.wait_idle(WAIT));
    let first = host.current().unwrap();

    assert_eq!(host.update(IMPORTS_COMMON.replace("  ", " ")), UpdateOutcome::Started);
    assert!(host.wait_idle(WAIT));
    let second = host.current().unwrap();

    assert_eq!(host.generation(), 2);
    assert!(Arc::ptr_eq(
        &first.resolved_imports()[&common],
        &second.resolved_imports()[&common],
    ));
    assert_eq!(fs.read_count(&common), 1);
}

/// A host whose import reads wait at a gate until the test opens it.
fn gated_host() -> (DocumentHost, Arc<GatedFileSystem>) {
    let gated = GatedFileSystem::new(memory_fs(&[("common.props", COMMON_PROPS)]));
    let resolver = Resolver::new(gated.clone(), RuntimeInformation::default());
    (DocumentHost::new(project_path("app.proj"), resolver), gated)
}

#[test]
fn test_update_while_resolving_is_coalesced() {
    let (host, gated) = gated_host();
    assert_eq!(host.update(IMPORTS_COMMON), UpdateOutcome::Started);
    assert!(gated.wait_for_reader(WAIT));
    assert!(host.is_resolving());

    assert_eq!(host.update(PROPERTY_AND_ITEM), UpdateOutcome::Coalesced);
    assert_eq!(host.update(PROPERTY_AND_ITEM), UpdateOutcome::Coalesced);

    gated.open();
    assert!(host.wait_idle(WAIT));
    assert_eq!(host.generation(), 1);
    let ctx = host.current().unwrap();
    assert!(ctx.property("Shared").is_some());
    assert!(ctx.property("Foo").is_none());
}

#[test]
fn test_update_within_debounce_interval_is_skipped() {
    let (host, _) = host_with_common(Duration::from_secs(3600));
    assert_eq!(host.update(PROPERTY_AND_ITEM), UpdateOutcome::Started);
    assert!(host.wait_idle(WAIT));
    assert_eq!(host.update(IMPORTS_COMMON), UpdateOutcome::Debounced);
    assert!(!host.is_resolving());

    assert_eq!(host.generation(), 1);
    assert!(host.current().unwrap().property("Foo").is_some());
}

#[test]
fn test_close_while_resolving_discards_the_generation() {
    let (host, gated) = gated_host();
    host.resolve_now(PROPERTY_AND_ITEM).unwrap();
    assert_eq!(host.generation(), 1);

    assert_eq!(host.update(IMPORTS_COMMON), UpdateOutcome::Started);
    assert!(gated.wait_for_reader(WAIT));
    host.close();
    assert!(!host.is_resolving());
    assert!(host.current().is_none());

    gated.open();
    assert!(gated.wait_for_finished(1, WAIT));
    assert!(host.wait_idle(WAIT));
    assert_eq!(host.generation(), 1);
    assert!(host.current().is_none());
    assert_eq!(host.update(PROPERTY_AND_ITEM), UpdateOutcome::Closed);
}

#[test]
fn test_close_before_first_generation_publishes_nothing() {
    let (host, gated) = gated_host();
    assert_eq!(host.update(IMPORTS_COMMON), UpdateOutcome::Started);
    assert!(gated.wait_for_reader(WAIT));
    host.close();

    gated.open();
    assert!(gated.wait_for_finished(1, WAIT));
    assert!(host.wait_idle(WAIT));
    assert_eq!(host.generation(), 0);
    assert!(host.current().is_none());
}
