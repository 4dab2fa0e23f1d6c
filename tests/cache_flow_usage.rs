//! Escenario end-to-end: sesión que abre un archivo, encadena un
//! resize y pasa dos veces por el cache (miss y luego hit desde una
//! sesión fresca).
use std::fs;

use pixcache_rust::{CacheSession, CountingEngine, InMemoryCacheGateway, SketchEngine, SourcePath,
                    SourceResolver};

fn fixture_root(file: &str) -> (tempfile::TempDir, SourceResolver) {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join(file), b"jpeg bytes de prueba").unwrap();
    let resolver = SourceResolver::new(vec![dir.path().to_path_buf()]);
    (dir, resolver)
}

#[test]
fn first_get_executes_engine_second_fresh_session_hits() {
    let (_dir, resolver) = fixture_root("a.jpg");
    let engine = CountingEngine::new(SketchEngine::new());
    let mut gateway = InMemoryCacheGateway::new();

    // 1. Primera sesión: cache vacío, el get ejecuta el engine una vez.
    let mut first = CacheSession::new(engine.clone(), &mut gateway, resolver.clone());
    first.open(SourcePath::new("a.jpg").unwrap()).unwrap()
         .resize(300, 200).unwrap();
    let first_bytes = first.get(Some(12)).unwrap();
    assert_eq!(engine.base_count(), 1);
    assert!(!first_bytes.is_empty());
    drop(first);

    // 2. Sesión fresca con las mismas dos llamadas: hit, bytes
    //    idénticos, el engine no vuelve a ejecutar.
    let mut second = CacheSession::new(engine.clone(), &mut gateway, resolver);
    second.open(SourcePath::new("a.jpg").unwrap()).unwrap()
          .resize(300, 200).unwrap();
    let second_bytes = second.get(Some(12)).unwrap();

    assert_eq!(first_bytes, second_bytes);
    assert_eq!(engine.base_count(), 1);
}

#[test]
fn session_resets_after_miss_and_leaves_cache_entry() {
    let (_dir, resolver) = fixture_root("b.jpg");
    let engine = CountingEngine::new(SketchEngine::new());
    let mut gateway = InMemoryCacheGateway::new();

    let mut session = CacheSession::new(engine.clone(), &mut gateway, resolver);
    session.open(SourcePath::new("b.jpg").unwrap()).unwrap()
           .resize(300, 200).unwrap();
    session.get(Some(12)).unwrap();

    // Reset observable tras el process del miss.
    assert_eq!(session.calls().len(), 0);
    assert!(session.properties().is_empty());
    drop(session);
    assert_eq!(gateway.len(), 1);
}

#[test]
fn different_transform_chain_misses_again() {
    let (_dir, resolver) = fixture_root("c.jpg");
    let engine = CountingEngine::new(SketchEngine::new());
    let mut gateway = InMemoryCacheGateway::new();

    let mut first = CacheSession::new(engine.clone(), &mut gateway, resolver.clone());
    first.open(SourcePath::new("c.jpg").unwrap()).unwrap()
         .resize(300, 200).unwrap();
    first.get(Some(12)).unwrap();
    drop(first);

    let mut second = CacheSession::new(engine.clone(), &mut gateway, resolver);
    second.open(SourcePath::new("c.jpg").unwrap()).unwrap()
          .resize(301, 200).unwrap();
    second.get(Some(12)).unwrap();

    // Argumento distinto: clave distinta, segunda ejecución real.
    assert_eq!(engine.base_count(), 2);
    assert_eq!(gateway.len(), 2);
}

#[test]
fn get_image_roundtrip_tags_same_key() {
    let (_dir, resolver) = fixture_root("d.jpg");
    let engine = CountingEngine::new(SketchEngine::new());
    let mut gateway = InMemoryCacheGateway::new();

    let mut first = CacheSession::new(engine.clone(), &mut gateway, resolver.clone());
    first.open(SourcePath::new("d.jpg").unwrap()).unwrap()
         .fit(120, 90).unwrap();
    let live = first.get_image(Some(12)).unwrap();
    drop(first);

    let mut second = CacheSession::new(engine.clone(), &mut gateway, resolver);
    second.open(SourcePath::new("d.jpg").unwrap()).unwrap()
          .fit(120, 90).unwrap();
    let restored = second.get_image(Some(12)).unwrap();

    assert_eq!(live.cache_key(), restored.cache_key());
    assert_eq!(engine.base_count(), 1);
    assert_eq!(engine.decode_count(), 1);
    // La reconstrucción pierde el rastro de procesamiento en vivo.
    assert!(live.surface().trail().len() > 0);
    assert_eq!(restored.surface().trail().len(), 0);
}
