//! Binario de validación manual del cache de transformaciones.
//!
//! Ejecuta escenarios cortos end-to-end e imprime el resultado; útil
//! para inspeccionar el comportamiento sin levantar el test suite.

use pixcache_rust::{init_dotenv, resolver_from_config, CacheSession, CountingEngine, EncodeFormat,
                    FileCacheGateway, InMemoryCacheGateway, SketchEngine, SourceResolver, TemplateRegistry,
                    CONFIG};

/// Validación 1: miss→hit sobre el gateway in-memory, con conteo de
/// ejecuciones del engine.
fn run_cache_validation() {
    println!("== validación cache in-memory ==");

    let engine = CountingEngine::new(SketchEngine::new());
    let mut gateway = InMemoryCacheGateway::new();

    let mut first = CacheSession::new(engine.clone(), &mut gateway, SourceResolver::new(vec![]));
    first.canvas(300, 200, Some("fff".into())).expect("canvas")
         .resize(120, 90).expect("resize")
         .encode_as(EncodeFormat::Png, None).expect("encode");
    let fp = first.fingerprint().expect("fingerprint");
    let bytes = first.get(Some(12)).expect("primer get");
    println!("miss: fingerprint={fp} bytes={}", bytes.len());
    drop(first);

    let mut second = CacheSession::new(engine.clone(), &mut gateway, SourceResolver::new(vec![]));
    second.canvas(300, 200, Some("fff".into())).expect("canvas")
          .resize(120, 90).expect("resize")
          .encode_as(EncodeFormat::Png, None).expect("encode");
    let cached = second.get(Some(12)).expect("segundo get");

    assert_eq!(bytes, cached, "hit debe devolver bytes idénticos");
    assert_eq!(engine.base_count(), 1, "el hit no debe re-ejecutar el engine");
    println!("hit: bytes idénticos, engine ejecutado {} vez", engine.base_count());
}

/// Validación 2: un preset de template produce la misma clave que las
/// llamadas manuales equivalentes.
fn run_template_validation() {
    println!("== validación templates ==");

    let registry = TemplateRegistry::new();
    let ops = registry.get("small").expect("preset small").to_vec();

    let mut via_template = CacheSession::new(SketchEngine::new(), InMemoryCacheGateway::new(),
                                             SourceResolver::new(vec![]));
    via_template.canvas(800, 600, None).expect("canvas");
    via_template.record_all(ops).expect("preset");

    let mut manual = CacheSession::new(SketchEngine::new(), InMemoryCacheGateway::new(),
                                       SourceResolver::new(vec![]));
    manual.canvas(800, 600, None).expect("canvas")
          .fit(120, 90).expect("fit");

    let a = via_template.fingerprint().expect("fp template");
    let b = manual.fingerprint().expect("fp manual");
    assert_eq!(a, b, "preset y llamadas manuales deben compartir clave");
    println!("preset small == fit(120,90): {a}");
}

/// Validación 3: round trip contra el store de archivos configurado.
fn run_file_store_validation() {
    println!("== validación file store ==");
    println!("storage dir: {}", CONFIG.storage_dir.display());

    let gateway = match FileCacheGateway::new(&CONFIG.storage_dir) {
        Ok(gw) => gw,
        Err(e) => {
            println!("file store no disponible ({e}); se omite");
            return;
        }
    };

    let mut session = CacheSession::new(SketchEngine::new(), gateway, resolver_from_config());
    session.canvas(640, 480, None).expect("canvas")
           .greyscale().expect("greyscale");
    let fp = session.fingerprint().expect("fingerprint");
    let bytes = session.get(Some(CONFIG.lifetime_minutes)).expect("get");
    println!("guardado {} bytes bajo {fp}", bytes.len());
}

fn main() {
    init_dotenv();
    run_cache_validation();
    run_template_validation();
    run_file_store_validation();
    println!("validaciones completas");
}
