//! Performance benchmarks for reading and writing BOMs.
//!
//! Run with: cargo bench --bench codec_benchmark
//!
//! Measures parse and render throughput for both wire formats at the oldest
//! and newest schema versions, and a full XML to JSON conversion.

use bom_codec::model::{
    Bom, Component, ComponentType, Dependency, Hash, HashAlgorithm, License, LicenseChoice,
};
use bom_codec::{convert, parse_bom_str, render_bom, SchemaVersion, WireFormat};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;

/// Generate a BOM with `count` components and a linear dependency chain.
fn generate_bom(count: usize) -> Bom {
    let mut bom = Bom::new();
    bom.generate_serial_number();

    for i in 0..count {
        let name = format!("component-{i}");
        let version = format!("1.{}.{}", i % 10, i % 100);
        let mut component = Component::new(ComponentType::Library, &name)
            .with_version(&version)
            .with_bom_ref(format!("ref-{i}"))
            .with_purl(format!("pkg:npm/{name}@{version}"));
        component
            .hashes
            .push(Hash::new(HashAlgorithm::Sha256, format!("{i:064x}")));
        component.licenses = Some(LicenseChoice::Licenses(vec![License::id("MIT")]));
        bom.components.push(component);
    }

    for i in 1..count {
        bom.dependencies
            .push(Dependency::new(format!("ref-{}", i - 1)).depends_on(format!("ref-{i}")));
    }

    bom
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");

    for size in [100, 1000] {
        let bom = generate_bom(size);
        group.throughput(Throughput::Elements(size as u64));
        for (format, version) in [
            (WireFormat::Xml, SchemaVersion::V1_0),
            (WireFormat::Xml, SchemaVersion::V1_6),
            (WireFormat::Json, SchemaVersion::V1_6),
        ] {
            group.bench_with_input(
                BenchmarkId::new(format!("{format}-{version}"), size),
                &bom,
                |b, bom| b.iter(|| render_bom(black_box(bom), format, version)),
            );
        }
    }

    group.finish();
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    for size in [100, 1000] {
        let bom = generate_bom(size);
        group.throughput(Throughput::Elements(size as u64));
        for format in [WireFormat::Xml, WireFormat::Json] {
            let text = render_bom(&bom, format, SchemaVersion::V1_6).expect("render succeeds");
            group.bench_with_input(
                BenchmarkId::new(format.to_string(), size),
                &text,
                |b, text| b.iter(|| parse_bom_str(black_box(text))),
            );
        }
    }

    group.finish();
}

fn bench_convert(c: &mut Criterion) {
    let bom = generate_bom(1000);
    let xml = render_bom(&bom, WireFormat::Xml, SchemaVersion::V1_4).expect("render succeeds");

    c.bench_function("convert_xml_1_4_to_json_1_2", |b| {
        b.iter(|| convert(black_box(xml.as_bytes()), WireFormat::Json, Some(SchemaVersion::V1_2)))
    });
}

criterion_group!(benches, bench_render, bench_parse, bench_convert);
criterion_main!(benches);
