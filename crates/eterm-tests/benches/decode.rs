use eterm_decoder::{Decode, Decoder, decode, decode_term};
use eterm_encoder::encode;
use eterm_types::{Atom, Binary, List, Map};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

type Record = (i64, Atom, Binary);

fn records(n: usize) -> List<Record> {
    (0..n)
        .map(|i| {
            let i = i as i64;
            (i * 7919, Atom::new(format!("key_{}", i % 16)), Binary::from(vec![0xab; 32]))
        })
        .collect()
}

fn bench_decode_small(c: &mut Criterion) {
    let payload = encode(&(42_i64, vec![Atom::from("ok"), Atom::from("error")])).unwrap();

    c.bench_function("decode_small", |b| {
        b.iter(|| decode::<(i64, List<Atom>)>(&payload).unwrap());
    });
}

fn bench_decode_records(c: &mut Criterion) {
    let schema = <List<Record> as Decode>::schema();
    let mut group = c.benchmark_group("decode_records");
    for n in [10, 100, 1_000] {
        let payload = encode(&records(n)).unwrap();
        group.throughput(Throughput::Bytes(payload.len() as u64));
        group.bench_with_input(BenchmarkId::new("static", n), &payload, |b, payload| {
            b.iter(|| decode::<List<Record>>(payload).unwrap());
        });
        group.bench_with_input(BenchmarkId::new("dynamic", n), &payload, |b, payload| {
            b.iter(|| decode_term(payload, &schema).unwrap());
        });
    }
    group.finish();
}

fn bench_decode_nested(c: &mut Criterion) {
    let inner: Map<i64, List<i64>> = (0..32).map(|k| (k, (0..8).collect())).collect();
    let outer: Map<Atom, Map<i64, List<i64>>> = (0..16)
        .map(|k| (Atom::new(format!("shard_{k}")), inner.clone()))
        .collect();
    let payload = encode(&outer).unwrap();

    c.bench_function("decode_nested_maps", |b| {
        b.iter(|| decode::<Map<Atom, Map<i64, List<i64>>>>(&payload).unwrap());
    });
}

fn bench_decode_session(c: &mut Criterion) {
    let mut encoder = eterm_encoder::Encoder::new();
    for i in 0..1_000_i64 {
        encoder.encode(&i);
    }
    let payload = encoder.into_bytes().unwrap();

    c.bench_function("decode_session_1000_scalars", |b| {
        b.iter(|| {
            let mut decoder = Decoder::new(&payload).unwrap();
            let mut sum = 0_i64;
            while !decoder.is_exhausted() {
                sum += decoder.parse::<i64>().unwrap();
            }
            sum
        });
    });
}

criterion_group!(
    benches,
    bench_decode_small,
    bench_decode_records,
    bench_decode_nested,
    bench_decode_session
);
criterion_main!(benches);
