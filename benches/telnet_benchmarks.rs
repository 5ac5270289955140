//
// Copyright 2017-2026 Hans W. Uhlig. All Rights Reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//

//! Benchmarks for telnetpp performance

use bytes::{Bytes, BytesMut};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use telnetpp::options::{echo, msdp};
use telnetpp::{Element, FrameCodec, Session, Verb};
use tokio_util::codec::{Decoder, Encoder};

// ============================================================================
// Encoding Benchmarks
// ============================================================================

fn bench_encode_single_byte(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode_single_byte");

    group.bench_function("data_byte", |b| {
        let mut codec = FrameCodec::new();
        let mut buffer = BytesMut::with_capacity(1024);

        b.iter(|| {
            buffer.clear();
            codec
                .encode(black_box(Element::Data(Bytes::from_static(b"A"))), &mut buffer)
                .unwrap();
        });
    });

    group.bench_function("iac_byte", |b| {
        let mut codec = FrameCodec::new();
        let mut buffer = BytesMut::with_capacity(1024);

        b.iter(|| {
            buffer.clear();
            codec
                .encode(black_box(Element::Data(Bytes::from_static(&[0xFF]))), &mut buffer)
                .unwrap();
        });
    });

    group.finish();
}

fn bench_encode_data_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode_data_sizes");

    for size in [10, 100, 1000, 10000].iter() {
        group.throughput(Throughput::Bytes(*size as u64));

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            let mut codec = FrameCodec::new();
            let mut buffer = BytesMut::with_capacity(size * 2);
            let data: Bytes = (0..size).map(|i| (i % 256) as u8).collect::<Vec<u8>>().into();

            b.iter(|| {
                buffer.clear();
                codec
                    .encode(black_box(Element::Data(data.clone())), &mut buffer)
                    .unwrap();
            });
        });
    }

    group.finish();
}

fn bench_encode_negotiation(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode_negotiation");

    group.bench_function("do_echo", |b| {
        let mut codec = FrameCodec::new();
        let mut buffer = BytesMut::with_capacity(64);

        b.iter(|| {
            buffer.clear();
            codec
                .encode(black_box(Element::negotiation(Verb::Do, 1)), &mut buffer)
                .unwrap();
        });
    });

    group.finish();
}

fn bench_encode_subnegotiation(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode_subnegotiation");

    group.bench_function("msdp_variable", |b| {
        let mut codec = FrameCodec::new();
        let mut buffer = BytesMut::with_capacity(256);
        let element = Element::subnegotiation(69, &b"\x01var\x02val"[..]);

        b.iter(|| {
            buffer.clear();
            codec.encode(black_box(element.clone()), &mut buffer).unwrap();
        });
    });

    group.finish();
}

// ============================================================================
// Decoding Benchmarks
// ============================================================================

fn bench_decode_single_byte(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_single_byte");

    group.bench_function("data_byte", |b| {
        let mut codec = FrameCodec::new();

        b.iter(|| {
            let mut buffer = BytesMut::from(&b"A"[..]);
            while codec.decode(black_box(&mut buffer)).unwrap().is_some() {}
        });
    });

    group.finish();
}

fn bench_decode_data_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_data_sizes");

    for size in [10, 100, 1000, 10000].iter() {
        group.throughput(Throughput::Bytes(*size as u64));

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            let data: Vec<u8> = (0..size).map(|i| (i % 256) as u8).collect();

            b.iter(|| {
                let mut codec = FrameCodec::new();
                let mut buffer = BytesMut::from(&data[..]);
                while codec.decode(black_box(&mut buffer)).unwrap().is_some() {}
            });
        });
    }

    group.finish();
}

fn bench_decode_negotiation(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_negotiation");

    group.bench_function("do_echo", |b| {
        let mut codec = FrameCodec::new();

        b.iter(|| {
            let mut buffer = BytesMut::from(&[0xFF, 0xFD, 0x01][..]);
            while codec.decode(black_box(&mut buffer)).unwrap().is_some() {}
        });
    });

    group.finish();
}

fn bench_decode_subnegotiation(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_subnegotiation");

    group.bench_function("msdp_variable", |b| {
        let mut codec = FrameCodec::new();
        let mut wire = vec![0xFF, 0xFA, 69];
        wire.extend_from_slice(b"\x01var\x02val");
        wire.extend_from_slice(&[0xFF, 0xF0]);

        b.iter(|| {
            let mut buffer = BytesMut::from(&wire[..]);
            while codec.decode(black_box(&mut buffer)).unwrap().is_some() {}
        });
    });

    group.finish();
}

// ============================================================================
// Round-trip Benchmarks
// ============================================================================

fn bench_roundtrip(c: &mut Criterion) {
    let mut group = c.benchmark_group("roundtrip");

    group.bench_function("1kb_data", |b| {
        let mut encoder = FrameCodec::new();
        let mut decoder = FrameCodec::new();
        let data: Bytes = (0..1024).map(|i| (i % 256) as u8).collect::<Vec<u8>>().into();

        b.iter(|| {
            let mut buffer = BytesMut::new();
            encoder
                .encode(black_box(Element::Data(data.clone())), &mut buffer)
                .unwrap();
            while decoder.decode(black_box(&mut buffer)).unwrap().is_some() {}
        });
    });

    group.finish();
}

// ============================================================================
// Option State Benchmarks
// ============================================================================

fn bench_option_state(c: &mut Criterion) {
    let mut group = c.benchmark_group("option_state");

    group.bench_function("echo_activation", |b| {
        b.iter(|| {
            let mut option = echo::server();
            option.negotiate(black_box(Verb::Do), &mut |_| {});
            black_box(option.active());
        });
    });

    group.finish();
}

// ============================================================================
// Realistic Scenario Benchmarks
// ============================================================================

fn bench_realistic_scenarios(c: &mut Criterion) {
    let mut group = c.benchmark_group("realistic_scenarios");

    group.bench_function("mud_prompt_with_msdp_variable", |b| {
        b.iter(|| {
            let mut session = Session::new();
            session.install(Box::new(msdp::server())).unwrap();

            let mut out = Vec::new();
            session.receive(
                black_box(&[0xFF, 0xFD, 69]),
                |_| {},
                |bytes| out.extend_from_slice(bytes),
            );

            let mut payload = vec![0xFF, 0xFA, 69];
            payload.extend_from_slice(b"\x01HP\x02100\x01MP\x0250");
            payload.extend_from_slice(&[0xFF, 0xF0]);
            session.receive(black_box(&payload), |_| {}, |_| {});
        });
    });

    group.finish();
}

criterion_group!(
    encoding_benches,
    bench_encode_single_byte,
    bench_encode_data_sizes,
    bench_encode_negotiation,
    bench_encode_subnegotiation,
);
criterion_group!(
    decoding_benches,
    bench_decode_single_byte,
    bench_decode_data_sizes,
    bench_decode_negotiation,
    bench_decode_subnegotiation,
);
criterion_group!(roundtrip_benches, bench_roundtrip);
criterion_group!(state_benches, bench_option_state);
criterion_group!(scenario_benches, bench_realistic_scenarios);

criterion_main!(
    encoding_benches,
    decoding_benches,
    roundtrip_benches,
    state_benches,
    scenario_benches
);
