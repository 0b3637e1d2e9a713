use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use slirc_wire::decode;

const LINES: &[&str] = &[
    "PING :irc.example.chat",
    "PRIVMSG #test hello",
    ":nick!user@host PRIVMSG #rust :Hello, world! How are you?",
    "@a=b;c;d=e;url=http://example.com :irc.example.chat 254 #test hello :the trailing part",
];

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");
    for line in LINES {
        group.throughput(Throughput::Bytes(line.len() as u64));
        group.bench_with_input(*line, line, |b, line| b.iter(|| decode(black_box(line))));
    }
    group.finish();
}

criterion_group!(benches, bench_decode);
criterion_main!(benches);
