use criterion::{Criterion, criterion_group, criterion_main};
use logprinter::{
    Arg, AsyncFileSink, ConsoleSink, ConsoleTarget, Directory, Layout, LevelFilter, Printer,
    RotationPolicy, Severity,
};
use std::hint::black_box;
use std::io;
use std::sync::Arc;

struct Discard;

impl ConsoleTarget for Discard {
    fn emit(&self, _severity: Severity, _tag: &str, line: &str) -> io::Result<()> {
        black_box(line);
        Ok(())
    }
}

fn console_printer(root: LevelFilter) -> Printer {
    let directory = Arc::new(Directory::new());
    directory.set_root_level(root);
    directory.add_sink(Arc::new(ConsoleSink::with_target(
        Layout::parse("%-5p %c - %m%n").unwrap_or_default(),
        Discard,
    )));
    Printer::named(directory, "bench.dispatch")
}

fn bench_console(c: &mut Criterion) {
    let mut group = c.benchmark_group("Printer::console");

    let printer = console_printer(LevelFilter::All);
    group.bench_function("info_plain", |b| {
        b.iter(|| printer.info(black_box("cache warmed"), &[]));
    });
    group.bench_function("info_args", |b| {
        b.iter(|| printer.info(black_box("cache warmed: %d entries"), &[Arg::from(4096)]));
    });
    group.bench_function("tagged", |b| {
        b.iter(|| printer.tag("CACHE").debug(black_box("evicted"), &[]));
    });

    let filtered = console_printer(LevelFilter::Error);
    group.bench_function("filtered_out", |b| {
        b.iter(|| filtered.debug(black_box("never rendered"), &[]));
    });

    group.finish();
}

fn bench_file(c: &mut Criterion) {
    let Ok(tmp) = tempfile::TempDir::new() else {
        return;
    };
    let Ok(sink) = AsyncFileSink::open(
        tmp.path().join("bench.log"),
        Layout::parse("%d %-5p %c - %m%n").unwrap_or_default(),
        RotationPolicy::new(8 * 1024 * 1024, 2),
        false,
    ) else {
        return;
    };

    let directory = Arc::new(Directory::new());
    directory.add_sink(Arc::new(sink));
    let printer = Printer::new(Arc::clone(&directory));

    c.bench_function("Printer::file_enqueue", |b| {
        b.iter(|| printer.info(black_box("request %d served"), &[Arg::from(200)]));
    });

    directory.shutdown();
}

criterion_group!(benches, bench_console, bench_file);
criterion_main!(benches);
