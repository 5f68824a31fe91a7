//! Performance benchmarks for mdhtml
//!
//! Run with: cargo bench

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};

mod samples {
    pub const TINY: &str = "Hello, **world**!";

    pub const SMALL: &str = r#"# Heading

This is a paragraph with *emphasis* and **strong** text.

- Item 1
- Item 2
  - Nested
- Item 3

`inline code` and [a link](https://example.com).
"#;

    pub const MEDIUM: &str = r#"# Project README

A sample document touching every block rule (c) 2024.

## Features

1. Rule-driven blocks
2. Inline passes
3. Footnotes[^1]

[^1]: Numbered per conversion.

![Logo][logo]

[logo]: /img/logo.png "Logo"

| Name  | Size |
| ----- | ---: |
| alpha |   10 |
| beta  |  200 |

```
fn main() {
    println!("Hello, world!");
}
```

> A blockquote with ==marked== text.
> > And a nested one.

---

Visit https://example.com for ~~more~~ details...!!!
"#;

    /// Repeat the medium sample so footnotes and references stay unique.
    pub fn large() -> String {
        (0..50)
            .map(|i| {
                MEDIUM
                    .replace("[^1]", &format!("[^n{i}]"))
                    .replace("[logo]", &format!("[logo{i}]"))
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Many potential emphasis delimiters on one line.
    pub fn pathological_emphasis() -> String {
        "*a ".repeat(1000) + &"b* ".repeat(1000)
    }

    /// Deeply nested list.
    pub fn pathological_nested() -> String {
        (0..200).map(|i| format!("{}- item\n", "  ".repeat(i))).collect()
    }
}

fn bench_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("parsing");

    group.throughput(Throughput::Bytes(samples::TINY.len() as u64));
    group.bench_function("tiny", |b| b.iter(|| mdhtml::to_html(black_box(samples::TINY))));

    group.throughput(Throughput::Bytes(samples::SMALL.len() as u64));
    group.bench_function("small", |b| b.iter(|| mdhtml::to_html(black_box(samples::SMALL))));

    group.throughput(Throughput::Bytes(samples::MEDIUM.len() as u64));
    group.bench_function("medium", |b| {
        b.iter(|| mdhtml::to_html(black_box(samples::MEDIUM)))
    });

    let large = samples::large();
    group.throughput(Throughput::Bytes(large.len() as u64));
    group.bench_function("large", |b| b.iter(|| mdhtml::to_html(black_box(&large))));

    group.finish();
}

fn bench_inline(c: &mut Criterion) {
    let mut group = c.benchmark_group("inline");
    let formatter = mdhtml::InlineFormatter::new(&mdhtml::Options::default());

    let plain = format!("<p>{}</p>", "Plain text without any markers at all. ".repeat(100));
    group.throughput(Throughput::Bytes(plain.len() as u64));
    group.bench_function("plain_text", |b| b.iter(|| formatter.format(black_box(&plain))));

    let busy = format!(
        "<p>{}</p>",
        "**b** *i* `c` [l](https://x.io) ~~s~~ x^2^ ==m== (c)... ".repeat(100)
    );
    group.throughput(Throughput::Bytes(busy.len() as u64));
    group.bench_function("all_markers", |b| b.iter(|| formatter.format(black_box(&busy))));

    group.finish();
}

fn bench_pathological(c: &mut Criterion) {
    let mut group = c.benchmark_group("pathological");
    group.sample_size(20);

    let emphasis = samples::pathological_emphasis();
    group.throughput(Throughput::Bytes(emphasis.len() as u64));
    group.bench_function("emphasis_delimiters", |b| {
        b.iter(|| mdhtml::to_html(black_box(&emphasis)))
    });

    let nested = samples::pathological_nested();
    group.throughput(Throughput::Bytes(nested.len() as u64));
    group.bench_function("deep_nesting", |b| {
        b.iter(|| mdhtml::to_html(black_box(&nested)))
    });

    group.finish();
}

criterion_group!(benches, bench_parsing, bench_inline, bench_pathological);
criterion_main!(benches);
