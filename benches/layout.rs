use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use decision_flowchart::config::LayoutConfig;
use decision_flowchart::layout::compute_layout;
use decision_flowchart::parser::parse_question_table;
use decision_flowchart::render::render_svg;
use decision_flowchart::theme::Theme;
use std::hint::black_box;

const RELIGION: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/benches/fixtures/religion.json5"
));

/// Builds a quiz of `depth` question levels where every question has
/// `fanout` answers. Every other answer jumps one extra level down so that
/// nodes pick up parents from two different levels.
fn wide_quiz_source(depth: usize, fanout: usize) -> String {
    let mut out = String::from("root q0_0\n");
    let mut width = 1usize;
    for level in 0..depth {
        let next_width = (width * fanout).min(64);
        for i in 0..width {
            out.push_str(&format!("q{}_{}: Question {} on level {}?\n", level, i, i, level));
            for a in 0..fanout {
                let slot = (i * fanout + a) % next_width;
                let target = if level + 1 == depth {
                    format!("Outcome{}", slot)
                } else if a % 2 == 1 && level + 2 < depth {
                    format!("q{}_{}", level + 2, slot % width.max(1))
                } else {
                    format!("q{}_{}", level + 1, slot)
                };
                out.push_str(&format!("  answer {} -> {}\n", a, target));
            }
        }
        width = next_width;
    }
    out
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    group.bench_function("religion", |b| {
        b.iter(|| {
            let table = parse_question_table(black_box(RELIGION)).expect("parse failed");
            black_box(table.questions.len());
        });
    });
    group.finish();
}

fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout");
    let config = LayoutConfig::default();
    let religion = parse_question_table(RELIGION).expect("parse failed");
    group.bench_function("religion", |b| {
        b.iter(|| {
            let layout = compute_layout(black_box(&religion), &config);
            black_box(layout.nodes.len());
        });
    });
    for (depth, fanout) in [(4usize, 3usize), (6, 3), (8, 4)] {
        let name = format!("wide_{}x{}", depth, fanout);
        let table = parse_question_table(&wide_quiz_source(depth, fanout)).expect("parse failed");
        group.bench_with_input(BenchmarkId::from_parameter(name), &table, |b, table| {
            b.iter(|| {
                let layout = compute_layout(black_box(table), &config);
                black_box(layout.edges.len());
            });
        });
    }
    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");
    let theme = Theme::modern();
    let config = LayoutConfig::default();
    let layout = compute_layout(
        &parse_question_table(RELIGION).expect("parse failed"),
        &config,
    );
    group.bench_function("religion", |b| {
        b.iter(|| {
            let svg = render_svg(black_box(&layout), &theme, &config);
            black_box(svg.len());
        });
    });
    group.finish();
}

criterion_group!(benches, bench_parse, bench_layout, bench_render);
criterion_main!(benches);
