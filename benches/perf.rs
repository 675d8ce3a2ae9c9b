use std::fmt::Write;
use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};

use tui_expandablelist::{ExpandableList, ListDocument, NodeId, Trigger, markup};

// Complete tree with `fanout` children per branch, every branch pre-marked expanded.
fn tree_markup(depth: usize, fanout: usize) -> String {
    fn branch(out: &mut String, depth: usize, fanout: usize, path: &str) {
        out.push_str("<ul>");
        for idx in 0..fanout {
            let label = format!("{path}.{idx}");
            if depth == 0 {
                let _ = write!(out, "<li>{label}</li>");
            } else {
                let _ = write!(out, "<li class=\"expanded\">{label}");
                branch(out, depth - 1, fanout, &label);
                out.push_str("</li>");
            }
        }
        out.push_str("</ul>");
    }

    let mut out = String::from("<div>");
    branch(&mut out, depth, fanout, "n");
    out.push_str("</div>");
    out
}

fn attached(source: &str) -> (ListDocument, ExpandableList, NodeId) {
    let mut doc = markup::parse(source).expect("bench markup is valid");
    let container = doc.children(doc.root())[0];
    let list = ExpandableList::attach(&mut doc, container, Default::default());
    let first_icon = list.icons(&doc)[0];
    (doc, list, first_icon)
}

fn bench_expandable_list(c: &mut Criterion) {
    let source = tree_markup(5, 5);

    c.bench_function("parse_markup", |b| {
        b.iter(|| markup::parse(black_box(&source)));
    });

    c.bench_function("attach_decorate", |b| {
        b.iter(|| attached(black_box(&source)));
    });

    c.bench_function("long_click_cascade", |b| {
        b.iter_batched(
            || attached(&source),
            |(mut doc, list, icon)| list.dispatch(&mut doc, icon, Trigger::LongClick),
            criterion::BatchSize::LargeInput,
        );
    });
}

criterion_group!(benches, bench_expandable_list);
criterion_main!(benches);
