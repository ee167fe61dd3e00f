// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of crl-editor-client and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use crl_editor_client::model::{ConceptId, DiagramId, DrawingElementId, LinkKind, Represents};
use crl_editor_client::reconcile::{DiagramReconciler, LinkPayload, NodePayload, Point, Size};
use crl_editor_client::view::TracingView;

fn id(raw: &str) -> ConceptId {
    ConceptId::new(raw).expect("concept id")
}

fn node(diagram: &DiagramId, raw: &str, x: f64) -> NodePayload {
    NodePayload {
        concept_id: id(raw),
        diagram_id: diagram.clone(),
        represents: Some(Represents::Element),
        position: Point::new(x, 10.0),
        size: Size { width: 80.0, height: 40.0 },
        label: raw.to_owned(),
        icon: String::new(),
        abstractions: String::new(),
        label_y_offset: 0.0,
        line_color: None,
        bg_color: None,
    }
}

/// `l0000 -> l0001 -> ... -> n1`: key order is the reverse of dependency order, so every drain
/// pass materializes exactly one link.
fn reversed_chain(diagram: &DiagramId, len: usize) -> Vec<LinkPayload> {
    (0..len)
        .map(|index| {
            let target = if index + 1 == len { id("n1") } else { id(&format!("l{:04}", index + 1)) };
            LinkPayload {
                concept_id: id(&format!("l{index:04}")),
                diagram_id: diagram.clone(),
                kind: LinkKind::ReferenceLink,
                represents: Some(Represents::Reference),
                source: Some(DrawingElementId::from_concept(&id("n0"))),
                target: Some(DrawingElementId::from_concept(&target)),
                label: String::new(),
            }
        })
        .collect()
}

fn parked(diagram: &DiagramId, links: &[LinkPayload]) -> (DiagramReconciler, TracingView) {
    let mut reconciler = DiagramReconciler::new();
    let mut view = TracingView::default();
    reconciler.display(diagram, "bench", &mut view);
    for link in links {
        reconciler.upsert_link(link, &mut view);
    }
    assert_eq!(reconciler.pending().len(), links.len());
    (reconciler, view)
}

// Case IDs are chain lengths; keep them stable so runs stay comparable.
fn benches_pending(c: &mut Criterion) {
    let diagram = id("d1");
    let source = node(&diagram, "n0", 0.0);
    let sink = node(&diagram, "n1", 200.0);

    let mut group = c.benchmark_group("pending.drain_reversed_chain");
    for len in [16usize, 64, 256] {
        let links = reversed_chain(&diagram, len);
        group.bench_with_input(BenchmarkId::from_parameter(len), &links, |b, links| {
            b.iter_batched(
                || parked(&diagram, links),
                |(mut reconciler, mut view)| {
                    reconciler.upsert_node(black_box(&source), &mut view);
                    let upserted = reconciler.upsert_node(black_box(&sink), &mut view);
                    black_box(upserted.drained.materialized)
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, benches_pending);
criterion_main!(benches);
