use criterion::{black_box, criterion_group, criterion_main, Criterion};

use essaygrade_core::model::{Alternative, BehaviourOptions, KeywordGroup, Question};
use essaygrade_core::normalize::normalize;
use essaygrade_core::text::StandardTextUtilities;
use essaygrade_core::traits::TextUtilities;
use essaygrade_core::Grader;

const ESSAY: &str = "Photosynthesis is the process plants use to turn sunlight, \
water and carbon dioxide into glucose and oxygen.\r\nIt happens in the chloroplasts, \
where chlorophyll absorbs light. The light-dependent reactions produce ATP and NADPH,  \
which the Calvin cycle then uses to fix carbon.";

fn make_question(forgive: bool) -> Question {
    let words = [
        "photosynthesis",
        "chlorophyll",
        "chloroplast",
        "glucose",
        "oxygen",
        "carbon dioxide",
        "calvin cycle",
        "thylakoid",
    ];
    let groups = words
        .iter()
        .map(|w| {
            KeywordGroup::new(vec![Alternative::new(*w).forgive_mistakes(forgive)], 1.0)
                .with_feedback_found(format!("Mentions {w}."))
                .with_feedback_missed(format!("Does not mention {w}."))
        })
        .collect();
    Question::new(groups, BehaviourOptions::default(), vec![])
}

fn bench_normalize(c: &mut Criterion) {
    c.bench_function("normalize_essay", |b| {
        b.iter(|| normalize(black_box(ESSAY)))
    });
}

fn bench_primitives(c: &mut Criterion) {
    let utils = StandardTextUtilities::default();
    let haystack = ESSAY.to_lowercase();

    c.bench_function("is_isolated_match", |b| {
        b.iter(|| utils.is_isolated_match(black_box("chlorophyll"), black_box(&haystack)))
    });

    c.bench_function("fuzzy_contains_miss", |b| {
        b.iter(|| utils.fuzzy_contains(black_box("thylakoid"), black_box(&haystack)))
    });
}

fn bench_evaluate(c: &mut Criterion) {
    let exact = Grader::new(make_question(false));
    c.bench_function("evaluate_exact", |b| {
        b.iter(|| exact.evaluate(black_box(ESSAY)))
    });

    let fuzzy = Grader::new(make_question(true));
    c.bench_function("evaluate_fuzzy", |b| {
        b.iter(|| fuzzy.evaluate(black_box(ESSAY)))
    });
}

criterion_group!(benches, bench_normalize, bench_primitives, bench_evaluate);
criterion_main!(benches);
