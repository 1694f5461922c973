use criterion::{criterion_group, criterion_main, Criterion};

use hanspoon::{Recipe, Scaler, ScalingState, Taste};

const TEST_RECIPE: &str = include_str!("./test_recipe.json");

fn load(c: &mut Criterion) {
    let mut group = c.benchmark_group("load");
    group.bench_with_input("from_json", TEST_RECIPE, |b, input| {
        b.iter(|| Recipe::from_json(input))
    });
}

fn scale(c: &mut Criterion) {
    let mut group = c.benchmark_group("scale");
    let recipe = Recipe::from_json(TEST_RECIPE).unwrap();
    let scaler = Scaler::default();

    let base = ScalingState::for_recipe(&recipe);
    let mut tuned = base.clone().with_target_servings(5.0);
    tuned.taste_levels.set(Taste::Spiciness, 5);
    let zero = base.clone().with_zero_quantity();

    group.bench_with_input("base", &base, |b, state| {
        b.iter(|| scaler.scale(&recipe, state))
    });
    group.bench_with_input("scaled-and-tuned", &tuned, |b, state| {
        b.iter(|| scaler.scale(&recipe, state))
    });
    group.bench_with_input("zero-quantity", &zero, |b, state| {
        b.iter(|| scaler.scale(&recipe, state))
    });
}

fn instructions(c: &mut Criterion) {
    let mut group = c.benchmark_group("instructions");
    let recipe = Recipe::from_json(TEST_RECIPE).unwrap();
    let scaler = Scaler::default();
    let state = ScalingState::for_recipe(&recipe).with_target_servings(3.0);

    group.bench_function("render-all-steps", |b| {
        b.iter(|| {
            recipe
                .steps
                .iter()
                .map(|s| scaler.render_instruction(&s.content, &recipe, &state))
                .count()
        })
    });
}

criterion_group!(benches, load, scale, instructions);
criterion_main!(benches);
