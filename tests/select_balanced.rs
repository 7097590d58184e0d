use std::collections::HashSet;
use std::path::Path;

use rand::rngs::StdRng;
use rand::SeedableRng;

use quizbank::bank::load_bank;
use quizbank::model::{Bank, DifficultyMix, QuestionId};
use quizbank::select::balanced;

fn sample() -> Bank {
    load_bank(Path::new("fixtures/sample_bank.yaml")).unwrap()
}

#[test]
fn test_spreads_over_categories_and_difficulties() {
    let bank = sample();
    let exam = bank.exam.clone().unwrap();
    let mix = exam.difficulty_mix.unwrap();

    for seed in 0..20 {
        let mut rng = StdRng::seed_from_u64(seed);
        let picked = balanced(&bank.questions, 6, &exam.categories, &mix, &mut rng);
        assert_eq!(picked.len(), 6);

        for cat in &exam.categories {
            let n = picked
                .iter()
                .filter(|q| q.category.as_deref() == Some(cat.as_str()))
                .count();
            assert_eq!(n, 2, "category {} with seed {}", cat, seed);
        }

        let ids: HashSet<QuestionId> = picked.iter().map(|q| q.id.clone()).collect();
        assert_eq!(ids.len(), 6);
        // Advanced questions carry no weight in this mix.
        for id in [1u64, 2, 3, 5, 6] {
            assert!(ids.contains(&QuestionId::Num(id)), "missing {} with seed {}", id, seed);
        }
        assert!(!ids.contains(&QuestionId::Num(7)));
        assert!(!ids.contains(&QuestionId::Num(8)));
    }
}

#[test]
fn test_same_seed_same_exam() {
    let bank = sample();
    let mix = DifficultyMix::default();
    let a = balanced(&bank.questions, 5, &[], &mix, &mut StdRng::seed_from_u64(42));
    let b = balanced(&bank.questions, 5, &[], &mix, &mut StdRng::seed_from_u64(42));
    assert_eq!(a, b);
}

#[test]
fn test_count_is_capped_at_pool_size() {
    let bank = sample();
    let mut rng = StdRng::seed_from_u64(1);
    let picked = balanced(&bank.questions, 50, &[], &DifficultyMix::default(), &mut rng);
    assert_eq!(picked.len(), bank.questions.len());
}

#[test]
fn test_short_category_is_topped_up() {
    let bank = sample();
    let categories = vec!["equipment".to_string(), "nonexistent".to_string()];
    let mut rng = StdRng::seed_from_u64(7);
    let picked = balanced(&bank.questions, 6, &categories, &DifficultyMix::default(), &mut rng);
    assert_eq!(picked.len(), 6);
    let equipment = picked
        .iter()
        .filter(|q| q.category.as_deref() == Some("equipment"))
        .count();
    assert_eq!(equipment, 3);
}

#[test]
fn test_option_order_is_preserved() {
    let bank = sample();
    let mut rng = StdRng::seed_from_u64(3);
    let picked = balanced(&bank.questions, 9, &[], &DifficultyMix::default(), &mut rng);
    for q in &picked {
        let original = bank.questions.iter().find(|o| o.id == q.id).unwrap();
        assert_eq!(q.options, original.options);
        assert_eq!(q.correct_answer, original.correct_answer);
    }
}
