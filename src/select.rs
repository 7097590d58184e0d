use rand::seq::SliceRandom;
use rand::Rng;

use crate::model::{Difficulty, DifficultyMix, Question};

/// Draws `count` questions spread evenly over `categories`, and within each
/// category according to `mix`. Categories that run short are topped up
/// from the rest of the pool. Option order inside each question is kept;
/// question order is shuffled.
///
/// With no categories given, the categories found in `questions` are used
/// in order of first appearance.
pub fn balanced<R: Rng + ?Sized>(
    questions: &[Question],
    count: usize,
    categories: &[String],
    mix: &DifficultyMix,
    rng: &mut R,
) -> Vec<Question> {
    let count = count.min(questions.len());
    let categories: Vec<Option<&str>> = if categories.is_empty() {
        let mut found: Vec<Option<&str>> = Vec::new();
        for q in questions {
            let c = q.category.as_deref();
            if !found.contains(&c) {
                found.push(c);
            }
        }
        found
    } else {
        categories.iter().map(|c| Some(c.as_str())).collect()
    };

    let mut picked = vec![false; questions.len()];
    let mut chosen: Vec<usize> = Vec::with_capacity(count);

    if !categories.is_empty() {
        let base = count / categories.len();
        let extra = count % categories.len();
        for (ci, cat) in categories.iter().enumerate() {
            let quota = base + usize::from(ci < extra);
            let pool: Vec<usize> = (0..questions.len())
                .filter(|&i| questions[i].category.as_deref() == *cat)
                .collect();
            for i in pick_by_difficulty(questions, &pool, quota, mix, rng) {
                picked[i] = true;
                chosen.push(i);
            }
        }
    }

    if chosen.len() < count {
        let mut rest: Vec<usize> = (0..questions.len()).filter(|&i| !picked[i]).collect();
        rest.shuffle(rng);
        let need = count - chosen.len();
        chosen.extend(rest.into_iter().take(need));
    }

    chosen.shuffle(rng);
    log::debug!(
        "selected {} of {} questions over {} categories",
        chosen.len(),
        questions.len(),
        categories.len()
    );
    chosen.into_iter().map(|i| questions[i].clone()).collect()
}

fn pick_by_difficulty<R: Rng + ?Sized>(
    questions: &[Question],
    pool: &[usize],
    quota: usize,
    mix: &DifficultyMix,
    rng: &mut R,
) -> Vec<usize> {
    let quotas = split_quota(quota, mix);
    let mut taken: Vec<usize> = Vec::with_capacity(quota);

    for (difficulty, want) in Difficulty::ALL.iter().zip(quotas) {
        let mut sub: Vec<usize> = pool
            .iter()
            .copied()
            .filter(|&i| questions[i].difficulty == Some(*difficulty))
            .collect();
        sub.shuffle(rng);
        taken.extend(sub.into_iter().take(want));
    }

    if taken.len() < quota {
        let mut rest: Vec<usize> = pool
            .iter()
            .copied()
            .filter(|i| !taken.contains(i))
            .collect();
        rest.shuffle(rng);
        let need = quota - taken.len();
        taken.extend(rest.into_iter().take(need));
    }
    taken
}

/// Splits `quota` across basic/intermediate/advanced by `mix`, largest
/// remainder first, so the parts always sum to `quota`.
fn split_quota(quota: usize, mix: &DifficultyMix) -> [usize; 3] {
    let weights = Difficulty::ALL.map(|d| mix.weight(d).max(0.0));
    let sum: f64 = weights.iter().sum();
    if sum <= 0.0 {
        return [quota, 0, 0];
    }

    let exact = weights.map(|w| quota as f64 * w / sum);
    let mut parts = exact.map(|x| x.floor() as usize);
    let mut left = quota - parts.iter().sum::<usize>();
    let mut order = [0usize, 1, 2];
    order.sort_by(|&a, &b| {
        let ra = exact[a] - exact[a].floor();
        let rb = exact[b] - exact[b].floor();
        rb.partial_cmp(&ra).unwrap_or(std::cmp::Ordering::Equal)
    });
    for i in order {
        if left == 0 {
            break;
        }
        parts[i] += 1;
        left -= 1;
    }
    parts
}
