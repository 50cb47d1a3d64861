//! Merge Drop entry point
//!
//! Headless native run: plays one scripted game against the core, records
//! the score and prints the rankings.
//!
//! Usage: `merge-drop [seed] [scores.json] [rules.json]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::path::PathBuf;

    use merge_drop::score::JsonFileScoreRepository;
    use merge_drop::{Bucket, GameRules, GameSession};

    env_logger::init();
    log::info!("Merge Drop (headless) starting...");

    let mut args = std::env::args().skip(1);
    let seed = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or_else(rand::random);
    let scores_path = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::temp_dir().join("merge_drop_scores.json"));
    let rules = args
        .next()
        .map(|p| GameRules::load(&PathBuf::from(p)))
        .unwrap_or_default();

    let repository = JsonFileScoreRepository::new(&scores_path);
    let mut session = match GameSession::open(
        rules,
        Box::new(repository),
        merge_drop::today(),
        seed,
    ) {
        Ok(session) => session,
        Err(e) => {
            log::error!("Could not start session: {}", e);
            std::process::exit(1);
        }
    };

    session.score.subscribe(|score| log::debug!("score -> {}", score));

    if let Err(e) = play_scripted_run(&mut session) {
        log::error!("Run aborted: {}", e);
    }

    let outcome = match session.finish() {
        Ok(outcome) => outcome,
        Err(e) => {
            log::error!("Could not finish run: {}", e);
            std::process::exit(1);
        }
    };

    println!("\nSeed {} | score {}", seed, outcome.score);
    if outcome.new_best {
        println!("New best score!");
    }
    let scores = session.scores().scores();
    println!("Best: {}", scores.best_score);
    for bucket in Bucket::ALL {
        let rank = outcome
            .rank(bucket)
            .map(|r| format!("#{}", r))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:>8}: {:?} (this run {})",
            bucket.as_str(),
            scores.bucket(bucket),
            rank
        );
    }
    println!("Scores file: {}", scores_path.display());
}

/// Stand-in for the engine: drop items in a few columns, merge any two
/// equal tiers immediately, and once the board is crowded rest an item on
/// the ceiling until the run ends.
#[cfg(not(target_arch = "wasm32"))]
fn play_scripted_run(session: &mut merge_drop::GameSession) -> merge_drop::error::Result<()> {
    use glam::Vec2;

    const FRAME_DT: f32 = 1.0 / 60.0;
    const CROWDED: usize = 8;
    const MAX_DROPS: usize = 200;

    session.start()?;

    for drop in 0..MAX_DROPS {
        let x = (drop % 5) as f32 * 40.0 - 80.0;
        session.drop_item(Vec2::new(x, 300.0))?;

        // Merge until no equal pair remains; a merge product may pair again
        while let Some((a, b)) = find_pair(session) {
            session.merge(a.id, b.id, a.position, b.position)?;
        }

        if session.registry().len() >= CROWDED {
            break;
        }
    }

    let Some(top) = session.registry().snapshots().last().copied() else {
        return Ok(());
    };
    log::info!("Board crowded, item {} resting on the ceiling", top.id);
    while !session.report_contact(top.id, FRAME_DT)? {}
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
fn find_pair(
    session: &merge_drop::GameSession,
) -> Option<(merge_drop::ItemSnapshot, merge_drop::ItemSnapshot)> {
    let items = session.registry().snapshots();
    items.iter().enumerate().find_map(|(i, a)| {
        items[i + 1..]
            .iter()
            .find(|b| b.item_no == a.item_no)
            .map(|b| (*a, *b))
    })
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The browser host drives `GameSession` directly
}
