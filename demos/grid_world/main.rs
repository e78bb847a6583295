use std::{error::Error, fs, path::Path};

use gridq::{
    algo::tabular::{Learner, QLambda, QLambdaConfig, QLearning, QLearningConfig, QTable},
    exploration::EpsilonGreedy,
    gym::{ActionSet, GridWorld, GridWorldConfig, Rewards},
    train::{Trainer, TrainerConfig, TrainingHistory},
};

const LENGTH: usize = 5;
const WIDTH: usize = 5;
const NUM_EPISODES: u32 = 2000;
const EPSILON: f32 = 0.1;

fn train<L: Learner>(
    learner: L,
    env: &mut GridWorld,
    actions: &ActionSet,
) -> Result<(TrainingHistory, QTable), Box<dyn Error>> {
    let mut table = QTable::for_env(&*env, actions)?;
    let config = TrainerConfig {
        episodes: NUM_EPISODES,
        start: Some((0, 0)),
        max_steps: Some(10_000),
        ..Default::default()
    };
    let mut trainer = Trainer::new(learner, EpsilonGreedy::constant(EPSILON)?, config)?;
    let history = trainer.run(env, actions, &mut table)?;
    Ok((history, table))
}

fn report(
    name: &str,
    env: &GridWorld,
    actions: &ActionSet,
    history: &TrainingHistory,
    table: &QTable,
) -> Result<(), Box<dyn Error>> {
    let last = history.last().ok_or("no episodes")?;
    println!(
        "{name}: last episode took {} steps for a reward of {}",
        last.steps, last.total_reward
    );

    let path = env.replay(last.start, &last.actions, actions)?;
    println!("{name}: last path {path:?}");

    if LENGTH * WIDTH <= 25 {
        let names = actions.iter().map(|(_, d)| d.to_string()).collect::<Vec<_>>();
        println!("{:>8} {}", "state", names.join(" "));
        for (state, values) in table.rows() {
            let values = values
                .iter()
                .map(|q| format!("{q:>7.2}"))
                .collect::<Vec<_>>();
            println!("{:>8} {}", format!("{state:?}"), values.join(" "));
        }
    } else {
        println!("Grid too large to print the Q-table.");
    }

    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    // forwards the crate's `log` records (training progress, truncation warnings) to stdout
    tracing_subscriber::fmt::init();

    let path = Path::new("demos/grid_world");

    let config = GridWorldConfig {
        length: LENGTH,
        width: WIDTH,
        goal: None,
        rewards: Rewards::scaled(LENGTH, WIDTH),
    };
    let mut env = GridWorld::new(config)?;
    let actions = ActionSet::standard();

    let (q_history, q_table) = train(
        QLearning::new(QLearningConfig {
            alpha: 0.33,
            gamma: 0.8,
        })?,
        &mut env,
        &actions,
    )?;
    report("q-learning", &env, &actions, &q_history, &q_table)?;

    let (lambda_history, lambda_table) = train(
        QLambda::new(QLambdaConfig {
            alpha: 0.33,
            gamma: 0.8,
            lambda: 0.8,
        })?,
        &mut env,
        &actions,
    )?;
    report("q-lambda", &env, &actions, &lambda_history, &lambda_table)?;

    fs::create_dir_all(path.join("out"))?;

    let mut wtr = csv::Writer::from_path(path.join("out/data.csv"))?;
    wtr.write_record([
        "episode",
        "q_learning_reward",
        "q_learning_steps",
        "q_lambda_reward",
        "q_lambda_steps",
    ])?;
    for (i, (q, l)) in q_history
        .episodes()
        .iter()
        .zip(lambda_history.episodes())
        .enumerate()
    {
        wtr.write_record(&[
            i.to_string(),
            q.total_reward.to_string(),
            q.steps.to_string(),
            l.total_reward.to_string(),
            l.steps.to_string(),
        ])?;
    }

    wtr.flush()?;

    Ok(())
}
