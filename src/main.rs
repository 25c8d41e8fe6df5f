use std::io::{self, BufRead, Write as _};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

mod catalog;
mod config;
mod error;
mod feedback;
mod health;
mod input;
mod models;
mod normalize;
mod orchestrator;
mod questions;
mod recommend;
mod remote;
mod report;
mod scoring;
mod session;

use config::ClientConfig;
use models::{AnswerValue, Feedback, Mood, RecommendationResult, Technique};
use orchestrator::RecommendationOrchestrator;
use remote::HttpRecommendationService;
use scoring::ScoreBand;
use session::AssessmentSession;

#[derive(Parser)]
#[command(name = "mindful-check")]
#[command(about = "Mental wellness self-assessment with activity recommendations", long_about = None)]
struct Cli {
    #[command(flatten)]
    config: ClientConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Answer the questionnaire interactively and get recommendations
    Assess {
        #[arg(long, value_enum, default_value_t = Technique::Hybrid)]
        technique: Technique,
        /// Skip the recommendation service and use the built-in catalog
        #[arg(long)]
        offline: bool,
        /// Also write a markdown report
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Compute local scores from a JSON or CSV answer file
    Score {
        #[arg(long)]
        input: PathBuf,
    },
    /// Recommend activities for an answer file
    Recommend {
        #[arg(long)]
        input: PathBuf,
        #[arg(long, value_enum, default_value_t = Technique::Hybrid)]
        technique: Technique,
        #[arg(long)]
        offline: bool,
        /// Seed for the local fallback selection
        #[arg(long)]
        seed: Option<u64>,
        /// Run one more cycle with another technique, reusing the scores
        #[arg(long, value_enum)]
        switch_to: Option<Technique>,
        /// Retry once with the same technique when the first answer was local
        #[arg(long)]
        retry: bool,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Generate a markdown report for an answer file
    Report {
        #[arg(long)]
        input: PathBuf,
        #[arg(long, value_enum, default_value_t = Technique::Hybrid)]
        technique: Technique,
        #[arg(long)]
        offline: bool,
        #[arg(long, default_value = "report.md")]
        out: PathBuf,
    },
    /// Check whether the recommendation service is reachable
    Health {
        /// Keep polling and print every status change
        #[arg(long)]
        watch: bool,
    },
    /// Rate a recommended activity
    Feedback {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        activity_id: u32,
        #[arg(long)]
        rating: u8,
        #[arg(long, default_value = "")]
        comment: String,
        #[arg(long)]
        user_id: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();

    let config = cli.config;

    match cli.command {
        Commands::Assess {
            technique,
            offline,
            out,
        } => {
            let orchestrator = build_orchestrator(&config, offline, None)?;
            let stdin = io::stdin();
            let mut lines = stdin.lock().lines();

            let mut session = AssessmentSession::new();
            run_questionnaire(&mut session, &mut lines)?;
            let input = session.submit();

            let result = orchestrator
                .get_recommendations(&input, None, technique)
                .await;
            print_result(&result);

            if let Some(out) = out {
                write_report(&result, &out)?;
            }
        }
        Commands::Score { input } => {
            let inputs = input::load_inputs(&input)?;

            for loaded in inputs.iter() {
                let scores = loaded.input.scores();
                println!("{}:", loaded.label);
                for dimension in models::Dimension::ALL {
                    let score = scores.score(dimension);
                    println!(
                        "  {}: {:.1}/10 ({})",
                        dimension.label(),
                        score,
                        ScoreBand::from_score(score)
                    );
                }
                println!(
                    "  Sleep {:.1}h ({}), {} steps ({}), mood {}",
                    scores.sleep_hours,
                    scoring::sleep_label(scores.sleep_hours),
                    scores.steps_per_day,
                    scoring::activity_label(scores.steps_per_day),
                    scores.mood
                );
            }
        }
        Commands::Recommend {
            input,
            technique,
            offline,
            seed,
            switch_to,
            retry,
            json,
        } => {
            let orchestrator = build_orchestrator(&config, offline, seed)?;
            let input = input::load_single(&input)?;

            let mut results = vec![
                orchestrator
                    .get_recommendations(&input, None, technique)
                    .await,
            ];
            if retry && results[0].is_local() {
                let again = orchestrator.retry(&results[0], &input).await;
                results[0] = again;
            }
            if let Some(next) = switch_to {
                let switched = orchestrator
                    .switch_technique(&results[0], &input, next)
                    .await;
                results.push(switched);
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&results)?);
            } else {
                for result in results.iter() {
                    print_result(result);
                }
            }
        }
        Commands::Report {
            input,
            technique,
            offline,
            out,
        } => {
            let orchestrator = build_orchestrator(&config, offline, None)?;
            let input = input::load_single(&input)?;
            let result = orchestrator
                .get_recommendations(&input, None, technique)
                .await;
            write_report(&result, &out)?;
        }
        Commands::Health { watch } => {
            let service = HttpRecommendationService::new(&config)
                .context("failed to build recommendation client")?;

            if watch {
                println!(
                    "Watching {} every {}s (Ctrl-C to stop).",
                    service.base_url(),
                    config.health_interval_secs
                );
                health::watch(&service, config.health_interval(), None, |status| {
                    println!("{}: {status}", chrono::Local::now().format("%H:%M:%S"));
                })
                .await;
            } else {
                let status = health::check(&service).await;
                println!("{}: {status}", service.base_url());
            }
        }
        Commands::Feedback {
            input,
            activity_id,
            rating,
            comment,
            user_id,
        } => {
            let scores = input::load_single(&input)?.scores();
            let user_id = user_id.unwrap_or_else(|| Uuid::new_v4().to_string());

            let outcome = match Feedback::new(user_id, activity_id, rating, comment, scores) {
                Ok(feedback) => {
                    let service = HttpRecommendationService::new(&config)
                        .context("failed to build recommendation client")?;
                    feedback::submit(&service, &feedback).await
                }
                Err(err) => Err(err),
            };

            match outcome {
                Ok(user_id) => println!("Feedback recorded for user {user_id}."),
                Err(err) => bail!("Feedback not sent: {err}"),
            }
        }
    }

    Ok(())
}

fn build_orchestrator(
    config: &ClientConfig,
    offline: bool,
    seed: Option<u64>,
) -> anyhow::Result<RecommendationOrchestrator> {
    let orchestrator = if offline {
        RecommendationOrchestrator::offline(config)
    } else {
        let service = HttpRecommendationService::new(config)
            .context("failed to build recommendation client")?;
        RecommendationOrchestrator::new(Arc::new(service), config)
    };

    Ok(match seed {
        Some(seed) => orchestrator.with_seed(seed),
        None => orchestrator,
    })
}

enum Navigation {
    Forward,
    Back,
    Restart,
}

fn run_questionnaire<I>(session: &mut AssessmentSession, lines: &mut I) -> anyhow::Result<()>
where
    I: Iterator<Item = io::Result<String>>,
{
    println!("Answer each statement with n(ever), s(ometimes), o(ften) or a(lmost always).");
    println!("Enter b to return to the previous section, r to start over.");

    loop {
        let step = session.step();
        println!();
        println!("== {} ({}%) ==", step.label(), session.progress_percent());

        let navigation = match step.dimension() {
            None => {
                ask_basic_info(session, lines)?;
                Navigation::Forward
            }
            Some(dimension) => ask_dimension(session, dimension, lines)?,
        };

        match navigation {
            Navigation::Back => {
                session.back();
            }
            Navigation::Restart => {
                println!("Starting over.");
                session.reset();
            }
            Navigation::Forward if step.is_last() => return Ok(()),
            Navigation::Forward => {
                session.next();
            }
        }
    }
}

fn ask_dimension<I>(
    session: &mut AssessmentSession,
    dimension: models::Dimension,
    lines: &mut I,
) -> anyhow::Result<Navigation>
where
    I: Iterator<Item = io::Result<String>>,
{
    for question in 1..=models::QUESTIONS_PER_DIMENSION {
        let text = questions::question_text(dimension, question).unwrap_or_default();
        let current = session.answers().answer(dimension, question);

        let value = loop {
            let reply = prompt(lines, &format!("{question}. {text} [{current}]"))?;
            if reply.eq_ignore_ascii_case("b") {
                return Ok(Navigation::Back);
            }
            if reply.eq_ignore_ascii_case("r") {
                return Ok(Navigation::Restart);
            }
            if reply.is_empty() {
                break current;
            }
            match AnswerValue::parse(&reply) {
                Some(value) => break value,
                None => println!("Please answer n, s, o or a."),
            }
        };

        session.set_answer(dimension, question, value);
    }

    Ok(Navigation::Forward)
}

fn ask_basic_info<I>(session: &mut AssessmentSession, lines: &mut I) -> anyhow::Result<()>
where
    I: Iterator<Item = io::Result<String>>,
{
    let current = session.lifestyle().clone();

    loop {
        let reply = prompt(lines, &format!("Hours of sleep per night [{}]", current.sleep_hours))?;
        if reply.is_empty() {
            break;
        }
        match reply.parse::<f64>() {
            Ok(hours) => {
                session.set_sleep_hours(hours);
                break;
            }
            Err(_) => println!("Please enter a number of hours."),
        }
    }

    loop {
        let reply = prompt(lines, &format!("Steps per day [{}]", current.steps_per_day))?;
        if reply.is_empty() {
            break;
        }
        match reply.parse::<u32>() {
            Ok(steps) => {
                session.set_steps_per_day(steps);
                break;
            }
            Err(_) => println!("Please enter a whole number of steps."),
        }
    }

    let moods: Vec<&str> = Mood::ALL.iter().map(|mood| mood.as_str()).collect();
    loop {
        let reply = prompt(
            lines,
            &format!("Mood ({}) [{}]", moods.join(", "), current.mood),
        )?;
        if reply.is_empty() {
            break;
        }
        match Mood::parse(&reply) {
            Some(mood) => {
                session.set_mood(mood);
                break;
            }
            None => println!("Please pick one of the listed moods."),
        }
    }

    Ok(())
}

fn prompt<I>(lines: &mut I, message: &str) -> anyhow::Result<String>
where
    I: Iterator<Item = io::Result<String>>,
{
    print!("{message}: ");
    io::stdout().flush()?;

    match lines.next() {
        Some(line) => Ok(line.context("failed to read answer")?.trim().to_string()),
        None => bail!("input ended before the assessment was complete"),
    }
}

fn print_result(result: &RecommendationResult) {
    let scores = &result.scores;
    println!();
    println!(
        "{} ({}{})",
        result.technique.label(),
        result.source,
        if result.is_local() { ", local mode" } else { "" }
    );
    println!(
        "Stress {:.1} | Anxiety {:.1} | Depression {:.1}",
        scores.stress_level, scores.anxiety_score, scores.depression_score
    );

    if result.activities.is_empty() {
        println!("No activities were recommended.");
        return;
    }

    for activity in result.activities.iter() {
        println!(
            "- #{} {} ({}, {} min, {})",
            activity.id, activity.name, activity.category, activity.duration, activity.intensity
        );
    }
}

fn write_report(result: &RecommendationResult, out: &Path) -> anyhow::Result<()> {
    let report = report::build_report(result, chrono::Local::now().date_naive());
    std::fs::write(out, report).with_context(|| format!("failed to write {}", out.display()))?;
    println!("Report written to {}.", out.display());
    Ok(())
}
