use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;
use wealthwise_planner::{
    advisor::{quick_questions, ChatSession},
    config::AppConfig,
    error::PlannerError,
    finance::{
        assess_goal, compare_budget, compare_regimes, compute_emi, compute_sip_future_value,
        recommend_allocation,
    },
    models::{Goal, Priority, Profile},
    state::{FileSnapshotStore, ProfileStore},
    util::format_inr,
};

const USAGE: &str = "usage:
  wealthwise summary
  wealthwise profile <profile.json>
  wealthwise goal <name> <amount> <years> [high|medium|low]
  wealthwise chat <question...>
  wealthwise emi <principal> <annual-rate> <years>
  wealthwise sip <monthly> <annual-return> <years>";

fn arg<T: std::str::FromStr>(args: &[String], index: usize, name: &str) -> Result<T, PlannerError> {
    args.get(index)
        .ok_or_else(|| PlannerError::InvalidInput(format!("missing <{}>\n{}", name, USAGE)))?
        .parse::<T>()
        .map_err(|_| PlannerError::InvalidInput(format!("<{}> is not a valid number", name)))
}

fn parse_priority(raw: Option<&String>) -> Result<Priority, PlannerError> {
    match raw.map(|s| s.to_lowercase()).as_deref() {
        None | Some("medium") => Ok(Priority::Medium),
        Some("high") => Ok(Priority::High),
        Some("low") => Ok(Priority::Low),
        Some(other) => Err(PlannerError::InvalidInput(format!("unknown priority '{}'", other))),
    }
}

fn print_summary(store: &ProfileStore) -> Result<(), PlannerError> {
    let state = store.current();
    let Some(profile) = state.profile.as_ref() else {
        println!("No profile yet. Run `wealthwise profile <profile.json>` to get started.");
        return Ok(());
    };

    println!("\n=== PROFILE ===");
    println!("Income:   {} / month", format_inr(profile.income));
    println!("Expenses: {} / month", format_inr(profile.expenses));
    println!("Surplus:  {} / month", format_inr(profile.monthly_surplus()));

    if let Some(budget) = state.effective_budget() {
        println!("\n=== BUDGET (50/30/20) ===");
        for variance in compare_budget(&budget, profile) {
            println!(
                "{:<11} recommended {:>12}  current {:>12}",
                variance.category,
                format_inr(variance.recommended),
                format_inr(variance.current)
            );
        }
    }

    let taxes = compare_regimes(profile.annual_income(), profile.age, &profile.deductions)?;
    println!("\n=== TAX ===");
    println!("Old Regime: {}", format_inr(taxes.old.tax));
    println!("New Regime: {}", format_inr(taxes.new.tax));
    println!("Recommended: {} (saves {})", taxes.recommended, format_inr(taxes.savings));

    let allocation = recommend_allocation(profile.risk_tolerance, profile.monthly_surplus().max(0.0))?;
    println!("\n=== ALLOCATION ({} risk) ===", profile.risk_tolerance);
    for slice in &allocation.slices {
        println!("{:<7} {:>3}%  {}", slice.asset_class, slice.percent, format_inr(slice.amount));
    }

    if !profile.goals.is_empty() {
        println!("\n=== GOALS ===");
        for goal in &profile.goals {
            let assessment = assess_goal(goal, profile.monthly_surplus())?;
            println!(
                "{} - {} in {}y, needs {} / month{}",
                goal.name,
                format_inr(goal.target_amount),
                goal.timeline,
                format_inr(assessment.required_monthly_saving),
                if assessment.feasible { "" } else { " (behind schedule)" }
            );
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), PlannerError> {
    let config = AppConfig::from_env()?;

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_string().to_lowercase())),
        )
        .init();

    info!(data_dir = %config.data_dir.display(), "WealthWise starting");

    let storage = Arc::new(FileSnapshotStore::new(config.data_dir.clone()));
    let mut store = ProfileStore::load(storage, config.storage_key.clone()).await;

    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = args.first().map(String::as_str).unwrap_or("summary");

    match command {
        "summary" => print_summary(&store)?,
        "profile" => {
            let path: String = arg(&args, 1, "profile.json")?;
            let raw = tokio::fs::read_to_string(&path).await?;
            let mut profile: Profile = serde_json::from_str(&raw)?;
            if profile.goals.is_empty() {
                profile.goals = store.current().goals().to_vec();
            }
            store.save_profile(profile).await?;
            print_summary(&store)?;
        }
        "goal" => {
            let name: String = arg(&args, 1, "name")?;
            let amount: f64 = arg(&args, 2, "amount")?;
            let years: u32 = arg(&args, 3, "years")?;
            let priority = parse_priority(args.get(4))?;
            if store.current().profile.is_none() {
                println!("Create a profile before adding goals.");
                return Ok(());
            }
            let goal = Goal::new(name, amount, years, priority);
            let id = goal.id.clone();
            store.add_goal(goal).await?;
            println!("Added goal {}", id);
        }
        "chat" => {
            let question = args[1..].join(" ");
            if question.trim().is_empty() {
                println!("Try asking:");
                for q in quick_questions() {
                    println!("  [{}] {}", q.category, q.question);
                }
                return Ok(());
            }
            let session = ChatSession::new(config.chat_delay);
            if let Some(reply) = session.ask(&mut store, &question).await {
                println!("\n{}", reply.text);
            }
        }
        "emi" => {
            let result = compute_emi(
                arg(&args, 1, "principal")?,
                arg(&args, 2, "annual-rate")?,
                arg(&args, 3, "years")?,
            )?;
            println!("Monthly EMI:    {}", format_inr(result.emi));
            println!("Total interest: {}", format_inr(result.total_interest));
            println!("Total amount:   {}", format_inr(result.total_amount));
        }
        "sip" => {
            let result = compute_sip_future_value(
                arg(&args, 1, "monthly")?,
                arg(&args, 2, "annual-return")?,
                arg(&args, 3, "years")?,
            )?;
            println!("Invested:     {}", format_inr(result.total_investment));
            println!("Returns:      {}", format_inr(result.total_returns));
            println!("Future value: {}", format_inr(result.future_value));
        }
        _ => {
            eprintln!("{}", USAGE);
            return Err(PlannerError::InvalidInput(format!(
                "unknown command '{}'",
                command
            )));
        }
    }

    Ok(())
}
