//! Digest commands: a single ad-hoc digest, or one per registered user.

use std::path::Path;

use console::style;

use crate::cli::helpers::AppContext;
use crate::cli::icons::{dim_arrow, error, info, success, warn};
use crate::config::Config;
use crate::models::UserPreferences;
use crate::services::{
    load_users, mailer_from_config, AggregateReport, Delivered, DigestRunner, RunOutcome,
};

pub struct DigestRequest {
    pub name: String,
    pub email: String,
    pub preferences: String,
    pub year: Option<i32>,
    pub no_send: bool,
    pub json: bool,
}

fn print_report(report: &AggregateReport) {
    eprintln!(
        "  {} {} sources, {} candidates: {} accepted, {} irrelevant, {} stale, {} duplicate",
        dim_arrow(),
        report.sources_attempted,
        report.candidates_seen,
        report.accepted,
        report.irrelevant,
        report.stale,
        report.duplicates
    );
    if report.over_cap > 0 {
        eprintln!("  {} {} over the per-bucket cap", dim_arrow(), report.over_cap);
    }
    for failed in &report.failed_sources {
        eprintln!("  {} {}: {}", warn(), failed.label, style(&failed.error).dim());
    }
}

fn print_delivery(outcome: &RunOutcome) {
    match &outcome.delivery {
        Ok(Delivered::Spooled(path)) => eprintln!(
            "{} Digest for {} spooled to {}",
            success(),
            outcome.user.contact_address,
            path.display()
        ),
        Ok(Delivered::DryRun) => {
            eprintln!(
                "{} Digest for {} not sent (no spool directory configured)",
                success(),
                outcome.user.contact_address
            );
            println!("To: {}", outcome.message.to);
            println!("Subject: {}", outcome.message.subject);
            println!();
            println!("{}", outcome.message.body);
        }
        Err(e) => eprintln!(
            "{} Delivery to {} failed: {}",
            error(),
            outcome.user.contact_address,
            e
        ),
    }
}

/// Build one digest from command-line preferences.
pub async fn cmd_digest(config: Config, degrade: bool, request: DigestRequest) -> anyhow::Result<()> {
    let ctx = AppContext::build(config, degrade)?;
    let user = UserPreferences::new(
        &request.name,
        &request.email,
        UserPreferences::parse_terms(&request.preferences),
    );

    eprintln!(
        "{} Building digest for {} using {} relevance",
        info(),
        user.display_name,
        ctx.classifier.name()
    );

    let mailer = mailer_from_config(&ctx.config.mail);
    let runner = DigestRunner::new(&ctx.config, ctx.aggregator(request.year), mailer.as_ref());

    if request.no_send {
        let (digest, report, message) = runner.prepare(&user).await;
        if request.json {
            let out = serde_json::json!({
                "to": message.to,
                "subject": message.subject,
                "digest": digest,
                "report": report,
                "body": message.body,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        } else {
            print_report(&report);
            println!("{}", message.body);
        }
        return Ok(());
    }

    let outcome = runner.run_user(&user).await;
    print_report(&outcome.report);
    print_delivery(&outcome);
    if let Err(e) = outcome.delivery {
        anyhow::bail!("digest built but not delivered: {}", e);
    }
    Ok(())
}

/// Send a digest to every user in a JSON-lines file.
pub async fn cmd_run(
    config: Config,
    degrade: bool,
    users_path: &Path,
    year: Option<i32>,
) -> anyhow::Result<()> {
    let users: Vec<UserPreferences> = load_users(users_path)?
        .iter()
        .map(|u| u.to_preferences())
        .collect();
    if users.is_empty() {
        eprintln!("{} No registered users in {}", warn(), users_path.display());
        return Ok(());
    }

    let ctx = AppContext::build(config, degrade)?;
    let mailer = mailer_from_config(&ctx.config.mail);
    let runner = DigestRunner::new(&ctx.config, ctx.aggregator(year), mailer.as_ref());

    eprintln!("{} Running digests for {} users", info(), users.len());

    let mut failed = 0;
    for user in &users {
        eprintln!(
            "{} {} ({})",
            info(),
            user.display_name,
            user.preference_terms.join(", ")
        );
        let outcome = runner.run_user(user).await;
        print_report(&outcome.report);
        print_delivery(&outcome);
        if !outcome.delivered() {
            failed += 1;
        }
    }

    if failed > 0 {
        anyhow::bail!("{} of {} digests were not delivered", failed, users.len());
    }
    eprintln!("{} Sent {} digests", success(), users.len());
    Ok(())
}
