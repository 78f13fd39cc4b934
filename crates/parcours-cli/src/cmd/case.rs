use crate::output::{print_json, print_table};
use anyhow::{Context, Result};
use clap::Subcommand;
use parcours_core::case::Case;
use parcours_core::state::State;
use parcours_core::{guidance, resolve};
use std::path::Path;

#[derive(Subcommand, Debug)]
pub enum CaseSubcommand {
    /// Create a new case
    Create {
        /// Case slug (lowercase, hyphenated)
        slug: String,

        /// Patient name
        #[arg(long)]
        name: String,

        /// Clinical summary
        #[arg(long)]
        summary: Option<String>,

        /// Link to the shared medical documents
        #[arg(long)]
        link: Option<String>,
    },
    /// List all cases
    List,
    /// Show one case in full
    Show { slug: String },
}

pub fn run(root: &Path, subcommand: CaseSubcommand, json: bool) -> Result<()> {
    match subcommand {
        CaseSubcommand::Create {
            slug,
            name,
            summary,
            link,
        } => run_create(root, &slug, &name, summary, link, json),
        CaseSubcommand::List => run_list(root, json),
        CaseSubcommand::Show { slug } => run_show(root, &slug, json),
    }
}

fn run_create(
    root: &Path,
    slug: &str,
    name: &str,
    summary: Option<String>,
    link: Option<String>,
    json: bool,
) -> Result<()> {
    let mut case = Case::create(root, slug, name).context("failed to create case")?;
    if let Some(summary) = summary {
        case.set_summary(summary);
    }
    if let Some(link) = link {
        case.set_document_link(link);
    }
    case.save(root)?;

    if let Ok(mut state) = State::load(root) {
        state.add_active_case(&case.slug);
        let _ = state.save(root);
    }

    if json {
        print_json(&serde_json::json!({
            "slug": case.slug,
            "patient_name": case.patient_name,
            "status": case.global_status(),
        }))?;
    } else {
        println!("Created case '{}' for {}", case.slug, case.patient_name);
    }
    Ok(())
}

fn run_list(root: &Path, json: bool) -> Result<()> {
    let cases = Case::list(root).context("failed to list cases")?;

    if json {
        let list: Vec<_> = cases
            .iter()
            .map(|c| {
                serde_json::json!({
                    "slug": c.slug,
                    "patient_name": c.patient_name,
                    "status": c.global_status(),
                    "status_label": c.status.display_label(),
                    "updated_at": c.updated_at,
                })
            })
            .collect();
        return print_json(&list);
    }

    if cases.is_empty() {
        println!("No cases. Run: parcours case create <slug> --name <patient>");
        return Ok(());
    }

    let rows: Vec<Vec<String>> = cases
        .iter()
        .map(|c| {
            vec![
                c.slug.clone(),
                c.patient_name.clone(),
                c.global_status().to_string(),
                c.status.display_label().to_string(),
            ]
        })
        .collect();
    print_table(&["SLUG", "PATIENT", "STATUS", "LABEL"], rows);
    Ok(())
}

fn run_show(root: &Path, slug: &str, json: bool) -> Result<()> {
    let case = Case::load(root, slug).with_context(|| format!("case '{slug}' not found"))?;
    let status = case.global_status();

    if json {
        return print_json(&serde_json::json!({
            "slug": case.slug,
            "patient_name": case.patient_name,
            "clinical_summary": case.clinical_summary,
            "document_link": case.document_link,
            "status": status,
            "status_record": case.status,
            "quote_accepted": case.quote_accepted,
            "date_accepted": case.date_accepted,
            "budget": case.budget,
            "proposed_dates": case.proposed_dates,
            "recommended_surgeons": case.recommended_surgeons,
            "messages": case.messages,
            "created_at": case.created_at,
            "updated_at": case.updated_at,
        }));
    }

    println!("Case:     {}", case.slug);
    println!("Patient:  {}", case.patient_name);
    println!("Status:   {} ({})", status, case.status.display_label());
    if let Some(ref summary) = case.clinical_summary {
        println!("Summary:  {summary}");
    }
    if let Some(ref link) = case.document_link {
        println!("Docs:     {link}");
    }
    if let Some(ref budget) = case.budget {
        println!("Budget:   {budget}");
    }
    if let Some(ref dates) = case.proposed_dates {
        println!("Dates:    {dates}");
    }
    if !case.recommended_surgeons.is_empty() {
        println!("Surgeons: {}", case.recommended_surgeons.join(", "));
    }
    println!(
        "Flags:    quote_accepted={} date_accepted={}",
        case.quote_accepted, case.date_accepted
    );
    // One-line orientation for each role, the way the case page shows it.
    for role in parcours_core::types::Role::all() {
        let set = resolve(status, *role, case.quote_accepted, case.date_accepted);
        let hint = match set.primary {
            Some(a) => a.label,
            None => guidance(status, *role),
        };
        println!("  {role:<8} {hint}");
    }
    Ok(())
}
