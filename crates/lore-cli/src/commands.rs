use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use anyhow::{bail, Context};
use colored::Colorize;
use lore_book::{
    extract_narrative, format_json, minify_json, narrative_markdown, remove_entry, to_string_indented,
    update_entry, validate_json, Lorebook, DEFAULT_INDENT,
};
use lore_diff::{diff_lines_with, DiffResult, DiffType, LineRecord};
use lore_merge::{load_decisions, save_decisions, MergeSession, SegmentIdentity, Side};
use tracing::{info, warn};

use crate::cli::*;
use crate::config::CliConfig;

/// Settings resolved from the config file and global flags.
struct Settings {
    config: CliConfig,
    format: OutputFormat,
}

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = CliConfig::load(cli.config.as_deref())?;
    let format = cli.format.unwrap_or(config.output.format);
    if !config.output.color {
        colored::control::set_override(false);
    }
    let settings = Settings { config, format };

    match cli.command {
        Command::Diff(args) => cmd_diff(&settings, args),
        Command::Merge(args) => cmd_merge(&settings, args),
        Command::Outline(args) => cmd_outline(&settings, args),
        Command::Entry(args) => cmd_entry(&settings, args),
        Command::Narrative(args) => cmd_narrative(args),
        Command::ExportMarkdown(args) => cmd_export_markdown(args),
        Command::Format(args) => cmd_format(&settings, args),
        Command::Minify(args) => cmd_minify(args),
    }
}

fn read_text(path: &Path) -> anyhow::Result<String> {
    fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

fn emit(output: Option<&Path>, text: &str) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            fs::write(path, text).with_context(|| format!("writing {}", path.display()))?;
            info!(path = %path.display(), bytes = text.len(), "wrote output");
            println!("{} Wrote {}", "✓".green().bold(), path.display().to_string().bold());
        }
        None => println!("{text}"),
    }
    Ok(())
}

fn reindent(text: String, indent: usize) -> String {
    if indent == DEFAULT_INDENT {
        text
    } else {
        format_json(&text, indent)
    }
}

// ---- diff ----

fn cmd_diff(settings: &Settings, args: DiffArgs) -> anyhow::Result<()> {
    let left = read_text(&args.left)?;
    let right = read_text(&args.right)?;
    let diff = diff_lines_with(&left, &right, &settings.config.diff_options());
    info!(
        left = %args.left.display(),
        right = %args.right.display(),
        changes = diff.total_changes,
        "diffed documents"
    );

    match settings.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&diff)?),
        OutputFormat::Text => {
            let context = args.context.or(settings.config.output.context);
            print!("{}", render_diff(&diff, context));
        }
    }
    Ok(())
}

/// Text rendering of a diff: one row per record, then the counters.
///
/// With `context`, unchanged rows further than `context` records from any
/// change are folded into a `...` marker.
pub fn render_diff(diff: &DiffResult, context: Option<usize>) -> String {
    if diff.is_identical() {
        return format!("{}\n", "No differences.".green());
    }

    let visible = visible_rows(&diff.lines, context);
    let mut out = String::new();
    let mut folded = false;
    for (record, show) in diff.lines.iter().zip(visible) {
        if !show {
            if !folded {
                out.push_str(&format!("{}\n", "  ...".dimmed()));
                folded = true;
            }
            continue;
        }
        folded = false;
        out.push_str(&render_record(record));
    }

    out.push_str(&format!(
        "\n{} changes: {} {} {}\n",
        diff.total_changes.to_string().bold(),
        format!("+{}", diff.additions).green(),
        format!("-{}", diff.deletions).red(),
        format!("~{}", diff.modifications).yellow(),
    ));
    out
}

fn visible_rows(lines: &[LineRecord], context: Option<usize>) -> Vec<bool> {
    let Some(context) = context else {
        return vec![true; lines.len()];
    };
    let mut visible = vec![false; lines.len()];
    for (i, record) in lines.iter().enumerate() {
        if record.is_change() {
            let start = i.saturating_sub(context);
            let end = (i + context + 1).min(lines.len());
            visible[start..end].iter_mut().for_each(|v| *v = true);
        }
    }
    visible
}

fn render_record(record: &LineRecord) -> String {
    let id = SegmentIdentity::of(record).to_string();
    match record.diff_type {
        DiffType::Unchanged => format!("  {:>5}  {}\n", record.line_number, record.left_content),
        DiffType::Added => format!("{}\n", format!("+ {id:<16} {}", record.right_content).green()),
        DiffType::Removed => format!("{}\n", format!("- {id:<16} {}", record.left_content).red()),
        DiffType::Modified => format!(
            "{}\n    {}\n    {}\n",
            format!("~ {id}").yellow(),
            format!("- {}", record.left_content).red(),
            format!("+ {}", record.right_content).green(),
        ),
    }
}

// ---- merge ----

fn parse_accept(flag: &str) -> anyhow::Result<(SegmentIdentity, Side)> {
    let Some((id, side)) = flag.split_once('=') else {
        bail!("expected ID=left|right, got '{flag}'");
    };
    let identity: SegmentIdentity = id.parse().with_context(|| format!("in --accept {flag}"))?;
    let side: Side = side.parse().with_context(|| format!("in --accept {flag}"))?;
    Ok((identity, side))
}

fn cmd_merge(settings: &Settings, args: MergeArgs) -> anyhow::Result<()> {
    let mut session = MergeSession::new(settings.config.diff_options());
    session.load_left(read_text(&args.left)?);
    session.load_right(read_text(&args.right)?);

    if let Some(path) = &args.decisions {
        let store = load_decisions(path).with_context(|| format!("loading decisions {}", path.display()))?;
        session.set_decisions(store);
    }
    for flag in &args.accept {
        let (identity, side) = parse_accept(flag)?;
        session.accept(identity, side);
    }
    for id in &args.reject {
        let identity: SegmentIdentity = id.parse().with_context(|| format!("in --reject {id}"))?;
        session.reject(identity);
    }

    let known: BTreeSet<SegmentIdentity> = session
        .diff()
        .map(|diff| diff.changes().map(SegmentIdentity::of).collect())
        .unwrap_or_default();
    for decision in session.decisions().iter() {
        if !known.contains(&decision.identity) {
            warn!(identity = %decision.identity, "decision does not match any change");
        }
    }

    let merged = session.merged();
    info!(decisions = session.decisions().len(), bytes = merged.len(), "built merged document");

    if let Some(path) = &args.save_decisions {
        save_decisions(path, session.decisions())
            .with_context(|| format!("saving decisions {}", path.display()))?;
    }

    match settings.format {
        OutputFormat::Json if args.output.is_none() => {
            let decisions: Vec<_> = session.decisions().iter().collect();
            let report = serde_json::json!({ "merged": merged, "decisions": decisions });
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(())
        }
        _ => emit(args.output.as_deref(), &merged),
    }
}

// ---- lorebook ----

fn cmd_outline(settings: &Settings, args: OutlineArgs) -> anyhow::Result<()> {
    let book = Lorebook::parse(&read_text(&args.file)?)
        .with_context(|| format!("parsing {}", args.file.display()))?;
    let entries = book.outline(&args.search)?;

    if settings.format == OutputFormat::Json {
        let list: Vec<_> = entries.iter().map(|(_, entry)| entry).collect();
        println!("{}", to_string_indented(&list, settings.config.json.indent)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!("No matching entries.");
        return Ok(());
    }
    for (uid, entry) in &entries {
        let state = if entry.disable {
            "off".red()
        } else if entry.constant {
            "const".cyan()
        } else {
            "".normal()
        };
        println!("{:>6}  {}  {}", uid.yellow(), entry.comment.bold(), state);
        if !entry.key.is_empty() {
            println!("        keys: {}", entry.key.join(", ").blue());
        }
        println!("        {}", entry.content_preview(80).dimmed());
    }
    println!("\n{} of {} entries", entries.len(), book.entry_count());
    Ok(())
}

fn cmd_entry(settings: &Settings, args: EntryArgs) -> anyhow::Result<()> {
    let indent = settings.config.json.indent;
    match args.action {
        EntryAction::Show { file, uid } => {
            let book = Lorebook::parse(&read_text(&file)?)?;
            let entry = book.entry(&uid)?;
            println!("{}", to_string_indented(&entry, indent)?);
            Ok(())
        }
        EntryAction::Remove { file, uid, output } => {
            let mut session = outline_session(settings, &file)?;
            session.apply_outline_edit(|text| remove_entry(text, &uid))?;
            info!(%uid, "removed entry");
            report_outline_edit(&mut session);
            emit(output.as_deref(), &reindent(session.right().to_string(), indent))
        }
        EntryAction::Update { file, uid, patch, output } => {
            let patch = validate_json(&patch).context("--patch is not valid JSON")?;
            let mut session = outline_session(settings, &file)?;
            session.apply_outline_edit(|text| update_entry(text, &uid, &patch))?;
            info!(%uid, "updated entry");
            report_outline_edit(&mut session);
            emit(output.as_deref(), &reindent(session.right().to_string(), indent))
        }
    }
}

/// A session whose base is the lorebook at `file`; entry edits land on the right side.
fn outline_session(settings: &Settings, file: &Path) -> anyhow::Result<MergeSession> {
    let mut session = MergeSession::new(settings.config.diff_options());
    session.load_left(read_text(file)?);
    Ok(session)
}

fn report_outline_edit(session: &mut MergeSession) {
    if let Some(diff) = session.diff() {
        info!(
            additions = diff.additions,
            deletions = diff.deletions,
            modifications = diff.modifications,
            "outline edit against base"
        );
    }
}

fn cmd_narrative(args: NarrativeArgs) -> anyhow::Result<()> {
    let narrative = extract_narrative(&read_text(&args.file)?)
        .with_context(|| format!("extracting narrative from {}", args.file.display()))?;
    emit(args.output.as_deref(), &narrative)
}

fn cmd_export_markdown(args: ExportMarkdownArgs) -> anyhow::Result<()> {
    let files = narrative_markdown(&read_text(&args.file)?)?;
    fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("creating {}", args.out_dir.display()))?;
    for (uid, markdown) in &files {
        let path = args.out_dir.join(format!("entry-{uid}.md"));
        fs::write(&path, markdown).with_context(|| format!("writing {}", path.display()))?;
    }
    info!(count = files.len(), dir = %args.out_dir.display(), "exported markdown");
    println!(
        "{} Exported {} entries to {}",
        "✓".green().bold(),
        files.len(),
        args.out_dir.display().to_string().bold()
    );
    Ok(())
}

fn cmd_format(settings: &Settings, args: FormatArgs) -> anyhow::Result<()> {
    let text = read_text(&args.file)?;
    validate_json(&text).with_context(|| format!("{} is not valid JSON", args.file.display()))?;
    println!("{}", format_json(&text, args.indent.unwrap_or(settings.config.json.indent)));
    Ok(())
}

fn cmd_minify(args: MinifyArgs) -> anyhow::Result<()> {
    let text = read_text(&args.file)?;
    validate_json(&text).with_context(|| format!("{} is not valid JSON", args.file.display()))?;
    println!("{}", minify_json(&text));
    Ok(())
}
