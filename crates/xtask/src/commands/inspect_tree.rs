//! Read and inspect saved tree records
//!
//! Decodes tree_{entity}.json files and displays the tree with its
//! in-flight progress (cursors, counters, chosen branches).

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use std::path::PathBuf;

use ai_runtime::{BehaviorTree, NpcAction, TreeRecord};
use behavior_tree::{Branch, Node};

use crate::dirs;

/// Read and inspect saved tree records
#[derive(Parser)]
pub struct InspectTree {
    /// Entity whose record to read (e.g., 1, 2)
    #[arg(value_name = "ENTITY", required_unless_present = "file")]
    entity: Option<u32>,

    /// Read this record file instead of looking one up by entity
    #[arg(long, value_name = "FILE", conflicts_with = "entity")]
    file: Option<PathBuf>,

    /// Custom save directory (defaults to platform-specific location)
    #[arg(short, long, value_name = "DIR")]
    dir: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    format: OutputFormat,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    /// Outline with node progress and tree stats
    Summary,
    /// Full JSON output
    Json,
    /// Pretty-printed debug format
    Debug,
}

impl InspectTree {
    pub fn execute(self) -> Result<()> {
        let record_file = match (self.file, self.entity) {
            (Some(file), _) => file,
            (None, Some(entity)) => {
                let dir = match self.dir {
                    Some(dir) => dir,
                    None => dirs::trees_dir()?,
                };
                dir.join(format!("tree_{}.json", entity))
            }
            (None, None) => anyhow::bail!("Either an entity or --file is required"),
        };

        if !record_file.exists() {
            anyhow::bail!("Tree record not found: {}", record_file.display());
        }

        let text = std::fs::read_to_string(&record_file)
            .with_context(|| format!("Failed to read tree record: {}", record_file.display()))?;
        let value: serde_json::Value = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse tree record: {}", record_file.display()))?;
        let record = TreeRecord::decode(value)
            .with_context(|| format!("Failed to decode tree record: {}", record_file.display()))?;

        // Print header
        println!(
            "{} {}",
            style("Record File:").bold().cyan(),
            record_file.display()
        );
        println!(
            "{} {}",
            style("File Size:").bold().cyan(),
            format_bytes(text.len())
        );
        println!("{} {}", style("Entity:").bold().cyan(), record.entity);
        println!(
            "{} {}",
            style("Armed:").bold().cyan(),
            if record.initialized { "yes" } else { "no" }
        );
        println!();

        match self.format {
            OutputFormat::Summary => print_summary(&record.tree),
            OutputFormat::Json => print_json(&record)?,
            OutputFormat::Debug => print_debug(&record),
        }

        Ok(())
    }
}

fn print_summary(tree: &BehaviorTree) {
    println!("{}", style("=== Behavior Tree ===").bold().green());
    println!();
    for line in outline(tree) {
        println!("  {}", line);
    }
    println!();

    let mut leaves = 0;
    tree.for_each_leaf(&mut |_| leaves += 1);
    println!("{}", style("Stats:").bold().yellow());
    println!("  Nodes: {}", node_count(tree));
    println!("  Leaves: {}", leaves);
    println!("  Depth: {}", depth(tree));
    println!();
}

fn print_json(record: &TreeRecord) -> Result<()> {
    let value = record.encode().context("Failed to encode tree record")?;
    let json = serde_json::to_string_pretty(&value).context("Failed to format tree record")?;
    println!("{}", json);
    Ok(())
}

fn print_debug(record: &TreeRecord) {
    println!("{:#?}", record);
}

/// One line per node, indented by depth, with its live progress.
fn outline(tree: &BehaviorTree) -> Vec<String> {
    let mut lines = Vec::new();
    push_outline(tree, 0, &mut lines);
    lines
}

fn push_outline(node: &BehaviorTree, indent: usize, lines: &mut Vec<String>) {
    let pad = "  ".repeat(indent);
    match node {
        Node::Sequence(seq) => {
            lines.push(format!(
                "{}Sequence [cursor {}/{}]",
                pad,
                seq.cursor(),
                seq.children().len()
            ));
            for child in seq.children() {
                push_outline(child, indent + 1, lines);
            }
        }
        Node::Selector(sel) => {
            lines.push(format!(
                "{}Selector [cursor {}/{}]",
                pad,
                sel.cursor(),
                sel.children().len()
            ));
            for child in sel.children() {
                push_outline(child, indent + 1, lines);
            }
        }
        Node::RepeatForN(rep) => {
            lines.push(format!(
                "{}RepeatForN [{} of {} left]",
                pad,
                rep.remaining(),
                rep.count()
            ));
            push_outline(rep.child(), indent + 1, lines);
        }
        Node::RandomChoice(choice) => {
            let chosen = match choice.chosen() {
                Some(Branch::First) => "first",
                Some(Branch::Second) => "second",
                None => "unrolled",
            };
            lines.push(format!(
                "{}RandomChoice [{}% first, {}]",
                pad,
                choice.percent(),
                chosen
            ));
            push_outline(choice.first(), indent + 1, lines);
            push_outline(choice.second(), indent + 1, lines);
        }
        Node::Leaf(action) => lines.push(format!("{}{}", pad, describe_leaf(action))),
    }
}

fn describe_leaf(action: &NpcAction) -> String {
    match action {
        NpcAction::TargetInRange(node) => format!("TargetInRange (radius {})", node.radius),
        NpcAction::FireProjectileBurst(node) => format!(
            "FireProjectileBurst (cooldown {}/{})",
            node.remaining, node.skip_ticks
        ),
        other => other.kind().to_string(),
    }
}

fn node_count(node: &BehaviorTree) -> usize {
    1 + match node {
        Node::Sequence(seq) => seq.children().iter().map(node_count).sum(),
        Node::Selector(sel) => sel.children().iter().map(node_count).sum(),
        Node::RepeatForN(rep) => node_count(rep.child()),
        Node::RandomChoice(choice) => node_count(choice.first()) + node_count(choice.second()),
        Node::Leaf(_) => 0,
    }
}

fn depth(node: &BehaviorTree) -> usize {
    1 + match node {
        Node::Sequence(seq) => seq.children().iter().map(depth).max().unwrap_or(0),
        Node::Selector(sel) => sel.children().iter().map(depth).max().unwrap_or(0),
        Node::RepeatForN(rep) => depth(rep.child()),
        Node::RandomChoice(choice) => depth(choice.first()).max(depth(choice.second())),
        Node::Leaf(_) => 0,
    }
}

fn format_bytes(bytes: usize) -> String {
    const KB: usize = 1024;

    if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}

#[cfg(test)]
mod tests {
    use ai_runtime::AiConfig;
    use ai_runtime::ai::presets;

    use super::*;

    #[test]
    fn outline_indents_children_under_their_parent() {
        let tree = presets::sentry(&AiConfig::default());
        let lines = outline(&tree);

        assert_eq!(lines[0], "RepeatForN [8 of 8 left]");
        assert!(lines[1].starts_with("  Selector [cursor 0/2]"));
        assert!(lines.iter().skip(1).all(|line| line.starts_with("  ")));
        assert!(lines.iter().any(|line| line.contains("TargetInRange (radius 7)")));
        assert!(lines.iter().any(|line| line.contains("FireProjectileBurst (cooldown 2/2)")));
    }

    #[test]
    fn stats_cover_every_node() {
        let tree = presets::ranged_skirmisher(&AiConfig::default());
        let mut leaves = 0;
        tree.for_each_leaf(&mut |_| leaves += 1);

        assert_eq!(outline(&tree).len(), node_count(&tree));
        assert_eq!(leaves, 5);
        assert!(depth(&tree) >= 3);
    }
}
