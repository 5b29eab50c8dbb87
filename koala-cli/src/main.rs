//! `koala-select`: match compound selectors against a DOM fixture.
//!
//! Prints every matching element in document order together with the
//! priority weight of the best matching selector group.

mod fixture;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, ensure};
use clap::Parser;
use koala_common::warning::set_colored;
use koala_dom::{DomTree, ElementData, NodeId, NodeType};
use koala_selectors::{CompoundSelector, Match, query_selector_all};
use owo_colors::OwoColorize;

use fixture::Fixture;

/// Report which elements of a document match a selector list
#[derive(Parser, Debug)]
#[command(name = "koala-select")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # List matching elements with their weights
    koala-select page.json selectors.json

    # Evaluate :target against another fragment
    koala-select page.json selectors.json --url 'https://example.com/#usage'

    # Print the whole document with matches marked
    koala-select --tree page.json selectors.json

SELECTOR FILE:
    A JSON array of selector groups. Each group is an array of compound
    selectors written left to right, for example `.card > p:first-child`:

    [[{ "class_names": ["card"] },
      { "tag_name": "p", "combinator": "child",
        "pseudos": [{ "name": "first-child" }] }]]
"#)]
struct Cli {
    /// DOM fixture (JSON)
    #[arg(value_name = "TREE")]
    tree: PathBuf,

    /// Selector list (JSON)
    #[arg(value_name = "SELECTOR")]
    selector: PathBuf,

    /// Replace the fixture's document URL (and with it the `:target` fragment)
    #[arg(long, value_name = "URL")]
    url: Option<String>,

    /// Print the whole document tree and mark matching elements
    #[arg(long = "tree")]
    show_tree: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    set_colored(!cli.no_color);

    let mut tree = load_tree(&cli.tree)?;
    if let Some(url) = &cli.url {
        tree.set_url(url);
    }
    let groups = load_selectors(&cli.selector)?;

    let found = query_selector_all(&tree, &groups)
        .with_context(|| format!("matching {}", cli.selector.display()))?;

    let printer = Printer {
        colored: !cli.no_color,
    };
    if cli.show_tree {
        printer.print_tree(&tree, tree.root(), 0, &found);
    } else {
        printer.print_matches(&tree, &found);
    }
    Ok(())
}

fn load_tree(path: &Path) -> Result<DomTree> {
    let text =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let fixture: Fixture = serde_json::from_str(&text)
        .with_context(|| format!("parsing DOM fixture {}", path.display()))?;
    fixture
        .into_tree()
        .with_context(|| format!("building DOM from {}", path.display()))
}

fn load_selectors(path: &Path) -> Result<Vec<Vec<CompoundSelector>>> {
    let text =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let groups: Vec<Vec<CompoundSelector>> = serde_json::from_str(&text)
        .with_context(|| format!("parsing selector list {}", path.display()))?;
    ensure!(
        groups.iter().any(|group| !group.is_empty()),
        "{} contains no selectors",
        path.display()
    );
    Ok(groups)
}

/// Terminal output, optionally colored.
struct Printer {
    colored: bool,
}

impl Printer {
    fn highlight(&self, text: &str) -> String {
        if self.colored {
            text.green().to_string()
        } else {
            text.to_string()
        }
    }

    fn dim(&self, text: &str) -> String {
        if self.colored {
            text.dimmed().to_string()
        } else {
            text.to_string()
        }
    }

    /// One line per match: the element's ancestry and its weight.
    fn print_matches(&self, tree: &DomTree, found: &[(NodeId, Match)]) {
        for (node_id, matched) in found {
            println!(
                "{}  {}",
                self.highlight(&element_path(tree, *node_id)),
                self.dim(&format!("weight {}", matched.priority_weight))
            );
        }

        let summary = match found.len() {
            1 => "1 match".to_string(),
            n => format!("{n} matches"),
        };
        println!("{}", self.dim(&summary));
    }

    /// The document tree, with matching elements marked by their weight.
    fn print_tree(&self, tree: &DomTree, id: NodeId, indent: usize, found: &[(NodeId, Match)]) {
        let prefix = "  ".repeat(indent);
        let Some(node) = tree.get(id) else {
            return;
        };

        match &node.node_type {
            NodeType::Document => println!("{prefix}Document {}", self.dim(tree.url())),
            NodeType::Element(data) => {
                let tag = format!("<{}>", describe(data));
                match found.iter().find(|(matched_id, _)| *matched_id == id) {
                    Some((_, matched)) => println!(
                        "{prefix}{}  {}",
                        self.highlight(&tag),
                        self.dim(&format!("weight {}", matched.priority_weight))
                    ),
                    None => println!("{prefix}{tag}"),
                }
            }
            NodeType::Text(data) => {
                let display = data.replace('\n', "\\n");
                println!("{prefix}{}", self.dim(&format!("\"{display}\"")));
            }
            NodeType::Comment(data) => {
                println!("{prefix}{}", self.dim(&format!("<!-- {data} -->")));
            }
        }

        for &child_id in tree.children(id) {
            self.print_tree(tree, child_id, indent + 1, found);
        }
    }
}

/// `html > body > section.card > p#third`
fn element_path(tree: &DomTree, id: NodeId) -> String {
    let mut parts: Vec<String> = std::iter::once(id)
        .chain(tree.ancestors(id))
        .filter_map(|node_id| tree.as_element(node_id))
        .map(describe)
        .collect();
    parts.reverse();
    parts.join(" > ")
}

/// `tag#id.class1.class2`
fn describe(data: &ElementData) -> String {
    let mut text = data.tag_name.clone();
    if let Some(id) = data.id() {
        text.push('#');
        text.push_str(id);
    }
    for class in data.class_attribute().split_ascii_whitespace() {
        text.push('.');
        text.push_str(class);
    }
    text
}
