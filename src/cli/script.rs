//! Editor scripts: one presentation or renderer event per line
//!
//! ```text
//! menu <node-id> [<x> <y>]      context menu on node (selects it)
//! add <label...>                confirm the add-child dialog
//! dismiss                       dismiss the add-child dialog
//! cut | copy | paste | delete   menu actions on the selected node
//! drag <node-id> <x> <y>        renderer position change
//! remove-edge <edge-id>         renderer edge removal
//! show                          print the current outline
//! quit                          stop reading events
//! ```
//!
//! Blank lines and lines starting with `#` are ignored.

use std::str::FromStr;

use crate::application::{ApplicationResult, EdgeChange, EditorSession, NodeChange};
use crate::cli::{CliError, CliResult};
use crate::domain::{Identity, Position, Snapshot, ToOutline};

/// One parsed script line.
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptLine {
    Menu { node: Identity, anchor: Position },
    Add { label: String },
    Dismiss,
    Cut,
    Copy,
    Paste,
    Delete,
    Drag { node: Identity, position: Position },
    RemoveEdge { edge: Identity },
    Show,
    Quit,
}

/// What applying a line produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Message(String),
    Outline(String),
    Quit,
}

fn coordinate(word: &str) -> Result<f64, String> {
    word.parse::<f64>()
        .map_err(|_| format!("not a number: '{}'", word))
}

fn no_arguments(keyword: &str, rest: &str, line: ScriptLine) -> Result<ScriptLine, String> {
    if rest.is_empty() {
        Ok(line)
    } else {
        Err(format!("'{}' takes no arguments", keyword))
    }
}

impl FromStr for ScriptLine {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (keyword, rest) = line
            .split_once(char::is_whitespace)
            .map(|(k, r)| (k, r.trim()))
            .unwrap_or((line, ""));
        let args: Vec<&str> = rest.split_whitespace().collect();

        match keyword {
            "menu" => match args.as_slice() {
                [node] => Ok(ScriptLine::Menu {
                    node: Identity::from(*node),
                    anchor: Position::default(),
                }),
                [node, x, y] => Ok(ScriptLine::Menu {
                    node: Identity::from(*node),
                    anchor: Position::new(coordinate(x)?, coordinate(y)?),
                }),
                _ => Err("usage: menu <node-id> [<x> <y>]".to_string()),
            },
            "add" => Ok(ScriptLine::Add {
                label: rest.to_string(),
            }),
            "drag" => match args.as_slice() {
                [node, x, y] => Ok(ScriptLine::Drag {
                    node: Identity::from(*node),
                    position: Position::new(coordinate(x)?, coordinate(y)?),
                }),
                _ => Err("usage: drag <node-id> <x> <y>".to_string()),
            },
            "remove-edge" => match args.as_slice() {
                [edge] => Ok(ScriptLine::RemoveEdge {
                    edge: Identity::from(*edge),
                }),
                _ => Err("usage: remove-edge <edge-id>".to_string()),
            },
            "dismiss" => no_arguments(keyword, rest, ScriptLine::Dismiss),
            "cut" => no_arguments(keyword, rest, ScriptLine::Cut),
            "copy" => no_arguments(keyword, rest, ScriptLine::Copy),
            "paste" => no_arguments(keyword, rest, ScriptLine::Paste),
            "delete" => no_arguments(keyword, rest, ScriptLine::Delete),
            "show" => no_arguments(keyword, rest, ScriptLine::Show),
            "quit" | "exit" => no_arguments(keyword, rest, ScriptLine::Quit),
            other => Err(format!("unknown event '{}'", other)),
        }
    }
}

/// Parse a single line; `None` for blank lines and comments.
pub fn parse_line(line: &str) -> Result<Option<ScriptLine>, String> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }
    trimmed.parse().map(Some)
}

/// Parse a whole script, keeping 1-based line numbers.
pub fn parse_script(text: &str) -> CliResult<Vec<(usize, ScriptLine)>> {
    let mut lines = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let number = idx + 1;
        if let Some(line) = parse_line(raw)
            .map_err(|e| CliError::InvalidArgs(format!("line {}: {}", number, e)))?
        {
            lines.push((number, line));
        }
    }
    Ok(lines)
}

fn summary(action: &str, snapshot: &Snapshot) -> Outcome {
    Outcome::Message(format!(
        "{} ({} nodes, {} edges)",
        action,
        snapshot.nodes.len(),
        snapshot.edges.len()
    ))
}

impl ScriptLine {
    /// Feed this event to the session.
    pub fn apply(&self, session: &mut EditorSession) -> ApplicationResult<Outcome> {
        let target = session
            .selected()
            .map(|id| id.to_string())
            .unwrap_or_default();

        match self {
            ScriptLine::Menu { node, anchor } => {
                let menu = session.context_menu_requested(node, *anchor)?;
                Ok(Outcome::Message(format!(
                    "menu on {} at {} (paste {})",
                    menu.node,
                    menu.anchor,
                    if menu.paste_enabled { "enabled" } else { "disabled" }
                )))
            }
            ScriptLine::Add { label } => {
                let snapshot = session.add_child_confirmed(label)?;
                Ok(summary(&format!("added '{}' under {}", label, target), &snapshot))
            }
            ScriptLine::Dismiss => {
                session.add_child_dismissed();
                Ok(Outcome::Message("dialog dismissed".to_string()))
            }
            ScriptLine::Cut => {
                let snapshot = session.cut_requested()?;
                Ok(summary(&format!("cut {}", target), &snapshot))
            }
            ScriptLine::Copy => {
                let snapshot = session.copy_requested()?;
                Ok(summary(&format!("copied {}", target), &snapshot))
            }
            ScriptLine::Paste => {
                let snapshot = session.paste_requested()?;
                Ok(summary(&format!("pasted under {}", target), &snapshot))
            }
            ScriptLine::Delete => {
                let snapshot = session.delete_requested()?;
                Ok(summary(&format!("deleted {}", target), &snapshot))
            }
            ScriptLine::Drag { node, position } => {
                session.apply_node_changes([NodeChange::Position {
                    id: node.clone(),
                    position: *position,
                }])?;
                Ok(Outcome::Message(format!("moved {} to {}", node, position)))
            }
            ScriptLine::RemoveEdge { edge } => {
                let snapshot =
                    session.apply_edge_changes([EdgeChange::Remove { id: edge.clone() }])?;
                Ok(summary(&format!("removed edge {}", edge), &snapshot))
            }
            ScriptLine::Show => Ok(Outcome::Outline(
                session.workspace().store().to_outline().to_string(),
            )),
            ScriptLine::Quit => Ok(Outcome::Quit),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::seed::chart_of_accounts;
    use crate::domain::Offset;
    use rstest::rstest;

    #[rstest]
    #[case("cut", ScriptLine::Cut)]
    #[case("  copy  ", ScriptLine::Copy)]
    #[case("paste", ScriptLine::Paste)]
    #[case("delete", ScriptLine::Delete)]
    #[case("dismiss", ScriptLine::Dismiss)]
    #[case("show", ScriptLine::Show)]
    #[case("exit", ScriptLine::Quit)]
    #[case("add Petty cash", ScriptLine::Add { label: "Petty cash".to_string() })]
    #[case("menu bank", ScriptLine::Menu { node: "bank".into(), anchor: Position::default() })]
    #[case("menu bank 10 20.5", ScriptLine::Menu { node: "bank".into(), anchor: Position::new(10.0, 20.5) })]
    #[case("drag rent -1 2", ScriptLine::Drag { node: "rent".into(), position: Position::new(-1.0, 2.0) })]
    #[case("remove-edge root-assets", ScriptLine::RemoveEdge { edge: "root-assets".into() })]
    fn given_valid_line_when_parsing_then_returns_event(#[case] line: &str, #[case] expected: ScriptLine) {
        assert_eq!(parse_line(line).unwrap(), Some(expected));
    }

    #[rstest]
    #[case("jump root")]
    #[case("cut now")]
    #[case("menu")]
    #[case("menu bank 10")]
    #[case("drag rent x 2")]
    fn given_invalid_line_when_parsing_then_fails(#[case] line: &str) {
        assert!(parse_line(line).is_err());
    }

    #[test]
    fn given_comments_and_blanks_when_parsing_script_then_keeps_line_numbers() {
        let script = "# setup\n\nmenu cash\ncopy\n";
        let lines = parse_script(script).unwrap();
        assert_eq!(
            lines,
            vec![
                (3, ScriptLine::Menu { node: "cash".into(), anchor: Position::default() }),
                (4, ScriptLine::Copy),
            ]
        );
    }

    #[test]
    fn given_bad_line_when_parsing_script_then_error_names_the_line() {
        let err = parse_script("menu cash\nfly\n").unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn given_add_event_when_applying_then_reports_new_counts() {
        let mut session = EditorSession::new(chart_of_accounts().unwrap(), Offset::RELOCATION);
        ScriptLine::Menu { node: "cash".into(), anchor: Position::default() }
            .apply(&mut session)
            .unwrap();

        let outcome = ScriptLine::Add { label: "Petty cash".to_string() }
            .apply(&mut session)
            .unwrap();

        assert_eq!(
            outcome,
            Outcome::Message("added 'Petty cash' under cash (21 nodes, 20 edges)".to_string())
        );
    }
}
