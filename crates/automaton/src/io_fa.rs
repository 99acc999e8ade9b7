#![forbid(unsafe_code)]

use std::fmt;
use std::io::BufWriter;
use std::io::Read;
use std::io::Write;
use std::str::FromStr;

use itertools::Itertools;
use log::info;
use log::warn;
use regex::Regex;
use rustc_hash::FxHashSet;
use streaming_iterator::StreamingIterator;

use automin_io::LargeFormatter;
use automin_io::LineIterator;
use automin_utilities::AutominError;
use automin_utilities::debug_trace;

use crate::Automaton;
use crate::AutomatonBuilder;
use crate::AutomatonKind;
use crate::FormatError;
use crate::State;
use crate::TargetSet;
use crate::canonical_symbol;

/// The field of a transition without targets.
const NO_TRANSITION: &str = "-";

/// Separates the targets of a single transition.
const TARGET_SEPARATOR: char = '|';

/// Loads an automaton in the line based format from the given reader.
///
/// # Details
///
/// The first non-blank line is the heading `<NFA|DFA> <symbol>...`, where the
/// symbol `\eps` is read as `ε`. Every following non-blank line defines one
/// state:
///
/// `[><]<id> <field>...`
///
/// The prefix `>` marks an initial state, `<` a final state and `><` (or
/// `<>`) both. There is one field per symbol, either `-` or the targets
/// separated by `|`. States may be referred to before they are defined.
///
/// The declared kind is only checked against the result, a `DFA` that is not
/// deterministic is reported as a warning.
pub fn read_fa(reader: impl Read) -> Result<Automaton, AutominError> {
    info!("Reading automaton...");

    let state_regex = Regex::new(r"^(><|<>|>|<|)(.*)$").expect("Regex compilation should not fail");

    let mut lines = LineIterator::new(reader);
    let mut declared: Option<AutomatonKind> = None;
    let mut alphabet: Vec<String> = Vec::new();

    let mut builder = AutomatonBuilder::new();
    let mut defined = FxHashSet::default();

    loop {
        lines.advance();
        let Some(line) = lines.get() else {
            break;
        };
        let line_number = lines.line_number();

        let mut fields = line.split_whitespace();
        let Some(first) = fields.next() else {
            // Blank lines are ignored.
            continue;
        };

        if declared.is_none() {
            let kind = first.parse::<AutomatonKind>().map_err(|_| FormatError::InvalidKind {
                line: line_number,
                found: first.to_string(),
            })?;

            for symbol in fields {
                let symbol = canonical_symbol(symbol);
                if alphabet.iter().any(|other| other == symbol) {
                    return Err(FormatError::DuplicateSymbol {
                        line: line_number,
                        symbol: symbol.to_string(),
                    }
                    .into());
                }
                alphabet.push(symbol.to_string());
            }

            declared = Some(kind);
            continue;
        }

        let (_, [prefix, id]) = state_regex
            .captures(first)
            .ok_or(FormatError::MissingIdentifier { line: line_number })?
            .extract();
        if id.is_empty() {
            return Err(FormatError::MissingIdentifier { line: line_number }.into());
        }
        if id.starts_with(['>', '<']) {
            return Err(FormatError::InvalidIdentifier {
                line: line_number,
                id: id.to_string(),
            }
            .into());
        }

        let fields: Vec<&str> = fields.collect();
        if fields.len() != alphabet.len() {
            return Err(FormatError::FieldCountMismatch {
                line: line_number,
                expected: alphabet.len(),
                found: fields.len(),
            }
            .into());
        }

        let index = builder.add_state(id);
        if !defined.insert(index) {
            return Err(FormatError::Redefinition {
                line: line_number,
                id: id.to_string(),
            }
            .into());
        }

        let mut transitions = Vec::with_capacity(fields.len());
        for field in fields {
            transitions.push(read_targets(&mut builder, field).ok_or_else(|| FormatError::InvalidTarget {
                line: line_number,
                field: field.to_string(),
            })?);
        }

        debug_trace!("Read state {id} with prefix '{prefix}'");

        builder.set_initial(index, prefix.contains('>'));
        builder.set_final(index, prefix.contains('<'));
        builder.set_transitions(index, transitions);
    }

    if let Some(error) = lines.error() {
        return Err(error.into());
    }

    let declared = declared.ok_or(FormatError::MissingHeader)?;
    let automaton = builder.finish(alphabet);
    automaton.validate()?;

    if let Some(mismatch) = check_declared_kind(declared, &automaton) {
        warn!("{mismatch}");
    }

    info!(
        "Finished reading automaton with {} states and {} transitions",
        LargeFormatter(automaton.num_of_states()),
        LargeFormatter(automaton.num_of_transitions())
    );
    Ok(automaton)
}

/// Reads a single transition field, returns `None` when one of the targets is empty.
fn read_targets(builder: &mut AutomatonBuilder, field: &str) -> Option<TargetSet> {
    if field == NO_TRANSITION {
        return Some(TargetSet::new());
    }

    let mut targets = TargetSet::new();
    for target in field.split(TARGET_SEPARATOR) {
        if target.is_empty() {
            return None;
        }
        targets.insert(builder.add_state(target));
    }

    Some(targets)
}

/// The declared kind of an automaton does not match its structure.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KindMismatch {
    pub declared: AutomatonKind,
    pub actual: AutomatonKind,
}

impl fmt::Display for KindMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Automaton is declared as {}, but it is an {}",
            self.declared, self.actual
        )
    }
}

/// Returns a mismatch when the automaton is declared as `DFA` but is not
/// deterministic. Declaring a deterministic automaton as `NFA` is fine.
pub fn check_declared_kind(declared: AutomatonKind, automaton: &Automaton) -> Option<KindMismatch> {
    if declared == AutomatonKind::Dfa && !automaton.is_deterministic() {
        Some(KindMismatch {
            declared,
            actual: AutomatonKind::Nfa,
        })
    } else {
        None
    }
}

/// The layout used when printing an automaton.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum Layout {
    /// Fields separated by a single space, the canonical form.
    #[default]
    Compact,
    /// Fields padded into columns.
    Aligned,
}

/// Displays an automaton in the given [Layout], see [Automaton::display].
pub struct DisplayAutomaton<'a> {
    automaton: &'a Automaton,
    layout: Layout,
}

impl Automaton {
    /// Returns a value that prints the automaton in the given layout. Both
    /// layouts can be read again by [read_fa].
    pub fn display(&self, layout: Layout) -> DisplayAutomaton<'_> {
        DisplayAutomaton { automaton: self, layout }
    }

    /// Returns the cells of the heading and of every state.
    fn rows(&self) -> Vec<Vec<String>> {
        let mut rows = Vec::with_capacity(self.num_of_states() + 1);

        rows.push(
            std::iter::once(self.kind().to_string())
                .chain(self.alphabet().iter().cloned())
                .collect(),
        );

        for state in self.states() {
            let mut row = Vec::with_capacity(self.alphabet().len() + 1);
            row.push(format!("{}{}", prefix(state), state.id()));

            for targets in state.transitions() {
                if targets.is_empty() {
                    row.push(NO_TRANSITION.to_string());
                } else {
                    row.push(
                        targets
                            .iter()
                            .map(|target| self.state(target).id())
                            .join(&TARGET_SEPARATOR.to_string()),
                    );
                }
            }

            rows.push(row);
        }

        rows
    }
}

/// Returns the markers written in front of the state identifier.
fn prefix(state: &State) -> &'static str {
    match (state.is_initial(), state.is_final()) {
        (true, true) => "><",
        (true, false) => ">",
        (false, true) => "<",
        (false, false) => "",
    }
}

impl fmt::Display for DisplayAutomaton<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows = self.automaton.rows();

        match self.layout {
            Layout::Compact => {
                for row in &rows {
                    writeln!(f, "{}", row.iter().format(" "))?;
                }
            }
            Layout::Aligned => {
                // The identifiers line up behind the widest prefix.
                let id_width = self
                    .automaton
                    .states()
                    .iter()
                    .map(|state| state.id().chars().count())
                    .max()
                    .unwrap_or(0);

                let mut widths = vec![0; self.automaton.alphabet().len() + 1];
                for (index, row) in rows.iter().enumerate() {
                    for (column, cell) in row.iter().enumerate() {
                        let width = if index > 0 && column == 0 {
                            2 + id_width
                        } else {
                            cell.chars().count()
                        };
                        widths[column] = widths[column].max(width);
                    }
                }

                for (index, row) in rows.iter().enumerate() {
                    for (column, cell) in row.iter().enumerate() {
                        if column > 0 {
                            write!(f, "  ")?;
                        }

                        let last = column + 1 == row.len();
                        if index > 0 && column == 0 {
                            let state = &self.automaton.states()[index - 1];
                            let marked = format!("{:>2}{}", prefix(state), state.id());
                            if last {
                                write!(f, "{marked}")?;
                            } else {
                                write!(f, "{marked:<width$}", width = widths[column])?;
                            }
                        } else if last {
                            write!(f, "{cell}")?;
                        } else {
                            write!(f, "{cell:<width$}", width = widths[column])?;
                        }
                    }
                    writeln!(f)?;
                }
            }
        }

        Ok(())
    }
}

impl fmt::Display for Automaton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display(Layout::Compact))
    }
}

impl FromStr for Automaton {
    type Err = AutominError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        read_fa(s.as_bytes())
    }
}

/// Writes the automaton in the given layout to the writer, see [read_fa].
///
/// Note that the writer is buffered internally using a `BufWriter`.
pub fn write_fa(writer: &mut impl Write, automaton: &Automaton, layout: Layout) -> Result<(), AutominError> {
    info!("Writing automaton...");

    let mut writer = BufWriter::new(writer);
    write!(writer, "{}", automaton.display(layout))?;
    writer.flush()?;

    info!("Finished writing automaton.");
    Ok(())
}
