//! Core entities for the IL
//!
//! Actions bind identifiers, commands group actions, and the converter turns
//! a complex command into a dependency-ordered `Sequence`.

use super::errors::ConversionError;
use super::value_objects::{Identifier, ValueSource};
use crate::ports::outbound::SequenceRenderer;
use std::collections::{HashMap, HashSet};
use std::fmt;

/// What an action does with its sources.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Invoke an opaque named operation. The name is payload only.
    Call(String),
    /// Bind the result to a single (usually projected) source value.
    Assign,
}

impl Operation {
    pub fn name(&self) -> &str {
        match self {
            Operation::Call(name) => name,
            Operation::Assign => "assign",
        }
    }
}

/// One operation instance binding a result identifier.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Action {
    result: Identifier,
    operation: Operation,
    sources: Vec<ValueSource>,
}

impl Action {
    /// General constructor.
    ///
    /// Fails on an empty call name or an assignment without exactly one source.
    pub fn new(
        result: Identifier,
        operation: Operation,
        sources: Vec<ValueSource>,
    ) -> Result<Self, ConversionError> {
        match &operation {
            Operation::Call(name) if name.trim().is_empty() => {
                return Err(ConversionError::invalid(format!(
                    "action binding {} has an empty operation name",
                    result
                )));
            }
            Operation::Assign if sources.len() != 1 => {
                return Err(ConversionError::invalid(format!(
                    "assignment to {} needs exactly one source, got {}",
                    result,
                    sources.len()
                )));
            }
            _ => {}
        }

        Ok(Self {
            result,
            operation,
            sources,
        })
    }

    /// `result = name(sources...)`
    pub fn call(
        result: Identifier,
        name: impl Into<String>,
        sources: Vec<ValueSource>,
    ) -> Result<Self, ConversionError> {
        Self::new(result, Operation::Call(name.into()), sources)
    }

    /// `result = source`
    pub fn assign(result: Identifier, source: ValueSource) -> Self {
        Self {
            result,
            operation: Operation::Assign,
            sources: vec![source],
        }
    }

    pub fn result(&self) -> &Identifier {
        &self.result
    }

    pub fn operation(&self) -> &Operation {
        &self.operation
    }

    pub fn sources(&self) -> &[ValueSource] {
        &self.sources
    }

    /// Identifiers this action depends on, in source order, including those
    /// nested in array and object sources (may repeat).
    pub fn references(&self) -> impl Iterator<Item = &Identifier> {
        self.sources.iter().flat_map(ValueSource::references)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.operation {
            Operation::Call(name) => {
                write!(f, "{} = {}(", self.result, name)?;
                for (i, source) in self.sources.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", source)?;
                }
                f.write_str(");")
            }
            Operation::Assign => {
                write!(f, "{} = ", self.result)?;
                for source in &self.sources {
                    write!(f, "{}", source)?;
                }
                f.write_str(";")
            }
        }
    }
}

/// Reusable named operation that stamps out call actions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionTemplate {
    name: String,
}

impl ActionTemplate {
    pub fn new(name: impl Into<String>) -> Result<Self, ConversionError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ConversionError::invalid("action template name cannot be empty"));
        }
        Ok(Self { name })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn call(&self, result: Identifier, sources: Vec<ValueSource>) -> Action {
        Action {
            result,
            operation: Operation::Call(self.name.clone()),
            sources,
        }
    }
}

/// Command wrapping exactly one action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimpleCommand {
    action: Action,
}

impl SimpleCommand {
    pub fn new(action: Action) -> Self {
        Self { action }
    }

    pub fn action(&self) -> &Action {
        &self.action
    }

    pub fn into_action(self) -> Action {
        self.action
    }
}

impl From<Action> for SimpleCommand {
    fn from(action: Action) -> Self {
        Self::new(action)
    }
}

/// Append-only builder of simple commands.
///
/// Insertion order is kept but is only a hint for the converter.
#[derive(Clone, Debug, Default)]
pub struct VectorSimpleCommand {
    commands: Vec<SimpleCommand>,
    declared: HashSet<Identifier>,
    returns: Option<ValueSource>,
}

impl VectorSimpleCommand {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a command. Fails, leaving the builder unchanged, if its result
    /// identifier is already declared here.
    pub fn add(&mut self, command: impl Into<SimpleCommand>) -> Result<(), ConversionError> {
        let command = command.into();
        let result = command.action().result();
        if self.declared.contains(result) {
            return Err(ConversionError::DuplicateDeclaration {
                identifier: result.clone(),
            });
        }
        self.declared.insert(result.clone());
        self.commands.push(command);
        Ok(())
    }

    /// Record the value the whole command yields. At most once.
    pub fn returning(&mut self, source: impl Into<ValueSource>) -> Result<(), ConversionError> {
        if self.returns.is_some() {
            return Err(ConversionError::invalid("return value already set"));
        }
        self.returns = Some(source.into());
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SimpleCommand> {
        self.commands.iter()
    }
}

/// Immutable snapshot of a completed `VectorSimpleCommand`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComplexCommand {
    commands: Vec<SimpleCommand>,
    returns: Option<ValueSource>,
}

impl ComplexCommand {
    pub fn new(vector: VectorSimpleCommand) -> Result<Self, ConversionError> {
        if vector.is_empty() {
            return Err(ConversionError::invalid("complex command has no children"));
        }
        Ok(Self {
            commands: vector.commands,
            returns: vector.returns,
        })
    }

    pub fn commands(&self) -> &[SimpleCommand] {
        &self.commands
    }

    pub fn actions(&self) -> impl Iterator<Item = &Action> {
        self.commands.iter().map(SimpleCommand::action)
    }

    pub fn returns(&self) -> Option<&ValueSource> {
        self.returns.as_ref()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl fmt::Display for ComplexCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_listing(f, self.actions(), self.returns.as_ref())
    }
}

/// Either a single action or a set of them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Simple(SimpleCommand),
    Complex(ComplexCommand),
}

impl Command {
    /// Lift into a complex command so both variants can be converted.
    pub fn into_complex(self) -> ComplexCommand {
        match self {
            Command::Simple(simple) => ComplexCommand {
                commands: vec![simple],
                returns: None,
            },
            Command::Complex(complex) => complex,
        }
    }
}

impl From<SimpleCommand> for Command {
    fn from(simple: SimpleCommand) -> Self {
        Command::Simple(simple)
    }
}

impl From<ComplexCommand> for Command {
    fn from(complex: ComplexCommand) -> Self {
        Command::Complex(complex)
    }
}

/// Dependency graph over action positions (insertion indices).
///
/// An edge `from -> to` means the action at `from` declares an identifier
/// that the action at `to` consumes. Only built by the dependency builder,
/// so adjacency lists always match the node count.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    /// Identifier -> position of its declaring action
    pub(crate) declarations: HashMap<Identifier, usize>,
    /// Per action: distinct positions it depends on, sorted
    pub(crate) dependencies: Vec<Vec<usize>>,
    /// Per action: positions depending on it (reverse adjacency)
    pub(crate) dependents: Vec<Vec<usize>>,
    /// Per action: number of unresolved dependencies
    pub(crate) in_degree: Vec<usize>,
    edge_count: usize,
}

impl DependencyGraph {
    pub(crate) fn with_nodes(node_count: usize) -> Self {
        Self {
            declarations: HashMap::with_capacity(node_count),
            dependencies: vec![Vec::new(); node_count],
            dependents: vec![Vec::new(); node_count],
            in_degree: vec![0; node_count],
            edge_count: 0,
        }
    }

    /// Add `from -> to`. Repeated edges are ignored.
    pub(crate) fn add_edge(&mut self, from: usize, to: usize) {
        let deps = &mut self.dependencies[to];
        if let Err(slot) = deps.binary_search(&from) {
            deps.insert(slot, from);
            self.dependents[from].push(to);
            self.in_degree[to] += 1;
            self.edge_count += 1;
        }
    }

    pub fn has_edge(&self, from: usize, to: usize) -> bool {
        self.dependencies
            .get(to)
            .map(|deps| deps.binary_search(&from).is_ok())
            .unwrap_or(false)
    }

    pub fn declarer(&self, identifier: &Identifier) -> Option<usize> {
        self.declarations.get(identifier).copied()
    }

    /// Positions the action at `pos` depends on, ascending.
    pub fn dependencies_of(&self, pos: usize) -> &[usize] {
        self.dependencies.get(pos).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Positions depending on the action at `pos`.
    pub fn dependents_of(&self, pos: usize) -> &[usize] {
        self.dependents.get(pos).map(Vec::as_slice).unwrap_or(&[])
    }

    /// True if this graph was built from `command`: same size and every
    /// action declared at its own position.
    pub fn describes(&self, command: &ComplexCommand) -> bool {
        self.node_count() == command.len()
            && self.declarations.len() == command.len()
            && command
                .actions()
                .enumerate()
                .all(|(pos, action)| self.declarer(action.result()) == Some(pos))
    }

    /// Positions with no dependencies, ascending.
    pub fn zero_degree_nodes(&self) -> Vec<usize> {
        self.in_degree
            .iter()
            .enumerate()
            .filter(|(_, &degree)| degree == 0)
            .map(|(pos, _)| pos)
            .collect()
    }

    pub fn node_count(&self) -> usize {
        self.in_degree.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }
}

/// Dependency-valid, read-only ordering of actions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sequence {
    actions: Vec<Action>,
    returns: Option<ValueSource>,
}

impl Sequence {
    pub(crate) fn new(actions: Vec<Action>, returns: Option<ValueSource>) -> Self {
        Self { actions, returns }
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn returns(&self) -> Option<&ValueSource> {
        self.returns.as_ref()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Position of the action binding `identifier`.
    pub fn position_of(&self, identifier: &Identifier) -> Option<usize> {
        self.actions.iter().position(|a| a.result() == identifier)
    }

    /// Stable textual listing, one action per line.
    pub fn render(&self) -> String {
        self.to_string()
    }

    pub fn render_with(&self, renderer: &dyn SequenceRenderer) -> Result<String, ConversionError> {
        renderer.render(self)
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_listing(f, self.actions.iter(), self.returns.as_ref())
    }
}

fn write_listing<'a>(
    f: &mut fmt::Formatter<'_>,
    actions: impl Iterator<Item = &'a Action>,
    returns: Option<&ValueSource>,
) -> fmt::Result {
    for action in actions {
        writeln!(f, "{}", action)?;
    }
    if let Some(source) = returns {
        writeln!(f, "return {};", source)?;
    }
    Ok(())
}
