//! Resolving process definitions into runnable nets

use crate::error::{Error, Result};
use crate::schema::{ElementKindDef, ProcessDef};
use indexmap::IndexMap;
use stepthrough_core::{
    Diagram, ElementId, ElementKind, PlaceId, PlaceTransitionInterpreter, PlaceTransitionNet,
    StepConfig, StepController, SteppableTransition, TransitionId,
};
use tracing::debug;

/// A resolved process: net, diagram and bindings ready for a controller
#[derive(Debug, Clone)]
pub struct Process {
    pub net: PlaceTransitionNet,
    pub diagram: Diagram,
    pub bindings: Vec<SteppableTransition>,
    pub config: StepConfig,
    /// Transition names by id, for diagnostics
    pub transition_names: IndexMap<TransitionId, String>,
}

impl Process {
    /// Start a stepping session on this process
    pub fn into_controller(self) -> Result<StepController<PlaceTransitionInterpreter>> {
        let controller = StepController::with_config(
            PlaceTransitionInterpreter::new(),
            self.net,
            self.diagram,
            self.bindings,
            self.config,
        )?;
        Ok(controller)
    }
}

impl ProcessDef {
    /// Resolve names and build the net and diagram
    pub fn build(&self) -> Result<Process> {
        let (mut net, places) = self.build_places()?;
        let (diagram, elements) = self.build_diagram()?;

        let mut bindings = Vec::with_capacity(self.transitions.len());
        let mut transition_names: IndexMap<TransitionId, String> = IndexMap::new();

        for def in &self.transitions {
            if transition_names.values().any(|name| name == &def.name) {
                return Err(Error::DuplicateDefinition(def.name.clone()));
            }
            let id = net.add_transition(def.name.as_str());
            for (place, weight) in &def.inputs {
                net.input(lookup(&places, "place", place)?, id, *weight)?;
            }
            for (place, weight) in &def.outputs {
                net.output(id, lookup(&places, "place", place)?, *weight)?;
            }

            let element = def
                .element
                .as_ref()
                .map(|name| lookup(&elements, "element", name))
                .transpose()?;
            bindings.push(SteppableTransition::new(id, element, def.tier));
            transition_names.insert(id, def.name.clone());
        }

        debug!(
            places = net.place_count(),
            elements = diagram.len(),
            transitions = net.transition_count(),
            "Built process"
        );

        Ok(Process {
            net,
            diagram,
            bindings,
            config: self.config.clone(),
            transition_names,
        })
    }

    /// Resolve and start a stepping session
    pub fn into_controller(&self) -> Result<StepController<PlaceTransitionInterpreter>> {
        self.build()?.into_controller()
    }

    fn build_places(&self) -> Result<(PlaceTransitionNet, IndexMap<String, PlaceId>)> {
        let mut net = PlaceTransitionNet::new();
        let mut places: IndexMap<String, PlaceId> = IndexMap::new();
        for def in &self.places {
            if places.contains_key(&def.name) {
                return Err(Error::DuplicateDefinition(def.name.clone()));
            }
            let id = net.add_place(def.name.as_str(), def.tokens);
            places.insert(def.name.clone(), id);
        }
        Ok((net, places))
    }

    fn build_diagram(&self) -> Result<(Diagram, IndexMap<String, ElementId>)> {
        // Handles are dense and assigned in declaration order, so composite
        // children may refer forward
        let mut elements = IndexMap::new();
        for (i, def) in self.elements.iter().enumerate() {
            if elements.insert(def.name.clone(), ElementId::new(i)).is_some() {
                return Err(Error::DuplicateDefinition(def.name.clone()));
            }
        }

        let mut diagram = Diagram::new();
        for def in &self.elements {
            let kind = match &def.kind {
                ElementKindDef::Node => ElementKind::Node,
                ElementKindDef::DecisionGateway => ElementKind::DecisionGateway,
                ElementKindDef::Gateway => ElementKind::Gateway,
                ElementKindDef::Composite { children } => ElementKind::Composite {
                    children: children
                        .iter()
                        .map(|name| lookup(&elements, "element", name))
                        .collect::<Result<_>>()?,
                },
                ElementKindDef::Edge { source, target } => ElementKind::Edge {
                    source: lookup(&elements, "element", source)?,
                    target: lookup(&elements, "element", target)?,
                },
            };
            diagram.add(def.resource_id.clone().map(Into::into), kind)?;
        }
        Ok((diagram, elements))
    }
}

fn lookup<T: Copy>(names: &IndexMap<String, T>, kind: &'static str, name: &str) -> Result<T> {
    names
        .get(name)
        .copied()
        .ok_or_else(|| Error::unknown(kind, name))
}
