//! Community detection by label propagation.
//!
//! Every superstep each vertex sends its label to its out-neighbours and then
//! adopts the label that occurs most often among the labels it received.
//! Ties between equally frequent labels go to the numerically larger label.
//! The iteration stops when no label changes or the superstep budget runs
//! out. Different initial labels can converge to different communities.

use lpa_api::function::{
    MessagingContext, MessagingFunction, VertexCentricAlgorithm, VertexUpdateContext,
    VertexUpdateFunction,
};
use lpa_api::graph::{IterationResult, VertexCentricGraph};
use lpa_api::message::MessageIterator;
use lpa_common::error::{LpaError, LpaResult};
use lpa_common::types::{Label, VertexKey};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Occurrence count of each label among one vertex's messages.
#[derive(Debug, Clone, Default)]
pub struct LabelFrequencies {
    counts: HashMap<Label, u64>,
}

impl LabelFrequencies {
    /// Consumes `messages` once and counts every label.
    pub fn from_messages<I>(messages: I) -> Self
    where
        I: IntoIterator<Item = Label>,
    {
        let mut counts: HashMap<Label, u64> = HashMap::new();
        for label in messages {
            *counts.entry(label).or_insert(0) += 1;
        }
        Self { counts }
    }

    pub fn frequency(&self, label: Label) -> u64 {
        self.counts.get(&label).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Picks the winning label, starting from `current` at frequency 1.
    ///
    /// A count equal to the running maximum wins only with a larger label; a
    /// higher count always wins. The scan order of the table does not affect
    /// the result.
    pub fn most_frequent(&self, current: Label) -> Label {
        let mut max_frequency: u64 = 1;
        let mut most_frequent_label = current;

        for (&label, &count) in &self.counts {
            match count.cmp(&max_frequency) {
                Ordering::Equal => {
                    if label > most_frequent_label {
                        most_frequent_label = label;
                    }
                }
                Ordering::Greater => {
                    max_frequency = count;
                    most_frequent_label = label;
                }
                Ordering::Less => {}
            }
        }
        most_frequent_label
    }
}

/// New label of a vertex holding `current` that received `messages`.
pub fn select_label<I>(current: Label, messages: I) -> Label
where
    I: IntoIterator<Item = Label>,
{
    LabelFrequencies::from_messages(messages).most_frequent(current)
}

/// Adopts the most frequent label among the in-neighbours.
#[derive(Debug, Clone, Copy, Default)]
pub struct UpdateVertexLabel;

impl<K: VertexKey> VertexUpdateFunction<K, Label, Label> for UpdateVertexLabel {
    fn update_vertex(
        &mut self,
        _vertex_key: &K,
        vertex_value: &Label,
        messages: MessageIterator<Label>,
        context: &mut dyn VertexUpdateContext<Label>,
    ) {
        context.set_new_vertex_value(select_label(*vertex_value, messages));
    }
}

/// Sends the vertex label to all out-neighbours.
#[derive(Debug, Clone, Copy, Default)]
pub struct SendLabelToNeighbors;

impl<K, EV> MessagingFunction<K, Label, EV, Label> for SendLabelToNeighbors
where
    K: VertexKey,
    EV: Send + Sync + 'static,
{
    fn send_messages(
        &mut self,
        _vertex_key: &K,
        vertex_value: &Label,
        context: &mut dyn MessagingContext<K, EV, Label>,
    ) {
        context.send_message_to_all_neighbors(*vertex_value);
    }
}

#[derive(Debug, Clone)]
pub struct LabelPropagation {
    max_iterations: u64,
}

impl LabelPropagation {
    pub fn new(max_iterations: u64) -> Self {
        Self { max_iterations }
    }

    /// Runs label propagation and returns the graph with its final labels.
    pub fn run<G, K, EV>(&self, graph: G) -> LpaResult<G>
    where
        G: VertexCentricGraph<K, Label, EV>,
        K: VertexKey,
        EV: Send + Sync + 'static,
    {
        self.run_with_summary(graph).map(|result| result.graph)
    }

    pub fn run_with_summary<G, K, EV>(&self, graph: G) -> LpaResult<IterationResult<G>>
    where
        G: VertexCentricGraph<K, Label, EV>,
        K: VertexKey,
        EV: Send + Sync + 'static,
    {
        if self.max_iterations == 0 {
            return Err(LpaError::InvalidArgument(
                "label propagation needs at least one iteration".to_string(),
            ));
        }
        let result = graph.run_algorithm::<Label, Self>(self)?;
        tracing::info!(
            supersteps = result.supersteps,
            converged = result.converged,
            "label propagation finished"
        );
        Ok(result)
    }
}

impl<K, EV> VertexCentricAlgorithm<K, Label, EV, Label> for LabelPropagation
where
    K: VertexKey,
    EV: Send + Sync + 'static,
{
    fn name(&self) -> &str {
        "label_propagation"
    }

    fn max_iterations(&self) -> u64 {
        self.max_iterations
    }

    fn create_update_function(&self) -> Box<dyn VertexUpdateFunction<K, Label, Label>> {
        Box::new(UpdateVertexLabel)
    }

    fn create_messaging_function(&self) -> Box<dyn MessagingFunction<K, Label, EV, Label>> {
        Box::new(SendLabelToNeighbors)
    }
}
