use crate::message::MessageIterator;
use lpa_common::types::Edge;

pub trait Function: Send + Sync + 'static {}

impl<F> Function for F where F: Send + Sync + 'static {}

/// Context handed to [`VertexUpdateFunction::update_vertex`].
pub trait VertexUpdateContext<VV> {
    /// Signals the vertex's new value to the engine. The engine compares it
    /// with the previous value to decide convergence.
    fn set_new_vertex_value(&mut self, value: VV);
    fn superstep(&self) -> u64;
}

/// Context handed to [`MessagingFunction::send_messages`].
pub trait MessagingContext<K, EV, M> {
    fn send_message_to(&mut self, target_id: K, message: M);
    fn send_message_to_all_neighbors(&mut self, message: M);
    fn out_edges(&self) -> Box<dyn Iterator<Item = &Edge<K, EV>> + '_>;
    fn superstep(&self) -> u64;
}

/// Computes a vertex's new value from the messages it received in the
/// current superstep.
pub trait VertexUpdateFunction<K, VV, M>: Function {
    fn pre_superstep(&mut self, _superstep: u64) {}

    fn update_vertex(
        &mut self,
        vertex_key: &K,
        vertex_value: &VV,
        messages: MessageIterator<M>,
        context: &mut dyn VertexUpdateContext<VV>,
    );

    fn post_superstep(&mut self, _superstep: u64) {}
}

/// Emits the messages a vertex sends along its out-edges in the current
/// superstep.
pub trait MessagingFunction<K, VV, EV, M>: Function {
    fn pre_superstep(&mut self, _superstep: u64) {}

    fn send_messages(
        &mut self,
        vertex_key: &K,
        vertex_value: &VV,
        context: &mut dyn MessagingContext<K, EV, M>,
    );

    fn post_superstep(&mut self, _superstep: u64) {}
}

/// An algorithm expressed as a pair of vertex-centric functions.
///
/// Engines that evaluate partitions in parallel ask for one function pair per
/// partition, so the factories must be callable repeatedly.
pub trait VertexCentricAlgorithm<K, VV, EV, M>: Send + Sync + 'static {
    fn name(&self) -> &str;
    fn max_iterations(&self) -> u64;
    fn create_update_function(&self) -> Box<dyn VertexUpdateFunction<K, VV, M>>;
    fn create_messaging_function(&self) -> Box<dyn MessagingFunction<K, VV, EV, M>>;
}
